//! Conversion formulas: fixed input/output resource quantities plus a
//! probabilistic result.
//!
//! A [`Formula`] pairs ordered input resource names with the quantities they
//! consume and ordered output resource names with the quantities they
//! declare. Applying the formula draws one outcome band for its proficiency
//! level and overwrites the stored result wholesale; the declared inputs and
//! outputs never change after construction.

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::config::OutcomeConfig;
use crate::error::{OutcomeError, ValidationError};
use crate::outcome::{Outcome, OutcomeBands, transformed_outputs};

/// Highest proficiency level a formula accepts.
pub const MAX_PROFICIENCY_LEVEL: u8 = 5;

// ---------------------------------------------------------------------------
// Formula
// ---------------------------------------------------------------------------

/// A conversion rule from input resource quantities to output quantities.
///
/// Equality covers all five sequences (inputs, input quantities, outputs,
/// output quantities, result) plus the proficiency level. `Clone` yields a
/// fully independent copy, result included.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Formula {
    /// Input resource names, pairwise with `input_quantities`.
    input_resources: Vec<String>,
    /// Quantities consumed per input resource.
    input_quantities: Vec<u32>,
    /// Output resource names, pairwise with `output_quantities`.
    output_resources: Vec<String>,
    /// Quantities declared per output resource.
    output_quantities: Vec<u32>,
    /// Result of the most recent apply; empty until the first apply and after
    /// a failure band.
    result: Vec<u32>,
    /// Proficiency level in `[0, MAX_PROFICIENCY_LEVEL]`.
    proficiency: u8,
}

impl Formula {
    /// Create a formula after validating its arguments.
    ///
    /// Rejects blank input or output names, mismatched name/quantity lengths
    /// on either side, and proficiency levels above
    /// [`MAX_PROFICIENCY_LEVEL`]. The result starts empty.
    pub fn new(
        input_resources: Vec<String>,
        input_quantities: Vec<u32>,
        output_resources: Vec<String>,
        output_quantities: Vec<u32>,
        proficiency: u8,
    ) -> Result<Self, ValidationError> {
        if input_resources.iter().any(|name| name.trim().is_empty()) {
            return Err(ValidationError::BlankResourceName);
        }
        if output_resources.iter().any(|name| name.trim().is_empty()) {
            return Err(ValidationError::BlankResourceName);
        }
        if input_resources.len() != input_quantities.len() {
            return Err(ValidationError::InputLengthMismatch {
                names: input_resources.len(),
                quantities: input_quantities.len(),
            });
        }
        if output_resources.len() != output_quantities.len() {
            return Err(ValidationError::OutputLengthMismatch {
                names: output_resources.len(),
                quantities: output_quantities.len(),
            });
        }
        if proficiency > MAX_PROFICIENCY_LEVEL {
            return Err(ValidationError::ProficiencyOutOfRange {
                level: proficiency,
                max: MAX_PROFICIENCY_LEVEL,
            });
        }

        Ok(Self {
            input_resources,
            input_quantities,
            output_resources,
            output_quantities,
            result: Vec::new(),
            proficiency,
        })
    }

    /// Input resource names, in declaration order.
    pub fn input_resources(&self) -> &[String] {
        &self.input_resources
    }

    /// Input quantities, pairwise with [`input_resources`](Self::input_resources).
    pub fn input_quantities(&self) -> &[u32] {
        &self.input_quantities
    }

    /// Output resource names, in declaration order.
    pub fn output_resources(&self) -> &[String] {
        &self.output_resources
    }

    /// Declared output quantities, pairwise with
    /// [`output_resources`](Self::output_resources).
    pub fn output_quantities(&self) -> &[u32] {
        &self.output_quantities
    }

    /// Result of the most recent apply (empty before the first apply and
    /// after a failure band).
    pub fn result(&self) -> &[u32] {
        &self.result
    }

    /// Current proficiency level.
    pub const fn proficiency_level(&self) -> u8 {
        self.proficiency
    }

    /// Band chances in effect for this formula's proficiency level, derived
    /// from the default configuration.
    pub fn outcome_bands(&self) -> OutcomeBands {
        OutcomeBands::for_level(self.proficiency)
    }

    /// Raise the proficiency level by one, capped at
    /// [`MAX_PROFICIENCY_LEVEL`].
    pub fn increase_proficiency(&mut self) {
        self.proficiency = self.proficiency.saturating_add(1).min(MAX_PROFICIENCY_LEVEL);
    }

    /// Lower the proficiency level by one, floored at zero.
    pub fn decrease_proficiency(&mut self) {
        self.proficiency = self.proficiency.saturating_sub(1);
    }

    /// Apply the formula with the default configuration.
    ///
    /// Draws one outcome band from `rng` and overwrites the stored result
    /// with the band's transform of the declared outputs. The selected band
    /// is returned for observability; callers read the quantities back via
    /// [`result`](Self::result).
    pub fn apply(&mut self, rng: &mut impl Rng) -> Result<Outcome, OutcomeError> {
        self.apply_with_config(&OutcomeConfig::default(), rng)
    }

    /// Apply the formula under an explicit configuration.
    pub fn apply_with_config(
        &mut self,
        config: &OutcomeConfig,
        rng: &mut impl Rng,
    ) -> Result<Outcome, OutcomeError> {
        let bands = config.bands_for_level(self.proficiency);
        let outcome = bands.draw(rng)?;
        self.result = transformed_outputs(outcome, &self.output_quantities, config);
        tracing::debug!(?outcome, level = self.proficiency, "formula applied");
        Ok(outcome)
    }
}
