//! Outcome band selection for formula application.
//!
//! Applying a formula draws one uniform value in [0, 1) and maps it to one of
//! four bands: failure, partial, bonus, or normal. Each band transforms the
//! declared output quantities differently (empty, floored x0.75, ceiled x1.1,
//! unchanged).
//!
//! # Band thresholds
//!
//! The four conditions are evaluated in order and use strict comparisons on
//! cumulative chances, so they are not a clean partition of [0, 1): exact
//! boundary values are covered by no band, and at levels above 0 the bonus
//! and normal conditions overlap (the bonus band wins because it is checked
//! first). The selection preserves these thresholds exactly; a draw that
//! matches no band surfaces as [`OutcomeError::UncoveredDraw`] rather than
//! defaulting to a band.

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::config::OutcomeConfig;
use crate::error::OutcomeError;

// ---------------------------------------------------------------------------
// Outcome
// ---------------------------------------------------------------------------

/// The band selected by a single outcome draw.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Outcome {
    /// The conversion failed; the result is empty.
    Failure,
    /// The conversion partially succeeded; outputs are floored at x0.75.
    Partial,
    /// The conversion overperformed; outputs are ceiled at x1.1.
    Bonus,
    /// The conversion succeeded; outputs are the declared quantities.
    Normal,
}

// ---------------------------------------------------------------------------
// OutcomeBands
// ---------------------------------------------------------------------------

/// The four band chances in effect for one proficiency level.
///
/// Produced by [`OutcomeConfig::bands_for_level`]; the values are unclamped,
/// so levels near the cap can carry negative failure/partial chances and
/// bonus/normal chances above one.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct OutcomeBands {
    /// Chance of the failure band.
    pub failure: f64,
    /// Chance of the partial band.
    pub partial: f64,
    /// Chance of the bonus band.
    pub bonus: f64,
    /// Chance of the normal band.
    pub normal: f64,
}

impl OutcomeBands {
    /// Derive the bands for `level` from the default configuration.
    pub fn for_level(level: u8) -> Self {
        OutcomeConfig::default().bands_for_level(level)
    }

    /// Map a uniform draw in [0, 1) to a band.
    ///
    /// Conditions are evaluated failure, partial, bonus, normal, with the
    /// exact strict-comparison thresholds of the contract. A draw covered by
    /// no condition is a fatal configuration error.
    pub fn select(&self, roll: f64) -> Result<Outcome, OutcomeError> {
        if roll < self.failure {
            return Ok(Outcome::Failure);
        }
        if roll > self.failure && roll < self.failure + self.partial {
            return Ok(Outcome::Partial);
        }
        if roll > self.failure + self.partial && roll < self.normal {
            return Ok(Outcome::Bonus);
        }
        if roll > self.failure + self.bonus + self.partial && roll < 1.0 {
            return Ok(Outcome::Normal);
        }
        Err(OutcomeError::UncoveredDraw { roll })
    }

    /// Draw one uniform value from `rng` and select a band.
    pub fn draw(&self, rng: &mut impl Rng) -> Result<Outcome, OutcomeError> {
        self.select(rng.random::<f64>())
    }
}

// ---------------------------------------------------------------------------
// Output transforms
// ---------------------------------------------------------------------------

/// Transform the declared output quantities for the selected band.
///
/// Failure produces an empty sequence; partial floors each quantity at the
/// configured partial multiplier; bonus ceils each quantity at the configured
/// bonus multiplier; normal returns the declared quantities unchanged.
pub fn transformed_outputs(outcome: Outcome, declared: &[u32], config: &OutcomeConfig) -> Vec<u32> {
    match outcome {
        Outcome::Failure => Vec::new(),
        Outcome::Partial => declared
            .iter()
            .map(|&quantity| scale(quantity, config.partial_multiplier, false))
            .collect(),
        Outcome::Bonus => declared
            .iter()
            .map(|&quantity| scale(quantity, config.bonus_multiplier, true))
            .collect(),
        Outcome::Normal => declared.to_vec(),
    }
}

/// Scale one quantity by a multiplier, flooring or ceiling the product.
///
/// The clamp keeps the narrowing cast in range for any multiplier.
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn scale(quantity: u32, multiplier: f64, ceil: bool) -> u32 {
    let product = f64::from(quantity) * multiplier;
    let rounded = if ceil { product.ceil() } else { product.floor() };
    rounded.clamp(0.0, f64::from(u32::MAX)) as u32
}
