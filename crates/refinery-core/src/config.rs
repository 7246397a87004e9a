//! Tunable constants for the outcome engine.
//!
//! The whole configuration surface of the conversion system is six numbers:
//! the four default band chances and the two output multipliers. The
//! [`OutcomeConfig`] struct bundles them so callers (formulas, tests) can
//! override defaults without touching the selection logic.

use serde::{Deserialize, Serialize};

use crate::outcome::OutcomeBands;

/// How much each proficiency level shifts the band chances.
///
/// Levels above 0 subtract this per level from failure and partial and add it
/// to bonus and normal. The shift is linear and deliberately unclamped: high
/// levels can push failure and partial below zero and bonus and normal above
/// their natural ceiling.
pub const PROFICIENCY_SHIFT_PER_LEVEL: f64 = 0.05;

/// Configuration for outcome band selection and output scaling.
///
/// The defaults are the canonical values of the conversion system; every
/// chance is a probability in [0, 1] at level 0 and the multipliers scale the
/// declared output quantities for the partial and bonus bands.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct OutcomeConfig {
    /// Chance of the failure band at level 0 (default: 0.25).
    pub failure_chance: f64,

    /// Chance of the partial band at level 0 (default: 0.20).
    pub partial_chance: f64,

    /// Chance of the bonus band at level 0 (default: 0.05).
    pub bonus_chance: f64,

    /// Chance of the normal band at level 0 (default: 0.50).
    pub normal_chance: f64,

    /// Output multiplier for the partial band, floored (default: 0.75).
    pub partial_multiplier: f64,

    /// Output multiplier for the bonus band, ceiled (default: 1.1).
    pub bonus_multiplier: f64,
}

impl Default for OutcomeConfig {
    fn default() -> Self {
        Self {
            failure_chance: 0.25,
            partial_chance: 0.20,
            bonus_chance: 0.05,
            normal_chance: 0.50,
            partial_multiplier: 0.75,
            bonus_multiplier: 1.1,
        }
    }
}

impl OutcomeConfig {
    /// Derive the band chances for the given proficiency level.
    ///
    /// Level 0 returns the configured defaults unchanged. Higher levels apply
    /// the linear shift of [`PROFICIENCY_SHIFT_PER_LEVEL`] per level, with no
    /// clamping in either direction.
    pub fn bands_for_level(&self, level: u8) -> OutcomeBands {
        if level == 0 {
            return OutcomeBands {
                failure: self.failure_chance,
                partial: self.partial_chance,
                bonus: self.bonus_chance,
                normal: self.normal_chance,
            };
        }

        let shift = f64::from(level) * PROFICIENCY_SHIFT_PER_LEVEL;
        OutcomeBands {
            failure: self.failure_chance - shift,
            partial: self.partial_chance - shift,
            bonus: self.bonus_chance + shift,
            normal: self.normal_chance + shift,
        }
    }
}
