//! Conversion formulas, outcome bands, and execution plans for the refinery.
//!
//! This crate is the logic layer of the resource-conversion system --
//! everything that turns declared input quantities into probabilistic output
//! quantities without touching a ledger. It sits below `refinery-ledger`
//! (the stockpile) and `refinery-workshop` (assembly and ledger-aware
//! application).
//!
//! # Modules
//!
//! - [`config`] -- The six tunable constants of the outcome engine
//!   ([`OutcomeConfig`])
//! - [`error`] -- Validation, plan-state, and outcome error types
//! - [`executable`] -- The step-gated plan variant ([`ExecutablePlan`])
//! - [`formula`] -- Conversion rules with probabilistic results ([`Formula`])
//! - [`outcome`] -- Band selection and output transforms ([`OutcomeBands`])
//! - [`plan`] -- Ordered formula sequences and the common operation trait
//!   ([`Plan`], [`PlanOps`])
//!
//! # Usage
//!
//! ```
//! use refinery_core::{Formula, Plan, PlanOps, share};
//!
//! let smelt = Formula::new(
//!     vec![String::from("Iron Ore")],
//!     vec![2],
//!     vec![String::from("Iron Bar")],
//!     vec![1],
//!     3,
//! )?;
//!
//! let mut plan = Plan::new(vec![share(smelt)])?;
//! plan.add_formula(share(Formula::new(
//!     vec![String::from("Iron Bar")],
//!     vec![1],
//!     vec![String::from("Sword")],
//!     vec![1],
//!     0,
//! )?));
//! assert_eq!(plan.len(), 2);
//! # Ok::<(), refinery_core::ValidationError>(())
//! ```

pub mod config;
pub mod error;
pub mod executable;
pub mod formula;
pub mod outcome;
pub mod plan;

#[cfg(test)]
pub(crate) mod testing;

// Re-export primary types at crate root.
pub use config::{OutcomeConfig, PROFICIENCY_SHIFT_PER_LEVEL};
pub use error::{OutcomeError, PlanError, ValidationError};
pub use executable::ExecutablePlan;
pub use formula::{Formula, MAX_PROFICIENCY_LEVEL};
pub use outcome::{Outcome, OutcomeBands, transformed_outputs};
pub use plan::{Plan, PlanOps, SharedFormula, share};
