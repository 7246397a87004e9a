//! Assemblies and ledger-aware plan application for the refinery.
//!
//! This crate composes the two lower layers: `refinery-core` supplies the
//! formulas and plans, `refinery-ledger` supplies the stockpile. The
//! [`apply`] module runs a plan against a stockpile, committing each
//! affordable formula independently; the [`assembly`] module bundles one
//! plan variant with one stockpile behind a single delegating surface.
//!
//! # Usage
//!
//! ```
//! use std::collections::BTreeMap;
//!
//! use rand::rngs::SmallRng;
//! use rand::SeedableRng;
//! use refinery_core::{Formula, Plan, share};
//! use refinery_ledger::Stockpile;
//! use refinery_workshop::apply_to_stockpile;
//!
//! // The formula wants far more ore than the stockpile holds, so the
//! // application skips it and returns the ledger unchanged.
//! let greedy = Formula::new(
//!     vec![String::from("Iron Ore")],
//!     vec![99],
//!     vec![String::from("Iron Bar")],
//!     vec![1],
//!     0,
//! )?;
//! let plan = Plan::new(vec![share(greedy)])?;
//! let stockpile = Stockpile::new(BTreeMap::from([(String::from("Iron Ore"), 2)]));
//!
//! let mut rng = SmallRng::seed_from_u64(42);
//! let after = apply_to_stockpile(&plan, &stockpile, &mut rng)?;
//! assert_eq!(after, stockpile);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod apply;
pub mod assembly;

// Re-export primary types at crate root.
pub use apply::apply_to_stockpile;
pub use assembly::{Assembly, PlanVariant};

use refinery_core::{OutcomeError, PlanError};
use refinery_ledger::LedgerError;

// ---------------------------------------------------------------------------
// Error types
// ---------------------------------------------------------------------------

/// Errors that can occur while operating an assembly or applying a plan
/// against a stockpile.
#[derive(Debug, thiserror::Error)]
pub enum WorkshopError {
    /// A plan operation violated the step/completion state machine.
    #[error(transparent)]
    Plan(#[from] PlanError),

    /// A stockpile operation failed.
    #[error(transparent)]
    Ledger(#[from] LedgerError),

    /// The outcome engine hit its fatal uncovered-draw condition.
    #[error(transparent)]
    Outcome(#[from] OutcomeError),

    /// A ledger-aware apply was requested on a plain (non-executable) plan.
    #[error("the held plan is not executable; ledger-aware apply requires an executable plan")]
    NotExecutable,
}
