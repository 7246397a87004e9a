//! Assemblies: one plan variant paired with one stockpile.
//!
//! An [`Assembly`] is the composition root of the conversion system. The
//! held plan is an explicit sum type ([`PlanVariant`]) resolved once at
//! construction -- dispatch is a match on the variant, never runtime type
//! inspection. Plan-shaped operations delegate to the held plan, ledger-shaped
//! operations to the held stockpile.

use rand::Rng;

use refinery_core::{ExecutablePlan, Plan, PlanError, PlanOps, SharedFormula};
use refinery_ledger::{LedgerError, Stockpile};

use crate::WorkshopError;
use crate::apply::apply_to_stockpile;

// ---------------------------------------------------------------------------
// PlanVariant
// ---------------------------------------------------------------------------

/// The plan an assembly holds: plain or step-gated.
#[derive(Debug, PartialEq, Eq)]
pub enum PlanVariant {
    /// A plain plan; `apply` sweeps the whole sequence.
    Plain(Plan),
    /// A step-gated plan; `apply` advances one step.
    Executable(ExecutablePlan),
}

impl PlanVariant {
    /// Whether this variant is the step-gated one.
    pub const fn is_executable(&self) -> bool {
        matches!(self, Self::Executable(_))
    }

    /// The formula sequence beneath either variant.
    pub const fn as_plan(&self) -> &Plan {
        match self {
            Self::Plain(plan) => plan,
            Self::Executable(executable) => executable.as_plan(),
        }
    }
}

// ---------------------------------------------------------------------------
// Assembly
// ---------------------------------------------------------------------------

/// One plan variant and one stockpile behind a single delegating surface.
#[derive(Debug, PartialEq, Eq)]
pub struct Assembly {
    /// The held plan, tagged by variant at construction.
    plan: PlanVariant,
    /// The held resource ledger.
    stockpile: Stockpile,
}

impl Assembly {
    /// Create an assembly from a plan variant and a stockpile.
    pub const fn new(plan: PlanVariant, stockpile: Stockpile) -> Self {
        Self { plan, stockpile }
    }

    /// Whether the held plan is the step-gated variant.
    pub const fn is_executable(&self) -> bool {
        self.plan.is_executable()
    }

    /// The held plan variant.
    pub const fn plan(&self) -> &PlanVariant {
        &self.plan
    }

    /// The held stockpile.
    pub const fn stockpile(&self) -> &Stockpile {
        &self.stockpile
    }

    /// Append a formula to the held plan.
    pub fn add_formula(&mut self, formula: SharedFormula) {
        match &mut self.plan {
            PlanVariant::Plain(plan) => plan.add_formula(formula),
            PlanVariant::Executable(executable) => executable.add_formula(formula),
        }
    }

    /// Remove the last formula from the held plan.
    pub fn remove_last_formula(&mut self) -> Result<(), PlanError> {
        match &mut self.plan {
            PlanVariant::Plain(plan) => plan.remove_last_formula(),
            PlanVariant::Executable(executable) => executable.remove_last_formula(),
        }
    }

    /// Replace the formula at `index` in the held plan.
    pub fn replace_formula(
        &mut self,
        formula: SharedFormula,
        index: usize,
    ) -> Result<(), PlanError> {
        match &mut self.plan {
            PlanVariant::Plain(plan) => plan.replace_formula(formula, index),
            PlanVariant::Executable(executable) => executable.replace_formula(formula, index),
        }
    }

    /// Apply the held plan's unit of work: the whole sequence for a plain
    /// plan, the current step for an executable one.
    pub fn apply<R: Rng>(&mut self, rng: &mut R) -> Result<(), PlanError> {
        match &mut self.plan {
            PlanVariant::Plain(plan) => plan.apply(rng),
            PlanVariant::Executable(executable) => executable.apply(rng),
        }
    }

    /// Run the held executable plan against the held stockpile, returning the
    /// resulting ledger snapshot.
    ///
    /// The held stockpile is left untouched; committing the snapshot is the
    /// caller's decision. Fails with [`WorkshopError::NotExecutable`] when
    /// the held plan is the plain variant.
    pub fn apply_with_ledger<R: Rng>(&self, rng: &mut R) -> Result<Stockpile, WorkshopError> {
        match &self.plan {
            PlanVariant::Executable(executable) => {
                apply_to_stockpile(executable.as_plan(), &self.stockpile, rng)
            }
            PlanVariant::Plain(_) => Err(WorkshopError::NotExecutable),
        }
    }

    /// Reset the held stockpile to its construction-time snapshot.
    pub fn restock(&mut self) {
        self.stockpile.restock();
    }

    /// Add to the balance of an existing resource in the held stockpile.
    pub fn increase_quantity(&mut self, name: &str, amount: u32) -> Result<(), LedgerError> {
        self.stockpile.increase(name, amount)
    }

    /// Remove from the balance of an existing resource in the held stockpile.
    pub fn decrease_quantity(&mut self, name: &str, amount: u32) -> Result<(), LedgerError> {
        self.stockpile.decrease(name, amount)
    }

    /// Snapshot sharing the plan layer's handles; the stockpile is a value
    /// and is cloned.
    pub fn shallow_copy(&self) -> Self {
        let plan = match &self.plan {
            PlanVariant::Plain(plan) => PlanVariant::Plain(plan.shallow_copy()),
            PlanVariant::Executable(executable) => {
                PlanVariant::Executable(executable.shallow_copy())
            }
        };
        Self {
            plan,
            stockpile: self.stockpile.clone(),
        }
    }

    /// Snapshot with every formula cloned and the stockpile cloned.
    pub fn deep_copy(&self) -> Self {
        let plan = match &self.plan {
            PlanVariant::Plain(plan) => PlanVariant::Plain(plan.deep_copy()),
            PlanVariant::Executable(executable) => {
                PlanVariant::Executable(executable.deep_copy())
            }
        };
        Self {
            plan,
            stockpile: self.stockpile.clone(),
        }
    }
}
