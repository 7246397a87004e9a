//! Ordered, mutable sequences of conversion formulas.
//!
//! A [`Plan`] owns an ordered list of shared formula handles. Mutation is
//! append-only at the back except for explicit replace-by-index and
//! remove-last. Copies are explicit snapshots, never live views: a shallow
//! copy shares the formula handles (mutations cross-visible), a deep copy
//! clones every formula.
//!
//! The [`PlanOps`] trait is the common operation surface of the plain plan
//! and the step-gated [`ExecutablePlan`](crate::executable::ExecutablePlan),
//! so callers can be written against either variant without downcasting.

use std::cell::RefCell;
use std::rc::Rc;

use rand::Rng;

use crate::error::{OutcomeError, PlanError, ValidationError};
use crate::formula::Formula;

/// A shared, interiorly mutable handle to a formula.
///
/// Plans hold formulas through this handle so that shallow copies observe
/// each other's apply results, matching the reference semantics of the copy
/// contract.
pub type SharedFormula = Rc<RefCell<Formula>>;

/// Wrap a formula in a [`SharedFormula`] handle.
pub fn share(formula: Formula) -> SharedFormula {
    Rc::new(RefCell::new(formula))
}

// ---------------------------------------------------------------------------
// PlanOps
// ---------------------------------------------------------------------------

/// Operations common to the plain and step-gated plan variants.
pub trait PlanOps {
    /// Append a formula at the back of the sequence.
    fn add_formula(&mut self, formula: SharedFormula);

    /// Remove the last formula; fails on an empty sequence.
    fn remove_last_formula(&mut self) -> Result<(), PlanError>;

    /// Overwrite the slot at `index` in place; fails when `index` is outside
    /// the sequence (step-gated variants add further preconditions).
    fn replace_formula(&mut self, formula: SharedFormula, index: usize) -> Result<(), PlanError>;

    /// Apply the variant's unit of work: the whole sequence for a plain
    /// plan, the current step for an executable plan.
    fn apply<R: Rng>(&mut self, rng: &mut R) -> Result<(), PlanError>;

    /// Snapshot sharing formula handles (mutations cross-visible).
    fn shallow_copy(&self) -> Self
    where
        Self: Sized;

    /// Snapshot with every formula independently cloned.
    fn deep_copy(&self) -> Self
    where
        Self: Sized;
}

// ---------------------------------------------------------------------------
// Plan
// ---------------------------------------------------------------------------

/// An ordered, mutable sequence of formulas.
///
/// Two plans are equal iff they have the same length and pairwise-equal
/// formulas.
#[derive(Debug, PartialEq, Eq)]
pub struct Plan {
    /// The formula sequence, in execution order.
    formulas: Vec<SharedFormula>,
}

impl Plan {
    /// Create a plan from a non-empty formula sequence.
    pub fn new(formulas: Vec<SharedFormula>) -> Result<Self, ValidationError> {
        if formulas.is_empty() {
            return Err(ValidationError::EmptyPlan);
        }
        Ok(Self { formulas })
    }

    /// Number of formulas in the plan.
    pub const fn len(&self) -> usize {
        self.formulas.len()
    }

    /// Whether the plan holds no formulas.
    pub const fn is_empty(&self) -> bool {
        self.formulas.is_empty()
    }

    /// The formula sequence, in execution order.
    pub fn formulas(&self) -> &[SharedFormula] {
        &self.formulas
    }

    /// The formula at `index`, if any.
    pub fn formula(&self, index: usize) -> Option<&SharedFormula> {
        self.formulas.get(index)
    }

    /// Apply every formula in sequence order.
    ///
    /// A failure band on an individual formula is a valid outcome and does
    /// not stop the sweep; only the fatal uncovered-draw error does.
    pub fn apply_all<R: Rng>(&mut self, rng: &mut R) -> Result<(), OutcomeError> {
        for formula in &self.formulas {
            formula.borrow_mut().apply(rng)?;
        }
        Ok(())
    }
}

impl PlanOps for Plan {
    fn add_formula(&mut self, formula: SharedFormula) {
        self.formulas.push(formula);
    }

    fn remove_last_formula(&mut self) -> Result<(), PlanError> {
        if self.formulas.pop().is_none() {
            return Err(PlanError::Empty);
        }
        Ok(())
    }

    fn replace_formula(&mut self, formula: SharedFormula, index: usize) -> Result<(), PlanError> {
        let len = self.formulas.len();
        match self.formulas.get_mut(index) {
            Some(slot) => {
                *slot = formula;
                Ok(())
            }
            None => Err(PlanError::IndexOutOfRange { index, len }),
        }
    }

    fn apply<R: Rng>(&mut self, rng: &mut R) -> Result<(), PlanError> {
        self.apply_all(rng).map_err(PlanError::from)
    }

    fn shallow_copy(&self) -> Self {
        Self {
            formulas: self.formulas.clone(),
        }
    }

    fn deep_copy(&self) -> Self {
        Self {
            formulas: self
                .formulas
                .iter()
                .map(|formula| share(formula.borrow().clone()))
                .collect(),
        }
    }
}
