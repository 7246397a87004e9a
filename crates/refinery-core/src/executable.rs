//! The step-gated plan variant.
//!
//! An [`ExecutablePlan`] wraps a [`Plan`] and adds a zero-based step cursor
//! plus one completion flag per slot. Exactly one formula is applied per
//! call; the cursor advances past the end of the sequence when the last slot
//! is applied and the plan becomes terminal.
//!
//! Mutation is restricted by execution history: slots the cursor has passed
//! cannot be replaced, completed slots cannot be replaced or re-applied, and
//! an applied terminal slot cannot be removed. The completion sequence stays
//! length-synchronized with the formula sequence across every mutation.

use std::cell::RefCell;
use std::rc::Rc;

use rand::Rng;

use crate::error::{PlanError, ValidationError};
use crate::outcome::Outcome;
use crate::plan::{Plan, PlanOps, SharedFormula};

/// A plan with a step cursor and per-slot completion tracking.
///
/// Equality covers the formula sequence, the cursor, and the completion
/// flags.
#[derive(Debug, PartialEq, Eq)]
pub struct ExecutablePlan {
    /// The underlying formula sequence.
    plan: Plan,
    /// Zero-based cursor; equal to the plan length once the final slot has
    /// been applied.
    step: usize,
    /// One completion flag per slot. Shared storage so that shallow copies
    /// observe each other's progress, per the copy contract.
    completed: Rc<RefCell<Vec<bool>>>,
}

impl ExecutablePlan {
    /// Create an executable plan over `formulas` with the cursor at `step`.
    ///
    /// The starting step must address an existing slot (`0 <= step < len`),
    /// so an empty sequence is rejected the same way plain plan construction
    /// rejects it. All completion flags start false.
    pub fn new(formulas: Vec<SharedFormula>, step: usize) -> Result<Self, ValidationError> {
        let plan = Plan::new(formulas)?;
        let len = plan.len();
        if step >= len {
            return Err(ValidationError::StepOutOfRange { step, len });
        }
        Ok(Self {
            plan,
            step,
            completed: Rc::new(RefCell::new(vec![false; len])),
        })
    }

    /// The underlying plan (the formula sequence without step state).
    pub const fn as_plan(&self) -> &Plan {
        &self.plan
    }

    /// Current cursor position.
    pub const fn step(&self) -> usize {
        self.step
    }

    /// Number of formulas in the plan.
    pub const fn len(&self) -> usize {
        self.plan.len()
    }

    /// Whether the plan holds no formulas.
    pub const fn is_empty(&self) -> bool {
        self.plan.is_empty()
    }

    /// Whether the cursor is past the last slot (no current step remains).
    pub fn is_exhausted(&self) -> bool {
        self.step >= self.plan.len()
    }

    /// Snapshot of the completion flags, in slot order.
    pub fn completion_flags(&self) -> Vec<bool> {
        self.completed.borrow().clone()
    }

    /// Whether the slot at `index` has been applied.
    ///
    /// The contract checks completion by scanning the flag sequence for the
    /// slot rather than indexing it directly; out-of-range slots read as not
    /// completed.
    pub fn is_completed(&self, index: usize) -> bool {
        self.completed
            .borrow()
            .iter()
            .enumerate()
            .any(|(slot, done)| slot == index && *done)
    }

    /// Apply the formula at the current step, mark the slot completed, and
    /// advance the cursor by one.
    ///
    /// Exactly one slot advances per call; batch application is the caller's
    /// loop. Fails when the cursor is past the end or the current slot was
    /// already applied.
    pub fn apply_current_step<R: Rng>(&mut self, rng: &mut R) -> Result<Outcome, PlanError> {
        let len = self.plan.len();
        if self.step >= len {
            return Err(PlanError::Exhausted { step: self.step });
        }
        if self.is_completed(self.step) {
            return Err(PlanError::AlreadyApplied { index: self.step });
        }

        let outcome = match self.plan.formula(self.step) {
            Some(formula) => formula.borrow_mut().apply(rng)?,
            None => return Err(PlanError::IndexOutOfRange { index: self.step, len }),
        };

        if let Some(flag) = self.completed.borrow_mut().get_mut(self.step) {
            *flag = true;
        }
        self.step = self.step.saturating_add(1);
        tracing::debug!(step = self.step, ?outcome, "executable plan advanced");
        Ok(outcome)
    }
}

impl PlanOps for ExecutablePlan {
    fn add_formula(&mut self, formula: SharedFormula) {
        self.plan.add_formula(formula);
        self.completed.borrow_mut().push(false);
    }

    fn remove_last_formula(&mut self) -> Result<(), PlanError> {
        let len = self.plan.len();
        let last_completed = self.completed.borrow().last().copied().unwrap_or(false);
        if len > 0 && self.step == len && last_completed {
            return Err(PlanError::RemoveAppliedTerminal);
        }
        self.plan.remove_last_formula()?;
        self.completed.borrow_mut().pop();
        Ok(())
    }

    fn replace_formula(&mut self, formula: SharedFormula, index: usize) -> Result<(), PlanError> {
        if index < self.step {
            return Err(PlanError::BehindCursor {
                index,
                step: self.step,
            });
        }
        if self.is_completed(index) {
            return Err(PlanError::AlreadyApplied { index });
        }
        self.plan.replace_formula(formula, index)
    }

    fn apply<R: Rng>(&mut self, rng: &mut R) -> Result<(), PlanError> {
        self.apply_current_step(rng).map(|_| ())
    }

    fn shallow_copy(&self) -> Self {
        Self {
            plan: self.plan.shallow_copy(),
            step: self.step,
            completed: Rc::clone(&self.completed),
        }
    }

    fn deep_copy(&self) -> Self {
        Self {
            plan: self.plan.deep_copy(),
            step: self.step,
            completed: Rc::new(RefCell::new(self.completed.borrow().clone())),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use crate::formula::Formula;
    use crate::plan::share;
    use crate::testing::FixedRoll;

    use super::*;

    fn formula(output: &str) -> SharedFormula {
        share(
            Formula::new(
                vec![String::from("Iron Ore")],
                vec![2],
                vec![String::from(output)],
                vec![1],
                0,
            )
            .unwrap(),
        )
    }

    fn three_step_plan() -> ExecutablePlan {
        ExecutablePlan::new(
            vec![formula("Iron Bar"), formula("Steel Bar"), formula("Sword")],
            0,
        )
        .unwrap()
    }

    #[test]
    fn construction_rejects_step_past_the_end() {
        let result = ExecutablePlan::new(vec![formula("Iron Bar")], 1);
        assert!(matches!(
            result,
            Err(ValidationError::StepOutOfRange { step: 1, len: 1 })
        ));
    }

    #[test]
    fn construction_rejects_empty_sequence() {
        let result = ExecutablePlan::new(Vec::new(), 0);
        assert!(matches!(result, Err(ValidationError::EmptyPlan)));
    }

    #[test]
    fn fresh_plan_has_no_completed_slots() {
        let plan = three_step_plan();
        assert_eq!(plan.step(), 0);
        assert!(!plan.is_exhausted());
        assert_eq!(plan.completion_flags(), vec![false, false, false]);
    }

    #[test]
    fn applying_every_step_exhausts_the_plan() {
        let mut plan = three_step_plan();
        for expected_step in 1..=3 {
            assert!(plan.apply_current_step(&mut FixedRoll(0.7)).is_ok());
            assert_eq!(plan.step(), expected_step);
        }
        assert!(plan.is_exhausted());
        assert_eq!(plan.completion_flags(), vec![true, true, true]);

        let overrun = plan.apply_current_step(&mut FixedRoll(0.7));
        assert!(matches!(overrun, Err(PlanError::Exhausted { step: 3 })));
    }

    #[test]
    fn one_slot_advances_per_call() {
        let mut plan = three_step_plan();
        assert!(plan.apply_current_step(&mut FixedRoll(0.7)).is_ok());
        assert_eq!(plan.completion_flags(), vec![true, false, false]);
        assert!(
            plan.as_plan()
                .formula(1)
                .is_some_and(|slot| slot.borrow().result().is_empty()),
            "later slots stay untouched"
        );
    }

    #[test]
    fn add_formula_extends_the_completion_flags() {
        let mut plan = three_step_plan();
        plan.add_formula(formula("Shield"));
        assert_eq!(plan.len(), 4);
        assert_eq!(plan.completion_flags().len(), 4);
        assert!(!plan.is_completed(3));
    }

    #[test]
    fn remove_shrinks_the_completion_flags() {
        let mut plan = three_step_plan();
        assert!(plan.remove_last_formula().is_ok());
        assert_eq!(plan.len(), 2);
        assert_eq!(plan.completion_flags().len(), 2);
    }

    #[test]
    fn removing_an_applied_terminal_step_fails() {
        let mut plan = ExecutablePlan::new(vec![formula("Iron Bar")], 0).unwrap();
        assert!(plan.apply_current_step(&mut FixedRoll(0.7)).is_ok());
        assert!(matches!(
            plan.remove_last_formula(),
            Err(PlanError::RemoveAppliedTerminal)
        ));
    }

    #[test]
    fn removing_an_unapplied_tail_slot_is_allowed() {
        let mut plan = three_step_plan();
        assert!(plan.apply_current_step(&mut FixedRoll(0.7)).is_ok());
        // Cursor sits at slot 1; the tail slot was never applied.
        assert!(plan.remove_last_formula().is_ok());
        assert_eq!(plan.len(), 2);
    }

    #[test]
    fn replace_behind_the_cursor_fails() {
        let mut plan = three_step_plan();
        assert!(plan.apply_current_step(&mut FixedRoll(0.7)).is_ok());
        let result = plan.replace_formula(formula("Shield"), 0);
        assert!(matches!(
            result,
            Err(PlanError::BehindCursor { index: 0, step: 1 })
        ));
    }

    #[test]
    fn replace_at_the_cursor_is_allowed() {
        let mut plan = three_step_plan();
        assert!(plan.apply_current_step(&mut FixedRoll(0.7)).is_ok());
        assert!(plan.replace_formula(formula("Shield"), 1).is_ok());
    }

    #[test]
    fn replace_out_of_range_fails() {
        let mut plan = three_step_plan();
        let result = plan.replace_formula(formula("Shield"), 9);
        assert!(matches!(
            result,
            Err(PlanError::IndexOutOfRange { index: 9, len: 3 })
        ));
    }

    #[test]
    fn shallow_copy_shares_completion_progress() {
        let mut plan = three_step_plan();
        let copy = plan.shallow_copy();
        assert!(plan.apply_current_step(&mut FixedRoll(0.7)).is_ok());

        assert_eq!(
            copy.completion_flags(),
            vec![true, false, false],
            "progress in the original is visible through the shallow copy"
        );
        assert_eq!(copy.step(), 0, "the cursor itself is copied by value");
    }

    #[test]
    fn deep_copy_preserves_state_independently() {
        let mut plan = three_step_plan();
        assert!(plan.apply_current_step(&mut FixedRoll(0.7)).is_ok());
        let copy = plan.deep_copy();

        assert_eq!(copy.step(), 1);
        assert_eq!(copy.completion_flags(), vec![true, false, false]);

        assert!(plan.apply_current_step(&mut FixedRoll(0.7)).is_ok());
        assert_eq!(
            copy.completion_flags(),
            vec![true, false, false],
            "later progress in the original does not leak into the deep copy"
        );
    }
}
