//! Ledger-aware plan application.
//!
//! Runs a plan's formulas in order against a working copy of a stockpile.
//! A formula whose inputs are all affordable is applied (its probabilistic
//! outcome engine still runs), its declared input quantities are deducted,
//! and its declared output quantities are credited. A formula whose inputs
//! are not affordable is skipped entirely -- not applied, not marked, ledger
//! untouched for it -- and the sweep continues with the next formula.
//!
//! The skip is a designed decision, not an error path. There is no
//! whole-plan transaction: each affordable formula commits independently, so
//! interleaving affordable and unaffordable formulas yields a partially
//! converted ledger by construction.

use rand::Rng;

use refinery_core::Plan;
use refinery_ledger::Stockpile;

use crate::WorkshopError;

/// Apply `plan` against `stockpile`, returning the resulting ledger.
///
/// The input stockpile is never mutated; the returned value is a new
/// snapshot. Input sufficiency is evaluated against the working copy, so
/// outputs credited by an earlier formula can fund a later one within the
/// same sweep.
///
/// Deductions and credits use the formula's declared quantities; the
/// probabilistic result only lands in the formula itself, where callers read
/// it back through the result accessor.
pub fn apply_to_stockpile<R: Rng>(
    plan: &Plan,
    stockpile: &Stockpile,
    rng: &mut R,
) -> Result<Stockpile, WorkshopError> {
    let mut working = stockpile.clone();

    for (index, handle) in plan.formulas().iter().enumerate() {
        let affordable = {
            let formula = handle.borrow();
            formula
                .input_resources()
                .iter()
                .zip(formula.input_quantities())
                .all(|(name, &required)| working.has_at_least(name, required))
        };

        if !affordable {
            tracing::debug!(formula = index, "inputs not affordable; skipping formula");
            continue;
        }

        handle.borrow_mut().apply(rng)?;

        let formula = handle.borrow();
        for (name, &required) in formula
            .input_resources()
            .iter()
            .zip(formula.input_quantities())
        {
            working.decrease(name, required)?;
        }
        for (name, &declared) in formula
            .output_resources()
            .iter()
            .zip(formula.output_quantities())
        {
            working.credit(name, declared)?;
        }
    }

    Ok(working)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::collections::BTreeMap;

    use rand::RngCore;

    use refinery_core::{Formula, SharedFormula, share};

    use super::*;

    /// An rng whose every f64 draw lands on the given value.
    struct FixedRoll(f64);

    impl RngCore for FixedRoll {
        #[allow(clippy::cast_possible_truncation)]
        fn next_u32(&mut self) -> u32 {
            (self.next_u64() >> 32) as u32
        }

        #[allow(
            clippy::cast_possible_truncation,
            clippy::cast_sign_loss,
            clippy::cast_precision_loss
        )]
        fn next_u64(&mut self) -> u64 {
            // The standard f64 distribution keeps the top 53 bits of the
            // draw, so place the scaled roll there.
            let fraction = (self.0 * (1u64 << 53) as f64) as u64;
            fraction << 11
        }

        fn fill_bytes(&mut self, dest: &mut [u8]) {
            let bytes = self.next_u64().to_le_bytes();
            for (slot, byte) in dest.iter_mut().zip(bytes.iter().cycle()) {
                *slot = *byte;
            }
        }
    }

    fn conversion(input: &str, wants: u32, output: &str, makes: u32) -> SharedFormula {
        share(
            Formula::new(
                vec![String::from(input)],
                vec![wants],
                vec![String::from(output)],
                vec![makes],
                0,
            )
            .unwrap(),
        )
    }

    fn ore_stockpile(ore: u32) -> Stockpile {
        Stockpile::new(BTreeMap::from([(String::from("Iron Ore"), ore)]))
    }

    #[test]
    fn affordable_formula_moves_declared_quantities() {
        let plan = Plan::new(vec![conversion("Iron Ore", 2, "Iron Bar", 1)]).unwrap();
        let stockpile = ore_stockpile(4);

        // 0.7 lands in the normal band, so the formula's own result matches
        // its declared outputs too.
        let after = apply_to_stockpile(&plan, &stockpile, &mut FixedRoll(0.7)).unwrap();
        assert_eq!(after.quantity("Iron Ore").unwrap(), 2);
        assert_eq!(after.quantity("Iron Bar").unwrap(), 1);
    }

    #[test]
    fn unaffordable_formula_is_skipped_and_ledger_untouched() {
        let plan = Plan::new(vec![conversion("Iron Ore", 3, "Iron Bar", 1)]).unwrap();
        let stockpile = ore_stockpile(2);

        let after = apply_to_stockpile(&plan, &stockpile, &mut FixedRoll(0.7)).unwrap();
        assert_eq!(after, stockpile);
        assert!(
            plan.formula(0)
                .is_some_and(|slot| slot.borrow().result().is_empty()),
            "the skipped formula was never applied"
        );
    }

    #[test]
    fn absent_input_name_counts_as_insufficient() {
        let plan = Plan::new(vec![conversion("Mithril", 1, "Ring", 1)]).unwrap();
        let stockpile = ore_stockpile(10);

        let after = apply_to_stockpile(&plan, &stockpile, &mut FixedRoll(0.7)).unwrap();
        assert_eq!(after, stockpile);
    }

    #[test]
    fn sweep_continues_past_a_skipped_formula() {
        let plan = Plan::new(vec![
            conversion("Mithril", 1, "Ring", 1),
            conversion("Iron Ore", 2, "Iron Bar", 1),
        ])
        .unwrap();
        let stockpile = ore_stockpile(2);

        let after = apply_to_stockpile(&plan, &stockpile, &mut FixedRoll(0.7)).unwrap();
        assert_eq!(after.quantity("Iron Ore").unwrap(), 0);
        assert_eq!(after.quantity("Iron Bar").unwrap(), 1);
        assert!(!after.contains("Ring"));
    }

    #[test]
    fn earlier_outputs_fund_later_formulas() {
        let plan = Plan::new(vec![
            conversion("Iron Ore", 2, "Iron Bar", 1),
            conversion("Iron Bar", 1, "Sword", 1),
        ])
        .unwrap();
        let stockpile = ore_stockpile(2);

        let after = apply_to_stockpile(&plan, &stockpile, &mut FixedRoll(0.7)).unwrap();
        assert_eq!(after.quantity("Iron Ore").unwrap(), 0);
        assert_eq!(after.quantity("Iron Bar").unwrap(), 0);
        assert_eq!(after.quantity("Sword").unwrap(), 1);
    }

    #[test]
    fn credits_use_declared_outputs_even_on_a_failure_band() {
        let plan = Plan::new(vec![conversion("Iron Ore", 2, "Iron Bar", 1)]).unwrap();
        let stockpile = ore_stockpile(2);

        // 0.1 lands in the failure band at level 0: the formula's own result
        // is empty, but the ledger still moves the declared quantities.
        let after = apply_to_stockpile(&plan, &stockpile, &mut FixedRoll(0.1)).unwrap();
        assert_eq!(after.quantity("Iron Bar").unwrap(), 1);
        assert!(
            plan.formula(0)
                .is_some_and(|slot| slot.borrow().result().is_empty())
        );
    }

    #[test]
    fn input_stockpile_is_never_mutated() {
        let plan = Plan::new(vec![conversion("Iron Ore", 2, "Iron Bar", 1)]).unwrap();
        let stockpile = ore_stockpile(4);

        let _after = apply_to_stockpile(&plan, &stockpile, &mut FixedRoll(0.7)).unwrap();
        assert_eq!(stockpile.quantity("Iron Ore").unwrap(), 4);
        assert!(!stockpile.contains("Iron Bar"));
    }
}
