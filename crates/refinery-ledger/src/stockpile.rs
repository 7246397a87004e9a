//! The stockpile: a resource-name-to-quantity ledger with snapshot restock.
//!
//! All balance mutations use checked arithmetic and leave the ledger
//! unchanged on failure. The backup snapshot taken at construction is never
//! touched by ledger operations; [`Stockpile::restock`] is the only reader.
//!
//! The stockpile is a plain owned value: `&mut self` makes concurrent
//! corruption unrepresentable, and callers that share one ledger across
//! threads wrap it in their own lock.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::LedgerError;

/// A mutable resource ledger with a restock-to-snapshot capability.
///
/// `Clone` yields a fully independent copy, backup included. Equality covers
/// the live ledger and the backup.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Stockpile {
    /// Live balances by resource name.
    resources: BTreeMap<String, u32>,
    /// Snapshot of the balances at construction time.
    backup: BTreeMap<String, u32>,
}

impl Stockpile {
    /// Create a stockpile from initial balances, capturing the backup
    /// snapshot.
    pub fn new(resources: BTreeMap<String, u32>) -> Self {
        Self {
            backup: resources.clone(),
            resources,
        }
    }

    /// Number of resources currently in the ledger.
    pub fn len(&self) -> usize {
        self.resources.len()
    }

    /// Whether the ledger currently holds no resources.
    pub fn is_empty(&self) -> bool {
        self.resources.is_empty()
    }

    /// The live balances, by resource name.
    pub const fn resources(&self) -> &BTreeMap<String, u32> {
        &self.resources
    }

    /// Whether the named resource is present in the ledger.
    pub fn contains(&self, name: &str) -> bool {
        self.resources.contains_key(name)
    }

    /// Current balance of the named resource.
    pub fn quantity(&self, name: &str) -> Result<u32, LedgerError> {
        self.resources
            .get(name)
            .copied()
            .ok_or_else(|| LedgerError::UnknownResource {
                name: name.to_owned(),
            })
    }

    /// Whether the ledger currently holds at least `amount` of the named
    /// resource. An absent name reads as a zero balance.
    pub fn has_at_least(&self, name: &str, amount: u32) -> bool {
        self.resources.get(name).copied().unwrap_or(0) >= amount
    }

    /// Add `amount` to the balance of an existing resource.
    ///
    /// Fails if the resource is unknown or the balance would overflow.
    pub fn increase(&mut self, name: &str, amount: u32) -> Result<(), LedgerError> {
        let current = self.quantity(name)?;
        let updated = current
            .checked_add(amount)
            .ok_or_else(|| LedgerError::QuantityOverflow {
                name: name.to_owned(),
            })?;
        self.resources.insert(name.to_owned(), updated);
        Ok(())
    }

    /// Remove `amount` from the balance of an existing resource.
    ///
    /// Fails if the resource is unknown or `amount` exceeds the balance;
    /// balances never go negative.
    pub fn decrease(&mut self, name: &str, amount: u32) -> Result<(), LedgerError> {
        let current = self.quantity(name)?;
        let updated = current
            .checked_sub(amount)
            .ok_or_else(|| LedgerError::InsufficientQuantity {
                name: name.to_owned(),
                requested: amount,
                available: current,
            })?;
        self.resources.insert(name.to_owned(), updated);
        Ok(())
    }

    /// Add a new resource with an initial balance.
    ///
    /// Fails if the name already exists.
    pub fn add(&mut self, name: &str, quantity: u32) -> Result<(), LedgerError> {
        if self.resources.contains_key(name) {
            return Err(LedgerError::DuplicateResource {
                name: name.to_owned(),
            });
        }
        self.resources.insert(name.to_owned(), quantity);
        Ok(())
    }

    /// Remove a resource and its balance entirely.
    ///
    /// Fails if the name is unknown.
    pub fn remove(&mut self, name: &str) -> Result<(), LedgerError> {
        if self.resources.remove(name).is_none() {
            return Err(LedgerError::UnknownResource {
                name: name.to_owned(),
            });
        }
        Ok(())
    }

    /// Overwrite the balance of an existing resource.
    ///
    /// Fails if the name is unknown.
    pub fn update(&mut self, name: &str, quantity: u32) -> Result<(), LedgerError> {
        if !self.resources.contains_key(name) {
            return Err(LedgerError::UnknownResource {
                name: name.to_owned(),
            });
        }
        self.resources.insert(name.to_owned(), quantity);
        Ok(())
    }

    /// Add `amount` to the named resource, creating the entry if absent.
    ///
    /// This is the crediting primitive of ledger-aware application: unlike
    /// [`increase`](Self::increase), an unknown name is not an error.
    pub fn credit(&mut self, name: &str, amount: u32) -> Result<(), LedgerError> {
        let current = self.resources.get(name).copied().unwrap_or(0);
        let updated = current
            .checked_add(amount)
            .ok_or_else(|| LedgerError::QuantityOverflow {
                name: name.to_owned(),
            })?;
        self.resources.insert(name.to_owned(), updated);
        Ok(())
    }

    /// Replace the live ledger wholesale with a fresh copy of the
    /// construction-time backup.
    ///
    /// Unconditional, never fails. Resources added or removed since
    /// construction that are not in the backup are lost.
    pub fn restock(&mut self) {
        self.resources = self.backup.clone();
        tracing::debug!(resources = self.resources.len(), "stockpile restocked");
    }

    /// Fold every balance of `other` into this ledger, creating absent keys.
    pub fn merge(&mut self, other: &Self) -> Result<(), LedgerError> {
        for (name, &quantity) in other.resources() {
            self.credit(name, quantity)?;
        }
        Ok(())
    }

    /// Move the named resources into `destination`.
    ///
    /// For each name: fails if the resource is absent here or already
    /// present in the destination. Only strictly positive balances actually
    /// move; zero balances are checked, then silently skipped in place.
    pub fn split(
        &mut self,
        destination: &mut Self,
        names: &[String],
    ) -> Result<(), LedgerError> {
        for name in names {
            let quantity = self.quantity(name)?;
            if destination.contains(name) {
                return Err(LedgerError::DuplicateResource { name: name.clone() });
            }
            if quantity > 0 {
                self.resources.remove(name);
                destination.resources.insert(name.clone(), quantity);
            }
        }
        Ok(())
    }
}
