//! Stockpile resource ledger for the refinery.
//!
//! A [`Stockpile`] maps resource names to non-negative balances and keeps a
//! backup snapshot captured at construction time. Balances move through
//! checked single-key operations -- no silent overflow, no negative
//! quantities -- and [`Stockpile::restock`] resets the live ledger to the
//! backup wholesale.
//!
//! # Usage
//!
//! ```
//! use std::collections::BTreeMap;
//! use refinery_ledger::Stockpile;
//!
//! let mut stockpile = Stockpile::new(BTreeMap::from([
//!     (String::from("Iron Ore"), 4),
//!     (String::from("Coal"), 2),
//! ]));
//!
//! stockpile.decrease("Iron Ore", 3)?;
//! stockpile.increase("Coal", 5)?;
//! assert_eq!(stockpile.quantity("Iron Ore")?, 1);
//!
//! // Back to the construction-time snapshot.
//! stockpile.restock();
//! assert_eq!(stockpile.quantity("Iron Ore")?, 4);
//! assert_eq!(stockpile.quantity("Coal")?, 2);
//! # Ok::<(), refinery_ledger::LedgerError>(())
//! ```

pub mod stockpile;

// Re-export the primary type at crate root.
pub use stockpile::Stockpile;

// ---------------------------------------------------------------------------
// Error types
// ---------------------------------------------------------------------------

/// Errors that can occur during stockpile operations.
#[derive(Debug, thiserror::Error)]
pub enum LedgerError {
    /// The named resource is not present in the ledger.
    #[error("unknown resource: {name}")]
    UnknownResource {
        /// The name that was looked up.
        name: String,
    },

    /// A decrease asked for more than the current balance.
    #[error("insufficient quantity of {name}: wanted {requested} but only have {available}")]
    InsufficientQuantity {
        /// The resource being decreased.
        name: String,
        /// The quantity the caller asked to remove.
        requested: u32,
        /// The balance actually held.
        available: u32,
    },

    /// An add or split targeted a name that already exists in the
    /// destination ledger.
    #[error("resource already exists: {name}")]
    DuplicateResource {
        /// The conflicting name.
        name: String,
    },

    /// A balance update would overflow the quantity type.
    #[error("quantity overflow on resource: {name}")]
    QuantityOverflow {
        /// The resource whose balance overflowed.
        name: String,
    },
}
