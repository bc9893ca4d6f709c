//! # Collateral Module — Reserves, Vault Positions & Aggregation
//!
//! This is the ledger proper. If the calculator module answers "what is a
//! vault worth", this module answers "what is a *reserve* worth" — and keeps
//! the books straight while reserves and positions come and go.
//!
//! ```text
//! reserve.rs   — Reserve records and the id-minting registry
//! vaults.rs    — Weighted vault positions and the global reverse lookup
//! valuation.rs — Weighted truncating aggregation, stable list order
//! manager.rs   — Owner-gated facade tying the above together
//! ```
//!
//! ## Invariants
//!
//! 1. A vault address is bound to at most one reserve at a time, enforced
//!    by the reverse lookup in [`VaultBook`].
//! 2. The position list and the reverse lookup move together: every
//!    mutation validates first, then applies both updates. No partial state.
//! 3. Deleting a reserve cascades — every bound vault becomes bindable
//!    again, and the id is dead forever.

pub mod manager;
pub mod reserve;
pub mod valuation;
pub mod vaults;

pub use manager::CollateralManager;
pub use reserve::{Reserve, ReserveRegistry};
pub use vaults::{VaultBook, VaultPosition, Weight};

use crate::address::{Address, ReserveId};
use crate::calculator::CalculatorError;
use thiserror::Error;

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

/// Errors surfaced by collateral ledger operations.
///
/// Every error is synchronous and leaves the ledger exactly as it was —
/// no operation partially applies its effect on failure.
#[derive(Debug, Error)]
pub enum CollateralError {
    /// The operation referenced a reserve id with no current record.
    #[error("no reserve available: {0}")]
    ReserveNotFound(ReserveId),

    /// The vault is already bound to a reserve — any reserve.
    #[error("vault {vault} is already bound to reserve {reserve}")]
    VaultAlreadyBound {
        /// The vault that was double-bound.
        vault: Address,
        /// The reserve that currently owns it.
        reserve: ReserveId,
    },

    /// The calculator reference is the zero address — never deployed,
    /// or never wired up.
    #[error("invalid calculator: zero address is not a deployed calculator")]
    InvalidCalculator,

    /// The weight denominator is zero, or the components don't form a
    /// usable rational.
    #[error("invalid weight: {numerator}/{denominator}")]
    InvalidWeight {
        /// Supplied numerator.
        numerator: u64,
        /// Supplied denominator.
        denominator: u64,
    },

    /// Vault removal index past the end of the reserve's position list.
    #[error("vault index out of range: index {index}, reserve holds {len} positions")]
    IndexOutOfRange {
        /// The requested index.
        index: usize,
        /// Current number of positions.
        len: usize,
    },

    /// An underlying calculator query failed during valuation.
    #[error("calculation failure: {0}")]
    Calculation(#[from] CalculatorError),

    /// Summing weighted contributions overflowed the value type.
    #[error("value overflow while aggregating reserve value")]
    ValueOverflow,

    /// The caller is not the ledger owner.
    #[error("unauthorized: caller {caller} is not the ledger owner")]
    Unauthorized {
        /// The rejected caller.
        caller: Address,
    },
}
