//! # Calculator Module — Pluggable Vault Valuation
//!
//! A calculator answers one question: "what is this vault worth, right now,
//! in the base unit?" The ledger never computes a price itself — it holds a
//! reference to a deployed calculator and asks.
//!
//! Two variants share the [`VaultValueCalculator`] contract:
//!
//! ```text
//! standard.rs — StandardCalculator: one price-feed lookup, holder-agnostic
//! custom.rs   — CustomCalculator: delegates to a valuation router, scoped
//!               to a specific shares holder
//! ```
//!
//! The ledger does not care which variant is bound to a position. It only
//! requires that `vault_value` is read-only and referentially stable within
//! one valuation pass: same external state, same answer.

pub mod custom;
pub mod standard;

pub use custom::{CustomCalculator, ValuationRouter};
pub use standard::{PriceFeed, StandardCalculator};

use crate::address::Address;
use thiserror::Error;

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

/// Errors surfaced by a calculator query. These propagate to the caller of
/// the valuation — a failed price source is an error, never a silent zero.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CalculatorError {
    /// The underlying price feed could not produce a quote.
    #[error("price source unavailable: feed {feed} returned no quote for vault {vault}")]
    PriceSourceUnavailable {
        /// Address of the unreachable feed.
        feed: Address,
        /// The vault being valued.
        vault: Address,
    },

    /// The valuation router rejected or failed the query.
    #[error("valuation router failure: {reason}")]
    RouterFailure {
        /// Router-supplied failure description.
        reason: String,
    },

    /// Arithmetic overflow while computing a net value.
    #[error("value overflow while computing vault net value")]
    ValueOverflow,
}

// ---------------------------------------------------------------------------
// The calculator contract
// ---------------------------------------------------------------------------

/// A pluggable, read-only valuation strategy.
///
/// Implementations are owned by the caller and shared with the ledger via
/// `Arc` — the ledger stores references, it never manages calculator
/// lifetimes. Every deployed calculator carries the address it was deployed
/// at; the zero address marks an unset handle and is rejected at bind time.
pub trait VaultValueCalculator: Send + Sync {
    /// The address this calculator is deployed at. [`Address::ZERO`] means
    /// the handle was never wired up.
    fn address(&self) -> Address;

    /// Returns the vault's current net value in the base unit.
    ///
    /// Must not mutate any state observable by the ledger, and must return
    /// the same value for repeated calls at the same external state.
    fn vault_value(&self, vault: Address) -> Result<u128, CalculatorError>;
}
