//! # Vault Positions & the Vault Book
//!
//! A [`VaultPosition`] binds one external vault to one calculator and one
//! exact rational [`Weight`]. The [`VaultBook`] physically stores positions
//! per reserve in insertion order and maintains the one cross-reserve shared
//! structure in the whole ledger: the reverse `vault -> reserve` lookup that
//! prevents double-binding.
//!
//! Positional indices are list semantics — removal shifts later positions
//! down by one, so callers must not cache indices across mutations.

use std::collections::HashMap;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use super::CollateralError;
use crate::address::{Address, ReserveId};
use crate::calculator::VaultValueCalculator;

// ---------------------------------------------------------------------------
// Weight
// ---------------------------------------------------------------------------

/// An exact rational scaling factor applied to a vault's raw value.
///
/// Stored as `(numerator, denominator)` and never pre-divided: the single
/// truncating division happens in [`Weight::apply`], once per position per
/// valuation, which matches the rounding of integer-only EVM arithmetic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Weight {
    numerator: u64,
    denominator: u64,
}

impl Weight {
    /// Builds a weight, rejecting a zero denominator up front rather than
    /// letting a later valuation divide by zero.
    pub fn new(numerator: u64, denominator: u64) -> Result<Self, CollateralError> {
        if denominator == 0 {
            return Err(CollateralError::InvalidWeight {
                numerator,
                denominator,
            });
        }
        Ok(Self {
            numerator,
            denominator,
        })
    }

    /// The 1/1 identity weight.
    pub const ONE: Weight = Weight {
        numerator: 1,
        denominator: 1,
    };

    /// Returns the numerator.
    pub fn numerator(&self) -> u64 {
        self.numerator
    }

    /// Returns the denominator. Never zero.
    pub fn denominator(&self) -> u64 {
        self.denominator
    }

    /// Scales `value` by the weight: multiply, then truncating-divide.
    ///
    /// The multiply is checked; with wei-scale values and large numerators
    /// a u128 can genuinely overflow, and wrapping arithmetic and money do
    /// not mix.
    pub fn apply(&self, value: u128) -> Result<u128, CollateralError> {
        let scaled = value
            .checked_mul(self.numerator as u128)
            .ok_or(CollateralError::ValueOverflow)?;
        Ok(scaled / self.denominator as u128)
    }
}

// ---------------------------------------------------------------------------
// VaultPosition
// ---------------------------------------------------------------------------

/// A binding of one external vault to one calculator and one weight within
/// a reserve.
///
/// The calculator is shared, not owned — its lifetime is the caller's
/// problem. Cloning a position clones an `Arc`, nothing more.
#[derive(Clone)]
pub struct VaultPosition {
    /// The external vault being valued.
    pub vault: Address,
    /// The valuation strategy bound to this position.
    pub calculator: Arc<dyn VaultValueCalculator>,
    /// Exact rational share of the vault's value contributed to the reserve.
    pub weight: Weight,
}

impl std::fmt::Debug for VaultPosition {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("VaultPosition")
            .field("vault", &self.vault)
            .field("calculator", &self.calculator.address())
            .field("weight", &self.weight)
            .finish()
    }
}

// ---------------------------------------------------------------------------
// VaultBook
// ---------------------------------------------------------------------------

/// Per-reserve ordered position lists plus the global reverse lookup.
///
/// The book enforces the one-reserve-per-vault invariant; it does *not*
/// know which reserve ids are live — the manager validates the reserve
/// against the registry before calling in, which is what keeps the
/// registry, the lists, and the reverse lookup in a single consistent
/// state.
#[derive(Default)]
pub struct VaultBook {
    positions: HashMap<ReserveId, Vec<VaultPosition>>,
    owners: HashMap<Address, ReserveId>,
}

impl VaultBook {
    /// Creates an empty book.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a position to the reserve's list and records the reverse
    /// entry.
    ///
    /// Fails with [`CollateralError::VaultAlreadyBound`] if the vault is
    /// owned by any reserve — including `reserve` itself. The check runs
    /// before either structure is touched.
    pub fn bind(&mut self, reserve: ReserveId, position: VaultPosition) -> Result<(), CollateralError> {
        if let Some(&owner) = self.owners.get(&position.vault) {
            return Err(CollateralError::VaultAlreadyBound {
                vault: position.vault,
                reserve: owner,
            });
        }

        self.owners.insert(position.vault, reserve);
        self.positions.entry(reserve).or_default().push(position);
        Ok(())
    }

    /// Removes the position at `index` from the reserve's list, shifting
    /// later positions down, and clears the vault's reverse entry.
    ///
    /// Returns the removed position. An out-of-range index fails without
    /// touching anything.
    pub fn unbind_at(
        &mut self,
        reserve: ReserveId,
        index: usize,
    ) -> Result<VaultPosition, CollateralError> {
        let list = match self.positions.get_mut(&reserve) {
            Some(list) if index < list.len() => list,
            other => {
                let len = other.map_or(0, |l| l.len());
                return Err(CollateralError::IndexOutOfRange { index, len });
            }
        };

        let position = list.remove(index);
        self.owners.remove(&position.vault);
        Ok(position)
    }

    /// Cascade for reserve deletion: drops the reserve's whole list and
    /// clears every reverse entry, freeing the vaults for rebinding.
    ///
    /// Returns the released positions. A reserve with no positions releases
    /// an empty list — that is not an error.
    pub fn release_all(&mut self, reserve: ReserveId) -> Vec<VaultPosition> {
        let released = self.positions.remove(&reserve).unwrap_or_default();
        for position in &released {
            self.owners.remove(&position.vault);
        }
        released
    }

    /// Reverse lookup: which reserve owns this vault, if any.
    pub fn owner_of(&self, vault: Address) -> Option<ReserveId> {
        self.owners.get(&vault).copied()
    }

    /// The reserve's positions in binding order. Empty for unknown reserves.
    pub fn positions(&self, reserve: ReserveId) -> &[VaultPosition] {
        self.positions.get(&reserve).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Number of positions currently bound to the reserve.
    pub fn position_count(&self, reserve: ReserveId) -> usize {
        self.positions.get(&reserve).map_or(0, Vec::len)
    }
}
