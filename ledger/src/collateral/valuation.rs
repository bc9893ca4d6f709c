//! # Valuation — Weighted Aggregation
//!
//! Turns a reserve's position list into one number. Each position's
//! calculator is queried in binding order, the weight is applied with a
//! single truncating division, and the contributions are summed with
//! checked arithmetic. Order is stable so the per-position rounding is
//! deterministic and reproducible across passes.

use super::vaults::VaultPosition;
use super::CollateralError;

/// A position's contribution to its reserve: calculator query, then weight.
///
/// A calculator failure propagates as [`CollateralError::Calculation`] —
/// an unreachable price source must never masquerade as a zero-valued
/// position.
pub fn weighted_value(position: &VaultPosition) -> Result<u128, CollateralError> {
    let raw = position.calculator.vault_value(position.vault)?;
    position.weight.apply(raw)
}

/// Sums weighted contributions across positions in list order.
///
/// An empty list aggregates to exactly 0 — zero is a valid resting value
/// for a reserve with nothing bound, not an error.
pub fn aggregate(positions: &[VaultPosition]) -> Result<u128, CollateralError> {
    let mut total: u128 = 0;
    for position in positions {
        let contribution = weighted_value(position)?;
        total = total
            .checked_add(contribution)
            .ok_or(CollateralError::ValueOverflow)?;
    }
    Ok(total)
}
