//! # Reserve Records & Registry
//!
//! A [`Reserve`] is the named, classified container that vault positions
//! hang off. The [`ReserveRegistry`] owns the records and mints ids; it
//! knows nothing about positions — that's the vault book's job, and the
//! manager keeps the two in step.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use super::CollateralError;
use crate::address::ReserveId;

/// A named logical collection of vault positions whose values aggregate
/// into one denominated total.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Reserve {
    /// Unique id minted at creation. Dead forever once the reserve is
    /// deleted.
    pub id: ReserveId,
    /// Human-readable name, e.g. `"UNI-R01"`.
    pub name: String,
    /// Free-form description, e.g. `"Wrapped token UNI reserve"`.
    pub description: String,
    /// Numeric classification code. The ledger stores it, applications
    /// interpret it.
    pub classification: u32,
    /// When the reserve was created (UTC).
    pub created_at: DateTime<Utc>,
}

/// Owns reserve records and mints their ids.
///
/// The monotonic `sequence` feeds the id derivation together with fresh
/// UUID entropy, so ids are unique across the registry's whole lifetime —
/// deletion never frees an id for reuse.
#[derive(Debug, Clone, Default)]
pub struct ReserveRegistry {
    reserves: HashMap<ReserveId, Reserve>,
    sequence: u64,
}

impl ReserveRegistry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores a new reserve record and returns its freshly minted id.
    pub fn create(&mut self, name: &str, description: &str, classification: u32) -> ReserveId {
        let id = ReserveId::generate(self.sequence, name);
        self.sequence += 1;

        let reserve = Reserve {
            id,
            name: name.to_string(),
            description: description.to_string(),
            classification,
            created_at: Utc::now(),
        };
        self.reserves.insert(id, reserve);
        id
    }

    /// Looks up a reserve record.
    pub fn get(&self, id: ReserveId) -> Result<&Reserve, CollateralError> {
        self.reserves
            .get(&id)
            .ok_or(CollateralError::ReserveNotFound(id))
    }

    /// Removes a reserve record, returning it.
    ///
    /// Not idempotent: removing an id that is absent — never created, or
    /// already deleted — fails with [`CollateralError::ReserveNotFound`].
    pub fn remove(&mut self, id: ReserveId) -> Result<Reserve, CollateralError> {
        self.reserves
            .remove(&id)
            .ok_or(CollateralError::ReserveNotFound(id))
    }

    /// Returns `true` if the id has a current record.
    pub fn contains(&self, id: ReserveId) -> bool {
        self.reserves.contains_key(&id)
    }

    /// Number of live reserves.
    pub fn len(&self) -> usize {
        self.reserves.len()
    }

    /// Returns `true` when no reserves exist.
    pub fn is_empty(&self) -> bool {
        self.reserves.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn create_mints_distinct_ids() {
        let mut registry = ReserveRegistry::new();
        let a = registry.create("UNI-R01", "Wrapped token UNI reserve", 1);
        let b = registry.create("UNI-R01", "Wrapped token UNI reserve", 1);
        assert_ne!(a, b);
        assert_eq!(registry.len(), 2);
    }

    #[test]
    fn get_returns_the_stored_record() {
        let mut registry = ReserveRegistry::new();
        let id = registry.create("cxUSD-R01", "Stablecoin collateral reserve", 1);

        let reserve = registry.get(id).unwrap();
        assert_eq!(reserve.id, id);
        assert_eq!(reserve.name, "cxUSD-R01");
        assert_eq!(reserve.description, "Stablecoin collateral reserve");
        assert_eq!(reserve.classification, 1);
    }

    #[test]
    fn get_unknown_id_fails() {
        let registry = ReserveRegistry::new();
        let ghost = ReserveId::generate(99, "ghost");
        assert!(matches!(
            registry.get(ghost),
            Err(CollateralError::ReserveNotFound(_))
        ));
    }

    #[test]
    fn remove_is_not_idempotent() {
        let mut registry = ReserveRegistry::new();
        let id = registry.create("UNI-R01", "reserve", 1);

        registry.remove(id).unwrap();
        assert!(matches!(
            registry.remove(id),
            Err(CollateralError::ReserveNotFound(_))
        ));
        assert!(registry.is_empty());
    }

    #[test]
    fn ids_survive_deletion_without_reuse() {
        // Delete-then-create must never resurrect an old id.
        let mut registry = ReserveRegistry::new();
        let first = registry.create("R", "r", 0);
        registry.remove(first).unwrap();

        for _ in 0..100 {
            let next = registry.create("R", "r", 0);
            assert_ne!(first, next);
        }
    }

    #[test]
    fn reserve_serialization_roundtrip() {
        let mut registry = ReserveRegistry::new();
        let id = registry.create("UNI-R01", "Wrapped token UNI reserve", 7);
        let reserve = registry.get(id).unwrap();

        let json = serde_json::to_string(reserve).unwrap();
        let restored: Reserve = serde_json::from_str(&json).unwrap();
        assert_eq!(restored.id, id);
        assert_eq!(restored.name, "UNI-R01");
        assert_eq!(restored.classification, 7);
    }
}
