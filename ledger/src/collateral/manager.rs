//! # Collateral Manager
//!
//! The owner-gated facade over the reserve registry, the vault book, and
//! the valuation engine. This is the one mutation path in the crate: every
//! write validates the caller, then the reserve, then the operation's own
//! preconditions, and only then touches state — so the registry, the
//! position lists, and the reverse lookup always agree.
//!
//! ## Authorization model
//!
//! A single owner address is fixed at construction (the upgradeable-proxy
//! `initialize(owner)` pattern). Mutations take an explicit `caller` and
//! fail with [`CollateralError::Unauthorized`] for anyone else — distinctly
//! from business errors, so callers can tell a permission problem from a
//! bad request. Read-only queries are open to all, like Solidity views.
//!
//! ## Missing-reserve valuation policy
//!
//! `get_reserve_value` on an id with no current record fails with
//! [`CollateralError::ReserveNotFound`]. Zero is reserved for the honest
//! case: a live reserve with nothing bound. One policy, applied everywhere.

use std::sync::Arc;

use tracing::{debug, info};

use super::reserve::{Reserve, ReserveRegistry};
use super::valuation;
use super::vaults::{VaultBook, VaultPosition, Weight};
use super::CollateralError;
use crate::address::{Address, ReserveId};
use crate::calculator::VaultValueCalculator;

/// The collateral reserve ledger: create and delete reserves, bind and
/// unbind weighted vault positions, and aggregate reserve values.
pub struct CollateralManager {
    owner: Address,
    registry: ReserveRegistry,
    book: VaultBook,
}

impl CollateralManager {
    /// Initializes the ledger with its owner. All subsequent mutations
    /// must come from this address.
    pub fn new(owner: Address) -> Self {
        info!(%owner, "collateral manager initialized");
        Self {
            owner,
            registry: ReserveRegistry::new(),
            book: VaultBook::new(),
        }
    }

    /// The authorized owner address.
    pub fn owner(&self) -> Address {
        self.owner
    }

    fn authorize(&self, caller: Address) -> Result<(), CollateralError> {
        if caller != self.owner {
            return Err(CollateralError::Unauthorized { caller });
        }
        Ok(())
    }

    // -----------------------------------------------------------------------
    // Reserve lifecycle
    // -----------------------------------------------------------------------

    /// Creates a reserve and returns its freshly minted id.
    pub fn create_reserve(
        &mut self,
        caller: Address,
        name: &str,
        description: &str,
        classification: u32,
    ) -> Result<ReserveId, CollateralError> {
        self.authorize(caller)?;
        let id = self.registry.create(name, description, classification);
        info!(reserve = %id, name, classification, "reserve created");
        Ok(id)
    }

    /// Deletes a reserve and cascades: every bound vault position is
    /// released and its reverse-lookup entry cleared, so the vaults become
    /// bindable again. The id itself is dead forever.
    ///
    /// Fails with [`CollateralError::ReserveNotFound`] if the id has no
    /// current record — deleting twice fails the second time.
    pub fn delete_reserve(
        &mut self,
        caller: Address,
        id: ReserveId,
    ) -> Result<(), CollateralError> {
        self.authorize(caller)?;
        // Registry removal is the existence check; only then cascade.
        let reserve = self.registry.remove(id)?;
        let released = self.book.release_all(id);
        info!(
            reserve = %id,
            name = %reserve.name,
            released = released.len(),
            "reserve deleted"
        );
        Ok(())
    }

    /// Looks up a reserve record.
    pub fn get_reserve(&self, id: ReserveId) -> Result<&Reserve, CollateralError> {
        self.registry.get(id)
    }

    /// Number of live reserves.
    pub fn reserve_count(&self) -> usize {
        self.registry.len()
    }

    // -----------------------------------------------------------------------
    // Vault positions
    // -----------------------------------------------------------------------

    /// Binds a vault to the reserve with the given calculator and exact
    /// rational weight, appending to the reserve's position list.
    ///
    /// # Errors
    ///
    /// In precedence order: [`CollateralError::Unauthorized`] for a
    /// non-owner caller, [`CollateralError::ReserveNotFound`] for a missing
    /// reserve, [`CollateralError::InvalidCalculator`] for a zero
    /// calculator address, [`CollateralError::InvalidWeight`] for a zero
    /// denominator, and [`CollateralError::VaultAlreadyBound`] if any
    /// reserve already owns the vault. All checks run before any mutation.
    pub fn add_reserve_vault(
        &mut self,
        caller: Address,
        id: ReserveId,
        vault: Address,
        calculator: Arc<dyn VaultValueCalculator>,
        weight_numerator: u64,
        weight_denominator: u64,
    ) -> Result<(), CollateralError> {
        self.authorize(caller)?;
        self.registry.get(id)?;

        if calculator.address().is_zero() {
            return Err(CollateralError::InvalidCalculator);
        }
        let weight = Weight::new(weight_numerator, weight_denominator)?;

        self.book.bind(
            id,
            VaultPosition {
                vault,
                calculator,
                weight,
            },
        )?;
        debug!(
            reserve = %id,
            %vault,
            numerator = weight_numerator,
            denominator = weight_denominator,
            "vault bound"
        );
        Ok(())
    }

    /// Removes the position at `index` from the reserve's list. Later
    /// positions shift down by one; the vault's reverse-lookup entry is
    /// cleared in the same step.
    pub fn remove_reserve_vault(
        &mut self,
        caller: Address,
        id: ReserveId,
        index: usize,
    ) -> Result<(), CollateralError> {
        self.authorize(caller)?;
        self.registry.get(id)?;

        let removed = self.book.unbind_at(id, index)?;
        debug!(reserve = %id, vault = %removed.vault, index, "vault unbound");
        Ok(())
    }

    /// Reverse lookup: the reserve currently owning `vault`, if any.
    pub fn vault_owner(&self, vault: Address) -> Option<ReserveId> {
        self.book.owner_of(vault)
    }

    /// Number of positions bound to the reserve.
    pub fn vault_count(&self, id: ReserveId) -> Result<usize, CollateralError> {
        self.registry.get(id)?;
        Ok(self.book.position_count(id))
    }

    // -----------------------------------------------------------------------
    // Valuation
    // -----------------------------------------------------------------------

    /// Aggregates the reserve's value: each bound position's calculator is
    /// queried in binding order, weighted with one truncating division, and
    /// summed. A live reserve with no positions values to exactly 0.
    ///
    /// Calculator failures propagate as [`CollateralError::Calculation`].
    pub fn get_reserve_value(&self, id: ReserveId) -> Result<u128, CollateralError> {
        self.registry.get(id)?;
        valuation::aggregate(self.book.positions(id))
    }
}
