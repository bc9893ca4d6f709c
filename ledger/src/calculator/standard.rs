//! # Standard Calculator
//!
//! The simple variant: one external price feed, no holder context. The
//! reserve's exposure to the vault is valued at whatever the feed quotes,
//! regardless of who holds the shares. This mirrors the on-chain standard
//! calculators that wrap a single Chainlink-style aggregator.

use super::{CalculatorError, VaultValueCalculator};
use crate::address::Address;
use std::sync::Arc;

/// An external price source queried by [`StandardCalculator`].
///
/// Implementations wrap whatever actually produces quotes — an RPC client
/// against a deployed aggregator, a cached oracle snapshot, or an in-memory
/// fixture in tests. A feed that cannot quote a vault returns
/// [`CalculatorError::PriceSourceUnavailable`], never a fabricated zero.
pub trait PriceFeed: Send + Sync {
    /// The feed's deployment address, for diagnostics.
    fn address(&self) -> Address;

    /// Latest quoted value for the vault, in the base unit.
    fn latest_value(&self, vault: Address) -> Result<u128, CalculatorError>;
}

/// Holder-agnostic calculator backed by a single price feed.
#[derive(Clone)]
pub struct StandardCalculator {
    address: Address,
    feed: Arc<dyn PriceFeed>,
}

impl StandardCalculator {
    /// Wires a deployed calculator address to its price feed.
    pub fn new(address: Address, feed: Arc<dyn PriceFeed>) -> Self {
        Self { address, feed }
    }

    /// The feed this calculator reads from.
    pub fn feed_address(&self) -> Address {
        self.feed.address()
    }
}

impl VaultValueCalculator for StandardCalculator {
    fn address(&self) -> Address {
        self.address
    }

    fn vault_value(&self, vault: Address) -> Result<u128, CalculatorError> {
        self.feed.latest_value(vault)
    }
}

impl std::fmt::Debug for StandardCalculator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StandardCalculator")
            .field("address", &self.address)
            .field("feed", &self.feed.address())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    /// In-memory feed fixture: a static table of vault quotes.
    struct TableFeed {
        address: Address,
        quotes: HashMap<Address, u128>,
    }

    impl PriceFeed for TableFeed {
        fn address(&self) -> Address {
            self.address
        }

        fn latest_value(&self, vault: Address) -> Result<u128, CalculatorError> {
            self.quotes.get(&vault).copied().ok_or(
                CalculatorError::PriceSourceUnavailable {
                    feed: self.address,
                    vault,
                },
            )
        }
    }

    fn addr(byte: u8) -> Address {
        Address::from_bytes([byte; 20])
    }

    #[test]
    fn quotes_come_straight_from_the_feed() {
        let vault = addr(0x10);
        let feed = Arc::new(TableFeed {
            address: addr(0xfe),
            quotes: HashMap::from([(vault, 1_250u128)]),
        });
        let calc = StandardCalculator::new(addr(0x01), feed);

        assert_eq!(calc.vault_value(vault).unwrap(), 1_250);
        assert_eq!(calc.address(), addr(0x01));
        assert_eq!(calc.feed_address(), addr(0xfe));
    }

    #[test]
    fn missing_quote_propagates_as_unavailable() {
        let feed = Arc::new(TableFeed {
            address: addr(0xfe),
            quotes: HashMap::new(),
        });
        let calc = StandardCalculator::new(addr(0x01), feed);

        let result = calc.vault_value(addr(0x10));
        assert!(matches!(
            result,
            Err(CalculatorError::PriceSourceUnavailable { .. })
        ));
    }

    #[test]
    fn repeated_calls_are_stable() {
        let vault = addr(0x10);
        let feed = Arc::new(TableFeed {
            address: addr(0xfe),
            quotes: HashMap::from([(vault, 999u128)]),
        });
        let calc = StandardCalculator::new(addr(0x01), feed);

        assert_eq!(calc.vault_value(vault).unwrap(), calc.vault_value(vault).unwrap());
    }
}
