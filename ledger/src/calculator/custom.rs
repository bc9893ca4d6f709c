//! # Custom Calculator
//!
//! The holder-scoped variant. Instead of a raw feed quote, it asks an
//! external valuation router for the net value (assets minus liabilities,
//! or the holder's proportional share) that a specific shares holder has in
//! a vault. The holder is fixed at construction — exactly how the on-chain
//! custom calculators are deployed with `(router, sharesHolder)`.

use super::{CalculatorError, VaultValueCalculator};
use crate::address::Address;
use std::sync::Arc;

/// An external valuation router queried by [`CustomCalculator`].
///
/// The router is a black box: given a vault and a shares holder it returns
/// an integer net value in the base unit, or fails. Denomination (a
/// specific asset, or USD) is the router deployment's concern, not the
/// ledger's.
pub trait ValuationRouter: Send + Sync {
    /// The router's deployment address, for diagnostics.
    fn address(&self) -> Address;

    /// Net value of `holder`'s position in `vault`, in the base unit.
    fn net_value_for_holder(
        &self,
        vault: Address,
        holder: Address,
    ) -> Result<u128, CalculatorError>;
}

/// Holder-scoped calculator delegating to a valuation router.
#[derive(Clone)]
pub struct CustomCalculator {
    address: Address,
    router: Arc<dyn ValuationRouter>,
    holder: Address,
}

impl CustomCalculator {
    /// Wires a deployed calculator address to its router and the shares
    /// holder it values on behalf of.
    pub fn new(address: Address, router: Arc<dyn ValuationRouter>, holder: Address) -> Self {
        Self {
            address,
            router,
            holder,
        }
    }

    /// The shares holder this calculator is scoped to.
    pub fn holder(&self) -> Address {
        self.holder
    }

    /// The router this calculator delegates to.
    pub fn router_address(&self) -> Address {
        self.router.address()
    }
}

impl VaultValueCalculator for CustomCalculator {
    fn address(&self) -> Address {
        self.address
    }

    fn vault_value(&self, vault: Address) -> Result<u128, CalculatorError> {
        self.router.net_value_for_holder(vault, self.holder)
    }
}

impl std::fmt::Debug for CustomCalculator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CustomCalculator")
            .field("address", &self.address)
            .field("router", &self.router.address())
            .field("holder", &self.holder)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Router fixture: values every (vault, holder) pair as
    /// `base + last byte of holder`, so tests can see the holder flow through.
    struct EchoRouter {
        address: Address,
        base: u128,
    }

    impl ValuationRouter for EchoRouter {
        fn address(&self) -> Address {
            self.address
        }

        fn net_value_for_holder(
            &self,
            _vault: Address,
            holder: Address,
        ) -> Result<u128, CalculatorError> {
            Ok(self.base + holder.as_bytes()[19] as u128)
        }
    }

    struct FailingRouter {
        address: Address,
    }

    impl ValuationRouter for FailingRouter {
        fn address(&self) -> Address {
            self.address
        }

        fn net_value_for_holder(
            &self,
            _vault: Address,
            _holder: Address,
        ) -> Result<u128, CalculatorError> {
            Err(CalculatorError::RouterFailure {
                reason: "shares totalSupply is zero".into(),
            })
        }
    }

    fn addr(byte: u8) -> Address {
        Address::from_bytes([byte; 20])
    }

    #[test]
    fn holder_context_reaches_the_router() {
        let router = Arc::new(EchoRouter {
            address: addr(0xaa),
            base: 1_000,
        });
        let calc = CustomCalculator::new(addr(0x02), router, addr(0x07));

        assert_eq!(calc.vault_value(addr(0x10)).unwrap(), 1_007);
        assert_eq!(calc.holder(), addr(0x07));
    }

    #[test]
    fn router_failure_propagates() {
        let router = Arc::new(FailingRouter { address: addr(0xaa) });
        let calc = CustomCalculator::new(addr(0x02), router, addr(0x07));

        let result = calc.vault_value(addr(0x10));
        assert!(matches!(result, Err(CalculatorError::RouterFailure { .. })));
    }

    #[test]
    fn two_calculators_can_share_one_router() {
        // The original deployment wires both the UNI and LINK positions to
        // the same custom calculator instance — sharing must be cheap.
        let router: Arc<dyn ValuationRouter> = Arc::new(EchoRouter {
            address: addr(0xaa),
            base: 500,
        });
        let a = CustomCalculator::new(addr(0x02), Arc::clone(&router), addr(0x01));
        let b = CustomCalculator::new(addr(0x03), router, addr(0x02));

        assert_eq!(a.vault_value(addr(0x10)).unwrap(), 501);
        assert_eq!(b.vault_value(addr(0x10)).unwrap(), 502);
    }
}
