//! # Setup Configuration
//!
//! The deployment addresses CORAL needs to wire itself up: the ledger
//! owner, the shares holder, the two valuation routers, and one entry per
//! asset (token, price feed, vault). Read once from JSON at setup and
//! immutable thereafter — the ledger never re-reads configuration at
//! runtime.

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::address::Address;

/// Decimal precision of the base unit. 18 decimals, wei-scale — the
/// convention every value in the ledger is denominated in. For display
/// only; the ledger never divides by it.
pub const VALUE_DECIMALS: u8 = 18;

/// One priced asset: its token, the feed that quotes it, and the vault
/// holding the exposure.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AssetConfig {
    /// Ticker symbol, e.g. `"UNI"`. For logs and demo output.
    pub symbol: String,
    /// The underlying token contract.
    pub token: Address,
    /// The price feed quoting this asset's vault.
    pub price_feed: Address,
    /// The vault holding the position.
    pub vault: Address,
    /// Demo quote in the base unit, used by the CLI's in-memory feeds.
    /// Live deployments read quotes from the feed address instead.
    #[serde(default)]
    pub demo_quote: u128,
}

/// Full setup wiring, deserialized once from a JSON file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SetupConfig {
    /// The address authorized to mutate the ledger.
    pub owner: Address,
    /// The shares holder that custom calculators are scoped to.
    pub shares_holder: Address,
    /// Router valuing vault shares in the underlying asset.
    pub token_value_router: Address,
    /// Router valuing vault shares in USD.
    pub currency_value_router: Address,
    /// Priced assets, one entry per vault.
    pub assets: Vec<AssetConfig>,
}

impl SetupConfig {
    /// Parses a config from a JSON string.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Reads and parses a config file.
    pub fn load(path: &Path) -> std::io::Result<Self> {
        let raw = std::fs::read_to_string(path)?;
        Self::from_json(&raw).map_err(std::io::Error::other)
    }

    /// Finds an asset entry by symbol, case-sensitively.
    pub fn asset(&self, symbol: &str) -> Option<&AssetConfig> {
        self.assets.iter().find(|a| a.symbol == symbol)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"{
        "owner": "0x0a0a0a0a0a0a0a0a0a0a0a0a0a0a0a0a0a0a0a0a",
        "shares_holder": "0x0707070707070707070707070707070707070707",
        "token_value_router": "0x1111111111111111111111111111111111111111",
        "currency_value_router": "0x2222222222222222222222222222222222222222",
        "assets": [
            {
                "symbol": "UNI",
                "token": "0x3333333333333333333333333333333333333333",
                "price_feed": "0x4444444444444444444444444444444444444444",
                "vault": "0x5555555555555555555555555555555555555555",
                "demo_quote": 1000000000000000000
            },
            {
                "symbol": "LINK",
                "token": "0x6666666666666666666666666666666666666666",
                "price_feed": "0x7777777777777777777777777777777777777777",
                "vault": "0x8888888888888888888888888888888888888888"
            }
        ]
    }"#;

    #[test]
    fn sample_config_parses() {
        let config = SetupConfig::from_json(SAMPLE).unwrap();
        assert_eq!(config.assets.len(), 2);
        assert_eq!(
            config.owner,
            "0x0a0a0a0a0a0a0a0a0a0a0a0a0a0a0a0a0a0a0a0a".parse().unwrap()
        );
    }

    #[test]
    fn asset_lookup_by_symbol() {
        let config = SetupConfig::from_json(SAMPLE).unwrap();
        let uni = config.asset("UNI").unwrap();
        assert_eq!(uni.demo_quote, 1_000_000_000_000_000_000);
        assert!(config.asset("uni").is_none());
        assert!(config.asset("WETH").is_none());
    }

    #[test]
    fn demo_quote_defaults_to_zero() {
        let config = SetupConfig::from_json(SAMPLE).unwrap();
        assert_eq!(config.asset("LINK").unwrap().demo_quote, 0);
    }

    #[test]
    fn config_roundtrips_through_json() {
        let config = SetupConfig::from_json(SAMPLE).unwrap();
        let json = serde_json::to_string(&config).unwrap();
        let restored = SetupConfig::from_json(&json).unwrap();
        assert_eq!(restored.assets.len(), config.assets.len());
        assert_eq!(restored.shares_holder, config.shares_holder);
    }
}
