// Copyright (c) 2026 ALAS Technology. MIT License.
// See LICENSE for details.

//! # CORAL Operator CLI
//!
//! Entry point for the `coral` binary. Parses CLI arguments, initializes
//! logging, and runs the scripted reserve lifecycle demo against a setup
//! configuration — the same wiring (routers, feeds, vaults, holder) a
//! live deployment reads, with in-memory price sources standing in for
//! the external quote infrastructure.

mod cli;
mod logging;

use std::collections::HashMap;
use std::sync::Arc;

use anyhow::{bail, Context, Result};
use clap::Parser;

use coral_ledger::{
    Address, CalculatorError, CollateralManager, CustomCalculator, PriceFeed, SetupConfig,
    StandardCalculator, ValuationRouter, VaultValueCalculator,
};

use cli::{Commands, CoralCli};
use logging::LogFormat;

fn main() -> Result<()> {
    let cli = CoralCli::parse();

    match cli.command {
        Commands::Demo(args) => run_demo(args),
        Commands::Version => {
            print_version();
            Ok(())
        }
    }
}

// ---------------------------------------------------------------------------
// In-memory quote infrastructure
// ---------------------------------------------------------------------------

/// Price feed backed by the config's demo quotes.
struct DemoFeed {
    address: Address,
    quotes: HashMap<Address, u128>,
}

impl PriceFeed for DemoFeed {
    fn address(&self) -> Address {
        self.address
    }

    fn latest_value(&self, vault: Address) -> Result<u128, CalculatorError> {
        self.quotes
            .get(&vault)
            .copied()
            .ok_or(CalculatorError::PriceSourceUnavailable {
                feed: self.address,
                vault,
            })
    }
}

/// Valuation router backed by the same demo quotes; holder-independent,
/// which is fine for a wiring check.
struct DemoRouter {
    address: Address,
    values: HashMap<Address, u128>,
}

impl ValuationRouter for DemoRouter {
    fn address(&self) -> Address {
        self.address
    }

    fn net_value_for_holder(
        &self,
        vault: Address,
        _holder: Address,
    ) -> Result<u128, CalculatorError> {
        self.values
            .get(&vault)
            .copied()
            .ok_or(CalculatorError::RouterFailure {
                reason: format!("no demo quote for vault {vault}"),
            })
    }
}

// ---------------------------------------------------------------------------
// Demo
// ---------------------------------------------------------------------------

/// Weights cycled across demo vaults, in binding order.
const DEMO_WEIGHTS: [(u64, u64); 3] = [(1, 1), (3, 4), (2, 3)];

fn run_demo(args: cli::DemoArgs) -> Result<()> {
    logging::init_logging(
        "coral=info,coral_ledger=debug",
        LogFormat::from_str_lossy(&args.log_format),
    );

    let config = SetupConfig::load(&args.config)
        .with_context(|| format!("failed to load setup config: {}", args.config.display()))?;
    if config.assets.is_empty() {
        bail!("setup config lists no assets — nothing to demonstrate");
    }
    tracing::info!(
        owner = %config.owner,
        assets = config.assets.len(),
        "setup config loaded"
    );

    let owner = config.owner;
    let mut manager = CollateralManager::new(owner);

    // --- Standard calculators: one feed per asset ---
    let reserve = manager.create_reserve(
        owner,
        "cxUSD-R01",
        "Stablecoin collateral reserve",
        1,
    )?;
    println!("Created reserve cxUSD-R01: {}", reserve);

    for (i, asset) in config.assets.iter().enumerate() {
        let feed = Arc::new(DemoFeed {
            address: asset.price_feed,
            quotes: HashMap::from([(asset.vault, asset.demo_quote)]),
        });
        let calculator: Arc<dyn VaultValueCalculator> =
            Arc::new(StandardCalculator::new(asset.price_feed, feed));
        let (num, den) = DEMO_WEIGHTS[i % DEMO_WEIGHTS.len()];

        manager.add_reserve_vault(owner, reserve, asset.vault, calculator, num, den)?;
        println!(
            "  bound {:>5} vault {} at weight {}/{}",
            asset.symbol, asset.vault, num, den
        );
    }

    let full_value = manager.get_reserve_value(reserve)?;
    println!("Reserve value (standard calculators): {}", full_value);

    // --- Unbind the first position, value again ---
    manager.remove_reserve_vault(owner, reserve, 0)?;
    let reduced = manager.get_reserve_value(reserve)?;
    println!("Reserve value after removing index 0: {}", reduced);

    // --- Delete, freeing every vault for the custom-calculator pass ---
    manager.delete_reserve(owner, reserve)?;
    println!("Deleted reserve {}", reserve);

    // --- Custom calculators: one shared router, holder-scoped ---
    let router: Arc<dyn ValuationRouter> = Arc::new(DemoRouter {
        address: config.currency_value_router,
        values: config
            .assets
            .iter()
            .map(|a| (a.vault, a.demo_quote))
            .collect(),
    });
    let calculator: Arc<dyn VaultValueCalculator> = Arc::new(CustomCalculator::new(
        config.currency_value_router,
        router,
        config.shares_holder,
    ));

    let custom_reserve = manager.create_reserve(
        owner,
        "cxUSD-R02",
        "Holder-scoped collateral reserve",
        2,
    )?;
    for (i, asset) in config.assets.iter().enumerate() {
        let (num, den) = DEMO_WEIGHTS[i % DEMO_WEIGHTS.len()];
        manager.add_reserve_vault(
            owner,
            custom_reserve,
            asset.vault,
            Arc::clone(&calculator),
            num,
            den,
        )?;
    }
    let custom_value = manager.get_reserve_value(custom_reserve)?;
    println!(
        "Reserve value (custom calculator, holder {}): {}",
        config.shares_holder, custom_value
    );

    manager.delete_reserve(owner, custom_reserve)?;
    println!("Demo complete.");
    Ok(())
}

/// Prints version information to stdout.
fn print_version() {
    println!("coral  {}", env!("CARGO_PKG_VERSION"));
    println!(
        "base unit decimals: {}",
        coral_ledger::config::VALUE_DECIMALS
    );
}
