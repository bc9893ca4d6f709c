// Copyright (c) 2026 ALAS Technology. MIT License.
// See LICENSE for details.

//! # CORAL — Collateral Reserve Aggregation Ledger
//!
//! CORAL tracks named collateral reserves, each composed of weighted vault
//! positions priced through pluggable calculators, and produces an aggregate
//! reserve value in a wei-scale base unit. It is the off-chain mirror of an
//! on-chain collateral manager: same operations, same error surface, none of
//! the gas bill.
//!
//! ## Architecture
//!
//! The crate is split into modules that mirror the actual concerns of a
//! valuation ledger:
//!
//! - **address** — 20-byte vault/holder addresses and 32-byte reserve ids.
//! - **calculator** — the pluggable valuation seam: one trait, two variants
//!   (standard price-feed lookup, holder-scoped router delegation).
//! - **collateral** — the ledger proper: reserve registry, vault book with
//!   the global reverse lookup, weighted aggregation, and the owner-gated
//!   manager facade.
//! - **config** — setup wiring (router, feed, vault, and holder addresses),
//!   read once and immutable thereafter.
//!
//! ## Design Philosophy
//!
//! 1. All amounts are integers in the smallest denomination. No floats.
//!    Weights stay exact rationals and division truncates exactly once per
//!    position, matching fixed-point EVM arithmetic.
//! 2. Every mutation is validate-then-apply: the reserve registry, the
//!    position list, and the reverse lookup never disagree.
//! 3. If it touches money, it has tests. Plural.

pub mod address;
pub mod calculator;
pub mod collateral;
pub mod config;

pub use address::{Address, AddressParseError, ReserveId};
pub use calculator::{
    CalculatorError, CustomCalculator, PriceFeed, StandardCalculator, ValuationRouter,
    VaultValueCalculator,
};
pub use collateral::{
    CollateralError, CollateralManager, Reserve, ReserveRegistry, VaultBook, VaultPosition, Weight,
};
pub use config::SetupConfig;
