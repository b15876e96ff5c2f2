#![no_std]

use soroban_sdk::contracttype;

pub mod oracle;
mod error;
mod index_types;

pub use error::Error;
pub use oracle::{AssetOracle, AssetOracleClient};

/// Price record for one symbol
#[contracttype]
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct PriceData {
    /// Native-currency value of one whole token, scaled by 10^7
    pub price: i128,
    /// Bumped by one on every write to this symbol
    pub version: u64,
}

mod test;
