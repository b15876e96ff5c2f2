#![no_std]

use soroban_sdk::contracttype;

pub mod exchange;
mod error;
mod index_types;

pub use error::Error;
pub use exchange::{ExchangeContract, ExchangeContractClient};

/// Which way a swap moved value.
#[contracttype]
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Direction {
    /// Native in, tokens out
    Buy,
    /// Tokens in, native out
    Sell,
}

/// Mirrored reserve balances backing swaps.
#[contracttype]
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct Reserves {
    pub token: i128,
    pub native: i128,
}
