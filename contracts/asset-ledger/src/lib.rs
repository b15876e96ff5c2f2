#![no_std]

pub mod token;
mod error;
mod index_types;
mod storage;

pub use error::Error;
pub use token::{AssetLedger, AssetLedgerClient};

mod test;
