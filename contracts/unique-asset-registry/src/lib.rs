#![no_std]

use soroban_sdk::{Address, String, contracttype};

pub mod registry;
mod error;
mod index_types;

pub use error::Error;
pub use registry::{UniqueAssetRegistry, UniqueAssetRegistryClient};

/// One minted collectible. The URI it was minted under stays reserved for
/// the life of the registry, whatever later happens to the token.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct UniqueAsset {
    pub owner: Address,
    pub uri: String,
}
