#![no_std]

use soroban_sdk::contracttype;

pub mod registry;
mod index_types;

pub use registry::{ComplianceRegistry, ComplianceRegistryClient};

/// Per-account compliance flags. An absent entry means neither flag is set.
#[contracttype]
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct ComplianceStatus {
    pub whitelisted: bool,
    pub blacklisted: bool,
}
