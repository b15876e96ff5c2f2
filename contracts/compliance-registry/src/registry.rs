use soroban_sdk::{Address, BytesN, Env, Symbol, contract, contractimpl, contracttype, symbol_short};

use crate::ComplianceStatus;
use crate::index_types::ComplianceChanged;

const ADMIN_KEY: Symbol = symbol_short!("ADMIN");

// Persistent storage keys
#[contracttype]
pub enum DataKey {
    /// Mapping of account addresses to their compliance flags
    Status(Address),
}

#[contract]
pub struct ComplianceRegistry;

#[contractimpl]
impl ComplianceRegistry {
    pub fn __constructor(env: &Env, admin: Address) {
        Self::set_admin(env, &admin);
    }

    /// Set or clear the whitelist flag for an account. Admin-only.
    ///
    /// Takes effect on the next operation that consults the registry;
    /// there is no staged or time-boxed verification.
    pub fn set_whitelisted(env: &Env, account: Address, flag: bool) {
        Self::require_admin(env);
        let mut status = Self::status(env, account.clone());
        status.whitelisted = flag;
        Self::set_status(env, &account, status);
    }

    /// Set or clear the blacklist flag for an account. Admin-only.
    pub fn set_blacklisted(env: &Env, account: Address, flag: bool) {
        Self::require_admin(env);
        let mut status = Self::status(env, account.clone());
        status.blacklisted = flag;
        Self::set_status(env, &account, status);
    }

    /// Whether an account may take part in gated transfers.
    ///
    /// The blacklist is a hard override: an account that carries both flags
    /// is not verified.
    pub fn is_verified(env: &Env, account: Address) -> bool {
        let status = Self::status(env, account);
        status.whitelisted && !status.blacklisted
    }

    /// Raw compliance flags for an account.
    pub fn status(env: &Env, account: Address) -> ComplianceStatus {
        env.storage()
            .persistent()
            .get(&DataKey::Status(account))
            .unwrap_or_default()
    }

    /// Upgrade the contract to new wasm. Admin-only.
    pub fn upgrade(env: &Env, new_wasm_hash: BytesN<32>) {
        Self::require_admin(env);
        env.deployer().update_current_contract_wasm(new_wasm_hash);
    }

    fn set_status(env: &Env, account: &Address, status: ComplianceStatus) {
        env.storage()
            .persistent()
            .set(&DataKey::Status(account.clone()), &status);
        let ttl = env.storage().max_ttl();
        env.storage()
            .persistent()
            .extend_ttl(&DataKey::Status(account.clone()), ttl, ttl);
        ComplianceChanged {
            account: account.clone(),
            whitelisted: status.whitelisted,
            blacklisted: status.blacklisted,
        }
        .publish(env);
    }

    /// Get the admin address
    fn admin(env: &Env) -> Option<Address> {
        env.storage().instance().get(&ADMIN_KEY)
    }

    /// Set the admin address. Can only be called once.
    fn set_admin(env: &Env, admin: &Address) {
        if env.storage().instance().has(&ADMIN_KEY) {
            panic!("admin already set");
        }
        env.storage().instance().set(&ADMIN_KEY, admin);
    }

    fn require_admin(env: &Env) {
        let admin = Self::admin(env).expect("admin not set");
        admin.require_auth();
    }
}
