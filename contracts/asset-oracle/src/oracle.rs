use soroban_sdk::{Address, BytesN, Env, Symbol, contract, contractimpl, contracttype, symbol_short};

use crate::PriceData;
use crate::error::Error;
use crate::index_types::PriceUpdated;

const ADMIN_KEY: Symbol = symbol_short!("ADMIN");

// Persistent storage keys
#[contracttype]
pub enum DataKey {
    /// Mapping of symbols to their latest price record
    Price(Symbol),
}

#[contract]
pub struct AssetOracle;

#[contractimpl]
impl AssetOracle {
    pub fn __constructor(env: &Env, admin: Address) {
        Self::set_admin(env, &admin);
    }

    /// Record a new price for a symbol. Admin-only.
    ///
    /// Overwrites the stored price unconditionally; there is no bounds check
    /// against the prior value. The oracle is a trusted single writer and
    /// consumers accept any price it publishes. The per-symbol version
    /// counter is bumped on every write.
    pub fn update_price(env: &Env, symbol: Symbol, price: i128) -> Result<(), Error> {
        Self::require_admin(env);
        if price < 0 {
            return Err(Error::ValueNotPositive);
        }
        let version = match Self::read_price(env, &symbol) {
            Some(prior) => prior.version + 1,
            None => 1,
        };
        let data = PriceData { price, version };
        env.storage()
            .persistent()
            .set(&DataKey::Price(symbol.clone()), &data);
        let ttl = env.storage().max_ttl();
        env.storage()
            .persistent()
            .extend_ttl(&DataKey::Price(symbol.clone()), ttl, ttl);
        PriceUpdated {
            symbol,
            price,
            version,
        }
        .publish(env);
        Ok(())
    }

    /// Latest price record for a symbol.
    ///
    /// Fails for a symbol that was never set; there is no implicit zero
    /// default, so a missing feed can never be mistaken for a free asset.
    pub fn get_price(env: &Env, symbol: Symbol) -> Result<PriceData, Error> {
        Self::read_price(env, &symbol).ok_or(Error::UnknownSymbol)
    }

    /// Whether a price has ever been recorded for a symbol.
    pub fn has_price(env: &Env, symbol: Symbol) -> bool {
        Self::read_price(env, &symbol).is_some()
    }

    /// Upgrade the contract to new wasm. Admin-only.
    pub fn upgrade(env: &Env, new_wasm_hash: BytesN<32>) {
        Self::require_admin(env);
        env.deployer().update_current_contract_wasm(new_wasm_hash);
    }

    fn read_price(env: &Env, symbol: &Symbol) -> Option<PriceData> {
        env.storage().persistent().get(&DataKey::Price(symbol.clone()))
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
