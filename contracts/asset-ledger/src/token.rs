use soroban_sdk::{
    Address, BytesN, Env, MuxedAddress, String, Symbol, assert_with_error, contract, contractimpl,
    contracttype, panic_with_error, symbol_short, token::TokenInterface,
};

use compliance_registry::ComplianceRegistryClient;

use crate::Error;
use crate::index_types::{Burned, Minted, Transferred};
use crate::storage::{Allowance, Txn};

const ADMIN_KEY: Symbol = symbol_short!("ADMIN");
const STORAGE: Symbol = symbol_short!("STORAGE");

fn assert_positive(env: &Env, value: i128) {
    assert_with_error!(env, value >= 0, Error::ValueNotPositive);
}

// Persistent storage keys
#[contracttype]
pub enum DataKey {
    /// Mapping of account addresses to their token balances
    Balance(Address),
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct LedgerStorage {
    /// Name of the token
    name: String,
    /// Symbol of the token
    symbol: String,
    /// Number of decimal places for token amounts
    decimals: u32,
    /// Compliance registry consulted before every transfer
    compliance: Address,
    /// Total minted minus total burned; equals the sum of all balances
    total_supply: i128,
}

impl LedgerStorage {
    fn get_state(env: &Env) -> LedgerStorage {
        env.storage().instance().get(&STORAGE).unwrap()
    }

    fn set_state(env: &Env, storage: &LedgerStorage) {
        env.storage().instance().set(&STORAGE, &storage);
    }
}

#[contract]
pub struct AssetLedger;

#[contractimpl]
impl AssetLedger {
    pub fn __constructor(
        env: &Env,
        admin: Address,
        compliance: Address,
        name: String,
        symbol: String,
        decimals: u32,
    ) {
        Self::set_admin(env, &admin);
        LedgerStorage::set_state(
            env,
            &LedgerStorage {
                name,
                symbol,
                decimals,
                compliance,
                total_supply: 0,
            },
        );
    }

    /// Mint `amount` new tokens to `to`. Admin-only.
    ///
    /// Minting is not a compliance bypass: the recipient must already be
    /// verified, the same as for any transfer endpoint.
    pub fn mint(env: &Env, to: Address, amount: i128) -> Result<(), Error> {
        Self::require_admin(env);
        if amount < 0 {
            return Err(Error::ValueNotPositive);
        }
        if !Self::verified(env, &to) {
            return Err(Error::NotCompliant);
        }
        let mut state = LedgerStorage::get_state(env);
        let Some(new_supply) = state.total_supply.checked_add(amount) else {
            return Err(Error::ArithmeticError);
        };
        Self::credit(env, &to, amount)?;
        state.total_supply = new_supply;
        LedgerStorage::set_state(env, &state);
        Minted { to, amount }.publish(env);
        Ok(())
    }

    /// Total tokens in circulation.
    pub fn total_supply(env: &Env) -> i128 {
        LedgerStorage::get_state(env).total_supply
    }

    /// Address of the compliance registry this ledger consults.
    pub fn compliance(env: &Env) -> Address {
        LedgerStorage::get_state(env).compliance.clone()
    }

    /// Upgrade the contract to new wasm. Admin-only.
    pub fn upgrade(env: &Env, new_wasm_hash: BytesN<32>) {
        Self::require_admin(env);
        env.deployer().update_current_contract_wasm(new_wasm_hash);
    }

    fn verified(env: &Env, account: &Address) -> bool {
        let registry = ComplianceRegistryClient::new(env, &Self::compliance(env));
        registry.is_verified(account)
    }

    fn credit(env: &Env, to: &Address, amount: i128) -> Result<(), Error> {
        let balance: i128 = env
            .storage()
            .persistent()
            .get(&DataKey::Balance(to.clone()))
            .unwrap_or(0);
        let Some(new_balance) = balance.checked_add(amount) else {
            return Err(Error::ArithmeticError);
        };
        Self::set_balance(env, to, new_balance);
        Ok(())
    }

    fn set_balance(env: &Env, account: &Address, balance: i128) {
        env.storage()
            .persistent()
            .set(&DataKey::Balance(account.clone()), &balance);
        let ttl = env.storage().max_ttl();
        env.storage()
            .persistent()
            .extend_ttl(&DataKey::Balance(account.clone()), ttl, ttl);
    }

    // Debit `from` and credit `to` as one unit; all checks happen before
    // the first write.
    fn transfer_internal(env: &Env, from: Address, to: Address, amount: i128) {
        assert_with_error!(env, amount > 0, Error::ValueNotPositive);
        assert_with_error!(env, Self::verified(env, &from), Error::NotCompliant);
        assert_with_error!(env, Self::verified(env, &to), Error::NotCompliant);
        let from_balance = Self::balance(env.clone(), from.clone());
        assert_with_error!(env, from_balance >= amount, Error::InsufficientBalance);
        let to_balance = Self::balance(env.clone(), to.clone());
        let Some(new_to_balance) = to_balance.checked_add(amount) else {
            panic_with_error!(env, Error::ArithmeticError);
        };
        Self::set_balance(env, &from, from_balance - amount);
        Self::set_balance(env, &to, new_to_balance);
        Transferred { from, to, amount }.publish(env);
    }

    fn burn_internal(env: &Env, from: Address, amount: i128) {
        assert_with_error!(env, amount > 0, Error::ValueNotPositive);
        let balance = Self::balance(env.clone(), from.clone());
        assert_with_error!(env, balance >= amount, Error::InsufficientBalance);
        let mut state = LedgerStorage::get_state(env);
        let Some(new_supply) = state.total_supply.checked_sub(amount) else {
            panic_with_error!(env, Error::ArithmeticError);
        };
        Self::set_balance(env, &from, balance - amount);
        state.total_supply = new_supply;
        LedgerStorage::set_state(env, &state);
        Burned { from, amount }.publish(env);
    }

    // Consume part of an allowance that has already been checked to cover
    // `amount`; keeps the original expiry.
    fn consume_allowance(env: &Env, from: Address, spender: Address, amount: i128) {
        let key = Txn(from, spender);
        let mut allowance: Allowance = env
            .storage()
            .persistent()
            .get(&key)
            .unwrap_or_else(|| panic_with_error!(env, Error::InsufficientAllowance));
        let Some(remaining) = allowance.amount.checked_sub(amount) else {
            panic_with_error!(env, Error::ArithmeticError);
        };
        allowance.amount = remaining;
        env.storage().persistent().set(&key, &allowance);
        let max_ttl = env.storage().max_ttl();
        env.storage().persistent().extend_ttl(&key, max_ttl, max_ttl);
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

#[contractimpl]
impl TokenInterface for AssetLedger {
    /// Return the allowance for `spender` to transfer from `from`.
    fn allowance(env: Env, from: Address, spender: Address) -> i128 {
        let allowance: Option<Allowance> = env.storage().persistent().get(&Txn(from, spender));
        match allowance {
            Some(a) => {
                if env.ledger().sequence() <= a.live_until_ledger {
                    a.amount
                } else {
                    0
                }
            }
            None => 0,
        }
    }

    /// Set the allowance for `spender` to transfer from `from`.
    ///
    /// Overwrites any prior allowance; it is not additive.
    fn approve(env: Env, from: Address, spender: Address, amount: i128, live_until_ledger: u32) {
        from.require_auth();
        assert_positive(&env, amount);
        let current_ledger = env.ledger().sequence();
        assert_with_error!(
            env,
            live_until_ledger >= current_ledger,
            Error::InvalidLedgerSequence
        );
        let max_ttl = env.storage().max_ttl();
        env.storage().persistent().set(
            &Txn(from.clone(), spender.clone()),
            &Allowance {
                amount,
                live_until_ledger,
            },
        );
        env.storage()
            .persistent()
            .extend_ttl(&Txn(from, spender), max_ttl, max_ttl);
    }

    /// Return the balance of `id`
    fn balance(env: Env, id: Address) -> i128 {
        env.storage()
            .persistent()
            .get(&DataKey::Balance(id))
            .unwrap_or(0)
    }

    /// Transfer `amount` from `from` to `to`. Both parties must be verified.
    fn transfer(env: Env, from: Address, to: MuxedAddress, amount: i128) {
        from.require_auth();
        Self::transfer_internal(&env, from, to.address(), amount);
    }

    /// Transfer `amount` from `from` to `to`, consuming the allowance of `spender`
    fn transfer_from(env: Env, spender: Address, from: Address, to: Address, amount: i128) {
        spender.require_auth();
        assert_with_error!(env, amount > 0, Error::ValueNotPositive);
        let allowance = Self::allowance(env.clone(), from.clone(), spender.clone());
        assert_with_error!(env, allowance >= amount, Error::InsufficientAllowance);
        Self::transfer_internal(&env, from.clone(), to, amount);
        Self::consume_allowance(&env, from, spender, amount);
    }

    /// Burn `amount` from `from`
    fn burn(env: Env, from: Address, amount: i128) {
        from.require_auth();
        Self::burn_internal(&env, from, amount);
    }

    /// Burn `amount` from `from`, consuming the allowance of `spender`
    fn burn_from(env: Env, spender: Address, from: Address, amount: i128) {
        spender.require_auth();
        assert_with_error!(env, amount > 0, Error::ValueNotPositive);
        let allowance = Self::allowance(env.clone(), from.clone(), spender.clone());
        assert_with_error!(env, allowance >= amount, Error::InsufficientAllowance);
        Self::burn_internal(&env, from.clone(), amount);
        Self::consume_allowance(&env, from, spender, amount);
    }

    /// Return the number of decimals used to represent amounts of this token
    fn decimals(env: Env) -> u32 {
        LedgerStorage::get_state(&env).decimals
    }

    /// Return the name for this token
    fn name(env: Env) -> String {
        LedgerStorage::get_state(&env).name
    }

    /// Return the symbol for this token
    fn symbol(env: Env) -> String {
        LedgerStorage::get_state(&env).symbol
    }
}
