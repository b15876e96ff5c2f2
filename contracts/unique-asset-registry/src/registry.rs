use soroban_sdk::{
    Address, BytesN, Env, String, Symbol, contract, contractimpl, contracttype, symbol_short,
    token::TokenClient,
};

use compliance_registry::ComplianceRegistryClient;

use crate::Error;
use crate::UniqueAsset;
use crate::index_types::{Minted, Transferred};

const ADMIN_KEY: Symbol = symbol_short!("ADMIN");
const STORAGE: Symbol = symbol_short!("STORAGE");

// Persistent storage keys
#[contracttype]
pub enum DataKey {
    /// Mapping of token ids to the minted asset
    Token(u64),
    /// One-way reservation of a minted URI
    UriReserved(String),
    /// Per-token approved operator
    Approved(u64),
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct RegistryStorage {
    /// Compliance registry consulted before mints and transfers
    compliance: Address,
    /// Token used to pay for `purchase_mint` (the native SAC)
    payment_token: Address,
    /// Fixed price of a purchased mint, in payment-token units
    mint_price: i128,
    /// Id assigned to the next mint; ids are sequential starting at 1
    next_token_id: u64,
}

impl RegistryStorage {
    fn get_state(env: &Env) -> RegistryStorage {
        env.storage().instance().get(&STORAGE).unwrap()
    }

    fn set_state(env: &Env, storage: &RegistryStorage) {
        env.storage().instance().set(&STORAGE, &storage);
    }
}

#[contract]
pub struct UniqueAssetRegistry;

#[contractimpl]
impl UniqueAssetRegistry {
    pub fn __constructor(
        env: &Env,
        admin: Address,
        compliance: Address,
        payment_token: Address,
        mint_price: i128,
    ) {
        Self::set_admin(env, &admin);
        RegistryStorage::set_state(
            env,
            &RegistryStorage {
                compliance,
                payment_token,
                mint_price,
                next_token_id: 1,
            },
        );
    }

    /// Mint a collectible without payment. Admin-only.
    ///
    /// The URI uniqueness check is not bypassed, and neither is compliance:
    /// the recipient must be verified, the same as a purchasing buyer.
    pub fn admin_mint(env: &Env, to: Address, uri: String) -> Result<u64, Error> {
        Self::require_admin(env);
        if Self::is_uri_reserved(env, uri.clone()) {
            return Err(Error::UriAlreadyMinted);
        }
        if !Self::verified(env, &to) {
            return Err(Error::NotCompliant);
        }
        Self::mint_internal(env, to, uri)
    }

    /// Mint a collectible against exact payment of the fixed mint price.
    ///
    /// `payment` is pulled from the buyer through the payment token and held
    /// by this contract until the admin withdraws it.
    pub fn purchase_mint(env: &Env, buyer: Address, uri: String, payment: i128) -> Result<u64, Error> {
        buyer.require_auth();
        let state = RegistryStorage::get_state(env);
        if payment != state.mint_price {
            return Err(Error::WrongPayment);
        }
        if Self::is_uri_reserved(env, uri.clone()) {
            return Err(Error::UriAlreadyMinted);
        }
        if !Self::verified(env, &buyer) {
            return Err(Error::NotCompliant);
        }
        let payment_token = TokenClient::new(env, &state.payment_token);
        let _ = payment_token
            .try_transfer(&buyer, &env.current_contract_address(), &payment)
            .map_err(|_| Error::PaymentFailed)?;
        Self::mint_internal(env, buyer, uri)
    }

    /// Reassign ownership of a token.
    ///
    /// The spender must be the current owner or the approved address for the
    /// token, and both endpoints must be verified.
    pub fn transfer_from(
        env: &Env,
        spender: Address,
        from: Address,
        to: Address,
        token_id: u64,
    ) -> Result<(), Error> {
        spender.require_auth();
        let mut asset = Self::read_token(env, token_id).ok_or(Error::UnknownToken)?;
        if asset.owner != from {
            return Err(Error::NotOwnerOrApproved);
        }
        let approved = Self::read_approved(env, token_id);
        if spender != asset.owner && Some(spender.clone()) != approved {
            return Err(Error::NotOwnerOrApproved);
        }
        if !Self::verified(env, &from) || !Self::verified(env, &to) {
            return Err(Error::NotCompliant);
        }
        asset.owner = to.clone();
        Self::set_token(env, token_id, &asset);
        env.storage().persistent().remove(&DataKey::Approved(token_id));
        Transferred { from, to, token_id }.publish(env);
        Ok(())
    }

    /// Set the approved operator for a token. Owner-auth.
    pub fn approve(env: &Env, owner: Address, approved: Address, token_id: u64) -> Result<(), Error> {
        owner.require_auth();
        let asset = Self::read_token(env, token_id).ok_or(Error::UnknownToken)?;
        if asset.owner != owner {
            return Err(Error::NotOwnerOrApproved);
        }
        env.storage()
            .persistent()
            .set(&DataKey::Approved(token_id), &approved);
        let ttl = env.storage().max_ttl();
        env.storage()
            .persistent()
            .extend_ttl(&DataKey::Approved(token_id), ttl, ttl);
        Ok(())
    }

    /// Current owner of a token.
    pub fn owner_of(env: &Env, token_id: u64) -> Result<Address, Error> {
        Self::read_token(env, token_id)
            .map(|asset| asset.owner)
            .ok_or(Error::UnknownToken)
    }

    /// URI a token was minted under.
    pub fn token_uri(env: &Env, token_id: u64) -> Result<String, Error> {
        Self::read_token(env, token_id)
            .map(|asset| asset.uri)
            .ok_or(Error::UnknownToken)
    }

    /// Approved operator for a token, if any.
    pub fn get_approved(env: &Env, token_id: u64) -> Result<Option<Address>, Error> {
        Self::read_token(env, token_id).ok_or(Error::UnknownToken)?;
        Ok(Self::read_approved(env, token_id))
    }

    /// Whether a URI has been consumed by a mint. Reservations never clear.
    pub fn is_uri_reserved(env: &Env, uri: String) -> bool {
        env.storage()
            .persistent()
            .get(&DataKey::UriReserved(uri))
            .unwrap_or(false)
    }

    /// Fixed price of a purchased mint.
    pub fn mint_price(env: &Env) -> i128 {
        RegistryStorage::get_state(env).mint_price
    }

    /// Number of tokens minted so far.
    pub fn total_minted(env: &Env) -> u64 {
        RegistryStorage::get_state(env).next_token_id - 1
    }

    /// Pay out accumulated mint proceeds. Admin-only.
    pub fn withdraw(env: &Env, to: Address, amount: i128) -> Result<(), Error> {
        Self::require_admin(env);
        if amount < 0 {
            return Err(Error::ValueNotPositive);
        }
        let state = RegistryStorage::get_state(env);
        let payment_token = TokenClient::new(env, &state.payment_token);
        let _ = payment_token
            .try_transfer(&env.current_contract_address(), &to, &amount)
            .map_err(|_| Error::PaymentFailed)?;
        Ok(())
    }

    /// Upgrade the contract to new wasm. Admin-only.
    pub fn upgrade(env: &Env, new_wasm_hash: BytesN<32>) {
        Self::require_admin(env);
        env.deployer().update_current_contract_wasm(new_wasm_hash);
    }

    // Reserve the URI, assign the next sequential id, and record the owner
    // as one unit. Callers have already done their checks.
    fn mint_internal(env: &Env, to: Address, uri: String) -> Result<u64, Error> {
        let mut state = RegistryStorage::get_state(env);
        let token_id = state.next_token_id;
        let Some(next) = token_id.checked_add(1) else {
            return Err(Error::ArithmeticError);
        };
        let ttl = env.storage().max_ttl();
        env.storage()
            .persistent()
            .set(&DataKey::UriReserved(uri.clone()), &true);
        env.storage()
            .persistent()
            .extend_ttl(&DataKey::UriReserved(uri.clone()), ttl, ttl);
        Self::set_token(
            env,
            token_id,
            &UniqueAsset {
                owner: to.clone(),
                uri: uri.clone(),
            },
        );
        state.next_token_id = next;
        RegistryStorage::set_state(env, &state);
        Minted { to, token_id, uri }.publish(env);
        Ok(token_id)
    }

    fn read_token(env: &Env, token_id: u64) -> Option<UniqueAsset> {
        env.storage().persistent().get(&DataKey::Token(token_id))
    }

    fn set_token(env: &Env, token_id: u64, asset: &UniqueAsset) {
        env.storage()
            .persistent()
            .set(&DataKey::Token(token_id), asset);
        let ttl = env.storage().max_ttl();
        env.storage()
            .persistent()
            .extend_ttl(&DataKey::Token(token_id), ttl, ttl);
    }

    fn read_approved(env: &Env, token_id: u64) -> Option<Address> {
        env.storage().persistent().get(&DataKey::Approved(token_id))
    }

    fn verified(env: &Env, account: &Address) -> bool {
        let state = RegistryStorage::get_state(env);
        let registry = ComplianceRegistryClient::new(env, &state.compliance);
        registry.is_verified(account)
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
