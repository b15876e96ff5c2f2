use soroban_sdk::{
    Address, BytesN, Env, Symbol, contract, contractimpl, contracttype, symbol_short,
    token::TokenClient,
};

use asset_ledger::AssetLedgerClient;
use asset_oracle::AssetOracleClient;
use compliance_registry::ComplianceRegistryClient;

use crate::index_types::{LiquiditySeeded, Swapped};
use crate::{Direction, Error, Reserves};

const ADMIN_KEY: Symbol = symbol_short!("ADMIN");
const STORAGE: Symbol = symbol_short!("STORAGE");

/// Oracle prices are the native value of one whole token, scaled by 10^7.
const PRICE_PRECISION: i128 = 10_000_000;

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ExchangeStorage {
    /// Fungible token ledger this venue trades
    asset_ledger: Address,
    /// Price feed consulted once per swap
    oracle: Address,
    /// Native settlement asset (SAC)
    native_token: Address,
    /// Oracle symbol the traded token is priced under
    priced_symbol: Symbol,
    /// Tokens held to back buys; mirrors this contract's ledger balance
    token_reserve: i128,
    /// Native held to back sells; mirrors this contract's SAC balance
    native_reserve: i128,
}

impl ExchangeStorage {
    fn get_state(env: &Env) -> ExchangeStorage {
        env.storage().instance().get(&STORAGE).unwrap()
    }

    fn set_state(env: &Env, storage: &ExchangeStorage) {
        env.storage().instance().set(&STORAGE, &storage);
    }
}

#[contract]
pub struct ExchangeContract;

#[contractimpl]
impl ExchangeContract {
    pub fn __constructor(
        env: &Env,
        admin: Address,
        asset_ledger: Address,
        oracle: Address,
        native_token: Address,
        priced_symbol: Symbol,
    ) {
        Self::set_admin(env, &admin);
        ExchangeStorage::set_state(
            env,
            &ExchangeStorage {
                asset_ledger,
                oracle,
                native_token,
                priced_symbol,
                token_reserve: 0,
                native_reserve: 0,
            },
        );
    }

    /// Fund both reserves. Admin-only.
    ///
    /// `from` must be verified and must have approved this contract on the
    /// asset ledger for at least `token_amount`.
    pub fn seed_liquidity(
        env: &Env,
        from: Address,
        token_amount: i128,
        native_amount: i128,
    ) -> Result<(), Error> {
        Self::require_admin(env);
        if token_amount < 0 || native_amount < 0 {
            return Err(Error::ValueNotPositive);
        }
        let mut state = ExchangeStorage::get_state(env);
        if !Self::verified(env, &state, &from) {
            return Err(Error::NotCompliant);
        }
        let Some(new_token_reserve) = state.token_reserve.checked_add(token_amount) else {
            return Err(Error::ArithmeticError);
        };
        let Some(new_native_reserve) = state.native_reserve.checked_add(native_amount) else {
            return Err(Error::ArithmeticError);
        };

        let this = env.current_contract_address();
        if token_amount > 0 {
            let ledger = AssetLedgerClient::new(env, &state.asset_ledger);
            let _ = ledger
                .try_transfer_from(&this, &from, &this, &token_amount)
                .map_err(|_| Error::TransferFailed)?;
        }
        if native_amount > 0 {
            let native = TokenClient::new(env, &state.native_token);
            let _ = native
                .try_transfer(&from, &this, &native_amount)
                .map_err(|_| Error::TransferFailed)?;
        }

        state.token_reserve = new_token_reserve;
        state.native_reserve = new_native_reserve;
        ExchangeStorage::set_state(env, &state);
        LiquiditySeeded {
            from,
            token_amount,
            native_amount,
        }
        .publish(env);
        Ok(())
    }

    /// Swap native currency for tokens at the current oracle price.
    ///
    /// The price is read once and used for the whole call, so a concurrent
    /// oracle update can never split one swap across two prices. Output is
    /// floored; rounding dust stays with the reserve.
    pub fn buy(
        env: &Env,
        buyer: Address,
        native_in: i128,
        min_tokens_out: i128,
    ) -> Result<i128, Error> {
        buyer.require_auth();
        if native_in <= 0 {
            return Err(Error::ValueNotPositive);
        }
        let mut state = ExchangeStorage::get_state(env);
        if !Self::verified(env, &state, &buyer) {
            return Err(Error::NotCompliant);
        }
        let price = Self::read_price(env, &state)?;
        let Some(scaled) = native_in.checked_mul(PRICE_PRECISION) else {
            return Err(Error::ArithmeticError);
        };
        let tokens_out = scaled / price;
        // Flooring a dust-sized input to zero would take the caller's native
        // and pay nothing back.
        if tokens_out == 0 {
            return Err(Error::ValueNotPositive);
        }
        if state.token_reserve < tokens_out {
            return Err(Error::InsufficientLiquidity);
        }
        if tokens_out < min_tokens_out {
            return Err(Error::SlippageExceeded);
        }

        let this = env.current_contract_address();
        let native = TokenClient::new(env, &state.native_token);
        let _ = native
            .try_transfer(&buyer, &this, &native_in)
            .map_err(|_| Error::TransferFailed)?;
        let ledger = AssetLedgerClient::new(env, &state.asset_ledger);
        let _ = ledger
            .try_transfer(&this, &buyer, &tokens_out)
            .map_err(|_| Error::TransferFailed)?;

        state.token_reserve -= tokens_out;
        state.native_reserve = state
            .native_reserve
            .checked_add(native_in)
            .ok_or(Error::ArithmeticError)?;
        ExchangeStorage::set_state(env, &state);
        Swapped {
            caller: buyer,
            direction: Direction::Buy,
            amount_in: native_in,
            amount_out: tokens_out,
            price,
            ledger: env.ledger().sequence(),
        }
        .publish(env);
        Ok(tokens_out)
    }

    /// Swap tokens for native currency at the current oracle price.
    ///
    /// The seller must have approved this contract on the asset ledger for
    /// at least `tokens_in`. Same single-read pricing and floor rounding as
    /// `buy`; there is no bid/ask spread.
    pub fn sell(
        env: &Env,
        seller: Address,
        tokens_in: i128,
        min_native_out: i128,
    ) -> Result<i128, Error> {
        seller.require_auth();
        if tokens_in <= 0 {
            return Err(Error::ValueNotPositive);
        }
        let mut state = ExchangeStorage::get_state(env);
        if !Self::verified(env, &state, &seller) {
            return Err(Error::NotCompliant);
        }
        let price = Self::read_price(env, &state)?;
        let Some(scaled) = tokens_in.checked_mul(price) else {
            return Err(Error::ArithmeticError);
        };
        let native_out = scaled / PRICE_PRECISION;
        if native_out == 0 {
            return Err(Error::ValueNotPositive);
        }
        if state.native_reserve < native_out {
            return Err(Error::InsufficientLiquidity);
        }
        if native_out < min_native_out {
            return Err(Error::SlippageExceeded);
        }

        let this = env.current_contract_address();
        let ledger = AssetLedgerClient::new(env, &state.asset_ledger);
        let _ = ledger
            .try_transfer_from(&this, &seller, &this, &tokens_in)
            .map_err(|_| Error::TransferFailed)?;
        let native = TokenClient::new(env, &state.native_token);
        let _ = native
            .try_transfer(&this, &seller, &native_out)
            .map_err(|_| Error::TransferFailed)?;

        state.native_reserve -= native_out;
        state.token_reserve = state
            .token_reserve
            .checked_add(tokens_in)
            .ok_or(Error::ArithmeticError)?;
        ExchangeStorage::set_state(env, &state);
        Swapped {
            caller: seller,
            direction: Direction::Sell,
            amount_in: tokens_in,
            amount_out: native_out,
            price,
            ledger: env.ledger().sequence(),
        }
        .publish(env);
        Ok(native_out)
    }

    /// Preview the token output of a buy at the current price.
    pub fn quote_buy(env: &Env, native_in: i128) -> Result<i128, Error> {
        if native_in <= 0 {
            return Err(Error::ValueNotPositive);
        }
        let state = ExchangeStorage::get_state(env);
        let price = Self::read_price(env, &state)?;
        let scaled = native_in
            .checked_mul(PRICE_PRECISION)
            .ok_or(Error::ArithmeticError)?;
        let tokens_out = scaled / price;
        if tokens_out == 0 {
            return Err(Error::ValueNotPositive);
        }
        Ok(tokens_out)
    }

    /// Preview the native output of a sell at the current price.
    pub fn quote_sell(env: &Env, tokens_in: i128) -> Result<i128, Error> {
        if tokens_in <= 0 {
            return Err(Error::ValueNotPositive);
        }
        let state = ExchangeStorage::get_state(env);
        let price = Self::read_price(env, &state)?;
        let scaled = tokens_in.checked_mul(price).ok_or(Error::ArithmeticError)?;
        let native_out = scaled / PRICE_PRECISION;
        if native_out == 0 {
            return Err(Error::ValueNotPositive);
        }
        Ok(native_out)
    }

    /// Current mirrored reserves.
    pub fn reserves(env: &Env) -> Reserves {
        let state = ExchangeStorage::get_state(env);
        Reserves {
            token: state.token_reserve,
            native: state.native_reserve,
        }
    }

    /// Address of the traded asset ledger.
    pub fn asset_ledger(env: &Env) -> Address {
        ExchangeStorage::get_state(env).asset_ledger.clone()
    }

    /// Address of the consulted oracle.
    pub fn oracle(env: &Env) -> Address {
        ExchangeStorage::get_state(env).oracle.clone()
    }

    /// Upgrade the contract to new wasm. Admin-only.
    pub fn upgrade(env: &Env, new_wasm_hash: BytesN<32>) {
        Self::require_admin(env);
        env.deployer().update_current_contract_wasm(new_wasm_hash);
    }

    // One oracle read per swap. A zero price cannot be divided by and a
    // negative one prices nothing sensibly, so both refuse the swap while
    // the oracle is free to store them.
    fn read_price(env: &Env, state: &ExchangeStorage) -> Result<i128, Error> {
        let oracle = AssetOracleClient::new(env, &state.oracle);
        let data = oracle
            .try_get_price(&state.priced_symbol)
            .map_err(|_| Error::PriceUnavailable)?
            .map_err(|_| Error::PriceUnavailable)?;
        if data.price <= 0 {
            return Err(Error::InvalidPrice);
        }
        Ok(data.price)
    }

    // The exchange has no compliance handle of its own; it asks the ledger
    // which registry gates the token and consults that.
    fn verified(env: &Env, state: &ExchangeStorage, account: &Address) -> bool {
        let ledger = AssetLedgerClient::new(env, &state.asset_ledger);
        let registry = ComplianceRegistryClient::new(env, &ledger.compliance());
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
