#![cfg(test)]
extern crate std;

use crate::Error;
use crate::oracle::{AssetOracle, AssetOracleClient};

use soroban_sdk::{
    Address, Env, IntoVal, Symbol, Val, map, symbol_short,
    testutils::{Address as _, Events},
    vec,
};

fn create_oracle<'a>(e: &Env) -> AssetOracleClient<'a> {
    let admin = Address::generate(e);
    let contract_id = e.register(AssetOracle, (admin,));
    AssetOracleClient::new(e, &contract_id)
}

#[test]
fn test_update_and_get_price() {
    let e = Env::default();
    e.mock_all_auths();

    let oracle = create_oracle(&e);
    let gld = Symbol::new(&e, "GLD");

    oracle.update_price(&gld, &100_000);

    let data = oracle.get_price(&gld);
    assert_eq!(data.price, 100_000);
    assert_eq!(data.version, 1);
    assert!(oracle.has_price(&gld));
}

#[test]
fn test_version_increments_on_every_update() {
    let e = Env::default();
    e.mock_all_auths();

    let oracle = create_oracle(&e);
    let gld = Symbol::new(&e, "GLD");

    oracle.update_price(&gld, &100_000);
    // Overwrite is unconditional, even to a wildly different value.
    oracle.update_price(&gld, &1);
    oracle.update_price(&gld, &50_000_000_000);

    let data = oracle.get_price(&gld);
    assert_eq!(data.price, 50_000_000_000);
    assert_eq!(data.version, 3);
}

#[test]
fn test_unknown_symbol() {
    let e = Env::default();
    e.mock_all_auths();

    let oracle = create_oracle(&e);
    let unset = Symbol::new(&e, "SLV");

    assert!(!oracle.has_price(&unset));
    let result = oracle.try_get_price(&unset);
    assert_eq!(result.unwrap_err().unwrap(), Error::UnknownSymbol.into());
}

#[test]
fn test_negative_price_rejected() {
    let e = Env::default();
    e.mock_all_auths();

    let oracle = create_oracle(&e);
    let gld = Symbol::new(&e, "GLD");

    let result = oracle.try_update_price(&gld, &-1);
    assert_eq!(result.unwrap_err().unwrap(), Error::ValueNotPositive.into());
    assert!(!oracle.has_price(&gld));
}

#[test]
fn test_zero_price_is_storable() {
    let e = Env::default();
    e.mock_all_auths();

    let oracle = create_oracle(&e);
    let gld = Symbol::new(&e, "GLD");

    // Zero is a valid stored price; consumers decide whether to act on it.
    oracle.update_price(&gld, &0);
    assert_eq!(oracle.get_price(&gld).price, 0);
}

#[test]
fn test_update_publishes_event() {
    let e = Env::default();
    e.mock_all_auths();

    let oracle = create_oracle(&e);
    let gld = Symbol::new(&e, "GLD");

    oracle.update_price(&gld, &100_000);

    assert_eq!(
        e.events().all(),
        vec![
            &e,
            (
                oracle.address.clone(),
                (symbol_short!("price"), gld.clone()).into_val(&e),
                map![
                    &e,
                    (Symbol::new(&e, "price"), IntoVal::<Env, Val>::into_val(&100_000i128, &e)),
                    (Symbol::new(&e, "version"), 1u64.into_val(&e))
                ]
                .into_val(&e)
            ),
        ]
    );
}

#[test]
fn test_symbols_are_independent() {
    let e = Env::default();
    e.mock_all_auths();

    let oracle = create_oracle(&e);
    let gld = Symbol::new(&e, "GLD");
    let slv = Symbol::new(&e, "SLV");

    oracle.update_price(&gld, &100_000);
    oracle.update_price(&slv, &2_000);
    oracle.update_price(&slv, &2_100);

    assert_eq!(oracle.get_price(&gld).version, 1);
    assert_eq!(oracle.get_price(&slv).version, 2);
    assert_eq!(oracle.get_price(&gld).price, 100_000);
}
