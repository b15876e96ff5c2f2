#![cfg(test)]
extern crate std;

use crate::Error;
use crate::token::{AssetLedger, AssetLedgerClient};
use compliance_registry::{ComplianceRegistry, ComplianceRegistryClient};

use soroban_sdk::{
    Address, Env, IntoVal, String, symbol_short,
    testutils::{Address as _, Events},
    vec,
};

const UNIT: i128 = 10_000_000; // one whole token in 7-decimal units

struct Setup<'a> {
    admin: Address,
    compliance: ComplianceRegistryClient<'a>,
    ledger: AssetLedgerClient<'a>,
}

fn setup(e: &Env) -> Setup<'_> {
    let admin = Address::generate(e);

    let compliance_id = e.register(ComplianceRegistry, (admin.clone(),));
    let compliance = ComplianceRegistryClient::new(e, &compliance_id);

    let ledger_id = e.register(
        AssetLedger,
        (
            admin.clone(),
            compliance_id,
            String::from_str(e, "Gold"),
            String::from_str(e, "GLD"),
            7u32,
        ),
    );
    let ledger = AssetLedgerClient::new(e, &ledger_id);

    compliance.set_whitelisted(&admin, &true);

    Setup {
        admin,
        compliance,
        ledger,
    }
}

fn verified_holder(e: &Env, s: &Setup, amount: i128) -> Address {
    let holder = Address::generate(e);
    s.compliance.set_whitelisted(&holder, &true);
    if amount > 0 {
        s.ledger.mint(&holder, &amount);
    }
    holder
}

#[test]
fn test_metadata() {
    let e = Env::default();
    e.mock_all_auths();
    let s = setup(&e);

    assert_eq!(s.ledger.name(), String::from_str(&e, "Gold"));
    assert_eq!(s.ledger.symbol(), String::from_str(&e, "GLD"));
    assert_eq!(s.ledger.decimals(), 7);
    assert_eq!(s.ledger.total_supply(), 0);
}

#[test]
fn test_mint_tracks_supply() {
    let e = Env::default();
    e.mock_all_auths();
    let s = setup(&e);

    s.ledger.mint(&s.admin, &(100_000 * UNIT));
    assert_eq!(s.ledger.balance(&s.admin), 100_000 * UNIT);
    assert_eq!(s.ledger.total_supply(), 100_000 * UNIT);

    verified_holder(&e, &s, 5 * UNIT);
    assert_eq!(s.ledger.total_supply(), 100_000 * UNIT + 5 * UNIT);
}

#[test]
fn test_mint_requires_verified_recipient() {
    let e = Env::default();
    e.mock_all_auths();
    let s = setup(&e);
    let outsider = Address::generate(&e);

    let result = s.ledger.try_mint(&outsider, &UNIT);
    assert_eq!(result.unwrap_err().unwrap(), Error::NotCompliant.into());
    assert_eq!(s.ledger.total_supply(), 0);
}

#[test]
fn test_transfer_conserves_supply() {
    let e = Env::default();
    e.mock_all_auths();
    let s = setup(&e);
    let alice = verified_holder(&e, &s, 1_000 * UNIT);
    let bob = verified_holder(&e, &s, 0);

    s.ledger.transfer(&alice, &bob, &(300 * UNIT));

    assert_eq!(s.ledger.balance(&alice), 700 * UNIT);
    assert_eq!(s.ledger.balance(&bob), 300 * UNIT);
    assert_eq!(s.ledger.total_supply(), 1_000 * UNIT);
}

#[test]
fn test_mint_and_transfer_publish_events() {
    let e = Env::default();
    e.mock_all_auths();
    let s = setup(&e);
    let alice = verified_holder(&e, &s, 10 * UNIT);

    // The last invocation above is the mint itself.
    assert_eq!(
        e.events().all(),
        vec![
            &e,
            (
                s.ledger.address.clone(),
                (symbol_short!("minted"), alice.clone()).into_val(&e),
                (10 * UNIT).into_val(&e)
            ),
        ]
    );

    let bob = verified_holder(&e, &s, 0);
    s.ledger.transfer(&alice, &bob, &(3 * UNIT));
    assert_eq!(
        e.events().all(),
        vec![
            &e,
            (
                s.ledger.address.clone(),
                (symbol_short!("transfer"), alice.clone(), bob.clone()).into_val(&e),
                (3 * UNIT).into_val(&e)
            ),
        ]
    );
}

#[test]
fn test_transfer_requires_both_parties_verified() {
    let e = Env::default();
    e.mock_all_auths();
    let s = setup(&e);
    let alice = verified_holder(&e, &s, 100 * UNIT);
    let outsider = Address::generate(&e);

    // Unverified recipient.
    let result = s.ledger.try_transfer(&alice, &outsider, &UNIT);
    assert_eq!(result.unwrap_err().unwrap(), Error::NotCompliant.into());

    // After whitelisting, the identical call succeeds.
    s.compliance.set_whitelisted(&outsider, &true);
    s.ledger.transfer(&alice, &outsider, &UNIT);
    assert_eq!(s.ledger.balance(&outsider), UNIT);

    // A blacklisted sender is blocked even while still whitelisted.
    s.compliance.set_blacklisted(&outsider, &true);
    let result = s.ledger.try_transfer(&outsider, &alice, &UNIT);
    assert_eq!(result.unwrap_err().unwrap(), Error::NotCompliant.into());
}

#[test]
fn test_transfer_insufficient_balance() {
    let e = Env::default();
    e.mock_all_auths();
    let s = setup(&e);
    let alice = verified_holder(&e, &s, 10 * UNIT);
    let bob = verified_holder(&e, &s, 0);

    let result = s.ledger.try_transfer(&alice, &bob, &(11 * UNIT));
    assert_eq!(
        result.unwrap_err().unwrap(),
        Error::InsufficientBalance.into()
    );
    // No partial debit.
    assert_eq!(s.ledger.balance(&alice), 10 * UNIT);
    assert_eq!(s.ledger.balance(&bob), 0);
}

#[test]
fn test_allowance_is_consumed_not_additive() {
    let e = Env::default();
    e.mock_all_auths();
    let s = setup(&e);
    let owner = verified_holder(&e, &s, 100 * UNIT);
    let recipient = verified_holder(&e, &s, 0);
    let spender = Address::generate(&e);

    s.ledger.approve(&owner, &spender, &(50 * UNIT), &(e.ledger().sequence() + 1000));
    assert_eq!(s.ledger.allowance(&owner, &spender), 50 * UNIT);

    // Approve overwrites; it does not add.
    s.ledger.approve(&owner, &spender, &(40 * UNIT), &(e.ledger().sequence() + 1000));
    assert_eq!(s.ledger.allowance(&owner, &spender), 40 * UNIT);

    s.ledger
        .transfer_from(&spender, &owner, &recipient, &(30 * UNIT));
    assert_eq!(s.ledger.allowance(&owner, &spender), 10 * UNIT);
    assert_eq!(s.ledger.balance(&recipient), 30 * UNIT);

    // The remaining 10 cannot cover 11.
    let result = s
        .ledger
        .try_transfer_from(&spender, &owner, &recipient, &(11 * UNIT));
    assert_eq!(
        result.unwrap_err().unwrap(),
        Error::InsufficientAllowance.into()
    );
}

#[test]
fn test_transfer_from_checks_compliance() {
    let e = Env::default();
    e.mock_all_auths();
    let s = setup(&e);
    let owner = verified_holder(&e, &s, 100 * UNIT);
    let spender = Address::generate(&e);
    let outsider = Address::generate(&e);

    s.ledger.approve(&owner, &spender, &(50 * UNIT), &(e.ledger().sequence() + 1000));
    let result = s
        .ledger
        .try_transfer_from(&spender, &owner, &outsider, &UNIT);
    assert_eq!(result.unwrap_err().unwrap(), Error::NotCompliant.into());
    // The failed attempt did not consume allowance.
    assert_eq!(s.ledger.allowance(&owner, &spender), 50 * UNIT);
}

#[test]
fn test_burn_reduces_supply() {
    let e = Env::default();
    e.mock_all_auths();
    let s = setup(&e);
    let holder = verified_holder(&e, &s, 100 * UNIT);

    s.ledger.burn(&holder, &(40 * UNIT));
    assert_eq!(s.ledger.balance(&holder), 60 * UNIT);
    assert_eq!(s.ledger.total_supply(), 60 * UNIT);

    let result = s.ledger.try_burn(&holder, &(61 * UNIT));
    assert_eq!(
        result.unwrap_err().unwrap(),
        Error::InsufficientBalance.into()
    );
}

#[test]
fn test_burn_from_consumes_allowance() {
    let e = Env::default();
    e.mock_all_auths();
    let s = setup(&e);
    let holder = verified_holder(&e, &s, 100 * UNIT);
    let spender = Address::generate(&e);

    s.ledger.approve(&holder, &spender, &(25 * UNIT), &(e.ledger().sequence() + 1000));
    s.ledger.burn_from(&spender, &holder, &(25 * UNIT));

    assert_eq!(s.ledger.balance(&holder), 75 * UNIT);
    assert_eq!(s.ledger.total_supply(), 75 * UNIT);
    assert_eq!(s.ledger.allowance(&holder, &spender), 0);
}
