#![allow(clippy::unwrap_used)]

use chrono::{TimeZone, Utc};
use rust_decimal_macros::dec;

use super::*;

fn now() -> chrono::DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 8, 15, 12, 0, 0).unwrap()
}

fn regular() -> Identity {
    Identity::new(REGULAR_EMAIL)
}

fn admin() -> Identity {
    Identity::new(ADMIN_EMAIL)
}

// ── Seed ──────────────────────────────────────────────────────

#[test]
fn test_seed_has_regular_and_admin() {
    let store = LedgerStore::seeded(now());
    assert_eq!(store.len(), 2);
    assert!(!store.get(&regular()).unwrap().is_admin);
    assert!(store.get(&admin()).unwrap().is_admin);
}

#[test]
fn test_seed_regular_user_shape() {
    let store = LedgerStore::seeded(now());
    let user = store.get(&regular()).unwrap();
    assert_eq!(user.accounts.len(), 1);
    assert_eq!(user.accounts[0].balance, dec!(10000));
    assert!(!user.frozen);
    assert!(!user.is_premium);
    assert!(user.transactions.iter().any(|t| t.amount == dec!(-1240.50)));
    assert_eq!(user.monthly_spending.month, "2024-08");
    assert_eq!(user.cashback_partners.len(), 3);
    assert_eq!(crate::models::progress_percent(&user.cashback_progress), 45);
}

#[test]
fn test_seed_history_newest_first() {
    let store = LedgerStore::seeded(now());
    let txns = &store.get(&regular()).unwrap().transactions;
    assert!(txns.windows(2).all(|w| w[0].date >= w[1].date));
    assert!(txns.iter().all(|t| t.date < now()));
}

#[test]
fn test_identities_are_ordered() {
    let store = LedgerStore::seeded(now());
    let ids: Vec<&str> = store.identities().map(|i| i.as_str()).collect();
    assert_eq!(ids, vec![ADMIN_EMAIL, REGULAR_EMAIL]);
}

// ── get / insert ──────────────────────────────────────────────

#[test]
fn test_get_absent() {
    let store = LedgerStore::seeded(now());
    assert!(store.get(&Identity::new("ghost@mockbank.dev")).is_none());
}

#[test]
fn test_insert_new_identity() {
    let mut store = LedgerStore::new();
    let id = Identity::new("new@mockbank.dev");
    assert!(store.insert(UserData::blank(id.clone(), "2024-08".into())));
    assert!(store.contains(&id));
    assert_eq!(store.get(&id).unwrap().name, "new");
}

#[test]
fn test_insert_existing_identity_is_ignored() {
    let mut store = LedgerStore::seeded(now());
    let mut impostor = UserData::blank(regular(), "2024-08".into());
    impostor.name = "Impostor".into();
    assert!(!store.insert(impostor));
    assert_eq!(store.get(&regular()).unwrap().name, "Artem");
}

// ── replace ───────────────────────────────────────────────────

#[test]
fn test_replace_returns_stored_result() {
    let mut store = LedgerStore::seeded(now());
    let updated = store
        .replace(&regular(), |mut u| {
            u.donation_balance = 99;
            u
        })
        .unwrap();
    assert_eq!(updated.donation_balance, 99);
    assert_eq!(store.get(&regular()).unwrap().donation_balance, 99);
}

#[test]
fn test_replace_unknown_identity() {
    let mut store = LedgerStore::new();
    let err = store.replace(&regular(), |u| u).unwrap_err();
    assert_eq!(err, StoreError::UnknownIdentity(regular()));
}

// ── try_replace ───────────────────────────────────────────────

fn rename_to(name: &str) -> impl FnOnce(&UserData) -> Result<(UserData, ()), StoreError> + '_ {
    move |u| {
        let mut next = u.clone();
        next.name = name.to_string();
        Ok((next, ()))
    }
}

#[test]
fn test_try_replace_stores_result() {
    let mut store = LedgerStore::seeded(now());
    let rename = rename_to("Artem P.");
    store.try_replace(&regular(), rename).unwrap();
    assert_eq!(store.get(&regular()).unwrap().name, "Artem P.");
}

#[test]
fn test_try_replace_unknown_identity() {
    let mut store = LedgerStore::seeded(now());
    let ghost = Identity::new("ghost@mockbank.dev");
    let err = store.try_replace(&ghost, rename_to("Ghost")).unwrap_err();
    assert_eq!(err, StoreError::UnknownIdentity(ghost));
}

#[test]
fn test_try_replace_leaves_other_users_alone() {
    let mut store = LedgerStore::seeded(now());
    let admin_before = store.get(&admin()).unwrap().clone();
    store.try_replace(&regular(), rename_to("Someone")).unwrap();
    assert_eq!(store.get(&admin()).unwrap(), &admin_before);
}

#[test]
fn test_try_replace_returns_output() {
    let mut store = LedgerStore::seeded(now());
    let total = store
        .try_replace(&regular(), |u| {
            let mut next = u.clone();
            next.donation_balance += 1;
            Ok::<_, StoreError>((next, u.total_balance()))
        })
        .unwrap();
    assert_eq!(total, dec!(10000));
    assert_eq!(store.get(&regular()).unwrap().donation_balance, 4);
}

#[derive(Debug, PartialEq)]
enum TestError {
    Rejected,
    Store(StoreError),
}

impl From<StoreError> for TestError {
    fn from(e: StoreError) -> Self {
        Self::Store(e)
    }
}

#[test]
fn test_try_replace_error_leaves_state() {
    let mut store = LedgerStore::seeded(now());
    let before = store.get(&regular()).unwrap().clone();
    let result: Result<(), TestError> = store.try_replace(&regular(), |_| Err(TestError::Rejected));
    assert_eq!(result.unwrap_err(), TestError::Rejected);
    assert_eq!(store.get(&regular()).unwrap(), &before);
}

#[test]
fn test_try_replace_unknown_identity_converts_error() {
    let mut store = LedgerStore::new();
    let result: Result<(), TestError> =
        store.try_replace(&regular(), |u| Ok((u.clone(), ())));
    assert!(matches!(result, Err(TestError::Store(StoreError::UnknownIdentity(_)))));
}
