#![allow(clippy::unwrap_used)]

use rust_decimal_macros::dec;

use super::*;
use crate::ops::tests::user_with;

#[test]
fn test_authorize() {
    let mut actor = user_with(&[]);
    assert_eq!(authorize(&actor), Err(Error::NotAdmin));
    actor.is_admin = true;
    assert_eq!(authorize(&actor), Ok(()));
}

#[test]
fn test_empty_edit_is_noop() {
    let target = user_with(&[dec!(10)]);
    let edit = AdminEdit::default();
    assert_eq!(apply(&target, &edit).unwrap(), target);
}

#[test]
fn test_freeze_and_unfreeze() {
    let target = user_with(&[dec!(10)]);
    let frozen = apply(
        &target,
        &AdminEdit {
            frozen: Some(true),
            ..Default::default()
        },
    )
    .unwrap();
    assert!(frozen.frozen);

    let thawed = apply(
        &frozen,
        &AdminEdit {
            frozen: Some(false),
            ..Default::default()
        },
    )
    .unwrap();
    assert!(!thawed.frozen);
}

#[test]
fn test_overwrites_profile_fields() {
    let target = user_with(&[dec!(10)]);
    let edit = AdminEdit {
        name: Some(" Boris ".into()),
        avatar_url: Some("https://img.example/b.png".into()),
        donation_balance: Some(42),
        ..Default::default()
    };
    let next = apply(&target, &edit).unwrap();
    assert_eq!(next.name, "Boris");
    assert_eq!(next.avatar_url, "https://img.example/b.png");
    assert_eq!(next.donation_balance, 42);
    assert_eq!(next.accounts, target.accounts);
}

#[test]
fn test_blank_name_rejected() {
    let target = user_with(&[]);
    let edit = AdminEdit {
        name: Some("".into()),
        ..Default::default()
    };
    assert_eq!(apply(&target, &edit), Err(Error::MissingField("Name")));
}

#[test]
fn test_balance_overwrite_accepts_negative() {
    let target = user_with(&[dec!(10), dec!(20)]);
    let edit = AdminEdit {
        balances: vec![(1, dec!(-500.50)), (2, dec!(0))],
        ..Default::default()
    };
    let next = apply(&target, &edit).unwrap();
    assert_eq!(next.account(1).unwrap().balance, dec!(-500.50));
    assert_eq!(next.account(2).unwrap().balance, dec!(0));
}

#[test]
fn test_unknown_account_rejects_whole_edit() {
    let target = user_with(&[dec!(10)]);
    let edit = AdminEdit {
        frozen: Some(true),
        balances: vec![(1, dec!(99)), (5, dec!(1))],
        ..Default::default()
    };
    assert_eq!(apply(&target, &edit), Err(Error::AccountNotFound(5)));
}
