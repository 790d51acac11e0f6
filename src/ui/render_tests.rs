#![allow(clippy::unwrap_used)]

use chrono::Utc;

use super::action::{Action, FilterChange};
use super::app::{App, Tab, Toast};
use super::render::*;
use crate::auth::{Credential, Identity, InMemoryProvider};
use crate::config::IdentitySettings;
use crate::ledger::{LedgerStore, ADMIN_EMAIL, REGULAR_EMAIL};
use crate::models::Category;

fn signed_in(email: &str, password: &str) -> App {
    let provider = InMemoryProvider::with_demo_users(IdentitySettings::default());
    let mut app = App::new(LedgerStore::seeded(Utc::now()), Box::new(provider));
    app.dispatch(Action::SignIn(Credential::new(email, password)))
        .unwrap();
    app
}

#[test]
fn test_login_screen() {
    let provider = InMemoryProvider::with_demo_users(IdentitySettings::default());
    let mut app = App::new(LedgerStore::new(), Box::new(provider));
    assert!(render(&app).contains("login <email> <password>"));

    app.dispatch(Action::SignIn(Credential::new("", "")))
        .unwrap();
    assert!(render(&app).contains("! Enter e-mail and password"));
}

#[test]
fn test_main_tab_shows_accounts() {
    let app = signed_in(REGULAR_EMAIL, "password123");
    let out = render(&app);
    assert!(out.starts_with("[Main] | Payments | City | Chat | More\n"));
    assert!(out.contains("Hi, Artem"));
    assert!(out.contains("10 000 ₽"));
    assert!(out.contains("•••• 5074"));
    assert!(out.contains("-1 240,50 ₽"));
    assert!(out.contains("Cashback: 45% of the monthly goal (#FFDD2D 30%, #21A038 15%)"));
}

#[test]
fn test_more_tab_lists_cashback_partners() {
    let mut app = signed_in(REGULAR_EMAIL, "password123");
    app.dispatch(Action::Navigate(Tab::More)).unwrap();
    let out = render(&app);
    assert!(out.contains("[More]"));
    assert!(out.contains("Plan:    Standard"));
    assert!(out.contains("Cashback partners"));
    assert!(out.contains("https://logos.mockbank.dev/ozon.svg"));

    let mut admin = signed_in(ADMIN_EMAIL, "admin123");
    admin.dispatch(Action::Navigate(Tab::More)).unwrap();
    assert!(!render(&admin).contains("Cashback partners"));
}

#[test]
fn test_admin_sees_admin_tab() {
    let mut app = signed_in(ADMIN_EMAIL, "admin123");
    assert!(render(&app).contains("| Admin"));

    app.dispatch(Action::Navigate(Tab::Admin)).unwrap();
    app.dispatch(Action::AdminSelect(Identity::new(REGULAR_EMAIL)))
        .unwrap();
    let out = render(&app);
    assert!(out.contains("[Admin]"));
    assert!(out.contains(" * artem@mockbank.dev"));
    assert!(out.contains("Editing artem@mockbank.dev"));
}

#[test]
fn test_payments_tab_shows_receipt_and_filtered_history() {
    let mut app = signed_in(REGULAR_EMAIL, "password123");
    app.dispatch(Action::Navigate(Tab::Payments)).unwrap();
    app.dispatch(Action::AddAccount("Savings".into())).unwrap();
    app.dispatch(Action::Transfer {
        from: 1,
        to: 2,
        amount: "2000".into(),
    })
    .unwrap();
    app.dispatch(Action::FilterHistory(FilterChange::Category(Some(
        Category::Transfer,
    ))))
    .unwrap();

    let out = render(&app);
    assert!(out.starts_with("Main | [Payments]"));
    assert!(out.contains("Transfer completed"));
    assert!(out.contains("10 000 ₽ → 8 000 ₽"));
    assert!(out.contains("filter: category=transfer"));
    assert!(out.contains("Transfer between accounts"));
    assert!(!out.contains("Perekrestok"));
}

#[test]
fn test_frozen_screen() {
    let mut app = signed_in(ADMIN_EMAIL, "admin123");
    app.dispatch(Action::AdminSelect(Identity::new(ADMIN_EMAIL)))
        .unwrap();
    app.dispatch(Action::AdminEdit(crate::ops::admin::AdminEdit {
        frozen: Some(true),
        ..Default::default()
    }))
    .unwrap();
    let out = render(&app);
    assert!(out.starts_with("Account frozen"));
    assert!(out.contains("Admin, your account has been frozen"));
}

#[test]
fn test_toasts_and_help() {
    let toasts = vec![
        Toast {
            id: 1,
            message: "Transfer completed".into(),
        },
        Toast {
            id: 2,
            message: "Invalid amount".into(),
        },
    ];
    assert_eq!(
        render_toasts(&toasts),
        "» Transfer completed\n» Invalid amount\n"
    );

    let help = render_help();
    assert!(help.contains("transfer <from> <to> <amount>"));
    assert!(help.contains("pay-phone <from> <bank> <amount> <phone>"));
}
