#![allow(clippy::unwrap_used)]

use chrono::Utc;

use super::*;
use crate::auth::InMemoryProvider;
use crate::config::IdentitySettings;
use crate::ledger::LedgerStore;

fn app() -> App {
    let provider = InMemoryProvider::with_demo_users(IdentitySettings::default());
    App::new(LedgerStore::seeded(Utc::now()), Box::new(provider))
}

fn run(app: &mut App, script: &str) -> String {
    let mut out = Vec::new();
    run_shell(app, script.as_bytes(), &mut out).unwrap();
    String::from_utf8(out).unwrap()
}

#[test]
fn test_session_transcript() {
    let mut app = app();
    let out = run(
        &mut app,
        "login artem@mockbank.dev password123\naccount-add Savings\ntransfer 1 2 2 000\n",
    );
    assert!(out.starts_with("MockBank\n"));
    assert!(out.contains("Hi, Artem"));
    assert!(out.contains("» Account #2 opened"));
    assert!(out.contains("» Transfer completed"));
    assert!(out.contains("#2 Savings"));
    assert!(out.ends_with("mockbank:artem@mockbank.dev> "));
    assert!(app.running);
}

#[test]
fn test_parse_errors_are_printed() {
    let mut app = app();
    let out = run(&mut app, "transfr 1 2 3\ntransfer 1\n");
    assert!(out.contains("Unknown command: transfr. Did you mean transfer?"));
    assert!(out.contains("Usage: transfer <from> <to> <amount>"));
    assert!(out.ends_with("\nmockbank> "));
}

#[test]
fn test_rejections_become_toasts() {
    let mut app = app();
    let out = run(
        &mut app,
        "login artem@mockbank.dev password123\ntransfer 1 1 100\n",
    );
    assert!(out.contains("» Choose different accounts"));
}

#[test]
fn test_help_is_printed_once() {
    let mut app = app();
    let out = run(&mut app, "help\n\n");
    assert_eq!(out.matches("Commands\n").count(), 1);
    assert!(!app.show_help);
}

#[test]
fn test_quit_stops_reading() {
    let mut app = app();
    let out = run(&mut app, "quit\nlogin artem@mockbank.dev password123\n");
    assert!(!app.running);
    assert!(!out.contains("Hi, Artem"));
}
