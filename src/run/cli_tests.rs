#![allow(clippy::unwrap_used)]

use chrono::TimeZone;

use super::*;
use crate::ledger::ADMIN_EMAIL;

fn at(y: i32, m: u32, d: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(y, m, d, 12, 0, 0).unwrap()
}

fn run_at(now: DateTime<Utc>, args: &[&str]) -> Result<String> {
    let store = LedgerStore::seeded(now);
    let args: Vec<String> = std::iter::once("mockbank")
        .chain(args.iter().copied())
        .map(str::to_string)
        .collect();
    let mut out = Vec::new();
    run_cli(&args, &store, now, &mut out)?;
    Ok(String::from_utf8(out).unwrap())
}

fn run(args: &[&str]) -> Result<String> {
    run_at(at(2024, 8, 15), args)
}

#[test]
fn test_accounts_default_user() {
    let out = run(&["accounts"]).unwrap();
    assert!(out.contains("Salary"));
    assert!(out.contains("10 000 ₽"));
    assert!(out.contains("•••• 5074, •••• 4000"));
}

#[test]
fn test_accounts_for_admin() {
    let out = run(&["accounts", "--user", ADMIN_EMAIL]).unwrap();
    assert!(out.contains("Savings"));
    assert!(out.contains("1 250 000 ₽"));
}

#[test]
fn test_unknown_user_lists_known_ones() {
    let err = run(&["accounts", "--user", "ghost@mockbank.dev"]).unwrap_err();
    let msg = err.to_string();
    assert!(msg.contains("No user with e-mail ghost@mockbank.dev"));
    assert!(msg.contains("admin@mockbank.dev, artem@mockbank.dev"));
}

#[test]
fn test_history_filters() {
    let out = run(&["history", "--category", "food"]).unwrap();
    assert!(out.contains("Perekrestok"));
    assert!(out.contains("-1 240,50 ₽"));
    assert!(!out.contains("Ozon"));

    let out = run(&["history", "--search", "TROIKA"]).unwrap();
    assert!(out.contains("Moscow Metro"));
    assert!(out.contains("14.08.2024"));
    assert!(!out.contains("Perekrestok"));

    let out = run(&["history", "--month", "2023-01"]).unwrap();
    assert_eq!(out, "Nothing found\n");
}

#[test]
fn test_history_rejects_bad_filters() {
    let err = run(&["history", "--category", "travel"]).unwrap_err();
    assert!(err.to_string().contains("one of food, shopping"));
    assert!(run(&["history", "--month", "August"]).is_err());
}

#[test]
fn test_summary_current_month() {
    let out = run(&["summary"]).unwrap();
    assert!(out.starts_with("MockBank - artem@mockbank.dev - 2024-08"));
    assert!(out.contains("Income:     85 000 ₽"));
    assert!(out.contains("Expenses:   4 349,49 ₽"));
    assert!(out.contains("Net:        +80 650,51 ₽"));
    assert!(out.contains("Largest:    2 199,99 ₽ (Ozon)"));
    // Largest spend first.
    let shopping = out.find("shopping").unwrap();
    let transport = out.find("transport").unwrap();
    assert!(shopping < transport);
    assert!(!out.contains("Trend:"));
}

#[test]
fn test_summary_trend_spans_months() {
    let out = run_at(at(2024, 8, 3), &["summary", "2024-07"]).unwrap();
    assert!(out.contains("Income:     85 000 ₽"));
    assert!(out.contains("Expenses:   560 ₽"));
    assert!(out.contains("Trend:"));
    let july = out.find("  2024-07 ").unwrap();
    let august = out.find("  2024-08 ").unwrap();
    assert!(july < august);
}

#[test]
fn test_summary_rejects_bad_month() {
    assert!(run(&["summary", "13-2024"]).is_err());
    assert!(run(&["summary", "2024-8"]).is_err());
    assert!(run(&["history", "--month", "2024-1"]).is_err());
}

#[test]
fn test_users() {
    let out = run(&["users"]).unwrap();
    let admin = out.find("admin@mockbank.dev").unwrap();
    let regular = out.find("artem@mockbank.dev").unwrap();
    assert!(admin < regular);
    assert!(out.contains("admin, premium"));
}

#[test]
fn test_help_version_and_unknown() {
    assert!(run(&["help"]).unwrap().contains("Usage: mockbank"));
    assert!(run(&[]).unwrap().contains("Usage: mockbank"));
    assert!(run(&["-V"]).unwrap().starts_with("mockbank "));
    let err = run(&["frobnicate"]).unwrap_err();
    assert_eq!(err.to_string(), "Unknown command: frobnicate");
}
