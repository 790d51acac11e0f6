#![allow(clippy::unwrap_used)]

use rust_decimal_macros::dec;

use super::util::*;

// ── format_amount ─────────────────────────────────────────────

#[test]
fn test_format_whole_rubles() {
    assert_eq!(format_amount(dec!(10000)), "10 000 ₽");
    assert_eq!(format_amount(dec!(0)), "0 ₽");
    assert_eq!(format_amount(dec!(999)), "999 ₽");
}

#[test]
fn test_format_with_kopecks() {
    assert_eq!(format_amount(dec!(1240.5)), "1 240,50 ₽");
    assert_eq!(format_amount(dec!(0.01)), "0,01 ₽");
}

#[test]
fn test_format_negative() {
    assert_eq!(format_amount(dec!(-1240.50)), "-1 240,50 ₽");
    assert_eq!(format_amount(dec!(-2000)), "-2 000 ₽");
}

#[test]
fn test_format_large() {
    assert_eq!(format_amount(dec!(1000000)), "1 000 000 ₽");
    assert_eq!(format_amount(dec!(1234567.89)), "1 234 567,89 ₽");
}

#[test]
fn test_format_trailing_zero_scale() {
    assert_eq!(format_amount(dec!(8000.00)), "8 000 ₽");
}

#[test]
fn test_format_signed() {
    assert_eq!(format_signed(dec!(85000)), "+85 000 ₽");
    assert_eq!(format_signed(dec!(-349)), "-349 ₽");
    assert_eq!(format_signed(dec!(0)), "0 ₽");
}

// ── truncate ──────────────────────────────────────────────────

#[test]
fn test_truncate_short_string() {
    assert_eq!(truncate("hello", 10), "hello");
}

#[test]
fn test_truncate_exact_length() {
    assert_eq!(truncate("hello", 5), "hello");
}

#[test]
fn test_truncate_long_string() {
    assert_eq!(truncate("Transfer between accounts", 9), "Transfer…");
}

#[test]
fn test_truncate_zero_max() {
    assert_eq!(truncate("hello", 0), "");
}

#[test]
fn test_truncate_cyrillic() {
    assert_eq!(truncate("Зарплатная", 5), "Зарп…");
}
