//! Read-only queries over a user's transaction history.
//!
//! Histories are stored newest first, and every function here keeps that order.

use std::collections::BTreeMap;
use std::sync::LazyLock;

use chrono::NaiveDate;
use regex::Regex;
use rust_decimal::Decimal;

use crate::models::{Category, Transaction};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub(crate) struct HistoryFilter {
    pub category: Option<Category>,
    /// Case-insensitive substring of the name or the description.
    pub search: Option<String>,
    /// Format: "YYYY-MM"
    pub month: Option<String>,
}

impl HistoryFilter {
    pub(crate) fn is_empty(&self) -> bool {
        self.category.is_none() && self.search.is_none() && self.month.is_none()
    }

    pub(crate) fn matches(&self, txn: &Transaction) -> bool {
        if self.category.is_some_and(|c| c != txn.category) {
            return false;
        }
        if let Some(month) = &self.month {
            if !in_month(txn, month) {
                return false;
            }
        }
        if let Some(needle) = &self.search {
            let needle = needle.to_lowercase();
            let hit = txn.name.to_lowercase().contains(&needle)
                || txn.description.to_lowercase().contains(&needle);
            if !hit {
                return false;
            }
        }
        true
    }
}

static MONTH_RE: LazyLock<Option<Regex>> =
    LazyLock::new(|| Regex::new(r"^[0-9]{4}-(0[1-9]|1[0-2])$").ok());

/// Accept exactly "YYYY-MM" with a two-digit month.
pub(crate) fn parse_month(s: &str) -> Option<String> {
    let s = s.trim();
    MONTH_RE
        .as_ref()
        .is_some_and(|re| re.is_match(s))
        .then(|| s.to_string())
}

/// "YYYY-MM" of the transaction date (UTC).
pub(crate) fn month_of(txn: &Transaction) -> String {
    txn.date.format("%Y-%m").to_string()
}

pub(crate) fn in_month(txn: &Transaction, month: &str) -> bool {
    month_of(txn) == month
}

pub(crate) fn filter<'a>(txns: &'a [Transaction], f: &HistoryFilter) -> Vec<&'a Transaction> {
    txns.iter().filter(|t| f.matches(t)).collect()
}

/// Group by calendar day (UTC), newest day first.
pub(crate) fn group_by_day<'a>(
    txns: &[&'a Transaction],
) -> Vec<(NaiveDate, Vec<&'a Transaction>)> {
    let mut groups: Vec<(NaiveDate, Vec<&'a Transaction>)> = Vec::new();
    for &txn in txns {
        let day = txn.date.date_naive();
        match groups.iter_mut().find(|(d, _)| *d == day) {
            Some((_, items)) => items.push(txn),
            None => groups.push((day, vec![txn])),
        }
    }
    groups.sort_by(|a, b| b.0.cmp(&a.0));
    groups
}

// ── Analytics ─────────────────────────────────────────────────

/// `(income, expenses)` for the month; expenses are a negative sum.
pub(crate) fn monthly_totals(txns: &[Transaction], month: &str) -> (Decimal, Decimal) {
    txns.iter()
        .filter(|t| in_month(t, month))
        .fold((Decimal::ZERO, Decimal::ZERO), |(inc, exp), t| {
            if t.is_income() {
                (inc + t.amount, exp)
            } else {
                (inc, exp + t.amount)
            }
        })
}

/// Negative sums per category for the month, largest spend first.
pub(crate) fn spending_by_category(txns: &[Transaction], month: &str) -> Vec<(Category, Decimal)> {
    let mut sums: BTreeMap<Category, Decimal> = BTreeMap::new();
    for t in txns.iter().filter(|t| in_month(t, month)) {
        if t.is_expense() {
            *sums.entry(t.category).or_default() += t.amount;
        }
    }
    let mut result: Vec<_> = sums.into_iter().collect();
    result.sort_by(|a, b| a.1.cmp(&b.1));
    result
}

/// `(month, income, expenses)` for the most recent `months` months that have
/// activity, oldest first.
pub(crate) fn monthly_trend(
    txns: &[Transaction],
    months: usize,
) -> Vec<(String, Decimal, Decimal)> {
    let mut by_month: BTreeMap<String, (Decimal, Decimal)> = BTreeMap::new();
    for t in txns {
        let entry = by_month.entry(month_of(t)).or_default();
        if t.is_income() {
            entry.0 += t.amount;
        } else {
            entry.1 += t.amount;
        }
    }
    let skip = by_month.len().saturating_sub(months);
    by_month
        .into_iter()
        .skip(skip)
        .map(|(m, (inc, exp))| (m, inc, exp))
        .collect()
}
