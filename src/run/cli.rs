use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use std::io::{self, Write};

use crate::auth::Identity;
use crate::history::{self, HistoryFilter};
use crate::ledger::{LedgerStore, REGULAR_EMAIL};
use crate::models::{Category, UserData};
use crate::ui::util::{format_amount, format_signed, truncate};

const TREND_MONTHS: usize = 6;

pub(crate) fn as_cli(args: &[String], store: &LedgerStore) -> Result<()> {
    let stdout = io::stdout();
    run_cli(args, store, Utc::now(), &mut stdout.lock())
}

pub(crate) fn run_cli(
    args: &[String],
    store: &LedgerStore,
    now: DateTime<Utc>,
    out: &mut impl Write,
) -> Result<()> {
    let rest = args.get(2..).unwrap_or_default();
    match args.get(1).map(String::as_str).unwrap_or("help") {
        "accounts" => cli_accounts(rest, store, out),
        "history" => cli_history(rest, store, out),
        "summary" | "s" => cli_summary(rest, store, now, out),
        "users" => cli_users(store, out),
        "--help" | "-h" | "help" => print_usage(out),
        "--version" | "-V" | "version" => {
            writeln!(out, "mockbank {}", env!("CARGO_PKG_VERSION"))?;
            Ok(())
        }
        other => {
            print_usage(out)?;
            anyhow::bail!("Unknown command: {other}");
        }
    }
}

fn print_usage(out: &mut impl Write) -> Result<()> {
    writeln!(out, "MockBank - mock banking ledger")?;
    writeln!(out)?;
    writeln!(out, "Usage: mockbank [-v...] [--config <path>] [command]")?;
    writeln!(out)?;
    writeln!(out, "Commands:")?;
    writeln!(out, "  (none)                        Launch the interactive shell")?;
    writeln!(out, "  accounts                      List accounts and cards")?;
    writeln!(out, "  history                       Print transaction history")?;
    writeln!(out, "    --category <c>              Only this category")?;
    writeln!(out, "    --search <text>             Name or description contains text")?;
    writeln!(out, "    --month <YYYY-MM>           Only this month")?;
    writeln!(out, "  summary [YYYY-MM]             Monthly income, expenses and spending")?;
    writeln!(out, "  users                         List every user in the ledger")?;
    writeln!(out, "  --user <email>                User to report on (default: {REGULAR_EMAIL})")?;
    writeln!(out, "  --help, -h                    Show this help")?;
    writeln!(out, "  --version, -V                 Show version")?;
    Ok(())
}

fn flag<'a>(args: &'a [String], name: &str) -> Option<&'a str> {
    args.windows(2)
        .find(|w| w[0] == name)
        .map(|w| w[1].as_str())
}

fn resolve_user<'a>(args: &[String], store: &'a LedgerStore) -> Result<&'a UserData> {
    let email = flag(args, "--user").unwrap_or(REGULAR_EMAIL);
    store.get(&Identity::new(email)).with_context(|| {
        let known: Vec<&str> = store.identities().map(Identity::as_str).collect();
        format!("No user with e-mail {email} (known: {})", known.join(", "))
    })
}

fn check_month(month: &str) -> Result<String> {
    history::parse_month(month).with_context(|| format!("Invalid month: {month}. Use YYYY-MM"))
}

fn cli_accounts(args: &[String], store: &LedgerStore, out: &mut impl Write) -> Result<()> {
    let user = resolve_user(args, store)?;
    if user.accounts.is_empty() {
        writeln!(out, "No accounts")?;
        return Ok(());
    }

    writeln!(out, "{:<4} {:<20} {:>16}  Cards", "ID", "Name", "Balance")?;
    writeln!(out, "{}", "─".repeat(60))?;
    for acc in &user.accounts {
        let cards: Vec<String> = acc.cards.iter().map(|c| c.masked()).collect();
        writeln!(
            out,
            "{:<4} {:<20} {:>16}  {}",
            acc.id,
            truncate(&acc.name, 20),
            format_amount(acc.balance),
            cards.join(", ")
        )?;
    }
    writeln!(out, "{}", "─".repeat(60))?;
    writeln!(
        out,
        "{:<25} {:>16}",
        "Total",
        format_amount(user.total_balance())
    )?;
    Ok(())
}

fn cli_history(args: &[String], store: &LedgerStore, out: &mut impl Write) -> Result<()> {
    let user = resolve_user(args, store)?;

    let mut filter = HistoryFilter::default();
    if let Some(c) = flag(args, "--category") {
        filter.category = Some(Category::parse(c).with_context(|| {
            let names: Vec<&str> = Category::all().iter().map(|cat| cat.as_str()).collect();
            format!("Unknown category: {c} (one of {})", names.join(", "))
        })?);
    }
    if let Some(m) = flag(args, "--month") {
        filter.month = Some(check_month(m)?);
    }
    filter.search = flag(args, "--search").map(str::to_string);

    let matching = history::filter(&user.transactions, &filter);
    if matching.is_empty() {
        writeln!(out, "Nothing found")?;
        return Ok(());
    }

    for (day, txns) in history::group_by_day(&matching) {
        writeln!(out, "{}", day.format("%d.%m.%Y"))?;
        for txn in txns {
            writeln!(
                out,
                "  {:<24} {:<10} {:>16}  {}",
                truncate(&txn.name, 24),
                txn.category.as_str(),
                format_signed(txn.amount),
                txn.description
            )?;
        }
    }
    Ok(())
}

fn cli_summary(
    args: &[String],
    store: &LedgerStore,
    now: DateTime<Utc>,
    out: &mut impl Write,
) -> Result<()> {
    let month = match args.first().filter(|a| !a.starts_with('-')) {
        Some(m) => check_month(m)?,
        None => now.format("%Y-%m").to_string(),
    };

    let user = resolve_user(args, store)?;
    let (income, expenses) = history::monthly_totals(&user.transactions, &month);
    let spending = history::spending_by_category(&user.transactions, &month);

    writeln!(out, "MockBank - {} - {month}", user.email)?;
    writeln!(out, "{}", "─".repeat(40))?;
    writeln!(out, "  Income:     {}", format_amount(income))?;
    writeln!(out, "  Expenses:   {}", format_amount(expenses.abs()))?;
    writeln!(out, "  Net:        {}", format_signed(income + expenses))?;
    writeln!(out, "  Balance:    {}", format_amount(user.total_balance()))?;
    writeln!(out, "  Points:     {}", user.donation_balance)?;

    let largest = user
        .transactions
        .iter()
        .filter(|t| t.is_expense() && history::in_month(t, &month))
        .max_by_key(|t| t.abs_amount());
    if let Some(txn) = largest {
        writeln!(
            out,
            "  Largest:    {} ({})",
            format_amount(txn.abs_amount()),
            txn.name
        )?;
    }

    if !spending.is_empty() {
        writeln!(out)?;
        writeln!(out, "Spending by category:")?;
        for (category, amount) in &spending {
            writeln!(
                out,
                "  {:<12} {:>16}",
                category.as_str(),
                format_amount(amount.abs())
            )?;
        }
    }

    let trend = history::monthly_trend(&user.transactions, TREND_MONTHS);
    if trend.len() > 1 {
        writeln!(out)?;
        writeln!(out, "Trend:")?;
        for (m, inc, exp) in &trend {
            writeln!(
                out,
                "  {m}  {:>16} {:>16}",
                format_signed(*inc),
                format_signed(*exp)
            )?;
        }
    }
    Ok(())
}

fn cli_users(store: &LedgerStore, out: &mut impl Write) -> Result<()> {
    writeln!(out, "{:<28} {:<16} {:>18}  Flags", "E-mail", "Name", "Balance")?;
    writeln!(out, "{}", "─".repeat(72))?;
    for user in store.users() {
        let mut flags = Vec::new();
        if user.is_admin {
            flags.push("admin");
        }
        if user.is_premium {
            flags.push("premium");
        }
        if user.frozen {
            flags.push("frozen");
        }
        writeln!(
            out,
            "{:<28} {:<16} {:>18}  {}",
            user.email.as_str(),
            truncate(&user.name, 16),
            format_amount(user.total_balance()),
            flags.join(", ")
        )?;
    }
    Ok(())
}

#[cfg(test)]
#[path = "cli_tests.rs"]
mod tests;
