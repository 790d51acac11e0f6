//! Plain-text rendering of the current [`View`].

use std::fmt;

use super::action::command_list;
use super::app::{App, Tab, Toast, View};
use super::util::{format_amount, format_signed, truncate};
use crate::history::{self, HistoryFilter};
use crate::models::{progress_percent, UserData, DONATION_RATE};
use crate::ops::{Feature, TransferReceipt};

const RULE: &str = "────────────────────────────────────────";
const RECENT_ON_MAIN: usize = 5;
const NAME_WIDTH: usize = 28;

pub(crate) fn render(app: &App) -> String {
    Screen(app).to_string()
}

pub(crate) fn render_toasts(toasts: &[Toast]) -> String {
    toasts
        .iter()
        .map(|t| format!("» {}\n", t.message))
        .collect()
}

pub(crate) fn render_help() -> String {
    Help.to_string()
}

struct Screen<'a>(&'a App);

impl fmt::Display for Screen<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let app = self.0;
        match app.view() {
            View::Login { error } => render_login(f, error),
            View::Frozen { name } => render_frozen(f, name),
            View::Active { tab, user } => {
                render_tab_bar(f, tab, user.is_admin)?;
                match tab {
                    Tab::Main => render_main(f, user),
                    Tab::Payments => {
                        render_payments(f, user, app.history_filter(), app.last_receipt())
                    }
                    Tab::City => render_city(f),
                    Tab::Chat => render_chat(f),
                    Tab::More => render_more(f, user),
                    Tab::Admin => render_admin(f, app),
                }
            }
        }
    }
}

struct Help;

impl fmt::Display for Help {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Commands")?;
        for (_, cmd) in command_list() {
            writeln!(f, "  {:<52} {}", cmd.usage, cmd.description)?;
        }
        let slugs: Vec<&str> = Feature::all().iter().map(|feat| feat.slug()).collect();
        writeln!(f, "\nFeatures for 'open': {}", slugs.join(", "))
    }
}

fn render_login(f: &mut fmt::Formatter<'_>, error: Option<&str>) -> fmt::Result {
    writeln!(f, "MockBank")?;
    writeln!(f, "{RULE}")?;
    writeln!(f, "Sign in: login <email> <password>")?;
    if let Some(err) = error {
        writeln!(f, "! {err}")?;
    }
    Ok(())
}

fn render_frozen(f: &mut fmt::Formatter<'_>, name: &str) -> fmt::Result {
    writeln!(f, "Account frozen")?;
    writeln!(f, "{RULE}")?;
    writeln!(f, "{name}, your account has been frozen. Contact support to restore access.")?;
    writeln!(f, "Type 'logout' to sign out.")
}

fn render_tab_bar(f: &mut fmt::Formatter<'_>, current: Tab, is_admin: bool) -> fmt::Result {
    let titles: Vec<String> = Tab::all()
        .iter()
        .filter(|t| **t != Tab::Admin || is_admin)
        .map(|t| {
            if *t == current {
                format!("[{t}]")
            } else {
                t.to_string()
            }
        })
        .collect();
    writeln!(f, "{}", titles.join(" | "))?;
    writeln!(f, "{RULE}")
}

fn render_main(f: &mut fmt::Formatter<'_>, user: &UserData) -> fmt::Result {
    writeln!(f, "Hi, {}", user.name)?;
    writeln!(f, "Total: {}", format_amount(user.total_balance()))?;
    writeln!(
        f,
        "Spent in {}: {}",
        user.monthly_spending.month,
        format_amount(user.monthly_spending.amount)
    )?;
    if !user.cashback_progress.is_empty() {
        let segments: Vec<String> = user
            .cashback_progress
            .iter()
            .map(|s| format!("{} {}%", s.color, s.percentage))
            .collect();
        writeln!(
            f,
            "Cashback: {}% of the monthly goal ({})",
            progress_percent(&user.cashback_progress),
            segments.join(", ")
        )?;
    }

    writeln!(f, "\nAccounts")?;
    if user.accounts.is_empty() {
        writeln!(f, "  No accounts yet. Open one with 'account-add <name>'.")?;
    }
    for acc in &user.accounts {
        let badge = acc
            .badge
            .as_ref()
            .map(|b| format!("  ({})", b.text))
            .unwrap_or_default();
        writeln!(
            f,
            "  #{} {:<20} {:>16}{badge}",
            acc.id,
            truncate(&acc.name, 20),
            format_amount(acc.balance)
        )?;
        if !acc.cards.is_empty() {
            let cards: Vec<String> = acc.cards.iter().map(|c| c.masked()).collect();
            let design = if acc.card_design_url.is_some() {
                " (custom design)"
            } else {
                ""
            };
            writeln!(f, "     cards: {}{design}", cards.join(", "))?;
        }
    }

    writeln!(f, "\nRecent")?;
    if user.transactions.is_empty() {
        writeln!(f, "  No transactions yet")?;
    }
    for txn in user.transactions.iter().take(RECENT_ON_MAIN) {
        writeln!(
            f,
            "  {}  {:<w$} {:>16}",
            txn.date.format("%d.%m"),
            truncate(&txn.name, NAME_WIDTH),
            format_signed(txn.amount),
            w = NAME_WIDTH
        )?;
    }
    Ok(())
}

fn render_receipt(f: &mut fmt::Formatter<'_>, receipt: &TransferReceipt) -> fmt::Result {
    writeln!(f, "Transfer completed")?;
    writeln!(f, "  Amount:  {}", format_amount(receipt.amount))?;
    writeln!(f, "  From:    {}", receipt.from_account_name)?;
    writeln!(f, "  To:      {}", receipt.recipient)?;
    writeln!(
        f,
        "  Balance: {} → {}",
        format_amount(receipt.balance_before),
        format_amount(receipt.balance_after)
    )?;
    writeln!(f, "{RULE}")
}

fn describe_filter(filter: &HistoryFilter) -> String {
    let mut parts = Vec::new();
    if let Some(c) = filter.category {
        parts.push(format!("category={c}"));
    }
    if let Some(s) = &filter.search {
        parts.push(format!("search=\"{s}\""));
    }
    if let Some(m) = &filter.month {
        parts.push(format!("month={m}"));
    }
    parts.join(", ")
}

fn render_payments(
    f: &mut fmt::Formatter<'_>,
    user: &UserData,
    filter: &HistoryFilter,
    receipt: Option<&TransferReceipt>,
) -> fmt::Result {
    if let Some(receipt) = receipt {
        render_receipt(f, receipt)?;
    }

    writeln!(f, "Favorites")?;
    if user.favorite_contacts.is_empty() {
        writeln!(f, "  none")?;
    }
    for c in &user.favorite_contacts {
        let banks: Vec<&str> = c.banks.iter().map(|b| b.name.as_str()).collect();
        writeln!(
            f,
            "  #{} [{}] {} {}  {}",
            c.id,
            c.initials,
            c.name,
            c.phone,
            banks.join(", ")
        )?;
    }

    writeln!(f, "\nTransfers: between accounts ('transfer')")?;
    for feature in [
        Feature::TransferByPhone,
        Feature::TransferByCard,
        Feature::TransferFromOtherBank,
        Feature::TransferByContract,
        Feature::RequestMoney,
        Feature::ScanQr,
    ] {
        writeln!(f, "  {} (open {})", feature.label(), feature.slug())?;
    }

    writeln!(f, "\nHistory")?;
    if !filter.is_empty() {
        writeln!(f, "  filter: {}", describe_filter(filter))?;
    }
    let matching = history::filter(&user.transactions, filter);
    if matching.is_empty() {
        writeln!(f, "  Nothing found")?;
    }
    for (day, txns) in history::group_by_day(&matching) {
        writeln!(f, "  {}", day.format("%d.%m.%Y"))?;
        for txn in txns {
            writeln!(
                f,
                "    {:<w$} {:<10} {:>16}",
                truncate(&txn.name, NAME_WIDTH),
                txn.category.as_str(),
                format_signed(txn.amount),
                w = NAME_WIDTH
            )?;
        }
    }
    Ok(())
}

fn render_city(f: &mut fmt::Formatter<'_>) -> fmt::Result {
    writeln!(f, "City services")?;
    for feature in [
        Feature::MobilePayment,
        Feature::HousingPayment,
        Feature::GovServices,
        Feature::LoanRepayment,
        Feature::TopUp,
        Feature::Cashback,
    ] {
        writeln!(f, "  {} (open {})", feature.label(), feature.slug())?;
    }
    Ok(())
}

fn render_chat(f: &mut fmt::Formatter<'_>) -> fmt::Result {
    writeln!(f, "Support chat")?;
    writeln!(f, "  No messages yet")
}

fn render_more(f: &mut fmt::Formatter<'_>, user: &UserData) -> fmt::Result {
    writeln!(f, "Profile")?;
    writeln!(f, "  Name:    {}", user.name)?;
    writeln!(f, "  E-mail:  {}", user.email)?;
    if !user.avatar_url.is_empty() {
        writeln!(f, "  Avatar:  {}", user.avatar_url)?;
    }
    let plan = if user.is_premium {
        "Premium"
    } else {
        "Standard"
    };
    writeln!(f, "  Plan:    {plan}")?;
    writeln!(
        f,
        "  Donation points: {} (1 point = {})",
        user.donation_balance,
        format_amount(DONATION_RATE.into())
    )?;

    writeln!(f, "\nBanks")?;
    for bank in user.banks() {
        writeln!(f, "  {:<20} {}", bank.id, bank.name)?;
    }

    if !user.cashback_partners.is_empty() {
        writeln!(f, "\nCashback partners")?;
        for partner in &user.cashback_partners {
            writeln!(f, "  {:<20} {}", partner.id, partner.logo_url)?;
        }
    }
    Ok(())
}

fn render_admin(f: &mut fmt::Formatter<'_>, app: &App) -> fmt::Result {
    writeln!(f, "Users")?;
    for user in app.store().users() {
        let marker = if app.admin_target() == Some(&user.email) {
            "*"
        } else {
            " "
        };
        writeln!(
            f,
            " {marker} {:<28} {:<16} {:>18}{}",
            user.email.as_str(),
            truncate(&user.name, 16),
            format_amount(user.total_balance()),
            if user.frozen { "  FROZEN" } else { "" }
        )?;
    }

    let Some(target) = app.admin_target().and_then(|id| app.store().get(id)) else {
        return writeln!(f, "\nSelect a user with 'admin-select <email>'");
    };
    writeln!(f, "\nEditing {}", target.email)?;
    writeln!(f, "  Donation points: {}", target.donation_balance)?;
    for acc in &target.accounts {
        writeln!(
            f,
            "  #{} {:<20} {:>16}",
            acc.id,
            truncate(&acc.name, 20),
            format_amount(acc.balance)
        )?;
    }
    Ok(())
}

