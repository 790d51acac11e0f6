use std::collections::HashMap;
use std::sync::LazyLock;

use crate::auth::{Credential, Identity};
use crate::history::{self, HistoryFilter};
use crate::models::{AccountId, Badge, Category, ContactId};
use crate::ops::admin::AdminEdit;
use crate::ops::{parse_decimal, Feature};

use super::app::Tab;

/// Everything the user can ask the app to do.
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum Action {
    SignIn(Credential),
    SignOut,
    Navigate(Tab),
    Transfer {
        from: AccountId,
        to: AccountId,
        amount: String,
    },
    TransferByPhone {
        from: AccountId,
        phone: String,
        bank: String,
        amount: String,
    },
    TransferByCard {
        from: AccountId,
        card: String,
        amount: String,
    },
    Rename(String),
    ChangeAvatar(String),
    AddContact {
        name: String,
        phone: String,
        banks: Vec<String>,
    },
    RemoveContact(ContactId),
    AddAccount(String),
    AddCard(AccountId),
    SetCardDesign {
        account: AccountId,
        url: Option<String>,
    },
    SetBadge {
        account: AccountId,
        badge: Option<Badge>,
    },
    AddCustomBank {
        name: String,
        logo_url: String,
        gradient: String,
    },
    ExchangeDonation {
        points: String,
        account: AccountId,
    },
    FilterHistory(FilterChange),
    AdminSelect(Identity),
    AdminEdit(AdminEdit),
    Open(Feature),
    Help,
    Quit,
}

/// One adjustment to the history filter.
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum FilterChange {
    Category(Option<Category>),
    Search(Option<String>),
    Month(Option<String>),
    Clear,
}

impl FilterChange {
    pub(crate) fn apply(self, filter: &mut HistoryFilter) {
        match self {
            Self::Category(c) => filter.category = c,
            Self::Search(s) => filter.search = s,
            Self::Month(m) => filter.month = m,
            Self::Clear => *filter = HistoryFilter::default(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub(crate) enum ParseError {
    #[error("Unknown command: {input}. Did you mean {suggestion}?")]
    Unknown { input: String, suggestion: String },

    #[error("Usage: {0}")]
    Usage(&'static str),

    #[error("{0}")]
    Invalid(String),
}

pub(crate) struct Command {
    pub(crate) usage: &'static str,
    pub(crate) description: &'static str,
    parse: fn(&str, &'static str) -> Result<Action, ParseError>,
}

macro_rules! register_command {
    ($name:expr, $usage:expr, $desc:expr, $func:expr, $registry:expr) => {{
        $registry.insert(
            $name,
            Command {
                usage: $usage,
                description: $desc,
                parse: $func,
            },
        );
    }};
}

pub(crate) static COMMANDS: LazyLock<HashMap<&str, Command>> = LazyLock::new(|| {
    let mut r: HashMap<&str, Command> = HashMap::new();

    register_command!("login", "login <email> <password>", "Sign in", cmd_login, r);
    register_command!("logout", "logout", "Sign out", cmd_logout, r);
    register_command!(
        "tab",
        "tab <main|payments|city|chat|more|admin>",
        "Switch tab",
        cmd_tab,
        r
    );
    register_command!(
        "transfer",
        "transfer <from> <to> <amount>",
        "Transfer between your accounts (e.g. transfer 1 2 2 000)",
        cmd_transfer,
        r
    );
    register_command!(
        "pay-phone",
        "pay-phone <from> <bank> <amount> <phone>",
        "Transfer by phone number",
        cmd_pay_phone,
        r
    );
    register_command!(
        "pay-card",
        "pay-card <from> <amount> <card number>",
        "Transfer by card number",
        cmd_pay_card,
        r
    );
    register_command!(
        "rename",
        "rename <name>",
        "Change your display name",
        cmd_rename,
        r
    );
    register_command!(
        "avatar",
        "avatar <url>",
        "Change your avatar",
        cmd_avatar,
        r
    );
    register_command!(
        "contact-add",
        "contact-add <name> | <phone> [| <bank>, <bank>...]",
        "Save a favorite contact",
        cmd_contact_add,
        r
    );
    register_command!(
        "contact-rm",
        "contact-rm <id>",
        "Remove a favorite contact",
        cmd_contact_rm,
        r
    );
    register_command!(
        "account-add",
        "account-add <name>",
        "Open a new account",
        cmd_account_add,
        r
    );
    register_command!(
        "card-add",
        "card-add <account>",
        "Issue a card (max 5 per account)",
        cmd_card_add,
        r
    );
    register_command!(
        "card-design",
        "card-design <account> [url]",
        "Set or reset the card face",
        cmd_card_design,
        r
    );
    register_command!(
        "badge",
        "badge <account> <color> <text> [| <icon url>]",
        "Set an account badge",
        cmd_badge,
        r
    );
    register_command!(
        "badge-clear",
        "badge-clear <account>",
        "Remove an account badge",
        cmd_badge_clear,
        r
    );
    register_command!(
        "bank-add",
        "bank-add <name> [| <logo url> [| <gradient>]]",
        "Add a custom bank (premium)",
        cmd_bank_add,
        r
    );
    register_command!(
        "exchange",
        "exchange <points> <account>",
        "Exchange donation points for money",
        cmd_exchange,
        r
    );
    register_command!(
        "history",
        "history [category|all]",
        "Filter history by category",
        cmd_history,
        r
    );
    register_command!("search", "search [text]", "Search history", cmd_search, r);
    register_command!(
        "month",
        "month [YYYY-MM]",
        "Limit history to a month",
        cmd_month,
        r
    );
    register_command!(
        "history-clear",
        "history-clear",
        "Reset history filters",
        cmd_history_clear,
        r
    );
    register_command!(
        "admin-select",
        "admin-select <email>",
        "Pick the user to edit",
        cmd_admin_select,
        r
    );
    register_command!(
        "admin-freeze",
        "admin-freeze",
        "Freeze the selected user",
        cmd_admin_freeze,
        r
    );
    register_command!(
        "admin-unfreeze",
        "admin-unfreeze",
        "Unfreeze the selected user",
        cmd_admin_unfreeze,
        r
    );
    register_command!(
        "admin-name",
        "admin-name <name>",
        "Rename the selected user",
        cmd_admin_name,
        r
    );
    register_command!(
        "admin-avatar",
        "admin-avatar <url>",
        "Set the selected user's avatar",
        cmd_admin_avatar,
        r
    );
    register_command!(
        "admin-points",
        "admin-points <n>",
        "Set the selected user's donation points",
        cmd_admin_points,
        r
    );
    register_command!(
        "admin-balance",
        "admin-balance <account> <amount>",
        "Overwrite an account balance of the selected user",
        cmd_admin_balance,
        r
    );
    register_command!(
        "open",
        "open <feature>",
        "Open a service entry point",
        cmd_open,
        r
    );
    register_command!("help", "help", "Show available commands", cmd_help, r);
    register_command!("h", "h", "Show available commands", cmd_help, r);
    register_command!("quit", "quit", "Quit MockBank", cmd_quit, r);
    register_command!("q", "q", "Quit MockBank", cmd_quit, r);

    r
});

impl Action {
    /// Parse one line of shell input.
    pub(crate) fn parse(input: &str) -> Result<Action, ParseError> {
        let trimmed = input.trim();
        let mut parts = trimmed.splitn(2, ' ');
        let cmd_name = parts.next().unwrap_or("");
        let args = parts.next().unwrap_or("").trim();

        match COMMANDS.get(cmd_name) {
            Some(cmd) => (cmd.parse)(args, cmd.usage),
            None => Err(ParseError::Unknown {
                input: cmd_name.to_string(),
                suggestion: find_closest(cmd_name),
            }),
        }
    }
}

/// Commands in name order, without single-letter aliases.
pub(crate) fn command_list() -> Vec<(&'static str, &'static Command)> {
    let mut list: Vec<_> = COMMANDS
        .iter()
        .filter(|(k, _)| k.len() > 1)
        .map(|(k, v)| (*k, v))
        .collect();
    list.sort_by_key(|(k, _)| *k);
    list
}

fn find_closest(input: &str) -> String {
    COMMANDS
        .keys()
        .filter(|k| k.len() > 1) // skip single-letter aliases for suggestions
        .min_by_key(|k| (levenshtein(input, k), **k))
        .unwrap_or(&"help")
        .to_string()
}

fn levenshtein(a: &str, b: &str) -> usize {
    let (a, b) = (a.as_bytes(), b.as_bytes());
    let mut prev: Vec<usize> = (0..=b.len()).collect();
    let mut curr = vec![0; b.len() + 1];

    for i in 1..=a.len() {
        curr[0] = i;
        for j in 1..=b.len() {
            let cost = if a[i - 1] == b[j - 1] { 0 } else { 1 };
            curr[j] = (prev[j] + 1).min(curr[j - 1] + 1).min(prev[j - 1] + cost);
        }
        std::mem::swap(&mut prev, &mut curr);
    }

    prev[b.len()]
}

// ── Argument helpers ─────────────────────────────────────────

/// Split off the first whitespace-delimited word.
fn next_word(args: &str) -> (&str, &str) {
    let args = args.trim_start();
    match args.split_once(char::is_whitespace) {
        Some((head, rest)) => (head, rest.trim()),
        None => (args, ""),
    }
}

fn non_empty(args: &str, usage: &'static str) -> Result<String, ParseError> {
    if args.is_empty() {
        Err(ParseError::Usage(usage))
    } else {
        Ok(args.to_string())
    }
}

fn parse_id(word: &str, usage: &'static str) -> Result<u32, ParseError> {
    if word.is_empty() {
        return Err(ParseError::Usage(usage));
    }
    word.parse()
        .map_err(|_| ParseError::Invalid(format!("'{word}' is not a valid id")))
}

/// `|`-separated fields, trimmed.
fn fields(args: &str) -> Vec<&str> {
    args.split('|').map(str::trim).collect()
}

fn optional(args: &str) -> Option<String> {
    if args.is_empty() {
        None
    } else {
        Some(args.to_string())
    }
}

fn no_args(args: &str, usage: &'static str, action: Action) -> Result<Action, ParseError> {
    if args.is_empty() {
        Ok(action)
    } else {
        Err(ParseError::Usage(usage))
    }
}

// ── Command parsers ──────────────────────────────────────────

fn cmd_login(args: &str, usage: &'static str) -> Result<Action, ParseError> {
    if args.is_empty() {
        return Err(ParseError::Usage(usage));
    }
    // A missing password is left for the identity provider to reject.
    let (email, password) = next_word(args);
    Ok(Action::SignIn(Credential::new(email, password)))
}

fn cmd_logout(args: &str, usage: &'static str) -> Result<Action, ParseError> {
    no_args(args, usage, Action::SignOut)
}

fn cmd_tab(args: &str, usage: &'static str) -> Result<Action, ParseError> {
    let name = non_empty(args, usage)?;
    Tab::parse(&name)
        .map(Action::Navigate)
        .ok_or_else(|| ParseError::Invalid(format!("Unknown tab: {name}")))
}

fn cmd_transfer(args: &str, usage: &'static str) -> Result<Action, ParseError> {
    let (from, rest) = next_word(args);
    let (to, amount) = next_word(rest);
    Ok(Action::Transfer {
        from: parse_id(from, usage)?,
        to: parse_id(to, usage)?,
        amount: non_empty(amount, usage)?,
    })
}

fn cmd_pay_phone(args: &str, usage: &'static str) -> Result<Action, ParseError> {
    let (from, rest) = next_word(args);
    let (bank, rest) = next_word(rest);
    let (amount, phone) = next_word(rest);
    Ok(Action::TransferByPhone {
        from: parse_id(from, usage)?,
        bank: non_empty(bank, usage)?,
        amount: non_empty(amount, usage)?,
        phone: non_empty(phone, usage)?,
    })
}

fn cmd_pay_card(args: &str, usage: &'static str) -> Result<Action, ParseError> {
    let (from, rest) = next_word(args);
    let (amount, card) = next_word(rest);
    Ok(Action::TransferByCard {
        from: parse_id(from, usage)?,
        amount: non_empty(amount, usage)?,
        card: non_empty(card, usage)?,
    })
}

fn cmd_rename(args: &str, usage: &'static str) -> Result<Action, ParseError> {
    Ok(Action::Rename(non_empty(args, usage)?))
}

fn cmd_avatar(args: &str, usage: &'static str) -> Result<Action, ParseError> {
    Ok(Action::ChangeAvatar(non_empty(args, usage)?))
}

fn cmd_contact_add(args: &str, usage: &'static str) -> Result<Action, ParseError> {
    let parts = fields(args);
    let (name, phone) = match parts.as_slice() {
        [name, phone, ..] if !name.is_empty() && !phone.is_empty() => (*name, *phone),
        _ => return Err(ParseError::Usage(usage)),
    };
    let banks: Vec<String> = parts
        .get(2)
        .map(|list| {
            list.split(',')
                .map(str::trim)
                .filter(|b| !b.is_empty())
                .map(String::from)
                .collect()
        })
        .unwrap_or_default();
    Ok(Action::AddContact {
        name: name.to_string(),
        phone: phone.to_string(),
        banks,
    })
}

fn cmd_contact_rm(args: &str, usage: &'static str) -> Result<Action, ParseError> {
    Ok(Action::RemoveContact(parse_id(args, usage)?))
}

fn cmd_account_add(args: &str, usage: &'static str) -> Result<Action, ParseError> {
    Ok(Action::AddAccount(non_empty(args, usage)?))
}

fn cmd_card_add(args: &str, usage: &'static str) -> Result<Action, ParseError> {
    Ok(Action::AddCard(parse_id(args, usage)?))
}

fn cmd_card_design(args: &str, usage: &'static str) -> Result<Action, ParseError> {
    let (account, url) = next_word(args);
    Ok(Action::SetCardDesign {
        account: parse_id(account, usage)?,
        url: optional(url),
    })
}

fn cmd_badge(args: &str, usage: &'static str) -> Result<Action, ParseError> {
    let (account, rest) = next_word(args);
    let (color, rest) = next_word(rest);
    let parts = fields(rest);
    let text = parts.first().copied().unwrap_or("");
    if color.is_empty() || text.is_empty() {
        return Err(ParseError::Usage(usage));
    }
    let mut badge = Badge::text(text, color);
    if let Some(icon) = parts.get(1).filter(|u| !u.is_empty()) {
        badge = badge.with_icon(*icon);
    }
    Ok(Action::SetBadge {
        account: parse_id(account, usage)?,
        badge: Some(badge),
    })
}

fn cmd_badge_clear(args: &str, usage: &'static str) -> Result<Action, ParseError> {
    Ok(Action::SetBadge {
        account: parse_id(args, usage)?,
        badge: None,
    })
}

fn cmd_bank_add(args: &str, usage: &'static str) -> Result<Action, ParseError> {
    let parts = fields(args);
    let name = non_empty(parts.first().copied().unwrap_or(""), usage)?;
    Ok(Action::AddCustomBank {
        name,
        logo_url: parts.get(1).copied().unwrap_or("").to_string(),
        gradient: parts.get(2).copied().unwrap_or("").to_string(),
    })
}

fn cmd_exchange(args: &str, usage: &'static str) -> Result<Action, ParseError> {
    let (points, account) = next_word(args);
    Ok(Action::ExchangeDonation {
        points: non_empty(points, usage)?,
        account: parse_id(account, usage)?,
    })
}

fn cmd_history(args: &str, _usage: &'static str) -> Result<Action, ParseError> {
    if args.is_empty() || args.eq_ignore_ascii_case("all") {
        return Ok(Action::FilterHistory(FilterChange::Category(None)));
    }
    Category::parse(args)
        .map(|c| Action::FilterHistory(FilterChange::Category(Some(c))))
        .ok_or_else(|| {
            let names: Vec<&str> = Category::all().iter().map(|cat| cat.as_str()).collect();
            ParseError::Invalid(format!("Unknown category: {args} (one of {})", names.join(", ")))
        })
}

fn cmd_search(args: &str, _usage: &'static str) -> Result<Action, ParseError> {
    Ok(Action::FilterHistory(FilterChange::Search(optional(args))))
}

fn cmd_month(args: &str, _usage: &'static str) -> Result<Action, ParseError> {
    if args.is_empty() {
        return Ok(Action::FilterHistory(FilterChange::Month(None)));
    }
    history::parse_month(args)
        .map(|m| Action::FilterHistory(FilterChange::Month(Some(m))))
        .ok_or_else(|| ParseError::Invalid(format!("Invalid month: {args}. Use YYYY-MM")))
}

fn cmd_history_clear(args: &str, usage: &'static str) -> Result<Action, ParseError> {
    no_args(args, usage, Action::FilterHistory(FilterChange::Clear))
}

fn cmd_admin_select(args: &str, usage: &'static str) -> Result<Action, ParseError> {
    Ok(Action::AdminSelect(Identity::new(&non_empty(args, usage)?)))
}

fn cmd_admin_freeze(args: &str, usage: &'static str) -> Result<Action, ParseError> {
    no_args(
        args,
        usage,
        Action::AdminEdit(AdminEdit {
            frozen: Some(true),
            ..Default::default()
        }),
    )
}

fn cmd_admin_unfreeze(args: &str, usage: &'static str) -> Result<Action, ParseError> {
    no_args(
        args,
        usage,
        Action::AdminEdit(AdminEdit {
            frozen: Some(false),
            ..Default::default()
        }),
    )
}

fn cmd_admin_name(args: &str, usage: &'static str) -> Result<Action, ParseError> {
    Ok(Action::AdminEdit(AdminEdit {
        name: Some(non_empty(args, usage)?),
        ..Default::default()
    }))
}

fn cmd_admin_avatar(args: &str, usage: &'static str) -> Result<Action, ParseError> {
    Ok(Action::AdminEdit(AdminEdit {
        avatar_url: Some(non_empty(args, usage)?),
        ..Default::default()
    }))
}

fn cmd_admin_points(args: &str, usage: &'static str) -> Result<Action, ParseError> {
    let raw = non_empty(args, usage)?;
    let points = raw
        .parse::<u64>()
        .map_err(|_| ParseError::Invalid(format!("'{raw}' is not a whole number of points")))?;
    Ok(Action::AdminEdit(AdminEdit {
        donation_balance: Some(points),
        ..Default::default()
    }))
}

fn cmd_admin_balance(args: &str, usage: &'static str) -> Result<Action, ParseError> {
    let (account, amount) = next_word(args);
    let account = parse_id(account, usage)?;
    let raw = non_empty(amount, usage)?;
    let balance =
        parse_decimal(&raw).ok_or_else(|| ParseError::Invalid(format!("Invalid amount: {raw}")))?;
    Ok(Action::AdminEdit(AdminEdit {
        balances: vec![(account, balance)],
        ..Default::default()
    }))
}

fn cmd_open(args: &str, usage: &'static str) -> Result<Action, ParseError> {
    let name = non_empty(args, usage)?;
    Feature::parse(&name)
        .map(Action::Open)
        .ok_or_else(|| ParseError::Invalid(format!("Unknown feature: {name}")))
}

fn cmd_help(_args: &str, _usage: &'static str) -> Result<Action, ParseError> {
    Ok(Action::Help)
}

fn cmd_quit(_args: &str, _usage: &'static str) -> Result<Action, ParseError> {
    Ok(Action::Quit)
}

#[cfg(test)]
#[path = "action_tests.rs"]
mod action_tests;
