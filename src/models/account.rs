use rust_decimal::Decimal;

use super::Card;

pub(crate) type AccountId = u32;

/// Maximum number of cards a single account may hold.
pub(crate) const MAX_CARDS_PER_ACCOUNT: usize = 5;

const DEFAULT_COLOR: &str = "#FFFFFF";
const DEFAULT_ICON: &str = "ruble";
const DEFAULT_ICON_BG: &str = "#4A90E2";

/// Small notification badge rendered next to an account balance.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Badge {
    pub text: String,
    pub color: String,
    pub icon_url: Option<String>,
}

impl Badge {
    pub(crate) fn text(text: impl Into<String>, color: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            color: color.into(),
            icon_url: None,
        }
    }

    pub(crate) fn with_icon(mut self, url: impl Into<String>) -> Self {
        self.icon_url = Some(url.into());
        self
    }
}

#[derive(Debug, Clone, PartialEq)]
pub(crate) struct Account {
    pub id: AccountId,
    pub name: String,
    pub balance: Decimal,
    pub color: String,
    pub icon_name: String,
    pub icon_bg: String,
    pub cards: Vec<Card>,
    pub badge: Option<Badge>,
    /// One card-face design shared by every card of the account.
    pub card_design_url: Option<String>,
}

impl Account {
    pub(crate) fn new(id: AccountId, name: String) -> Self {
        Self {
            id,
            name,
            balance: Decimal::ZERO,
            color: DEFAULT_COLOR.to_string(),
            icon_name: DEFAULT_ICON.to_string(),
            icon_bg: DEFAULT_ICON_BG.to_string(),
            cards: Vec::new(),
            badge: None,
            card_design_url: None,
        }
    }

    pub(crate) fn with_balance(mut self, balance: Decimal) -> Self {
        self.balance = balance;
        self
    }

    pub(crate) fn can_add_card(&self) -> bool {
        self.cards.len() < MAX_CARDS_PER_ACCOUNT
    }

    /// Whether `number` (digits only) belongs to one of this account's cards.
    pub(crate) fn owns_card_number(&self, number: &str) -> bool {
        self.cards.iter().any(|c| c.number == number)
    }
}

impl std::fmt::Display for Account {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name)
    }
}
