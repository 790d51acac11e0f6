use chrono::{DateTime, Utc};
use rust_decimal::Decimal;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub(crate) enum Category {
    Food,
    Shopping,
    Transport,
    Health,
    Income,
    Transfer,
}

impl Category {
    pub(crate) fn as_str(&self) -> &'static str {
        match self {
            Self::Food => "food",
            Self::Shopping => "shopping",
            Self::Transport => "transport",
            Self::Health => "health",
            Self::Income => "income",
            Self::Transfer => "transfer",
        }
    }

    pub(crate) fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "food" => Some(Self::Food),
            "shopping" => Some(Self::Shopping),
            "transport" => Some(Self::Transport),
            "health" => Some(Self::Health),
            "income" => Some(Self::Income),
            "transfer" | "transfers" => Some(Self::Transfer),
            _ => None,
        }
    }

    pub(crate) fn all() -> &'static [Category] {
        &[
            Self::Food,
            Self::Shopping,
            Self::Transport,
            Self::Health,
            Self::Income,
            Self::Transfer,
        ]
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Immutable once created; new records are prepended to a user's history.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct Transaction {
    pub id: String,
    pub category: Category,
    pub name: String,
    pub description: String,
    /// Negative for debits.
    pub amount: Decimal,
    pub date: DateTime<Utc>,
}

impl Transaction {
    pub(crate) fn new(
        category: Category,
        name: impl Into<String>,
        description: impl Into<String>,
        amount: Decimal,
        date: DateTime<Utc>,
    ) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            category,
            name: name.into(),
            description: description.into(),
            amount,
            date,
        }
    }

    pub(crate) fn is_income(&self) -> bool {
        self.amount > Decimal::ZERO
    }

    pub(crate) fn is_expense(&self) -> bool {
        self.amount < Decimal::ZERO
    }

    pub(crate) fn abs_amount(&self) -> Decimal {
        self.amount.abs()
    }
}
