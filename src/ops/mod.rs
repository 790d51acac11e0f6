//! Validated operations over a single [`UserData`] aggregate.
//!
//! Every operation is a pure function: it reads the current aggregate and
//! returns the next one, or an [`Error`] describing why nothing changed.
//! Committing the result is the caller's job (see `LedgerStore::try_replace`).

pub(crate) mod admin;
pub(crate) mod profile;
pub(crate) mod transfer;

use std::str::FromStr;
use std::sync::LazyLock;

use regex::Regex;
use rust_decimal::Decimal;

use crate::ledger::StoreError;
use crate::models::{AccountId, ContactId, MAX_CARDS_PER_ACCOUNT};

pub(crate) use transfer::TransferReceipt;

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub(crate) enum Error {
    #[error("Invalid amount")]
    InvalidAmount,

    #[error("Choose different accounts")]
    SameAccount,

    #[error("Insufficient funds")]
    InsufficientFunds {
        available: Decimal,
        requested: Decimal,
    },

    #[error("{0} is required")]
    MissingField(&'static str),

    #[error("Card limit reached: an account holds at most {MAX_CARDS_PER_ACCOUNT} cards")]
    CardLimit,

    #[error("Not enough donation points ({available} available)")]
    InsufficientDonation { available: u64, requested: u64 },

    #[error("Account {0} not found")]
    AccountNotFound(AccountId),

    #[error("Contact {0} not found")]
    ContactNotFound(ContactId),

    #[error("Bank '{0}' not found")]
    BankNotFound(String),

    #[error("Invalid phone number: {0}")]
    InvalidPhone(String),

    #[error("Invalid card number")]
    InvalidCardNumber,

    #[error("Custom banks are a premium feature")]
    PremiumRequired,

    #[error("Admin rights required")]
    NotAdmin,

    #[error("No user with e-mail {0}")]
    UnknownUser(String),

    #[error("'{0}' is not implemented yet")]
    Unimplemented(Feature),

    #[error(transparent)]
    Store(#[from] StoreError),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ErrorKind {
    /// Bad input; the operation was aborted with no state change.
    Validation,
    /// The entry point exists but does nothing yet.
    Unimplemented,
    /// The ledger itself is inconsistent with the session.
    Internal,
}

impl Error {
    pub(crate) fn kind(&self) -> ErrorKind {
        match self {
            Self::Unimplemented(_) => ErrorKind::Unimplemented,
            Self::Store(_) => ErrorKind::Internal,
            _ => ErrorKind::Validation,
        }
    }
}

/// Entry points that are shown to the user but not backed by any behavior.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Feature {
    TransferByPhone,
    TransferByCard,
    TransferFromOtherBank,
    TransferByContract,
    TopUp,
    ScanQr,
    RequestMoney,
    MobilePayment,
    HousingPayment,
    GovServices,
    LoanRepayment,
    Search,
    Stories,
    Cashback,
}

impl Feature {
    pub(crate) fn all() -> &'static [Feature] {
        &[
            Self::TransferByPhone,
            Self::TransferByCard,
            Self::TransferFromOtherBank,
            Self::TransferByContract,
            Self::TopUp,
            Self::ScanQr,
            Self::RequestMoney,
            Self::MobilePayment,
            Self::HousingPayment,
            Self::GovServices,
            Self::LoanRepayment,
            Self::Search,
            Self::Stories,
            Self::Cashback,
        ]
    }

    /// Short name used on the command line.
    pub(crate) fn slug(&self) -> &'static str {
        match self {
            Self::TransferByPhone => "phone-transfer",
            Self::TransferByCard => "card-transfer",
            Self::TransferFromOtherBank => "other-bank",
            Self::TransferByContract => "contract",
            Self::TopUp => "top-up",
            Self::ScanQr => "qr",
            Self::RequestMoney => "request-money",
            Self::MobilePayment => "mobile",
            Self::HousingPayment => "housing",
            Self::GovServices => "gov-services",
            Self::LoanRepayment => "loan",
            Self::Search => "search",
            Self::Stories => "stories",
            Self::Cashback => "cashback",
        }
    }

    pub(crate) fn label(&self) -> &'static str {
        match self {
            Self::TransferByPhone => "Transfer by phone",
            Self::TransferByCard => "Transfer by card number",
            Self::TransferFromOtherBank => "From another bank",
            Self::TransferByContract => "Transfer by contract",
            Self::TopUp => "Top up",
            Self::ScanQr => "Scan QR code",
            Self::RequestMoney => "Request money",
            Self::MobilePayment => "Mobile payment",
            Self::HousingPayment => "Housing and utilities",
            Self::GovServices => "Government services",
            Self::LoanRepayment => "Loan repayment",
            Self::Search => "Search",
            Self::Stories => "Stories",
            Self::Cashback => "Cashback and bonuses",
        }
    }

    pub(crate) fn parse(s: &str) -> Option<Self> {
        let lower = s.trim().to_lowercase();
        Self::all().iter().copied().find(|f| f.slug() == lower)
    }
}

impl std::fmt::Display for Feature {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// A strictly positive amount with at most two fractional digits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub(crate) struct Amount(Decimal);

impl Amount {
    pub(crate) const MAX_SCALE: u32 = 2;

    pub(crate) fn new(value: Decimal) -> Result<Self, Error> {
        if value <= Decimal::ZERO || value.normalize().scale() > Self::MAX_SCALE {
            return Err(Error::InvalidAmount);
        }
        Ok(Self(value))
    }

    /// Accepts "2000", "2 000", "1240.50" and "1240,50".
    pub(crate) fn parse(input: &str) -> Result<Self, Error> {
        let value = parse_decimal(input).ok_or(Error::InvalidAmount)?;
        Self::new(value)
    }

    pub(crate) fn value(self) -> Decimal {
        self.0
    }
}

/// Lenient decimal parsing for user input: spaces as thousands separators, ',' or '.' as the point.
pub(crate) fn parse_decimal(input: &str) -> Option<Decimal> {
    let cleaned: String = input
        .chars()
        .filter(|c| !c.is_whitespace())
        .map(|c| if c == ',' { '.' } else { c })
        .collect();
    if cleaned.is_empty() {
        return None;
    }
    Decimal::from_str(&cleaned).ok()
}

/// Positive whole number of points.
pub(crate) fn parse_points(input: &str) -> Result<u64, Error> {
    match input.trim().parse::<u64>() {
        Ok(0) | Err(_) => Err(Error::InvalidAmount),
        Ok(n) => Ok(n),
    }
}

const PHONE_LEN: std::ops::RangeInclusive<usize> = 7..=20;

static PHONE_RE: LazyLock<Option<Regex>> =
    LazyLock::new(|| Regex::new(r"^\+?[0-9][0-9 ()-]*[0-9]$").ok());

static CARD_RE: LazyLock<Option<Regex>> = LazyLock::new(|| Regex::new(r"^[0-9]{16}$").ok());

pub(crate) fn validate_phone(phone: &str) -> Result<String, Error> {
    let trimmed = phone.trim();
    let shaped = PHONE_RE.as_ref().is_some_and(|re| re.is_match(trimmed));
    // The pattern is ASCII-only, so byte length is the character count.
    if shaped && PHONE_LEN.contains(&trimmed.len()) {
        Ok(trimmed.to_string())
    } else {
        Err(Error::InvalidPhone(trimmed.to_string()))
    }
}

/// Strip spaces and dashes; the remainder must be exactly 16 digits.
pub(crate) fn normalize_card_number(number: &str) -> Result<String, Error> {
    let digits: String = number
        .chars()
        .filter(|c| !c.is_whitespace() && *c != '-')
        .collect();
    if CARD_RE.as_ref().is_some_and(|re| re.is_match(&digits)) {
        Ok(digits)
    } else {
        Err(Error::InvalidCardNumber)
    }
}

pub(crate) fn require(value: &str, field: &'static str) -> Result<String, Error> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        Err(Error::MissingField(field))
    } else {
        Ok(trimmed.to_string())
    }
}
