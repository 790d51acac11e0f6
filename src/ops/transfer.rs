use chrono::{DateTime, Utc};
use rust_decimal::Decimal;

use super::{normalize_card_number, validate_phone, Amount, Error, Feature};
use crate::models::{Account, AccountId, Category, Transaction, UserData};

/// Snapshot handed to the success view after a completed transfer.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct TransferReceipt {
    pub amount: Decimal,
    pub from_account_name: String,
    pub balance_before: Decimal,
    pub balance_after: Decimal,
    /// Destination account name.
    pub recipient: String,
}

fn source_account(user: &UserData, id: AccountId) -> Result<&Account, Error> {
    user.account(id).ok_or(Error::AccountNotFound(id))
}

fn ensure_funds(account: &Account, amount: Amount) -> Result<(), Error> {
    if account.balance < amount.value() {
        return Err(Error::InsufficientFunds {
            available: account.balance,
            requested: amount.value(),
        });
    }
    Ok(())
}

/// Move money between two accounts of the same user.
///
/// Checks run in a fixed order: amount, distinct accounts, both accounts
/// exist, sufficient funds. On success the source is debited, the
/// destination credited, and a debit record is prepended to the history.
pub(crate) fn between_accounts(
    user: &UserData,
    from: AccountId,
    to: AccountId,
    amount: &str,
    now: DateTime<Utc>,
) -> Result<(UserData, TransferReceipt), Error> {
    let amount = Amount::parse(amount)?;
    if from == to {
        return Err(Error::SameAccount);
    }
    let source = source_account(user, from)?;
    let destination = user.account(to).ok_or(Error::AccountNotFound(to))?;
    ensure_funds(source, amount)?;

    let value = amount.value();
    let balance_before = source.balance;
    let balance_after = balance_before - value;
    let credited = destination
        .balance
        .checked_add(value)
        .ok_or(Error::InvalidAmount)?;
    let receipt = TransferReceipt {
        amount: value,
        from_account_name: source.name.clone(),
        balance_before,
        balance_after,
        recipient: destination.name.clone(),
    };
    let description = format!("{} → {}", source.name, destination.name);

    let mut next = user.clone();
    if let Some(src) = next.account_mut(from) {
        src.balance = balance_after;
    }
    if let Some(dst) = next.account_mut(to) {
        dst.balance = credited;
    }
    next.record(Transaction::new(
        Category::Transfer,
        "Transfer between accounts",
        description,
        -value,
        now,
    ));

    Ok((next, receipt))
}

/// Validate a transfer to a phone number. No external transfer exists, so a
/// request that passes every check ends in [`Error::Unimplemented`].
pub(crate) fn by_phone(
    user: &UserData,
    from: AccountId,
    phone: &str,
    bank_id: &str,
    amount: &str,
) -> Result<(UserData, TransferReceipt), Error> {
    let amount = Amount::parse(amount)?;
    validate_phone(phone)?;
    let source = source_account(user, from)?;
    user.find_bank(bank_id)
        .ok_or_else(|| Error::BankNotFound(bank_id.trim().to_string()))?;
    ensure_funds(source, amount)?;

    Err(Error::Unimplemented(Feature::TransferByPhone))
}

/// Validate a transfer to a card number. Sending to one of the source
/// account's own cards counts as a same-account transfer.
pub(crate) fn by_card(
    user: &UserData,
    from: AccountId,
    card_number: &str,
    amount: &str,
) -> Result<(UserData, TransferReceipt), Error> {
    let amount = Amount::parse(amount)?;
    let number = normalize_card_number(card_number)?;
    let source = source_account(user, from)?;
    if source.owns_card_number(&number) {
        return Err(Error::SameAccount);
    }
    ensure_funds(source, amount)?;

    Err(Error::Unimplemented(Feature::TransferByCard))
}

#[cfg(test)]
#[path = "transfer_tests.rs"]
mod transfer_tests;
