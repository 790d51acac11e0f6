//! Admin edits over another user's aggregate.
//!
//! `is_admin` is a flag on the caller's own record and is checked here only
//! to gate the panel. It grants no protection against a caller that builds
//! its own `AdminEdit`.

use rust_decimal::Decimal;

use super::{require, Error};
use crate::models::{AccountId, UserData};

pub(crate) fn authorize(actor: &UserData) -> Result<(), Error> {
    if actor.is_admin {
        Ok(())
    } else {
        Err(Error::NotAdmin)
    }
}

/// Fields left as `None` (or an empty `balances`) are kept as they are.
#[derive(Debug, Clone, Default, PartialEq)]
pub(crate) struct AdminEdit {
    pub name: Option<String>,
    pub avatar_url: Option<String>,
    pub donation_balance: Option<u64>,
    pub frozen: Option<bool>,
    /// Balance overwrites; negative values are accepted.
    pub balances: Vec<(AccountId, Decimal)>,
}

/// Apply `edit` to `target`. An unknown account id rejects the whole edit.
pub(crate) fn apply(target: &UserData, edit: &AdminEdit) -> Result<UserData, Error> {
    let mut next = target.clone();

    if let Some(name) = &edit.name {
        next.name = require(name, "Name")?;
    }
    if let Some(url) = &edit.avatar_url {
        next.avatar_url = url.trim().to_string();
    }
    if let Some(points) = edit.donation_balance {
        next.donation_balance = points;
    }
    if let Some(frozen) = edit.frozen {
        next.frozen = frozen;
    }
    for (id, balance) in &edit.balances {
        let account = next.account_mut(*id).ok_or(Error::AccountNotFound(*id))?;
        account.balance = *balance;
    }

    Ok(next)
}

#[cfg(test)]
#[path = "admin_tests.rs"]
mod admin_tests;
