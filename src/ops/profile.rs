use chrono::{DateTime, NaiveDate, Utc};
use rand::Rng;
use rust_decimal::Decimal;

use super::{parse_points, require, validate_phone, Error};
use crate::models::*;

fn with_account<F>(user: &UserData, id: AccountId, f: F) -> Result<UserData, Error>
where
    F: FnOnce(&mut Account) -> Result<(), Error>,
{
    let mut next = user.clone();
    let account = next.account_mut(id).ok_or(Error::AccountNotFound(id))?;
    f(account)?;
    Ok(next)
}

pub(crate) fn rename(user: &UserData, name: &str) -> Result<UserData, Error> {
    let name = require(name, "Name")?;
    Ok(UserData {
        name,
        ..user.clone()
    })
}

pub(crate) fn change_avatar(user: &UserData, url: &str) -> Result<UserData, Error> {
    let avatar_url = require(url, "Avatar URL")?;
    Ok(UserData {
        avatar_url,
        ..user.clone()
    })
}

/// Save a transfer destination. Every bank id must resolve against the
/// catalog or the user's custom banks.
pub(crate) fn add_contact(
    user: &UserData,
    name: &str,
    phone: &str,
    bank_ids: &[&str],
) -> Result<(UserData, ContactId), Error> {
    let name = require(name, "Name")?;
    let phone = validate_phone(phone)?;
    let banks = bank_ids
        .iter()
        .map(|id| {
            user.find_bank(id)
                .ok_or_else(|| Error::BankNotFound(id.trim().to_string()))
        })
        .collect::<Result<Vec<_>, _>>()?;

    let id = user.next_contact_id();
    let mut next = user.clone();
    next.favorite_contacts
        .push(FavoriteContact::new(id, name, phone, banks));
    Ok((next, id))
}

pub(crate) fn remove_contact(user: &UserData, id: ContactId) -> Result<UserData, Error> {
    user.contact(id).ok_or(Error::ContactNotFound(id))?;
    let mut next = user.clone();
    next.favorite_contacts.retain(|c| c.id != id);
    Ok(next)
}

/// New accounts start empty and without cards.
pub(crate) fn add_account(user: &UserData, name: &str) -> Result<(UserData, AccountId), Error> {
    let name = require(name, "Account name")?;
    let id = user.next_account_id();
    let mut next = user.clone();
    next.accounts.push(Account::new(id, name));
    Ok((next, id))
}

pub(crate) fn add_card<R: Rng + ?Sized>(
    user: &UserData,
    account: AccountId,
    rng: &mut R,
    today: NaiveDate,
) -> Result<(UserData, Card), Error> {
    let mut next = user.clone();
    let acc = next
        .account_mut(account)
        .ok_or(Error::AccountNotFound(account))?;
    if !acc.can_add_card() {
        return Err(Error::CardLimit);
    }
    let card = Card::generate(rng, today);
    acc.cards.push(card.clone());
    Ok((next, card))
}

/// `None` restores the default card face for every card of the account.
pub(crate) fn set_card_design(
    user: &UserData,
    account: AccountId,
    url: Option<&str>,
) -> Result<UserData, Error> {
    let url = url
        .map(str::trim)
        .filter(|u| !u.is_empty())
        .map(String::from);
    with_account(user, account, |acc| {
        acc.card_design_url = url;
        Ok(())
    })
}

pub(crate) fn set_badge(
    user: &UserData,
    account: AccountId,
    badge: Option<Badge>,
) -> Result<UserData, Error> {
    let badge = match badge {
        Some(b) => {
            let text = require(&b.text, "Badge text")?;
            Some(Badge { text, ..b })
        }
        None => None,
    };
    with_account(user, account, |acc| {
        acc.badge = badge;
        Ok(())
    })
}

/// Lowercase ASCII slug of `name`, words joined by '-'.
fn slugify(name: &str) -> String {
    let mut slug = String::new();
    for word in name
        .split(|c: char| !c.is_ascii_alphanumeric())
        .filter(|w| !w.is_empty())
    {
        if !slug.is_empty() {
            slug.push('-');
        }
        slug.push_str(&word.to_ascii_lowercase());
    }
    if slug.is_empty() {
        slug.push_str("bank");
    }
    slug
}

/// Premium users may extend their bank list. The id is derived from the
/// name and suffixed with a counter when it collides with a known bank.
pub(crate) fn add_custom_bank(
    user: &UserData,
    name: &str,
    logo_url: &str,
    gradient: &str,
) -> Result<(UserData, String), Error> {
    if !user.is_premium {
        return Err(Error::PremiumRequired);
    }
    let name = require(name, "Bank name")?;

    let base = slugify(&name);
    let mut id = base.clone();
    let mut n = 2;
    while user.find_bank(&id).is_some() {
        id = format!("{base}-{n}");
        n += 1;
    }

    let mut next = user.clone();
    next.custom_banks
        .push(Bank::new(&id, &name, logo_url.trim(), gradient.trim()));
    Ok((next, id))
}

/// Convert donation points into money on one account at [`DONATION_RATE`]
/// per point. The credit shows up in history as income.
pub(crate) fn exchange_donation(
    user: &UserData,
    points: &str,
    account: AccountId,
    now: DateTime<Utc>,
) -> Result<(UserData, Decimal), Error> {
    let points = parse_points(points)?;
    if points > user.donation_balance {
        return Err(Error::InsufficientDonation {
            available: user.donation_balance,
            requested: points,
        });
    }
    let credit = points
        .checked_mul(DONATION_RATE)
        .map(Decimal::from)
        .ok_or(Error::InvalidAmount)?;

    let mut next = with_account(user, account, |acc| {
        acc.balance = acc.balance.checked_add(credit).ok_or(Error::InvalidAmount)?;
        Ok(())
    })?;
    next.donation_balance -= points;
    next.record(Transaction::new(
        Category::Income,
        "Donation points exchange",
        format!("{points} pts"),
        credit,
        now,
    ));
    Ok((next, credit))
}

#[cfg(test)]
#[path = "profile_tests.rs"]
mod profile_tests;
