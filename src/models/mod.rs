mod account;
mod card;
mod cashback;
mod contact;
mod transaction;
mod user;

pub(crate) use account::{Account, AccountId, Badge, MAX_CARDS_PER_ACCOUNT};
pub(crate) use card::Card;
pub(crate) use cashback::{progress_percent, CashbackPartner, CashbackSegment};
pub(crate) use contact::{Bank, ContactId, FavoriteContact};
pub(crate) use transaction::{Category, Transaction};
pub(crate) use user::{MonthlySpending, UserData, DONATION_RATE};
