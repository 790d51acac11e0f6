use rust_decimal::Decimal;

use super::{
    Account, AccountId, Bank, CashbackPartner, CashbackSegment, ContactId, FavoriteContact,
    Transaction,
};
use crate::auth::Identity;

/// Primary-balance units credited per donation point.
pub(crate) const DONATION_RATE: u64 = 500;

/// Display-only spending figure shown on the main screen.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct MonthlySpending {
    /// Format: "YYYY-MM"
    pub month: String,
    pub amount: Decimal,
}

/// Aggregate root: everything one identity owns.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct UserData {
    pub email: Identity,
    pub frozen: bool,
    pub name: String,
    pub avatar_url: String,
    pub is_premium: bool,
    pub is_admin: bool,
    pub donation_balance: u64,
    pub accounts: Vec<Account>,
    /// Display-only.
    pub cashback_partners: Vec<CashbackPartner>,
    /// Display-only.
    pub cashback_progress: Vec<CashbackSegment>,
    pub favorite_contacts: Vec<FavoriteContact>,
    /// Newest first.
    pub transactions: Vec<Transaction>,
    pub custom_banks: Vec<Bank>,
    pub monthly_spending: MonthlySpending,
}

impl UserData {
    /// Aggregate for an identity that signed in without a seeded record.
    pub(crate) fn blank(email: Identity, month: String) -> Self {
        let name = email.local_part().to_string();
        Self {
            email,
            frozen: false,
            name,
            avatar_url: String::new(),
            is_premium: false,
            is_admin: false,
            donation_balance: 0,
            accounts: Vec::new(),
            cashback_partners: Vec::new(),
            cashback_progress: Vec::new(),
            favorite_contacts: Vec::new(),
            transactions: Vec::new(),
            custom_banks: Vec::new(),
            monthly_spending: MonthlySpending {
                month,
                amount: Decimal::ZERO,
            },
        }
    }

    pub(crate) fn account(&self, id: AccountId) -> Option<&Account> {
        self.accounts.iter().find(|a| a.id == id)
    }

    pub(crate) fn account_mut(&mut self, id: AccountId) -> Option<&mut Account> {
        self.accounts.iter_mut().find(|a| a.id == id)
    }

    pub(crate) fn contact(&self, id: ContactId) -> Option<&FavoriteContact> {
        self.favorite_contacts.iter().find(|c| c.id == id)
    }

    pub(crate) fn total_balance(&self) -> Decimal {
        self.accounts.iter().map(|a| a.balance).sum()
    }

    pub(crate) fn next_account_id(&self) -> AccountId {
        self.accounts
            .iter()
            .map(|a| a.id)
            .max()
            .map_or(1, |id| id + 1)
    }

    pub(crate) fn next_contact_id(&self) -> ContactId {
        self.favorite_contacts
            .iter()
            .map(|c| c.id)
            .max()
            .map_or(1, |id| id + 1)
    }

    /// The static catalog followed by this user's custom banks.
    pub(crate) fn banks(&self) -> Vec<Bank> {
        let mut banks = Bank::catalog();
        banks.extend(self.custom_banks.iter().cloned());
        banks
    }

    pub(crate) fn find_bank(&self, id: &str) -> Option<Bank> {
        Bank::find_by_id(&self.banks(), id).cloned()
    }

    pub(crate) fn record(&mut self, txn: Transaction) {
        self.transactions.insert(0, txn);
    }
}
