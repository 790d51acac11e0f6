mod seed;

use std::collections::BTreeMap;

use tracing::trace;

use crate::auth::Identity;
use crate::models::UserData;

pub(crate) use seed::{seed_users, ADMIN_EMAIL, REGULAR_EMAIL};

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub(crate) enum StoreError {
    #[error("no ledger entry for {0}")]
    UnknownIdentity(Identity),
}

/// In-memory mapping from identity to its aggregate.
///
/// Readers only ever get shared references; every write goes through
/// [`LedgerStore::try_replace`], which swaps in a whole new aggregate or
/// leaves the old one untouched.
#[derive(Debug, Default)]
pub(crate) struct LedgerStore {
    users: BTreeMap<Identity, UserData>,
}

impl LedgerStore {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Store holding the hard-coded demo users, with history relative to `now`.
    pub(crate) fn seeded(now: chrono::DateTime<chrono::Utc>) -> Self {
        let mut store = Self::new();
        for user in seed_users(now) {
            store.insert(user);
        }
        store
    }

    /// Add an aggregate for a new identity. Returns `false` if one already exists.
    pub(crate) fn insert(&mut self, user: UserData) -> bool {
        if self.users.contains_key(&user.email) {
            return false;
        }
        trace!(identity = %user.email, "ledger entry created");
        self.users.insert(user.email.clone(), user);
        true
    }

    pub(crate) fn get(&self, identity: &Identity) -> Option<&UserData> {
        self.users.get(identity)
    }

    pub(crate) fn contains(&self, identity: &Identity) -> bool {
        self.users.contains_key(identity)
    }

    pub(crate) fn identities(&self) -> impl Iterator<Item = &Identity> {
        self.users.keys()
    }

    pub(crate) fn users(&self) -> impl Iterator<Item = &UserData> {
        self.users.values()
    }

    pub(crate) fn len(&self) -> usize {
        self.users.len()
    }

    /// Apply a fallible transformation. On `Err` the stored aggregate is unchanged.
    pub(crate) fn try_replace<T, E, F>(&mut self, identity: &Identity, f: F) -> Result<T, E>
    where
        F: FnOnce(&UserData) -> Result<(UserData, T), E>,
        E: From<StoreError>,
    {
        let slot = self
            .users
            .get_mut(identity)
            .ok_or_else(|| StoreError::UnknownIdentity(identity.clone()))?;
        let (next, output) = f(&*slot)?;
        *slot = next;
        trace!(%identity, "ledger entry replaced");
        Ok(output)
    }

    /// Apply a total transformation and return the stored result.
    pub(crate) fn replace<F>(&mut self, identity: &Identity, f: F) -> Result<&UserData, StoreError>
    where
        F: FnOnce(UserData) -> UserData,
    {
        self.try_replace(identity, |current| Ok::<_, StoreError>((f(current.clone()), ())))?;
        self.users
            .get(identity)
            .ok_or_else(|| StoreError::UnknownIdentity(identity.clone()))
    }
}

#[cfg(test)]
mod tests;
