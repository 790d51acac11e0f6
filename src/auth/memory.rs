use std::collections::HashMap;
use std::sync::mpsc::{self, Receiver, Sender};

use tracing::{debug, warn};

use super::{AuthError, Credential, Identity, IdentityProvider};
use crate::config::IdentitySettings;
use crate::ledger::{ADMIN_EMAIL, REGULAR_EMAIL};

/// Stand-in for the managed identity service, holding e-mail/password pairs in memory.
pub(crate) struct InMemoryProvider {
    settings: IdentitySettings,
    passwords: HashMap<Identity, String>,
    current: Option<Identity>,
    subscribers: Vec<Sender<Option<Identity>>>,
}

impl InMemoryProvider {
    pub(crate) fn new(settings: IdentitySettings) -> Self {
        debug!(
            project = %settings.project_id,
            domain = %settings.auth_domain,
            "identity provider ready"
        );
        Self {
            settings,
            passwords: HashMap::new(),
            current: None,
            subscribers: Vec::new(),
        }
    }

    /// Provider knowing the two seeded users.
    pub(crate) fn with_demo_users(settings: IdentitySettings) -> Self {
        let mut provider = Self::new(settings);
        provider.register(REGULAR_EMAIL, "password123");
        provider.register(ADMIN_EMAIL, "admin123");
        provider
    }

    pub(crate) fn register(&mut self, email: &str, password: &str) {
        self.passwords
            .insert(Identity::new(email), password.to_string());
    }

    pub(crate) fn settings(&self) -> &IdentitySettings {
        &self.settings
    }

    #[cfg(test)]
    pub(crate) fn subscriber_count(&self) -> usize {
        self.subscribers.len()
    }

    fn publish(&mut self) {
        let current = self.current.clone();
        // Receivers that went away are dropped from the list.
        self.subscribers
            .retain(|tx| tx.send(current.clone()).is_ok());
    }
}

impl IdentityProvider for InMemoryProvider {
    fn sign_in(&mut self, credential: &Credential) -> Result<Identity, AuthError> {
        if credential.email.trim().is_empty() || credential.password.is_empty() {
            return Err(AuthError::MissingCredential);
        }

        let identity = Identity::new(&credential.email);
        match self.passwords.get(&identity) {
            Some(password) if *password == credential.password => {
                debug!(%identity, "signed in");
                self.current = Some(identity.clone());
                self.publish();
                Ok(identity)
            }
            _ => {
                warn!(%identity, "sign-in rejected");
                Err(AuthError::InvalidCredential)
            }
        }
    }

    fn sign_out(&mut self) {
        if let Some(identity) = self.current.take() {
            debug!(%identity, "signed out");
            self.publish();
        }
    }

    fn subscribe(&mut self) -> Receiver<Option<Identity>> {
        let (tx, rx) = mpsc::channel();
        if tx.send(self.current.clone()).is_ok() {
            self.subscribers.push(tx);
        }
        rx
    }

    fn current(&self) -> Option<&Identity> {
        self.current.as_ref()
    }
}
