//! Boundary to the external identity service.
//!
//! The ledger only needs three things from it: sign in with a credential,
//! sign out, and a stream of "current identity" changes. Anything that
//! satisfies [`IdentityProvider`] can stand in for the managed service.

mod memory;

use std::sync::mpsc::Receiver;

pub(crate) use memory::InMemoryProvider;

/// Normalized (trimmed, lower-cased) e-mail address identifying one user.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub(crate) struct Identity(String);

impl Identity {
    pub(crate) fn new(email: &str) -> Self {
        Self(email.trim().to_lowercase())
    }

    pub(crate) fn as_str(&self) -> &str {
        &self.0
    }

    /// The part before '@', or the whole address when there is none.
    pub(crate) fn local_part(&self) -> &str {
        self.0.split('@').next().unwrap_or(&self.0)
    }
}

impl std::fmt::Display for Identity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Clone, PartialEq, Eq)]
pub(crate) struct Credential {
    pub email: String,
    pub password: String,
}

impl Credential {
    pub(crate) fn new(email: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            password: password.into(),
        }
    }
}

impl std::fmt::Debug for Credential {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credential")
            .field("email", &self.email)
            .field("password", &"<redacted>")
            .finish()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub(crate) enum AuthError {
    #[error("Enter e-mail and password")]
    MissingCredential,

    #[error("Wrong e-mail or password")]
    InvalidCredential,
}

pub(crate) trait IdentityProvider {
    fn sign_in(&mut self, credential: &Credential) -> Result<Identity, AuthError>;

    fn sign_out(&mut self);

    /// Receive the current identity immediately, then again on every change.
    fn subscribe(&mut self) -> Receiver<Option<Identity>>;

    fn current(&self) -> Option<&Identity>;
}
