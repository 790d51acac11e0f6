use std::collections::VecDeque;
use std::sync::mpsc::Receiver;

use anyhow::Result;
use chrono::Utc;
use rand::rngs::StdRng;
use rand::SeedableRng;
use rust_decimal::Decimal;
use tracing::{debug, info, warn};

use super::action::Action;
use super::util::format_amount;
use crate::auth::{Credential, Identity, IdentityProvider};
use crate::history::HistoryFilter;
use crate::ledger::{LedgerStore, StoreError};
use crate::models::{MonthlySpending, UserData};
use crate::ops::{self, admin, profile, transfer, ErrorKind, TransferReceipt};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Tab {
    Main,
    Payments,
    City,
    Chat,
    More,
    Admin,
}

impl Tab {
    pub(crate) fn all() -> &'static [Tab] {
        &[
            Self::Main,
            Self::Payments,
            Self::City,
            Self::Chat,
            Self::More,
            Self::Admin,
        ]
    }

    pub(crate) fn as_str(&self) -> &'static str {
        match self {
            Self::Main => "main",
            Self::Payments => "payments",
            Self::City => "city",
            Self::Chat => "chat",
            Self::More => "more",
            Self::Admin => "admin",
        }
    }

    pub(crate) fn parse(s: &str) -> Option<Self> {
        let lower = s.trim().to_lowercase();
        Self::all().iter().copied().find(|t| t.as_str() == lower)
    }
}

impl std::fmt::Display for Tab {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Main => write!(f, "Main"),
            Self::Payments => write!(f, "Payments"),
            Self::City => write!(f, "City"),
            Self::Chat => write!(f, "Chat"),
            Self::More => write!(f, "More"),
            Self::Admin => write!(f, "Admin"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Session {
    LoggedOut,
    LoggedIn(Identity),
}

/// What the host should draw, derived from the session on every call.
#[derive(Debug, PartialEq)]
pub(crate) enum View<'a> {
    Login { error: Option<&'a str> },
    Frozen { name: &'a str },
    Active { tab: Tab, user: &'a UserData },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Toast {
    pub id: u64,
    pub message: String,
}

pub(crate) struct App {
    pub(crate) running: bool,
    pub(crate) show_help: bool,
    store: LedgerStore,
    provider: Box<dyn IdentityProvider>,
    identity_events: Receiver<Option<Identity>>,
    session: Session,
    tab: Tab,
    login_error: Option<String>,
    admin_target: Option<Identity>,
    toasts: VecDeque<Toast>,
    next_toast_id: u64,
    last_receipt: Option<TransferReceipt>,
    history_filter: HistoryFilter,
    rng: StdRng,
}

impl App {
    pub(crate) fn new(store: LedgerStore, mut provider: Box<dyn IdentityProvider>) -> Self {
        let identity_events = provider.subscribe();
        let mut app = Self {
            running: true,
            show_help: false,
            store,
            provider,
            identity_events,
            session: Session::LoggedOut,
            tab: Tab::Main,
            login_error: None,
            admin_target: None,
            toasts: VecDeque::new(),
            next_toast_id: 1,
            last_receipt: None,
            history_filter: HistoryFilter::default(),
            rng: StdRng::from_entropy(),
        };
        app.sync_identity();
        app
    }

    pub(crate) fn store(&self) -> &LedgerStore {
        &self.store
    }

    pub(crate) fn session(&self) -> &Session {
        &self.session
    }

    #[cfg(test)]
    pub(crate) fn tab(&self) -> Tab {
        self.tab
    }

    pub(crate) fn admin_target(&self) -> Option<&Identity> {
        self.admin_target.as_ref()
    }

    pub(crate) fn last_receipt(&self) -> Option<&TransferReceipt> {
        self.last_receipt.as_ref()
    }

    pub(crate) fn history_filter(&self) -> &HistoryFilter {
        &self.history_filter
    }

    pub(crate) fn current_user(&self) -> Option<&UserData> {
        match &self.session {
            Session::LoggedIn(identity) => self.store.get(identity),
            Session::LoggedOut => None,
        }
    }

    pub(crate) fn view(&self) -> View<'_> {
        match self.current_user() {
            Some(user) if user.frozen => View::Frozen { name: &user.name },
            Some(user) => View::Active {
                tab: self.tab,
                user,
            },
            None => View::Login {
                error: self.login_error.as_deref(),
            },
        }
    }

    pub(crate) fn take_toasts(&mut self) -> Vec<Toast> {
        self.toasts.drain(..).collect()
    }

    fn toast(&mut self, message: impl Into<String>) {
        let toast = Toast {
            id: self.next_toast_id,
            message: message.into(),
        };
        self.next_toast_id += 1;
        self.toasts.push_back(toast);
    }

    /// Run one action. Rejections become toasts; only a ledger that disagrees
    /// with the session is reported as an error.
    pub(crate) fn dispatch(&mut self, action: Action) -> Result<()> {
        debug!(?action, "dispatch");
        let outcome = self.apply(action);
        self.sync_identity();

        match outcome {
            Ok(()) => Ok(()),
            Err(err) if err.kind() == ErrorKind::Internal => {
                Err(anyhow::Error::new(err).context("ledger out of sync with session"))
            }
            Err(err) => {
                debug!(%err, "action rejected");
                self.toast(err.to_string());
                Ok(())
            }
        }
    }

    fn apply(&mut self, action: Action) -> Result<(), ops::Error> {
        match action {
            Action::Quit => {
                self.running = false;
                Ok(())
            }
            Action::Help => {
                self.show_help = true;
                Ok(())
            }
            Action::SignIn(credential) => {
                self.sign_in(&credential);
                Ok(())
            }
            Action::SignOut => {
                if self.provider.current().is_some() {
                    self.provider.sign_out();
                } else {
                    self.toast("Not signed in");
                }
                Ok(())
            }
            other => {
                let Session::LoggedIn(identity) = self.session.clone() else {
                    self.toast("Sign in first");
                    return Ok(());
                };
                if self.actor(&identity)?.frozen {
                    self.toast("Your account is frozen");
                    return Ok(());
                }
                self.apply_signed_in(&identity, other)
            }
        }
    }

    fn sign_in(&mut self, credential: &Credential) {
        match self.provider.sign_in(credential) {
            Ok(identity) => debug!(%identity, "credential accepted"),
            Err(err) => {
                warn!(%err, "sign-in failed");
                // The login view only exists while signed out.
                match self.session {
                    Session::LoggedOut => self.login_error = Some(err.to_string()),
                    Session::LoggedIn(_) => self.toast(err.to_string()),
                }
            }
        }
    }

    fn actor(&self, identity: &Identity) -> Result<&UserData, ops::Error> {
        self.store
            .get(identity)
            .ok_or_else(|| StoreError::UnknownIdentity(identity.clone()).into())
    }

    /// Commit a pure update of the signed-in user's aggregate.
    fn update<F>(&mut self, identity: &Identity, f: F) -> Result<(), ops::Error>
    where
        F: FnOnce(&UserData) -> Result<UserData, ops::Error>,
    {
        self.store
            .try_replace(identity, |u| f(u).map(|next| (next, ())))
    }

    fn apply_signed_in(&mut self, identity: &Identity, action: Action) -> Result<(), ops::Error> {
        let now = Utc::now();
        match action {
            Action::Navigate(tab) => {
                if tab == Tab::Admin {
                    admin::authorize(self.actor(identity)?)?;
                }
                self.tab = tab;
                self.last_receipt = None;
                Ok(())
            }
            Action::Transfer { from, to, amount } => {
                let receipt = self.store.try_replace(identity, |u| {
                    transfer::between_accounts(u, from, to, &amount, now)
                })?;
                self.complete_transfer(identity, receipt);
                Ok(())
            }
            Action::TransferByPhone {
                from,
                phone,
                bank,
                amount,
            } => {
                let receipt = self.store.try_replace(identity, |u| {
                    transfer::by_phone(u, from, &phone, &bank, &amount)
                })?;
                self.complete_transfer(identity, receipt);
                Ok(())
            }
            Action::TransferByCard { from, card, amount } => {
                let receipt = self
                    .store
                    .try_replace(identity, |u| transfer::by_card(u, from, &card, &amount))?;
                self.complete_transfer(identity, receipt);
                Ok(())
            }
            Action::Rename(name) => {
                self.update(identity, |u| profile::rename(u, &name))?;
                self.toast("Name updated");
                Ok(())
            }
            Action::ChangeAvatar(url) => {
                self.update(identity, |u| profile::change_avatar(u, &url))?;
                self.toast("Avatar updated");
                Ok(())
            }
            Action::AddContact { name, phone, banks } => {
                let bank_ids: Vec<&str> = banks.iter().map(String::as_str).collect();
                let id = self
                    .store
                    .try_replace(identity, |u| profile::add_contact(u, &name, &phone, &bank_ids))?;
                self.toast(format!("Contact #{id} saved"));
                Ok(())
            }
            Action::RemoveContact(id) => {
                self.update(identity, |u| profile::remove_contact(u, id))?;
                self.toast("Contact removed");
                Ok(())
            }
            Action::AddAccount(name) => {
                let id = self
                    .store
                    .try_replace(identity, |u| profile::add_account(u, &name))?;
                info!(%identity, account = id, "account opened");
                self.toast(format!("Account #{id} opened"));
                Ok(())
            }
            Action::AddCard(account) => {
                let today = now.date_naive();
                let rng = &mut self.rng;
                let card = self
                    .store
                    .try_replace(identity, |u| profile::add_card(u, account, rng, today))?;
                self.toast(format!("Card {} issued", card.masked()));
                Ok(())
            }
            Action::SetCardDesign { account, url } => {
                self.update(identity, |u| profile::set_card_design(u, account, url.as_deref()))?;
                self.toast("Card design updated");
                Ok(())
            }
            Action::SetBadge { account, badge } => {
                let message = match badge {
                    Some(_) => "Badge updated",
                    None => "Badge removed",
                };
                self.update(identity, |u| profile::set_badge(u, account, badge))?;
                self.toast(message);
                Ok(())
            }
            Action::AddCustomBank {
                name,
                logo_url,
                gradient,
            } => {
                let id = self.store.try_replace(identity, |u| {
                    profile::add_custom_bank(u, &name, &logo_url, &gradient)
                })?;
                self.toast(format!("Bank '{id}' added"));
                Ok(())
            }
            Action::ExchangeDonation { points, account } => {
                let credit = self.store.try_replace(identity, |u| {
                    profile::exchange_donation(u, &points, account, now)
                })?;
                info!(%identity, %credit, "donation points exchanged");
                self.toast(format!("{} credited", format_amount(credit)));
                Ok(())
            }
            Action::FilterHistory(change) => {
                change.apply(&mut self.history_filter);
                Ok(())
            }
            Action::AdminSelect(target) => {
                admin::authorize(self.actor(identity)?)?;
                if !self.store.contains(&target) {
                    return Err(ops::Error::UnknownUser(target.to_string()));
                }
                self.toast(format!("Editing {target}"));
                self.admin_target = Some(target);
                Ok(())
            }
            Action::AdminEdit(edit) => {
                admin::authorize(self.actor(identity)?)?;
                let target = self
                    .admin_target
                    .clone()
                    .ok_or(ops::Error::MissingField("Target user"))?;
                self.update(&target, |u| admin::apply(u, &edit))?;
                info!(admin = %identity, %target, ?edit, "admin edit applied");
                self.toast(format!("Saved changes for {target}"));
                Ok(())
            }
            Action::Open(feature) => Err(ops::Error::Unimplemented(feature)),
            Action::SignIn(_) | Action::SignOut | Action::Help | Action::Quit => Ok(()),
        }
    }

    fn complete_transfer(&mut self, identity: &Identity, receipt: TransferReceipt) {
        info!(%identity, amount = %receipt.amount, to = %receipt.recipient, "transfer completed");
        self.toast("Transfer completed");
        self.last_receipt = Some(receipt);
    }

    /// Drain identity changes published by the provider.
    fn sync_identity(&mut self) {
        while let Ok(event) = self.identity_events.try_recv() {
            match event {
                Some(identity) => self.on_signed_in(identity),
                None => self.on_signed_out(),
            }
        }
    }

    fn on_signed_in(&mut self, identity: Identity) {
        if self.session == Session::LoggedIn(identity.clone()) {
            return;
        }
        let month = Utc::now().format("%Y-%m").to_string();
        let blank = UserData::blank(identity.clone(), month.clone());
        if self.store.insert(blank) {
            info!(%identity, "created empty ledger entry");
        } else if self
            .store
            .get(&identity)
            .is_some_and(|u| u.monthly_spending.month != month)
        {
            // New month: the spending figure starts over.
            let rolled = self.store.replace(&identity, |u| UserData {
                monthly_spending: MonthlySpending {
                    month,
                    amount: Decimal::ZERO,
                },
                ..u
            });
            if let Err(err) = rolled {
                warn!(%err, "monthly spending rollover failed");
            }
        }
        info!(%identity, "session started");
        self.session = Session::LoggedIn(identity);
        self.login_error = None;
        self.reset_session_state();
    }

    fn on_signed_out(&mut self) {
        if self.session == Session::LoggedOut {
            return;
        }
        info!("session ended");
        self.session = Session::LoggedOut;
        self.login_error = None;
        self.reset_session_state();
    }

    fn reset_session_state(&mut self) {
        self.tab = Tab::Main;
        self.admin_target = None;
        self.last_receipt = None;
        self.history_filter = HistoryFilter::default();
    }
}

#[cfg(test)]
#[path = "app_tests.rs"]
mod app_tests;
