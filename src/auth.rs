//! Process-wide admin session state.
//!
//! One provider owns the signed-in flag behind a `tokio::sync::watch`
//! channel. Observers call [`AuthProvider::subscribe`] once and hold the
//! receiver; dropping it is the teardown. Admin route handlers gate each
//! request through [`AuthProvider::authorize`] against the configured token.
//!
//! This is session-state plumbing only; the actual identity provider is an
//! external service and out of scope.

use tokio::sync::watch;
use tracing::{info, warn};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct AdminSession {
  pub signed_in: bool,
}

pub struct AuthProvider {
  token: Option<String>,
  tx: watch::Sender<AdminSession>,
}

impl AuthProvider {
  pub fn new(token: Option<String>) -> Self {
    let (tx, _rx) = watch::channel(AdminSession::default());
    Self { token, tx }
  }

  /// Read ADMIN_TOKEN; without it the admin surface stays open (dev mode).
  pub fn from_env() -> Self {
    let token = std::env::var("ADMIN_TOKEN").ok().filter(|t| !t.is_empty());
    if token.is_none() {
      warn!(target: "bilmece_backend", "ADMIN_TOKEN not set; admin endpoints are unprotected.");
    }
    Self::new(token)
  }

  /// Hand out an observer subscription. Dropping the receiver unsubscribes.
  pub fn subscribe(&self) -> watch::Receiver<AdminSession> {
    self.tx.subscribe()
  }

  /// Flip the shared session to signed-in if the token matches.
  pub fn login(&self, token: &str) -> bool {
    let ok = match &self.token {
      Some(expected) => token == expected,
      None => true,
    };
    if ok {
      self.tx.send_replace(AdminSession { signed_in: true });
      info!(target: "bilmece_backend", "Admin session opened");
    } else {
      warn!(target: "bilmece_backend", "Admin login rejected");
    }
    ok
  }

  pub fn logout(&self) {
    self.tx.send_replace(AdminSession::default());
    info!(target: "bilmece_backend", "Admin session closed");
  }

  pub fn session(&self) -> AdminSession {
    *self.tx.borrow()
  }

  /// Per-request gate for admin mutations: bearer must match the configured
  /// token. With no token configured everything passes.
  pub fn authorize(&self, bearer: Option<&str>) -> bool {
    match &self.token {
      None => true,
      Some(expected) => bearer == Some(expected.as_str()),
    }
  }
}
