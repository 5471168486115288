//! Application state: the riddle store, the quiz session registry, and the
//! admin auth provider.
//!
//! The store is populated once at startup from the optional TOML bank plus
//! the built-in seeds (bank entries win on id collision since they land
//! first). Sessions live in a registry keyed by an opaque id so the HTTP
//! and WS surfaces share one code path; each session is single-owner state
//! mutated one operation at a time.

use std::collections::HashMap;
use std::sync::Arc;

use tokio::sync::RwLock;
use tracing::{info, instrument};

use crate::auth::AuthProvider;
use crate::config::load_bank_from_env;
use crate::domain::Locale;
use crate::quiz::QuizSession;
use crate::seeds::seed_riddles;
use crate::store::RiddleStore;

/// One active play-through plus the locale it was started under.
pub struct SessionSlot {
    pub quiz: QuizSession,
    pub locale: Locale,
}

#[derive(Clone)]
pub struct AppState {
    pub store: RiddleStore,
    pub sessions: Arc<RwLock<HashMap<String, SessionSlot>>>,
    pub auth: Arc<AuthProvider>,
}

impl AppState {
    /// Build state from env: load the bank, seed the store, init auth.
    #[instrument(level = "info", skip_all)]
    pub fn new() -> Self {
        let mut riddles = Vec::new();
        let mut bank_count = 0usize;
        if let Some(bank) = load_bank_from_env() {
            for cfg in bank.riddles {
                if let Some(r) = cfg.into_riddle() {
                    riddles.push(r);
                    bank_count += 1;
                }
            }
        }
        let seed_count = {
            let seeds = seed_riddles();
            let n = seeds.len();
            riddles.extend(seeds);
            n
        };
        info!(target: "riddle", bank = bank_count, seeds = seed_count, "Startup riddle inventory");

        Self {
            store: RiddleStore::from_riddles(riddles),
            sessions: Arc::new(RwLock::new(HashMap::new())),
            auth: Arc::new(AuthProvider::from_env()),
        }
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}
