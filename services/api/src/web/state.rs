//! services/api/src/web/state.rs
//!
//! Defines the application's shared state.

use crate::config::Config;
use crate::token::TokenService;
use std::sync::Arc;
use tutorhub_core::ports::DocumentStore;

//=========================================================================================
// AppState (Shared Across All Requests)
//=========================================================================================

/// The shared application state, created once at startup and passed to all handlers.
/// The store is injected so handlers can run against any `DocumentStore`.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn DocumentStore>,
    pub config: Arc<Config>,
    pub tokens: Arc<TokenService>,
}

impl AppState {
    pub fn new(store: Arc<dyn DocumentStore>, config: Arc<Config>) -> Self {
        let tokens = Arc::new(TokenService::new(&config.token_secret));
        Self {
            store,
            config,
            tokens,
        }
    }
}
