//! Authentication collaborator

use std::sync::{PoisonError, RwLock};

/// Supplies the bearer credential attached to every request
pub trait TokenProvider: Send + Sync {
    /// Currently available token, if any
    fn current_token(&self) -> Option<String>;
}

/// Token held in memory, replaceable when the session refreshes it
#[derive(Debug, Default)]
pub struct SharedToken {
    token: RwLock<Option<String>>,
}

impl SharedToken {
    pub fn new(token: Option<String>) -> Self {
        Self {
            token: RwLock::new(token),
        }
    }

    pub fn replace(&self, token: Option<String>) {
        *self.token.write().unwrap_or_else(PoisonError::into_inner) = token;
    }
}

impl TokenProvider for SharedToken {
    fn current_token(&self) -> Option<String> {
        self.token
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
            .filter(|token| !token.is_empty())
    }
}
