//! Auth provider interface consumed by the session bootstrap.
//!
//! DESIGN
//! ======
//! Pages and state never talk to a concrete backend-as-a-service. They see
//! two operations: resolve the current session, and subscribe to changes.
//! A subscription is an RAII handle; dropping it unregisters the callback,
//! so a component can move it into `on_cleanup` and forget about it.

#[cfg(test)]
#[path = "auth_provider_test.rs"]
mod auth_provider_test;

use std::future::Future;
use std::sync::{Arc, Mutex, PoisonError, Weak};

use super::types::{AuthChange, AuthSession};

/// Errors surfaced by auth provider calls.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum AuthError {
    #[error("Authentication is not configured. Set SUPABASE_URL and SUPABASE_ANON_KEY.")]
    NotConfigured,
    #[error("{0}")]
    Rejected(String),
    #[error("network error: {0}")]
    Network(String),
    #[error("unexpected auth response: {0}")]
    Decode(String),
    #[error("authentication is only available in the browser")]
    Unavailable,
}

/// Session source plus change notifications.
pub trait AuthProvider {
    /// Resolve the current session, if any.
    fn get_session(&self) -> impl Future<Output = Result<Option<AuthSession>, AuthError>>;

    /// Register `callback` for every subsequent auth change.
    fn on_change<F>(&self, callback: F) -> Subscription
    where
        F: Fn(&AuthChange) + Send + Sync + 'static;
}

// =============================================================================
// LISTENER REGISTRY
// =============================================================================

type Callback = Arc<dyn Fn(&AuthChange) + Send + Sync>;

#[derive(Default)]
struct ListenerTable {
    next_id: u64,
    entries: Vec<(u64, Callback)>,
}

/// Callback registry shared by a provider and its subscriptions.
#[derive(Clone, Default)]
pub struct AuthListeners {
    table: Arc<Mutex<ListenerTable>>,
}

impl AuthListeners {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn subscribe<F>(&self, callback: F) -> Subscription
    where
        F: Fn(&AuthChange) + Send + Sync + 'static,
    {
        let mut table = self.table.lock().unwrap_or_else(PoisonError::into_inner);
        let id = table.next_id;
        table.next_id += 1;
        table.entries.push((id, Arc::new(callback)));
        Subscription { id, table: Arc::downgrade(&self.table) }
    }

    /// Invoke every live callback with `change`.
    pub fn notify(&self, change: &AuthChange) {
        // Snapshot first so callbacks may subscribe or unsubscribe re-entrantly.
        let callbacks: Vec<Callback> = self
            .table
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .entries
            .iter()
            .map(|(_, cb)| Arc::clone(cb))
            .collect();
        for callback in callbacks {
            callback(change);
        }
    }

    pub fn len(&self) -> usize {
        self.table.lock().unwrap_or_else(PoisonError::into_inner).entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Handle to a registered callback. Dropping it unsubscribes.
#[must_use = "dropping a Subscription unsubscribes immediately"]
pub struct Subscription {
    id: u64,
    table: Weak<Mutex<ListenerTable>>,
}

impl Subscription {
    /// Explicitly unsubscribe. Equivalent to dropping the handle.
    pub fn unsubscribe(self) {}
}

impl Drop for Subscription {
    fn drop(&mut self) {
        if let Some(table) = self.table.upgrade() {
            let mut table = table.lock().unwrap_or_else(PoisonError::into_inner);
            table.entries.retain(|(id, _)| *id != self.id);
        }
    }
}
