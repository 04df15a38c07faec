//! Auth-session state for the current browser user.
//!
//! SYSTEM CONTEXT
//! ==============
//! Used by route guards and user-aware components to coordinate login
//! redirects and identity-dependent rendering. `ready` starts false and flips
//! exactly once, after the initial session check or the first auth event,
//! whichever comes first. Until then guards render nothing.
//!
//! The authenticated user is mirrored to storage under [`USER_CACHE_KEY`]; the
//! cache carries learned-topic progress across reloads and is never trusted
//! as proof of authentication.

#[cfg(test)]
#[path = "auth_test.rs"]
mod auth_test;

use serde::{Deserialize, Serialize};

use super::progress::Progress;
use crate::net::auth_provider::AuthProvider;
use crate::net::types::{AuthChange, AuthSession, Profile};
use crate::util::storage::{KeyValueStore, load_json, save_json};

/// Storage key for the cached session user.
pub const USER_CACHE_KEY: &str = "user";

const FALLBACK_DISPLAY_NAME: &str = "User";

// =============================================================================
// SESSION USER
// =============================================================================

/// Authenticated identity held client-side for the browser session.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SessionUser {
    pub id: String,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub full_name: Option<String>,
    #[serde(default)]
    pub student_id: Option<String>,
    #[serde(default)]
    pub progress: Progress,
}

impl SessionUser {
    pub fn from_session(session: &AuthSession, progress: Progress) -> Self {
        Self {
            id: session.user.id.clone(),
            email: session.user.email.clone(),
            full_name: session.user.metadata_full_name(),
            student_id: None,
            progress,
        }
    }

    /// Overlay profile fields that are present.
    #[must_use]
    pub fn with_profile(mut self, profile: Option<&Profile>) -> Self {
        if let Some(profile) = profile {
            if let Some(name) = profile.full_name.as_deref().map(str::trim).filter(|n| !n.is_empty()) {
                self.full_name = Some(name.to_owned());
            }
            if profile.student_id.is_some() {
                self.student_id.clone_from(&profile.student_id);
            }
        }
        self
    }

    /// Full name, or a generic label. Never the email address.
    pub fn display_name(&self) -> &str {
        self.full_name
            .as_deref()
            .map(str::trim)
            .filter(|n| !n.is_empty())
            .unwrap_or(FALLBACK_DISPLAY_NAME)
    }
}

/// Progress stored in the cached user, tolerating foreign or corrupt shapes.
pub fn cached_progress<S: KeyValueStore + ?Sized>(cache: &S) -> Progress {
    cache
        .get(USER_CACHE_KEY)
        .and_then(|raw| serde_json::from_str::<serde_json::Value>(&raw).ok())
        .and_then(|value| value.get("progress").cloned())
        .and_then(|progress| serde_json::from_value(progress).ok())
        .unwrap_or_default()
}

// =============================================================================
// AUTH STATE
// =============================================================================

/// Which side of the auth boundary a route lives on.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RouteKind {
    /// Requires a signed-in user (home, learning, progress).
    Protected,
    /// Only for signed-out users (login, signup).
    Public,
}

/// Guard decision for a route.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Guard {
    /// Session check still pending; render nothing.
    Wait,
    Render,
    Redirect(&'static str),
}

/// Issues ordered tickets for auth changes whose application waits on async
/// work. Only the newest ticket may be applied.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ChangeSequence {
    latest: u64,
}

impl ChangeSequence {
    pub fn next(&mut self) -> u64 {
        self.latest += 1;
        self.latest
    }

    pub fn is_current(&self, ticket: u64) -> bool {
        ticket == self.latest
    }
}

/// Authentication state tracking the current user and bootstrap status.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct AuthState {
    pub user: Option<SessionUser>,
    pub ready: bool,
}

impl AuthState {
    /// Flip `ready` to true. Returns whether this call made the transition.
    pub fn mark_ready(&mut self) -> bool {
        let transitioned = !self.ready;
        self.ready = true;
        transitioned
    }

    pub fn is_authenticated(&self) -> bool {
        self.user.is_some()
    }

    pub fn display_name(&self) -> Option<&str> {
        self.user.as_ref().map(SessionUser::display_name)
    }

    pub fn guard(&self, kind: RouteKind) -> Guard {
        if !self.ready {
            return Guard::Wait;
        }
        match (kind, self.is_authenticated()) {
            (RouteKind::Protected, false) => Guard::Redirect("/login"),
            (RouteKind::Public, true) => Guard::Redirect("/"),
            _ => Guard::Render,
        }
    }

    /// Apply the result of the initial session check.
    ///
    /// A listener event may already have signed the same user in with profile
    /// data; that richer record is kept.
    pub fn complete_restore(&mut self, user: Option<SessionUser>) {
        if let Some(user) = user {
            let already_known = self.user.as_ref().is_some_and(|current| current.id == user.id);
            if !already_known {
                self.user = Some(user);
            }
        }
        self.mark_ready();
    }

    /// Handle an auth listener event.
    pub fn apply_change<S: KeyValueStore + ?Sized>(&mut self, change: &AuthChange, profile: Option<&Profile>, cache: &S) {
        match change {
            AuthChange::SignedIn(session) => {
                let progress = cached_progress(cache);
                let user = SessionUser::from_session(session, progress).with_profile(profile);
                save_json(cache, USER_CACHE_KEY, &user);
                self.user = Some(user);
            }
            AuthChange::SignedOut => self.sign_out(cache),
        }
        self.mark_ready();
    }

    /// Apply `change` unless a newer change was issued after `ticket`.
    /// Returns whether it was applied.
    pub fn apply_change_if_current<S: KeyValueStore + ?Sized>(
        &mut self,
        sequence: &ChangeSequence,
        ticket: u64,
        change: &AuthChange,
        profile: Option<&Profile>,
        cache: &S,
    ) -> bool {
        if !sequence.is_current(ticket) {
            return false;
        }
        self.apply_change(change, profile, cache);
        true
    }

    /// Clear the local user and its cached copy.
    pub fn sign_out<S: KeyValueStore + ?Sized>(&mut self, cache: &S) {
        self.user = None;
        cache.remove(USER_CACHE_KEY);
    }

    /// Record a learned topic for the signed-in user and refresh the cache.
    /// Returns `false` when signed out or already recorded.
    pub fn mark_learned<S: KeyValueStore + ?Sized>(&mut self, subject: &str, topic: &str, cache: &S) -> bool {
        let Some(user) = self.user.as_mut() else {
            return false;
        };
        if !user.progress.mark_learned(subject, topic) {
            return false;
        }
        save_json(cache, USER_CACHE_KEY, user);
        true
    }
}

/// One-shot session check run at startup.
///
/// Resolves the provider session and, when one exists, builds the session
/// user (carrying cached progress, and cached profile fields for the same
/// id) and refreshes the cache. Errors read as signed out.
pub async fn restore_session<P, S>(provider: &P, cache: &S) -> Option<SessionUser>
where
    P: AuthProvider,
    S: KeyValueStore + ?Sized,
{
    let session = match provider.get_session().await {
        Ok(session) => session?,
        Err(_e) => {
            #[cfg(feature = "hydrate")]
            log::warn!("session restore failed: {_e}");
            return None;
        }
    };
    let mut user = SessionUser::from_session(&session, cached_progress(cache));
    if let Some(cached) = load_json::<SessionUser, S>(cache, USER_CACHE_KEY).filter(|c| c.id == user.id) {
        user.full_name = user.full_name.or(cached.full_name);
        user.student_id = user.student_id.or(cached.student_id);
    }
    save_json(cache, USER_CACHE_KEY, &user);
    Some(user)
}
