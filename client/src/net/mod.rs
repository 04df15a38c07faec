//! Networking modules for the auth provider and the explanation backend.
//!
//! SYSTEM CONTEXT
//! ==============
//! `auth_provider` defines the session interface, `supabase` implements it,
//! `api` calls the explain endpoint, and `types` defines the wire schema.

pub mod api;
pub mod auth_provider;
pub mod supabase;
pub mod types;
