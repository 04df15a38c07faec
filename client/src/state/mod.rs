//! Client-side state containers.
//!
//! SYSTEM CONTEXT
//! ==============
//! Plain data types mutated through `RwSignal`s provided as context by the
//! root component. Keeping them free of Leptos types lets native tests drive
//! every transition.

pub mod auth;
pub mod catalog;
pub mod learning;
pub mod progress;
pub mod ui;
