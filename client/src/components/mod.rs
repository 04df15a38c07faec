//! Reusable UI components.
//!
//! SYSTEM CONTEXT
//! ==============
//! Route guards, the navigation shell, and presentation helpers shared by
//! pages.

pub mod guards;
pub mod markdown;
pub mod navigation;
