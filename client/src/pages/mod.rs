//! Page modules for route-level screens.
//!
//! ARCHITECTURE
//! ============
//! Each page owns route-scoped orchestration and delegates rendering details
//! to `components`. Access control lives in the route guards, not in pages.

pub mod home;
pub mod learning;
pub mod login;
pub mod progress;
pub mod signup;
