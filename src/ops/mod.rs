//! High-level operations driven by the CLI.

pub mod classify;
pub mod discover;
pub mod dispatch;
pub mod switch;
pub mod validate;
