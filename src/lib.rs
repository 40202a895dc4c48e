//! Flotilla - a batch build orchestrator for fleets of Maven projects.
//!
//! This crate provides the core library functionality for Flotilla,
//! including project discovery, descriptor validation, toolchain grouping,
//! and group-by-group build dispatch.

pub mod core;
pub mod ops;
pub mod util;

pub use crate::core::descriptor::ProjectDescriptor;
pub use crate::core::errors::RunError;
pub use crate::core::ledger::{ProjectStatus, ResultLedger};
pub use crate::core::toolchain::Jdk;
