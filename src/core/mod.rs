//! Core data model: descriptors, toolchains, the ledger, and errors.

pub mod descriptor;
pub mod errors;
pub mod ledger;
pub mod pom;
pub mod toolchain;
