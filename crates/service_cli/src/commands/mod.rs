//! CLI command implementations
//!
//! Each submodule implements a specific CLI command.

pub mod chain;
pub mod check;
pub mod greeks;
pub mod iv;
