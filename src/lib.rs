//! Genrun: Single-Shot Code Generator Harness
//!
//! Loads a compiled generator module, runs its single-pass protocol once
//! against a minimal host compilation, and persists every artifact it
//! produces while surfacing diagnostics to the operator.

pub mod cli;
pub mod config;
pub mod driver;
pub mod error;
pub mod host;
pub mod loader;
pub mod logging;
pub mod plugin;
pub mod properties;
pub mod text;
pub mod writer;
