//! Error types for the generator harness.

use std::path::PathBuf;
use thiserror::Error;

/// Errors raised anywhere below the CLI boundary.
///
/// Every component either completes its contract fully or raises one of
/// these; recovery decisions live at the top-level boundary in the binary.
#[derive(Debug, Error)]
pub enum HarnessError {
    #[error("Generator module not found: {0}")]
    ModuleNotFound(PathBuf),

    #[error("Output directory unavailable: {path}: {source}")]
    OutputDirUnavailable {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Platform library manifest unavailable: {0}")]
    LibraryManifestUnavailable(String),

    #[error("Failed to load generator module {path}: {reason}")]
    ModuleLoadFailed { path: PathBuf, reason: String },

    #[error("Incompatible generator module {path}: built against core {plugin}, harness is {host}")]
    IncompatiblePlugin {
        path: PathBuf,
        plugin: String,
        host: String,
    },

    #[error("No generator implementations found in {0}")]
    NoGeneratorFound(PathBuf),

    #[error("Error executing generator: {0}")]
    GeneratorFailed(String),

    #[error("Additional text {path} unreadable: {reason}")]
    AdditionalTextUnreadable { path: PathBuf, reason: String },

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),
}
