//! CLI parse: clap types for genrun. No behavior; definitions only.

use clap::Parser;
use std::path::PathBuf;

/// genrun - run a compiled code generator module once
#[derive(Parser)]
#[command(name = "genrun")]
#[command(about = "Run a code generator plugin once and collect its artifacts")]
pub struct Cli {
    /// Path to the compiled generator module (cdylib)
    pub module: PathBuf,

    /// Directory artifacts are written to (created if absent)
    pub out_dir: PathBuf,

    /// Auxiliary text resource passed to the generator
    #[arg(short = 'T', long = "additional-text", value_name = "PATH")]
    pub additional_text: Option<PathBuf>,

    /// Build property (repeatable; exposed under the `build_property.` prefix)
    #[arg(short = 'P', long = "property", value_name = "KEY=VALUE")]
    pub properties: Vec<String>,

    /// Summary output format (text or json)
    #[arg(long, default_value = "text")]
    pub format: String,

    /// Configuration file path (overrides default config loading)
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Disable logging entirely
    #[arg(long, default_value = "false")]
    pub quiet: bool,

    /// Enable verbose logging (default: off)
    #[arg(long, default_value = "false")]
    pub verbose: bool,

    /// Log level (trace, debug, info, warn, error, off)
    #[arg(long)]
    pub log_level: Option<String>,

    /// Log format (json, text)
    #[arg(long)]
    pub log_format: Option<String>,

    /// Log output (stdout, stderr, file)
    #[arg(long)]
    pub log_output: Option<String>,

    /// Log file path (if output is "file")
    #[arg(long)]
    pub log_file: Option<PathBuf>,
}
