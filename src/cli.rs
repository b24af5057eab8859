//! CLI domain: parse, route, and output mapping only.
//! No generator orchestration beyond dispatching the single-run pipeline.

mod output;
mod parse;
mod route;

pub use output::map_error;
pub use parse::Cli;
pub use route::{RunContext, RunReport};
