//! CLI output: error mapping from harness errors to the stable stderr
//! surface.

use crate::error::HarnessError;

/// Map harness errors to a string for CLI output.
/// Keeps the route thin; extend with stable categories if needed.
pub fn map_error(e: &HarnessError) -> String {
    e.to_string()
}
