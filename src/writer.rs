//! Artifact writer: serializes each generated artifact to a file under
//! the output directory.
//!
//! Only the final segment of an artifact's origin name is used, so a
//! crafted name cannot escape the output directory. Two artifacts
//! resolving to the same final name overwrite silently: last write wins.

use crate::driver::GeneratedArtifact;
use crate::error::HarnessError;
use std::path::Path;
use tracing::debug;

/// Write every artifact into `out_dir` and return the count written.
///
/// Precondition: `out_dir` exists; the CLI layer creates it during
/// validation, before the generator runs.
pub fn write_artifacts(
    out_dir: &Path,
    artifacts: &[GeneratedArtifact],
    generator_name: &str,
) -> Result<usize, HarnessError> {
    for (ordinal, artifact) in artifacts.iter().enumerate() {
        let file_name = usable_file_name(artifact.name.as_deref())
            .unwrap_or_else(|| synthesized_name(generator_name, ordinal, &artifact.content));
        let target = out_dir.join(&file_name);
        std::fs::write(&target, &artifact.content)?;
        debug!(path = %target.display(), "artifact written");
    }
    Ok(artifacts.len())
}

/// Final path segment of the origin name, or `None` when no usable name
/// exists (absent, blank, or a name with no final segment such as `..`).
fn usable_file_name(name: Option<&str>) -> Option<String> {
    let name = name?.trim();
    if name.is_empty() {
        return None;
    }
    Path::new(name)
        .file_name()
        .map(|segment| segment.to_string_lossy().into_owned())
}

/// Deterministically unique name for a nameless artifact: generator name,
/// position in the run, and a short content fingerprint.
fn synthesized_name(generator_name: &str, ordinal: usize, content: &str) -> String {
    let digest = hex::encode(blake3::hash(content.as_bytes()).as_bytes());
    format!("{}_{:02}_{}.g.txt", generator_name, ordinal, &digest[..8])
}
