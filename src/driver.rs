//! Generator execution driver: builds the host substrate, invokes the
//! generator's single-pass protocol exactly once, and diffs the updated
//! compilation against the base to isolate what the generator added.
//!
//! The driver performs no filesystem writes and never terminates the
//! process; generator failures propagate whole to the caller, with no
//! partial artifact list.

use crate::error::HarnessError;
use crate::host::{DocumentId, HostCompilation, LibraryManifest};
use crate::plugin::{Diagnostic, Generator, GeneratorContext};
use crate::properties::BuildProperties;
use crate::text::AdditionalText;
use std::collections::HashSet;
use tracing::{debug, info};

/// A newly produced text document with an optional origin name.
#[derive(Debug, Clone)]
pub struct GeneratedArtifact {
    pub name: Option<String>,
    pub content: String,
}

/// Everything a single generator run yields.
#[derive(Debug, Clone)]
pub struct RunResult {
    /// Artifacts in the order the generator produced them.
    pub artifacts: Vec<GeneratedArtifact>,
    /// Compilation-attached diagnostics first, then generator-reported
    /// ones. Order within each group is preserved as emitted.
    pub diagnostics: Vec<Diagnostic>,
}

/// Run one generator against the minimal host compilation.
pub fn execute(
    generator: &dyn Generator,
    properties: &BuildProperties,
    additional_texts: &[AdditionalText],
    manifest: &LibraryManifest,
) -> Result<RunResult, HarnessError> {
    let base = HostCompilation::base(manifest);
    debug!(
        references = base.references().len(),
        generator = generator.name(),
        "host compilation built"
    );

    let mut ctx = GeneratorContext::new(properties, additional_texts);
    generator
        .execute(&mut ctx)
        .map_err(|e| HarnessError::GeneratorFailed(e.to_string()))?;
    let (sources, generator_diagnostics) = ctx.into_outputs();

    // Fold the generator's sources into the updated unit, in production
    // order. Notes raised here are the compilation-attached group.
    let mut updated = base.clone();
    let mut resolution_diagnostics: Vec<Diagnostic> = Vec::new();
    for source in sources {
        let name = normalize_name(&source.name);
        if name.is_none() {
            resolution_diagnostics.push(Diagnostic::info(format!(
                "generator '{}' produced a source with no hint name; a file name will be synthesized",
                generator.name()
            )));
        }
        updated.add_document(name, source.content);
    }

    // Artifacts are the set difference updated - base, compared by
    // document identity so name reuse never collapses two outputs.
    let base_ids: HashSet<DocumentId> = base.documents().iter().map(|d| d.id()).collect();
    let artifacts: Vec<GeneratedArtifact> = updated
        .documents()
        .iter()
        .filter(|d| !base_ids.contains(&d.id()))
        .map(|d| GeneratedArtifact {
            name: d.name().map(str::to_string),
            content: d.content().to_string(),
        })
        .collect();

    let mut diagnostics = resolution_diagnostics;
    diagnostics.extend(generator_diagnostics);

    info!(
        generator = generator.name(),
        artifacts = artifacts.len(),
        diagnostics = diagnostics.len(),
        "generator run complete"
    );

    Ok(RunResult {
        artifacts,
        diagnostics,
    })
}

/// Empty and whitespace-only hint names count as absent.
fn normalize_name(name: &str) -> Option<String> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}
