//! CLI route: run context for the single-shot pipeline. Validates the
//! environment up front, then dispatches to loader, driver, and writer.

use crate::cli::parse::Cli;
use crate::driver;
use crate::error::HarnessError;
use crate::host::LibraryManifest;
use crate::loader::{select_generator, LoadedModule};
use crate::properties::{parse_property_args, BuildProperties};
use crate::text::AdditionalText;
use crate::writer::write_artifacts;
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::path::PathBuf;
use tracing::{info, warn};

/// Operator-facing result of one run.
#[derive(Debug, Clone, Serialize)]
pub struct RunReport {
    pub generator: String,
    pub artifacts_written: usize,
    pub out_dir: PathBuf,
    pub diagnostics_reported: usize,
    pub started_at: DateTime<Utc>,
}

impl RunReport {
    /// Render the summary in the requested format. Unknown formats fall
    /// back to text.
    pub fn render(&self, format: &str) -> String {
        if format == "json" {
            serde_json::to_string_pretty(self)
                .unwrap_or_else(|e| format!("{{\"error\":\"{}\"}}", e))
        } else {
            format!(
                "Successfully generated {} file(s) to {}",
                self.artifacts_written,
                self.out_dir.display()
            )
        }
    }
}

/// Validated runtime context for one generator run.
#[derive(Debug)]
pub struct RunContext {
    module_path: PathBuf,
    out_dir: PathBuf,
    additional_texts: Vec<AdditionalText>,
    properties: BuildProperties,
    property_warnings: Vec<String>,
}

impl RunContext {
    /// Validate the environment and build the run context.
    ///
    /// The module path is checked first; the output directory is created
    /// here, before the module is even loaded, so a later generator
    /// failure leaves the directory present but empty.
    pub fn new(cli: &Cli) -> Result<Self, HarnessError> {
        let module_path = dunce::canonicalize(&cli.module)
            .map_err(|_| HarnessError::ModuleNotFound(cli.module.clone()))?;
        if !module_path.is_file() {
            return Err(HarnessError::ModuleNotFound(cli.module.clone()));
        }

        std::fs::create_dir_all(&cli.out_dir).map_err(|e| HarnessError::OutputDirUnavailable {
            path: cli.out_dir.clone(),
            source: e,
        })?;
        let out_dir = dunce::canonicalize(&cli.out_dir).map_err(|e| {
            HarnessError::OutputDirUnavailable {
                path: cli.out_dir.clone(),
                source: e,
            }
        })?;

        let (properties, property_warnings) = parse_property_args(&cli.properties);

        let additional_texts = cli
            .additional_text
            .iter()
            .map(|p| AdditionalText::new(dunce::canonicalize(p).unwrap_or_else(|_| p.clone())))
            .collect();

        Ok(Self {
            module_path,
            out_dir,
            additional_texts,
            properties,
            property_warnings,
        })
    }

    /// Execute the pipeline: load module, resolve generator, run the
    /// driver once, report diagnostics, write artifacts.
    ///
    /// Warnings and diagnostics go to stderr in emission order; the
    /// writer only runs after a successful driver result.
    pub fn execute(&self) -> Result<RunReport, HarnessError> {
        let started_at = Utc::now();

        for warning in &self.property_warnings {
            warn!("{}", warning);
            eprintln!("Warning: {}", warning);
        }

        let module = LoadedModule::load(&self.module_path)?;
        let names = module.generator_names();
        let (index, ambiguity_warning) = select_generator(&names, module.path())?;
        if let Some(warning) = ambiguity_warning {
            warn!("{}", warning);
            eprintln!("Warning: {}", warning);
        }
        let generator = module.generators()[index].as_ref();
        info!(generator = generator.name(), module = %self.module_path.display(), "generator resolved");

        let manifest = LibraryManifest::discover()?;
        let result = driver::execute(
            generator,
            &self.properties,
            &self.additional_texts,
            &manifest,
        )?;

        for diagnostic in &result.diagnostics {
            eprintln!("{}", diagnostic);
        }

        let artifacts_written = write_artifacts(&self.out_dir, &result.artifacts, generator.name())?;

        Ok(RunReport {
            generator: generator.name().to_string(),
            artifacts_written,
            out_dir: self.out_dir.clone(),
            diagnostics_reported: result.diagnostics.len(),
            started_at,
        })
    }

    pub fn out_dir(&self) -> &PathBuf {
        &self.out_dir
    }

    pub fn properties(&self) -> &BuildProperties {
        &self.properties
    }

    pub fn property_warnings(&self) -> &[String] {
        &self.property_warnings
    }
}
