//! Generator capability surface: the single-pass protocol plugins
//! implement, the execution context the driver hands them, and the ABI a
//! compiled module exports so the harness can find its generators.

use crate::properties::BuildProperties;
use crate::text::AdditionalText;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Harness version a plugin module was compiled against. Checked by the
/// loader before any plugin code runs; trait objects carry no other ABI
/// guard.
pub const CORE_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Exported symbol name of a module's [`PluginDeclaration`].
pub const PLUGIN_DECLARATION_SYMBOL: &[u8] = b"GENRUN_PLUGIN_DECLARATION";

/// Error type crossing the plugin boundary.
pub type GeneratorError = Box<dyn std::error::Error + Send + Sync>;

/// Diagnostic severity. Observational only: no severity aborts the run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Hidden,
    Info,
    Warning,
    Error,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Severity::Hidden => "hidden",
            Severity::Info => "info",
            Severity::Warning => "warning",
            Severity::Error => "error",
        };
        write!(f, "{}", label)
    }
}

/// A structured message emitted by a generator or by the driver while
/// resolving generator output.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Diagnostic {
    pub severity: Severity,
    pub message: String,
    pub location: Option<String>,
}

impl Diagnostic {
    pub fn new(severity: Severity, message: impl Into<String>) -> Self {
        Self {
            severity,
            message: message.into(),
            location: None,
        }
    }

    pub fn info(message: impl Into<String>) -> Self {
        Self::new(Severity::Info, message)
    }

    pub fn warning(message: impl Into<String>) -> Self {
        Self::new(Severity::Warning, message)
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self::new(Severity::Error, message)
    }

    pub fn with_location(mut self, location: impl Into<String>) -> Self {
        self.location = Some(location.into());
        self
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.severity, self.message)?;
        if let Some(ref location) = self.location {
            write!(f, " [{}]", location)?;
        }
        Ok(())
    }
}

/// The single-pass generator protocol.
///
/// A generator is invoked exactly once per run. It may add zero or more
/// sources and report zero or more diagnostics through the context; an
/// `Err` fails the whole run and is never swallowed by the driver.
pub trait Generator {
    /// Generator name, used for reporting and synthesized artifact names.
    fn name(&self) -> &str;

    fn execute(&self, ctx: &mut GeneratorContext) -> Result<(), GeneratorError>;
}

/// A source the generator produced, before it becomes a document in the
/// updated compilation.
#[derive(Debug, Clone)]
pub(crate) struct AddedSource {
    pub name: String,
    pub content: String,
}

/// Execution context handed to the generator for its single pass.
///
/// Exposes the namespaced build properties and the auxiliary text
/// sequence, and collects the generator's outputs.
pub struct GeneratorContext<'a> {
    properties: &'a BuildProperties,
    additional_texts: &'a [AdditionalText],
    added_sources: Vec<AddedSource>,
    diagnostics: Vec<Diagnostic>,
}

impl<'a> GeneratorContext<'a> {
    pub(crate) fn new(
        properties: &'a BuildProperties,
        additional_texts: &'a [AdditionalText],
    ) -> Self {
        Self {
            properties,
            additional_texts,
            added_sources: Vec::new(),
            diagnostics: Vec::new(),
        }
    }

    /// Case-insensitive build property lookup by full key, e.g.
    /// `build_property.greeting`.
    pub fn option(&self, key: &str) -> Option<&str> {
        self.properties.get(key)
    }

    pub fn additional_texts(&self) -> &[AdditionalText] {
        self.additional_texts
    }

    /// Register a produced source. An empty name is allowed; the artifact
    /// writer synthesizes a file name for it.
    pub fn add_source(&mut self, name: impl Into<String>, content: impl Into<String>) {
        self.added_sources.push(AddedSource {
            name: name.into(),
            content: content.into(),
        });
    }

    /// Attach a diagnostic to the run.
    pub fn report(&mut self, diagnostic: Diagnostic) {
        self.diagnostics.push(diagnostic);
    }

    pub(crate) fn into_outputs(self) -> (Vec<AddedSource>, Vec<Diagnostic>) {
        (self.added_sources, self.diagnostics)
    }
}

/// Registration sink a plugin's `register` function fills in. One module
/// may register any number of generators; resolution picks exactly one.
pub trait GeneratorRegistrar {
    fn register(&mut self, generator: Box<dyn Generator>);
}

/// Static declaration a plugin module exports under
/// [`PLUGIN_DECLARATION_SYMBOL`]. Read by the loader before `register`
/// runs.
#[derive(Copy, Clone)]
pub struct PluginDeclaration {
    pub core_version: &'static str,
    pub register: fn(&mut dyn GeneratorRegistrar),
}

/// Emit the plugin declaration static for a generator module.
///
/// ```ignore
/// fn register(registrar: &mut dyn genrun::plugin::GeneratorRegistrar) {
///     registrar.register(Box::new(MyGenerator));
/// }
/// genrun::export_generators!(register);
/// ```
#[macro_export]
macro_rules! export_generators {
    ($register:expr) => {
        #[no_mangle]
        pub static GENRUN_PLUGIN_DECLARATION: $crate::plugin::PluginDeclaration =
            $crate::plugin::PluginDeclaration {
                core_version: $crate::plugin::CORE_VERSION,
                register: $register,
            };
    };
}
