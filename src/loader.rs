//! Plugin module loading and generator resolution.
//!
//! Loading is inherently dynamic, so it stays behind this narrow seam:
//! open the module, read its declaration, check the core version, run its
//! registration hook, and hand back opaque generator handles. Everything
//! past the declaration read is ordinary safe Rust.

use crate::error::HarnessError;
use crate::plugin::{
    Generator, GeneratorRegistrar, PluginDeclaration, CORE_VERSION, PLUGIN_DECLARATION_SYMBOL,
};
use libloading::Library;
use std::path::{Path, PathBuf};
use tracing::debug;

#[derive(Default)]
struct VecRegistrar {
    generators: Vec<Box<dyn Generator>>,
}

impl GeneratorRegistrar for VecRegistrar {
    fn register(&mut self, generator: Box<dyn Generator>) {
        self.generators.push(generator);
    }
}

/// A loaded generator module and the generators it registered.
///
/// Field order matters: generators must drop before the library that
/// holds their code.
pub struct LoadedModule {
    path: PathBuf,
    generators: Vec<Box<dyn Generator>>,
    _library: Library,
}

impl std::fmt::Debug for LoadedModule {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LoadedModule")
            .field("path", &self.path)
            .field("generators", &self.generators.len())
            .finish_non_exhaustive()
    }
}

impl LoadedModule {
    /// Open a compiled generator module and collect its registrations.
    ///
    /// Fatal when the module cannot be opened, carries no declaration
    /// symbol, or was built against a different harness version.
    pub fn load(path: &Path) -> Result<Self, HarnessError> {
        let library = unsafe { Library::new(path) }.map_err(|e| HarnessError::ModuleLoadFailed {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;

        let declaration: PluginDeclaration = unsafe {
            library
                .get::<*mut PluginDeclaration>(PLUGIN_DECLARATION_SYMBOL)
                .map_err(|e| HarnessError::ModuleLoadFailed {
                    path: path.to_path_buf(),
                    reason: format!("missing plugin declaration symbol: {}", e),
                })?
                .read()
        };

        if declaration.core_version != CORE_VERSION {
            return Err(HarnessError::IncompatiblePlugin {
                path: path.to_path_buf(),
                plugin: declaration.core_version.to_string(),
                host: CORE_VERSION.to_string(),
            });
        }

        let mut registrar = VecRegistrar::default();
        (declaration.register)(&mut registrar);
        debug!(
            module = %path.display(),
            generators = registrar.generators.len(),
            "module loaded"
        );

        Ok(Self {
            path: path.to_path_buf(),
            generators: registrar.generators,
            _library: library,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn generators(&self) -> &[Box<dyn Generator>] {
        &self.generators
    }

    pub fn generator_names(&self) -> Vec<String> {
        self.generators.iter().map(|g| g.name().to_string()).collect()
    }
}

/// Pick the generator to run from a module's registrations.
///
/// Zero registrations is fatal. More than one is tolerated: the first
/// registered wins and the returned warning names the module and the
/// chosen generator.
pub fn select_generator(
    names: &[String],
    module: &Path,
) -> Result<(usize, Option<String>), HarnessError> {
    match names.len() {
        0 => Err(HarnessError::NoGeneratorFound(module.to_path_buf())),
        1 => Ok((0, None)),
        _ => Ok((
            0,
            Some(format!(
                "Multiple generators found in {}, using the first one: {}",
                module.display(),
                names[0]
            )),
        )),
    }
}
