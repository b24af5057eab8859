//! Shared fixtures for integration tests: in-process generators that
//! stand in for compiled plugin modules, and a fixed library manifest so
//! host construction never touches the real platform.

use genrun::host::LibraryManifest;
use genrun::plugin::{Diagnostic, Generator, GeneratorContext, GeneratorError};
use std::path::PathBuf;

pub fn fake_manifest() -> LibraryManifest {
    LibraryManifest::from_paths(vec![
        PathBuf::from("/fake/libstd.so"),
        PathBuf::from("/fake/libcore.so"),
    ])
}

/// Emits `hello.g.txt` from the `greeting` build property; warns when the
/// property is absent.
pub struct HelloGenerator;

impl Generator for HelloGenerator {
    fn name(&self) -> &str {
        "HelloGenerator"
    }

    fn execute(&self, ctx: &mut GeneratorContext) -> Result<(), GeneratorError> {
        match ctx.option("build_property.greeting") {
            Some(greeting) => {
                let greeting = greeting.to_string();
                ctx.add_source("hello.g.txt", greeting);
            }
            None => ctx.report(Diagnostic::warning("no greeting property supplied")),
        }
        Ok(())
    }
}

/// Always fails during execution, after reporting one diagnostic that
/// must never survive the failure.
pub struct FailingGenerator;

impl Generator for FailingGenerator {
    fn name(&self) -> &str {
        "FailingGenerator"
    }

    fn execute(&self, ctx: &mut GeneratorContext) -> Result<(), GeneratorError> {
        ctx.report(Diagnostic::info("about to fail"));
        Err("This generator always fails".into())
    }
}

/// Produces nothing but diagnostics.
pub struct SilentGenerator;

impl Generator for SilentGenerator {
    fn name(&self) -> &str {
        "SilentGenerator"
    }

    fn execute(&self, ctx: &mut GeneratorContext) -> Result<(), GeneratorError> {
        ctx.report(Diagnostic::info("nothing to do"));
        Ok(())
    }
}

/// Emits two artifacts with the same hint name but distinct content.
pub struct DuplicateNameGenerator;

impl Generator for DuplicateNameGenerator {
    fn name(&self) -> &str {
        "DuplicateNameGenerator"
    }

    fn execute(&self, ctx: &mut GeneratorContext) -> Result<(), GeneratorError> {
        ctx.add_source("dup.g.txt", "one");
        ctx.add_source("dup.g.txt", "two");
        Ok(())
    }
}

/// Emits two nameless artifacts, then a diagnostic of its own.
pub struct NamelessGenerator;

impl Generator for NamelessGenerator {
    fn name(&self) -> &str {
        "NamelessGenerator"
    }

    fn execute(&self, ctx: &mut GeneratorContext) -> Result<(), GeneratorError> {
        ctx.add_source("", "alpha");
        ctx.add_source("   ", "beta");
        ctx.report(Diagnostic::info("emitted two nameless sources"));
        Ok(())
    }
}

/// Copies every additional text into an artifact named after its file.
pub struct AuxCopyGenerator;

impl Generator for AuxCopyGenerator {
    fn name(&self) -> &str {
        "AuxCopyGenerator"
    }

    fn execute(&self, ctx: &mut GeneratorContext) -> Result<(), GeneratorError> {
        for text in ctx.additional_texts().to_vec() {
            let name = text
                .path()
                .file_name()
                .map(|n| format!("{}.g.txt", n.to_string_lossy()))
                .unwrap_or_default();
            let content = text.read()?;
            ctx.add_source(name, content);
        }
        Ok(())
    }
}
