//! Demo generator plugin: emits a greeting file from a build property.
//!
//! Build as a cdylib and hand the resulting module to the harness:
//!
//! ```text
//! genrun target/debug/libhello_generator.so out/ -P greeting=hi
//! ```

use genrun::plugin::{Diagnostic, Generator, GeneratorContext, GeneratorError, GeneratorRegistrar};

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
            None => ctx.report(Diagnostic::warning(
                "no `greeting` build property supplied; nothing to generate",
            )),
        }

        // Echo any auxiliary text resource alongside the greeting.
        for text in ctx.additional_texts().to_vec() {
            let content = text.read()?;
            ctx.add_source("aux_echo.g.txt", content);
        }

        Ok(())
    }
}

fn register(registrar: &mut dyn GeneratorRegistrar) {
    registrar.register(Box::new(HelloGenerator));
}

genrun::export_generators!(register);
