//! Integration tests for the genrun generator harness

mod driver_execution;
mod run_pipeline;
mod support;
