//! Command-line interface for blogflow.
//!
//! Runs the pipeline against an OpenAI-compatible service, or renders the
//! stage prompts without calling any model.

mod commands;

pub use commands::{parse_cli, run_with_cli, Cli, Commands, PromptsArgs, RequestArgs, RunArgs};
