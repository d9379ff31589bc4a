//! # Relkit
//!
//! Release automation driven by a small declarative command grammar.
//!
//! A command describes its positional surface with a pattern string like
//! `"<release> <platform> <branch?>"`, registers named arguments and boolean
//! flags against a per-command registry, and supplies up to three async hooks
//! (`before`, `main`, `after`). Each invocation parses the token stream in
//! three ordered phases (arguments, flags, positional parameters) and then
//! runs the hooks sequentially over a shared execution context.
//!
//! ## Usage
//!
//! ```bash
//! relkit release github               # patch release from the default branch
//! relkit release github main -l minor # minor release from main
//! relkit release gitlab --dry-run     # print the plan, touch nothing
//! relkit init                         # write a starter .relkit.toml
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs)]
#![warn(rust_2018_idioms)]

// Core modules
pub mod cli;
pub mod commands;
pub mod config;
pub mod context;
pub mod error;
pub mod grammar;
pub mod pipeline;

// Re-export main types for public API
pub use config::AppConfig;
pub use context::ExecutionContext;
pub use error::{ConfigError, HookError, ParseError, RelkitError, Result};
pub use grammar::{
    ArgOptions, Extraction, FlagOptions, ParamOptions, Pattern, Registry, Value, ValueType,
    extract,
};
pub use pipeline::{Command, HookResult, PipelineOutcome, Stage, run_pipeline};
