//! Execution context threaded through the pipeline stages.
//!
//! A context is created fresh for each invocation, filled by the parsing
//! stage, handed to `before`, `main`, and `after` in turn, and dropped when
//! the pipeline finishes. Hooks communicate through `scratch`; `config` is
//! the read-only external configuration.

use crate::config::AppConfig;
use crate::grammar::{Extraction, Value};
use std::collections::HashMap;

/// Per-invocation state shared by the pipeline stages
#[derive(Debug)]
pub struct ExecutionContext {
    /// Raw tokens after the command name; emptied once extraction consumes them
    pub raw_tokens: Vec<String>,
    /// Name of the command being executed
    pub command_name: String,
    /// Parsed named arguments, keyed by long name; only present keys
    pub arguments: HashMap<String, Value>,
    /// Parsed flags; every registered flag has an entry
    pub flags: HashMap<String, bool>,
    /// Parsed positional parameters; only present keys
    pub parameters: HashMap<String, Value>,
    /// External configuration, read-only for hooks
    pub config: AppConfig,
    /// Scratch space for hooks to pass data between stages
    pub scratch: HashMap<String, serde_json::Value>,
}

impl ExecutionContext {
    /// Create a fresh context for one invocation
    pub fn new(command_name: impl Into<String>, raw_tokens: Vec<String>, config: AppConfig) -> Self {
        Self {
            raw_tokens,
            command_name: command_name.into(),
            arguments: HashMap::new(),
            flags: HashMap::new(),
            parameters: HashMap::new(),
            config,
            scratch: HashMap::new(),
        }
    }

    /// Merge an extraction result; the raw stream is now fully consumed
    pub fn absorb(&mut self, extraction: Extraction) {
        self.arguments = extraction.arguments;
        self.flags = extraction.flags;
        self.parameters = extraction.parameters;
        self.raw_tokens.clear();
    }

    /// Parsed argument by long name
    pub fn argument(&self, name: &str) -> Option<&Value> {
        self.arguments.get(name)
    }

    /// Flag state; `false` for flags that were registered but not passed
    pub fn flag(&self, name: &str) -> bool {
        self.flags.get(name).copied().unwrap_or(false)
    }

    /// Parsed positional parameter by name
    pub fn parameter(&self, name: &str) -> Option<&Value> {
        self.parameters.get(name)
    }

    /// Store a scratch value for a later stage
    pub fn set_scratch(&mut self, key: impl Into<String>, value: serde_json::Value) {
        self.scratch.insert(key.into(), value);
    }

    /// Scratch value stored by an earlier stage
    pub fn scratch(&self, key: &str) -> Option<&serde_json::Value> {
        self.scratch.get(key)
    }

    /// Scratch value as a string, if present and a JSON string
    pub fn scratch_str(&self, key: &str) -> Option<&str> {
        self.scratch.get(key).and_then(|v| v.as_str())
    }
}
