//! Error types for relkit operations.
//!
//! The grammar engine uses a closed taxonomy: configuration mistakes are
//! developer errors raised while wiring a command, parse errors come from the
//! user's token stream, and hook errors carry an explicit fatal/recoverable
//! distinction instead of a runtime flag check.

use thiserror::Error;

/// Result type alias for relkit operations
pub type Result<T> = std::result::Result<T, RelkitError>;

/// Main error type for all relkit operations
#[derive(Error, Debug)]
pub enum RelkitError {
    /// Command wiring errors (pattern, registry, config file)
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Token stream parsing errors
    #[error("Parse error: {0}")]
    Parse(#[from] ParseError),

    /// Errors raised by command hooks
    #[error("{0}")]
    Hook(#[from] HookError),

    /// CLI dispatch errors
    #[error("CLI error: {0}")]
    Cli(#[from] CliError),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// TOML parsing errors
    #[error("TOML error: {0}")]
    Toml(#[from] toml::de::Error),

    /// HTTP errors from release API calls
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
}

/// Errors raised while compiling a pattern, registering inputs, or loading
/// external configuration. Always fatal: command definitions are static and
/// checked once at startup.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Pattern declares a required parameter after an optional one
    #[error("required parameter <{name}> cannot be after an optional parameter")]
    RequiredAfterOptional {
        /// Offending parameter name
        name: String,
    },

    /// Argument, flag, or parameter registered with an empty identifier
    #[error("cannot register an argument, flag, or parameter without a name")]
    EmptyIdentifier,

    /// Long or short name already taken in the shared argument/flag namespace
    #[error("identifier '{name}' is already registered as an argument or flag")]
    DuplicateIdentifier {
        /// Colliding long or short name
        name: String,
    },

    /// Parameter name absent from the compiled pattern
    #[error("parameter '{name}' is not specified in the command pattern")]
    ParameterNotInPattern {
        /// Unknown parameter name
        name: String,
    },

    /// Parameter registered twice
    #[error("parameter '{name}' is already registered")]
    DuplicateParameter {
        /// Duplicated parameter name
        name: String,
    },

    /// Unknown value type name
    #[error("invalid type '{name}' received, expected string, int, float, or boolean")]
    InvalidType {
        /// The unrecognized type name
        name: String,
    },

    /// Config file exists but cannot be parsed
    #[error("invalid config file at {path}: {reason}")]
    InvalidConfigFile {
        /// Path to the broken config file
        path: std::path::PathBuf,
        /// Parser error text
        reason: String,
    },
}

/// Errors raised while extracting arguments, flags, and parameters from the
/// token stream. Reported to the user; the process exits non-zero.
#[derive(Error, Debug)]
pub enum ParseError {
    /// Argument token present but no value token follows it
    #[error("no value passed to {form}")]
    MissingArgumentValue {
        /// The form found on the command line (`--long` or `-short`)
        form: String,
    },

    /// A cast succeeded but the attached validator rejected the value
    #[error("'{name}' failed validation")]
    ValidationFailed {
        /// Argument long name
        name: String,
    },

    /// Value cannot be cast to the declared numeric type
    #[error("cannot cast '{value}' to {target}")]
    InvalidNumber {
        /// Raw token text
        value: String,
        /// Target type name
        target: &'static str,
    },

    /// More positional tokens than declared parameter slots
    #[error("invalid command structure: expected {expected} parameters, but found {found}")]
    TooManyParameters {
        /// Declared slot count
        expected: usize,
        /// Leftover token count
        found: usize,
    },

    /// Positional token landed on a slot that was never registered
    #[error("'{name}' is not a registered parameter")]
    UnregisteredParameter {
        /// Parameter name from the pattern
        name: String,
    },

    /// Required positional slot left unfilled
    #[error("missing required parameter <{name}>")]
    MissingParameter {
        /// Parameter name from the pattern
        name: String,
    },
}

/// Errors raised by `before`/`main`/`after` hooks.
///
/// `Fatal` aborts the pipeline and the process exits non-zero. `Recoverable`
/// stops the pipeline from advancing but the process still exits cleanly
/// after the error is reported.
#[derive(Error, Debug)]
pub enum HookError {
    /// Unrecoverable hook failure
    #[error("{0}")]
    Fatal(#[source] anyhow::Error),

    /// Reportable hook failure that does not fail the process
    #[error("{0}")]
    Recoverable(#[source] anyhow::Error),
}

impl HookError {
    /// Build a fatal hook error from a message or error value
    pub fn fatal(err: impl Into<anyhow::Error>) -> Self {
        HookError::Fatal(err.into())
    }

    /// Build a recoverable hook error from a message or error value
    pub fn recoverable(err: impl Into<anyhow::Error>) -> Self {
        HookError::Recoverable(err.into())
    }

    /// Whether this error should fail the process
    pub fn is_fatal(&self) -> bool {
        matches!(self, HookError::Fatal(_))
    }
}

/// CLI dispatch errors
#[derive(Error, Debug)]
pub enum CliError {
    /// No command name on the command line
    #[error("no command given")]
    MissingCommand,

    /// Command name does not match any registered command
    #[error("unknown command '{name}', available commands: {}", known.join(", "))]
    UnknownCommand {
        /// The name the user typed
        name: String,
        /// Registered command names
        known: Vec<String>,
    },
}

impl RelkitError {
    /// Get actionable recovery suggestions for this error
    pub fn recovery_suggestions(&self) -> Vec<String> {
        match self {
            RelkitError::Parse(ParseError::MissingArgumentValue { form }) => vec![
                format!("Pass a value after {form}, e.g. {form} <value>"),
                "Flags take no value; check whether you meant a flag".to_string(),
            ],
            RelkitError::Parse(ParseError::TooManyParameters { expected, .. }) => vec![
                format!("This command accepts at most {expected} positional parameter(s)"),
                "Quote values containing spaces so the shell passes them as one token"
                    .to_string(),
            ],
            RelkitError::Cli(CliError::UnknownCommand { known, .. }) => vec![format!(
                "Run one of the available commands: {}",
                known.join(", ")
            )],
            RelkitError::Config(ConfigError::InvalidConfigFile { path, .. }) => vec![
                format!("Fix or delete {} and re-run", path.display()),
                "Run 'relkit init --force' to regenerate a starter config".to_string(),
            ],
            _ => Vec::new(),
        }
    }
}
