//! Per-command registries for arguments, flags, and parameters.
//!
//! Arguments and flags share one identifier namespace: a long or short name
//! used by either kind cannot be reused by the other. Parameters live in
//! their own namespace but must appear in the command's compiled pattern.
//! Registration happens once at command construction and the registry is
//! read-only afterwards.

use crate::error::ConfigError;
use crate::grammar::pattern::Pattern;
use crate::grammar::value::{Value, ValueType};
use std::collections::HashMap;
use std::fmt;

/// Predicate applied to a cast argument value
pub type Validator = Box<dyn Fn(&Value) -> bool + Send + Sync>;

/// Registered named argument (`--name value`)
pub struct ArgSpec {
    /// Long name, matched as `--long`
    pub long: String,
    /// Optional short name, matched as `-short`
    pub short: Option<String>,
    /// Declared value type, default string
    pub value_type: ValueType,
    /// Help text
    pub description: Option<String>,
    /// Optional predicate over the cast value
    pub validator: Option<Validator>,
}

impl fmt::Debug for ArgSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ArgSpec")
            .field("long", &self.long)
            .field("short", &self.short)
            .field("value_type", &self.value_type)
            .field("description", &self.description)
            .field("validator", &self.validator.is_some())
            .finish()
    }
}

/// Registered boolean flag (`--name`, no value)
#[derive(Debug)]
pub struct FlagSpec {
    /// Long name, matched as `--long`
    pub long: String,
    /// Optional short name, matched as `-short`
    pub short: Option<String>,
    /// Help text
    pub description: Option<String>,
}

/// Options supplied when registering an argument
#[derive(Default)]
pub struct ArgOptions {
    /// Declared value type, default string
    pub value_type: ValueType,
    /// Help text
    pub description: Option<String>,
    /// Optional predicate over the cast value
    pub validator: Option<Validator>,
}

impl ArgOptions {
    /// Set the value type
    pub fn value_type(mut self, value_type: ValueType) -> Self {
        self.value_type = value_type;
        self
    }

    /// Set the help text
    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Attach a validator predicate
    pub fn validator(
        mut self,
        validator: impl Fn(&Value) -> bool + Send + Sync + 'static,
    ) -> Self {
        self.validator = Some(Box::new(validator));
        self
    }
}

/// Options supplied when registering a flag
#[derive(Debug, Default)]
pub struct FlagOptions {
    /// Help text
    pub description: Option<String>,
}

impl FlagOptions {
    /// Set the help text
    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }
}

/// Options supplied when registering a parameter
#[derive(Debug, Default)]
pub struct ParamOptions {
    /// Declared value type, default string
    pub value_type: ValueType,
    /// Help text
    pub description: Option<String>,
}

impl ParamOptions {
    /// Set the value type
    pub fn value_type(mut self, value_type: ValueType) -> Self {
        self.value_type = value_type;
        self
    }

    /// Set the help text
    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }
}

/// Per-command store of argument, flag, and parameter specifications
#[derive(Debug)]
pub struct Registry {
    pattern: Pattern,
    arguments: Vec<ArgSpec>,
    flags: Vec<FlagSpec>,
    parameters: HashMap<String, ParamOptions>,
}

impl Registry {
    /// Create an empty registry for a compiled pattern
    pub fn new(pattern: Pattern) -> Self {
        Self {
            pattern,
            arguments: Vec::new(),
            flags: Vec::new(),
            parameters: HashMap::new(),
        }
    }

    /// Register a named argument.
    ///
    /// `identifier` is `"long"` or `"long|short"`. Both names must be unique
    /// across the combined argument and flag namespace.
    pub fn register_argument(
        &mut self,
        identifier: &str,
        options: ArgOptions,
    ) -> Result<(), ConfigError> {
        let (long, short) = split_identifier(identifier)?;
        self.check_name_free(&long)?;
        if let Some(ref short) = short {
            self.check_name_free(short)?;
        }
        self.arguments.push(ArgSpec {
            long,
            short,
            value_type: options.value_type,
            description: options.description,
            validator: options.validator,
        });
        Ok(())
    }

    /// Register a boolean flag, sharing the argument namespace check
    pub fn register_flag(
        &mut self,
        identifier: &str,
        options: FlagOptions,
    ) -> Result<(), ConfigError> {
        let (long, short) = split_identifier(identifier)?;
        self.check_name_free(&long)?;
        if let Some(ref short) = short {
            self.check_name_free(short)?;
        }
        self.flags.push(FlagSpec {
            long,
            short,
            description: options.description,
        });
        Ok(())
    }

    /// Register a positional parameter.
    ///
    /// The name must appear in the compiled pattern and may only be
    /// registered once.
    pub fn register_parameter(
        &mut self,
        name: &str,
        options: ParamOptions,
    ) -> Result<(), ConfigError> {
        if name.trim().is_empty() {
            return Err(ConfigError::EmptyIdentifier);
        }
        if !self.pattern.declares(name) {
            return Err(ConfigError::ParameterNotInPattern {
                name: name.to_string(),
            });
        }
        if self.parameters.contains_key(name) {
            return Err(ConfigError::DuplicateParameter {
                name: name.to_string(),
            });
        }
        self.parameters.insert(name.to_string(), options);
        Ok(())
    }

    /// The compiled pattern this registry was built for
    pub fn pattern(&self) -> &Pattern {
        &self.pattern
    }

    /// Registered arguments, in registration order
    pub fn arguments(&self) -> &[ArgSpec] {
        &self.arguments
    }

    /// Registered flags, in registration order
    pub fn flags(&self) -> &[FlagSpec] {
        &self.flags
    }

    /// Options for a registered parameter, if any
    pub fn parameter(&self, name: &str) -> Option<&ParamOptions> {
        self.parameters.get(name)
    }

    fn check_name_free(&self, name: &str) -> Result<(), ConfigError> {
        let taken = self
            .arguments
            .iter()
            .any(|a| a.long == name || a.short.as_deref() == Some(name))
            || self
                .flags
                .iter()
                .any(|f| f.long == name || f.short.as_deref() == Some(name));
        if taken {
            return Err(ConfigError::DuplicateIdentifier {
                name: name.to_string(),
            });
        }
        Ok(())
    }
}

/// Split `"long"` / `"long|short"` into its parts, rejecting empty names
fn split_identifier(identifier: &str) -> Result<(String, Option<String>), ConfigError> {
    if identifier.trim().is_empty() {
        return Err(ConfigError::EmptyIdentifier);
    }
    match identifier.split_once('|') {
        Some((long, short)) => {
            if long.is_empty() || short.is_empty() {
                return Err(ConfigError::EmptyIdentifier);
            }
            Ok((long.to_string(), Some(short.to_string())))
        }
        None => Ok((identifier.to_string(), None)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn registry(pattern: &str) -> Registry {
        Registry::new(Pattern::compile(pattern).unwrap())
    }

    #[test]
    fn argument_and_flag_share_a_namespace() {
        let mut reg = registry("<cmd>");
        reg.register_argument("foo|f", ArgOptions::default()).unwrap();

        let err = reg.register_flag("foo", FlagOptions::default()).unwrap_err();
        assert!(matches!(err, ConfigError::DuplicateIdentifier { name } if name == "foo"));

        let err = reg
            .register_flag("bar|f", FlagOptions::default())
            .unwrap_err();
        assert!(matches!(err, ConfigError::DuplicateIdentifier { name } if name == "f"));
    }

    #[test]
    fn empty_identifier_rejected() {
        let mut reg = registry("<cmd>");
        assert!(matches!(
            reg.register_argument("", ArgOptions::default()),
            Err(ConfigError::EmptyIdentifier)
        ));
        assert!(matches!(
            reg.register_argument("|x", ArgOptions::default()),
            Err(ConfigError::EmptyIdentifier)
        ));
    }

    #[test]
    fn parameter_must_appear_in_pattern() {
        let mut reg = registry("<cmd> <a> <b?>");
        reg.register_parameter("a", ParamOptions::default()).unwrap();

        let err = reg
            .register_parameter("c", ParamOptions::default())
            .unwrap_err();
        assert!(matches!(err, ConfigError::ParameterNotInPattern { name } if name == "c"));
    }

    #[test]
    fn parameter_cannot_be_registered_twice() {
        let mut reg = registry("<cmd> <a>");
        reg.register_parameter("a", ParamOptions::default()).unwrap();
        let err = reg
            .register_parameter("a", ParamOptions::default())
            .unwrap_err();
        assert!(matches!(err, ConfigError::DuplicateParameter { name } if name == "a"));
    }

    #[test]
    fn registration_order_is_preserved() {
        let mut reg = registry("<cmd>");
        reg.register_argument("alpha", ArgOptions::default()).unwrap();
        reg.register_argument("beta|b", ArgOptions::default()).unwrap();
        let longs: Vec<_> = reg.arguments().iter().map(|a| a.long.as_str()).collect();
        assert_eq!(longs, ["alpha", "beta"]);
    }
}
