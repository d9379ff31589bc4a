//! Positional-parameter pattern compilation.
//!
//! A command declares its positional surface with a pattern string like
//! `"<release> <platform> <branch?>"`: the first token names the command, each
//! following token declares a parameter, and a `?` suffix marks it optional.
//! Required parameters must all come before the first optional one; that
//! ordering is what lets extraction assign leftover tokens by position alone.

use crate::error::ConfigError;

/// One positional parameter slot, in pattern order
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParameterSpec {
    /// Parameter name, without brackets or the `?` suffix
    pub name: String,
    /// Whether a token must fill this slot
    pub required: bool,
}

/// Compiled command pattern: name plus ordered parameter schema
#[derive(Debug, Clone)]
pub struct Pattern {
    name: String,
    parameters: Vec<ParameterSpec>,
}

impl Pattern {
    /// Compile a pattern string.
    ///
    /// Fails with [`ConfigError::RequiredAfterOptional`] if a required
    /// parameter follows an optional one. A pattern containing only the
    /// command name compiles to an empty parameter list.
    pub fn compile(pattern: &str) -> Result<Self, ConfigError> {
        let mut tokens = pattern.split_whitespace();
        let name = tokens
            .next()
            .map(strip_brackets)
            .unwrap_or_default()
            .to_string();

        let mut parameters = Vec::new();
        let mut optional_seen = false;
        for token in tokens {
            let inner = strip_brackets(token);
            let (param_name, required) = match inner.strip_suffix('?') {
                Some(stripped) => (stripped, false),
                None => (inner, true),
            };
            if required && optional_seen {
                return Err(ConfigError::RequiredAfterOptional {
                    name: param_name.to_string(),
                });
            }
            optional_seen |= !required;
            parameters.push(ParameterSpec {
                name: param_name.to_string(),
                required,
            });
        }

        Ok(Self { name, parameters })
    }

    /// Command name from the first pattern token
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Parameter slots in positional order
    pub fn parameters(&self) -> &[ParameterSpec] {
        &self.parameters
    }

    /// Whether the pattern declares a parameter with this name
    pub fn declares(&self, name: &str) -> bool {
        self.parameters.iter().any(|p| p.name == name)
    }
}

fn strip_brackets(token: &str) -> &str {
    let token = token.strip_prefix('<').unwrap_or(token);
    token.strip_suffix('>').unwrap_or(token)
}
