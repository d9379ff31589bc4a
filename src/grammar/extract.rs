//! Three-phase token extraction.
//!
//! Extraction consumes the raw token stream in a fixed order: named arguments
//! first, then boolean flags, then whatever remains is assigned to positional
//! parameter slots. The ordering matters: argument and flag tokens must leave
//! the stream before positions are counted. Instead of splicing the stream in
//! place, each phase rebuilds the remaining-token list by exclusion, so the
//! effect of every phase is observable in isolation.

use crate::error::ParseError;
use crate::grammar::registry::Registry;
use crate::grammar::value::Value;
use std::collections::HashMap;

/// Result of running all three extraction phases.
///
/// `arguments` and `parameters` only contain keys that were present on the
/// command line; `flags` always contains every registered flag.
#[derive(Debug, Default)]
pub struct Extraction {
    /// Parsed named arguments, keyed by long name
    pub arguments: HashMap<String, Value>,
    /// Parsed flags; absent flags are recorded as `false`
    pub flags: HashMap<String, bool>,
    /// Parsed positional parameters, keyed by parameter name
    pub parameters: HashMap<String, Value>,
}

/// Run the argument, flag, and parameter phases over a token stream.
///
/// Every token is either consumed by a phase or trips the phase-C overflow
/// check; there is no silent unknown-token acceptance.
pub fn extract(tokens: &[String], registry: &Registry) -> Result<Extraction, ParseError> {
    let mut remaining: Vec<String> = tokens.to_vec();
    let mut extraction = Extraction::default();

    extract_arguments(&mut remaining, registry, &mut extraction)?;
    extract_flags(&mut remaining, registry, &mut extraction);
    extract_parameters(&remaining, registry, &mut extraction)?;

    Ok(extraction)
}

/// Phase A: `--long value` / `-short value` pairs, in registration order
fn extract_arguments(
    remaining: &mut Vec<String>,
    registry: &Registry,
    extraction: &mut Extraction,
) -> Result<(), ParseError> {
    for spec in registry.arguments() {
        let Some(index) = find_token(remaining, &spec.long, spec.short.as_deref()) else {
            continue;
        };
        let Some(raw) = remaining.get(index + 1) else {
            return Err(ParseError::MissingArgumentValue {
                form: remaining[index].clone(),
            });
        };
        let value = spec.value_type.cast(raw)?;
        if let Some(validator) = &spec.validator
            && !validator(&value)
        {
            return Err(ParseError::ValidationFailed {
                name: spec.long.clone(),
            });
        }
        extraction.arguments.insert(spec.long.clone(), value);
        drop_indices(remaining, &[index, index + 1]);
    }
    Ok(())
}

/// Phase B: single-token flags; every registered flag gets an entry
fn extract_flags(remaining: &mut Vec<String>, registry: &Registry, extraction: &mut Extraction) {
    for spec in registry.flags() {
        match find_token(remaining, &spec.long, spec.short.as_deref()) {
            Some(index) => {
                drop_indices(remaining, &[index]);
                extraction.flags.insert(spec.long.clone(), true);
            }
            None => {
                extraction.flags.insert(spec.long.clone(), false);
            }
        }
    }
}

/// Phase C: leftover tokens assigned to pattern positions in order
fn extract_parameters(
    remaining: &[String],
    registry: &Registry,
    extraction: &mut Extraction,
) -> Result<(), ParseError> {
    let slots = registry.pattern().parameters();
    if remaining.len() > slots.len() {
        return Err(ParseError::TooManyParameters {
            expected: slots.len(),
            found: remaining.len(),
        });
    }

    for (position, slot) in slots.iter().enumerate() {
        match remaining.get(position) {
            Some(raw) => {
                let Some(options) = registry.parameter(&slot.name) else {
                    return Err(ParseError::UnregisteredParameter {
                        name: slot.name.clone(),
                    });
                };
                let value = options.value_type.cast(raw)?;
                extraction.parameters.insert(slot.name.clone(), value);
            }
            None if slot.required => {
                return Err(ParseError::MissingParameter {
                    name: slot.name.clone(),
                });
            }
            None => {}
        }
    }
    Ok(())
}

/// Index of the first token matching the argument or flag.
///
/// `--name` matches the long name. `-name` matches the short name when one
/// is registered, and falls back to the long name, so a flag registered as
/// plain `x` is still found as `-x`.
fn find_token(tokens: &[String], long: &str, short: Option<&str>) -> Option<usize> {
    tokens.iter().position(|token| {
        if let Some(name) = token.strip_prefix("--") {
            return name == long;
        }
        if let Some(name) = token.strip_prefix('-') {
            return short == Some(name) || name == long;
        }
        false
    })
}

/// Rebuild the token list excluding the given indices
fn drop_indices(tokens: &mut Vec<String>, consumed: &[usize]) {
    *tokens = tokens
        .iter()
        .enumerate()
        .filter(|(i, _)| !consumed.contains(i))
        .map(|(_, t)| t.clone())
        .collect();
}
