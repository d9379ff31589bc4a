//! The command grammar engine.
//!
//! A command declares its surface declaratively: a positional pattern string
//! compiled by [`pattern::Pattern`], plus named arguments and boolean flags
//! registered against a [`registry::Registry`]. At invocation time
//! [`extract::extract`] consumes the raw token stream in three ordered phases
//! and produces typed values via [`value::ValueType`].

pub mod extract;
pub mod pattern;
pub mod registry;
pub mod value;

pub use extract::{Extraction, extract};
pub use pattern::{ParameterSpec, Pattern};
pub use registry::{ArgOptions, ArgSpec, FlagOptions, FlagSpec, ParamOptions, Registry};
pub use value::{Value, ValueType};
