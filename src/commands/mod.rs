//! Concrete command definitions.
//!
//! Each command owns a populated [`crate::grammar::Registry`] and implements
//! the [`crate::pipeline::Command`] hooks. The grammar engine treats these as
//! opaque collaborators; everything they know about an invocation arrives
//! through the execution context.

mod api;
mod git;
mod init;
mod release;

pub use api::{ReleaseClient, ReleaseRequest};
pub use git::GitRunner;
pub use init::InitCommand;
pub use release::ReleaseCommand;
