//! Structural validation of codemeta documents.
//!
//! The schema is a fixed catalog of object kinds (see [`catalog`]). Validation
//! walks the whole document and reports every violation at once; see
//! [`ValidationFailed`].

pub mod catalog;
pub mod format;
mod validate;
mod violation;

pub use validate::validate;
pub use violation::{Location, Step, ValidationFailed, Violation};
