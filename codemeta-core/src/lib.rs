//! Editing of codemeta documents addressed by dotted paths.
//!
//! ```
//! use codemeta_core::{document, Document, UpdateMode};
//! use serde_json::json;
//!
//! let mut doc: Document = serde_json::from_value(json!({"keywords": ["cli"]})).unwrap();
//! let path = "keywords[-1]".parse().unwrap();
//! document::update(&mut doc, &path, json!("json"), UpdateMode::Upsert).unwrap();
//! assert_eq!(doc["keywords"], json!(["cli", "json"]));
//! ```

pub mod document;
pub mod error;
pub mod model;
pub mod path;

pub use document::{Document, UpdateMode};
pub use error::{Error, Result};
pub use path::{Index, Path, Segment};
