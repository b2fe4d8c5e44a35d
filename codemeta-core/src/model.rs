//! Field names, default values and entity constructors for codemeta documents.

use std::fmt;
use std::str::FromStr;

use serde_json::{Map, Value};
use thiserror::Error;

use crate::document::Document;

pub const TYPE: &str = "@type";
pub const ID: &str = "@id";
pub const CONTEXT: &str = "@context";
pub const IDENTIFIER: &str = "identifier";
pub const GIVEN_NAME: &str = "givenName";
pub const FAMILY_NAME: &str = "familyName";
pub const EMAIL: &str = "email";
pub const NAME: &str = "name";
pub const DESCRIPTION: &str = "description";
pub const CODE_REPOSITORY: &str = "codeRepository";
pub const LICENSE: &str = "license";
pub const VERSION: &str = "version";
pub const PROGRAMMING_LANGUAGE: &str = "programmingLanguage";
pub const RUNTIME_PLATFORM: &str = "runtimePlatform";
pub const MAINTAINER: &str = "maintainer";
pub const AUTHOR: &str = "author";
pub const CONTRIBUTOR: &str = "contributor";
pub const KEYWORDS: &str = "keywords";
pub const README: &str = "readme";
pub const DEVELOPMENT_STATUS: &str = "developmentStatus";
pub const URL: &str = "url";

pub const DEFAULT_CONTEXT: &str = "https://doi.org/10.5063/schema/codemeta-2.0";
pub const PERSON_TYPE: &str = "Person";
pub const ORGANIZATION_TYPE: &str = "Organization";
pub const SOFTWARE_SOURCE_CODE_TYPE: &str = "SoftwareSourceCode";
pub const COMPUTER_LANGUAGE_TYPE: &str = "ComputerLanguage";

/// Project status as categorised by <https://www.repostatus.org/>.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DevelopmentStatus {
    Abandoned,
    Active,
    Concept,
    Inactive,
    Moved,
    Suspended,
    Unsupported,
    Wip,
}

impl DevelopmentStatus {
    pub const ALL: [DevelopmentStatus; 8] = [
        DevelopmentStatus::Abandoned,
        DevelopmentStatus::Active,
        DevelopmentStatus::Concept,
        DevelopmentStatus::Inactive,
        DevelopmentStatus::Moved,
        DevelopmentStatus::Suspended,
        DevelopmentStatus::Unsupported,
        DevelopmentStatus::Wip,
    ];

    pub fn name(self) -> &'static str {
        match self {
            DevelopmentStatus::Abandoned => "Abandoned",
            DevelopmentStatus::Active => "Active",
            DevelopmentStatus::Concept => "Concept",
            DevelopmentStatus::Inactive => "Inactive",
            DevelopmentStatus::Moved => "Moved",
            DevelopmentStatus::Suspended => "Suspended",
            DevelopmentStatus::Unsupported => "Unsupported",
            DevelopmentStatus::Wip => "WIP",
        }
    }
}

impl fmt::Display for DevelopmentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown development status `{0}`")]
pub struct UnknownDevelopmentStatus(pub String);

impl FromStr for DevelopmentStatus {
    type Err = UnknownDevelopmentStatus;

    /// Case-insensitive.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        DevelopmentStatus::ALL
            .into_iter()
            .find(|status| status.name().eq_ignore_ascii_case(s))
            .ok_or_else(|| UnknownDevelopmentStatus(s.to_string()))
    }
}

/// Builds an entity object, skipping fields whose value is empty.
struct Entity(Map<String, Value>);

impl Entity {
    fn new(kind: &str) -> Self {
        let mut map = Map::new();
        map.insert(TYPE.to_string(), Value::String(kind.to_string()));
        Entity(map)
    }

    fn field(mut self, key: &str, value: &str) -> Self {
        if !value.is_empty() {
            self.0.insert(key.to_string(), Value::String(value.to_string()));
        }
        self
    }

    fn build(self) -> Value {
        Value::Object(self.0)
    }
}

pub fn person(given_name: &str, family_name: &str, email: &str, id: &str) -> Value {
    Entity::new(PERSON_TYPE)
        .field(GIVEN_NAME, given_name)
        .field(FAMILY_NAME, family_name)
        .field(EMAIL, email)
        .field(ID, id)
        .build()
}

pub fn organization(name: &str, url: &str, id: &str) -> Value {
    Entity::new(ORGANIZATION_TYPE)
        .field(NAME, name)
        .field(URL, url)
        .field(ID, id)
        .build()
}

pub fn programming_language(name: &str, url: &str) -> Value {
    Entity::new(COMPUTER_LANGUAGE_TYPE)
        .field(NAME, name)
        .field(URL, url)
        .build()
}

/// A root document: `@context` and `@type` first, then `fields` in order.
///
/// Empty strings in `fields` are dropped.
pub fn codemeta(fields: impl IntoIterator<Item = (String, Value)>) -> Document {
    let mut document = Document::new();
    document.insert(CONTEXT.to_string(), Value::String(DEFAULT_CONTEXT.to_string()));
    document.insert(
        TYPE.to_string(),
        Value::String(SOFTWARE_SOURCE_CODE_TYPE.to_string()),
    );
    for (key, value) in fields {
        if matches!(&value, Value::String(s) if s.is_empty()) {
            continue;
        }
        document.insert(key, value);
    }
    document
}

/// Append `value` to the list stored under `key`.
///
/// A missing or null entry becomes a one-element list. A single value that is
/// not a list yet is wrapped before appending, so `author: {...}` turns into
/// `author: [{...}, value]`.
pub fn append_to_list(document: &mut Document, key: &str, value: Value) {
    let entry = document.entry(key.to_string()).or_insert(Value::Null);
    if entry.is_null() {
        *entry = Value::Array(Vec::new());
    } else if !entry.is_array() {
        let existing = entry.take();
        *entry = Value::Array(vec![existing]);
    }
    if let Value::Array(items) = entry {
        items.push(value);
    }
}
