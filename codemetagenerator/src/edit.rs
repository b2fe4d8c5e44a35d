//! `insert`, `set`, `edit` and `delete`: path-addressed changes to the
//! in-progress document.

use std::io::Write;

use anyhow::{bail, Context, Result};
use codemeta_core::{document, path, UpdateMode};
use serde_json::Value;
use tracing::info_span;

use crate::store::Store;

#[derive(clap::Args, Debug)]
pub(crate) struct PathValueArgs {
    /// Dotted key path, e.g. `author[0].givenName` or `keywords[-1]`
    pub path: String,
    /// New value, as JSON; anything that is not valid JSON is taken as a string
    pub value: String,
}

#[derive(clap::Args, Debug)]
pub(crate) struct PathArgs {
    /// Dotted key path, e.g. `author[0]` or `keywords[-1]`
    pub path: String,
}

#[derive(Debug, Clone, PartialEq)]
pub(crate) enum Mutation {
    Insert(Value),
    Set(Value),
    Edit(Value),
    Delete,
}

impl Mutation {
    fn verb(&self) -> &'static str {
        match self {
            Mutation::Insert(_) => "inserted",
            Mutation::Set(_) => "set",
            Mutation::Edit(_) => "edited",
            Mutation::Delete => "removed",
        }
    }

    fn value(&self) -> Option<&Value> {
        match self {
            Mutation::Insert(value) | Mutation::Set(value) | Mutation::Edit(value) => Some(value),
            Mutation::Delete => None,
        }
    }
}

/// Interpret a command line value.
pub(crate) fn parse_value(text: &str) -> Value {
    serde_json::from_str(text).unwrap_or_else(|_| Value::String(text.to_string()))
}

/// Load the in-progress document, apply `mutation` at `path_text` and save it.
///
/// Nothing is written unless the mutation succeeds.
pub(crate) fn mutate(
    store: &Store,
    path_text: &str,
    mutation: Mutation,
    out: &mut impl Write,
) -> Result<()> {
    let _span = info_span!("mutating document", path = path_text).entered();
    if mutation.value().and_then(Value::as_str) == Some("") {
        bail!("value is empty");
    }
    let path = path::parse(path_text)?;
    let before = store.load()?;
    let mut after = before.clone();
    let verb = mutation.verb();

    match mutation {
        Mutation::Insert(value) => document::insert(&mut after, &path, value),
        Mutation::Set(value) => document::update(&mut after, &path, value, UpdateMode::Upsert),
        Mutation::Edit(value) => document::update(&mut after, &path, value, UpdateMode::Strict),
        Mutation::Delete => document::remove(&mut after, &path).map(drop),
    }
    .with_context(|| format!("unable to change `{}`", path))?;

    let patch = json_patch::diff(&Value::Object(before), &Value::Object(after.clone()));
    tracing::debug!(patch = %serde_json::to_string(&patch)?, "applying change");

    store.persist(&after)?;
    writeln!(
        out,
        "Successfully {} the `{}` key in the in-progress codemeta.json file.",
        verb, path
    )?;
    Ok(())
}
