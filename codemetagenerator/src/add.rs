use std::io::{BufRead, Write};

use anyhow::Result;
use codemeta_core::model;
use serde_json::Value;

use crate::prompt::Prompter;
use crate::store::Store;

const UPDATED: &str = "Successfully updated the in-progress codemeta.json file.";

/// `add author`
pub(crate) fn author<R: BufRead, W: Write>(
    store: &Store,
    prompter: &mut Prompter<R, W>,
) -> Result<()> {
    add_entity(store, prompter, "Author", model::AUTHOR)
}

/// `add contributor`
pub(crate) fn contributor<R: BufRead, W: Write>(
    store: &Store,
    prompter: &mut Prompter<R, W>,
) -> Result<()> {
    add_entity(store, prompter, "Contributor", model::CONTRIBUTOR)
}

fn add_entity<R: BufRead, W: Write>(
    store: &Store,
    prompter: &mut Prompter<R, W>,
    label: &str,
    key: &str,
) -> Result<()> {
    // fail before asking anything if there is nothing to add to
    let mut document = store.load()?;
    let entity = prompter.person_or_organization(label)?;
    model::append_to_list(&mut document, key, entity);
    store.persist(&document)?;
    prompter.say(UPDATED)
}

/// `add keyword`
pub(crate) fn keywords(store: &Store, keywords: &[String], out: &mut impl Write) -> Result<()> {
    let mut document = store.load()?;
    for keyword in keywords {
        model::append_to_list(&mut document, model::KEYWORDS, Value::from(keyword.as_str()));
    }
    store.persist(&document)?;
    writeln!(out, "Added keyword(s): {}", keywords.join(", "))?;
    writeln!(out, "{}", UPDATED)?;
    Ok(())
}
