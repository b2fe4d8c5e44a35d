//! `generate` and `validate`.

use std::io::Write;
use std::path::PathBuf;

use anyhow::{Context, Result};
use serde_json::Value;
use tracing::info_span;

use crate::store::{read_json, write_json_atomically, Store};

#[derive(clap::Args, Debug)]
pub(crate) struct GenerateArgs {
    /// Write the document to this file instead of standard output
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Write the document even if it does not conform to the codemeta schema
    #[arg(long)]
    pub skip_validation: bool,
}

#[derive(clap::Args, Debug)]
pub(crate) struct ValidateArgs {
    /// The codemeta file to check [default: the in-progress file]
    #[arg(short, long)]
    pub input: Option<PathBuf>,
}

pub(crate) fn generate(store: &Store, args: &GenerateArgs, out: &mut impl Write) -> Result<()> {
    let document = Value::Object(store.load()?);
    if args.skip_validation {
        tracing::warn!("skipping validation");
    } else {
        let _span = info_span!("validating document").entered();
        codemeta_schema::validate(&document)?;
    }

    match &args.output {
        Some(path) => {
            write_json_atomically(path, &document)?;
            writeln!(
                out,
                "Successfully generated the codemeta.json file at {}.",
                path.display()
            )?;
        }
        None => {
            serde_json::to_writer_pretty(&mut *out, &document)?;
            writeln!(out)?;
        }
    }
    Ok(())
}

pub(crate) fn validate(store: &Store, args: &ValidateArgs, out: &mut impl Write) -> Result<()> {
    let path = match &args.input {
        Some(path) => path.clone(),
        None => store.in_progress_path(),
    };
    let _span = info_span!("validating document", path = %path.display()).entered();
    let document = read_json(&path)?;
    codemeta_schema::validate(&document)
        .with_context(|| format!("{} is not valid", path.display()))?;

    let name = path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string());
    writeln!(out, "The codemeta file '{}' is valid.", name)?;
    Ok(())
}
