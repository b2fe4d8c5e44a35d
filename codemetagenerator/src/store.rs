//! The state directory: the in-progress document and the license cache.
//!
//! Every write replaces its target atomically, so an interrupted or failed
//! command never leaves a half-written file behind.

use std::fs;
use std::io::{self, Write as _};
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use codemeta_core::Document;
use serde::Serialize;
use serde_json::Value;
use tempfile::NamedTempFile;

use crate::options::Options;

pub(crate) const DIRECTORY_NAME: &str = ".codemetagenerator";
const IN_PROGRESS_FILE_NAME: &str = "codemeta.inprogress.json";
const LICENSES_FILE_NAME: &str = "spdx-licenses.json";

pub(crate) struct Store {
    home: PathBuf,
}

impl Store {
    pub fn new(base_dir: &Path) -> Store {
        Store {
            home: base_dir.join(DIRECTORY_NAME),
        }
    }

    pub fn open(options: &Options) -> Result<Store> {
        Ok(Store::new(&options.base_dir()?))
    }

    pub fn home(&self) -> &Path {
        &self.home
    }

    pub fn in_progress_path(&self) -> PathBuf {
        self.home.join(IN_PROGRESS_FILE_NAME)
    }

    pub fn licenses_path(&self) -> PathBuf {
        self.home.join(LICENSES_FILE_NAME)
    }

    pub fn ensure_home(&self) -> Result<()> {
        fs::create_dir_all(&self.home).with_context(|| {
            format!(
                "unable to create codemetagenerator directory {}",
                self.home.display()
            )
        })
    }

    /// Load the in-progress document.
    pub fn load(&self) -> Result<Document> {
        let path = self.in_progress_path();
        if !path.exists() {
            bail!(
                "no in-progress codemeta.json file at {}. Have you run \"codemetagenerator new\" yet?",
                path.display()
            );
        }
        match read_json(&path)? {
            Value::Object(document) => Ok(document),
            _ => bail!(
                "the in-progress file {} does not contain a JSON object",
                path.display()
            ),
        }
    }

    /// Replace the in-progress document.
    pub fn persist(&self, document: &Document) -> Result<()> {
        self.ensure_home()?;
        let path = self.in_progress_path();
        write_json_atomically(&path, document)
            .context("unable to save the in-progress codemeta.json file")?;
        tracing::debug!(path = %path.display(), "saved in-progress document");
        Ok(())
    }

    pub fn clear_in_progress(&self) -> Result<()> {
        remove_if_exists(&self.in_progress_path())
    }

    /// Remove the whole state directory. Returns whether there was one.
    pub fn clean(&self) -> Result<bool> {
        match fs::remove_dir_all(&self.home) {
            Ok(()) => Ok(true),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(false),
            Err(e) => Err(e).with_context(|| {
                format!("unable to remove directory {}", self.home.display())
            }),
        }
    }
}

pub(crate) fn read_json(path: &Path) -> Result<Value> {
    let bytes =
        fs::read(path).with_context(|| format!("unable to read {}", path.display()))?;
    serde_json::from_slice(&bytes)
        .with_context(|| format!("{} does not contain valid JSON", path.display()))
}

/// Write pretty-printed JSON to a temporary file next to `path`, then rename it
/// over `path`.
pub(crate) fn write_json_atomically<T: Serialize + ?Sized>(path: &Path, value: &T) -> Result<()> {
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    let mut file = NamedTempFile::new_in(dir)
        .with_context(|| format!("unable to create a temporary file in {}", dir.display()))?;
    serde_json::to_writer_pretty(&mut file, value)?;
    writeln!(file)?;
    file.as_file().sync_all()?;
    file.persist(path)
        .map_err(|e| e.error)
        .with_context(|| format!("unable to write {}", path.display()))?;
    Ok(())
}

fn remove_if_exists(path: &Path) -> Result<()> {
    match fs::remove_file(path) {
        Ok(()) => Ok(()),
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
        Err(e) => Err(e).with_context(|| format!("unable to remove {}", path.display())),
    }
}
