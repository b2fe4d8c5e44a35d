use std::collections::BTreeMap;
use std::io::Write;
use std::time::Duration;

use anyhow::{bail, Context, Result};
use reqwest::header::ACCEPT;
use serde::Deserialize;
use tracing::info_span;

use crate::store::{read_json, write_json_atomically, Store};

pub(crate) const SPDX_LICENSES_URL: &str =
    "https://raw.githubusercontent.com/spdx/license-list-data/master/json/licenses.json";

/// Where the SPDX license list comes from.
pub(crate) trait LicenseSource {
    /// The raw SPDX `licenses.json` document.
    fn fetch(&self) -> Result<Vec<u8>>;
}

pub(crate) struct HttpLicenseSource {
    url: String,
}

impl Default for HttpLicenseSource {
    fn default() -> Self {
        HttpLicenseSource {
            url: SPDX_LICENSES_URL.to_string(),
        }
    }
}

impl LicenseSource for HttpLicenseSource {
    fn fetch(&self) -> Result<Vec<u8>> {
        let _span = info_span!("downloading SPDX license list", url = %self.url).entered();
        let client = reqwest::blocking::Client::builder()
            .timeout(Duration::from_secs(2))
            .user_agent("codemetagenerator")
            .build()?;
        let response = client
            .get(&self.url)
            .header(ACCEPT, "application/json")
            .send()
            .with_context(|| format!("unable to download {}", self.url))?
            .error_for_status()?;
        Ok(response.bytes()?.to_vec())
    }
}

#[derive(Deserialize)]
struct SpdxLicenseList {
    licenses: Vec<SpdxLicense>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct SpdxLicense {
    license_id: String,
    reference: String,
}

/// SPDX license identifiers and their reference URLs.
///
/// Created by the commands that need it and passed down explicitly.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct LicenseCatalog {
    references: BTreeMap<String, String>,
}

impl LicenseCatalog {
    /// Translate the SPDX list into `licenseId -> reference`.
    pub fn from_spdx(bytes: &[u8]) -> Result<LicenseCatalog> {
        let list: SpdxLicenseList =
            serde_json::from_slice(bytes).context("unable to parse the SPDX license list")?;
        if list.licenses.is_empty() {
            bail!("the SPDX license list is empty");
        }
        let references = list
            .licenses
            .into_iter()
            .map(|license| (license.license_id, license.reference))
            .collect();
        Ok(LicenseCatalog { references })
    }

    /// Read the cached catalog, downloading it first if there is none.
    pub fn load(store: &Store, source: &dyn LicenseSource) -> Result<LicenseCatalog> {
        let path = store.licenses_path();
        if !path.exists() {
            return LicenseCatalog::refresh(store, source);
        }
        let references = serde_json::from_value(read_json(&path)?)
            .with_context(|| format!("{} is not a license map", path.display()))?;
        Ok(LicenseCatalog { references })
    }

    /// Download the catalog and replace the cache.
    pub fn refresh(store: &Store, source: &dyn LicenseSource) -> Result<LicenseCatalog> {
        let catalog = LicenseCatalog::from_spdx(&source.fetch()?)
            .context("unable to retrieve supported licenses")?;
        store.ensure_home()?;
        write_json_atomically(&store.licenses_path(), &catalog.references)
            .context("unable to save the SPDX licenses file")?;
        tracing::debug!(count = catalog.references.len(), "cached SPDX licenses");
        Ok(catalog)
    }

    /// All license identifiers, sorted.
    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.references.keys().map(String::as_str)
    }

    pub fn reference(&self, id: &str) -> Option<&str> {
        self.references.get(id).map(String::as_str)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.references.contains_key(id)
    }
}

/// `licenses`: print every known identifier.
pub(crate) fn list(store: &Store, source: &dyn LicenseSource, out: &mut impl Write) -> Result<()> {
    let catalog = LicenseCatalog::load(store, source)?;
    for id in catalog.ids() {
        writeln!(out, "{}", id)?;
    }
    Ok(())
}

/// `licenses refresh`
pub(crate) fn refresh(
    store: &Store,
    source: &dyn LicenseSource,
    out: &mut impl Write,
) -> Result<()> {
    let catalog = LicenseCatalog::refresh(store, source)?;
    writeln!(
        out,
        "Successfully updated the SPDX licenses file ({} licenses).",
        catalog.references.len()
    )?;
    Ok(())
}
