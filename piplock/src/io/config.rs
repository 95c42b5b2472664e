//! Reads the `[piplock:*]` sections of `setup.cfg`.

use std::fs;
use std::path::Path;

use anyhow::Result;
use tracing::{debug, instrument};

use crate::core::ini::IniDocument;
use crate::core::requirements::{
    Configuration, REQS_KEY, SECTION_COMMON, SECTION_DEV, SECTION_PROD, parse_reqs,
};
use crate::error::PiplockError;

pub const CONFIG_FILE: &str = "setup.cfg";

/// Load the three requirement lists from `<root>/setup.cfg`.
///
/// All three sections are mandatory, regardless of which ones the caller
/// will actually use.
#[instrument(skip_all, fields(root = %root.display()))]
pub fn read_config(root: &Path) -> Result<Configuration> {
    let path = root.join(CONFIG_FILE);
    let contents = fs::read_to_string(&path).map_err(|source| PiplockError::ConfigNotFound {
        path: path.clone(),
        source,
    })?;
    let doc = IniDocument::parse(&contents).map_err(|source| PiplockError::ConfigParse {
        path: path.clone(),
        source,
    })?;

    let config = Configuration {
        common: section_reqs(&doc, SECTION_COMMON)?,
        dev: section_reqs(&doc, SECTION_DEV)?,
        prod: section_reqs(&doc, SECTION_PROD)?,
    };
    debug!(
        common = config.common.len(),
        dev = config.dev.len(),
        prod = config.prod.len(),
        "loaded requirement lists"
    );
    Ok(config)
}

fn section_reqs(doc: &IniDocument, section: &str) -> Result<Vec<String>, PiplockError> {
    if !doc.has_section(section) {
        return Err(PiplockError::MissingSection {
            section: section.to_string(),
        });
    }
    let raw = doc
        .get(section, REQS_KEY)
        .ok_or_else(|| PiplockError::MissingKey {
            section: section.to_string(),
            key: REQS_KEY.to_string(),
        })?;
    Ok(parse_reqs(raw))
}
