use std::fs;
use std::path::Path;

use log::warn;
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum DataError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Catalog format error: {0}")]
    Json(#[from] serde_json::Error),
}

/// One member of a (possibly multiple) star system.
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct StarComponent {
    pub name: String,
    pub spectral_type: Option<String>,
}

/// A catalog entry as loaded from the star catalog.
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct StarRecord {
    pub name: String,
    /// Right ascension, e.g. `14h29m43s`.
    pub ra: String,
    /// Declination, e.g. `−62°40′46″`.
    pub dec: String,
    pub distance_ly: f64,
    pub components: Vec<StarComponent>,
}

impl StarRecord {
    /// The record's own name, or its first component's when it has none.
    pub fn display_name(&self) -> &str {
        if !self.name.trim().is_empty() {
            return &self.name;
        }
        self.components
            .first()
            .map(|c| c.name.as_str())
            .unwrap_or_default()
    }

    /// Spectral type of the primary component.
    pub fn spectral_type(&self) -> Option<&str> {
        self.components
            .first()
            .and_then(|c| c.spectral_type.as_deref())
            .filter(|t| !t.trim().is_empty())
    }
}

/// Parses a JSON array of star records.
///
/// The document itself must be an array; entries inside it that cannot be
/// read as a record are skipped so one bad row does not empty the map.
pub fn parse_catalog(bytes: &[u8]) -> Result<Vec<StarRecord>, DataError> {
    let entries: Vec<serde_json::Value> = serde_json::from_slice(bytes)?;
    let mut records = Vec::with_capacity(entries.len());
    for (idx, entry) in entries.into_iter().enumerate() {
        match serde_json::from_value::<StarRecord>(entry) {
            Ok(record) => records.push(record),
            Err(err) => warn!("skipping catalog entry {}: {}", idx, err),
        }
    }
    Ok(records)
}

pub fn read_catalog_from_file<P: AsRef<Path>>(path: P) -> Result<Vec<StarRecord>, DataError> {
    let bytes = fs::read(path)?;
    parse_catalog(&bytes)
}

#[cfg(test)]
mod tests {
    use super::*;

    const CATALOG: &str = r#"[
        {
            "name": "Alpha Centauri",
            "ra": "14h39m36s",
            "dec": "−60°50′02″",
            "distance_ly": 4.37,
            "components": [
                { "name": "Alpha Centauri A", "spectral_type": "G2V" },
                { "name": "Alpha Centauri B", "spectral_type": "K1V" }
            ]
        },
        { "name": "Barnard's Star", "ra": "17h57m48s", "dec": "+04°41′36″", "distance_ly": 5.96 },
        { "name": 42, "ra": "00h00m00s" },
        { "ra": "10h56m29s", "dec": "+07°00′53″", "distance_ly": 7.86,
          "components": [{ "name": "Wolf 359", "spectral_type": "M6V" }] }
    ]"#;

    #[test]
    fn parses_and_skips_bad_entries() {
        let records = parse_catalog(CATALOG.as_bytes()).unwrap();
        assert_eq!(records.len(), 3);
        assert_eq!(records[0].spectral_type(), Some("G2V"));
        assert!(records[1].components.is_empty());
        assert_eq!(records[1].spectral_type(), None);
    }

    #[test]
    fn display_name_falls_back_to_component() {
        let records = parse_catalog(CATALOG.as_bytes()).unwrap();
        assert_eq!(records[0].display_name(), "Alpha Centauri");
        assert_eq!(records[2].display_name(), "Wolf 359");
        assert_eq!(StarRecord::default().display_name(), "");
    }

    #[test]
    fn non_array_document_is_an_error() {
        assert!(matches!(
            parse_catalog(br#"{ "stars": [] }"#),
            Err(DataError::Json(_))
        ));
    }

    #[test]
    fn missing_file_is_io_error() {
        let err = read_catalog_from_file("/nonexistent/stars.json").unwrap_err();
        assert!(matches!(err, DataError::Io(_)));
    }
}
