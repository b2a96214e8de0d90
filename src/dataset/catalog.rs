//! Dataset catalog
//!
//! Maps a dataset name to its download URL and local file names. The
//! catalog is a plain value handed to the fetcher, either the built-in
//! DIMACS table or one read from YAML.

use super::DatasetResult;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::path::Path;

const DIMACS_BASE_URL: &str = "http://www.diag.uniroma1.it//~challenge9/data/USA-road-d";

/// DIMACS USA road networks (distance graphs): dataset suffix and file code
const DIMACS_REGIONS: &[(&str, &str)] = &[
    ("usa", "USA"),
    ("ctr", "CTR"),
    ("w", "W"),
    ("e", "E"),
    ("lks", "LKS"),
    ("cal", "CAL"),
    ("ne", "NE"),
    ("nw", "NW"),
    ("fla", "FLA"),
    ("col", "COL"),
    ("bay", "BAY"),
    ("ny", "NY"),
];

/// One downloadable dataset
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DatasetEntry {
    /// Remote location of the compressed archive
    pub url: String,
    /// Local archive file name
    pub archive: String,
    /// Local extracted file name
    pub file: String,
}

/// Ordered name -> dataset mapping
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DatasetCatalog {
    entries: IndexMap<String, DatasetEntry>,
}

impl DatasetCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// The 9th DIMACS Challenge road networks, named `dimacs-<region>`
    pub fn dimacs() -> Self {
        let mut catalog = Self::new();
        for (suffix, code) in DIMACS_REGIONS {
            let name = format!("dimacs-{}", suffix);
            catalog.insert(
                name.clone(),
                DatasetEntry {
                    url: format!("{}/USA-road-d.{}.gr.gz", DIMACS_BASE_URL, code),
                    archive: format!("{}.gr.gz", name),
                    file: format!("{}.gr", name),
                },
            );
        }
        catalog
    }

    pub fn insert(&mut self, name: impl Into<String>, entry: DatasetEntry) -> Option<DatasetEntry> {
        self.entries.insert(name.into(), entry)
    }

    pub fn get(&self, name: &str) -> Option<&DatasetEntry> {
        self.entries.get(name)
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn from_yaml_str(yaml: &str) -> DatasetResult<Self> {
        Ok(serde_yaml::from_str(yaml)?)
    }

    pub fn from_yaml_file(path: impl AsRef<Path>) -> DatasetResult<Self> {
        let yaml = std::fs::read_to_string(path)?;
        Self::from_yaml_str(&yaml)
    }

    pub fn to_yaml_string(&self) -> DatasetResult<String> {
        Ok(serde_yaml::to_string(self)?)
    }
}
