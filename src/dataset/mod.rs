//! Benchmark datasets
//!
//! The name -> URL table lives in a [`DatasetCatalog`] supplied by the
//! caller; [`DatasetFetcher`] turns a name into a local `.gr` path.

pub mod catalog;
pub mod fetch;

pub use catalog::{DatasetCatalog, DatasetEntry};
pub use fetch::{extract_archive, DatasetFetcher};

use std::io;
use thiserror::Error;

/// Dataset errors
#[derive(Error, Debug)]
pub enum DatasetError {
    #[error("Unknown dataset: {0}")]
    UnknownDataset(String),

    /// HTTP transport error
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Catalog file could not be parsed
    #[error("Catalog error: {0}")]
    Catalog(#[from] serde_yaml::Error),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// Blocking extraction task panicked or was cancelled
    #[error("Extraction task failed: {0}")]
    Task(#[from] tokio::task::JoinError),
}

pub type DatasetResult<T> = Result<T, DatasetError>;
