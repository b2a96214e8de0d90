//! Crate-level error type

use crate::algo::GraphError;
use crate::dataset::DatasetError;
use crate::dimacs::ParseError;
use std::io;
use thiserror::Error;

/// Errors surfaced by the loader, the dataset fetcher and the algorithm adapters
#[derive(Error, Debug)]
pub enum Error {
    #[error(transparent)]
    Parse(#[from] ParseError),

    #[error(transparent)]
    Graph(#[from] GraphError),

    #[error(transparent)]
    Dataset(#[from] DatasetError),

    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
