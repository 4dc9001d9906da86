use crate::types::Side;
use std::path::PathBuf;
use thiserror::Error;

/// Fatal problems while turning trial files into sample pools.
///
/// Any of these aborts the run before scoring; a partially ingested store
/// would bias every score of the affected configuration.
#[derive(Error, Debug)]
pub enum IngestError {
    #[error("Failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("{}: {side} observation {row} is malformed: {reason}", path.display())]
    MalformedObservation {
        path: PathBuf,
        side: Side,
        row: usize,
        reason: String,
    },

    #[error(
        "{}: field of view is neither recorded nor encoded in the file name",
        path.display()
    )]
    MissingFieldOfView { path: PathBuf },
}

pub type Result<T> = std::result::Result<T, IngestError>;
