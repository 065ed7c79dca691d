//! Error types for the RDF to CSV export

use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConvertError {
    #[error("Source directory not found: {0}")]
    MissingSourceDir(PathBuf),

    #[error("No RDF data was loaded")]
    EmptyGraph,

    #[error("Failed to parse {path}: {reason}")]
    Parse { path: String, reason: String },

    #[error("Invalid IRI '{iri}': {reason}")]
    InvalidIri { iri: String, reason: String },

    #[error("Invalid JSON-LD in {path}: {reason}")]
    InvalidJsonLd { path: String, reason: String },

    #[error("Failed to write {path}: {reason}")]
    Write { path: String, reason: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
