//! RCGS collection export library
//!
//! This library loads a directory of RDF files describing a game collection
//! (packages, holdings, people, organizations, variations and works),
//! merges them into one in-memory graph and projects each entity type into
//! a flat CSV table for spreadsheet use.
//!
//! # Overview
//!
//! The conversion runs in four steps:
//!
//! 1. Discover RDF files by extension and parse each one (Turtle, RDF/XML,
//!    N3, N-Triples or JSON-LD)
//! 2. Merge all triples into a single [`GraphStore`] with set semantics
//! 3. For every entity kind, select its subjects and build one record per
//!    subject from a declarative field table
//! 4. Write each non-empty table to `<output>/<kind>.csv`
//!
//! # Flattening
//!
//! Each cell holds every value reached by its field's property path,
//! stringified and joined with `|` in store order. Nested anonymous nodes
//! (formats, provision activities, admin metadata) are traversed rather
//! than exploded into extra rows. Language-filtered fields keep only
//! literals with exactly the requested tag. The RDF parsers lower-case
//! language tags (`ja-Hrkt` is stored as `ja-hrkt`), so tags are compared
//! ignoring ASCII case.
//!
//! # Usage
//!
//! ```ignore
//! use rcgs_export::{convert, ConvertOptions, EntityKind};
//!
//! let options = ConvertOptions {
//!     source_dir: "./source".into(),
//!     output_dir: "./output".into(),
//!     entities: vec![EntityKind::Package, EntityKind::RelatedItem],
//! };
//! let report = convert(&options)?;
//! println!("{} tables written", report.written());
//! ```

#[macro_use]
pub mod vocab;

pub mod convert;
pub mod entity;
pub mod error;
pub mod id;
pub mod jsonld;
pub mod loader;
pub mod property;
pub mod record;
pub mod sink;
pub mod store;

// Re-export main types for convenience
pub use crate::convert::{
    convert, extract_all, ConvertOptions, ConvertReport, GraphSummary, TableOutcome,
};
pub use crate::entity::EntityKind;
pub use crate::error::ConvertError;
pub use crate::loader::{load_directory, LoadReport, RdfFormat};
pub use crate::property::{Accessor, FieldSpec, PropertyPath};
pub use crate::record::{EntityRecord, Schema, Table};
pub use crate::sink::{CsvSink, RecordSink, WriteSummary};
pub use crate::store::GraphStore;
