//! Conversion pipeline
//!
//! Loads every RDF file of the source directory into one [`GraphStore`],
//! logs a summary of what it holds, then extracts and writes each requested
//! entity kind in turn. Extraction is sequential and the store is only read
//! after loading.

use std::path::PathBuf;

use oxrdf::NamedNodeRef;
use tracing::{error, info};

use crate::entity::EntityKind;
use crate::error::ConvertError;
use crate::loader::{load_directory, LoadReport};
use crate::sink::{CsvSink, RecordSink, WriteSummary};
use crate::store::GraphStore;
use crate::vocab::{
    DCNDL_BIB_RESOURCE, DCNDL_ITEM, FOAF_ORGANIZATION, FOAF_PERSON, RCGS_PACKAGE, RCGS_VARIATION,
    RCGS_WORK,
};

/// Classes counted in the graph summary, with their display names
const SUMMARY_TYPES: [(&str, &str); 7] = [
    ("BibResource", DCNDL_BIB_RESOURCE),
    ("Item", DCNDL_ITEM),
    ("Package", RCGS_PACKAGE),
    ("Person", FOAF_PERSON),
    ("Organization", FOAF_ORGANIZATION),
    ("Variation", RCGS_VARIATION),
    ("Work", RCGS_WORK),
];

/// Options for a conversion run
#[derive(Debug, Clone)]
pub struct ConvertOptions {
    /// Directory scanned for RDF files
    pub source_dir: PathBuf,
    /// Directory receiving the CSV files, created when missing
    pub output_dir: PathBuf,
    /// Entity kinds to extract, in order
    pub entities: Vec<EntityKind>,
}

impl Default for ConvertOptions {
    fn default() -> Self {
        Self {
            source_dir: PathBuf::from("./source"),
            output_dir: PathBuf::from("./output"),
            entities: EntityKind::ALL.to_vec(),
        }
    }
}

/// What happened to one entity kind
#[derive(Debug, Clone, PartialEq)]
pub enum TableOutcome {
    Written(WriteSummary),
    /// No subject qualified, nothing was written
    Empty,
    /// Writing failed with the given reason
    Failed(String),
}

/// Instance counts and namespaces of the merged graph
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GraphSummary {
    /// Display name and subject count per summarised class
    pub type_counts: Vec<(&'static str, usize)>,
    pub namespaces: Vec<(String, String)>,
}

impl GraphSummary {
    pub fn from_store(store: &GraphStore) -> Self {
        let type_counts = SUMMARY_TYPES
            .iter()
            .map(|(name, iri)| {
                let count = store
                    .subjects_of_type(NamedNodeRef::new_unchecked(iri))
                    .len();
                (*name, count)
            })
            .collect();

        Self {
            type_counts,
            namespaces: store.namespaces().to_vec(),
        }
    }

    /// Subject count of a summarised class by display name
    pub fn count(&self, name: &str) -> Option<usize> {
        self.type_counts
            .iter()
            .find(|(n, _)| *n == name)
            .map(|(_, count)| *count)
    }

    fn log(&self) {
        for (name, count) in &self.type_counts {
            info!(class = name, count, "graph summary");
        }
        for (prefix, iri) in &self.namespaces {
            info!(prefix = %prefix, namespace = %iri, "bound namespace");
        }
    }
}

/// Result of a conversion run
#[derive(Debug, Clone)]
pub struct ConvertReport {
    pub load: LoadReport,
    pub summary: GraphSummary,
    pub tables: Vec<(EntityKind, TableOutcome)>,
}

impl ConvertReport {
    /// Number of tables written successfully
    pub fn written(&self) -> usize {
        self.tables
            .iter()
            .filter(|(_, outcome)| matches!(outcome, TableOutcome::Written(_)))
            .count()
    }

    /// Number of tables whose write failed
    pub fn failed(&self) -> usize {
        self.tables
            .iter()
            .filter(|(_, outcome)| matches!(outcome, TableOutcome::Failed(_)))
            .count()
    }

    pub fn outcome(&self, kind: EntityKind) -> Option<&TableOutcome> {
        self.tables
            .iter()
            .find(|(k, _)| *k == kind)
            .map(|(_, outcome)| outcome)
    }
}

/// Run the whole pipeline: load, summarise, extract, write CSV
///
/// Stops early with [`ConvertError::MissingSourceDir`] or
/// [`ConvertError::EmptyGraph`]; every other failure is confined to one file
/// or one table and recorded in the report.
pub fn convert(options: &ConvertOptions) -> Result<ConvertReport, ConvertError> {
    let (store, load) = load_directory(&options.source_dir)?;
    if store.is_empty() {
        return Err(ConvertError::EmptyGraph);
    }

    let summary = GraphSummary::from_store(&store);
    summary.log();

    let mut sink = CsvSink::new(&options.output_dir);
    let tables = extract_all(&store, &options.entities, &mut sink);

    let report = ConvertReport {
        load,
        summary,
        tables,
    };
    info!(
        written = report.written(),
        failed = report.failed(),
        requested = report.tables.len(),
        "conversion complete"
    );
    Ok(report)
}

/// Extract each kind once, in the given order, and hand its table to `sink`
pub fn extract_all(
    store: &GraphStore,
    kinds: &[EntityKind],
    sink: &mut dyn RecordSink,
) -> Vec<(EntityKind, TableOutcome)> {
    let mut outcomes: Vec<(EntityKind, TableOutcome)> = Vec::with_capacity(kinds.len());

    for &kind in kinds {
        if outcomes.iter().any(|(done, _)| *done == kind) {
            continue;
        }

        let outcome = match kind.extract(store) {
            None => TableOutcome::Empty,
            Some(table) => match sink.write(&table) {
                Ok(summary) => TableOutcome::Written(summary),
                Err(e) => {
                    error!(entity = %kind, error = %e, "failed to write table");
                    TableOutcome::Failed(e.to_string())
                }
            },
        };
        outcomes.push((kind, outcome));
    }

    outcomes
}
