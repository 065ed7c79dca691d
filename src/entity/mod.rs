//! Entity extractors
//!
//! Every entity kind is a subject selector plus a static field table. The
//! tables are data; the traversal they drive lives in [`crate::property`],
//! and the shared row loop lives here.

use std::fmt;
use std::str::FromStr;

use oxrdf::{NamedNodeRef, NamedOrBlankNodeRef};
use tracing::{debug, info, warn};

use crate::property::{project, subject_value, FieldSpec};
use crate::record::{EntityRecord, Schema, Table};
use crate::store::GraphStore;

pub mod item;
pub mod organization;
pub mod package;
pub mod person;
pub mod related_item;
pub mod variation;
pub mod work;

/// Key column of every table keyed by its own subject
pub const RESOURCE_URI: &str = "resource_uri";

/// Progress is logged once per this many subjects
const PROGRESS_INTERVAL: usize = 100;

/// The seven projected entity kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum EntityKind {
    Package,
    Item,
    Person,
    Organization,
    Variation,
    Work,
    RelatedItem,
}

impl EntityKind {
    /// Canonical extraction order
    pub const ALL: [EntityKind; 7] = [
        EntityKind::Package,
        EntityKind::Item,
        EntityKind::Person,
        EntityKind::Organization,
        EntityKind::Variation,
        EntityKind::Work,
        EntityKind::RelatedItem,
    ];

    /// CSV file written for this kind
    pub fn file_name(self) -> &'static str {
        match self {
            EntityKind::Package => "game_packages.csv",
            EntityKind::Item => "items.csv",
            EntityKind::Person => "persons.csv",
            EntityKind::Organization => "organizations.csv",
            EntityKind::Variation => "variations.csv",
            EntityKind::Work => "works.csv",
            EntityKind::RelatedItem => "related_items.csv",
        }
    }

    /// Short name used on the command line and in log fields
    pub fn label(self) -> &'static str {
        match self {
            EntityKind::Package => "package",
            EntityKind::Item => "item",
            EntityKind::Person => "person",
            EntityKind::Organization => "organization",
            EntityKind::Variation => "variation",
            EntityKind::Work => "work",
            EntityKind::RelatedItem => "related-item",
        }
    }

    /// Build the table of this kind, `None` when no subject qualifies
    pub fn extract(self, store: &GraphStore) -> Option<Table> {
        match self {
            EntityKind::Package => package::extract(store),
            EntityKind::Item => item::extract(store),
            EntityKind::Person => person::extract(store),
            EntityKind::Organization => organization::extract(store),
            EntityKind::Variation => variation::extract(store),
            EntityKind::Work => work::extract(store),
            EntityKind::RelatedItem => related_item::extract(store),
        }
    }
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for EntityKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_lowercase().replace('_', "-");
        EntityKind::ALL
            .into_iter()
            .find(|kind| kind.label() == wanted)
            .ok_or_else(|| {
                let known: Vec<&str> = EntityKind::ALL.iter().map(|k| k.label()).collect();
                format!("unknown entity kind '{}' (expected one of: {})", s, known.join(", "))
            })
    }
}

/// Run the row builder over `subjects`, keying each row by its subject
///
/// `fill` appends the remaining cells of one row after the key.
pub(crate) fn extract_subjects<'a>(
    kind: EntityKind,
    subjects: Vec<NamedOrBlankNodeRef<'a>>,
    schema: Schema,
    mut fill: impl FnMut(NamedOrBlankNodeRef<'a>, &mut Vec<String>),
) -> Option<Table> {
    let total = subjects.len();
    info!(entity = %kind, subjects = total, "extracting");

    if subjects.is_empty() {
        warn!(entity = %kind, "no subjects found, skipping table");
        return None;
    }

    let mut table = Table::new(kind, schema);
    for (i, subject) in subjects.into_iter().enumerate() {
        if i % PROGRESS_INTERVAL == 0 {
            debug!(entity = %kind, progress = i + 1, total, "processing");
        }

        let mut row = Vec::with_capacity(table.schema().len());
        row.push(subject_value(subject).to_string());
        fill(subject, &mut row);
        table.push(EntityRecord::new(row));
    }

    info!(
        entity = %kind,
        rows = table.len(),
        columns = table.schema().len(),
        "extraction complete"
    );
    Some(table)
}

/// Table of all subjects typed `type_iri`, one row each, `fields` after the key
pub(crate) fn extract_typed(
    store: &GraphStore,
    kind: EntityKind,
    type_iri: &'static str,
    fields: &[FieldSpec],
) -> Option<Table> {
    let subjects = store.subjects_of_type(NamedNodeRef::new_unchecked(type_iri));
    let schema = Schema::keyed(RESOURCE_URI).with_fields(fields);
    extract_subjects(kind, subjects, schema, |subject, row| {
        project(store, Some(subject), fields, row)
    })
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::loader::{parse_document, RdfFormat};
    use rstest::rstest;

    /// Store built from one inline Turtle document
    pub(crate) fn turtle_store(turtle: &str) -> GraphStore {
        let doc = parse_document(turtle.as_bytes(), RdfFormat::Turtle, None, "inline").unwrap();
        let mut store = GraphStore::new();
        for triple in doc.triples {
            store.insert(triple);
        }
        store
    }

    pub(crate) const PREFIXES: &str = r#"
        @prefix rdf: <http://www.w3.org/1999/02/22-rdf-syntax-ns#> .
        @prefix rdfs: <http://www.w3.org/2000/01/rdf-schema#> .
        @prefix dcterms: <http://purl.org/dc/terms/> .
        @prefix schema: <http://schema.org/> .
        @prefix dcndl: <http://ndl.go.jp/dcndl/terms/> .
        @prefix rcgs: <https://collection.rcgs.jp/terms/> .
        @prefix skos: <http://www.w3.org/2004/02/skos/core#> .
        @prefix foaf: <http://xmlns.com/foaf/0.1/> .
    "#;

    #[rstest]
    #[case("package", EntityKind::Package)]
    #[case("related-item", EntityKind::RelatedItem)]
    #[case("related_item", EntityKind::RelatedItem)]
    #[case(" Work ", EntityKind::Work)]
    fn test_kind_from_str(#[case] input: &str, #[case] expected: EntityKind) {
        assert_eq!(input.parse::<EntityKind>().unwrap(), expected);
    }

    #[test]
    fn test_kind_from_str_unknown() {
        let err = "bibresource".parse::<EntityKind>().unwrap_err();
        assert!(err.contains("related-item"));
    }

    #[test]
    fn test_file_names_are_distinct() {
        let mut names: Vec<_> = EntityKind::ALL.iter().map(|k| k.file_name()).collect();
        names.sort();
        names.dedup();
        assert_eq!(names.len(), EntityKind::ALL.len());
    }

    #[test]
    fn test_no_subjects_yields_no_table() {
        let store = turtle_store(&format!(
            "{PREFIXES} <http://ex/p> a rcgs:Package ; schema:name \"Foo\"@en ."
        ));
        assert!(EntityKind::Person.extract(&store).is_none());
        assert!(EntityKind::Package.extract(&store).is_some());
    }

    #[test]
    fn test_every_row_carries_full_schema() {
        let store = turtle_store(&format!(
            "{PREFIXES}
             <http://ex/w1> a rcgs:Work ; rdfs:label \"One\" .
             <http://ex/w2> a rcgs:Work ."
        ));
        let table = EntityKind::Work.extract(&store).unwrap();
        assert_eq!(table.len(), 2);
        for record in table.records() {
            assert_eq!(record.values().len(), table.schema().len());
        }
        assert_eq!(table.get(0, "label"), Some("One"));
        assert_eq!(table.get(1, "label"), Some(""));
    }
}
