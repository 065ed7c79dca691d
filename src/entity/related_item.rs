//! Items joined with the package they exemplify, written to `related_items.csv`
//!
//! Selects every `rcgs:Item` with at least one `rcgs:exemplarOf` value. The
//! join target is the first of those values typed `rcgs:Package`; all
//! package columns are read from it. When no value is a package the row is
//! still written, with the join column and every package column empty.

use oxrdf::NamedNodeRef;

use crate::entity::item::{EXEMPLAR_OF, HOLDING_AGENT};
use crate::entity::{extract_subjects, EntityKind};
use crate::property::{project, resolve_link, term_value, FieldSpec};
use crate::record::{Schema, Table};
use crate::store::{as_subject, GraphStore};
use crate::vocab::{RCGS_ITEM, RCGS_PACKAGE};

/// Key column
pub const ITEM_URI: &str = "item_uri";

/// Join column, between the item and package columns
pub const EXEMPLAR_COLUMN: &str = "exemplarOf";

/// Columns read from the item itself
pub const ITEM_FIELDS: &[FieldSpec] = &[
    FieldSpec::direct("item_holdingAgent", HOLDING_AGENT),
    FieldSpec::direct("item_identifier", dcterms!("identifier")),
    FieldSpec::direct("item_spatial", dcterms!("spatial")),
    FieldSpec::direct("item_owns", schema!("owns")),
];

/// Columns read from the joined package
pub const PACKAGE_FIELDS: &[FieldSpec] = &[
    FieldSpec::direct("type", rdf!("type")),
    FieldSpec::direct("name", schema!("name")),
    FieldSpec::direct("parallelTitle", rcgs!("parallelTitle")),
    FieldSpec::direct("alternative", dcterms!("alternative")),
    FieldSpec::direct("abbreviatedTitle", rcgs!("abbreviatedTitle")),
    FieldSpec::direct("edition", dcndl!("edition")),
    FieldSpec::direct("volume", dcndl!("volume")),
    FieldSpec::direct("responsibilityStatement", rcgs!("responsibilityStatement")),
    FieldSpec::direct("creator", dcterms!("creator")),
    FieldSpec::direct("contribution", rcgs!("contribution")),
    FieldSpec::direct("issued", dcterms!("issued")),
    FieldSpec::direct("dimension", rcgs!("dimension")),
    FieldSpec::direct("medium", dcterms!("medium")),
    FieldSpec::direct("identifier", dcterms!("identifier")),
    FieldSpec::direct("gtin13", schema!("gtin13")),
    FieldSpec::direct("isbn", schema!("isbn")),
    FieldSpec::direct("issn", schema!("issn")),
    FieldSpec::direct("modelNumber", rcgs!("modelNumber")),
    FieldSpec::direct("jpNumber", rcgs!("jpNumber")),
    // spelled `ndlBiBID` here, `ndlBibID` in game_packages.csv
    FieldSpec::direct("ndlBiBID", rcgs!("ndlBiBID")),
    FieldSpec::direct("oclcNumber", rcgs!("oclcNumber")),
    FieldSpec::direct("seeAlso", rdfs!("seeAlso")),
    FieldSpec::direct("copyrightYear", schema!("copyrightYear")),
    FieldSpec::direct("accessRights", dcterms!("accessRights")),
    FieldSpec::direct("hasPart", dcterms!("hasPart")),
    FieldSpec::direct("isPartOf", dcterms!("isPartOf")),
    FieldSpec::direct("abstract", dcterms!("abstract")),
    FieldSpec::direct("description", dcterms!("description")),
    FieldSpec::direct("relation", dcterms!("relation")),
    FieldSpec::direct("references", dcterms!("references")),
    FieldSpec::direct("isReferencedBy", dcterms!("isReferencedBy")),
    FieldSpec::direct("language", dcterms!("language")),
    FieldSpec::direct("about", schema!("about")),
    FieldSpec::direct("subjectOf", schema!("subjectOf")),
    FieldSpec::direct("tableOfContents", dcterms!("tableOfContents")),
    FieldSpec::direct("brand", schema!("brand")),
    FieldSpec::direct("producer", rcgs!("producer")),
    FieldSpec::direct("publisher", rcgs!("publisher")),
    FieldSpec::direct("distributor", rcgs!("distributor")),
    FieldSpec::direct("manufacturer", rcgs!("manufacturer")),
    FieldSpec::direct("seriesStatement", rcgs!("seriesStatement")),
    FieldSpec::direct("subseriesStatement", rcgs!("subseriesStatement")),
    FieldSpec::direct("modeOfIssuance", rcgs!("modeOfIssuance")),
    FieldSpec::direct("publicationPeriodicity", dcndl!("publicationPeriodicity")),
    FieldSpec::direct("serialNumber", schema!("serialNumber")),
    FieldSpec::direct("volumeNumber", schema!("volumeNumber")),
    FieldSpec::direct("issueNumber", schema!("issueNumber")),
    FieldSpec::direct("price", schema!("price")),
    FieldSpec::direct("exemplar", rcgs!("exemplar")),
    FieldSpec::direct("downloadUrl", schema!("downloadUrl")),
    FieldSpec::direct("created", dcterms!("created")),
    FieldSpec::direct("locationCreated", schema!("locationCreated")),
    FieldSpec::direct("thumbnailUrl", schema!("thumbnailUrl")),
    FieldSpec::direct("source", dcterms!("source")),
    FieldSpec::language(
        "titleTranscription_jaHrkt",
        dcndl!("titleTranscription"),
        "ja-Hrkt",
    ),
    FieldSpec::language(
        "titleTranscription_jaLatn",
        dcndl!("titleTranscription"),
        "ja-Latn",
    ),
    FieldSpec::nested("format_carrierType", dcterms!("format"), &[rcgs!("carrierType")]),
    FieldSpec::nested("format_extent", dcterms!("format"), &[dcterms!("extent")]),
    FieldSpec::nested("format_dimension", dcterms!("format"), &[rcgs!("dimension")]),
    FieldSpec::nested(
        "format_encodingFormat",
        dcterms!("format"),
        &[schema!("encodingFormat")],
    ),
    FieldSpec::nested("format_contentSize", dcterms!("format"), &[schema!("contentSize")]),
    FieldSpec::nested(
        "format_source",
        dcterms!("format"),
        &[rcgs!("adminMetadata"), dcterms!("source")],
    ),
    FieldSpec::nested(
        "subunit_carrierType",
        rcgs!("formatOfSubunit"),
        &[rcgs!("carrierType")],
    ),
    FieldSpec::nested("subunit_extent", rcgs!("formatOfSubunit"), &[dcterms!("extent")]),
    FieldSpec::nested(
        "subunit_dimension",
        rcgs!("formatOfSubunit"),
        &[rcgs!("dimension")],
    ),
    FieldSpec::nested(
        "subunit_encodingFormat",
        rcgs!("formatOfSubunit"),
        &[schema!("encodingFormat")],
    ),
    FieldSpec::nested(
        "subunit_contentSize",
        rcgs!("formatOfSubunit"),
        &[schema!("contentSize")],
    ),
    FieldSpec::nested(
        "subunit_source",
        rcgs!("formatOfSubunit"),
        &[rcgs!("adminMetadata"), dcterms!("source")],
    ),
    FieldSpec::nested("PA_type", rcgs!("provisionActivity"), &[rdf!("type")]),
    FieldSpec::nested(
        "PA_publisherStatement",
        rcgs!("provisionActivity"),
        &[rcgs!("publisherStatement")],
    ),
    FieldSpec::nested("PA_date", rcgs!("provisionActivity"), &[dcterms!("date")]),
    FieldSpec::nested("PA_spatial", rcgs!("provisionActivity"), &[dcterms!("spatial")]),
    FieldSpec::nested("PA_source", rcgs!("provisionActivity"), &[dcterms!("source")]),
    FieldSpec::nested("PA_note", rcgs!("provisionActivity"), &[skos!("note")]),
    FieldSpec::nested("admin_source", rcgs!("adminMetadata"), &[dcterms!("source")]),
];

/// Header of `related_items.csv`
pub fn schema() -> Schema {
    let mut schema = Schema::keyed(ITEM_URI).with_fields(ITEM_FIELDS);
    schema.push(EXEMPLAR_COLUMN);
    schema.with_fields(PACKAGE_FIELDS)
}

pub fn extract(store: &GraphStore) -> Option<Table> {
    let exemplar_of = NamedNodeRef::new_unchecked(EXEMPLAR_OF);
    let subjects = store
        .subjects_of_type(NamedNodeRef::new_unchecked(RCGS_ITEM))
        .into_iter()
        .filter(|item| store.objects(*item, exemplar_of).next().is_some())
        .collect();

    extract_subjects(EntityKind::RelatedItem, subjects, schema(), |item, row| {
        project(store, Some(item), ITEM_FIELDS, row);

        let package = resolve_link(store, item, EXEMPLAR_OF, RCGS_PACKAGE);
        row.push(package.map(|p| term_value(p).into_owned()).unwrap_or_default());
        project(store, package.and_then(as_subject), PACKAGE_FIELDS, row);
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entity::tests::{turtle_store, PREFIXES};

    #[test]
    fn test_schema_layout() {
        let schema = schema();
        assert_eq!(PACKAGE_FIELDS.len(), 75);
        assert_eq!(schema.len(), 81);
        assert_eq!(schema.columns()[0], "item_uri");
        assert_eq!(schema.columns()[5], "exemplarOf");
        assert_eq!(schema.columns()[6], "type");
        assert_eq!(schema.columns()[80], "admin_source");
    }

    #[test]
    fn test_package_columns_follow_join() {
        let store = turtle_store(&format!(
            "{PREFIXES}
             <http://ex/item> a rcgs:Item ;
                 rcgs:exemplarOf <http://ex/pkg> ;
                 dcndl:holdlingAgent <http://ex/library> .
             <http://ex/pkg> a rcgs:Package ;
                 schema:name \"Foo\" ;
                 rcgs:ndlBiBID \"12345\" ;
                 dcterms:format [
                     rcgs:carrierType \"Cartridge\" ;
                     rcgs:adminMetadata [ dcterms:source \"NDL\" ]
                 ] ;
                 rcgs:adminMetadata [ dcterms:source \"RCGS\" ] ."
        ));
        let table = extract(&store).unwrap();

        assert_eq!(table.len(), 1);
        assert_eq!(table.get(0, "item_uri"), Some("http://ex/item"));
        assert_eq!(table.get(0, "item_holdingAgent"), Some("http://ex/library"));
        assert_eq!(table.get(0, "exemplarOf"), Some("http://ex/pkg"));
        assert_eq!(table.get(0, "name"), Some("Foo"));
        assert_eq!(table.get(0, "ndlBiBID"), Some("12345"));
        assert_eq!(table.get(0, "format_carrierType"), Some("Cartridge"));
        assert_eq!(table.get(0, "format_source"), Some("NDL"));
        assert_eq!(table.get(0, "admin_source"), Some("RCGS"));
    }

    #[test]
    fn test_failed_join_leaves_package_columns_empty() {
        let store = turtle_store(&format!(
            "{PREFIXES}
             <http://ex/item> a rcgs:Item ;
                 rcgs:exemplarOf <http://ex/work> ;
                 dcterms:identifier \"B-2\" .
             <http://ex/work> a rcgs:Work ; schema:name \"Not a package\" ."
        ));
        let table = extract(&store).unwrap();

        assert_eq!(table.len(), 1);
        assert_eq!(table.get(0, "item_identifier"), Some("B-2"));
        assert_eq!(table.get(0, "exemplarOf"), Some(""));
        assert_eq!(table.get(0, "name"), Some(""));
        assert!(table.records()[0].values()[5..].iter().all(String::is_empty));
    }

    #[test]
    fn test_items_without_exemplar_are_skipped() {
        let store = turtle_store(&format!(
            "{PREFIXES} <http://ex/item> a rcgs:Item ; dcterms:identifier \"C-3\" ."
        ));
        assert!(extract(&store).is_none());
    }
}
