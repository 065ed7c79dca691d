//! Game packages (`rcgs:Package`), written to `game_packages.csv`

use crate::entity::{extract_typed, EntityKind};
use crate::property::FieldSpec;
use crate::record::Table;
use crate::store::GraphStore;
use crate::vocab::RCGS_PACKAGE;

/// Columns after `resource_uri`, in header order
pub const FIELDS: &[FieldSpec] = &[
    FieldSpec::direct("schema_name", schema!("name")),
    FieldSpec::direct("schema_volumeNumber", schema!("volumeNumber")),
    FieldSpec::direct("schema_issueNumber", schema!("issueNumber")),
    FieldSpec::direct("schema_copyrightYear", schema!("copyrightYear")),
    FieldSpec::direct("dcndl_edition", dcndl!("edition")),
    FieldSpec::direct("dcndl_publicationPeriodicity", dcndl!("publicationPeriodicity")),
    FieldSpec::direct("dcndl_volume", dcndl!("volume")),
    FieldSpec::direct("dcterms_accessRights", dcterms!("accessRights")),
    FieldSpec::direct("dcterms_description", dcterms!("description")),
    FieldSpec::direct("dcterms_hasPart", dcterms!("hasPart")),
    FieldSpec::direct("dcterms_identifier", dcterms!("identifier")),
    FieldSpec::direct("dcterms_isPartOf", dcterms!("isPartOf")),
    FieldSpec::direct("dcterms_issued", dcterms!("issued")),
    FieldSpec::direct("dcterms_rights", dcterms!("rights")),
    FieldSpec::direct("dcterms_tableOfContents", dcterms!("tableOfContents")),
    FieldSpec::direct("dcterms_medium", dcterms!("medium")),
    FieldSpec::direct("rcgs_abbreviatedTitle", rcgs!("abbreviatedTitle")),
    FieldSpec::direct("rcgs_digitalFileType", rcgs!("digitalFileType")),
    FieldSpec::direct("rcgs_distributor", rcgs!("distributor")),
    FieldSpec::direct("rcgs_jpNumber", rcgs!("jpNumber")),
    FieldSpec::direct("rcgs_manufacturer", rcgs!("manufacturer")),
    FieldSpec::direct("rcgs_middlewareOrGameEngine", rcgs!("middlewareOrGameEngine")),
    FieldSpec::direct("rcgs_modelNumber", rcgs!("modelNumber")),
    FieldSpec::direct("rcgs_modeOfIssuance", rcgs!("modeOfIssuance")),
    FieldSpec::direct("rcgs_ndlBibID", rcgs!("ndlBibID")),
    FieldSpec::direct("rcgs_oclcNumber", rcgs!("oclcNumber")),
    FieldSpec::direct("rcgs_parallelTitle", rcgs!("parallelTitle")),
    FieldSpec::direct("rcgs_producer", rcgs!("producer")),
    FieldSpec::direct("rcgs_publisher", rcgs!("publisher")),
    FieldSpec::direct("rcgs_ratingContentDescriptor", rcgs!("ratingContentDescriptor")),
    FieldSpec::direct("rcgs_representativeImage", rcgs!("representativeImage")),
    FieldSpec::direct("rcgs_responsibilityStatement", rcgs!("responsibilityStatement")),
    FieldSpec::direct("rcgs_seriesStatement", rcgs!("seriesStatement")),
    FieldSpec::direct("rcgs_subseriesStatement", rcgs!("subseriesStatement")),
    FieldSpec::direct("rcgs_variantTitle", rcgs!("variantTitle")),
    FieldSpec::direct("rcgs_dimension", rcgs!("dimension")),
    FieldSpec::direct("schema_brand", schema!("brand")),
    FieldSpec::direct("schema_contactPoints", schema!("contactPoints")),
    FieldSpec::direct("schema_contentRating", schema!("contentRating")),
    FieldSpec::direct("schema_gamePlatform", schema!("gamePlatform")),
    FieldSpec::direct("schema_gtin13", schema!("gtin13")),
    FieldSpec::direct("schema_isbn", schema!("isbn")),
    FieldSpec::direct("schema_issn", schema!("issn")),
    FieldSpec::direct("schema_numberOfPlayers", schema!("numberOfPlayers")),
    FieldSpec::direct("schema_price", schema!("price")),
    FieldSpec::direct("schema_requirement", schema!("requirement")),
    FieldSpec::direct("schema_serialNumber", schema!("serialNumber")),
    FieldSpec::direct("schema_thumbnailUrl", schema!("thumbnailUrl")),
    FieldSpec::direct("schema_url", schema!("url")),
    FieldSpec::direct("schema_videoFrameSize", schema!("videoFrameSize")),
    FieldSpec::direct("rdf_type", rdf!("type")),
    FieldSpec::language(
        "dcndl_titleTranscription_jaHrkt",
        dcndl!("titleTranscription"),
        "ja-Hrkt",
    ),
    FieldSpec::language(
        "dcndl_titleTranscription_jaLatn",
        dcndl!("titleTranscription"),
        "ja-Latn",
    ),
    // dcterms:format nodes
    FieldSpec::nested("format_rdfs_label", dcterms!("format"), &[rdfs!("label")]),
    FieldSpec::nested("format_rcgs_carrierType", dcterms!("format"), &[rcgs!("carrierType")]),
    FieldSpec::nested("format_dcterms_extent", dcterms!("format"), &[dcterms!("extent")]),
    FieldSpec::nested(
        "format_schema_encodingFormat",
        dcterms!("format"),
        &[schema!("encodingFormat")],
    ),
    FieldSpec::nested("format_rcgs_dimension", dcterms!("format"), &[rcgs!("dimension")]),
    FieldSpec::nested("format_schema_fileSize", dcterms!("format"), &[schema!("fileSize")]),
    FieldSpec::nested(
        "format_dcterms_description",
        dcterms!("format"),
        &[dcterms!("description")],
    ),
    FieldSpec::nested("format_skos_note", dcterms!("format"), &[skos!("note")]),
    // rcgs:formatOfSubunit nodes
    FieldSpec::nested("subunit_rdfs_label", rcgs!("formatOfSubunit"), &[rdfs!("label")]),
    FieldSpec::nested(
        "subunit_rcgs_carrierType",
        rcgs!("formatOfSubunit"),
        &[rcgs!("carrierType")],
    ),
    FieldSpec::nested(
        "subunit_dcterms_extent",
        rcgs!("formatOfSubunit"),
        &[dcterms!("extent")],
    ),
    FieldSpec::nested(
        "subunit_schema_encodingFormat",
        rcgs!("formatOfSubunit"),
        &[schema!("encodingFormat")],
    ),
    FieldSpec::nested(
        "subunit_rcgs_dimension",
        rcgs!("formatOfSubunit"),
        &[rcgs!("dimension")],
    ),
    FieldSpec::nested(
        "subunit_schema_fileSize",
        rcgs!("formatOfSubunit"),
        &[schema!("fileSize")],
    ),
    FieldSpec::nested(
        "subunit_dcterms_description",
        rcgs!("formatOfSubunit"),
        &[dcterms!("description")],
    ),
    FieldSpec::nested("subunit_skos_note", rcgs!("formatOfSubunit"), &[skos!("note")]),
    // rcgs:provisionActivity nodes
    FieldSpec::nested("PA_rdf_type", rcgs!("provisionActivity"), &[rdf!("type")]),
    FieldSpec::nested(
        "PA_rcgs_publisherStatement",
        rcgs!("provisionActivity"),
        &[rcgs!("publisherStatement")],
    ),
    FieldSpec::nested("PA_dcterms_date", rcgs!("provisionActivity"), &[dcterms!("date")]),
    FieldSpec::nested(
        "PA_dcterms_spatial",
        rcgs!("provisionActivity"),
        &[dcterms!("spatial")],
    ),
    FieldSpec::nested(
        "PA_dcterms_source",
        rcgs!("provisionActivity"),
        &[dcterms!("source")],
    ),
    FieldSpec::nested("PA_skos_note", rcgs!("provisionActivity"), &[skos!("note")]),
];

pub fn extract(store: &GraphStore) -> Option<Table> {
    extract_typed(store, EntityKind::Package, RCGS_PACKAGE, FIELDS)
}
