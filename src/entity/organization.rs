//! Organizations (`foaf:Organization`), written to `organizations.csv`

use crate::entity::{extract_typed, EntityKind};
use crate::property::FieldSpec;
use crate::record::Table;
use crate::store::GraphStore;
use crate::vocab::FOAF_ORGANIZATION;

pub const FIELDS: &[FieldSpec] = &[
    FieldSpec::language("skos_prefLabel_ja", skos!("prefLabel"), "ja"),
    FieldSpec::language("skos_prefLabel_en", skos!("prefLabel"), "en"),
    FieldSpec::direct("altLabel", skos!("altLabel")),
    FieldSpec::direct("homepage", foaf!("homepage")),
    FieldSpec::direct("description", dcterms!("description")),
    FieldSpec::direct("identifier", dcterms!("identifier")),
    FieldSpec::direct("ndlAuthoritiesID", rcgs!("ndlAuthoritiesID")),
    FieldSpec::direct("viafID", rcgs!("viafID")),
    FieldSpec::direct("wikidataID", rcgs!("wikidataID")),
    FieldSpec::direct("twitterID", rcgs!("twitterID")),
    FieldSpec::direct("seeAlso", rdfs!("seeAlso")),
    FieldSpec::direct("language", dcterms!("language")),
    FieldSpec::direct("disambiguatingDescription", schema!("disambiguatingDescription")),
    FieldSpec::direct("note", skos!("note")),
    FieldSpec::direct("additionalType", schema!("additionalType")),
    FieldSpec::direct("startDate", schema!("startDate")),
    FieldSpec::direct("endDate", schema!("endDate")),
    FieldSpec::direct("address", schema!("address")),
    FieldSpec::direct("latitude", schema!("latitude")),
    FieldSpec::direct("longitude", schema!("longitude")),
    FieldSpec::direct("relatedOrganization", rcgs!("relatedOrganization")),
    FieldSpec::direct("member", foaf!("member")),
    FieldSpec::direct("logo", foaf!("logo")),
    FieldSpec::nested("source", rcgs!("adminMetadata"), &[dcterms!("source")]),
];

pub fn extract(store: &GraphStore) -> Option<Table> {
    extract_typed(store, EntityKind::Organization, FOAF_ORGANIZATION, FIELDS)
}
