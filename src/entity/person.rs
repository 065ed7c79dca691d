//! Persons (`foaf:Person`), written to `persons.csv`

use crate::entity::{extract_typed, EntityKind};
use crate::property::FieldSpec;
use crate::record::Table;
use crate::store::GraphStore;
use crate::vocab::FOAF_PERSON;

pub const FIELDS: &[FieldSpec] = &[
    FieldSpec::language("prefLabel_ja", skos!("prefLabel"), "ja"),
    FieldSpec::language("prefLabel_en", skos!("prefLabel"), "en"),
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
    FieldSpec::direct("hasOccupation", schema!("hasOccupation")),
    FieldSpec::direct("birthDate", schema!("birthDate")),
    FieldSpec::direct("deathDate", schema!("deathDate")),
    FieldSpec::direct("birthPlace", schema!("birthPlace")),
    FieldSpec::direct("deathPlace", schema!("deathPlace")),
    FieldSpec::direct("homeLocation", schema!("homeLocation")),
    FieldSpec::direct("mbox", foaf!("mbox")),
    FieldSpec::direct("addressCountry", schema!("addressCountry")),
    FieldSpec::direct("additionalName", schema!("additionalName")),
    FieldSpec::direct("title", foaf!("title")),
    FieldSpec::nested("source", rcgs!("adminMetadata"), &[dcterms!("source")]),
];

pub fn extract(store: &GraphStore) -> Option<Table> {
    extract_typed(store, EntityKind::Person, FOAF_PERSON, FIELDS)
}
