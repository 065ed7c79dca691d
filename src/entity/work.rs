//! Works (`rcgs:Work`), written to `works.csv`
//!
//! Besides flat properties a work points at labelled concept nodes (genre,
//! theme, series and the like). Each category is flattened to the
//! `rdfs:label` values of every node it reaches.

use crate::entity::{extract_typed, EntityKind};
use crate::property::FieldSpec;
use crate::record::Table;
use crate::store::GraphStore;
use crate::vocab::RCGS_WORK;

pub const FIELDS: &[FieldSpec] = &[
    FieldSpec::direct("label", rdfs!("label")),
    FieldSpec::direct("prefLabel", skos!("prefLabel")),
    FieldSpec::direct("altLabel", skos!("altLabel")),
    FieldSpec::direct("spatial", dcterms!("spatial")),
    FieldSpec::direct("date", dcterms!("date")),
    FieldSpec::direct("description", dcterms!("description")),
    FieldSpec::direct("identifier", dcterms!("identifier")),
    FieldSpec::direct("closeMatch", skos!("closeMatch")),
    FieldSpec::direct("twitch", rcgs!("twitch")),
    FieldSpec::direct("freebase", rcgs!("freebase")),
    FieldSpec::direct("mobyGames", rcgs!("mobyGames")),
    FieldSpec::direct("metacritic", rcgs!("metacritic")),
    FieldSpec::direct("seeAlso", rdfs!("seeAlso")),
    FieldSpec::direct("imdb", rcgs!("imdb")),
    FieldSpec::direct("abstract", dcterms!("abstract")),
    FieldSpec::direct("audience", dcterms!("audience")),
    FieldSpec::direct("natureOfContent", rcgs!("natureOfContent")),
    FieldSpec::direct("serialNumber", schema!("serialNumber")),
    FieldSpec::direct("disambiguatingDescription", schema!("disambiguatingDescription")),
    FieldSpec::direct("locationCreated", schema!("locationCreated")),
    FieldSpec::direct("about", schema!("about")),
    FieldSpec::direct("subjectOf", schema!("subjectOf")),
    FieldSpec::direct("gameLocation", schema!("gameLocation")),
    FieldSpec::direct("creator", dcterms!("creator")),
    FieldSpec::direct("productionCompany", schema!("productionCompany")),
    FieldSpec::direct("relatedAgent", rcgs!("relatedAgent")),
    FieldSpec::direct("logo", schema!("logo")),
    FieldSpec::direct("relation", dcterms!("relation")),
    FieldSpec::direct("isPartOf", dcterms!("isPartOf")),
    FieldSpec::direct("hasPart", dcterms!("hasPart")),
    FieldSpec::direct("precedes", rcgs!("precedes")),
    FieldSpec::direct("succeeds", rcgs!("succeeds")),
    FieldSpec::direct("sequelTo", rcgs!("sequelTo")),
    FieldSpec::direct("sequel", rcgs!("sequel")),
    FieldSpec::direct("remadeAs", rcgs!("remadeAs")),
    FieldSpec::direct("complements", rcgs!("complements")),
    FieldSpec::direct("expandedAs", rcgs!("expandedAs")),
    FieldSpec::direct("spinOff", rcgs!("spinOff")),
    FieldSpec::direct("note", skos!("note")),
    FieldSpec::nested("genre", schema!("genre"), &[rdfs!("label")]),
    FieldSpec::nested("narrativeGenre", rcgs!("narrativeGenre"), &[rdfs!("label")]),
    FieldSpec::nested("theme", rcgs!("theme"), &[rdfs!("label")]),
    FieldSpec::nested("mood", rcgs!("mood"), &[rdfs!("label")]),
    FieldSpec::nested("setting", rcgs!("setting"), &[rdfs!("label")]),
    FieldSpec::nested("series", rcgs!("series"), &[rdfs!("label")]),
    FieldSpec::nested("franchise", rcgs!("franchise"), &[rdfs!("label")]),
    FieldSpec::nested("mechanic", rcgs!("mechanic"), &[rdfs!("label")]),
    FieldSpec::nested("protagonist", rcgs!("protagonist"), &[rdfs!("label")]),
];

pub fn extract(store: &GraphStore) -> Option<Table> {
    extract_typed(store, EntityKind::Work, RCGS_WORK, FIELDS)
}
