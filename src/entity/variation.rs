//! Variations (`rcgs:Variation`), written to `variations.csv`

use crate::entity::{extract_typed, EntityKind};
use crate::property::FieldSpec;
use crate::record::Table;
use crate::store::GraphStore;
use crate::vocab::RCGS_VARIATION;

pub const FIELDS: &[FieldSpec] = &[
    FieldSpec::direct("contribution", rcgs!("contribution")),
    FieldSpec::direct("contentType", rcgs!("contentType")),
    FieldSpec::direct("variationOf", rcgs!("variationOf")),
    FieldSpec::direct("type", rdf!("type")),
    FieldSpec::direct("label", rdfs!("label")),
    FieldSpec::direct("color", schema!("color")),
    FieldSpec::direct("audio", schema!("audio")),
    FieldSpec::direct("language", dcterms!("language")),
    FieldSpec::direct("date", dcterms!("date")),
    FieldSpec::direct("gamePlatform", schema!("gamePlatform")),
    FieldSpec::direct("aspectRatio", rcgs!("aspectRatio")),
    FieldSpec::direct("middlewareOrGameEngine", rcgs!("middlewareOrGameEngine")),
    FieldSpec::direct("dimension", rcgs!("dimension")),
    FieldSpec::direct("pointOfView", rcgs!("pointOfView")),
    FieldSpec::direct("ending", rcgs!("ending")),
    FieldSpec::direct("multipleEnding", rcgs!("multipleEnding")),
    FieldSpec::direct("disambiguatingDescription", schema!("disambiguatingDescription")),
    FieldSpec::direct("difficultyOption", rcgs!("difficultyOption")),
    FieldSpec::direct("award", schema!("award")),
    FieldSpec::direct("abstract", dcterms!("abstract")),
    FieldSpec::direct("postGameContents", rcgs!("postGameContents")),
];

pub fn extract(store: &GraphStore) -> Option<Table> {
    extract_typed(store, EntityKind::Variation, RCGS_VARIATION, FIELDS)
}
