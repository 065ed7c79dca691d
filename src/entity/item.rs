//! Physical holdings (`rcgs:Item`), written to `items.csv`

use crate::entity::{extract_typed, EntityKind};
use crate::property::FieldSpec;
use crate::record::Table;
use crate::store::GraphStore;
use crate::vocab::{RCGS_ITEM, RCGS_PACKAGE};

/// Item to Package join predicate
pub const EXEMPLAR_OF: &str = rcgs!("exemplarOf");

/// Holding agent predicate as published in the collection data
pub const HOLDING_AGENT: &str = dcndl!("holdlingAgent");

pub const FIELDS: &[FieldSpec] = &[
    FieldSpec::link("exemplarOf", EXEMPLAR_OF, RCGS_PACKAGE),
    FieldSpec::direct("identifier", dcterms!("identifier")),
    FieldSpec::direct("spatial", dcterms!("spatial")),
    FieldSpec::direct("owns", schema!("owns")),
    FieldSpec::direct("holdingAgent", HOLDING_AGENT),
];

pub fn extract(store: &GraphStore) -> Option<Table> {
    extract_typed(store, EntityKind::Item, RCGS_ITEM, FIELDS)
}
