//! Vocabulary definitions for the RCGS collection graph
//!
//! Namespaces, class IRIs and the `ns!("localName")` macros used by the
//! entity field tables. The macros expand to string literals so the tables
//! can be built as `const` data.

macro_rules! rdf {
    ($local:literal) => {
        concat!("http://www.w3.org/1999/02/22-rdf-syntax-ns#", $local)
    };
}

macro_rules! rdfs {
    ($local:literal) => {
        concat!("http://www.w3.org/2000/01/rdf-schema#", $local)
    };
}

macro_rules! dcterms {
    ($local:literal) => {
        concat!("http://purl.org/dc/terms/", $local)
    };
}

macro_rules! schema {
    ($local:literal) => {
        concat!("http://schema.org/", $local)
    };
}

macro_rules! dcndl {
    ($local:literal) => {
        concat!("http://ndl.go.jp/dcndl/terms/", $local)
    };
}

macro_rules! rcgs {
    ($local:literal) => {
        concat!("https://collection.rcgs.jp/terms/", $local)
    };
}

macro_rules! skos {
    ($local:literal) => {
        concat!("http://www.w3.org/2004/02/skos/core#", $local)
    };
}

macro_rules! foaf {
    ($local:literal) => {
        concat!("http://xmlns.com/foaf/0.1/", $local)
    };
}

pub const RDF: &str = rdf!("");
pub const RDFS: &str = rdfs!("");
pub const DCTERMS: &str = dcterms!("");
pub const SCHEMA: &str = schema!("");
pub const DCNDL: &str = dcndl!("");
pub const RCGS: &str = rcgs!("");
pub const SKOS: &str = skos!("");
pub const FOAF: &str = foaf!("");

pub const RDF_TYPE: &str = rdf!("type");

/// Game package (a published product)
pub const RCGS_PACKAGE: &str = rcgs!("Package");
/// Physical holding of a package
pub const RCGS_ITEM: &str = rcgs!("Item");
pub const RCGS_VARIATION: &str = rcgs!("Variation");
pub const RCGS_WORK: &str = rcgs!("Work");
pub const FOAF_PERSON: &str = foaf!("Person");
pub const FOAF_ORGANIZATION: &str = foaf!("Organization");

/// NDL bibliographic classes, only counted in the graph summary
pub const DCNDL_BIB_RESOURCE: &str = dcndl!("BibResource");
pub const DCNDL_ITEM: &str = dcndl!("Item");

/// Separator placed between the values of a multi-valued field
pub const VALUE_SEPARATOR: &str = "|";

/// Well-known IRIs of the schema.org JSON-LD context
///
/// Remote contexts are never fetched; these are mapped to a `@vocab` of
/// [`SCHEMA`] instead.
pub const SCHEMA_ORG_CONTEXTS: &[&str] = &[
    "http://schema.org",
    "http://schema.org/",
    "https://schema.org",
    "https://schema.org/",
];
