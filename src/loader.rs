//! RDF file discovery and parsing
//!
//! Every file is parsed into its own [`GraphStore`] first and only merged
//! into the combined graph once it parsed cleanly, so a broken file never
//! leaves partial triples behind.

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use oxrdf::{BlankNode, NamedOrBlankNode, Term, Triple};
use oxrdfxml::RdfXmlParser;
use oxttl::n3::{N3Quad, N3Term};
use oxttl::{N3Parser, NTriplesParser, TurtleParser};
use tracing::{info, warn};
use url::Url;

use crate::error::ConvertError;
use crate::jsonld;
use crate::store::GraphStore;

/// Serialization of an input file, chosen from its extension
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RdfFormat {
    Turtle,
    RdfXml,
    N3,
    NTriples,
    JsonLd,
}

impl RdfFormat {
    /// Recognised extensions in discovery order
    pub const EXTENSIONS: [(&'static str, RdfFormat); 6] = [
        ("ttl", RdfFormat::Turtle),
        ("rdf", RdfFormat::RdfXml),
        ("xml", RdfFormat::RdfXml),
        ("n3", RdfFormat::N3),
        ("nt", RdfFormat::NTriples),
        ("jsonld", RdfFormat::JsonLd),
    ];

    pub fn from_extension(extension: &str) -> Option<Self> {
        Self::EXTENSIONS
            .iter()
            .find(|(ext, _)| *ext == extension)
            .map(|(_, format)| *format)
    }

    /// Format for a path, falling back to Turtle for anything unrecognised
    pub fn from_path(path: &Path) -> Self {
        path.extension()
            .and_then(|e| e.to_str())
            .and_then(Self::from_extension)
            .unwrap_or(RdfFormat::Turtle)
    }

    pub fn name(self) -> &'static str {
        match self {
            RdfFormat::Turtle => "turtle",
            RdfFormat::RdfXml => "rdf/xml",
            RdfFormat::N3 => "n3",
            RdfFormat::NTriples => "n-triples",
            RdfFormat::JsonLd => "json-ld",
        }
    }
}

/// Triples and prefix declarations read from one document
#[derive(Debug, Default)]
pub struct ParsedDocument {
    pub triples: Vec<Triple>,
    pub prefixes: Vec<(String, String)>,
}

/// Outcome of loading a source directory
#[derive(Debug, Clone, Default)]
pub struct LoadReport {
    /// Files with a recognised extension
    pub files_found: usize,
    /// Files that parsed and were merged
    pub files_loaded: usize,
    /// Skipped files with the reason they failed
    pub failures: Vec<(PathBuf, String)>,
    /// Distinct triples in the merged graph
    pub triples: usize,
}

/// Gives blank nodes a label that is unique to the file they came from
///
/// Labels are assigned in order of first appearance, so the same file always
/// produces the same labels regardless of what the parser generated for
/// anonymous nodes.
#[derive(Debug)]
struct BlankNodeScope {
    file_index: usize,
    labels: HashMap<String, BlankNode>,
}

impl BlankNodeScope {
    fn new(file_index: usize) -> Self {
        Self {
            file_index,
            labels: HashMap::new(),
        }
    }

    fn relabel(&mut self, node: &BlankNode) -> BlankNode {
        let next = self.labels.len();
        let file_index = self.file_index;
        self.labels
            .entry(node.as_str().to_string())
            .or_insert_with(|| BlankNode::new_unchecked(format!("f{}b{}", file_index, next)))
            .clone()
    }

    fn subject(&mut self, subject: NamedOrBlankNode) -> NamedOrBlankNode {
        match subject {
            NamedOrBlankNode::BlankNode(node) => self.relabel(&node).into(),
            other => other,
        }
    }

    fn object(&mut self, object: Term) -> Term {
        match object {
            Term::BlankNode(node) => self.relabel(&node).into(),
            other => other,
        }
    }

    fn triple(&mut self, triple: Triple) -> Triple {
        let subject = self.subject(triple.subject);
        let object = self.object(triple.object);
        Triple::new(subject, triple.predicate, object)
    }
}

/// Base IRI for a file: its absolute `file://` URL
fn base_iri_for(path: &Path) -> Option<String> {
    let absolute = fs::canonicalize(path).ok()?;
    Url::from_file_path(absolute).ok().map(|u| u.to_string())
}

/// Parse one document held in memory
///
/// `source` names the document in error messages.
pub fn parse_document(
    data: &[u8],
    format: RdfFormat,
    base_iri: Option<&str>,
    source: &str,
) -> Result<ParsedDocument, ConvertError> {
    let parse_error = |reason: String| ConvertError::Parse {
        path: source.to_string(),
        reason,
    };
    let iri_error = |iri: &str, reason: String| ConvertError::InvalidIri {
        iri: iri.to_string(),
        reason,
    };

    let mut document = ParsedDocument::default();

    match format {
        RdfFormat::Turtle => {
            let mut parser = TurtleParser::new();
            if let Some(base) = base_iri {
                parser = parser
                    .with_base_iri(base)
                    .map_err(|e| iri_error(base, e.to_string()))?;
            }
            let mut reader = parser.for_slice(data);
            for result in reader.by_ref() {
                document
                    .triples
                    .push(result.map_err(|e| parse_error(e.to_string()))?);
            }
            document.prefixes = reader
                .prefixes()
                .map(|(prefix, iri)| (prefix.to_string(), iri.to_string()))
                .collect();
        }
        RdfFormat::NTriples => {
            for result in NTriplesParser::new().for_slice(data) {
                document
                    .triples
                    .push(result.map_err(|e| parse_error(e.to_string()))?);
            }
        }
        RdfFormat::N3 => {
            let mut parser = N3Parser::new();
            if let Some(base) = base_iri {
                parser = parser
                    .with_base_iri(base)
                    .map_err(|e| iri_error(base, e.to_string()))?;
            }
            let mut reader = parser.for_slice(data);
            for result in reader.by_ref() {
                let quad = result.map_err(|e| parse_error(e.to_string()))?;
                // Formulae and rules have no plain-triple reading
                if let Some(triple) = n3_quad_to_triple(quad) {
                    document.triples.push(triple);
                }
            }
            document.prefixes = reader
                .prefixes()
                .map(|(prefix, iri)| (prefix.to_string(), iri.to_string()))
                .collect();
        }
        RdfFormat::RdfXml => {
            let mut parser = RdfXmlParser::new();
            if let Some(base) = base_iri {
                parser = parser
                    .with_base_iri(base)
                    .map_err(|e| iri_error(base, e.to_string()))?;
            }
            for result in parser.for_reader(data) {
                document
                    .triples
                    .push(result.map_err(|e| parse_error(e.to_string()))?);
            }
        }
        RdfFormat::JsonLd => {
            let value: serde_json::Value =
                serde_json::from_slice(data).map_err(|e| parse_error(e.to_string()))?;
            document = jsonld::to_triples(&value, base_iri, source)?;
        }
    }

    Ok(document)
}

fn n3_quad_to_triple(quad: N3Quad) -> Option<Triple> {
    if !quad.graph_name.is_default_graph() {
        return None;
    }

    let subject: NamedOrBlankNode = match quad.subject {
        N3Term::NamedNode(node) => node.into(),
        N3Term::BlankNode(node) => node.into(),
        _ => return None,
    };
    let predicate = match quad.predicate {
        N3Term::NamedNode(node) => node,
        _ => return None,
    };
    let object: Term = match quad.object {
        N3Term::NamedNode(node) => node.into(),
        N3Term::BlankNode(node) => node.into(),
        N3Term::Literal(literal) => literal.into(),
        _ => return None,
    };

    Some(Triple::new(subject, predicate, object))
}

/// Parse a single file into its own store
///
/// Blank nodes are relabelled into the namespace of `file_index`.
pub fn load_file(path: &Path, file_index: usize) -> Result<GraphStore, ConvertError> {
    let data = fs::read(path).map_err(|e| ConvertError::Parse {
        path: path.display().to_string(),
        reason: e.to_string(),
    })?;
    let base = base_iri_for(path);
    let document = parse_document(
        &data,
        RdfFormat::from_path(path),
        base.as_deref(),
        &path.display().to_string(),
    )?;

    let mut scope = BlankNodeScope::new(file_index);
    let mut store = GraphStore::new();
    for triple in document.triples {
        store.insert(scope.triple(triple));
    }
    for (prefix, iri) in document.prefixes {
        store.bind_namespace(prefix, iri);
    }

    Ok(store)
}

/// Find loadable files directly inside `dir`
///
/// Files are grouped by extension in [`RdfFormat::EXTENSIONS`] order and
/// sorted by name within each group.
pub fn discover_files(dir: &Path) -> Result<Vec<PathBuf>, ConvertError> {
    let mut candidates: Vec<PathBuf> = Vec::new();
    for entry in fs::read_dir(dir)? {
        let path = entry?.path();
        if path.is_file() {
            candidates.push(path);
        }
    }
    candidates.sort();

    let mut files = Vec::new();
    for (extension, _) in RdfFormat::EXTENSIONS {
        files.extend(
            candidates
                .iter()
                .filter(|p| p.extension().and_then(|e| e.to_str()) == Some(extension))
                .cloned(),
        );
    }

    Ok(files)
}

/// Load and merge every RDF file in `dir`
///
/// Files that fail to read or parse are logged and skipped.
pub fn load_directory(dir: &Path) -> Result<(GraphStore, LoadReport), ConvertError> {
    if !dir.is_dir() {
        return Err(ConvertError::MissingSourceDir(dir.to_path_buf()));
    }

    info!(source = %dir.display(), "loading RDF files");

    let files = discover_files(dir)?;
    let mut merged = GraphStore::new();
    let mut report = LoadReport {
        files_found: files.len(),
        ..LoadReport::default()
    };

    for (index, path) in files.iter().enumerate() {
        info!(file = %path.display(), format = RdfFormat::from_path(path).name(), "loading");
        match load_file(path, index) {
            Ok(store) => {
                info!(file = %path.display(), triples = store.len(), "loaded");
                merged.merge(store);
                report.files_loaded += 1;
            }
            Err(e) => {
                warn!(file = %path.display(), error = %e, "skipping file");
                report.failures.push((path.clone(), e.to_string()));
            }
        }
    }

    report.triples = merged.len();
    info!(
        files_found = report.files_found,
        files_loaded = report.files_loaded,
        triples = report.triples,
        "load complete"
    );

    Ok((merged, report))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    const PACKAGE_TTL: &str = r#"
        @prefix rcgs: <https://collection.rcgs.jp/terms/> .
        @prefix schema: <http://schema.org/> .

        <https://collection.rcgs.jp/package/1> a rcgs:Package ;
            schema:name "Foo"@en ;
            <https://purl.org/dc/terms/format> [ rcgs:carrierType "DVD" ] .
    "#;

    #[test]
    fn test_format_from_path() {
        assert_eq!(RdfFormat::from_path(Path::new("a.ttl")), RdfFormat::Turtle);
        assert_eq!(RdfFormat::from_path(Path::new("a.rdf")), RdfFormat::RdfXml);
        assert_eq!(RdfFormat::from_path(Path::new("a.xml")), RdfFormat::RdfXml);
        assert_eq!(RdfFormat::from_path(Path::new("a.n3")), RdfFormat::N3);
        assert_eq!(RdfFormat::from_path(Path::new("a.nt")), RdfFormat::NTriples);
        assert_eq!(RdfFormat::from_path(Path::new("a.jsonld")), RdfFormat::JsonLd);
        assert_eq!(RdfFormat::from_path(Path::new("a.txt")), RdfFormat::Turtle);
        assert_eq!(RdfFormat::from_path(Path::new("noext")), RdfFormat::Turtle);
    }

    #[test]
    fn test_parse_turtle_with_prefixes() {
        let doc = parse_document(PACKAGE_TTL.as_bytes(), RdfFormat::Turtle, None, "mem").unwrap();
        assert_eq!(doc.triples.len(), 4);
        assert!(doc
            .prefixes
            .contains(&("rcgs".to_string(), "https://collection.rcgs.jp/terms/".to_string())));
    }

    #[test]
    fn test_parse_ntriples() {
        let nt = "<http://ex/a> <http://ex/p> \"v\" .\n<http://ex/a> <http://ex/q> <http://ex/b> .\n";
        let doc = parse_document(nt.as_bytes(), RdfFormat::NTriples, None, "mem").unwrap();
        assert_eq!(doc.triples.len(), 2);
    }

    #[test]
    fn test_parse_rdfxml() {
        let xml = r#"<?xml version="1.0"?>
            <rdf:RDF xmlns:rdf="http://www.w3.org/1999/02/22-rdf-syntax-ns#"
                     xmlns:schema="http://schema.org/">
              <rdf:Description rdf:about="http://ex/a">
                <schema:name xml:lang="ja">名前</schema:name>
              </rdf:Description>
            </rdf:RDF>"#;
        let doc = parse_document(xml.as_bytes(), RdfFormat::RdfXml, None, "mem").unwrap();
        assert_eq!(doc.triples.len(), 1);
    }

    #[test]
    fn test_parse_error_is_reported() {
        let result = parse_document(b"<http://ex/a> <http://ex/p> .", RdfFormat::Turtle, None, "bad.ttl");
        match result {
            Err(ConvertError::Parse { path, .. }) => assert_eq!(path, "bad.ttl"),
            other => panic!("expected parse error, got {:?}", other),
        }
    }

    #[test]
    fn test_malformed_json_is_a_parse_error() {
        let result = parse_document(b"{\"@id\": ", RdfFormat::JsonLd, None, "bad.jsonld");
        match result {
            Err(ConvertError::Parse { path, .. }) => assert_eq!(path, "bad.jsonld"),
            other => panic!("expected parse error, got {:?}", other),
        }
    }

    #[test]
    fn test_blank_node_scope_is_deterministic_per_file() {
        let mut first = BlankNodeScope::new(0);
        let mut second = BlankNodeScope::new(1);
        let node = BlankNode::new("x").unwrap();

        let a = first.relabel(&node);
        assert_eq!(a, first.relabel(&node));
        assert_eq!(a.as_str(), "f0b0");
        assert_ne!(a, second.relabel(&node));
    }

    #[test]
    fn test_discover_files_orders_by_extension_group() {
        let dir = tempfile::tempdir().unwrap();
        for name in ["b.ttl", "a.jsonld", "a.ttl", "c.rdf", "notes.txt", "d.nt"] {
            fs::File::create(dir.path().join(name)).unwrap();
        }

        let files: Vec<String> = discover_files(dir.path())
            .unwrap()
            .iter()
            .map(|p| p.file_name().unwrap().to_string_lossy().into_owned())
            .collect();
        assert_eq!(files, vec!["a.ttl", "b.ttl", "c.rdf", "d.nt", "a.jsonld"]);
    }

    #[test]
    fn test_load_directory_skips_broken_file() {
        let dir = tempfile::tempdir().unwrap();
        let mut good = fs::File::create(dir.path().join("good.ttl")).unwrap();
        good.write_all(PACKAGE_TTL.as_bytes()).unwrap();
        let mut bad = fs::File::create(dir.path().join("bad.nt")).unwrap();
        bad.write_all(b"this is not n-triples").unwrap();

        let (store, report) = load_directory(dir.path()).unwrap();
        assert_eq!(report.files_found, 2);
        assert_eq!(report.files_loaded, 1);
        assert_eq!(report.failures.len(), 1);
        assert_eq!(store.len(), 4);
        assert_eq!(report.triples, 4);
    }

    #[test]
    fn test_load_directory_missing() {
        let result = load_directory(Path::new("/nonexistent/source/dir"));
        assert!(matches!(result, Err(ConvertError::MissingSourceDir(_))));
    }
}
