//! End-to-end conversion tests over temporary source and output directories

use std::fs;
use std::path::{Path, PathBuf};

use rcgs_export::{convert, ConvertError, ConvertOptions, EntityKind, TableOutcome};
use rstest::{fixture, rstest};
use tempfile::TempDir;

const PREFIXES: &str = r#"
@prefix rdfs: <http://www.w3.org/2000/01/rdf-schema#> .
@prefix dcterms: <http://purl.org/dc/terms/> .
@prefix schema: <http://schema.org/> .
@prefix dcndl: <http://ndl.go.jp/dcndl/terms/> .
@prefix rcgs: <https://collection.rcgs.jp/terms/> .
@prefix skos: <http://www.w3.org/2004/02/skos/core#> .
@prefix foaf: <http://xmlns.com/foaf/0.1/> .
"#;

/// Source and output directories for one run
struct Workspace {
    _root: TempDir,
    source: PathBuf,
    output: PathBuf,
}

impl Workspace {
    fn add(&self, name: &str, content: &str) {
        fs::write(self.source.join(name), content).unwrap();
    }

    fn add_turtle(&self, name: &str, body: &str) {
        self.add(name, &format!("{PREFIXES}\n{body}"));
    }

    fn options(&self) -> ConvertOptions {
        ConvertOptions {
            source_dir: self.source.clone(),
            output_dir: self.output.clone(),
            entities: EntityKind::ALL.to_vec(),
        }
    }
}

#[fixture]
fn workspace() -> Workspace {
    let root = tempfile::tempdir().unwrap();
    let source = root.path().join("source");
    let output = root.path().join("output");
    fs::create_dir(&source).unwrap();
    Workspace {
        _root: root,
        source,
        output,
    }
}

/// Header and rows of a written CSV
fn read_csv(path: &Path) -> (Vec<String>, Vec<Vec<String>>) {
    let mut reader = csv::Reader::from_path(path).unwrap();
    let header = reader
        .headers()
        .unwrap()
        .iter()
        .map(str::to_string)
        .collect();
    let rows = reader
        .records()
        .map(|r| r.unwrap().iter().map(str::to_string).collect())
        .collect();
    (header, rows)
}

fn cell<'a>(header: &[String], row: &'a [String], column: &str) -> &'a str {
    let index = header
        .iter()
        .position(|name| name == column)
        .unwrap_or_else(|| panic!("missing column {column}"));
    &row[index]
}

#[rstest]
fn test_single_package_scenario(workspace: Workspace) {
    workspace.add_turtle(
        "package.ttl",
        r#"<https://collection.rcgs.jp/package/1> a rcgs:Package ; schema:name "Foo"@en ."#,
    );

    let report = convert(&workspace.options()).unwrap();
    assert_eq!(report.written(), 1);
    assert_eq!(report.outcome(EntityKind::Item), Some(&TableOutcome::Empty));

    let (header, rows) = read_csv(&workspace.output.join("game_packages.csv"));
    assert_eq!(header.len(), 76);
    assert_eq!(header[0], "resource_uri");
    assert_eq!(rows.len(), 1);

    let row = &rows[0];
    assert_eq!(cell(&header, row, "resource_uri"), "https://collection.rcgs.jp/package/1");
    assert_eq!(cell(&header, row, "schema_name"), "Foo");
    assert_eq!(
        cell(&header, row, "rdf_type"),
        "https://collection.rcgs.jp/terms/Package"
    );
    assert_eq!(row.iter().filter(|v| !v.is_empty()).count(), 3);

    for absent in [
        "items.csv",
        "persons.csv",
        "organizations.csv",
        "variations.csv",
        "works.csv",
        "related_items.csv",
    ] {
        assert!(!workspace.output.join(absent).exists(), "{absent} was written");
    }
}

#[rstest]
fn test_format_blank_nodes_flatten(workspace: Workspace) {
    workspace.add_turtle(
        "package.ttl",
        r#"<http://ex/pkg> a rcgs:Package ;
               dcterms:format [ rcgs:carrierType "DVD" ] , [ rcgs:carrierType "Cartridge" ] ."#,
    );

    convert(&workspace.options()).unwrap();

    let (header, rows) = read_csv(&workspace.output.join("game_packages.csv"));
    assert_eq!(rows.len(), 1);
    assert_eq!(
        cell(&header, &rows[0], "format_rcgs_carrierType"),
        "DVD|Cartridge"
    );
}

#[rstest]
fn test_untagged_labels_excluded_from_language_columns(workspace: Workspace) {
    workspace.add_turtle(
        "people.ttl",
        r#"<http://ex/p1> a foaf:Person ; skos:prefLabel "Plain" , "Tagged"@en .
           <http://ex/p2> a foaf:Person ; skos:prefLabel "Only plain" ."#,
    );

    convert(&workspace.options()).unwrap();

    let (header, rows) = read_csv(&workspace.output.join("persons.csv"));
    assert_eq!(rows.len(), 2);
    assert_eq!(cell(&header, &rows[0], "prefLabel_en"), "Tagged");
    assert_eq!(cell(&header, &rows[0], "prefLabel_ja"), "");
    assert_eq!(cell(&header, &rows[1], "prefLabel_en"), "");
}

#[rstest]
fn test_item_join_across_files(workspace: Workspace) {
    workspace.add_turtle(
        "items.ttl",
        r#"<http://ex/item1> a rcgs:Item ; rcgs:exemplarOf <http://ex/pkg> .
           <http://ex/item2> a rcgs:Item ; rcgs:exemplarOf <http://ex/work> ."#,
    );
    workspace.add(
        "packages.nt",
        "<http://ex/pkg> <http://www.w3.org/1999/02/22-rdf-syntax-ns#type> <https://collection.rcgs.jp/terms/Package> .\n\
         <http://ex/pkg> <http://schema.org/name> \"Foo\" .\n",
    );

    convert(&workspace.options()).unwrap();

    let (header, rows) = read_csv(&workspace.output.join("items.csv"));
    assert_eq!(
        header,
        vec!["resource_uri", "exemplarOf", "identifier", "spatial", "owns", "holdingAgent"]
    );
    assert_eq!(cell(&header, &rows[0], "exemplarOf"), "http://ex/pkg");
    assert_eq!(cell(&header, &rows[1], "exemplarOf"), "");

    let (header, rows) = read_csv(&workspace.output.join("related_items.csv"));
    assert_eq!(rows.len(), 2);
    assert_eq!(cell(&header, &rows[0], "name"), "Foo");
    assert_eq!(cell(&header, &rows[1], "item_uri"), "http://ex/item2");
    assert_eq!(cell(&header, &rows[1], "exemplarOf"), "");
    assert_eq!(cell(&header, &rows[1], "name"), "");
}

#[rstest]
fn test_mixed_formats_merge_with_set_semantics(workspace: Workspace) {
    workspace.add_turtle(
        "works.ttl",
        r#"<http://ex/work> a rcgs:Work ; rdfs:label "Quest" ."#,
    );
    workspace.add(
        "works.rdf",
        r#"<?xml version="1.0"?>
<rdf:RDF xmlns:rdf="http://www.w3.org/1999/02/22-rdf-syntax-ns#"
         xmlns:rdfs="http://www.w3.org/2000/01/rdf-schema#"
         xmlns:dcterms="http://purl.org/dc/terms/">
  <rdf:Description rdf:about="http://ex/work">
    <rdfs:label>Quest</rdfs:label>
    <dcterms:date>1986</dcterms:date>
  </rdf:Description>
</rdf:RDF>"#,
    );
    workspace.add(
        "works.jsonld",
        r#"{
  "@context": {
    "rcgs": "https://collection.rcgs.jp/terms/",
    "rdfs": "http://www.w3.org/2000/01/rdf-schema#"
  },
  "@id": "http://ex/work",
  "@type": "rcgs:Work",
  "rcgs:series": { "rdfs:label": "Quest series" }
}"#,
    );

    let report = convert(&workspace.options()).unwrap();
    assert_eq!(report.load.files_found, 3);
    assert_eq!(report.load.files_loaded, 3);
    assert_eq!(report.summary.count("Work"), Some(1));

    let (header, rows) = read_csv(&workspace.output.join("works.csv"));
    assert_eq!(rows.len(), 1);
    assert_eq!(cell(&header, &rows[0], "label"), "Quest");
    assert_eq!(cell(&header, &rows[0], "date"), "1986");
    assert_eq!(cell(&header, &rows[0], "series"), "Quest series");
}

#[rstest]
fn test_jsonld_context_terms_join_items(workspace: Workspace) {
    workspace.add(
        "collection.jsonld",
        r#"{
  "@context": {
    "rcgs": "https://collection.rcgs.jp/terms/",
    "schema": "http://schema.org/",
    "name": "schema:name",
    "exemplarOf": { "@id": "rcgs:exemplarOf", "@type": "@id" }
  },
  "@graph": [
    { "@id": "http://ex/pkg", "@type": "rcgs:Package", "name": "Foo" },
    { "@id": "http://ex/item", "@type": "rcgs:Item", "exemplarOf": "http://ex/pkg" }
  ]
}"#,
    );

    convert(&workspace.options()).unwrap();

    let (header, rows) = read_csv(&workspace.output.join("game_packages.csv"));
    assert_eq!(rows.len(), 1);
    assert_eq!(cell(&header, &rows[0], "schema_name"), "Foo");

    let (header, rows) = read_csv(&workspace.output.join("items.csv"));
    assert_eq!(rows.len(), 1);
    assert_eq!(cell(&header, &rows[0], "exemplarOf"), "http://ex/pkg");

    let (header, rows) = read_csv(&workspace.output.join("related_items.csv"));
    assert_eq!(cell(&header, &rows[0], "name"), "Foo");
}

#[rstest]
fn test_broken_file_is_skipped(workspace: Workspace) {
    workspace.add_turtle("good.ttl", r#"<http://ex/w> a rcgs:Work ."#);
    workspace.add("broken.ttl", "<http://ex/w> <http://ex/p> \"unterminated .");

    let report = convert(&workspace.options()).unwrap();
    assert_eq!(report.load.files_found, 2);
    assert_eq!(report.load.files_loaded, 1);
    assert_eq!(report.load.failures.len(), 1);
    assert!(report.load.failures[0].0.ends_with("broken.ttl"));
    assert!(workspace.output.join("works.csv").exists());
}

#[rstest]
fn test_output_is_byte_identical_across_runs(workspace: Workspace) {
    workspace.add_turtle(
        "collection.ttl",
        r#"<http://ex/pkg> a rcgs:Package ;
               schema:name "Foo"@en , "フー"@ja ;
               dcterms:format [ rcgs:carrierType "DVD" ; rdfs:label "disc, one" ] ;
               rcgs:provisionActivity [ rcgs:publisherStatement "Pub \"A\"" ] .
           <http://ex/item> a rcgs:Item ; rcgs:exemplarOf <http://ex/pkg> ;
               dcndl:holdlingAgent [ rdfs:label "anonymous agent" ] ."#,
    );

    convert(&workspace.options()).unwrap();
    let first: Vec<(String, Vec<u8>)> = EntityKind::ALL
        .iter()
        .map(|k| workspace.output.join(k.file_name()))
        .filter(|p| p.exists())
        .map(|p| (p.display().to_string(), fs::read(&p).unwrap()))
        .collect();

    convert(&workspace.options()).unwrap();
    for (path, bytes) in &first {
        assert_eq!(&fs::read(path).unwrap(), bytes, "{path} changed between runs");
    }
    assert_eq!(first.len(), 3);
}

#[rstest]
fn test_only_restricts_entity_kinds(workspace: Workspace) {
    workspace.add_turtle(
        "collection.ttl",
        r#"<http://ex/pkg> a rcgs:Package .
           <http://ex/work> a rcgs:Work ."#,
    );

    let options = ConvertOptions {
        entities: vec![EntityKind::Work],
        ..workspace.options()
    };
    let report = convert(&options).unwrap();

    assert_eq!(report.tables.len(), 1);
    assert!(workspace.output.join("works.csv").exists());
    assert!(!workspace.output.join("game_packages.csv").exists());
}

#[rstest]
fn test_empty_source_stops_without_output(workspace: Workspace) {
    workspace.add("readme.txt", "not rdf at all");

    let result = convert(&workspace.options());
    assert!(matches!(result, Err(ConvertError::EmptyGraph)));
    assert!(!workspace.output.exists());
}

#[test]
fn test_missing_source_directory() {
    let root = tempfile::tempdir().unwrap();
    let options = ConvertOptions {
        source_dir: root.path().join("does-not-exist"),
        output_dir: root.path().join("output"),
        entities: EntityKind::ALL.to_vec(),
    };

    assert!(matches!(
        convert(&options),
        Err(ConvertError::MissingSourceDir(_))
    ));
}
