//! Integration tests for loading documents and building graphs

use cs_amc_graph::core::models::{Document, NodeKind};
use cs_amc_graph::core::{build_graph, load_document, GraphBuilder, IdPolicy, LoadError};
use std::fs;
use tempfile::TempDir;

const SAMPLE: &str = "tests/fixtures/cs23_sample.json";

#[test]
fn test_load_sample_document() {
    let doc = load_document(SAMPLE).expect("Failed to load sample document");

    assert_eq!(doc.subpart_count(), 2);
    assert_eq!(doc.section_count(), 4);
    // document order is kept
    assert_eq!(doc.subparts[0].name, "Subpart A — General");
    assert_eq!(doc.subparts[1].name, "Subpart B — Flight");

    let general = doc.get_subpart("Subpart A — General").unwrap();
    assert_eq!(general.sections[1].amcs.len(), 2);
    assert!(general.sections[1].amcs[1].requirements.is_empty());
}

#[test]
fn test_sample_graph_counts() {
    let doc = load_document(SAMPLE).unwrap();
    let graph = build_graph(&doc).unwrap();

    let summary = graph.summary();
    assert_eq!(summary.subparts, 2);
    assert_eq!(summary.sections, 4);
    assert_eq!(summary.requirements, 3);
    assert_eq!(summary.amcs, 3);
    assert_eq!(summary.amc_requirements, 3);
    assert_eq!(summary.nodes(), 15);
    assert_eq!(summary.edges, 13);
    assert_eq!(summary.collisions, 0);
}

#[test]
fn test_subpart_count_matches_top_level_keys() {
    let doc = load_document(SAMPLE).unwrap();
    for policy in [IdPolicy::Merge, IdPolicy::Reject, IdPolicy::Qualify] {
        let graph = GraphBuilder::new(policy).build(&doc).unwrap();
        assert_eq!(
            graph.count_kind(NodeKind::Subpart),
            doc.subpart_count(),
            "policy {policy}"
        );
    }
}

#[test]
fn test_every_section_has_one_parent_subpart() {
    let doc = load_document(SAMPLE).unwrap();
    let graph = build_graph(&doc).unwrap();

    for subpart in &doc.subparts {
        for section in &subpart.sections {
            let parents = graph.parents(&section.node_id());
            assert_eq!(parents, vec![subpart.name.as_str()]);
        }
    }
}

#[test]
fn test_cs_requirement_edge() {
    let doc = load_document(SAMPLE).unwrap();
    let graph = build_graph(&doc).unwrap();

    let req = graph.node("CS 23.2005(a)").unwrap();
    assert_eq!(req.kind, NodeKind::Requirement);
    assert_eq!(req.label, "CS 23.2005(a)");
    assert!(req.title.starts_with("Certification in the normal category"));
    assert!(graph.has_edge("CS-23.2005", "CS 23.2005(a)"));
}

#[test]
fn test_amc_without_requirements_is_leaf() {
    let doc = load_document(SAMPLE).unwrap();
    let graph = build_graph(&doc).unwrap();

    assert!(graph.contains("AMC-23.2005-2"));
    assert!(graph.children("AMC-23.2005-2").is_empty());
    assert_eq!(graph.parents("AMC-23.2005-2"), vec!["CS-23.2005"]);
}

#[test]
fn test_minimal_document() {
    let doc = Document::from_json_str(
        r#"{"A": [{"CS Number": "1", "CS Name": "n", "CS Requirements": [{"Requirement ID": "R1", "Content": "c"}]}]}"#,
    )
    .unwrap();
    let graph = build_graph(&doc).unwrap();

    assert!(graph.contains("A"));
    assert!(graph.contains("CS-1"));
    assert!(graph.contains("R1"));
    assert!(graph.has_edge("A", "CS-1"));
    assert!(graph.has_edge("CS-1", "R1"));
    assert_eq!(graph.node_count(), 3);
    assert_eq!(graph.edge_count(), 2);

    let cs = graph.node("CS-1").unwrap();
    assert_eq!(cs.label, "1");
    assert_eq!(cs.title, "n");
    assert_eq!(cs.kind.shape(), "ellipse");
    assert_eq!(cs.kind.color(), "green");
}

#[test]
fn test_missing_file_fails_before_build() {
    let dir = TempDir::new().unwrap();
    let result = load_document(dir.path().join("missing.json"));
    assert!(matches!(result, Err(LoadError::Io { .. })));
}

#[test]
fn test_malformed_file_is_structured_error() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("broken.json");
    fs::write(&path, r#"{"Subpart X": [{"CS Name": "missing number"}]}"#).unwrap();

    match load_document(&path) {
        Err(LoadError::Schema { subpart, source }) => {
            assert_eq!(subpart, "Subpart X");
            assert!(source.to_string().contains("CS Number"));
        }
        other => panic!("expected schema error, got {other:?}"),
    }
}

#[test]
fn test_duplicate_ids_across_subparts() {
    let json = r#"{
        "A": [{"CS Number": "1", "CS Name": "first",
               "CS Requirements": [{"Requirement ID": "R1", "Content": "a"}]}],
        "B": [{"CS Number": "1", "CS Name": "second",
               "CS Requirements": [{"Requirement ID": "R1", "Content": "b"}]}]
    }"#;
    let doc = Document::from_json_str(json).unwrap();

    let merged = GraphBuilder::new(IdPolicy::Merge).build(&doc).unwrap();
    assert_eq!(merged.node_count(), 4);
    assert_eq!(merged.node("R1").unwrap().title, "b");
    assert_eq!(merged.collisions().len(), 2);

    assert!(GraphBuilder::new(IdPolicy::Reject).build(&doc).is_err());

    let qualified = GraphBuilder::new(IdPolicy::Qualify).build(&doc).unwrap();
    assert_eq!(qualified.node_count(), 6);
    assert_eq!(qualified.node("A/CS-1/R1").unwrap().title, "a");
    assert_eq!(qualified.node("B/CS-1/R1").unwrap().title, "b");
}
