//! End-to-end assembly checks: canonical clause ordering, call-order
//! preservation, and parameter uniqueness across a whole statement.

use pretty_assertions::assert_eq;
use serde_json::json;
use srcgraph_query::{ClauseKind, QueryBuilder};
use std::collections::{HashMap, HashSet};

#[test]
fn interleaved_intake_renders_in_canonical_order() {
    let query = QueryBuilder::new()
        .add_fragment(ClauseKind::With, "WITH n", HashMap::new())
        .add_fragment(ClauseKind::Delete, "DELETE m", HashMap::new())
        .add_fragment(ClauseKind::Unwind, "UNWIND {xs} AS x", {
            let mut p = HashMap::new();
            p.insert("xs".to_string(), json!([1, 2]));
            p
        })
        .add_fragment(ClauseKind::Remove, "REMOVE n.tmp", HashMap::new())
        .set("n", "status", "done")
        .add_fragment(ClauseKind::Return, "RETURN n", HashMap::new())
        .add_fragment(ClauseKind::Create, "CREATE (c:Class)", HashMap::new())
        .add_fragment(ClauseKind::Merge, "MERGE (f:File)", HashMap::new())
        .match_node("n", None, &[], HashMap::new())
        .build()
        .unwrap();

    let template = query.template();
    let positions: Vec<usize> = [
        "MATCH (n)",
        "UNWIND",
        "MERGE",
        "CREATE",
        "SET n.status",
        "DELETE",
        "REMOVE",
        "WITH n",
        "RETURN n",
    ]
    .iter()
    .map(|needle| template.find(needle).unwrap_or_else(|| panic!("missing {needle}")))
    .collect();

    let mut sorted = positions.clone();
    sorted.sort_unstable();
    assert_eq!(positions, sorted, "clauses out of canonical order: {template}");
}

#[test]
fn full_file_statement_has_unique_parameters() {
    let mut builder = QueryBuilder::new();
    for i in 0..20 {
        let mut params = HashMap::new();
        params.insert("name".to_string(), json!(format!("fn{i}")));
        params.insert("line".to_string(), json!(i));
        builder = builder.add_fragment(
            ClauseKind::Create,
            format!("CREATE (n{i}:Function {{name: {{name}}, line: {{line}}}})"),
            params,
        );
    }
    let query = builder.build().unwrap();

    assert_eq!(query.parameters().len(), 40);

    // Every placeholder in the template resolves to exactly one bound key.
    let keys: HashSet<&String> = query.parameters().keys().collect();
    for key in &keys {
        assert!(query.template().contains(&format!("{{{key}}}")));
    }
    assert!(!query.template().contains("{name}"));
    assert!(!query.template().contains("{line}"));
}

#[test]
fn cleared_builder_reports_empty_statement() {
    let mut builder = QueryBuilder::new()
        .match_node("n", Some("File"), &[], HashMap::new())
        .set("n", "status", "parsed");
    builder.clear();

    let query = builder.build().unwrap();
    assert_eq!(query.template(), "");
    assert!(query.parameters().is_empty());
}
