use lang_pc::demo::graph::build;
use lang_pc::AstNode;

#[test]
fn parses_every_edge_shape_in_one_line() {
    let parser = build();
    let results = parser
        .parse_line("//+ a->b;b@>{c,d,*};", 1)
        .expect("line should lex cleanly");

    assert_eq!(results.len(), 1, "expected one total-coverage success");
    let result = &results[0];
    assert!(result.success, "expected a success, got: {:?}", result.error);

    assert_eq!(result.ast.len(), 3); // marker + two edges
    assert!(matches!(&result.ast[1], AstNode::Structure { name, .. } if name == "->"));
    match &result.ast[2] {
        AstNode::Structure { name, children } => {
            assert_eq!(name, "@>");
            assert_eq!(children.len(), 2);
            match &children[1] {
                AstNode::Structure { children, .. } => assert_eq!(children.len(), 3),
                other => panic!("expected the braced list to flatten into a Structure, got {:?}", other),
            }
        }
        other => panic!("expected a Structure, got {:?}", other),
    }
}

#[test]
fn reports_furthest_progress_failure_as_a_single_tied_position() {
    let parser = build();
    let results = parser
        .parse_line("//+ a->b;b->", 1)
        .expect("line should lex cleanly");

    assert!(!results.is_empty());
    assert!(results.iter().all(|r| !r.success));
    let positions: std::collections::HashSet<usize> = results.iter().map(|r| r.new_pos).collect();
    assert_eq!(positions.len(), 1, "all surviving failures should tie at the furthest position");
}

#[test]
fn rejects_an_unknown_trailing_character() {
    let parser = build();
    let err = parser
        .parse_line("//+ a->b;#", 1)
        .expect_err("a bare '#' matches no declared token");
    let message = err.to_string();
    assert!(message.contains("column"), "lex error should report a column: {message}");
}

#[test]
fn ast_structure_round_trips_through_json_for_snapshotting() {
    let parser = build();
    let results = parser.parse_line("//+ a->c;", 1).unwrap();
    let result = &results[0];
    assert!(result.success);

    // Named structure children reduce to a flat list of (token id, content)
    // pairs, which is what a grammar author would snapshot across runs.
    let leaves: Vec<(String, String)> = result
        .ast
        .iter()
        .flat_map(collect_leaves)
        .map(|t| (t.id.clone(), t.content.clone()))
        .collect();
    let snapshot = serde_json::json!(leaves
        .iter()
        .map(|(id, content)| serde_json::json!({ "id": id, "content": content }))
        .collect::<Vec<_>>());

    assert_eq!(snapshot[0]["id"], "Marker");
    assert_eq!(snapshot[1]["id"], "Name");
    assert_eq!(snapshot[1]["content"], "a");
    assert_eq!(snapshot[2]["content"], "c");
}

fn collect_leaves(node: &AstNode) -> Vec<&lang_pc::IdentifiedToken> {
    match node {
        AstNode::Leaf(token) => vec![token],
        AstNode::Structure { children, .. } => children.iter().flat_map(collect_leaves).collect(),
    }
}
