//! Graph-edge-binding grammar: lines of the form
//! `//+ a->c; a->{b,c}; a@>*;` binding names into edges. Illustrative only,
//! not part of the combinator engine itself.
use crate::expr::{and, mute, named, or, star, token};
use crate::{build_grammar, AstNode, GrammarConfig, Parser, TokenDesc, TokenTable};

/// Build the demo grammar.
pub fn build() -> Parser {
    let tokens = TokenTable::new(vec![
        TokenDesc::new("Marker", r"//\+").unwrap(),
        TokenDesc::new("Space", r"[ \t]+").unwrap(),
        TokenDesc::new("Arrow", r"->").unwrap(),
        TokenDesc::new("AtArrow", r"@>").unwrap(),
        TokenDesc::new("Semi", r";").unwrap(),
        TokenDesc::new("Comma", r",").unwrap(),
        TokenDesc::new("OpenBrace", r"\{").unwrap(),
        TokenDesc::new("CloseBrace", r"\}").unwrap(),
        TokenDesc::new("Star", r"\*").unwrap(),
        TokenDesc::new("Name", r"[a-zA-Z_][a-zA-Z0-9_]*").unwrap(),
    ])
    .with_filter(|id, _| id != "Space");

    let item = or(token("Name"), token("Star"));
    let list = and(
        item.clone(),
        star(and(mute(token("Comma")), item.clone())),
    );
    let braced_list = and(
        mute(token("OpenBrace")),
        and(list, mute(token("CloseBrace"))),
    );
    let right_side = or(token("Name"), or(token("Star"), braced_list));

    let arrow_edge = named(
        "->",
        and(token("Name"), and(mute(token("Arrow")), right_side.clone())),
    );
    let at_arrow_edge = named(
        "@>",
        and(token("Name"), and(mute(token("AtArrow")), right_side)),
    );
    let edge = and(or(arrow_edge, at_arrow_edge), mute(token("Semi")));

    let line = and(token("Marker"), and(edge.clone(), star(edge)));

    build_grammar(GrammarConfig::new(tokens, line)).expect("demo grammar is internally consistent")
}

/// Pretty-print a parsed line's AST the way an embedder debugging a grammar
/// would: one node per top-level fragment, indented by nesting depth.
pub fn print_ast(nodes: &[AstNode]) {
    for node in nodes {
        print!("{}", node);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse_ok(parser: &Parser, line: &str) -> Vec<AstNode> {
        let results = parser.parse_line(line, 1).expect("line should lex cleanly");
        assert_eq!(results.len(), 1, "expected exactly one total-coverage success");
        assert!(results[0].success, "expected a success, got: {:?}", results[0].error);
        results[0].ast.clone()
    }

    #[test]
    fn plain_edge_keeps_marker_leaf_and_names_structure_by_arrow() {
        let parser = build();
        let ast = parse_ok(&parser, "//+ a->c;");
        assert_eq!(ast.len(), 2);
        assert_eq!(ast[0], AstNode::Leaf(crate::IdentifiedToken {
            id: "Marker".into(),
            content: "//+".into(),
            line: 1,
            column: 1,
        }));
        match &ast[1] {
            AstNode::Structure { name, children } => {
                assert_eq!(name, "->");
                assert_eq!(children.len(), 2);
            }
            other => panic!("expected a Structure, got {:?}", other),
        }
    }

    #[test]
    fn wildcard_right_side() {
        let parser = build();
        let ast = parse_ok(&parser, "//+ a->*;");
        match &ast[1] {
            AstNode::Structure { children, .. } => {
                assert_eq!(children.len(), 2);
                assert_eq!(children[1], AstNode::Leaf(crate::IdentifiedToken {
                    id: "Star".into(),
                    content: "*".into(),
                    line: 1,
                    column: 8,
                }));
            }
            other => panic!("expected a Structure, got {:?}", other),
        }
    }

    #[test]
    fn braced_list_flattens_into_structure_children() {
        let parser = build();
        let ast = parse_ok(&parser, "//+ a->{b,c};");
        match &ast[1] {
            AstNode::Structure { children, .. } => {
                assert_eq!(children.len(), 3);
            }
            other => panic!("expected a Structure, got {:?}", other),
        }
    }

    #[test]
    fn at_arrow_names_structure_differently() {
        let parser = build();
        let ast = parse_ok(&parser, "//+ a@>c;");
        match &ast[1] {
            AstNode::Structure { name, .. } => assert_eq!(name, "@>"),
            other => panic!("expected a Structure, got {:?}", other),
        }
    }

    #[test]
    fn multiple_edges_on_one_line() {
        let parser = build();
        let ast = parse_ok(&parser, "//+ a->b;b->c;c->d;d->e;");
        assert_eq!(ast.len(), 5); // marker + 4 edges
        for node in &ast[1..] {
            assert!(matches!(node, AstNode::Structure { name, .. } if name == "->"));
        }
    }

    #[test]
    fn missing_semicolon_reports_furthest_progress_failure() {
        let parser = build();
        let results = parser.parse_line("//+ a->c", 1).expect("line should lex cleanly");
        assert!(results.iter().all(|r| !r.success));
        assert!(results
            .iter()
            .any(|r| r.error.as_ref().unwrap().expected == "Semi"));
        let max_pos = results[0].new_pos;
        assert!(results.iter().all(|r| r.new_pos == max_pos));
    }
}
