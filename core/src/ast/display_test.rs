use pretty_assertions::assert_eq;

use crate::ast::{Ast, AstNode, NodeKind, format_ast};
use crate::parser::{BinaryOp, Span, parse};

fn node(kind: NodeKind) -> AstNode {
    AstNode::new(kind, Span::default())
}

#[test]
fn test_format_parsed_expression() {
    let ast = parse("x + y * 2", &["x", "y"]).unwrap();
    assert_eq!(format_ast(&ast, &["x", "y"]), "(x + (y * 2))");
}

#[test]
fn test_format_left_associative_chain() {
    let ast = parse("a - b - c", &["a", "b", "c"]).unwrap();
    assert_eq!(format_ast(&ast, &["a", "b", "c"]), "((a - b) - c)");
}

#[test]
fn test_format_negation_and_negative_literal() {
    let ast = parse("-x * -3", &["x"]).unwrap();
    assert_eq!(format_ast(&ast, &["x"]), "(-x * -3)");
}

#[test]
fn test_format_missing_name_uses_index() {
    let mut ast = Ast::new(2);
    let left = ast.try_push(node(NodeKind::ParamRef(0))).unwrap();
    let right = ast.try_push(node(NodeKind::ParamRef(1))).unwrap();
    ast.try_push(node(NodeKind::Binary {
        op: BinaryOp::Div,
        left,
        right,
    }))
    .unwrap();

    assert_eq!(format_ast(&ast, &["n"]), "(n / $1)");
}

#[test]
fn test_format_deep_negation_chain() {
    let mut ast = Ast::new(0);
    let mut child = ast.try_push(node(NodeKind::IntLiteral(7))).unwrap();
    for _ in 0..50_000 {
        child = ast.try_push(node(NodeKind::Negate { child })).unwrap();
    }

    let text = format_ast(&ast, &[]);
    assert_eq!(text.len(), 50_001);
    assert!(text.ends_with("-7"));
}
