//! Property-based tests for the three execution strategies.
//!
//! Generated expressions are run through the tree evaluator, the optimizer
//! and the bytecode VM; every strategy must agree whenever the unoptimized
//! tree evaluates successfully.

mod cases;

use proptest::prelude::*;
use reckon::{
    Ast, ExecutionError, NodeKind, ParseErrorKind, compile, evaluate_ast, evaluate_bytecode,
    format_ast, optimize, parse,
};

const PARAMS: [&str; 3] = ["x", "y", "z"];

// ============================================================================
// Strategies for generating test inputs
// ============================================================================

/// Strategy for integer literals, mostly small with a few near the limits
fn arb_literal() -> impl Strategy<Value = String> {
    prop_oneof![
        8 => (-20i64..=20).prop_map(|n| n.to_string()),
        1 => Just(i64::MAX.to_string()),
        1 => Just("4611686018427387904".to_string()),
    ]
}

fn arb_leaf() -> impl Strategy<Value = String> {
    prop_oneof![
        arb_literal(),
        prop::sample::select(PARAMS.to_vec()).prop_map(|name| name.to_string()),
    ]
}

fn arb_binop() -> impl Strategy<Value = &'static str> {
    prop_oneof![Just("+"), Just("-"), Just("*"), Just("/")]
}

/// Strategy for expressions; operands are sometimes parenthesized so both
/// left- and right-leaning trees appear.
fn arb_expr() -> impl Strategy<Value = String> {
    arb_leaf().prop_recursive(6, 48, 2, |inner| {
        prop_oneof![
            (inner.clone(), arb_binop(), inner.clone())
                .prop_map(|(left, op, right)| format!("{} {} ({})", left, op, right)),
            (inner.clone(), arb_binop(), inner.clone())
                .prop_map(|(left, op, right)| format!("({}) {} {}", left, op, right)),
            inner.clone().prop_map(|e| format!("-({})", e)),
            inner.prop_map(|e| format!("--{}", e)),
        ]
    })
}

fn arb_args() -> impl Strategy<Value = [i64; 3]> {
    let value = || prop_oneof![4 => -6i64..=6, 1 => any::<i64>()];
    [value(), value(), value()]
}

/// Parses `source`, skipping inputs the folding parser rejects.
fn parse_or_skip(source: &str) -> Result<Ast, TestCaseError> {
    match parse(source, &PARAMS) {
        Ok(ast) => Ok(ast),
        Err(e) => {
            prop_assert!(
                matches!(
                    e.kind,
                    ParseErrorKind::DivisionByZero | ParseErrorKind::ValueOutOfRange
                ),
                "unexpected parse error for `{}`: {}",
                source,
                e
            );
            Err(TestCaseError::reject("rejected by the parser"))
        }
    }
}

/// Stack slots a subtree needs.
fn needed_depth(ast: &Ast, id: usize) -> usize {
    match ast.node(id).kind {
        NodeKind::IntLiteral(_) | NodeKind::ParamRef(_) => 1,
        NodeKind::Negate { child } => needed_depth(ast, child),
        NodeKind::Binary { left, right, .. } => {
            needed_depth(ast, left).max(needed_depth(ast, right) + 1)
        }
    }
}

// ============================================================================
// Properties
// ============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(512))]

    #[test]
    fn strategies_agree(source in arb_expr(), args in arb_args()) {
        let ast = parse_or_skip(&source)?;
        let mut optimized = ast.clone();
        optimize(&mut optimized);
        let program = compile(&ast).unwrap();
        let optimized_program = compile(&optimized).unwrap();

        match evaluate_ast(&ast, &args) {
            Ok(expected) => {
                prop_assert_eq!(evaluate_ast(&optimized, &args), Ok(expected), "{}", source);
                prop_assert_eq!(evaluate_bytecode(&program, &args), Ok(expected), "{}", source);
                prop_assert_eq!(
                    evaluate_bytecode(&optimized_program, &args),
                    Ok(expected),
                    "{}",
                    source
                );
            }
            Err(err) => {
                let is_division = matches!(err, ExecutionError::DivisionByZero { .. });
                prop_assert!(is_division, "{}: {:?}", source, err);
                // Same tree, same failure.
                let vm_outcome = evaluate_bytecode(&program, &args);
                let vm_is_division =
                    matches!(vm_outcome, Err(ExecutionError::DivisionByZero { .. }));
                prop_assert!(vm_is_division, "{}: {:?}", source, vm_outcome);
                // The optimizer may drop a failing division, but when both
                // optimized strategies succeed they agree.
                if let (Ok(a), Ok(b)) = (
                    evaluate_ast(&optimized, &args),
                    evaluate_bytecode(&optimized_program, &args),
                ) {
                    prop_assert_eq!(a, b);
                }
            }
        }
    }

    #[test]
    fn scenarios_agree(index in 0..cases::SCENARIOS.len(), args in arb_args()) {
        let scenario = &cases::SCENARIOS[index];
        let outcome = cases::evaluate(&scenario.input, &PARAMS, &args);
        prop_assert!(
            outcome.is_ok() || cases::error_code(outcome.as_ref().unwrap_err()) == "R001",
            "{}: {:?}",
            scenario.name,
            outcome
        );
    }

    #[test]
    fn optimizer_is_idempotent(source in arb_expr()) {
        let mut once = parse_or_skip(&source)?;
        optimize(&mut once);
        let mut twice = once.clone();
        optimize(&mut twice);
        prop_assert_eq!(format_ast(&once, &PARAMS), format_ast(&twice, &PARAMS), "{}", source);
    }

    #[test]
    fn stack_depth_is_exact(source in arb_expr()) {
        let mut ast = parse_or_skip(&source)?;
        for _ in 0..2 {
            let program = compile(&ast).unwrap();
            prop_assert_eq!(program.max_stack_depth(), needed_depth(&ast, ast.root()), "{}", source);
            optimize(&mut ast);
        }
    }
}
