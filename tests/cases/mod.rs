//! Shared harness for the integration tests.
//!
//! `test_case!` compiles an expression once and runs it through every
//! execution strategy, failing if any two of them disagree.

#![allow(dead_code, unused_macros)]

use once_cell::sync::Lazy;
use reckon::{CompilationOptions, Error, ExecutionStrategy, compile_expression, format_ast, parse};

/// A reference expression over `x`, `y` and `z`.
pub struct Scenario {
    pub name: &'static str,
    pub input: String,
}

/// Expressions shared by tests that need realistic inputs rather than
/// generated ones.
pub static SCENARIOS: Lazy<Vec<Scenario>> = Lazy::new(|| {
    let long_chain = (0..2_000)
        .map(|i| ["x", "y", "3", "z"][i % 4])
        .collect::<Vec<_>>()
        .join(" - ");
    let nested = format!("{}x{}", "(y - (".repeat(200), "))".repeat(200));
    vec![
        Scenario {
            name: "mixed",
            input: "3 + (x - 5) - (3 - 0 + (1 - y) - -3) + 0 + (x + x) + 10 - z".to_string(),
        },
        Scenario {
            name: "negations",
            input: "-(-(x + y) * -(z - 3) + (x - 5) / ((y + 7) * 2))".to_string(),
        },
        Scenario {
            name: "cancellation",
            input: "(x + 1) - (y + 1) + (z - z) * y".to_string(),
        },
        Scenario {
            name: "division",
            input: "x / 3 - y / -2 + z * 7 / 5".to_string(),
        },
        Scenario {
            name: "long_chain",
            input: long_chain,
        },
        Scenario {
            name: "nested",
            input: nested,
        },
    ]
});

/// Run `input` with every strategy and return the agreed outcome.
pub fn evaluate(input: &str, names: &[&str], args: &[i64]) -> Result<i64, Error> {
    let expr = compile_expression(input, names, &CompilationOptions::default())?;
    let tree = expr.run(args, ExecutionStrategy::Tree);
    for strategy in [ExecutionStrategy::OptimizedTree, ExecutionStrategy::Bytecode] {
        let other = expr.run(args, strategy);
        match (&tree, &other) {
            (Ok(a), Ok(b)) => assert_eq!(a, b, "{:?} disagrees on `{}`", strategy, input),
            (Err(a), Err(b)) => assert_eq!(
                error_code(a),
                error_code(b),
                "{:?} fails differently on `{}`",
                strategy,
                input
            ),
            _ => panic!(
                "{:?} disagrees on `{}`: tree gave {:?}, got {:?}",
                strategy, input, tree, other
            ),
        }
    }
    tree
}

/// The parsed tree, rendered.
pub fn ast_text(input: &str, names: &[&str]) -> String {
    let ast = parse(input, names).unwrap_or_else(|e| panic!("Failed to parse '{}': {}", input, e));
    format_ast(&ast, names)
}

/// The optimized tree, rendered.
pub fn optimized_text(input: &str, names: &[&str]) -> String {
    let expr = compile_expression(input, names, &CompilationOptions::default())
        .unwrap_or_else(|e| panic!("Failed to compile '{}': {}", input, e));
    expr.optimized_ast_text()
}

/// Diagnostic code of the first diagnostic, or a label for errors without one.
pub fn error_code(error: &Error) -> &str {
    match error {
        Error::Api(_) => "API",
        Error::ResourceExceeded(_) => "RESOURCE",
        Error::Compilation { .. } | Error::Runtime { .. } => error
            .diagnostics()
            .first()
            .and_then(|d| d.code.as_deref())
            .unwrap_or("NONE"),
    }
}

/// Defines one integration test.
///
/// ```ignore
/// test_case!(
///     name,
///     input: "x + 1",
///     params: { x = 41 },
///     ast: "(x + 1)",
///     optimized: "(x + 1)",
///     value: 42,
/// );
/// ```
///
/// `error: "P006"` expects the run to fail with that diagnostic code.
macro_rules! test_case {
    (
        $name:ident,
        input: $input:expr,
        $(params: { $($param:ident = $arg:expr),* $(,)? },)?
        $(ast: $ast:expr,)?
        $(optimized: $optimized:expr,)?
        $(value: $value:expr,)?
        $(error: $code:expr,)?
    ) => {
        #[test]
        fn $name() {
            let names: Vec<&str> = vec![$($(stringify!($param)),*)?];
            let args: Vec<i64> = vec![$($($arg),*)?];
            let outcome = crate::cases::evaluate($input, &names, &args);
            $(
                assert_eq!(crate::cases::ast_text($input, &names), $ast, "ast of `{}`", $input);
            )?
            $(
                assert_eq!(
                    crate::cases::optimized_text($input, &names),
                    $optimized,
                    "optimized ast of `{}`",
                    $input
                );
            )?
            $(
                assert_eq!(outcome.as_ref().ok(), Some(&$value), "value of `{}`: {:?}", $input, outcome);
            )?
            $(
                match &outcome {
                    Err(e) => assert_eq!(crate::cases::error_code(e), $code, "error of `{}`", $input),
                    Ok(v) => panic!("expected error {} for `{}`, got {}", $code, $input, v),
                }
            )?
        }
    };
}
