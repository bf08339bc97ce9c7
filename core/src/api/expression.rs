//! Compiled Reckon expressions.

use super::{CompilationOptions, Error, ExecutionStrategy};
use crate::ast::{Ast, format_ast};
use crate::compiler::compile;
use crate::evaluator::evaluate_ast;
use crate::optimizer::optimize;
use crate::parser::parse_with_max_depth;
use crate::vm::{Program, evaluate_bytecode, format_bytecode};
use crate::{String, Vec};

/// Parse, optimize and compile `source` in one go.
///
/// Parameter names are resolved once here; [`CompiledExpression::run`] then
/// takes values in the same order.
pub fn compile_expression(
    source: &str,
    params: &[&str],
    options: &CompilationOptions,
) -> Result<CompiledExpression, Error> {
    let ast = parse_with_max_depth(source, params, options.max_depth)?;
    let mut optimized = ast.clone();
    if options.optimize {
        optimize(&mut optimized);
    }
    let program = compile(&optimized)?;
    tracing::debug!(
        nodes = ast.len(),
        optimized_nodes = optimized.len(),
        stack_depth = program.max_stack_depth(),
        "Compiled expression"
    );

    Ok(CompiledExpression {
        source: String::from(source),
        params: params.iter().map(|name| String::from(*name)).collect(),
        ast,
        optimized,
        program,
    })
}

/// An expression ready for execution.
///
/// Owns its source, the tree as parsed, the optimized tree and the bytecode
/// program, so it can be run any number of times with any strategy.
///
/// # Example
///
/// ```
/// use reckon_core::api::{CompilationOptions, ExecutionStrategy, compile_expression};
///
/// let expr = compile_expression("a - a + b", &["a", "b"], &CompilationOptions::default()).unwrap();
/// assert_eq!(expr.optimized_ast_text(), "b");
/// for strategy in ExecutionStrategy::ALL {
///     assert_eq!(expr.run(&[5, 7], strategy).unwrap(), 7);
/// }
/// ```
#[derive(Debug, Clone)]
pub struct CompiledExpression {
    source: String,
    params: Vec<String>,
    ast: Ast,
    optimized: Ast,
    program: Program,
}

impl CompiledExpression {
    /// Evaluate with `args` bound positionally to the parameters.
    ///
    /// Fails with [`Error::Api`] when the argument count is wrong and with
    /// [`Error::Runtime`] when a divisor evaluates to zero.
    pub fn run(&self, args: &[i64], strategy: ExecutionStrategy) -> Result<i64, Error> {
        if args.len() != self.params.len() {
            return Err(Error::Api(crate::format!(
                "Argument count mismatch: expected {}, got {}",
                self.params.len(),
                args.len()
            )));
        }
        let result = match strategy {
            ExecutionStrategy::Tree => evaluate_ast(&self.ast, args),
            ExecutionStrategy::OptimizedTree => evaluate_ast(&self.optimized, args),
            ExecutionStrategy::Bytecode => evaluate_bytecode(&self.program, args),
        };
        result.map_err(|err| Error::from(err).with_source(&self.source))
    }

    pub fn source(&self) -> &str {
        &self.source
    }

    pub fn params(&self) -> &[String] {
        &self.params
    }

    /// The tree as parsed (already constant-folded by the parser).
    pub fn ast(&self) -> &Ast {
        &self.ast
    }

    /// The tree the program was compiled from.
    pub fn optimized_ast(&self) -> &Ast {
        &self.optimized
    }

    pub fn program(&self) -> &Program {
        &self.program
    }

    pub fn ast_text(&self) -> String {
        format_ast(&self.ast, &self.param_names())
    }

    pub fn optimized_ast_text(&self) -> String {
        format_ast(&self.optimized, &self.param_names())
    }

    pub fn bytecode_text(&self) -> String {
        format_bytecode(&self.program, &self.param_names())
    }

    fn param_names(&self) -> Vec<&str> {
        self.params.iter().map(String::as_str).collect()
    }
}
