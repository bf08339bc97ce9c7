use crate::Vec;
use crate::ast::{Ast, NodeKind};
use crate::evaluator::operators::{eval_binary, eval_negate};
use crate::evaluator::{ExecutionError, check_argument_count};

/// Tree-walking evaluator.
///
/// Nodes are visited in post-order and each result is stored in a slot that
/// mirrors the arena, so a parent reads its operands by index. No recursion,
/// so arbitrarily deep trees are fine.
pub(crate) struct Evaluator<'a> {
    ast: &'a Ast,
    args: &'a [i64],
    results: Vec<i64>,
}

impl<'a> Evaluator<'a> {
    pub fn new(ast: &'a Ast, args: &'a [i64]) -> Result<Self, ExecutionError> {
        check_argument_count(ast.param_count(), args.len())?;

        let mut results = Vec::new();
        results
            .try_reserve_exact(ast.len())
            .map_err(|_| ExecutionError::OutOfMemory)?;
        results.resize(ast.len(), 0);

        Ok(Self { ast, args, results })
    }

    pub fn eval(mut self) -> Result<i64, ExecutionError> {
        for id in self.ast.post_order() {
            let node = self.ast.node(id);
            let value = match node.kind {
                NodeKind::IntLiteral(value) => value,
                NodeKind::ParamRef(index) => self.args[index],
                NodeKind::Negate { child } => eval_negate(self.results[child]),
                NodeKind::Binary { op, left, right } => {
                    eval_binary(op, self.results[left], self.results[right]).ok_or_else(|| {
                        tracing::debug!(span = ?node.span, "Division by zero");
                        ExecutionError::DivisionByZero {
                            span: Some(node.span.clone()),
                            offset: None,
                        }
                    })?
                }
            };
            self.results[id] = value;
        }

        Ok(self.results.get(self.ast.root()).copied().unwrap_or_default())
    }
}
