//! Configuration options for compiling and running expressions.

use crate::parser::DEFAULT_MAX_DEPTH;

/// Configuration options for compilation.
///
/// # Example
///
/// ```
/// use reckon_core::api::CompilationOptions;
///
/// let options = CompilationOptions {
///     optimize: false,
///     ..CompilationOptions::default()
/// };
/// assert_eq!(options.max_depth, 500);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompilationOptions {
    /// Run the optimizer before emitting bytecode.
    ///
    /// Default: true
    pub optimize: bool,

    /// Maximum parenthesis nesting accepted by the parser.
    ///
    /// Default: 500
    pub max_depth: usize,
}

impl Default for CompilationOptions {
    fn default() -> Self {
        Self {
            optimize: true,
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }
}

/// How a compiled expression is evaluated.
///
/// All strategies compute the same result; they differ only in speed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ExecutionStrategy {
    /// Walk the tree as parsed.
    Tree,
    /// Walk the optimized tree.
    OptimizedTree,
    /// Run the bytecode program on the stack VM.
    #[default]
    Bytecode,
}

impl ExecutionStrategy {
    pub const ALL: [ExecutionStrategy; 3] = [
        ExecutionStrategy::Tree,
        ExecutionStrategy::OptimizedTree,
        ExecutionStrategy::Bytecode,
    ];

    pub fn name(self) -> &'static str {
        match self {
            ExecutionStrategy::Tree => "tree",
            ExecutionStrategy::OptimizedTree => "optimized",
            ExecutionStrategy::Bytecode => "bytecode",
        }
    }
}
