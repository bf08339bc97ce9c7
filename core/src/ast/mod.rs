//! Arena-indexed expression tree.

#[allow(clippy::module_inception)]
mod ast;
mod display;

pub use ast::{Ast, AstNode, NodeId, NodeKind, PostOrder};
pub use display::{AstDisplay, format_ast};

#[cfg(test)]
mod display_test;
