use core::fmt;

use crate::ast::{Ast, NodeId, NodeKind};
use crate::parser::BinaryOp;
use crate::{String, ToString, Vec};

/// Fully parenthesized rendering of an [`Ast`].
///
/// Binary nodes print as `(left op right)`, negation as `-operand`, and
/// parameter references by name. A parameter index with no name supplied
/// prints as `$index`.
pub struct AstDisplay<'a> {
    ast: &'a Ast,
    names: &'a [&'a str],
}

impl<'a> AstDisplay<'a> {
    pub fn new(ast: &'a Ast, names: &'a [&'a str]) -> Self {
        Self { ast, names }
    }
}

enum Piece {
    Node(NodeId),
    Text(&'static str),
}

impl fmt::Display for AstDisplay<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.ast.is_empty() {
            return Ok(());
        }

        let mut pending = Vec::new();
        pending.push(Piece::Node(self.ast.root()));
        while let Some(piece) = pending.pop() {
            let id = match piece {
                Piece::Text(text) => {
                    f.write_str(text)?;
                    continue;
                }
                Piece::Node(id) => id,
            };
            match &self.ast.node(id).kind {
                NodeKind::Binary { op, left, right } => {
                    f.write_str("(")?;
                    pending.push(Piece::Text(")"));
                    pending.push(Piece::Node(*right));
                    pending.push(Piece::Text(match op {
                        BinaryOp::Add => " + ",
                        BinaryOp::Sub => " - ",
                        BinaryOp::Mul => " * ",
                        BinaryOp::Div => " / ",
                    }));
                    pending.push(Piece::Node(*left));
                }
                NodeKind::Negate { child } => {
                    f.write_str("-")?;
                    pending.push(Piece::Node(*child));
                }
                NodeKind::IntLiteral(value) => write!(f, "{}", value)?,
                NodeKind::ParamRef(index) => match self.names.get(*index) {
                    Some(name) => f.write_str(name)?,
                    None => write!(f, "${}", index)?,
                },
            }
        }
        Ok(())
    }
}

/// Renders `ast` in fully parenthesized infix form.
pub fn format_ast(ast: &Ast, names: &[&str]) -> String {
    AstDisplay::new(ast, names).to_string()
}
