use alloc::collections::TryReserveError;

use crate::Vec;
use crate::parser::{BinaryOp, Span};

/// Index of a node inside [`Ast::nodes`].
pub type NodeId = usize;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeKind {
    Binary {
        op: BinaryOp,
        left: NodeId,
        right: NodeId,
    },
    Negate {
        child: NodeId,
    },
    IntLiteral(i64),
    /// Reference to the parameter at this position.
    ParamRef(usize),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AstNode {
    pub kind: NodeKind,
    pub span: Span,
}

impl AstNode {
    pub fn new(kind: NodeKind, span: Span) -> Self {
        Self { kind, span }
    }

    pub fn literal(value: i64, span: Span) -> Self {
        Self::new(NodeKind::IntLiteral(value), span)
    }

    pub fn as_literal(&self) -> Option<i64> {
        match self.kind {
            NodeKind::IntLiteral(value) => Some(value),
            _ => None,
        }
    }
}

/// Arena of nodes. Children always sit at lower indices than their parent,
/// and the root is the last node.
///
/// Rewrites may leave nodes that are no longer reachable from the root; they
/// are ignored by every traversal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Ast {
    nodes: Vec<AstNode>,
    param_count: usize,
}

impl Ast {
    pub(crate) fn new(param_count: usize) -> Self {
        Self {
            nodes: Vec::new(),
            param_count,
        }
    }

    /// Appends `node` and returns its index.
    pub(crate) fn try_push(&mut self, node: AstNode) -> Result<NodeId, TryReserveError> {
        self.nodes.try_reserve(1)?;
        self.nodes.push(node);
        Ok(self.nodes.len() - 1)
    }

    pub fn nodes(&self) -> &[AstNode] {
        &self.nodes
    }

    pub fn node(&self, id: NodeId) -> &AstNode {
        &self.nodes[id]
    }

    pub(crate) fn node_mut(&mut self, id: NodeId) -> &mut AstNode {
        &mut self.nodes[id]
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Number of parameters the expression was parsed against.
    pub fn param_count(&self) -> usize {
        self.param_count
    }

    pub fn root(&self) -> NodeId {
        debug_assert!(!self.nodes.is_empty(), "root of an empty tree");
        self.nodes.len().saturating_sub(1)
    }

    /// Reachable nodes in post-order, left operand first.
    ///
    /// This is exactly the order a stack machine evaluates the tree in.
    pub fn post_order(&self) -> PostOrder<'_> {
        let mut pending = Vec::new();
        if !self.nodes.is_empty() {
            pending.push((self.root(), false));
        }
        PostOrder { ast: self, pending }
    }
}

/// Iterator returned by [`Ast::post_order`]. Uses an explicit stack, so tree
/// depth is bounded by memory rather than by the call stack.
pub struct PostOrder<'a> {
    ast: &'a Ast,
    pending: Vec<(NodeId, bool)>,
}

impl Iterator for PostOrder<'_> {
    type Item = NodeId;

    fn next(&mut self) -> Option<NodeId> {
        loop {
            let (id, expanded) = self.pending.pop()?;
            if expanded {
                return Some(id);
            }
            match self.ast.node(id).kind {
                NodeKind::Binary { left, right, .. } => {
                    self.pending.push((id, true));
                    self.pending.push((right, false));
                    self.pending.push((left, false));
                }
                NodeKind::Negate { child } => {
                    self.pending.push((id, true));
                    self.pending.push((child, false));
                }
                NodeKind::IntLiteral(_) | NodeKind::ParamRef(_) => return Some(id),
            }
        }
    }
}
