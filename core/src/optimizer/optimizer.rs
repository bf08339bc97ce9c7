use crate::Vec;
use crate::ast::{Ast, NodeId, NodeKind};
use crate::evaluator::operators::{eval_binary, eval_negate};
use crate::parser::{BinaryOp, Span};

/// Rewrites `ast` in place until no local rule applies to any reachable node.
pub fn optimize(ast: &mut Ast) {
    if ast.is_empty() {
        return;
    }

    let order: Vec<NodeId> = ast.post_order().collect();
    let mut optimizer = Optimizer {
        ast,
        pending: Vec::new(),
        rewrites: 0,
    };
    for id in order {
        optimizer.settle(id);
    }
    tracing::debug!(rewrites = optimizer.rewrites, "Optimization complete");
}

enum Step {
    /// No rule applies.
    Done,
    /// The node was rewritten; look at it again.
    Again,
    /// A child slot was restructured and must be settled before its parent.
    Child(NodeId),
}

struct Optimizer<'a> {
    ast: &'a mut Ast,
    pending: Vec<NodeId>,
    rewrites: usize,
}

impl Optimizer<'_> {
    /// Runs the fixpoint loop on `id`. Its children must already be settled.
    fn settle(&mut self, id: NodeId) {
        self.pending.push(id);
        while let Some(&current) = self.pending.last() {
            match self.rewrite(current) {
                Step::Done => {
                    self.pending.pop();
                }
                Step::Again => {}
                Step::Child(child) => self.pending.push(child),
            }
        }
    }

    fn rewrite(&mut self, id: NodeId) -> Step {
        match self.kind(id) {
            NodeKind::Binary { op, left, right } => match op {
                BinaryOp::Add | BinaryOp::Sub => self.rewrite_additive(id, op, left, right),
                BinaryOp::Mul | BinaryOp::Div => self.rewrite_multiplicative(id, op, left, right),
            },
            NodeKind::Negate { child } => self.rewrite_negate(id, child),
            NodeKind::IntLiteral(_) | NodeKind::ParamRef(_) => Step::Done,
        }
    }

    fn rewrite_additive(&mut self, id: NodeId, op: BinaryOp, left: NodeId, right: NodeId) -> Step {
        let l = self.literal(left);
        let r = self.literal(right);

        if let (Some(l), Some(r)) = (l, r)
            && let Some(value) = eval_binary(op, l, r)
        {
            return self.set(id, NodeKind::IntLiteral(value), "fold");
        }
        if l == Some(0) {
            return match op {
                BinaryOp::Sub => self.set(id, NodeKind::Negate { child: right }, "0 - x"),
                _ => self.copy(id, right, "0 + x"),
            };
        }
        if r == Some(0) {
            return self.copy(id, left, "x +- 0");
        }
        if let Some(step) = self.reassociate(id, BinaryOp::Add, op, left, right) {
            return step;
        }
        if op == BinaryOp::Sub
            && let (NodeKind::ParamRef(a), NodeKind::ParamRef(b)) = (self.kind(left), self.kind(right))
            && a == b
        {
            return self.set(id, NodeKind::IntLiteral(0), "x - x");
        }
        Step::Done
    }

    fn rewrite_multiplicative(
        &mut self,
        id: NodeId,
        op: BinaryOp,
        left: NodeId,
        right: NodeId,
    ) -> Step {
        let l = self.literal(left);
        let r = self.literal(right);

        // A zero divisor is left alone so evaluation still reports it.
        if let (Some(l), Some(r)) = (l, r)
            && let Some(value) = eval_binary(op, l, r)
        {
            return self.set(id, NodeKind::IntLiteral(value), "fold");
        }
        if l == Some(0) {
            return self.set(id, NodeKind::IntLiteral(0), "0 */ x");
        }

        if op == BinaryOp::Div {
            if let (NodeKind::ParamRef(a), NodeKind::ParamRef(b)) = (self.kind(left), self.kind(right))
                && a == b
            {
                return self.set(id, NodeKind::IntLiteral(1), "x / x");
            }
            return Step::Done;
        }

        if r == Some(0) {
            return self.set(id, NodeKind::IntLiteral(0), "x * 0");
        }
        if r == Some(1) {
            return self.copy(id, left, "x * 1");
        }
        if l == Some(1) {
            return self.copy(id, right, "1 * x");
        }
        self.reassociate(id, BinaryOp::Mul, op, left, right)
            .unwrap_or(Step::Done)
    }

    /// Re-association and rotation within one operator family, whose identity
    /// operator is `base` (`+` for `+`/`-`, `*` for `*` alone).
    ///
    /// New inner nodes reuse the slot of the operand they replace, so every
    /// rewrite keeps children at lower indices than their parent.
    fn reassociate(
        &mut self,
        id: NodeId,
        base: BinaryOp,
        op: BinaryOp,
        left: NodeId,
        right: NodeId,
    ) -> Option<Step> {
        let in_family = |candidate: BinaryOp| match base {
            BinaryOp::Add => candidate.is_additive(),
            _ => candidate == base,
        };
        // Operator equivalent to `op` followed by `inner`: `-(a - b)` is `-a + b`.
        let compose = |inner: BinaryOp| if op == inner { base } else { base.flipped() };

        let l = self.literal(left);
        let r = self.literal(right);

        // l op (a inner B)  =>  (l op a) op' B
        // l op (A inner b)  =>  (l op' b) op A
        if let Some(lv) = l
            && let NodeKind::Binary { op: inner, left: a, right: b } = self.kind(right)
            && in_family(inner)
        {
            if let Some(av) = self.literal(a)
                && let Some(value) = eval_binary(op, lv, av)
            {
                self.set_literal(left, value);
                let outer = compose(inner);
                return Some(self.set(id, binary(outer, left, b), "literal into right operand"));
            }
            if let Some(bv) = self.literal(b)
                && let Some(value) = eval_binary(compose(inner), lv, bv)
            {
                self.set_literal(left, value);
                return Some(self.set(id, binary(op, left, a), "literal into right operand"));
            }
        }

        // (A inner b) op r  =>  A base (±b op r)
        // (a inner B) op r  =>  (a op r) inner B
        if let Some(rv) = r
            && let NodeKind::Binary { op: inner, left: a, right: b } = self.kind(left)
            && in_family(inner)
        {
            if let Some(bv) = self.literal(b) {
                let signed = if inner == BinaryOp::Sub { eval_negate(bv) } else { bv };
                if let Some(value) = eval_binary(op, signed, rv) {
                    self.set_literal(right, value);
                    return Some(self.set(id, binary(base, a, right), "literal into left operand"));
                }
            }
            if let Some(av) = self.literal(a)
                && let Some(value) = eval_binary(op, av, rv)
            {
                self.set_literal(right, value);
                return Some(self.set(id, binary(inner, right, b), "literal into left operand"));
            }
        }

        // X op (C inner D)  =>  (X op C) op' D
        if let NodeKind::Binary { op: inner, left: c, right: d } = self.kind(right)
            && in_family(inner)
            && left < right
        {
            let outer = if op == base { inner } else { inner.flipped() };
            self.set_binary(right, op, left, c);
            self.set(id, binary(outer, right, d), "rotate left");
            return Some(Step::Child(right));
        }

        // (A inner c) op Y  =>  (A op Y) inner c
        if r.is_none()
            && let NodeKind::Binary { op: inner, left: a, right: c } = self.kind(left)
            && in_family(inner)
            && self.literal(c).is_some()
        {
            // The new inner node needs a slot above both of its operands. A
            // leaf `Y` can trade places with the old left slot to make one.
            let (slot, y) = if right < left {
                (left, right)
            } else if matches!(self.kind(right), NodeKind::ParamRef(_)) {
                let leaf = self.ast.node(right).clone();
                *self.ast.node_mut(left) = leaf;
                (right, left)
            } else {
                return None;
            };
            self.set_binary(slot, op, a, y);
            self.set(id, binary(inner, slot, c), "surface literal");
            return Some(Step::Child(slot));
        }

        None
    }

    fn rewrite_negate(&mut self, id: NodeId, child: NodeId) -> Step {
        match self.kind(child) {
            NodeKind::IntLiteral(value) => {
                self.set(id, NodeKind::IntLiteral(eval_negate(value)), "negate literal")
            }
            NodeKind::Negate { child: inner } => self.copy(id, inner, "double negation"),
            _ => Step::Done,
        }
    }

    fn kind(&self, id: NodeId) -> NodeKind {
        self.ast.node(id).kind
    }

    fn literal(&self, id: NodeId) -> Option<i64> {
        self.ast.node(id).as_literal()
    }

    /// Overwrites the slot's kind. The slot keeps its own span.
    fn set(&mut self, id: NodeId, kind: NodeKind, rule: &'static str) -> Step {
        tracing::trace!(node = id, rule, before = ?self.kind(id), after = ?kind, "Rewrite");
        self.ast.node_mut(id).kind = kind;
        self.rewrites += 1;
        Step::Again
    }

    fn copy(&mut self, id: NodeId, source: NodeId, rule: &'static str) -> Step {
        let kind = self.kind(source);
        self.set(id, kind, rule)
    }

    fn set_literal(&mut self, id: NodeId, value: i64) {
        self.ast.node_mut(id).kind = NodeKind::IntLiteral(value);
    }

    /// Turns `slot` into a fresh binary node spanning both operands.
    fn set_binary(&mut self, slot: NodeId, op: BinaryOp, left: NodeId, right: NodeId) {
        let span = Span::combine(&self.ast.node(left).span, &self.ast.node(right).span);
        let node = self.ast.node_mut(slot);
        node.kind = binary(op, left, right);
        node.span = span;
    }
}

fn binary(op: BinaryOp, left: NodeId, right: NodeId) -> NodeKind {
    NodeKind::Binary { op, left, right }
}
