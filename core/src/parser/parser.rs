//! Recursive-descent parser.
//!
//! Grammar:
//!
//! ```text
//! expr     := add_sub EOF
//! add_sub  := mul_div (('+' | '-') mul_div)*
//! mul_div  := signed (('*' | '/') signed)*
//! signed   := ('+' | '-')* atom
//! atom     := INTEGER | IDENT | '(' add_sub ')'
//! ```
//!
//! Operator nodes are only appended to the arena once both operands are
//! known, so a binary operation on two literals folds into a single literal
//! without leaving anything behind.

use alloc::string::ToString;
use hashbrown::HashMap;
use hashbrown::hash_map::Entry;

use crate::ast::{Ast, AstNode, NodeId, NodeKind};
use crate::evaluator::operators::eval_binary;
use crate::parser::scanner::{Scanner, Token, TokenKind, is_identifier};
use crate::parser::{BinaryOp, ParseError, ParseErrorKind, Span};

/// Default limit on parenthesis nesting.
pub const DEFAULT_MAX_DEPTH: usize = 500;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ParserState {
    /// The next token has not been scanned yet.
    TokenPending,
    /// A scanned token is waiting to be consumed.
    TokenReady,
    /// The whole input was accepted.
    Done,
    /// A violation was found. Terminal.
    Error,
}

/// An error has been stored in the parser; the recursive methods only carry
/// this marker and [`Parser::run`] hands out the full [`ParseError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Latched;

type Step<T> = Result<T, Latched>;

pub(crate) struct Parser<'src, 'p> {
    source: &'src str,
    scanner: Scanner<'src>,
    state: ParserState,
    token: Token,
    error: Option<ParseError>,
    params: HashMap<&'p str, usize>,
    ast: Ast,
    depth: usize,
    max_depth: usize,
}

/// Parse `source` against the ordered parameter names `params`.
pub fn parse(source: &str, params: &[&str]) -> Result<Ast, ParseError> {
    parse_with_max_depth(source, params, DEFAULT_MAX_DEPTH)
}

/// Like [`parse`], with a custom limit on parenthesis nesting.
pub fn parse_with_max_depth(
    source: &str,
    params: &[&str],
    max_depth: usize,
) -> Result<Ast, ParseError> {
    tracing::debug!(
        source_len = source.len(),
        params = params.len(),
        max_depth,
        "Parsing expression"
    );
    let mut parser = Parser::new(source, params, max_depth)?;
    parser.run()?;
    Ok(parser.into_ast())
}

impl<'src, 'p> Parser<'src, 'p> {
    pub fn new(source: &'src str, params: &[&'p str], max_depth: usize) -> Result<Self, ParseError> {
        let params = index_params(source, params)?;
        let param_count = params.len();
        Ok(Self {
            source,
            scanner: Scanner::new(source),
            state: ParserState::TokenPending,
            token: Token {
                kind: TokenKind::Eof,
                span: Span::default(),
            },
            error: None,
            params,
            ast: Ast::new(param_count),
            depth: 0,
            max_depth,
        })
    }

    #[cfg(test)]
    pub fn state(&self) -> ParserState {
        self.state
    }

    #[cfg(test)]
    pub fn error(&self) -> Option<&ParseError> {
        self.error.as_ref()
    }

    pub fn into_ast(self) -> Ast {
        self.ast
    }

    /// Parses the whole input. Once an error is latched every later call
    /// reports the same error.
    pub fn run(&mut self) -> Result<(), ParseError> {
        match self.state {
            ParserState::Done => Ok(()),
            ParserState::Error => Err(self.latched()),
            ParserState::TokenPending | ParserState::TokenReady => match self.parse_root() {
                Ok(()) => Ok(()),
                Err(Latched) => Err(self.latched()),
            },
        }
    }

    fn parse_root(&mut self) -> Step<()> {
        let root = self.parse_add_sub()?;
        let token = self.peek()?.clone();
        if token.kind != TokenKind::Eof {
            return Err(self.fail(
                ParseErrorKind::IllegalToken {
                    expected: "operator or end of input",
                    found: token.kind.describe(),
                },
                token.span,
            ));
        }
        self.consume();
        self.append(root)?;
        self.state = ParserState::Done;
        tracing::trace!(nodes = self.ast.len(), "Parse complete");
        Ok(())
    }

    fn parse_add_sub(&mut self) -> Step<AstNode> {
        let mut node = self.parse_mul_div()?;
        loop {
            let op = match self.peek()?.kind {
                TokenKind::Plus => BinaryOp::Add,
                TokenKind::Minus => BinaryOp::Sub,
                _ => return Ok(node),
            };
            self.consume();
            let right = self.parse_mul_div()?;
            node = self.binary(op, node, right)?;
        }
    }

    fn parse_mul_div(&mut self) -> Step<AstNode> {
        let mut node = self.parse_signed()?;
        loop {
            let op = match self.peek()?.kind {
                TokenKind::Star => BinaryOp::Mul,
                TokenKind::Slash => BinaryOp::Div,
                _ => return Ok(node),
            };
            self.consume();
            let right = self.parse_signed()?;
            node = self.binary(op, node, right)?;
        }
    }

    fn parse_signed(&mut self) -> Step<AstNode> {
        let start = self.peek()?.span.0.start;
        let mut negate = false;
        loop {
            match self.peek()?.kind {
                TokenKind::Minus => negate = !negate,
                TokenKind::Plus => {}
                _ => break,
            }
            self.consume();
        }

        let atom = self.parse_atom()?;
        if !negate {
            return Ok(atom);
        }

        let span = Span::new(start, atom.span.0.end);
        match atom.kind {
            NodeKind::IntLiteral(value) => match value.checked_neg() {
                Some(negated) => Ok(AstNode::literal(negated, span)),
                None => Err(self.fail(ParseErrorKind::ValueOutOfRange, span)),
            },
            _ => {
                let child = self.append(atom)?;
                Ok(AstNode::new(NodeKind::Negate { child }, span))
            }
        }
    }

    fn parse_atom(&mut self) -> Step<AstNode> {
        let token = self.peek()?.clone();
        match token.kind {
            TokenKind::Int(value) => {
                self.consume();
                Ok(AstNode::literal(value, token.span))
            }
            TokenKind::Ident => {
                let Some(&index) = self.params.get(self.scanner.ident()) else {
                    return Err(self.fail_undefined(token.span));
                };
                self.consume();
                Ok(AstNode::new(NodeKind::ParamRef(index), token.span))
            }
            TokenKind::OpenParen => self.parse_paren(token.span),
            other => Err(self.fail(
                ParseErrorKind::IllegalToken {
                    expected: "expression",
                    found: other.describe(),
                },
                token.span,
            )),
        }
    }

    fn parse_paren(&mut self, open: Span) -> Step<AstNode> {
        self.depth += 1;
        if self.depth > self.max_depth {
            let max_depth = self.max_depth;
            return Err(self.fail(ParseErrorKind::MaxDepthExceeded { max_depth }, open));
        }
        self.consume();

        let inner = self.parse_add_sub()?;
        let token = self.peek()?.clone();
        if token.kind != TokenKind::CloseParen {
            let span = Span::new(open.0.start, token.span.0.end);
            return Err(self.fail(
                ParseErrorKind::ExpectedCloseParen {
                    open,
                    found: token.kind.describe(),
                },
                span,
            ));
        }
        self.consume();
        self.depth -= 1;
        Ok(inner)
    }

    /// Combines two operands, folding when both are literals.
    fn binary(&mut self, op: BinaryOp, left: AstNode, right: AstNode) -> Step<AstNode> {
        if op == BinaryOp::Div && right.as_literal() == Some(0) {
            return Err(self.fail(ParseErrorKind::DivisionByZero, right.span));
        }

        let span = Span::combine(&left.span, &right.span);
        if let (Some(l), Some(r)) = (left.as_literal(), right.as_literal()) {
            if let Some(value) = eval_binary(op, l, r) {
                return Ok(AstNode::literal(value, span));
            }
        }

        let left = self.append(left)?;
        let right = self.append(right)?;
        Ok(AstNode::new(NodeKind::Binary { op, left, right }, span))
    }

    fn append(&mut self, node: AstNode) -> Step<NodeId> {
        match self.ast.try_push(node) {
            Ok(id) => Ok(id),
            Err(_) => {
                let span = self.token.span.clone();
                Err(self.fail(ParseErrorKind::OutOfMemory, span))
            }
        }
    }

    fn peek(&mut self) -> Step<&Token> {
        match self.state {
            ParserState::TokenReady | ParserState::Done => {}
            ParserState::Error => return Err(Latched),
            ParserState::TokenPending => match self.scanner.next_token() {
                Ok(token) => {
                    self.token = token;
                    self.state = ParserState::TokenReady;
                }
                Err(err) => {
                    self.state = ParserState::Error;
                    self.error = Some(err);
                    return Err(Latched);
                }
            },
        }
        Ok(&self.token)
    }

    fn consume(&mut self) {
        debug_assert_eq!(
            self.state,
            ParserState::TokenReady,
            "consume() without a peeked token"
        );
        if self.state == ParserState::TokenReady {
            self.state = ParserState::TokenPending;
        }
    }

    #[inline(never)]
    fn fail(&mut self, kind: ParseErrorKind, span: Span) -> Latched {
        tracing::debug!(code = kind.code(), ?span, "Parse failed");
        self.error = Some(ParseError::new(kind, self.source.to_string(), span));
        self.state = ParserState::Error;
        Latched
    }

    #[inline(never)]
    fn fail_undefined(&mut self, span: Span) -> Latched {
        let name = self.scanner.ident().to_string();
        self.fail(ParseErrorKind::UndefinedVariable { name }, span)
    }

    fn latched(&self) -> ParseError {
        match &self.error {
            Some(error) => error.clone(),
            None => ParseError::new(
                ParseErrorKind::OutOfMemory,
                self.source.to_string(),
                Span::default(),
            ),
        }
    }
}

/// Validates parameter names and maps each to its position.
fn index_params<'p>(source: &str, params: &[&'p str]) -> Result<HashMap<&'p str, usize>, ParseError> {
    let fail = |kind| ParseError::new(kind, source.to_string(), Span::default());

    let mut index = HashMap::new();
    index
        .try_reserve(params.len())
        .map_err(|_| fail(ParseErrorKind::OutOfMemory))?;

    for (position, &name) in params.iter().enumerate() {
        if !is_identifier(name) {
            return Err(fail(ParseErrorKind::IllegalArgumentName {
                index: position,
                name: name.to_string(),
            }));
        }
        match index.entry(name) {
            Entry::Occupied(first) => {
                return Err(fail(ParseErrorKind::DuplicatedArgumentName {
                    index: position,
                    first: *first.get(),
                    name: name.to_string(),
                }));
            }
            Entry::Vacant(slot) => {
                slot.insert(position);
            }
        }
    }
    Ok(index)
}
