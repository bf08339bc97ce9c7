//! Fixpoint tree rewriting.
//!
//! Nodes are visited children first. Each node is rewritten in place until
//! no rule applies:
//!
//! - literal operands fold, and `0`/`1` identities disappear;
//! - literals are gathered across `+`/`-` chains and across `*` chains;
//! - `x - x` becomes `0` and `x / x` becomes `1` for a single parameter `x`;
//! - double negation cancels.
//!
//! Division is never re-associated because truncation does not compose.
//!
//! The rewritten tree computes the same value as the original for every
//! argument assignment on which the original succeeds. Rules that drop an
//! operand (`0 / x`, `x * 0`, `x / x`) may turn a runtime division by zero
//! into a result.

#[allow(clippy::module_inception)]
mod optimizer;

pub use optimizer::optimize;
