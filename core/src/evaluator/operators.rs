//! Arithmetic shared by every execution strategy, the parser's constant
//! folding and the optimizer.

use crate::parser::BinaryOp;

/// Evaluate a binary operation on two integers.
///
/// Uses wrapping arithmetic to prevent panics on overflow.
/// Returns `None` when dividing by zero.
pub(crate) fn eval_binary(op: BinaryOp, left: i64, right: i64) -> Option<i64> {
    match op {
        BinaryOp::Add => Some(left.wrapping_add(right)),
        BinaryOp::Sub => Some(left.wrapping_sub(right)),
        BinaryOp::Mul => Some(left.wrapping_mul(right)),
        BinaryOp::Div => {
            if right == 0 {
                None
            } else {
                // Use wrapping_div to handle i64::MIN / -1 case
                Some(left.wrapping_div(right))
            }
        }
    }
}

pub(crate) fn eval_negate(value: i64) -> i64 {
    value.wrapping_neg()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_int_add() {
        assert_eq!(eval_binary(BinaryOp::Add, 2, 3), Some(5));
        assert_eq!(eval_binary(BinaryOp::Add, -5, 3), Some(-2));
    }

    #[test]
    fn test_int_sub() {
        assert_eq!(eval_binary(BinaryOp::Sub, 10, 4), Some(6));
        assert_eq!(eval_binary(BinaryOp::Sub, 3, 10), Some(-7));
    }

    #[test]
    fn test_int_mul() {
        assert_eq!(eval_binary(BinaryOp::Mul, 3, 4), Some(12));
        assert_eq!(eval_binary(BinaryOp::Mul, -2, 5), Some(-10));
    }

    #[test]
    fn test_int_div_truncates_toward_zero() {
        assert_eq!(eval_binary(BinaryOp::Div, 7, 2), Some(3));
        assert_eq!(eval_binary(BinaryOp::Div, -7, 2), Some(-3));
        assert_eq!(eval_binary(BinaryOp::Div, 7, -2), Some(-3));
    }

    #[test]
    fn test_int_div_by_zero() {
        assert_eq!(eval_binary(BinaryOp::Div, 10, 0), None);
        assert_eq!(eval_binary(BinaryOp::Div, 0, 0), None);
    }

    #[test]
    fn test_int_wrapping_overflow() {
        assert_eq!(eval_binary(BinaryOp::Add, i64::MAX, 1), Some(i64::MIN));
        assert_eq!(eval_binary(BinaryOp::Sub, i64::MIN, 1), Some(i64::MAX));
        assert_eq!(eval_binary(BinaryOp::Mul, i64::MAX, 2), Some(-2));
        assert_eq!(eval_binary(BinaryOp::Div, i64::MIN, -1), Some(i64::MIN));
    }

    #[test]
    fn test_negate_wraps_at_min() {
        assert_eq!(eval_negate(5), -5);
        assert_eq!(eval_negate(i64::MIN), i64::MIN);
    }
}
