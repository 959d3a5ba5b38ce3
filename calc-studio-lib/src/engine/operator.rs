use crate::engine::error::InvalidExpressionError;
use std::fmt;
use std::fmt::Formatter;

/// A binary arithmetic operator.
///
/// The enum is exactly the set of binary operators the evaluator accepts;
/// anything else the parser can produce lives in `ComparisonOperator` and is
/// rejected during validation.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum BinaryOperator {
    Add,
    Subtract,
    Multiply,
    Divide,
    Modulo,
    Exponentiate,
}

/// An unary arithmetic operator.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum UnaryOperator {
    Plus,
    Minus,
}

/// A comparison operator. Parsed so it can be rejected by name, never evaluated.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum ComparisonOperator {
    Less,
    LessEqual,
    Greater,
    GreaterEqual,
    Equal,
    NotEqual,
}

impl BinaryOperator {
    /// Applies the operator to two evaluated operands.
    ///
    /// Division and modulo by zero fail outright. Any operation that turns
    /// finite operands into a non-finite value is reported instead of letting
    /// an `inf` or `NaN` leak silently into the rest of the evaluation.
    pub fn apply(&self, a: f64, b: f64) -> Result<f64, InvalidExpressionError> {
        let value = match self {
            BinaryOperator::Add => a + b,
            BinaryOperator::Subtract => a - b,
            BinaryOperator::Multiply => a * b,
            BinaryOperator::Divide => {
                if b == 0.0 {
                    return Err(InvalidExpressionError::new("division by zero"));
                }
                a / b
            }
            BinaryOperator::Modulo => {
                if b == 0.0 {
                    return Err(InvalidExpressionError::new("modulo by zero"));
                }
                // Floored modulo, so the sign of the result follows the divisor.
                a - b * (a / b).floor()
            }
            BinaryOperator::Exponentiate => {
                if a == 0.0 && b < 0.0 {
                    return Err(InvalidExpressionError::new(
                        "zero cannot be raised to a negative power",
                    ));
                }
                a.powf(b)
            }
        };

        if a.is_finite() && b.is_finite() && !value.is_finite() {
            return if value.is_nan() {
                Err(InvalidExpressionError::new(format!(
                    "math domain error in '{}'",
                    self
                )))
            } else {
                Err(InvalidExpressionError::new(format!(
                    "numeric overflow in '{}'",
                    self
                )))
            };
        }

        Ok(value)
    }
}

impl UnaryOperator {
    pub fn apply(&self, operand: f64) -> f64 {
        match self {
            UnaryOperator::Plus => operand,
            UnaryOperator::Minus => -operand,
        }
    }
}

impl fmt::Display for BinaryOperator {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let symbol = match self {
            BinaryOperator::Add => "+",
            BinaryOperator::Subtract => "-",
            BinaryOperator::Multiply => "*",
            BinaryOperator::Divide => "/",
            BinaryOperator::Modulo => "%",
            BinaryOperator::Exponentiate => "**",
        };
        write!(f, "{}", symbol)
    }
}

impl fmt::Display for UnaryOperator {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let symbol = match self {
            UnaryOperator::Plus => "+",
            UnaryOperator::Minus => "-",
        };
        write!(f, "{}", symbol)
    }
}

impl fmt::Display for ComparisonOperator {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let symbol = match self {
            ComparisonOperator::Less => "<",
            ComparisonOperator::LessEqual => "<=",
            ComparisonOperator::Greater => ">",
            ComparisonOperator::GreaterEqual => ">=",
            ComparisonOperator::Equal => "==",
            ComparisonOperator::NotEqual => "!=",
        };
        write!(f, "{}", symbol)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn addition_applies() {
        assert_eq!(BinaryOperator::Add.apply(2.0, 3.0).unwrap(), 5.0);
    }

    #[test]
    fn division_by_zero_is_an_error() {
        let error = BinaryOperator::Divide.apply(1.0, 0.0).unwrap_err();
        assert_eq!(error.message(), "division by zero");
    }

    #[test]
    fn modulo_by_zero_is_an_error() {
        let error = BinaryOperator::Modulo.apply(1.0, 0.0).unwrap_err();
        assert_eq!(error.message(), "modulo by zero");
    }

    #[test]
    fn modulo_sign_follows_the_divisor() {
        assert_eq!(BinaryOperator::Modulo.apply(-7.0, 3.0).unwrap(), 2.0);
        assert_eq!(BinaryOperator::Modulo.apply(7.0, -3.0).unwrap(), -2.0);
        assert_eq!(BinaryOperator::Modulo.apply(7.0, 3.0).unwrap(), 1.0);
    }

    #[test]
    fn fractional_modulo_works() {
        assert_eq!(BinaryOperator::Modulo.apply(7.5, 2.0).unwrap(), 1.5);
    }

    #[test]
    fn overflowing_multiplication_is_an_error() {
        let error = BinaryOperator::Multiply.apply(1e308, 10.0).unwrap_err();
        assert_eq!(error.message(), "numeric overflow in '*'");
    }

    #[test]
    fn zero_to_a_negative_power_is_an_error() {
        let error = BinaryOperator::Exponentiate.apply(0.0, -1.0).unwrap_err();
        assert_eq!(error.message(), "zero cannot be raised to a negative power");
    }

    #[test]
    fn negative_base_with_fractional_exponent_is_a_domain_error() {
        let error = BinaryOperator::Exponentiate.apply(-8.0, 0.5).unwrap_err();
        assert_eq!(error.message(), "math domain error in '**'");
    }

    #[test]
    fn non_finite_operands_may_produce_non_finite_results() {
        let value = BinaryOperator::Subtract
            .apply(f64::INFINITY, f64::INFINITY)
            .unwrap();
        assert!(value.is_nan());
    }

    #[test]
    fn unary_minus_negates() {
        assert_eq!(UnaryOperator::Minus.apply(4.0), -4.0);
    }

    #[test]
    fn unary_plus_is_the_identity() {
        assert_eq!(UnaryOperator::Plus.apply(4.0), 4.0);
    }
}
