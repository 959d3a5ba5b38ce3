use crate::engine::error::InvalidExpressionError;
use crate::engine::syntax::expression_tree::Expr;

/// Checks that the tree only contains whitelisted constructs before anything
/// is evaluated.
///
/// The whitelist is structural: numeric literals, name references, unary and
/// binary arithmetic, and function calls. Everything else the parser can
/// produce (string literals, comparisons, attribute access, subscripts,
/// assignments) is rejected here, naming the offending construct. The
/// operator enums themselves are the allowed operator set, so no per-operator
/// check is needed.
///
/// Rejection happens on the first disallowed node found in a pre-order walk;
/// nothing of the expression has been evaluated at that point.
pub fn validate(expression: &Expr) -> Result<(), InvalidExpressionError> {
    match expression {
        Expr::Literal(_) | Expr::Name(_) => Ok(()),
        Expr::UnaryOperation { operand, .. } => validate(operand),
        Expr::BinaryOperation {
            left_operand,
            right_operand,
            ..
        } => {
            validate(left_operand)?;
            validate(right_operand)
        }
        Expr::Call { callee, arguments } => {
            validate(callee)?;
            arguments.iter().try_for_each(validate)
        }
        disallowed => Err(InvalidExpressionError::new(format!(
            "disallowed construct: {}",
            disallowed.kind()
        ))),
    }
}
