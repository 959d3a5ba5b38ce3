use crate::engine::error::InvalidExpressionError;
use crate::engine::symbols::{Function, Symbol, SymbolTable};
use crate::engine::syntax::expression_tree::Expr;

/// Evaluates a validated expression tree against the given symbol table.
///
/// Every name in the tree is resolved through the table and nowhere else;
/// there is no ambient environment to fall back on. Function arguments are
/// evaluated left to right before the call. The raw `f64` result is returned
/// so the pipeline can normalize it in one place.
pub fn evaluate_tree(
    expression: &Expr,
    symbols: &SymbolTable,
) -> Result<f64, InvalidExpressionError> {
    match expression {
        Expr::Literal(value) => Ok(*value),
        Expr::Name(name) => match symbols.lookup(name) {
            Some(Symbol::Constant(value)) => Ok(*value),
            Some(Symbol::Function(function)) => Err(InvalidExpressionError::new(format!(
                "'{}' is a function and must be called",
                function.name()
            ))),
            None => Err(InvalidExpressionError::new(format!(
                "name '{}' is not defined",
                name
            ))),
        },
        Expr::UnaryOperation { operator, operand } => {
            let value = evaluate_tree(operand, symbols)?;
            Ok(operator.apply(value))
        }
        Expr::BinaryOperation {
            operator,
            left_operand,
            right_operand,
        } => {
            let left = evaluate_tree(left_operand, symbols)?;
            let right = evaluate_tree(right_operand, symbols)?;
            operator.apply(left, right)
        }
        Expr::Call { callee, arguments } => {
            let function = resolve_callee(callee, symbols)?;
            let mut values = Vec::with_capacity(arguments.len());
            for argument in arguments {
                values.push(evaluate_tree(argument, symbols)?);
            }
            function.call(&values)
        }
        // Validation runs before evaluation, but a caller invoking the
        // evaluator directly still gets the same rejection.
        disallowed => Err(InvalidExpressionError::new(format!(
            "disallowed construct: {}",
            disallowed.kind()
        ))),
    }
}

fn resolve_callee<'a>(
    callee: &Expr,
    symbols: &'a SymbolTable,
) -> Result<&'a Function, InvalidExpressionError> {
    let name = match callee {
        Expr::Name(name) => name,
        other => {
            return Err(InvalidExpressionError::new(format!(
                "{} is not callable",
                other.kind()
            )))
        }
    };
    match symbols.lookup(name) {
        Some(Symbol::Function(function)) => Ok(function),
        Some(Symbol::Constant(_)) => Err(InvalidExpressionError::new(format!(
            "'{}' is not callable",
            name
        ))),
        None => Err(InvalidExpressionError::new(format!(
            "name '{}' is not defined",
            name
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::lexer::tokenize;
    use crate::engine::parser::parse;
    use crate::engine::symbols::AngleMode;
    use std::f64::consts::PI;

    fn evaluate_text(text: &str) -> Result<f64, InvalidExpressionError> {
        let tree = parse(tokenize(text).unwrap()).unwrap();
        let symbols = SymbolTable::for_mode(AngleMode::Radians);
        evaluate_tree(&tree, &symbols)
    }

    #[test]
    fn literal_evaluates_to_itself() {
        assert_eq!(evaluate_text("42").unwrap(), 42.0);
    }

    #[test]
    fn constant_resolves_through_the_table() {
        assert_eq!(evaluate_text("pi").unwrap(), PI);
    }

    #[test]
    fn arithmetic_follows_precedence() {
        assert_eq!(evaluate_text("1 + 2 * 3").unwrap(), 7.0);
    }

    #[test]
    fn unary_minus_negates_a_call_result() {
        assert_eq!(evaluate_text("-abs(-5)").unwrap(), -5.0);
    }

    #[test]
    fn call_arguments_evaluate_before_the_call() {
        assert_eq!(evaluate_text("hypot(1 + 2, 4)").unwrap(), 5.0);
    }

    #[test]
    fn division_by_zero_fails() {
        let error = evaluate_text("1 / 0").unwrap_err();
        assert_eq!(error.message(), "division by zero");
    }

    #[test]
    fn modulo_follows_the_divisor_sign() {
        assert_eq!(evaluate_text("-7 % 3").unwrap(), 2.0);
    }

    #[test]
    fn undefined_name_fails() {
        let error = evaluate_text("x + 1").unwrap_err();
        assert_eq!(error.message(), "name 'x' is not defined");
    }

    #[test]
    fn bare_function_name_is_not_a_value() {
        let error = evaluate_text("sin").unwrap_err();
        assert_eq!(error.message(), "'sin' is a function and must be called");
    }

    #[test]
    fn constant_is_not_callable() {
        let error = evaluate_text("pi(2)").unwrap_err();
        assert_eq!(error.message(), "'pi' is not callable");
    }

    #[test]
    fn literal_is_not_callable() {
        let error = evaluate_text("3(2)").unwrap_err();
        assert_eq!(error.message(), "numeric literal is not callable");
    }

    #[test]
    fn unknown_function_name_fails() {
        let error = evaluate_text("__import__(1)").unwrap_err();
        assert_eq!(error.message(), "name '__import__' is not defined");
    }

    #[test]
    fn disallowed_construct_reaching_the_evaluator_is_still_rejected() {
        let tree = parse(tokenize("x = 1").unwrap()).unwrap();
        let symbols = SymbolTable::for_mode(AngleMode::Radians);
        let error = evaluate_tree(&tree, &symbols).unwrap_err();
        assert_eq!(error.message(), "disallowed construct: assignment");
    }

    #[test]
    fn infinity_flows_through_arithmetic() {
        let value = evaluate_text("inf - inf").unwrap();
        assert!(value.is_nan());
    }
}
