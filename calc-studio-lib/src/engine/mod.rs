pub mod error;
pub mod evaluator;
pub mod lexer;
pub mod number;
pub mod operator;
pub mod parser;
pub mod sanitizer;
pub mod symbols;
pub mod syntax;
pub mod token;
pub mod validator;

use crate::debug;
use crate::engine::syntax::expression_tree::Expr;

pub use error::InvalidExpressionError;
pub use number::Number;
pub use sanitizer::sanitize;
pub use symbols::AngleMode;

/// Evaluates a calculator expression and returns its normalized result.
///
/// The full pipeline runs every time: sanitize the raw text, tokenize, parse,
/// validate the tree against the construct whitelist, evaluate it against a
/// fresh symbol table for the given angle mode, and normalize the result to
/// eight decimal places (collapsing to an integer when the rounded value is
/// whole). Arbitrary input either produces a number or an
/// [`InvalidExpressionError`]; nothing else can happen.
///
/// # Arguments
///
/// * `expression`: The expression text, exactly as the user typed it.
/// * `mode`: Whether trigonometric functions read degrees or radians.
///
/// returns: The normalized result of the expression.
///
/// # Examples
///
/// ```
/// use calc_studio::engine::{evaluate, AngleMode, Number};
/// # use anyhow::Result;
///
/// # fn main() -> Result<()> {
/// let result = evaluate("(1 + 2", AngleMode::Radians)?;
/// assert_eq!(result, Number::Integer(3));
///
/// let result = evaluate("sin(90)", AngleMode::Degrees)?;
/// assert_eq!(result, Number::Integer(1));
/// # Ok::<(), anyhow::Error>(()) }
/// ```
pub fn evaluate(expression: &str, mode: AngleMode) -> Result<Number, InvalidExpressionError> {
    if expression.trim().is_empty() {
        return Err(InvalidExpressionError::new("empty expression"));
    }

    let sanitized = sanitize(expression);
    let tokens = lexer::tokenize(&sanitized)?;
    let tree = parser::parse(tokens)?;
    debug!(&tree);
    validator::validate(&tree)?;

    let symbols = symbols::SymbolTable::for_mode(mode);
    let value = evaluator::evaluate_tree(&tree, &symbols)?;
    Ok(number::normalize(value))
}

/// Parses an expression into its tree without validating or evaluating it.
///
/// Useful for inspecting how input was understood: the returned tree still
/// contains constructs the whitelist would reject, and it displays as an
/// ASCII tree.
///
/// # Arguments
///
/// * `expression`: The expression text, exactly as the user typed it.
///
/// returns: The root of the parsed expression tree.
pub fn parse_expression(expression: &str) -> Result<Expr, InvalidExpressionError> {
    let sanitized = sanitize(expression);
    let tokens = lexer::tokenize(&sanitized)?;
    parser::parse(tokens)
}

#[macro_export]
#[cfg(debug_assertions)]
macro_rules! debug {
    ($( $args:expr ),*) => { dbg!( $( $args ),* ); }
}

#[macro_export]
#[cfg(not(debug_assertions))]
macro_rules! debug {
    ($( $args:expr ),*) => {()}
}
