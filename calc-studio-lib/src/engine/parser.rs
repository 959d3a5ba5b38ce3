use crate::engine::error::InvalidExpressionError;
use crate::engine::operator::{BinaryOperator, ComparisonOperator, UnaryOperator};
use crate::engine::syntax::expression_tree::Expr;
use crate::engine::token::Token;
use itertools::Itertools;

/// Deepest allowed expression nesting. Input past this fails with an error
/// instead of exhausting the call stack.
const MAX_NESTING: usize = 500;

/// Parses the given tokens into an expression tree.
///
/// The grammar follows the usual arithmetic precedence: assignment, then
/// comparison, then addition/subtraction, then multiplication/division/modulo,
/// then unary sign, then exponentiation (which is right-associative and binds
/// tighter than unary sign on its left, so `-2**2` parses as `-(2**2)`), then
/// calls, attribute access and subscripts, then atoms.
///
/// Exactly one expression must be present; leftover tokens are an error.
/// Nesting past a fixed depth cap is an error too, so arbitrarily pathological
/// input still comes back as an [`InvalidExpressionError`].
///
/// # Arguments
///
/// * `tokens`: The tokens of the expression, in source order.
///
/// returns: The root of the parsed expression tree.
///
/// # Examples
///
/// ```
/// use calc_studio::engine::{lexer, parser};
/// # use anyhow::Result;
///
/// # fn main() -> Result<()> {
/// let tokens = lexer::tokenize("1 + 2 * 3")?;
/// let tree = parser::parse(tokens)?;
/// print!("{}", tree);
/// # Ok::<(), anyhow::Error>(()) }
/// ```
pub fn parse(tokens: Vec<Token>) -> Result<Expr, InvalidExpressionError> {
    let mut parser = Parser {
        tokens,
        position: 0,
        depth: 0,
    };
    let expression = parser.parse_expression()?;
    parser.expect_end()?;
    Ok(expression)
}

struct Parser {
    tokens: Vec<Token>,
    position: usize,
    depth: usize,
}

impl Parser {
    fn parse_expression(&mut self) -> Result<Expr, InvalidExpressionError> {
        self.descend()?;
        let expression = self.parse_assignment();
        self.depth -= 1;
        expression
    }

    fn parse_assignment(&mut self) -> Result<Expr, InvalidExpressionError> {
        let target = self.parse_comparison()?;
        if self.consume_if(&Token::Equals) {
            // Right-associative, so the value re-enters at the top.
            let value = self.parse_expression()?;
            return Ok(Expr::new_assignment(target, value));
        }
        Ok(target)
    }

    fn parse_comparison(&mut self) -> Result<Expr, InvalidExpressionError> {
        let mut expression = self.parse_additive()?;
        while let Some(operator) = self.peek().and_then(comparison_operator) {
            self.position += 1;
            let right_operand = self.parse_additive()?;
            expression = Expr::new_comparison(operator, expression, right_operand);
        }
        Ok(expression)
    }

    fn parse_additive(&mut self) -> Result<Expr, InvalidExpressionError> {
        let mut expression = self.parse_multiplicative()?;
        loop {
            let operator = match self.peek() {
                Some(Token::Plus) => BinaryOperator::Add,
                Some(Token::Dash) => BinaryOperator::Subtract,
                _ => break,
            };
            self.position += 1;
            let right_operand = self.parse_multiplicative()?;
            expression = Expr::new_binary_operation(operator, expression, right_operand);
        }
        Ok(expression)
    }

    fn parse_multiplicative(&mut self) -> Result<Expr, InvalidExpressionError> {
        let mut expression = self.parse_unary()?;
        loop {
            let operator = match self.peek() {
                Some(Token::Asterisk) => BinaryOperator::Multiply,
                Some(Token::ForwardSlash) => BinaryOperator::Divide,
                Some(Token::Percent) => BinaryOperator::Modulo,
                _ => break,
            };
            self.position += 1;
            let right_operand = self.parse_unary()?;
            expression = Expr::new_binary_operation(operator, expression, right_operand);
        }
        Ok(expression)
    }

    // Sign chains and stacked exponents recurse back into this level without
    // re-entering parse_expression, so it carries its own depth guard.
    fn parse_unary(&mut self) -> Result<Expr, InvalidExpressionError> {
        self.descend()?;
        let expression = self.parse_signed();
        self.depth -= 1;
        expression
    }

    fn parse_signed(&mut self) -> Result<Expr, InvalidExpressionError> {
        if self.consume_if(&Token::Plus) {
            let operand = self.parse_unary()?;
            return Ok(Expr::new_unary_operation(UnaryOperator::Plus, operand));
        }
        if self.consume_if(&Token::Dash) {
            let operand = self.parse_unary()?;
            return Ok(Expr::new_unary_operation(UnaryOperator::Minus, operand));
        }
        self.parse_power()
    }

    fn parse_power(&mut self) -> Result<Expr, InvalidExpressionError> {
        let base = self.parse_postfix()?;
        if self.consume_if(&Token::DoubleAsterisk) {
            // The exponent re-enters at unary so `2**-3` parses.
            let exponent = self.parse_unary()?;
            return Ok(Expr::new_binary_operation(
                BinaryOperator::Exponentiate,
                base,
                exponent,
            ));
        }
        Ok(base)
    }

    fn parse_postfix(&mut self) -> Result<Expr, InvalidExpressionError> {
        let mut expression = self.parse_primary()?;
        loop {
            if self.consume_if(&Token::LeftParentheses) {
                let arguments = self.parse_arguments()?;
                expression = Expr::new_call(expression, arguments);
            } else if self.consume_if(&Token::Dot) {
                let attribute = self.expect_identifier()?;
                expression = Expr::new_attribute(expression, attribute);
            } else if self.consume_if(&Token::LeftBracket) {
                let index = self.parse_expression()?;
                self.expect(Token::RightBracket)?;
                expression = Expr::new_subscript(expression, index);
            } else {
                break;
            }
        }
        Ok(expression)
    }

    fn parse_arguments(&mut self) -> Result<Vec<Expr>, InvalidExpressionError> {
        let mut arguments = Vec::new();
        if self.consume_if(&Token::RightParentheses) {
            return Ok(arguments);
        }
        loop {
            arguments.push(self.parse_expression()?);
            if !self.consume_if(&Token::Comma) {
                break;
            }
        }
        self.expect(Token::RightParentheses)?;
        Ok(arguments)
    }

    fn parse_primary(&mut self) -> Result<Expr, InvalidExpressionError> {
        match self.advance() {
            Some(Token::Literal(value)) => Ok(Expr::new_literal(value)),
            Some(Token::LiteralString(text)) => Ok(Expr::new_literal_string(text)),
            Some(Token::Identifier(name)) => Ok(Expr::new_name(name)),
            Some(Token::LeftParentheses) => {
                let inner = self.parse_expression()?;
                self.expect(Token::RightParentheses)?;
                Ok(inner)
            }
            Some(other) => Err(InvalidExpressionError::new(format!(
                "unexpected token '{}'",
                other
            ))),
            None => Err(InvalidExpressionError::new("unexpected end of expression")),
        }
    }

    // Parentheses, call arguments, subscripts and assignment chains all
    // re-enter parse_expression, while sign chains and exponents re-enter
    // parse_unary. Guarding both entry points bounds every recursion cycle.
    fn descend(&mut self) -> Result<(), InvalidExpressionError> {
        if self.depth >= MAX_NESTING {
            return Err(InvalidExpressionError::new(
                "expression is too deeply nested",
            ));
        }
        self.depth += 1;
        Ok(())
    }

    fn peek(&self) -> Option<&Token> {
        self.tokens.get(self.position)
    }

    fn advance(&mut self) -> Option<Token> {
        let token = self.tokens.get(self.position).cloned();
        if token.is_some() {
            self.position += 1;
        }
        token
    }

    fn consume_if(&mut self, expected: &Token) -> bool {
        if self.peek() == Some(expected) {
            self.position += 1;
            return true;
        }
        false
    }

    fn expect(&mut self, expected: Token) -> Result<(), InvalidExpressionError> {
        if self.consume_if(&expected) {
            return Ok(());
        }
        match self.peek() {
            Some(actual) => Err(InvalidExpressionError::new(format!(
                "expected '{}' but found '{}'",
                expected, actual
            ))),
            None => Err(InvalidExpressionError::new(format!(
                "expected '{}' but the expression ended",
                expected
            ))),
        }
    }

    fn expect_identifier(&mut self) -> Result<String, InvalidExpressionError> {
        match self.advance() {
            Some(Token::Identifier(name)) => Ok(name),
            Some(other) => Err(InvalidExpressionError::new(format!(
                "expected a name after '.' but found '{}'",
                other
            ))),
            None => Err(InvalidExpressionError::new("expected a name after '.'")),
        }
    }

    fn expect_end(&self) -> Result<(), InvalidExpressionError> {
        if self.position < self.tokens.len() {
            let rest = self.tokens[self.position..].iter().join(" ");
            return Err(InvalidExpressionError::new(format!(
                "unexpected trailing input '{}'",
                rest
            )));
        }
        Ok(())
    }
}

fn comparison_operator(token: &Token) -> Option<ComparisonOperator> {
    match token {
        Token::Less => Some(ComparisonOperator::Less),
        Token::LessEqual => Some(ComparisonOperator::LessEqual),
        Token::Greater => Some(ComparisonOperator::Greater),
        Token::GreaterEqual => Some(ComparisonOperator::GreaterEqual),
        Token::EqualsEquals => Some(ComparisonOperator::Equal),
        Token::NotEquals => Some(ComparisonOperator::NotEqual),
        _ => None,
    }
}
