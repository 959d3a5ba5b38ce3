use std::fmt;
use std::fmt::Formatter;

/// A discrete part of an expression.
///
/// The token set deliberately covers more than the evaluator accepts:
/// strings, comparison operators, attribute dots, subscript brackets and
/// assignment all lex and parse, so that the validator can reject them by
/// name instead of the lexer dying on the first unexpected character.
#[derive(Clone, PartialEq)]
pub enum Token {
    Literal(f64),
    LiteralString(String),
    Identifier(String),
    Plus,
    Dash,
    Asterisk,
    DoubleAsterisk,
    ForwardSlash,
    Percent,
    LeftParentheses,
    RightParentheses,
    LeftBracket,
    RightBracket,
    Comma,
    Dot,
    Equals,
    EqualsEquals,
    NotEquals,
    Less,
    LessEqual,
    Greater,
    GreaterEqual,
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Token::Literal(value) => write!(f, "{}", value),
            Token::LiteralString(text) => write!(f, "'{}'", text),
            Token::Identifier(name) => write!(f, "{}", name),
            Token::Plus => write!(f, "+"),
            Token::Dash => write!(f, "-"),
            Token::Asterisk => write!(f, "*"),
            Token::DoubleAsterisk => write!(f, "**"),
            Token::ForwardSlash => write!(f, "/"),
            Token::Percent => write!(f, "%"),
            Token::LeftParentheses => write!(f, "("),
            Token::RightParentheses => write!(f, ")"),
            Token::LeftBracket => write!(f, "["),
            Token::RightBracket => write!(f, "]"),
            Token::Comma => write!(f, ","),
            Token::Dot => write!(f, "."),
            Token::Equals => write!(f, "="),
            Token::EqualsEquals => write!(f, "=="),
            Token::NotEquals => write!(f, "!="),
            Token::Less => write!(f, "<"),
            Token::LessEqual => write!(f, "<="),
            Token::Greater => write!(f, ">"),
            Token::GreaterEqual => write!(f, ">="),
        }
    }
}

impl fmt::Debug for Token {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn literal_displays_its_value() {
        assert_eq!(Token::Literal(2.5).to_string(), "2.5");
    }

    #[test]
    fn string_literal_displays_quoted() {
        assert_eq!(Token::LiteralString("os".into()).to_string(), "'os'");
    }

    #[test]
    fn operator_tokens_display_their_symbols() {
        assert_eq!(Token::DoubleAsterisk.to_string(), "**");
        assert_eq!(Token::NotEquals.to_string(), "!=");
        assert_eq!(Token::Percent.to_string(), "%");
    }
}
