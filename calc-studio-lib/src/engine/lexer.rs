use crate::engine::error::InvalidExpressionError;
use crate::engine::token::Token;

/// Splits expression text into a flat list of tokens.
///
/// Whitespace separates tokens and is otherwise ignored. Numeric literals
/// understand decimal points and scientific notation (`2e-3`), string
/// literals accept both quote styles, and identifiers follow the usual
/// letters-digits-underscores rule.
///
/// # Arguments
///
/// * `expression`: The sanitized expression text.
///
/// returns: The tokens of the expression, in source order.
///
/// # Examples
///
/// ```
/// use calc_studio::engine::lexer::tokenize;
/// use calc_studio::engine::token::Token;
/// # use anyhow::Result;
///
/// # fn main() -> Result<()> {
/// let tokens = tokenize("1 + pi")?;
/// assert_eq!(
///     tokens,
///     vec![
///         Token::Literal(1.0),
///         Token::Plus,
///         Token::Identifier("pi".to_string()),
///     ]
/// );
/// # Ok::<(), anyhow::Error>(()) }
/// ```
pub fn tokenize(expression: &str) -> Result<Vec<Token>, InvalidExpressionError> {
    Lexer::new(expression).run()
}

struct Lexer {
    characters: Vec<char>,
    position: usize,
}

impl Lexer {
    fn new(expression: &str) -> Self {
        Lexer {
            characters: expression.chars().collect(),
            position: 0,
        }
    }

    fn run(mut self) -> Result<Vec<Token>, InvalidExpressionError> {
        let mut tokens = Vec::new();

        while let Some(character) = self.peek() {
            if character.is_whitespace() {
                self.position += 1;
                continue;
            }

            let token = match character {
                '(' => self.single(Token::LeftParentheses),
                ')' => self.single(Token::RightParentheses),
                '[' => self.single(Token::LeftBracket),
                ']' => self.single(Token::RightBracket),
                ',' => self.single(Token::Comma),
                '+' => self.single(Token::Plus),
                '-' => self.single(Token::Dash),
                '/' => self.single(Token::ForwardSlash),
                '%' => self.single(Token::Percent),
                '*' => self.asterisk(),
                '=' => self.equals(),
                '<' => self.comparison(Token::Less, Token::LessEqual),
                '>' => self.comparison(Token::Greater, Token::GreaterEqual),
                '!' => self.exclamation()?,
                '\'' | '"' => self.string_literal(character)?,
                '.' => {
                    if self.peek_at(1).map_or(false, |next| next.is_ascii_digit()) {
                        self.number()?
                    } else {
                        self.single(Token::Dot)
                    }
                }
                digit if digit.is_ascii_digit() => self.number()?,
                letter if letter.is_alphabetic() || letter == '_' => self.identifier(),
                other => {
                    return Err(InvalidExpressionError::new(format!(
                        "unexpected character '{}'",
                        other
                    )))
                }
            };
            tokens.push(token);
        }

        Ok(tokens)
    }

    fn peek(&self) -> Option<char> {
        self.characters.get(self.position).copied()
    }

    fn peek_at(&self, offset: usize) -> Option<char> {
        self.characters.get(self.position + offset).copied()
    }

    fn single(&mut self, token: Token) -> Token {
        self.position += 1;
        token
    }

    fn asterisk(&mut self) -> Token {
        if self.peek_at(1) == Some('*') {
            self.position += 2;
            Token::DoubleAsterisk
        } else {
            self.single(Token::Asterisk)
        }
    }

    fn equals(&mut self) -> Token {
        if self.peek_at(1) == Some('=') {
            self.position += 2;
            Token::EqualsEquals
        } else {
            self.single(Token::Equals)
        }
    }

    fn comparison(&mut self, bare: Token, with_equals: Token) -> Token {
        if self.peek_at(1) == Some('=') {
            self.position += 2;
            with_equals
        } else {
            self.single(bare)
        }
    }

    fn exclamation(&mut self) -> Result<Token, InvalidExpressionError> {
        if self.peek_at(1) == Some('=') {
            self.position += 2;
            Ok(Token::NotEquals)
        } else {
            Err(InvalidExpressionError::new("unexpected character '!'"))
        }
    }

    fn string_literal(&mut self, quote: char) -> Result<Token, InvalidExpressionError> {
        self.position += 1;
        let mut text = String::new();
        while let Some(character) = self.peek() {
            self.position += 1;
            if character == quote {
                return Ok(Token::LiteralString(text));
            }
            text.push(character);
        }
        Err(InvalidExpressionError::new("unterminated string literal"))
    }

    fn number(&mut self) -> Result<Token, InvalidExpressionError> {
        let mut text = String::new();
        self.take_digits(&mut text);

        if self.peek() == Some('.') {
            text.push('.');
            self.position += 1;
            self.take_digits(&mut text);
        }

        if self.exponent_follows() {
            if let Some(marker) = self.peek() {
                text.push(marker);
                self.position += 1;
            }
            if let Some(sign @ ('+' | '-')) = self.peek() {
                text.push(sign);
                self.position += 1;
            }
            self.take_digits(&mut text);
        }

        text.parse::<f64>().map(Token::Literal).map_err(|_| {
            InvalidExpressionError::new(format!("invalid numeric literal '{}'", text))
        })
    }

    fn take_digits(&mut self, text: &mut String) {
        while let Some(digit) = self.peek() {
            if !digit.is_ascii_digit() {
                break;
            }
            text.push(digit);
            self.position += 1;
        }
    }

    fn exponent_follows(&self) -> bool {
        if !matches!(self.peek(), Some('e') | Some('E')) {
            return false;
        }
        match self.peek_at(1) {
            Some(digit) if digit.is_ascii_digit() => true,
            Some('+') | Some('-') => self.peek_at(2).map_or(false, |next| next.is_ascii_digit()),
            _ => false,
        }
    }

    fn identifier(&mut self) -> Token {
        let mut name = String::new();
        while let Some(character) = self.peek() {
            if !character.is_alphanumeric() && character != '_' {
                break;
            }
            name.push(character);
            self.position += 1;
        }
        Token::Identifier(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn empty_input_produces_no_tokens() {
        assert_eq!(tokenize("").unwrap(), vec![]);
    }

    #[test]
    fn whitespace_only_input_produces_no_tokens() {
        assert_eq!(tokenize("   \t ").unwrap(), vec![]);
    }

    #[test]
    fn integer_literal_is_lexed_as_float_value() {
        assert_eq!(tokenize("42").unwrap(), vec![Token::Literal(42.0)]);
    }

    #[test]
    fn decimal_literal_keeps_its_fraction() {
        assert_eq!(tokenize("3.25").unwrap(), vec![Token::Literal(3.25)]);
    }

    #[test]
    fn leading_dot_literal_is_understood() {
        assert_eq!(tokenize(".5").unwrap(), vec![Token::Literal(0.5)]);
    }

    #[test]
    fn trailing_dot_literal_is_understood() {
        assert_eq!(tokenize("5.").unwrap(), vec![Token::Literal(5.0)]);
    }

    #[test]
    fn scientific_notation_is_a_single_literal() {
        assert_eq!(tokenize("2e-3").unwrap(), vec![Token::Literal(0.002)]);
    }

    #[test]
    fn letter_e_without_exponent_digits_is_an_identifier() {
        assert_eq!(
            tokenize("2e").unwrap(),
            vec![Token::Literal(2.0), Token::Identifier("e".to_string())]
        );
    }

    #[test]
    fn double_asterisk_is_one_token() {
        assert_eq!(
            tokenize("2**3").unwrap(),
            vec![
                Token::Literal(2.0),
                Token::DoubleAsterisk,
                Token::Literal(3.0),
            ]
        );
    }

    #[test]
    fn arithmetic_operators_lex_individually() {
        assert_eq!(
            tokenize("1+2-3*4/5%6").unwrap(),
            vec![
                Token::Literal(1.0),
                Token::Plus,
                Token::Literal(2.0),
                Token::Dash,
                Token::Literal(3.0),
                Token::Asterisk,
                Token::Literal(4.0),
                Token::ForwardSlash,
                Token::Literal(5.0),
                Token::Percent,
                Token::Literal(6.0),
            ]
        );
    }

    #[test]
    fn call_syntax_lexes_parentheses_and_commas() {
        assert_eq!(
            tokenize("atan2(1, 2)").unwrap(),
            vec![
                Token::Identifier("atan2".to_string()),
                Token::LeftParentheses,
                Token::Literal(1.0),
                Token::Comma,
                Token::Literal(2.0),
                Token::RightParentheses,
            ]
        );
    }

    #[test]
    fn dunder_identifier_lexes_as_one_name() {
        assert_eq!(
            tokenize("__import__").unwrap(),
            vec![Token::Identifier("__import__".to_string())]
        );
    }

    #[test]
    fn single_quoted_string_is_lexed() {
        assert_eq!(
            tokenize("'os'").unwrap(),
            vec![Token::LiteralString("os".to_string())]
        );
    }

    #[test]
    fn double_quoted_string_is_lexed() {
        assert_eq!(
            tokenize("\"hello there\"").unwrap(),
            vec![Token::LiteralString("hello there".to_string())]
        );
    }

    #[test]
    fn unterminated_string_is_an_error() {
        let error = tokenize("'os").unwrap_err();
        assert_eq!(error.message(), "unterminated string literal");
    }

    #[test]
    fn comparison_operators_lex_with_their_equals_variants() {
        assert_eq!(
            tokenize("< <= > >= == != =").unwrap(),
            vec![
                Token::Less,
                Token::LessEqual,
                Token::Greater,
                Token::GreaterEqual,
                Token::EqualsEquals,
                Token::NotEquals,
                Token::Equals,
            ]
        );
    }

    #[test]
    fn attribute_and_subscript_punctuation_lexes() {
        assert_eq!(
            tokenize("a.b[0]").unwrap(),
            vec![
                Token::Identifier("a".to_string()),
                Token::Dot,
                Token::Identifier("b".to_string()),
                Token::LeftBracket,
                Token::Literal(0.0),
                Token::RightBracket,
            ]
        );
    }

    #[test]
    fn lone_exclamation_mark_is_an_error() {
        let error = tokenize("1 ! 2").unwrap_err();
        assert_eq!(error.message(), "unexpected character '!'");
    }

    #[test]
    fn unknown_character_is_reported() {
        let error = tokenize("1 @ 2").unwrap_err();
        assert_eq!(error.message(), "unexpected character '@'");
    }
}
