use std::error::Error;
use std::fmt;
use std::fmt::Formatter;

/// The single failure type of the evaluation pipeline.
///
/// Every stage (lexing, parsing, validation, evaluation) reports problems
/// through this type, so a caller only ever has one error to display.
/// The message is written for end users and never echoes raw internals.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvalidExpressionError {
    message: String,
}

impl InvalidExpressionError {
    pub fn new(message: impl Into<String>) -> Self {
        InvalidExpressionError {
            message: message.into(),
        }
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

impl fmt::Display for InvalidExpressionError {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl Error for InvalidExpressionError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_shows_only_the_message() {
        let error = InvalidExpressionError::new("division by zero");
        assert_eq!(error.to_string(), "division by zero");
    }

    #[test]
    fn error_can_be_boxed_as_dyn_error() {
        let error: Box<dyn Error> = Box::new(InvalidExpressionError::new("oops"));
        assert_eq!(error.to_string(), "oops");
    }
}
