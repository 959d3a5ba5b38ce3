use crate::engine::number::Number;
use anyhow::{Context, Result};
use std::fmt;
use std::fmt::Formatter;
use string_builder::Builder;

/// One successfully evaluated expression and its result.
#[derive(Debug, Clone, PartialEq)]
pub struct Entry {
    pub expression: String,
    pub result: Number,
}

impl fmt::Display for Entry {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{} = {}", self.expression, self.result)
    }
}

/// An append-only log of successful evaluations, oldest first.
///
/// Only results that actually evaluated are recorded; failed expressions
/// never reach the history. The log lives with whoever owns the session and
/// is dropped with it.
#[derive(Debug, Default)]
pub struct History {
    entries: Vec<Entry>,
}

impl History {
    pub fn new() -> History {
        History {
            entries: Vec::new(),
        }
    }

    pub fn record(&mut self, expression: impl Into<String>, result: Number) {
        self.entries.push(Entry {
            expression: expression.into(),
            result,
        });
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Entry> {
        self.entries.iter()
    }

    /// Renders the whole history as one line per entry, oldest first.
    pub fn render(&self) -> Result<String> {
        let mut builder = Builder::new(self.entries.len());

        for entry in &self.entries {
            builder.append(entry.to_string());
            builder.append("\n");
        }

        builder.string().context("Failed to build history text")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn new_history_is_empty() {
        let history = History::new();
        assert!(history.is_empty());
        assert_eq!(history.render().unwrap(), "");
    }

    #[test]
    fn entries_are_kept_in_insertion_order() {
        let mut history = History::new();
        history.record("1 + 1", Number::Integer(2));
        history.record("1 / 3", Number::Float(0.33333333));

        let expressions: Vec<&str> = history
            .iter()
            .map(|entry| entry.expression.as_str())
            .collect();

        assert_eq!(expressions, vec!["1 + 1", "1 / 3"]);
    }

    #[test]
    fn render_writes_one_line_per_entry() {
        let mut history = History::new();
        history.record("1 + 1", Number::Integer(2));
        history.record("4 / 2", Number::Integer(2));

        assert_eq!(history.render().unwrap(), "1 + 1 = 2\n4 / 2 = 2\n");
    }

    #[test]
    fn entry_displays_expression_and_result() {
        let entry = Entry {
            expression: "1 / 3".to_string(),
            result: Number::Float(0.33333333),
        };
        assert_eq!(entry.to_string(), "1 / 3 = 0.33333333");
    }
}
