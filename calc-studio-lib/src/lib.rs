pub mod chart;
pub mod engine;
pub mod forecast;
pub mod history;
pub mod table;

pub use engine::{evaluate, parse_expression, sanitize, AngleMode, InvalidExpressionError, Number};
