use crate::engine::operator::{BinaryOperator, ComparisonOperator, UnaryOperator};
use crate::engine::syntax::syntax_visitor::{
    walk_assignment, walk_attribute, walk_binary_operation, walk_comparison, walk_subscript,
    walk_unary_operation, SyntaxVisitor,
};
use ptree::{write_tree, TreeBuilder};
use std::fmt;
use std::fmt::{Debug, Display, Formatter};

/// A node of a parsed expression.
///
/// The grammar is a superset of what the evaluator accepts: string literals,
/// comparisons, attribute access, subscripts and assignments all parse into
/// their own variants. They exist so the validator can point at the exact
/// construct it rejects, instead of the parser failing with a generic syntax
/// error.
#[derive(Clone, PartialEq)]
pub enum Expr {
    // Terminal symbols (leaves)
    Literal(f64),
    Name(String),
    LiteralString(String),
    // Non-terminal symbols (non-leaves)
    UnaryOperation {
        operator: UnaryOperator,
        operand: Box<Expr>,
    },
    BinaryOperation {
        operator: BinaryOperator,
        left_operand: Box<Expr>,
        right_operand: Box<Expr>,
    },
    Comparison {
        operator: ComparisonOperator,
        left_operand: Box<Expr>,
        right_operand: Box<Expr>,
    },
    Call {
        callee: Box<Expr>,
        arguments: Vec<Expr>,
    },
    Attribute {
        value: Box<Expr>,
        attribute: String,
    },
    Subscript {
        value: Box<Expr>,
        index: Box<Expr>,
    },
    Assignment {
        target: Box<Expr>,
        value: Box<Expr>,
    },
}

impl Expr {
    pub fn new_literal(value: f64) -> Expr {
        Expr::Literal(value)
    }

    pub fn new_name(name: impl Into<String>) -> Expr {
        Expr::Name(name.into())
    }

    pub fn new_literal_string(text: impl Into<String>) -> Expr {
        Expr::LiteralString(text.into())
    }

    pub fn new_unary_operation(operator: UnaryOperator, operand: Expr) -> Expr {
        Expr::UnaryOperation {
            operator,
            operand: Box::new(operand),
        }
    }

    pub fn new_binary_operation(
        operator: BinaryOperator,
        left_operand: Expr,
        right_operand: Expr,
    ) -> Expr {
        Expr::BinaryOperation {
            operator,
            left_operand: Box::new(left_operand),
            right_operand: Box::new(right_operand),
        }
    }

    pub fn new_comparison(
        operator: ComparisonOperator,
        left_operand: Expr,
        right_operand: Expr,
    ) -> Expr {
        Expr::Comparison {
            operator,
            left_operand: Box::new(left_operand),
            right_operand: Box::new(right_operand),
        }
    }

    pub fn new_call(callee: Expr, arguments: Vec<Expr>) -> Expr {
        Expr::Call {
            callee: Box::new(callee),
            arguments,
        }
    }

    pub fn new_attribute(value: Expr, attribute: impl Into<String>) -> Expr {
        Expr::Attribute {
            value: Box::new(value),
            attribute: attribute.into(),
        }
    }

    pub fn new_subscript(value: Expr, index: Expr) -> Expr {
        Expr::Subscript {
            value: Box::new(value),
            index: Box::new(index),
        }
    }

    pub fn new_assignment(target: Expr, value: Expr) -> Expr {
        Expr::Assignment {
            target: Box::new(target),
            value: Box::new(value),
        }
    }

    /// A human-readable name for the node variant, used in error messages.
    pub fn kind(&self) -> &'static str {
        match self {
            Expr::Literal(_) => "numeric literal",
            Expr::Name(_) => "name reference",
            Expr::LiteralString(_) => "string literal",
            Expr::UnaryOperation { .. } => "unary operation",
            Expr::BinaryOperation { .. } => "binary operation",
            Expr::Comparison { .. } => "comparison",
            Expr::Call { .. } => "function call",
            Expr::Attribute { .. } => "attribute access",
            Expr::Subscript { .. } => "subscript",
            Expr::Assignment { .. } => "assignment",
        }
    }

    /// Calls the correct visitor method for the node variant on the given visitor.
    pub(crate) fn accept(&self, visitor: &mut impl SyntaxVisitor) {
        match self {
            Expr::Literal(value) => visitor.visit_literal(*value),
            Expr::Name(name) => visitor.visit_name(name),
            Expr::LiteralString(text) => visitor.visit_literal_string(text),
            Expr::UnaryOperation { operator, operand } => {
                visitor.visit_unary_operation(operator, operand)
            }
            Expr::BinaryOperation {
                operator,
                left_operand,
                right_operand,
            } => visitor.visit_binary_operation(operator, left_operand, right_operand),
            Expr::Comparison {
                operator,
                left_operand,
                right_operand,
            } => visitor.visit_comparison(operator, left_operand, right_operand),
            Expr::Call { callee, arguments } => visitor.visit_call(callee, arguments),
            Expr::Attribute { value, attribute } => visitor.visit_attribute(value, attribute),
            Expr::Subscript { value, index } => visitor.visit_subscript(value, index),
            Expr::Assignment { target, value } => visitor.visit_assignment(target, value),
        }
    }

    fn format_tree(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let mut visitor = TreeBuilderVisitor {
            builder: TreeBuilder::new("expression".into()),
        };
        self.accept(&mut visitor);

        let mut buffer: Vec<u8> = Vec::new();
        if write_tree(&visitor.builder.build(), &mut buffer).is_err() {
            return Err(fmt::Error);
        }
        let text = match std::str::from_utf8(&buffer) {
            Ok(text) => text,
            Err(_) => return Err(fmt::Error),
        };
        f.write_str(text)
    }
}

impl Display for Expr {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        self.format_tree(f)
    }
}

impl Debug for Expr {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Expr::Literal(value) => write!(f, "{:?}", value),
            Expr::Name(name) => write!(f, "{:?}", name),
            Expr::LiteralString(text) => write!(f, "'{}'", text),
            Expr::UnaryOperation { operator, .. } => write!(f, "unary {:?}", operator),
            Expr::BinaryOperation { operator, .. } => write!(f, "{:?}", operator),
            Expr::Comparison { operator, .. } => write!(f, "{:?}", operator),
            Expr::Call { .. } => write!(f, "call"),
            Expr::Attribute { attribute, .. } => write!(f, ".{}", attribute),
            Expr::Subscript { .. } => write!(f, "subscript"),
            Expr::Assignment { .. } => write!(f, "assignment"),
        }
    }
}

struct TreeBuilderVisitor {
    builder: TreeBuilder,
}

impl SyntaxVisitor for TreeBuilderVisitor {
    fn visit_literal(&mut self, value: f64) {
        self.builder.add_empty_child(format!("{}", value));
    }
    fn visit_name(&mut self, name: &str) {
        self.builder.add_empty_child(name.to_string());
    }
    fn visit_literal_string(&mut self, text: &str) {
        self.builder.add_empty_child(format!("'{}'", text));
    }
    fn visit_unary_operation(&mut self, operator: &UnaryOperator, operand: &Expr) {
        self.builder.begin_child(format!("unary {}", operator));
        walk_unary_operation(self, operand);
        self.builder.end_child();
    }
    fn visit_binary_operation(
        &mut self,
        operator: &BinaryOperator,
        left_operand: &Expr,
        right_operand: &Expr,
    ) {
        self.builder.begin_child(format!("{}", operator));
        walk_binary_operation(self, left_operand, right_operand);
        self.builder.end_child();
    }
    fn visit_comparison(
        &mut self,
        operator: &ComparisonOperator,
        left_operand: &Expr,
        right_operand: &Expr,
    ) {
        self.builder.begin_child(format!("{}", operator));
        walk_comparison(self, left_operand, right_operand);
        self.builder.end_child();
    }
    fn visit_call(&mut self, callee: &Expr, arguments: &[Expr]) {
        self.builder.begin_child("call".into());
        callee.accept(self);
        if !arguments.is_empty() {
            self.builder.begin_child("arguments".into());
            arguments.iter().for_each(|argument| argument.accept(self));
            self.builder.end_child();
        }
        self.builder.end_child();
    }
    fn visit_attribute(&mut self, value: &Expr, attribute: &str) {
        self.builder.begin_child(format!(".{}", attribute));
        walk_attribute(self, value);
        self.builder.end_child();
    }
    fn visit_subscript(&mut self, value: &Expr, index: &Expr) {
        self.builder.begin_child("subscript".into());
        walk_subscript(self, value, index);
        self.builder.end_child();
    }
    fn visit_assignment(&mut self, target: &Expr, value: &Expr) {
        self.builder.begin_child("=".into());
        walk_assignment(self, target, value);
        self.builder.end_child();
    }
}
