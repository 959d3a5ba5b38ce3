use crate::engine::operator::{BinaryOperator, ComparisonOperator, UnaryOperator};
use crate::engine::syntax::expression_tree::Expr;

/// If a method is not implemented, the default implementation will continue in a pre-order
/// traversal of the tree.
pub(crate) trait SyntaxVisitor: Sized {
    fn visit_literal(&mut self, _value: f64) {}
    fn visit_name(&mut self, _name: &str) {}
    fn visit_literal_string(&mut self, _text: &str) {}
    fn visit_unary_operation(&mut self, _operator: &UnaryOperator, operand: &Expr) {
        walk_unary_operation(self, operand)
    }
    fn visit_binary_operation(
        &mut self,
        _operator: &BinaryOperator,
        left_operand: &Expr,
        right_operand: &Expr,
    ) {
        walk_binary_operation(self, left_operand, right_operand)
    }
    fn visit_comparison(
        &mut self,
        _operator: &ComparisonOperator,
        left_operand: &Expr,
        right_operand: &Expr,
    ) {
        walk_comparison(self, left_operand, right_operand)
    }
    fn visit_call(&mut self, callee: &Expr, arguments: &[Expr]) {
        walk_call(self, callee, arguments)
    }
    fn visit_attribute(&mut self, value: &Expr, _attribute: &str) {
        walk_attribute(self, value)
    }
    fn visit_subscript(&mut self, value: &Expr, index: &Expr) {
        walk_subscript(self, value, index)
    }
    fn visit_assignment(&mut self, target: &Expr, value: &Expr) {
        walk_assignment(self, target, value)
    }
}

pub(crate) fn walk_unary_operation(visitor: &mut impl SyntaxVisitor, operand: &Expr) {
    operand.accept(visitor);
}

pub(crate) fn walk_binary_operation(
    visitor: &mut impl SyntaxVisitor,
    left_operand: &Expr,
    right_operand: &Expr,
) {
    left_operand.accept(visitor);
    right_operand.accept(visitor);
}

pub(crate) fn walk_comparison(
    visitor: &mut impl SyntaxVisitor,
    left_operand: &Expr,
    right_operand: &Expr,
) {
    left_operand.accept(visitor);
    right_operand.accept(visitor);
}

pub(crate) fn walk_call(visitor: &mut impl SyntaxVisitor, callee: &Expr, arguments: &[Expr]) {
    callee.accept(visitor);
    arguments
        .iter()
        .for_each(|argument| argument.accept(visitor));
}

pub(crate) fn walk_attribute(visitor: &mut impl SyntaxVisitor, value: &Expr) {
    value.accept(visitor);
}

pub(crate) fn walk_subscript(visitor: &mut impl SyntaxVisitor, value: &Expr, index: &Expr) {
    value.accept(visitor);
    index.accept(visitor);
}

pub(crate) fn walk_assignment(visitor: &mut impl SyntaxVisitor, target: &Expr, value: &Expr) {
    target.accept(visitor);
    value.accept(visitor);
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create_complex_tree() -> Expr {
        // sin(a + b) * 2
        let sum = Expr::new_binary_operation(
            BinaryOperator::Add,
            Expr::new_name("a"),
            Expr::new_name("b"),
        );
        let call = Expr::new_call(Expr::new_name("sin"), vec![sum]);
        Expr::new_binary_operation(BinaryOperator::Multiply, call, Expr::new_literal(2.0))
    }

    struct PrePostPrintVisitor {
        prints: Vec<String>,
    }

    impl SyntaxVisitor for PrePostPrintVisitor {
        fn visit_literal(&mut self, value: f64) {
            self.prints.push(format!("{}", value))
        }
        fn visit_name(&mut self, name: &str) {
            self.prints.push(name.to_string())
        }
        fn visit_binary_operation(
            &mut self,
            operator: &BinaryOperator,
            left_operand: &Expr,
            right_operand: &Expr,
        ) {
            self.prints.push(format!("{:?}", operator));
            walk_binary_operation(self, left_operand, right_operand);
            self.prints.push(format!("exit {:?}", operator));
        }
        fn visit_call(&mut self, callee: &Expr, arguments: &[Expr]) {
            self.prints.push("call".to_string());
            walk_call(self, callee, arguments);
            self.prints.push("exit call".to_string());
        }
    }

    #[test]
    fn walk_tree_prints_all_nodes_in_tree_in_pre_and_post_orders() {
        let root = create_complex_tree();
        let mut visitor = PrePostPrintVisitor { prints: vec![] };
        root.accept(&mut visitor);
        assert_eq!(
            visitor.prints,
            [
                "Multiply",
                "call",
                "sin",
                "Add",
                "a",
                "b",
                "exit Add",
                "exit call",
                "2",
                "exit Multiply",
            ]
        )
    }
}
