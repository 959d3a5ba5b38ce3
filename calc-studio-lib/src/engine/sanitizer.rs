/// Repairs the common typing shortcuts people take when entering expressions.
///
/// Two rewrites are applied, in order:
/// 1. Unclosed parentheses are balanced by appending the missing `)` at the
///    end, so `"(1 + 2"` becomes `"(1 + 2)"`. Excess closing parentheses are
///    left alone and rejected later by the parser.
/// 2. The caret power alias `^` is rewritten to the canonical `**`.
///
/// The result is plain text; sanitizing never fails and already-canonical
/// input passes through unchanged.
///
/// # Arguments
///
/// * `expression`: The raw expression text, exactly as the user typed it.
///
/// returns: The repaired expression text.
///
/// # Examples
///
/// ```
/// use calc_studio::engine::sanitize;
///
/// assert_eq!(sanitize("(1 + 2"), "(1 + 2)");
/// assert_eq!(sanitize("2^10"), "2**10");
/// assert_eq!(sanitize("sin(pi)"), "sin(pi)");
/// ```
pub fn sanitize(expression: &str) -> String {
    let mut sanitized = expression.replace('^', "**");

    let open_count = sanitized.matches('(').count();
    let close_count = sanitized.matches(')').count();
    if open_count > close_count {
        sanitized.push_str(&")".repeat(open_count - close_count));
    }

    sanitized
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn balanced_expression_is_untouched() {
        assert_eq!(sanitize("(1 + 2) * 3"), "(1 + 2) * 3");
    }

    #[test]
    fn single_missing_parenthesis_is_appended() {
        assert_eq!(sanitize("(1 + 2"), "(1 + 2)");
    }

    #[test]
    fn nested_missing_parentheses_are_all_appended() {
        assert_eq!(sanitize("sqrt(abs(-(4"), "sqrt(abs(-(4)))");
    }

    #[test]
    fn excess_closing_parentheses_are_left_alone() {
        assert_eq!(sanitize("1 + 2)"), "1 + 2)");
    }

    #[test]
    fn caret_is_rewritten_to_double_asterisk() {
        assert_eq!(sanitize("2^3^2"), "2**3**2");
    }

    #[test]
    fn caret_rewrite_and_parenthesis_repair_combine() {
        assert_eq!(sanitize("(2^3"), "(2**3)");
    }

    #[test]
    fn sanitizing_is_idempotent() {
        let once = sanitize("((1 + 2^2");
        let twice = sanitize(&once);
        assert_eq!(once, twice);
    }

    #[test]
    fn empty_input_stays_empty() {
        assert_eq!(sanitize(""), "");
    }
}
