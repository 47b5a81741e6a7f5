//! LIKE patterns built from user input.

use sea_orm::sea_query::LikeExpr;

const ESCAPE: char = '\\';

/// Case-folded `%term%` with `\`, `%` and `_` taken literally.
pub(crate) fn contains_ignore_case(term: &str) -> LikeExpr {
    LikeExpr::new(contains_pattern(term)).escape(ESCAPE)
}

fn contains_pattern(term: &str) -> String {
    let mut pattern = String::with_capacity(term.len() + 2);
    pattern.push('%');
    for c in term.trim().to_lowercase().chars() {
        if matches!(c, '\\' | '%' | '_') {
            pattern.push(ESCAPE);
        }
        pattern.push(c);
    }
    pattern.push('%');
    pattern
}

#[cfg(test)]
mod tests {
    use super::contains_pattern;

    #[test]
    fn wildcards_are_escaped() {
        assert_eq!(contains_pattern("50%_Off"), r"%50\%\_off%");
        assert_eq!(contains_pattern(r"a\b"), r"%a\\b%");
    }

    #[test]
    fn plain_terms_are_trimmed_and_lowered() {
        assert_eq!(contains_pattern("  Lamp "), "%lamp%");
    }
}
