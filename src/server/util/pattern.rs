use sea_orm::sea_query::LikeExpr;

const ESCAPE: char = '!';

/// Builds a `LIKE` pattern matching values that contain `text` literally.
///
/// `%` and `_` in the text are escaped so user input cannot widen the match.
pub fn contains_pattern(text: &str) -> LikeExpr {
    let mut pattern = String::with_capacity(text.len() + 2);
    pattern.push('%');
    for c in text.chars() {
        if matches!(c, '%' | '_' | ESCAPE) {
            pattern.push(ESCAPE);
        }
        pattern.push(c);
    }
    pattern.push('%');

    LikeExpr::new(pattern).escape(ESCAPE)
}

#[cfg(test)]
mod tests {
    use sea_orm::sea_query::{Alias, Expr, ExprTrait, MysqlQueryBuilder, Query};

    use super::*;

    fn render(text: &str) -> String {
        Query::select()
            .column(Alias::new("name"))
            .from(Alias::new("room"))
            .and_where(Expr::col(Alias::new("name")).like(contains_pattern(text)))
            .to_string(MysqlQueryBuilder)
    }

    #[test]
    fn escapes_wildcards() {
        let sql = render("50%_off!");

        assert!(sql.contains("LIKE '%50!%!_off!!%' ESCAPE '!'"), "{}", sql);
    }

    #[test]
    fn plain_text_is_wrapped() {
        let sql = render("Hall");

        assert!(sql.contains("LIKE '%Hall%' ESCAPE '!'"), "{}", sql);
    }
}
