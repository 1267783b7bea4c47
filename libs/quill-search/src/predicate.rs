//! Store-level predicates: parameterized SQL fragments with their bind values.

/// Bind values for the executing layer's prepared statements.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BindValue {
    Text(String),
    Integer(i64),
}

/// A boolean condition over rows of the searched table, composable with
/// AND/OR. The SQL references the searched table through the alias `t` and
/// uses `?` placeholders matching `binds` in order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Predicate {
    pub sql: String,
    pub binds: Vec<BindValue>,
}

impl Predicate {
    pub fn new(sql: impl Into<String>, binds: Vec<BindValue>) -> Self {
        Self {
            sql: sql.into(),
            binds,
        }
    }

    /// A predicate matching every row. Used when a request carries no terms.
    pub fn always_true() -> Self {
        Self::new("1 = 1", Vec::new())
    }

    /// Case-insensitive substring match against a column of the searched
    /// table. The value is lower-cased and LIKE-escaped before binding.
    pub fn contains(column: &str, value: &str) -> Self {
        Self::new(
            format!("LOWER(t.{column}) LIKE ? ESCAPE '\\'"),
            vec![BindValue::Text(like_pattern(value))],
        )
    }

    /// Combine predicates with the given connective. An empty list collapses
    /// to the always-true predicate.
    pub fn combine(predicates: Vec<Predicate>, connective: Connective) -> Self {
        let mut rest = predicates.into_iter();
        let Some(first) = rest.next() else {
            return Self::always_true();
        };
        if rest.len() == 0 {
            return first;
        }
        let mut binds = Vec::new();
        let clauses: Vec<String> = std::iter::once(first)
            .chain(rest)
            .map(|p| {
                binds.extend(p.binds);
                format!("({})", p.sql)
            })
            .collect();
        Self::new(clauses.join(connective.as_sql()), binds)
    }
}

/// Logical connective used when combining term predicates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Connective {
    And,
    Or,
}

impl Connective {
    fn as_sql(self) -> &'static str {
        match self {
            Self::And => " AND ",
            Self::Or => " OR ",
        }
    }
}

/// Build a `%value%` LIKE pattern from a raw filter value: lower-cased, with
/// LIKE metacharacters escaped so user input never acts as a wildcard.
pub fn like_pattern(value: &str) -> String {
    format!("%{}%", escape_like(&value.to_lowercase()))
}

fn escape_like(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '\\' | '%' | '_' => {
                out.push('\\');
                out.push(c);
            }
            _ => out.push(c),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn contains_lowercases_and_wraps_in_wildcards() {
        let p = Predicate::contains("title", "Rust");
        assert_eq!(p.sql, "LOWER(t.title) LIKE ? ESCAPE '\\'");
        assert_eq!(p.binds, vec![BindValue::Text("%rust%".to_string())]);
    }

    #[test]
    fn like_metacharacters_are_escaped() {
        assert_eq!(like_pattern("50%_done"), "%50\\%\\_done%");
        assert_eq!(like_pattern("a\\b"), "%a\\\\b%");
    }

    #[test]
    fn combine_empty_is_always_true() {
        let p = Predicate::combine(Vec::new(), Connective::And);
        assert_eq!(p.sql, "1 = 1");
        assert!(p.binds.is_empty());
    }

    #[test]
    fn combine_single_is_unwrapped() {
        let p = Predicate::combine(vec![Predicate::contains("name", "x")], Connective::Or);
        assert_eq!(p.sql, "LOWER(t.name) LIKE ? ESCAPE '\\'");
    }

    #[test]
    fn combine_joins_with_connective_and_concatenates_binds() {
        let a = Predicate::new("t.a = ?", vec![BindValue::Text("1".into())]);
        let b = Predicate::new("t.b = ?", vec![BindValue::Integer(2)]);
        let p = Predicate::combine(vec![a, b], Connective::And);
        assert_eq!(p.sql, "(t.a = ?) AND (t.b = ?)");
        assert_eq!(
            p.binds,
            vec![BindValue::Text("1".into()), BindValue::Integer(2)]
        );

        let a = Predicate::new("t.a = ?", vec![BindValue::Text("1".into())]);
        let b = Predicate::new("t.b = ?", vec![BindValue::Integer(2)]);
        let p = Predicate::combine(vec![a, b], Connective::Or);
        assert_eq!(p.sql, "(t.a = ?) OR (t.b = ?)");
    }
}
