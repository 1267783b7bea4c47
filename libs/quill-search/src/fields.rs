//! Per-entity field whitelists and predicate dispatch.
//!
//! Each entity registers an [`EntitySchema`]: the searched table, the filter
//! combination mode, a default sort column, and a closed table mapping each
//! permitted field name to the rule that turns its value into a store-level
//! predicate. Any field outside the table is rejected before the store is
//! touched; the whitelist is what keeps arbitrary caller strings from leaking
//! into SQL identifiers.

use crate::error::SearchError;
use crate::predicate::{like_pattern, BindValue, Predicate};

/// How an entity combines its term predicates.
///
/// Two semantics co-exist in the system, declared per entity rather than by
/// duplicating assembler logic:
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterMode {
    /// Typed AND filter: each term is dispatched through its field rule and
    /// all predicates must hold (conjunction).
    All,
    /// Free-text OR filter: each term becomes a case-insensitive substring
    /// match on its field's column regardless of the rule's native semantics,
    /// and any predicate may hold (union).
    Any,
}

/// Rule for constructing a predicate from a `(field, value)` term.
///
/// Column and table names in rules are compile-time constants defined next to
/// each entity store; only bind values ever come from the caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldRule {
    /// Case-insensitive substring match on a column of the searched table.
    Contains { column: &'static str },
    /// Exact equality on a text column; also used for `<relation>Id` fields,
    /// which compare the stored foreign key without loading the related row.
    EqualsText { column: &'static str },
    /// Exact equality on a boolean column; value must be `true`/`false`
    /// (case-insensitive), anything else is a business error.
    EqualsBool { column: &'static str },
    /// Exact equality on a closed enum column; the value is matched
    /// case-insensitively against `variants` and bound in canonical form.
    EqualsEnum {
        column: &'static str,
        variants: &'static [&'static str],
    },
    /// Exact equality on an integer column with a strict parse.
    EqualsInteger { column: &'static str },
    /// `<relation>Name` fields: substring match on a column of a joined row,
    /// expressed as an EXISTS subquery against the relation's key.
    RelatedContains {
        related_table: &'static str,
        related_key: &'static str,
        local_key: &'static str,
        column: &'static str,
    },
    /// Many-to-many membership by related id, via the link table.
    MemberEquals {
        link_table: &'static str,
        link_local: &'static str,
        link_foreign: &'static str,
    },
    /// Many-to-many membership by substring on a related row's column.
    MemberContains {
        link_table: &'static str,
        link_local: &'static str,
        link_foreign: &'static str,
        member_table: &'static str,
        member_column: &'static str,
    },
}

impl FieldRule {
    /// The directly sortable column of the searched table, if the rule has
    /// one. Membership and related-row rules do not.
    pub fn sort_column(&self) -> Option<&'static str> {
        match self {
            Self::Contains { column }
            | Self::EqualsText { column }
            | Self::EqualsBool { column }
            | Self::EqualsEnum { column, .. }
            | Self::EqualsInteger { column } => Some(column),
            Self::RelatedContains { .. }
            | Self::MemberEquals { .. }
            | Self::MemberContains { .. } => None,
        }
    }

    /// Build the typed predicate for this rule (Mode A semantics).
    fn predicate(&self, field: &str, value: &str) -> Result<Predicate, SearchError> {
        let invalid = || SearchError::InvalidValue {
            field: field.to_string(),
            value: value.to_string(),
        };
        match self {
            Self::Contains { column } => Ok(Predicate::contains(column, value)),
            Self::EqualsText { column } => Ok(Predicate::new(
                format!("t.{column} = ?"),
                vec![BindValue::Text(value.to_string())],
            )),
            Self::EqualsBool { column } => {
                let flag = match value.to_ascii_lowercase().as_str() {
                    "true" => 1,
                    "false" => 0,
                    _ => return Err(invalid()),
                };
                Ok(Predicate::new(
                    format!("t.{column} = ?"),
                    vec![BindValue::Integer(flag)],
                ))
            }
            Self::EqualsEnum { column, variants } => {
                let canonical = variants
                    .iter()
                    .find(|v| v.eq_ignore_ascii_case(value))
                    .ok_or_else(invalid)?;
                Ok(Predicate::new(
                    format!("t.{column} = ?"),
                    vec![BindValue::Text((*canonical).to_string())],
                ))
            }
            Self::EqualsInteger { column } => {
                let parsed: i64 = value.parse().map_err(|_| invalid())?;
                Ok(Predicate::new(
                    format!("t.{column} = ?"),
                    vec![BindValue::Integer(parsed)],
                ))
            }
            Self::RelatedContains {
                related_table,
                related_key,
                local_key,
                column,
            } => Ok(Predicate::new(
                format!(
                    "EXISTS (SELECT 1 FROM {related_table} r \
                     WHERE r.{related_key} = t.{local_key} \
                     AND LOWER(r.{column}) LIKE ? ESCAPE '\\')"
                ),
                vec![BindValue::Text(like_pattern(value))],
            )),
            Self::MemberEquals {
                link_table,
                link_local,
                link_foreign,
            } => Ok(Predicate::new(
                format!(
                    "EXISTS (SELECT 1 FROM {link_table} l \
                     WHERE l.{link_local} = t.id AND l.{link_foreign} = ?)"
                ),
                vec![BindValue::Text(value.to_string())],
            )),
            Self::MemberContains {
                link_table,
                link_local,
                link_foreign,
                member_table,
                member_column,
            } => Ok(Predicate::new(
                format!(
                    "EXISTS (SELECT 1 FROM {link_table} l \
                     JOIN {member_table} m ON m.id = l.{link_foreign} \
                     WHERE l.{link_local} = t.id \
                     AND LOWER(m.{member_column}) LIKE ? ESCAPE '\\')"
                ),
                vec![BindValue::Text(like_pattern(value))],
            )),
        }
    }
}

/// Per-entity registration record supplied by each store at wiring time.
#[derive(Debug, Clone, Copy)]
pub struct EntitySchema {
    /// Table the search runs against; aliased `t` in generated SQL.
    pub table: &'static str,
    pub mode: FilterMode,
    /// Column used for ordering when the request names no sort field.
    pub default_sort: &'static str,
    /// Whitelist: permitted field name to predicate rule.
    pub fields: &'static [(&'static str, FieldRule)],
}

impl EntitySchema {
    fn rule(&self, field: &str) -> Result<&FieldRule, SearchError> {
        self.fields
            .iter()
            .find(|(name, _)| *name == field)
            .map(|(_, rule)| rule)
            .ok_or_else(|| SearchError::UnknownField {
                field: field.to_string(),
            })
    }

    /// Build the predicate for one term, honoring the entity's filter mode.
    ///
    /// Unknown fields fail in either mode. In [`FilterMode::Any`] every rule
    /// with a direct column degrades to a substring match; rules without one
    /// keep their typed semantics (no Mode B whitelist currently carries any).
    pub fn predicate_for(&self, field: &str, value: &str) -> Result<Predicate, SearchError> {
        let rule = self.rule(field)?;
        match self.mode {
            FilterMode::All => rule.predicate(field, value),
            FilterMode::Any => match rule.sort_column() {
                Some(column) => Ok(Predicate::contains(column, value)),
                None => rule.predicate(field, value),
            },
        }
    }

    /// Resolve the requested sort field to a column of the searched table.
    pub fn sort_column(&self, sort_field: Option<&str>) -> Result<&'static str, SearchError> {
        match sort_field {
            None => Ok(self.default_sort),
            Some(field) => {
                let field = field.trim();
                if field.is_empty() {
                    return Ok(self.default_sort);
                }
                self.rule(field)
                    .ok()
                    .and_then(FieldRule::sort_column)
                    .ok_or_else(|| SearchError::UnsupportedSortField(field.to_string()))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SCHEMA: EntitySchema = EntitySchema {
        table: "questions",
        mode: FilterMode::All,
        default_sort: "created_at",
        fields: &[
            ("title", FieldRule::Contains { column: "title" }),
            (
                "status",
                FieldRule::EqualsEnum {
                    column: "status",
                    variants: &["OPEN", "ANSWERED", "CLOSED"],
                },
            ),
            (
                "projectId",
                FieldRule::EqualsText {
                    column: "project_id",
                },
            ),
            (
                "accepted",
                FieldRule::EqualsBool {
                    column: "is_accepted",
                },
            ),
            ("version", FieldRule::EqualsInteger { column: "version" }),
            (
                "tagsId",
                FieldRule::MemberEquals {
                    link_table: "question_tags",
                    link_local: "question_id",
                    link_foreign: "tag_id",
                },
            ),
            (
                "authorName",
                FieldRule::RelatedContains {
                    related_table: "users",
                    related_key: "id",
                    local_key: "author_id",
                    column: "display_name",
                },
            ),
        ],
    };

    #[test]
    fn unknown_field_is_rejected() {
        assert_eq!(
            SCHEMA.predicate_for("bogus", "x"),
            Err(SearchError::UnknownField {
                field: "bogus".to_string()
            })
        );
    }

    #[test]
    fn enum_value_is_canonicalized_case_insensitively() {
        let p = SCHEMA.predicate_for("status", "open").unwrap();
        assert_eq!(p.sql, "t.status = ?");
        assert_eq!(p.binds, vec![BindValue::Text("OPEN".to_string())]);
    }

    #[test]
    fn enum_value_outside_variants_is_invalid() {
        assert_eq!(
            SCHEMA.predicate_for("status", "maybe"),
            Err(SearchError::InvalidValue {
                field: "status".to_string(),
                value: "maybe".to_string()
            })
        );
    }

    #[test]
    fn bool_parses_true_false_any_case_only() {
        let p = SCHEMA.predicate_for("accepted", "TRUE").unwrap();
        assert_eq!(p.binds, vec![BindValue::Integer(1)]);
        let p = SCHEMA.predicate_for("accepted", "false").unwrap();
        assert_eq!(p.binds, vec![BindValue::Integer(0)]);
        assert!(matches!(
            SCHEMA.predicate_for("accepted", "maybe"),
            Err(SearchError::InvalidValue { .. })
        ));
    }

    #[test]
    fn integer_parse_is_strict() {
        let p = SCHEMA.predicate_for("version", "3").unwrap();
        assert_eq!(p.binds, vec![BindValue::Integer(3)]);
        assert_eq!(
            SCHEMA.predicate_for("version", "three"),
            Err(SearchError::InvalidValue {
                field: "version".to_string(),
                value: "three".to_string()
            })
        );
    }

    #[test]
    fn relation_id_is_plain_equality_on_the_foreign_key() {
        let p = SCHEMA.predicate_for("projectId", "P1").unwrap();
        assert_eq!(p.sql, "t.project_id = ?");
        assert_eq!(p.binds, vec![BindValue::Text("P1".to_string())]);
    }

    #[test]
    fn membership_uses_exists_over_the_link_table() {
        let p = SCHEMA.predicate_for("tagsId", "T1").unwrap();
        assert!(p.sql.starts_with("EXISTS (SELECT 1 FROM question_tags l"));
        assert_eq!(p.binds, vec![BindValue::Text("T1".to_string())]);
    }

    #[test]
    fn related_name_match_is_an_exists_substring() {
        let p = SCHEMA.predicate_for("authorName", "Ada").unwrap();
        assert!(p.sql.contains("FROM users r"));
        assert!(p.sql.contains("r.id = t.author_id"));
        assert_eq!(p.binds, vec![BindValue::Text("%ada%".to_string())]);
    }

    #[test]
    fn any_mode_degrades_every_field_to_contains() {
        let schema = EntitySchema {
            mode: FilterMode::Any,
            ..SCHEMA
        };
        let p = schema.predicate_for("status", "java").unwrap();
        assert_eq!(p.sql, "LOWER(t.status) LIKE ? ESCAPE '\\'");
        assert_eq!(p.binds, vec![BindValue::Text("%java%".to_string())]);
    }

    #[test]
    fn sort_resolution_uses_whitelist_columns_only() {
        assert_eq!(SCHEMA.sort_column(None), Ok("created_at"));
        assert_eq!(SCHEMA.sort_column(Some("")), Ok("created_at"));
        assert_eq!(SCHEMA.sort_column(Some("title")), Ok("title"));
        assert_eq!(
            SCHEMA.sort_column(Some("tagsId")),
            Err(SearchError::UnsupportedSortField("tagsId".to_string()))
        );
        assert_eq!(
            SCHEMA.sort_column(Some("bogus")),
            Err(SearchError::UnsupportedSortField("bogus".to_string()))
        );
    }
}
