//! Query assembly: search request in, executable statement pair out.

use crate::error::SearchError;
use crate::fields::{EntitySchema, FilterMode};
use crate::predicate::{BindValue, Connective, Predicate};
use crate::request::SearchRequest;

/// An assembled search: one statement for the page of rows, one for the
/// unpaginated match count, sharing a single bind list. `items_sql` carries
/// two extra trailing placeholders for LIMIT and OFFSET; [`SearchQuery::item_binds`]
/// appends them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchQuery {
    pub items_sql: String,
    pub count_sql: String,
    pub binds: Vec<BindValue>,
    pub page_number: u32,
    pub page_size: u32,
}

impl SearchQuery {
    /// Bind values for `items_sql`: the filter binds plus LIMIT and OFFSET.
    pub fn item_binds(&self) -> Vec<BindValue> {
        let mut binds = self.binds.clone();
        binds.push(BindValue::Integer(i64::from(self.page_size)));
        binds.push(BindValue::Integer(
            i64::from(self.page_number) * i64::from(self.page_size),
        ));
        binds
    }
}

/// Assemble a search request against an entity schema.
///
/// Terms are resolved from the request's filter, dispatched through the
/// whitelist, and combined per the entity's [`FilterMode`] (AND for typed
/// filters, OR for free-text). Any dispatch failure aborts the whole query
/// before anything reaches the store; filters are never applied partially.
/// Ordering always ends with a secondary `id ASC` key so paging is
/// deterministic even when the sort column has duplicates.
pub fn assemble(schema: &EntitySchema, request: &SearchRequest) -> Result<SearchQuery, SearchError> {
    let page = &request.page;
    if page.size == 0 {
        return Err(SearchError::InvalidPageSize(page.size));
    }

    let connective = match schema.mode {
        FilterMode::All => Connective::And,
        FilterMode::Any => Connective::Or,
    };

    let mut predicates = Vec::new();
    for (field, value) in request.terms() {
        predicates.push(schema.predicate_for(&field, &value)?);
    }
    let filter = Predicate::combine(predicates, connective);

    let sort_column = schema.sort_column(page.sort_field.as_deref())?;
    let direction = page.direction.as_sql();

    let table = schema.table;
    let items_sql = format!(
        "SELECT t.* FROM {table} t WHERE {filter} \
         ORDER BY t.{sort_column} {direction}, t.id ASC LIMIT ? OFFSET ?",
        filter = filter.sql,
    );
    let count_sql = format!("SELECT COUNT(*) FROM {table} t WHERE {}", filter.sql);

    Ok(SearchQuery {
        items_sql,
        count_sql,
        binds: filter.binds,
        page_number: page.number,
        page_size: page.size,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fields::FieldRule;
    use crate::request::{PageRequest, SearchFilter, SortDirection};

    const TAGS: EntitySchema = EntitySchema {
        table: "tags",
        mode: FilterMode::Any,
        default_sort: "name",
        fields: &[
            ("name", FieldRule::Contains { column: "name" }),
            ("category", FieldRule::Contains { column: "category" }),
        ],
    };

    const QUESTIONS: EntitySchema = EntitySchema {
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
        ],
    };

    #[test]
    fn zero_terms_matches_every_row() {
        let query = assemble(&QUESTIONS, &SearchRequest::default()).unwrap();
        assert_eq!(
            query.items_sql,
            "SELECT t.* FROM questions t WHERE 1 = 1 \
             ORDER BY t.created_at ASC, t.id ASC LIMIT ? OFFSET ?"
        );
        assert_eq!(query.count_sql, "SELECT COUNT(*) FROM questions t WHERE 1 = 1");
        assert!(query.binds.is_empty());
    }

    #[test]
    fn typed_mode_combines_with_and() {
        let request = SearchRequest::with_expression("status=open#projectId=P1");
        let query = assemble(&QUESTIONS, &request).unwrap();
        assert_eq!(
            query.count_sql,
            "SELECT COUNT(*) FROM questions t WHERE (t.project_id = ?) AND (t.status = ?)"
        );
        assert_eq!(
            query.binds,
            vec![
                BindValue::Text("P1".to_string()),
                BindValue::Text("OPEN".to_string()),
            ]
        );
    }

    #[test]
    fn free_text_mode_combines_with_or() {
        let request = SearchRequest::with_expression("name=java#category=java");
        let query = assemble(&TAGS, &request).unwrap();
        assert_eq!(
            query.count_sql,
            "SELECT COUNT(*) FROM tags t WHERE \
             (LOWER(t.category) LIKE ? ESCAPE '\\') OR (LOWER(t.name) LIKE ? ESCAPE '\\')"
        );
    }

    #[test]
    fn dispatch_failure_aborts_the_whole_query() {
        let request = SearchRequest::with_expression("title=ok#bogus=x");
        assert_eq!(
            assemble(&QUESTIONS, &request),
            Err(SearchError::UnknownField {
                field: "bogus".to_string()
            })
        );
    }

    #[test]
    fn sort_and_direction_are_applied() {
        let request = SearchRequest::new(
            PageRequest::new(2, 5).sorted_by("title", SortDirection::Descending),
            SearchFilter::None,
        );
        let query = assemble(&QUESTIONS, &request).unwrap();
        assert!(query
            .items_sql
            .ends_with("ORDER BY t.title DESC, t.id ASC LIMIT ? OFFSET ?"));
        assert_eq!(
            query.item_binds(),
            vec![BindValue::Integer(5), BindValue::Integer(10)]
        );
    }

    #[test]
    fn zero_page_size_is_rejected() {
        let request = SearchRequest::new(PageRequest::new(0, 0), SearchFilter::None);
        assert_eq!(
            assemble(&QUESTIONS, &request),
            Err(SearchError::InvalidPageSize(0))
        );
    }
}
