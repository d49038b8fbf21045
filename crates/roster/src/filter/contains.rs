//! Substring match filter.

use super::{FilterOptions, FilterType, OptionsSchema};
use crate::error::{ListError, ListResult};
use crate::paths::column;
use crate::types::FilterValue;
use sea_query::SelectStatement;
use serde_json::json;

/// Matches a column against a LIKE pattern built from the value.
///
/// The `match` option selects the pattern shape: `contains` (default),
/// `starts_with`, or `ends_with`. Wildcard characters in the user value
/// are escaped so they match literally.
pub struct ContainsFilterType;

impl FilterType for ContainsFilterType {
    fn options(&self) -> OptionsSchema {
        OptionsSchema::new().define("match", json!("contains"))
    }

    fn apply(
        &self,
        query: &mut SelectStatement,
        paths: &[String],
        field_id: &str,
        value: &FilterValue,
        options: &FilterOptions,
    ) -> ListResult<()> {
        let Some(path) = paths.first() else {
            return Ok(());
        };

        let Some(value) = value.as_string() else {
            return Err(ListError::InvalidOptions {
                field_id: field_id.to_string(),
                message: "contains filter expects a scalar value".to_string(),
            });
        };
        let escaped = escape_like_wildcards(&value);

        let pattern = match options.get_str("match").unwrap_or("contains") {
            "contains" => format!("%{escaped}%"),
            "starts_with" => format!("{escaped}%"),
            "ends_with" => format!("%{escaped}"),
            other => {
                return Err(ListError::InvalidOptions {
                    field_id: field_id.to_string(),
                    message: format!("unknown match mode '{other}'"),
                });
            }
        };

        query.and_where(column(path).like(pattern));
        Ok(())
    }
}

/// Escape SQL LIKE wildcard characters (`%`, `_`, `\`) in a value.
fn escape_like_wildcards(value: &str) -> String {
    value
        .replace('\\', "\\\\")
        .replace('%', "\\%")
        .replace('_', "\\_")
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use sea_query::{Alias, MysqlQueryBuilder, Query};
    use serde_json::Map;

    fn apply(value: &str, mode: Option<&str>) -> String {
        let mut query = Query::select();
        query.column(Alias::new("id")).from(Alias::new("users"));

        let mut supplied = Map::new();
        if let Some(mode) = mode {
            supplied.insert("match".to_string(), json!(mode));
        }

        let filter = ContainsFilterType;
        let options = filter.options().resolve(&supplied).unwrap();
        filter
            .apply(
                &mut query,
                &["l.title".to_string()],
                "title",
                &FilterValue::String(value.to_string()),
                &options,
            )
            .unwrap();

        query.to_string(MysqlQueryBuilder)
    }

    #[test]
    fn contains_wraps_value_in_wildcards() {
        let sql = apply("rust", None);
        assert!(sql.contains("LIKE"), "sql: {sql}");
        assert!(sql.contains("%rust%"), "sql: {sql}");
    }

    #[test]
    fn starts_with_anchors_prefix() {
        let sql = apply("rust", Some("starts_with"));
        assert!(sql.contains("'rust%'"), "sql: {sql}");
    }

    #[test]
    fn ends_with_anchors_suffix() {
        let sql = apply("rust", Some("ends_with"));
        assert!(sql.contains("'%rust'"), "sql: {sql}");
    }

    #[test]
    fn unknown_match_mode_fails() {
        let filter = ContainsFilterType;
        let options = filter.options().resolve(&Map::new()).unwrap();
        let mut supplied = Map::new();
        supplied.insert("match".to_string(), json!("regex"));
        let bad_options = filter.options().resolve(&supplied).unwrap();

        let mut query = Query::select();
        query.from(Alias::new("users"));
        let err = filter
            .apply(
                &mut query,
                &["l.title".to_string()],
                "title",
                &FilterValue::String("x".to_string()),
                &bad_options,
            )
            .unwrap_err();
        assert!(matches!(err, ListError::InvalidOptions { .. }));

        // default mode still works
        filter
            .apply(
                &mut query,
                &["l.title".to_string()],
                "title",
                &FilterValue::String("x".to_string()),
                &options,
            )
            .unwrap();
    }

    #[test]
    fn escape_like_wildcards_function() {
        assert_eq!(escape_like_wildcards("hello"), "hello");
        assert_eq!(escape_like_wildcards("100%"), "100\\%");
        assert_eq!(escape_like_wildcards("a_b"), "a\\_b");
        assert_eq!(escape_like_wildcards("a\\b"), "a\\\\b");
    }
}
