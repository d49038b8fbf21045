//! Plain column selector.

use super::{SelectorType, column_alias};
use crate::paths::column;
use sea_query::{Alias, SelectStatement};
use serde_json::{Map, Value};

/// Selects each source path as a plain aliased column.
///
/// The row value is read from the position-0 alias; additional paths are
/// still projected so transforms can pick them up from the raw row.
pub struct BasicSelectorType;

impl SelectorType for BasicSelectorType {
    fn apply(&self, query: &mut SelectStatement, paths: &[String], field_id: &str) {
        for (position, path) in paths.iter().enumerate() {
            query.expr_as(column(path), Alias::new(column_alias(field_id, position)));
        }
    }

    fn get_value(&self, row: &Map<String, Value>, field_id: &str) -> Value {
        row.get(&column_alias(field_id, 0))
            .cloned()
            .unwrap_or(Value::Null)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use sea_query::{MysqlQueryBuilder, Query};
    use serde_json::json;

    #[test]
    fn projects_each_path_at_its_position() {
        let mut query = Query::select();
        query.from(Alias::new("users"));
        BasicSelectorType.apply(
            &mut query,
            &["l.first_name".to_string(), "l.last_name".to_string()],
            "name",
        );

        let sql = query.to_string(MysqlQueryBuilder);
        assert!(sql.contains("`l`.`first_name` AS `name_0`"), "sql: {sql}");
        assert!(sql.contains("`l`.`last_name` AS `name_1`"), "sql: {sql}");
    }

    #[test]
    fn reads_value_from_position_zero_alias() {
        let row = json!({"name_0": "Ada", "name_1": "Lovelace"});
        let row = row.as_object().unwrap();
        assert_eq!(BasicSelectorType.get_value(row, "name"), json!("Ada"));
    }

    #[test]
    fn missing_alias_decodes_to_null() {
        let row = json!({});
        let row = row.as_object().unwrap();
        assert_eq!(BasicSelectorType.get_value(row, "name"), Value::Null);
    }

    #[test]
    fn no_aggregation_and_default_sort_path() {
        assert!(!BasicSelectorType.has_aggregation());
        assert_eq!(BasicSelectorType.sort_path("name"), "name_0");
    }
}
