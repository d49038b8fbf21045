//! Binary comparison filter.

use super::{FilterOptions, FilterType, OptionsSchema};
use crate::error::{ListError, ListResult};
use crate::paths::column;
use crate::types::FilterValue;
use sea_query::{ExprTrait, SelectStatement};
use serde_json::json;

/// Compares a column against a scalar value with a configurable operator.
///
/// Recognized operators: `eq`, `not_eq`, `gt`, `gte`, `lt`, `lte`.
pub struct ComparisonFilterType;

impl FilterType for ComparisonFilterType {
    fn options(&self) -> OptionsSchema {
        OptionsSchema::new().define("operator", json!("eq"))
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

        let Some(value) = value.to_sea_value() else {
            return Err(ListError::InvalidOptions {
                field_id: field_id.to_string(),
                message: "comparison filter expects a scalar value".to_string(),
            });
        };

        let col = column(path);
        let operator = options.get_str("operator").unwrap_or("eq");
        let predicate = match operator {
            "eq" => col.eq(value),
            "not_eq" => col.ne(value),
            "gt" => col.gt(value),
            "gte" => col.gte(value),
            "lt" => col.lt(value),
            "lte" => col.lte(value),
            other => {
                return Err(ListError::InvalidOptions {
                    field_id: field_id.to_string(),
                    message: format!("unknown comparison operator '{other}'"),
                });
            }
        };

        query.and_where(predicate);
        Ok(())
    }
}
