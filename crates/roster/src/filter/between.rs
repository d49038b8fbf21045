//! Range filter.

use super::{FilterOptions, FilterType, OptionsSchema};
use crate::error::ListResult;
use crate::paths::column;
use crate::types::FilterValue;
use sea_query::{ExprTrait, SelectStatement};
use serde_json::json;

/// Filters a column to a from/to range.
///
/// The value is either an ordered pair `[from, to]` or a single string
/// containing `value_delimiter`. A missing upper bound degrades to a
/// lower-bound comparison instead of a full range.
pub struct BetweenFilterType;

impl BetweenFilterType {
    fn bounds(
        value: &FilterValue,
        delimiter: &str,
    ) -> (Option<sea_query::Value>, Option<sea_query::Value>) {
        match value {
            FilterValue::List(items) => (
                items.first().and_then(FilterValue::to_sea_value),
                items.get(1).and_then(FilterValue::to_sea_value),
            ),
            FilterValue::String(s) if !delimiter.is_empty() => {
                let mut parts = s.split(delimiter);
                let from = parts.next().map(|p| p.to_string().into());
                let to = parts.next().map(|p| p.to_string().into());
                (from, to)
            }
            scalar => (scalar.to_sea_value(), None),
        }
    }
}

impl FilterType for BetweenFilterType {
    fn options(&self) -> OptionsSchema {
        OptionsSchema::new().define("value_delimiter", json!("-"))
    }

    fn apply(
        &self,
        query: &mut SelectStatement,
        paths: &[String],
        _field_id: &str,
        value: &FilterValue,
        options: &FilterOptions,
    ) -> ListResult<()> {
        let Some(path) = paths.first() else {
            return Ok(());
        };
        let delimiter = options.get_str("value_delimiter").unwrap_or("-");

        let (from, to) = Self::bounds(value, delimiter);
        let Some(from) = from else {
            return Ok(());
        };

        match to {
            Some(to) => query.and_where(column(path).between(from, to)),
            None => query.and_where(column(path).gte(from)),
        };

        Ok(())
    }
}
