//! Grouped selector: collapses a to-many relation into one delimited column.

use super::{SelectorType, column_alias};
use sea_query::{Alias, Expr, SelectStatement};
use serde_json::{Map, Value};

/// Separates one encoded entry per contributing row.
const ROW_DELIMITER: &str = "|-|";

/// Separates composite sub-values within one entry when more than one
/// source path is grouped.
const PART_DELIMITER: &str = "|,|";

/// Packs multiple related rows into a single GROUP_CONCAT column and
/// decodes it back into an array value.
///
/// Encoding contract (must stay bit-exact; stores emitting this format
/// depend on it): entries are joined with `|-|`; with multiple paths each
/// entry's sub-values are joined with `|,|` and nulls are coalesced to
/// empty strings. The decoder maps empty strings back to null, so a
/// genuinely empty non-null sub-value is indistinguishable from null.
/// That loss is inherent to the encoding.
pub struct GroupSelectorType;

impl GroupSelectorType {
    fn concat_source(paths: &[String]) -> String {
        if let [single] = paths {
            return single.clone();
        }

        paths
            .iter()
            .map(|path| format!("IFNULL({path}, '')"))
            .collect::<Vec<_>>()
            .join(&format!(", '{PART_DELIMITER}', "))
    }
}

impl SelectorType for GroupSelectorType {
    fn apply(&self, query: &mut SelectStatement, paths: &[String], field_id: &str) {
        let source = Self::concat_source(paths);
        query.expr_as(
            Expr::cust(format!(
                "GROUP_CONCAT({source} SEPARATOR '{ROW_DELIMITER}')"
            )),
            Alias::new(column_alias(field_id, 0)),
        );
    }

    fn has_aggregation(&self) -> bool {
        true
    }

    fn get_value(&self, row: &Map<String, Value>, field_id: &str) -> Value {
        let Some(raw) = row.get(&column_alias(field_id, 0)) else {
            return Value::Null;
        };
        let Some(encoded) = raw.as_str() else {
            // SQL NULL: no related rows contributed.
            return Value::Null;
        };

        let composite = encoded.contains(PART_DELIMITER);
        let entries = encoded.split(ROW_DELIMITER);

        if composite {
            Value::Array(
                entries
                    .map(|entry| {
                        Value::Array(entry.split(PART_DELIMITER).map(decode_part).collect())
                    })
                    .collect(),
            )
        } else {
            Value::Array(entries.map(decode_part).collect())
        }
    }
}

/// Empty string encodes logical null.
fn decode_part(part: &str) -> Value {
    if part.is_empty() {
        Value::Null
    } else {
        Value::String(part.to_string())
    }
}
