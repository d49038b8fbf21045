//! List definition types.
//!
//! Provides the declarative building blocks for a list:
//! - JoinField / JoinMap: relation paths joined into the query
//! - ListField: a displayed column and how it is selected and rendered
//! - FilterField: a filter input and how it becomes a predicate
//! - FilterValue: user-supplied filter values

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;
use std::sync::Arc;

/// SQL join kinds supported for list relations.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, Default, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum JoinType {
    #[default]
    Inner,
    Left,
}

impl From<JoinType> for sea_query::JoinType {
    fn from(kind: JoinType) -> Self {
        match kind {
            JoinType::Inner => sea_query::JoinType::InnerJoin,
            JoinType::Left => sea_query::JoinType::LeftJoin,
        }
    }
}

/// Sort direction for sortable list fields.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, Default, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    #[default]
    Asc,
    Desc,
}

impl From<SortDirection> for sea_query::Order {
    fn from(dir: SortDirection) -> Self {
        match dir {
            SortDirection::Asc => sea_query::Order::Asc,
            SortDirection::Desc => sea_query::Order::Desc,
        }
    }
}

/// A relation joined into the list query.
///
/// The dotted `path` names the relation chain from the base entity; each
/// segment past the first must itself be a registered join path. The
/// physical columns describe how the joined table attaches to its parent,
/// since a SQL target cannot derive the ON condition from a relation path
/// alone.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JoinField {
    /// Relation path from the base entity, e.g. `"orders"` or `"orders.items"`.
    pub path: String,

    /// Unique alias for the joined table.
    pub alias: String,

    /// Join kind.
    #[serde(default)]
    pub join_type: JoinType,

    /// Table being joined.
    pub target_table: String,

    /// Column on the parent side of the join condition.
    pub local_field: String,

    /// Column on the joined side of the join condition.
    pub foreign_field: String,
}

/// Insertion-ordered registry of join fields, looked up by exact path.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct JoinMap {
    fields: Vec<JoinField>,
}

impl JoinMap {
    /// Create an empty join map.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a join field. Joins apply in registration order, so a
    /// nested path must be added after the join it builds on.
    pub fn add(&mut self, field: JoinField) -> &mut Self {
        self.fields.push(field);
        self
    }

    /// Look up a join by its exact relation path.
    pub fn get_by_path(&self, path: &str) -> Option<&JoinField> {
        self.fields.iter().find(|f| f.path == path)
    }

    /// All registered joins in registration order.
    pub fn fields(&self) -> &[JoinField] {
        &self.fields
    }
}

/// Callable applied to a decoded row value before translation.
///
/// Receives the raw value and the active output format name and returns
/// the replacement value.
#[derive(Clone)]
pub struct ValueTransform(pub Arc<dyn Fn(Value, &str) -> Value + Send + Sync>);

impl ValueTransform {
    pub fn new(f: impl Fn(Value, &str) -> Value + Send + Sync + 'static) -> Self {
        Self(Arc::new(f))
    }
}

impl fmt::Debug for ValueTransform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("ValueTransform")
    }
}

/// Declared value type for a list field, used to coerce raw row values
/// when no explicit value transform is configured.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum FieldType {
    Text,
    Integer,
    Float,
    Boolean,
    /// Unix timestamps are rendered as RFC 3339 strings.
    DateTime,
}

impl FieldType {
    /// Coerce a raw row value to this type.
    ///
    /// Values that cannot be coerced pass through unchanged rather than
    /// turning into null, so a misdeclared type never destroys data.
    pub fn coerce(&self, value: Value, _format: &str) -> Value {
        if value.is_null() {
            return value;
        }

        match self {
            FieldType::Text => match value {
                Value::String(_) => value,
                other => Value::String(other.to_string()),
            },
            FieldType::Integer => match &value {
                Value::Number(n) if n.is_i64() || n.is_u64() => value,
                Value::Number(n) => n
                    .as_f64()
                    .map(|f| Value::from(f as i64))
                    .unwrap_or(value),
                Value::String(s) => s.parse::<i64>().map(Value::from).unwrap_or(value),
                _ => value,
            },
            FieldType::Float => match &value {
                Value::Number(_) => value,
                Value::String(s) => s.parse::<f64>().map(Value::from).unwrap_or(value),
                _ => value,
            },
            FieldType::Boolean => match &value {
                Value::Bool(_) => value,
                Value::Number(n) => Value::Bool(n.as_i64().unwrap_or(0) != 0),
                Value::String(s) => match s.as_str() {
                    "1" | "true" | "t" => Value::Bool(true),
                    "0" | "false" | "f" | "" => Value::Bool(false),
                    _ => value,
                },
                _ => value,
            },
            FieldType::DateTime => match &value {
                Value::Number(n) => n
                    .as_i64()
                    .and_then(|ts| chrono::DateTime::from_timestamp(ts, 0))
                    .map(|dt| Value::String(dt.to_rfc3339()))
                    .unwrap_or(value),
                _ => value,
            },
        }
    }
}

/// A displayed list column.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ListField {
    /// Unique field identifier within the list.
    pub id: String,

    /// Header label.
    #[serde(default)]
    pub label: String,

    /// Source paths, resolved through the join map.
    pub paths: Vec<String>,

    /// Selector type name resolving how paths become projections.
    #[serde(default = "default_selector")]
    pub selector: String,

    /// Whether the field can be sorted on.
    #[serde(default)]
    pub sortable: bool,

    /// Requested sort direction, if any.
    pub sort_dir: Option<SortDirection>,

    /// Explicit sort path overriding the selector's default sort target.
    pub sort_path: Option<String>,

    /// Translate string values through the translator.
    #[serde(default)]
    pub translate: bool,

    /// Translate null values through the translator.
    #[serde(default)]
    pub translate_null: bool,

    /// Translation domain for this field's values.
    pub translation_domain: Option<String>,

    /// Prefix prepended to the value when building the translation key.
    pub translation_prefix: Option<String>,

    /// Callable applied to the decoded value. Takes precedence over
    /// `field_type` coercion.
    #[serde(skip)]
    pub value_transform: Option<ValueTransform>,

    /// Declared value type, used when no transform is configured.
    pub field_type: Option<FieldType>,
}

fn default_selector() -> String {
    "basic".to_string()
}

impl ListField {
    /// Create a field selecting a single path, defaulting everything else.
    pub fn new(id: impl Into<String>, path: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            paths: vec![path.into()],
            ..Self::default()
        }
    }
}

impl Default for ListField {
    fn default() -> Self {
        Self {
            id: String::new(),
            label: String::new(),
            paths: Vec::new(),
            selector: default_selector(),
            sortable: false,
            sort_dir: None,
            sort_path: None,
            translate: false,
            translate_null: false,
            translation_domain: None,
            translation_prefix: None,
            value_transform: None,
            field_type: None,
        }
    }
}

/// A filter input for the list.
///
/// The definition is static; the current value arrives per request in the
/// filter value map keyed by `id`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FilterField {
    /// Unique filter identifier within the list.
    pub id: String,

    /// Source paths, resolved through the join map.
    pub paths: Vec<String>,

    /// Filter type name resolving how the value becomes a predicate.
    pub filter_type: String,

    /// Type-specific options, resolved against the type's option schema.
    #[serde(default)]
    pub options: serde_json::Map<String, Value>,

    /// When false the filter is ignored even if a value is present.
    #[serde(default = "default_true")]
    pub mapped: bool,
}

fn default_true() -> bool {
    true
}

impl FilterField {
    /// Create a filter on a single path, defaulting everything else.
    pub fn new(
        id: impl Into<String>,
        path: impl Into<String>,
        filter_type: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            paths: vec![path.into()],
            filter_type: filter_type.into(),
            options: serde_json::Map::new(),
            mapped: true,
        }
    }
}

/// User-supplied filter value.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum FilterValue {
    String(String),
    Integer(i64),
    Float(f64),
    Boolean(bool),
    /// List of values, e.g. a from/to pair for range filters.
    List(Vec<FilterValue>),
}

impl FilterValue {
    /// An empty value contributes no predicate. Only an empty list counts
    /// as empty; an empty string is a legitimate value.
    pub fn is_empty(&self) -> bool {
        matches!(self, FilterValue::List(items) if items.is_empty())
    }

    /// Scalar string representation, if this is a scalar.
    pub fn as_string(&self) -> Option<String> {
        match self {
            FilterValue::String(s) => Some(s.clone()),
            FilterValue::Integer(i) => Some(i.to_string()),
            FilterValue::Float(f) => Some(f.to_string()),
            FilterValue::Boolean(b) => Some(b.to_string()),
            FilterValue::List(_) => None,
        }
    }

    /// Convert a scalar to a sea-query bind value.
    pub fn to_sea_value(&self) -> Option<sea_query::Value> {
        match self {
            FilterValue::String(s) => Some(s.clone().into()),
            FilterValue::Integer(i) => Some((*i).into()),
            FilterValue::Float(f) => Some((*f).into()),
            FilterValue::Boolean(b) => Some((*b).into()),
            FilterValue::List(_) => None,
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn join_map_lookup_by_path() {
        let mut joins = JoinMap::new();
        joins.add(JoinField {
            path: "orders".to_string(),
            alias: "o".to_string(),
            join_type: JoinType::Left,
            target_table: "orders".to_string(),
            local_field: "id".to_string(),
            foreign_field: "user_id".to_string(),
        });

        assert!(joins.get_by_path("orders").is_some());
        assert!(joins.get_by_path("orders.items").is_none());
        assert_eq!(joins.fields().len(), 1);
    }

    #[test]
    fn filter_value_emptiness() {
        assert!(FilterValue::List(vec![]).is_empty());
        assert!(!FilterValue::String(String::new()).is_empty());
        assert!(!FilterValue::Integer(0).is_empty());
        assert!(!FilterValue::List(vec![FilterValue::Integer(1)]).is_empty());
    }

    #[test]
    fn filter_value_as_string() {
        assert_eq!(
            FilterValue::String("a".to_string()).as_string(),
            Some("a".to_string())
        );
        assert_eq!(FilterValue::Integer(7).as_string(), Some("7".to_string()));
        assert_eq!(FilterValue::List(vec![]).as_string(), None);
    }

    #[test]
    fn filter_value_deserializes_untagged() {
        let value: FilterValue = serde_json::from_str(r#""hello""#).unwrap();
        assert_eq!(value, FilterValue::String("hello".to_string()));

        let value: FilterValue = serde_json::from_str("[1, 2]").unwrap();
        assert_eq!(
            value,
            FilterValue::List(vec![FilterValue::Integer(1), FilterValue::Integer(2)])
        );
    }

    #[test]
    fn list_field_defaults() {
        let field = ListField::new("name", "name");
        assert_eq!(field.selector, "basic");
        assert!(!field.sortable);
        assert!(field.value_transform.is_none());
    }

    #[test]
    fn list_field_deserializes_without_transform() {
        let json = r#"{"id": "name", "paths": ["name"], "sortable": true}"#;
        let field: ListField = serde_json::from_str(json).unwrap();
        assert_eq!(field.id, "name");
        assert!(field.sortable);
        assert!(field.value_transform.is_none());
    }

    #[test]
    fn filter_field_mapped_defaults_true() {
        let json = r#"{"id": "age", "paths": ["age"], "filter_type": "between"}"#;
        let field: FilterField = serde_json::from_str(json).unwrap();
        assert!(field.mapped);
    }

    #[test]
    fn field_type_integer_coercion() {
        let ty = FieldType::Integer;
        assert_eq!(ty.coerce(json!("42"), "html"), json!(42));
        assert_eq!(ty.coerce(json!(42), "html"), json!(42));
        // unparseable values pass through
        assert_eq!(ty.coerce(json!("n/a"), "html"), json!("n/a"));
        assert_eq!(ty.coerce(Value::Null, "html"), Value::Null);
    }

    #[test]
    fn field_type_boolean_coercion() {
        let ty = FieldType::Boolean;
        assert_eq!(ty.coerce(json!("1"), "html"), json!(true));
        assert_eq!(ty.coerce(json!("0"), "html"), json!(false));
        assert_eq!(ty.coerce(json!(1), "html"), json!(true));
    }

    #[test]
    fn field_type_datetime_coercion() {
        let ty = FieldType::DateTime;
        let coerced = ty.coerce(json!(0), "html");
        assert_eq!(coerced, json!("1970-01-01T00:00:00+00:00"));
    }

    #[test]
    fn join_type_maps_to_sea_query() {
        assert!(matches!(
            sea_query::JoinType::from(JoinType::Left),
            sea_query::JoinType::LeftJoin
        ));
        assert!(matches!(
            sea_query::JoinType::from(JoinType::Inner),
            sea_query::JoinType::InnerJoin
        ));
    }
}
