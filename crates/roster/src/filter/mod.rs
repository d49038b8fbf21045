//! Filter types: how a filter field with a user-supplied value becomes a
//! query predicate.

mod between;
mod comparison;
mod contains;

pub use between::BetweenFilterType;
pub use comparison::ComparisonFilterType;
pub use contains::ContainsFilterType;

use crate::error::ListResult;
use crate::types::FilterValue;
use sea_query::SelectStatement;
use serde_json::{Map, Value};
use std::collections::HashMap;

/// Declared options for a filter type, with per-option defaults.
///
/// Resolution rejects unknown keys and fills missing ones with their
/// defaults, so a filter type always sees the full option set it declared.
#[derive(Debug, Default)]
pub struct OptionsSchema {
    defaults: Vec<(String, Value)>,
}

impl OptionsSchema {
    pub fn new() -> Self {
        Self::default()
    }

    /// Declare an option with its default value.
    pub fn define(mut self, name: &str, default: Value) -> Self {
        self.defaults.push((name.to_string(), default));
        self
    }

    /// Resolve supplied options against the schema.
    pub fn resolve(&self, supplied: &Map<String, Value>) -> Result<FilterOptions, String> {
        for key in supplied.keys() {
            if !self.defaults.iter().any(|(name, _)| name == key) {
                return Err(format!("unknown option '{key}'"));
            }
        }

        let mut resolved = Map::new();
        for (name, default) in &self.defaults {
            let value = supplied.get(name).cloned().unwrap_or_else(|| default.clone());
            resolved.insert(name.clone(), value);
        }

        Ok(FilterOptions(resolved))
    }
}

/// Options resolved through an [`OptionsSchema`], scoped to one apply call.
#[derive(Debug, Clone)]
pub struct FilterOptions(Map<String, Value>);

impl FilterOptions {
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.0.get(name)
    }

    pub fn get_str(&self, name: &str) -> Option<&str> {
        self.0.get(name).and_then(Value::as_str)
    }
}

/// A filter type turns a filter field's resolved paths and current value
/// into a predicate on the query.
///
/// Implementations are stateless; resolved options arrive with each apply
/// call rather than being stored on the instance.
pub trait FilterType: Send + Sync {
    /// Declare recognized options and their defaults.
    fn options(&self) -> OptionsSchema {
        OptionsSchema::new()
    }

    /// Append a predicate for the field's value to the query.
    fn apply(
        &self,
        query: &mut SelectStatement,
        paths: &[String],
        field_id: &str,
        value: &FilterValue,
        options: &FilterOptions,
    ) -> ListResult<()>;

    /// Whether the predicate introduces an aggregate function.
    fn has_aggregation(&self) -> bool {
        false
    }
}

/// Name-keyed registry of filter types.
pub struct FilterRegistry {
    types: HashMap<String, Box<dyn FilterType>>,
}

impl FilterRegistry {
    /// Create an empty registry.
    pub fn empty() -> Self {
        Self {
            types: HashMap::new(),
        }
    }

    /// Register a filter type under a name.
    pub fn register(&mut self, name: &str, filter: Box<dyn FilterType>) {
        self.types.insert(name.to_string(), filter);
    }

    /// Check whether a filter type is registered.
    pub fn has(&self, name: &str) -> bool {
        self.types.contains_key(name)
    }

    /// Look up a filter type by name.
    pub fn get(&self, name: &str) -> Option<&dyn FilterType> {
        self.types.get(name).map(|f| f.as_ref())
    }
}

impl Default for FilterRegistry {
    /// Registry with the built-in filter types pre-registered.
    fn default() -> Self {
        let mut registry = Self::empty();
        registry.register("between", Box::new(BetweenFilterType));
        registry.register("comparison", Box::new(ComparisonFilterType));
        registry.register("contains", Box::new(ContainsFilterType));
        registry
    }
}
