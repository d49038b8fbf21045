//! Selector types: how a list field becomes query projections and how the
//! resulting row values are decoded back.

mod basic;
mod group;

pub use basic::BasicSelectorType;
pub use group::GroupSelectorType;

use sea_query::SelectStatement;
use serde_json::{Map, Value};
use std::collections::HashMap;

/// Deterministic projection alias for a field at a path position.
///
/// Dots are flattened so a field id like `owner.name` stays a valid SQL
/// alias.
pub fn column_alias(field_id: &str, position: usize) -> String {
    format!("{}_{}", field_id.replace('.', "_"), position)
}

/// A selector type turns a list field's resolved paths into one or more
/// named projections and decodes the row value back out.
///
/// Implementations are stateless; everything they need arrives per call.
pub trait SelectorType: Send + Sync {
    /// Append projections for the field to the query.
    fn apply(&self, query: &mut SelectStatement, paths: &[String], field_id: &str);

    /// Whether the projection introduces an aggregate function.
    fn has_aggregation(&self) -> bool {
        false
    }

    /// Decode the field's value from a result row.
    fn get_value(&self, row: &Map<String, Value>, field_id: &str) -> Value;

    /// Default order-by target when no explicit sort path is configured.
    fn sort_path(&self, field_id: &str) -> String {
        column_alias(field_id, 0)
    }
}

/// Name-keyed registry of selector types.
pub struct SelectorRegistry {
    types: HashMap<String, Box<dyn SelectorType>>,
}

impl SelectorRegistry {
    /// Create an empty registry.
    pub fn empty() -> Self {
        Self {
            types: HashMap::new(),
        }
    }

    /// Register a selector type under a name.
    pub fn register(&mut self, name: &str, selector: Box<dyn SelectorType>) {
        self.types.insert(name.to_string(), selector);
    }

    /// Check whether a selector type is registered.
    pub fn has(&self, name: &str) -> bool {
        self.types.contains_key(name)
    }

    /// Look up a selector type by name.
    pub fn get(&self, name: &str) -> Option<&dyn SelectorType> {
        self.types.get(name).map(|s| s.as_ref())
    }
}

impl Default for SelectorRegistry {
    /// Registry with the built-in selector types pre-registered.
    fn default() -> Self {
        let mut registry = Self::empty();
        registry.register("basic", Box::new(BasicSelectorType));
        registry.register("group", Box::new(GroupSelectorType));
        registry
    }
}
