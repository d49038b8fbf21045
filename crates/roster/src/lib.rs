//! Declarative list building over sea-query.
//!
//! This crate provides:
//! - ListQueryBuilder: assembles list queries from field, filter, and
//!   join definitions
//! - SelectorRegistry / FilterRegistry: name-keyed pluggable selector and
//!   filter strategies
//! - ValueAccessor: resolves raw result rows into display values
//! - Types: ListField, FilterField, JoinField, FilterValue, etc.
//!
//! A list declares its base table, a join map of dotted relation paths,
//! the fields it displays, and the filters it accepts. The builder turns
//! that into a single select statement; the value accessor turns result
//! rows back into rendered cell values.

pub mod config;
pub mod error;
pub mod filter;
pub mod paths;
pub mod query;
pub mod selector;
pub mod types;
pub mod value;

pub use config::ListConfig;
pub use error::{ListError, ListResult};
pub use filter::{FilterOptions, FilterRegistry, FilterType, OptionsSchema};
pub use query::{ListDefinition, ListQueryBuilder};
pub use selector::{SelectorRegistry, SelectorType};
pub use types::{
    FieldType, FilterField, FilterValue, JoinField, JoinMap, JoinType, ListField, SortDirection,
    ValueTransform,
};
pub use value::{Translator, ValueAccessor};
