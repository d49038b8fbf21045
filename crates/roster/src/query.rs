//! List query assembly.
//!
//! A single linear pass turns a list definition into an executable
//! sea-query select: base table, then joins, selections and sorts,
//! filters, grouping, and finally any list-specific custom query logic.

use crate::config::ListConfig;
use crate::error::{ListError, ListResult};
use crate::filter::FilterRegistry;
use crate::paths::resolve_paths;
use crate::selector::SelectorRegistry;
use crate::types::{FilterField, FilterValue, JoinMap, ListField};
use sea_query::{Alias, Expr, Query, SelectStatement};
use std::collections::HashMap;
use std::sync::Arc;
use tracing::debug;

/// A list definition: the base table plus an escape hatch for query logic
/// the declarative field model cannot express.
pub trait ListDefinition {
    /// Table the list is rooted at.
    fn data_table(&self) -> &str;

    /// Append custom query logic after assembly. Default is a no-op.
    fn configure_query(
        &self,
        query: &mut SelectStatement,
        values: &HashMap<String, FilterValue>,
    ) {
        let _ = (query, values);
    }
}

/// Assembles list queries from declarative field, filter, and join
/// definitions.
///
/// One call to [`build_query`](Self::build_query) builds exactly one
/// query; nothing carries over between builds.
pub struct ListQueryBuilder {
    config: ListConfig,
    selectors: Arc<SelectorRegistry>,
    filters: Arc<FilterRegistry>,
}

impl ListQueryBuilder {
    pub fn new(
        config: ListConfig,
        selectors: Arc<SelectorRegistry>,
        filters: Arc<FilterRegistry>,
    ) -> Self {
        Self {
            config,
            selectors,
            filters,
        }
    }

    /// Build the select statement for a list.
    ///
    /// `values` holds the current per-request filter values keyed by
    /// filter field id; filter definitions without a value are skipped.
    pub fn build_query(
        &self,
        list: &dyn ListDefinition,
        joins: &JoinMap,
        fields: &[ListField],
        filter_fields: &[FilterField],
        values: &HashMap<String, FilterValue>,
    ) -> ListResult<SelectStatement> {
        let mut query = Query::select();
        query.from_as(
            Alias::new(list.data_table()),
            Alias::new(&self.config.base_alias),
        );

        let mut has_aggregation = false;

        self.apply_joins(&mut query, joins)?;
        self.apply_selects(&mut query, joins, fields, &mut has_aggregation)?;
        self.apply_filters(&mut query, joins, filter_fields, values, &mut has_aggregation)?;
        self.apply_grouping(&mut query, has_aggregation);
        list.configure_query(&mut query, values);

        debug!(
            table = list.data_table(),
            aggregated = has_aggregation,
            "assembled list query"
        );

        Ok(query)
    }

    /// Emit a join per join field, attaching each to its parent alias.
    ///
    /// The parent is the base alias for a single-segment path, otherwise
    /// the join registered under the path prefix.
    fn apply_joins(&self, query: &mut SelectStatement, joins: &JoinMap) -> ListResult<()> {
        for join in joins.fields() {
            let parent_alias = match join.path.rsplit_once('.') {
                None => self.config.base_alias.as_str(),
                Some((prefix, _)) => {
                    let parent = joins.get_by_path(prefix).ok_or_else(|| {
                        ListError::UnresolvedJoinPath {
                            path: prefix.to_string(),
                        }
                    })?;
                    parent.alias.as_str()
                }
            };

            let on_condition = Expr::col((
                Alias::new(parent_alias),
                Alias::new(&join.local_field),
            ))
            .equals((Alias::new(&join.alias), Alias::new(&join.foreign_field)));

            query.join_as(
                join.join_type.into(),
                Alias::new(&join.target_table),
                Alias::new(&join.alias),
                on_condition,
            );
        }

        Ok(())
    }

    /// Dispatch each list field to its selector type and append sorts.
    fn apply_selects(
        &self,
        query: &mut SelectStatement,
        joins: &JoinMap,
        fields: &[ListField],
        has_aggregation: &mut bool,
    ) -> ListResult<()> {
        for field in fields {
            let paths = resolve_paths(&self.config, joins, &field.paths)?;
            let selector = self.selectors.get(&field.selector).ok_or_else(|| {
                ListError::UnknownSelector {
                    field_id: field.id.clone(),
                    name: field.selector.clone(),
                }
            })?;

            selector.apply(query, &paths, &field.id);
            if selector.has_aggregation() {
                *has_aggregation = true;
            }

            if field.sortable && let Some(dir) = field.sort_dir {
                let target = match &field.sort_path {
                    Some(sort_path) => {
                        resolve_paths(&self.config, joins, std::slice::from_ref(sort_path))?
                            .remove(0)
                    }
                    None => selector.sort_path(&field.id),
                };

                query.order_by_expr(Expr::cust(target), dir.into());
            }
        }

        Ok(())
    }

    /// Apply each filter field that has a usable value.
    fn apply_filters(
        &self,
        query: &mut SelectStatement,
        joins: &JoinMap,
        filter_fields: &[FilterField],
        values: &HashMap<String, FilterValue>,
        has_aggregation: &mut bool,
    ) -> ListResult<()> {
        for field in filter_fields {
            let Some(value) = values.get(&field.id) else {
                continue;
            };
            if value.is_empty() || !field.mapped {
                debug!(filter = %field.id, "skipping filter without usable value");
                continue;
            }

            let filter = self.filters.get(&field.filter_type).ok_or_else(|| {
                ListError::UnknownFilter {
                    field_id: field.id.clone(),
                    name: field.filter_type.clone(),
                }
            })?;

            let paths = resolve_paths(&self.config, joins, &field.paths)?;
            let options = filter.options().resolve(&field.options).map_err(|message| {
                ListError::InvalidOptions {
                    field_id: field.id.clone(),
                    message,
                }
            })?;

            filter.apply(query, &paths, &field.id, value, &options)?;
            if filter.has_aggregation() {
                *has_aggregation = true;
            }
        }

        Ok(())
    }

    /// Aggregated queries group by the base identifier so one row per base
    /// entity survives; plain queries deduplicate joined rows with
    /// DISTINCT. Never both.
    fn apply_grouping(&self, query: &mut SelectStatement, has_aggregation: bool) {
        if has_aggregation {
            query.group_by_col((
                Alias::new(&self.config.base_alias),
                Alias::new(&self.config.identifier),
            ));
        } else {
            query.distinct();
        }
    }
}
