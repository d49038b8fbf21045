//! Dotted path resolution over the join map.
//!
//! A path is either `property` (implicitly on the base alias) or
//! `<join path>.property`, where the join path portion must match a
//! registered join exactly.

use crate::config::ListConfig;
use crate::error::{ListError, ListResult};
use crate::types::JoinMap;
use sea_query::{Alias, Expr, SimpleExpr};

/// Resolve dotted paths into `alias.property` column references.
///
/// Output order matches input order; callers rely on positions lining up
/// with projection aliases.
pub fn resolve_paths(
    config: &ListConfig,
    joins: &JoinMap,
    paths: &[String],
) -> ListResult<Vec<String>> {
    let mut resolved = Vec::with_capacity(paths.len());

    for path in paths {
        let (alias, prop) = match path.rsplit_once('.') {
            None => (config.base_alias.as_str(), path.as_str()),
            Some((join_path, prop)) => {
                let join = joins.get_by_path(join_path).ok_or_else(|| {
                    ListError::UnresolvedJoinPath {
                        path: join_path.to_string(),
                    }
                })?;
                (join.alias.as_str(), prop)
            }
        };

        resolved.push(format!("{alias}.{prop}"));
    }

    Ok(resolved)
}

/// Build a qualified column expression from a resolved `alias.property`
/// reference.
pub fn column(path: &str) -> SimpleExpr {
    match path.split_once('.') {
        Some((qualifier, name)) => Expr::col((Alias::new(qualifier), Alias::new(name))).into(),
        None => Expr::col(Alias::new(path)).into(),
    }
}
