//! Alias resolution — binds normalized headers to canonical field names.
//!
//! Each domain declares, per canonical field, an ordered list of accepted
//! header tokens. The first alias found among the table's columns wins;
//! later aliases are ignored once the field is bound. A column binds at
//! most one canonical field. Columns matching no alias pass through under
//! their normalized name.
//!
//! Every canonical token lists itself as its first alias, which makes
//! resolution a no-op on an already-canonical table.

use super::table::Table;

/// Canonical token → accepted header tokens, in priority order.
pub type AliasSpec = &'static [(&'static str, &'static [&'static str])];

/// A resolved binding: column index in the table → canonical token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Binding {
    pub column: usize,
    pub canonical: &'static str,
}

/// Compute the rename plan for `table` under `aliases`.
///
/// First-match policy along two axes: aliases are scanned in their listed
/// priority order, and an alias present more than once binds its first
/// column occurrence.
pub fn resolve(table: &Table, aliases: AliasSpec) -> Vec<Binding> {
    let mut bindings = Vec::new();
    let mut bound_columns = vec![false; table.column_count()];

    for (canonical, candidates) in aliases {
        'field: for alias in *candidates {
            for (idx, name) in table.column_names().enumerate() {
                if !bound_columns[idx] && name == *alias {
                    bound_columns[idx] = true;
                    bindings.push(Binding {
                        column: idx,
                        canonical,
                    });
                    break 'field;
                }
            }
        }
    }
    bindings
}

/// Apply a rename plan produced by [`resolve`].
pub fn apply(table: &mut Table, bindings: &[Binding]) {
    for binding in bindings {
        table.rename_column(binding.column, binding.canonical);
    }
}
