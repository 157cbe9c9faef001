//! Normalization pipeline — raw uploaded tables to canonical records.
//!
//! The stages run in a fixed order, each pure and synchronous over a
//! request-owned [`Table`]:
//!
//! 1. header canonicalization ([`header`])
//! 2. alias resolution ([`alias`])
//! 3. schema completion ([`schema`])
//! 4. numeric coercion with a caller-chosen null-fill policy ([`coerce`])
//! 5. display-name recasing ([`schema::apply_display_names`])
//!
//! [`normalize`] composes the stages; the pieces stay public for tests
//! and for call sites that need only part of the pipeline.

pub mod alias;
pub mod coerce;
pub mod header;
pub mod sample;
pub mod schema;
pub mod summary;
pub mod table;

use ndarray::Array2;

pub use coerce::Impute;
pub use schema::{Domain, FISHERIES, OCEAN};
pub use table::{Cell, Table};

/// Run the full normalization pipeline for `domain` over `table`.
///
/// Afterward every canonical field of the domain is present under its
/// display name (value or null), numeric fields are coerced with
/// `impute` applied, and unmatched input columns pass through under
/// their token form.
pub fn normalize(table: &mut Table, domain: &Domain, impute: Impute) {
    canonicalize_headers(table);

    let plan = alias::resolve(table, domain.aliases);
    alias::apply(table, &plan);

    schema::complete(table, domain);
    coerce::coerce_numeric(table, domain.numeric, impute);
    schema::apply_display_names(table, domain);
}

/// Normalization variant for model feeds: the same stages minus schema
/// completion, so a genuinely absent canonical column stays absent and
/// the caller can reject the upload instead of silently feeding nulls to
/// the model.
pub fn normalize_strict(table: &mut Table, domain: &Domain, impute: Impute) {
    canonicalize_headers(table);

    let plan = alias::resolve(table, domain.aliases);
    alias::apply(table, &plan);

    coerce::coerce_numeric(table, domain.numeric, impute);
    schema::apply_display_names(table, domain);
}

fn canonicalize_headers(table: &mut Table) {
    let tokens: Vec<String> = table.column_names().map(header::canonicalize).collect();
    for (idx, token) in tokens.iter().enumerate() {
        table.rename_column(idx, token);
    }
}

/// Build an n×k feature matrix by projecting `fields` (display names) in
/// the given fixed order. Remaining nulls read as 0.0 — prediction call
/// sites zero-fill beforehand, this is the backstop for the same policy.
///
/// Returns the list of missing column names on failure, for the caller's
/// malformed-input error.
pub fn feature_matrix(table: &Table, fields: &[&str]) -> Result<Array2<f64>, Vec<String>> {
    let missing: Vec<String> = fields
        .iter()
        .filter(|f| !table.has_column(f))
        .map(|f| f.to_string())
        .collect();
    if !missing.is_empty() {
        return Err(missing);
    }

    let rows = table.row_count();
    let mut data = Vec::with_capacity(rows * fields.len());
    for row in 0..rows {
        for field in fields {
            let cell = &table.column(field).expect("checked above").cells[row];
            data.push(cell.as_number().unwrap_or(0.0));
        }
    }
    Ok(Array2::from_shape_vec((rows, fields.len()), data).expect("shape matches push count"))
}
