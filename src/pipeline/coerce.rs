//! Numeric coercion with per-call-site null-fill policy.
//!
//! Designated fields are parsed cell-by-cell as `f64`; anything that does
//! not parse becomes null. Coercion never fails and never drops a row —
//! bad cells are a data-quality fact to carry, not an error to raise.
//!
//! What happens to the remaining nulls differs by caller: endpoints that
//! clean for display mean-impute, endpoints that feed a model zero-fill.
//! The divergence is deliberate and surfaced as the `Impute` argument
//! (see DESIGN.md).

use super::table::{Cell, Table};

/// Null-fill policy applied after parsing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Impute {
    /// Leave nulls in place.
    None,
    /// Replace nulls with the column mean over non-null values. A column
    /// with no numeric values has no mean and is left untouched.
    Mean,
    /// Replace nulls with 0.0.
    Zero,
}

/// Coerce each designated field to numeric, then apply `impute`.
/// Fields absent from the table are skipped.
pub fn coerce_numeric(table: &mut Table, fields: &[&str], impute: Impute) {
    for field in fields {
        let Some(col) = table.column_mut(field) else {
            continue;
        };

        for cell in &mut col.cells {
            *cell = match std::mem::replace(cell, Cell::Null) {
                Cell::Number(v) => Cell::Number(v),
                Cell::Text(s) => match s.trim().parse::<f64>() {
                    Ok(v) => Cell::Number(v),
                    Err(_) => Cell::Null,
                },
                Cell::Null => Cell::Null,
            };
        }

        match impute {
            Impute::None => {}
            Impute::Zero => {
                for cell in &mut col.cells {
                    if cell.is_null() {
                        *cell = Cell::Number(0.0);
                    }
                }
            }
            Impute::Mean => {
                if let Some(mean) = col.mean() {
                    for cell in &mut col.cells {
                        if cell.is_null() {
                            *cell = Cell::Number(mean);
                        }
                    }
                }
            }
        }
    }
}
