//! Scalar summaries computed from a normalized table.
//!
//! These feed the display endpoints' `summary` payload; chart rendering
//! happens client-side, the service only ships the numbers.

use std::collections::HashSet;

use chrono::{NaiveDate, NaiveDateTime};
use serde::Serialize;

use super::table::Table;

/// Formats accepted when reading a date column. Cells that match none of
/// them simply don't contribute to the min/max — a bad date is not an
/// error.
const DATE_FORMATS: [&str; 3] = ["%Y-%m-%d", "%Y/%m/%d", "%m/%d/%Y"];
const DATETIME_FORMATS: [&str; 2] = ["%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M:%S"];

pub fn parse_date(raw: &str) -> Option<NaiveDate> {
    let s = raw.trim();
    for fmt in DATE_FORMATS {
        if let Ok(d) = NaiveDate::parse_from_str(s, fmt) {
            return Some(d);
        }
    }
    for fmt in DATETIME_FORMATS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(s, fmt) {
            return Some(dt.date());
        }
    }
    None
}

#[derive(Debug, Serialize)]
pub struct OceanSummary {
    pub total_samples: usize,
    pub avg_temp: Option<f64>,
    pub avg_depth: Option<f64>,
    pub date_min: Option<String>,
    pub date_max: Option<String>,
}

impl OceanSummary {
    pub fn compute(table: &Table) -> Self {
        let (date_min, date_max) = date_range(table, "date");
        Self {
            total_samples: table.row_count(),
            avg_temp: table.column("temperature_C").and_then(|c| c.mean()),
            avg_depth: table.column("depth_m").and_then(|c| c.mean()),
            date_min,
            date_max,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct FisheriesSummary {
    pub total_samples: usize,
    pub unique_species: usize,
    pub total_fish: i64,
    pub avg_length: Option<f64>,
}

impl FisheriesSummary {
    pub fn compute(table: &Table) -> Self {
        let unique_species = table
            .column("species_scientific")
            .map(|col| {
                col.cells
                    .iter()
                    .filter_map(|c| c.as_text())
                    .collect::<HashSet<_>>()
                    .len()
            })
            .unwrap_or(0);

        Self {
            total_samples: table.row_count(),
            unique_species,
            total_fish: table
                .column("count")
                .map(|c| c.sum().round() as i64)
                .unwrap_or(0),
            avg_length: table.column("avg_length_mm").and_then(|c| c.mean()),
        }
    }
}

/// Min and max parseable date in `field`, formatted `%Y-%m-%d`.
fn date_range(table: &Table, field: &str) -> (Option<String>, Option<String>) {
    let Some(col) = table.column(field) else {
        return (None, None);
    };
    let mut min: Option<NaiveDate> = None;
    let mut max: Option<NaiveDate> = None;
    for cell in &col.cells {
        let Some(date) = cell.as_text().and_then(parse_date) else {
            continue;
        };
        min = Some(min.map_or(date, |m| m.min(date)));
        max = Some(max.map_or(date, |m| m.max(date)));
    }
    let fmt = |d: NaiveDate| d.format("%Y-%m-%d").to_string();
    (min.map(fmt), max.map(fmt))
}
