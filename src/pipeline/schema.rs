//! Canonical schemas for the two observation domains.
//!
//! A domain fixes, at compile time: the ordered canonical fields (token
//! form plus outward display name), the alias table feeding the resolver,
//! and the set of fields the coercer treats as numeric.

use super::alias::AliasSpec;
use super::table::{Cell, Table};

/// One canonical field: the lowercase token the resolver binds, and the
/// display name written to JSON output. They differ only where the
/// conventional field name carries unit casing (`temperature_C`, `pH`).
#[derive(Debug, Clone, Copy)]
pub struct Field {
    pub token: &'static str,
    pub display: &'static str,
}

const fn field(token: &'static str, display: &'static str) -> Field {
    Field { token, display }
}

#[derive(Debug, Clone, Copy)]
pub struct Domain {
    pub name: &'static str,
    pub fields: &'static [Field],
    pub aliases: AliasSpec,
    /// Tokens coerced to numeric during normalization.
    pub numeric: &'static [&'static str],
}

pub static OCEAN: Domain = Domain {
    name: "ocean",
    fields: &[
        field("sample_id", "sample_id"),
        field("date", "date"),
        field("time", "time"),
        field("lat", "lat"),
        field("lon", "lon"),
        field("depth_m", "depth_m"),
        field("temperature_c", "temperature_C"),
        field("salinity_psu", "salinity_PSU"),
        field("oxygen_mgl", "oxygen_mgL"),
        field("ph", "pH"),
    ],
    aliases: &[
        ("sample_id", &["sample_id", "id", "sampleid"]),
        ("date", &["date", "sampling_date", "sample_date"]),
        ("time", &["time", "sampling_time", "sample_time"]),
        ("lat", &["lat", "latitude"]),
        ("lon", &["lon", "longitude"]),
        ("depth_m", &["depth_m", "depth", "depth_meter", "depth_meters"]),
        (
            "temperature_c",
            &["temperature_c", "temperature", "temp_c", "temp"],
        ),
        ("salinity_psu", &["salinity_psu", "salinity"]),
        (
            "oxygen_mgl",
            &["oxygen_mgl", "dissolved_oxygen_mg_l", "do_mg_l", "oxygen"],
        ),
        ("ph", &["ph"]),
    ],
    numeric: &[
        "temperature_c",
        "salinity_psu",
        "oxygen_mgl",
        "ph",
        "depth_m",
        "lat",
        "lon",
    ],
};

pub static FISHERIES: Domain = Domain {
    name: "fisheries",
    fields: &[
        field("sample_id", "sample_id"),
        field("date", "date"),
        field("lat", "lat"),
        field("lon", "lon"),
        field("species_scientific", "species_scientific"),
        field("count", "count"),
        field("avg_length_mm", "avg_length_mm"),
        field("life_stage", "life_stage"),
    ],
    aliases: &[
        ("sample_id", &["sample_id", "id", "sampleid"]),
        ("date", &["date", "sampling_date", "sample_date"]),
        ("lat", &["lat", "latitude"]),
        ("lon", &["lon", "longitude"]),
        (
            "species_scientific",
            &["species_scientific", "species", "scientific_name"],
        ),
        ("count", &["count", "fish_count", "n"]),
        (
            "avg_length_mm",
            &["avg_length_mm", "avg_length", "length_mm", "mean_length_mm"],
        ),
        ("life_stage", &["life_stage", "stage"]),
    ],
    numeric: &["count", "avg_length_mm", "lat", "lon"],
};

/// Insert an all-null column for every canonical field absent from the
/// table. Row count and existing columns are untouched.
pub fn complete(table: &mut Table, domain: &Domain) {
    for f in domain.fields {
        if !table.has_column(f.token) && !table.has_column(f.display) {
            let nulls = vec![Cell::Null; table.row_count()];
            table.push_column(f.token, nulls);
        }
    }
}

/// Rename token columns to their display names (`ph` → `pH`). Fields
/// whose token and display name coincide are left alone.
pub fn apply_display_names(table: &mut Table, domain: &Domain) {
    for f in domain.fields {
        if f.token != f.display {
            if let Some(idx) = table.column_index(f.token) {
                table.rename_column(idx, f.display);
            }
        }
    }
}
