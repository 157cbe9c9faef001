//! Generated fallback datasets.
//!
//! The records endpoints serve a plausible generated dataset when the
//! request carries no file, so the frontend renders something useful on
//! first load. Values follow the ranges of real coastal monitoring data;
//! temperature and salinity carry a seasonal sin/cos component so time
//! series don't look like white noise.

use std::f64::consts::TAU;

use chrono::{Duration, NaiveDate, NaiveTime};
use rand::seq::SliceRandom;
use rand::Rng;

use crate::config::SPECIES_LABELS;

use super::table::{Cell, Table};

const LIFE_STAGES: [&str; 2] = ["juvenile", "adult"];

fn start_date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2023, 1, 1).expect("valid constant date")
}

/// Generated oceanographic dataset with `rows` samples, one per day.
pub fn ocean(rows: usize) -> Table {
    let mut rng = rand::thread_rng();
    let mut table = Table::with_rows(rows);
    let phase = |i: usize| i as f64 / (rows.max(2) - 1) as f64 * TAU;

    let mut ids = Vec::with_capacity(rows);
    let mut dates = Vec::with_capacity(rows);
    let mut times = Vec::with_capacity(rows);
    let mut lats = Vec::with_capacity(rows);
    let mut lons = Vec::with_capacity(rows);
    let mut depths = Vec::with_capacity(rows);
    let mut temps = Vec::with_capacity(rows);
    let mut salinities = Vec::with_capacity(rows);
    let mut oxygens = Vec::with_capacity(rows);
    let mut phs = Vec::with_capacity(rows);

    for i in 0..rows {
        let date = start_date() + Duration::days(i as i64);
        let time = NaiveTime::from_hms_opt(0, 0, 0).expect("midnight")
            + Duration::hours(i as i64 % 24);

        ids.push(Cell::Number((i + 1) as f64));
        dates.push(Cell::Text(date.format("%Y-%m-%d").to_string()));
        times.push(Cell::Text(time.format("%H:%M").to_string()));
        lats.push(Cell::Number(rng.gen_range(20.0..40.0)));
        lons.push(Cell::Number(rng.gen_range(-100.0..-80.0)));
        depths.push(Cell::Number(rng.gen_range(0.0..50.0)));
        temps.push(Cell::Number(
            rng.gen_range(15.0..25.0) + phase(i).sin() * 2.0,
        ));
        salinities.push(Cell::Number(
            rng.gen_range(30.0..35.0) - phase(i).cos(),
        ));
        oxygens.push(Cell::Number(rng.gen_range(5.0..10.0)));
        phs.push(Cell::Number(rng.gen_range(7.5..8.5)));
    }

    table.push_column("sample_id", ids);
    table.push_column("date", dates);
    table.push_column("time", times);
    table.push_column("lat", lats);
    table.push_column("lon", lons);
    table.push_column("depth_m", depths);
    table.push_column("temperature_C", temps);
    table.push_column("salinity_PSU", salinities);
    table.push_column("oxygen_mgL", oxygens);
    table.push_column("pH", phs);
    table
}

/// Generated fisheries dataset with `rows` catch records.
pub fn fisheries(rows: usize) -> Table {
    let mut rng = rand::thread_rng();
    let mut table = Table::with_rows(rows);

    let mut ids = Vec::with_capacity(rows);
    let mut dates = Vec::with_capacity(rows);
    let mut lats = Vec::with_capacity(rows);
    let mut lons = Vec::with_capacity(rows);
    let mut species = Vec::with_capacity(rows);
    let mut counts = Vec::with_capacity(rows);
    let mut lengths = Vec::with_capacity(rows);
    let mut stages = Vec::with_capacity(rows);

    for i in 0..rows {
        let date = start_date() + Duration::days(i as i64);
        ids.push(Cell::Number((i + 1) as f64));
        dates.push(Cell::Text(date.format("%Y-%m-%d").to_string()));
        lats.push(Cell::Number(rng.gen_range(20.0..40.0)));
        lons.push(Cell::Number(rng.gen_range(-100.0..-80.0)));
        species.push(Cell::Text(
            SPECIES_LABELS
                .choose(&mut rng)
                .expect("non-empty label set")
                .to_string(),
        ));
        counts.push(Cell::Number(rng.gen_range(10..500) as f64));
        lengths.push(Cell::Number(rng.gen_range(50.0..300.0)));
        stages.push(Cell::Text(
            LIFE_STAGES.choose(&mut rng).expect("non-empty").to_string(),
        ));
    }

    table.push_column("sample_id", ids);
    table.push_column("date", dates);
    table.push_column("lat", lats);
    table.push_column("lon", lons);
    table.push_column("species_scientific", species);
    table.push_column("count", counts);
    table.push_column("avg_length_mm", lengths);
    table.push_column("life_stage", stages);
    table
}

/// Overwrite (or add) simulated environmental columns on a fisheries
/// table, standing in for a join against co-located ocean sensors.
pub fn attach_environmental(table: &mut Table) {
    let mut rng = rand::thread_rng();
    let rows = table.row_count();
    let temps = (0..rows)
        .map(|_| Cell::Number(rng.gen_range(15.0..25.0)))
        .collect();
    let salinities = (0..rows)
        .map(|_| Cell::Number(rng.gen_range(30.0..35.0)))
        .collect();
    table.set_column("temperature_C", temps);
    table.set_column("salinity_PSU", salinities);
}
