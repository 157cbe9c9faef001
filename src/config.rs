//! Application constants and environment-driven configuration.

use std::net::SocketAddr;
use std::path::PathBuf;

pub const APP_NAME: &str = "Pelagia";
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Fallback bind address when `PELAGIA_ADDR` is unset or malformed.
pub const DEFAULT_ADDR: &str = "127.0.0.1:8047";

/// Upper bound on uploaded file size.
pub const MAX_UPLOAD_BYTES: usize = 20 * 1024 * 1024; // 20MB

/// Rows in a generated fallback dataset.
pub const SAMPLE_DATASET_ROWS: usize = 100;

/// Rows returned as the `sample` preview on summary endpoints.
pub const SUMMARY_PREVIEW_ROWS: usize = 50;

/// Label set of the species classifier, in the class order the model was
/// trained with.
pub const SPECIES_LABELS: [&str; 3] = [
    "Sardina pilchardus",
    "Engraulis encrasicolus",
    "Merluccius merluccius",
];

/// Directory holding model artifacts (`PELAGIA_MODEL_DIR`, default
/// `models` relative to the working directory).
pub fn model_dir() -> PathBuf {
    std::env::var("PELAGIA_MODEL_DIR")
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from("models"))
}

/// Server bind address (`PELAGIA_ADDR`). A malformed value falls back to
/// the default rather than aborting startup.
pub fn bind_addr() -> SocketAddr {
    let raw = std::env::var("PELAGIA_ADDR").unwrap_or_else(|_| DEFAULT_ADDR.to_string());
    raw.parse().unwrap_or_else(|_| {
        tracing::warn!(addr = %raw, "PELAGIA_ADDR is not a valid socket address, using default");
        DEFAULT_ADDR.parse().expect("default address is valid")
    })
}

/// Default tracing filter when `RUST_LOG` is unset.
pub fn default_log_filter() -> String {
    "pelagia=info,tower_http=info".to_string()
}
