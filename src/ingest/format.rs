//! Upload format detection.
//!
//! Uploads are classified by file extension — the contract with the
//! frontend is explicit about what it sends, and a wrong extension is a
//! user-facing malformed-input error, not something to sniff around.

use std::path::Path;

/// Broad upload categories we recognize.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileKind {
    Csv,
    /// Excel workbooks are recognized but not parsed; see DESIGN.md.
    Spreadsheet,
    Unsupported,
}

/// Classify an uploaded filename by its extension, case-insensitively.
pub fn detect(filename: &str) -> FileKind {
    let ext = Path::new(filename)
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_ascii_lowercase)
        .unwrap_or_default();

    match ext.as_str() {
        "csv" => FileKind::Csv,
        "xlsx" | "xls" => FileKind::Spreadsheet,
        _ => FileKind::Unsupported,
    }
}
