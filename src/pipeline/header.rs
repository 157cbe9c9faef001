//! Header canonicalization — raw column labels to stable tokens.
//!
//! Field teams export the same measurement under wildly different labels
//! (`"Depth (m)"`, `"depth-m"`, `"DO mg/L"`). Everything downstream keys
//! on the token form produced here, so this runs on every header before
//! alias resolution.

/// Literal substring replacements, applied in this order after trimming
/// and lowercasing. `%` becomes `pct` so `"O2 %"` stays meaningful.
const REPLACEMENTS: [(&str, &str); 7] = [
    ("(", ""),
    (")", ""),
    ("/", "_"),
    ("\\", "_"),
    ("-", "_"),
    (" ", "_"),
    ("%", "pct"),
];

/// Normalize one raw header into its token form.
///
/// Pure and deterministic; applying it twice yields the same result as
/// once.
pub fn canonicalize(raw: &str) -> String {
    let mut token = raw.trim().to_lowercase();
    for (from, to) in REPLACEMENTS {
        token = token.replace(from, to);
    }
    token
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trims_and_lowercases() {
        assert_eq!(canonicalize("  Sampling Date "), "sampling_date");
        assert_eq!(canonicalize("LATITUDE"), "latitude");
    }

    #[test]
    fn replacement_table() {
        assert_eq!(canonicalize("Depth (m)"), "depth_m");
        assert_eq!(canonicalize("DO mg/L"), "do_mg_l");
        assert_eq!(canonicalize("avg-length-mm"), "avg_length_mm");
        assert_eq!(canonicalize("path\\to"), "path_to");
        assert_eq!(canonicalize("O2 %"), "o2_pct");
    }

    #[test]
    fn idempotent() {
        for raw in ["Depth (m)", "DO mg/L", "  Temp ", "salinity_psu", "O2 %"] {
            let once = canonicalize(raw);
            assert_eq!(canonicalize(&once), once);
        }
    }

    #[test]
    fn canonical_tokens_are_fixed_points() {
        for token in ["temperature_c", "oxygen_mgl", "ph", "sample_id"] {
            assert_eq!(canonicalize(token), token);
        }
    }
}
