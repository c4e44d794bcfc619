/// Cells treated as "no value" and counted as zero reads.
const MISSING_TOKENS: [&str; 7] = ["", "NA", "N/A", "NaN", "nan", "null", "."];

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ReadCounts {
    pub ref_count: f64,
    pub alt_count: f64,
    pub vaf: f64,
}

impl ReadCounts {
    pub fn new(ref_count: f64, alt_count: f64) -> Self {
        Self {
            ref_count,
            alt_count,
            vaf: compute_vaf(ref_count, alt_count),
        }
    }

    pub fn absent() -> Self {
        Self::new(0.0, 0.0)
    }
}

/// Missing cells read as 0; anything else that is not a number is NaN.
pub fn parse_count(raw: &str) -> f64 {
    let raw = raw.trim();
    if MISSING_TOKENS.contains(&raw) {
        return 0.0;
    }
    raw.parse::<f64>().unwrap_or(f64::NAN)
}

pub fn compute_vaf(ref_count: f64, alt_count: f64) -> f64 {
    if ref_count == 0.0 && alt_count == 0.0 {
        return 0.0;
    }
    alt_count / (ref_count + alt_count)
}
