pub mod merge;
pub mod vaf;

pub use merge::{Locus, MergeResult, MergedVariant, merge_tables};
pub use vaf::{ReadCounts, compute_vaf, parse_count};

/// Variant types that are classified; DNPs, TNPs and the like are skipped.
pub const CLASSIFIED_VARIANT_TYPES: [&str; 3] = ["SNP", "INS", "DEL"];
