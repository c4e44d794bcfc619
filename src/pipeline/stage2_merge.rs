use anyhow::Result;
use tracing::{info, warn};

use crate::ctx::Ctx;
use crate::pipeline::Stage;
use crate::variants::merge_tables;

pub struct Stage2Merge;

impl Stage2Merge {
    pub fn new() -> Self {
        Self
    }
}

impl Stage for Stage2Merge {
    fn name(&self) -> &'static str {
        "stage2_merge"
    }

    fn run(&self, ctx: &mut Ctx) -> Result<()> {
        let merged = merge_tables(&ctx.tables);
        if !merged.warnings.is_empty() {
            warn!(
                duplicates = merged.warnings.len(),
                "duplicate loci within a sample; first row kept"
            );
        }
        info!(variants = merged.variants.len(), "loci_merged");

        ctx.report.totals.merged_variants = merged.variants.len() as u64;
        ctx.variants = merged.variants;
        ctx.warnings.extend(merged.warnings);
        Ok(())
    }
}
