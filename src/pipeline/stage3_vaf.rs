use std::collections::BTreeMap;

use anyhow::{Context, Result};
use tracing::info;

use crate::ctx::{Ctx, VariantRow};
use crate::pipeline::Stage;
use crate::variants::{CLASSIFIED_VARIANT_TYPES, ReadCounts, parse_count};

pub struct Stage3Vaf;

impl Stage3Vaf {
    pub fn new() -> Self {
        Self
    }
}

impl Stage for Stage3Vaf {
    fn name(&self) -> &'static str {
        "stage3_vaf"
    }

    fn run(&self, ctx: &mut Ctx) -> Result<()> {
        let mut count_cols = BTreeMap::new();
        for (&sample, table) in &ctx.tables {
            let cols = ctx.count_columns_for(sample);
            let ref_idx = table.require_column(&cols.ref_count)?;
            let alt_idx = table.require_column(&cols.alt_count)?;
            count_cols.insert(sample, (ref_idx, alt_idx));
        }

        let mut rows = Vec::with_capacity(ctx.variants.len());
        let mut skipped = 0u64;
        for (variant_idx, variant) in ctx.variants.iter().enumerate() {
            if !CLASSIFIED_VARIANT_TYPES.contains(&variant.locus.variant_type()) {
                skipped += 1;
                continue;
            }

            let mut counts = BTreeMap::new();
            for &sample in ctx.analysis_type.samples() {
                let table = ctx
                    .tables
                    .get(&sample)
                    .with_context(|| format!("{} table not loaded", sample))?;
                let (ref_idx, alt_idx) = count_cols[&sample];
                let read_counts = match variant.rows.get(&sample) {
                    Some(&row) => ReadCounts::new(
                        parse_count(table.value(row, ref_idx)),
                        parse_count(table.value(row, alt_idx)),
                    ),
                    None => ReadCounts::absent(),
                };
                counts.insert(sample, read_counts);
            }

            rows.push(VariantRow {
                variant: variant_idx,
                counts,
                outcome: None,
            });
        }

        info!(rows = rows.len(), skipped_variant_type = skipped, "vaf_ready");
        ctx.rows = rows;
        ctx.skipped_variant_type = skipped;
        ctx.report.totals.skipped_variant_type = skipped;
        Ok(())
    }
}
