use std::collections::BTreeMap;

use anyhow::{Context, Result};
use tracing::info;

use crate::ctx::Ctx;
use crate::io::maf::read_maf;
use crate::pipeline::Stage;
use crate::schema::v1::SampleInput;

pub struct Stage1Input;

impl Stage1Input {
    pub fn new() -> Self {
        Self
    }
}

impl Stage for Stage1Input {
    fn name(&self) -> &'static str {
        "stage1_input"
    }

    fn run(&self, ctx: &mut Ctx) -> Result<()> {
        let mut tables = BTreeMap::new();
        let mut inputs = Vec::new();

        for &sample in ctx.analysis_type.samples() {
            let path = ctx.inputs.get(&sample).with_context(|| {
                format!(
                    "analysis {} requires a {} MAF",
                    ctx.analysis_type, sample
                )
            })?;
            let table = read_maf(path, sample)?;

            let counts = ctx.count_columns_for(sample);
            table.require_column(&counts.ref_count)?;
            table.require_column(&counts.alt_count)?;
            for extra in ctx.extra_columns.for_sample(sample) {
                table.require_column(extra)?;
            }

            info!(
                sample = %sample,
                path = %path.display(),
                rows = table.rows.len(),
                "maf_loaded"
            );
            inputs.push(SampleInput {
                sample_type: sample,
                path: path.display().to_string(),
                rows: table.rows.len() as u64,
                ref_count_column: counts.ref_count,
                alt_count_column: counts.alt_count,
            });
            tables.insert(sample, table);
        }

        ctx.tables = tables;
        ctx.report.inputs = inputs;
        Ok(())
    }
}
