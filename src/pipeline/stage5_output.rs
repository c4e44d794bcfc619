use anyhow::Result;
use tracing::info;

use crate::ctx::Ctx;
use crate::io::{json_writer, tsv_writer};
use crate::pipeline::Stage;

pub struct Stage5Output;

impl Stage5Output {
    pub fn new() -> Self {
        Self
    }
}

impl Stage for Stage5Output {
    fn name(&self) -> &'static str {
        "stage5_output"
    }

    fn run(&self, ctx: &mut Ctx) -> Result<()> {
        ctx.report.warnings = ctx.warnings.clone();

        let written = tsv_writer::write_tsv(&ctx.output.tsv_path, ctx)?;
        info!(
            path = %ctx.output.tsv_path.display(),
            rows = written,
            "scenarios_written"
        );

        if ctx.write_json {
            json_writer::write_json(&ctx.output.json_path, &ctx.report)?;
            info!(path = %ctx.output.json_path.display(), "report_written");
        }
        Ok(())
    }
}
