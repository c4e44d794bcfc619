use std::sync::Arc;

use anyhow::Result;
use tracing::{info, warn};

use crate::ctx::{ClassifyStats, Ctx, VariantRow};
use crate::pipeline::Stage;
use crate::scenario::calculator::format_vafs;
use crate::scenario::{AnalysisType, Event, ScenarioCalculator, ScenarioError};

#[cfg(feature = "mt")]
use rayon::prelude::*;

pub struct Stage4Classify {
    calculator: Arc<ScenarioCalculator>,
}

impl Stage4Classify {
    pub fn new(calculator: Arc<ScenarioCalculator>) -> Self {
        Self { calculator }
    }
}

impl Stage for Stage4Classify {
    fn name(&self) -> &'static str {
        "stage4_classify"
    }

    fn run(&self, ctx: &mut Ctx) -> Result<()> {
        let outcomes = classify_rows(&self.calculator, ctx.analysis_type, &ctx.rows, ctx.threads)?;

        let mut stats = ClassifyStats::default();
        for (row, outcome) in ctx.rows.iter_mut().zip(outcomes) {
            match &outcome {
                Ok(event) => {
                    stats.classified += 1;
                    *stats.scenario_counts.entry(*event).or_insert(0) += 1;
                }
                Err(err @ ScenarioError::NoScenario { .. }) => {
                    stats.no_scenario += 1;
                    let locus = &ctx.variants[row.variant].locus;
                    warn!(
                        locus = %locus.fields.join(":"),
                        vafs = %format_vafs(&row.vafs()),
                        error = %err,
                        "no scenario for variant"
                    );
                }
                Err(err) => {
                    stats.wrong_vaf_values += 1;
                    warn!(error = %err, "variant skipped");
                }
            }
            row.outcome = Some(outcome);
        }

        info!(
            analysis = %ctx.analysis_type,
            classified = stats.classified,
            no_scenario = stats.no_scenario,
            "classify_done"
        );

        ctx.report.totals.classified = stats.classified;
        ctx.report.totals.no_scenario = stats.no_scenario;
        ctx.report.totals.wrong_vaf_values = stats.wrong_vaf_values;
        ctx.report.scenario_counts = stats
            .scenario_counts
            .iter()
            .map(|(event, n)| (event.to_string(), *n))
            .collect();
        ctx.stats = stats;
        Ok(())
    }
}

/// Classifies every row, preserving input order.
fn classify_rows(
    calculator: &ScenarioCalculator,
    analysis: AnalysisType,
    rows: &[VariantRow],
    threads: usize,
) -> Result<Vec<Result<Event, ScenarioError>>> {
    #[cfg(feature = "mt")]
    {
        if threads != 1 {
            let pool = rayon::ThreadPoolBuilder::new()
                .num_threads(threads)
                .build()
                .map_err(|e| anyhow::anyhow!("failed to build thread pool: {}", e))?;
            return Ok(pool.install(|| {
                rows.par_iter()
                    .map(|row| calculator.categorize(analysis, &row.vafs()))
                    .collect()
            }));
        }
    }
    #[cfg(not(feature = "mt"))]
    let _ = threads;

    Ok(rows
        .iter()
        .map(|row| calculator.categorize(analysis, &row.vafs()))
        .collect())
}
