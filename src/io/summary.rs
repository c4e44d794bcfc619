use crate::ctx::Ctx;

pub fn format_summary(ctx: &Ctx) -> String {
    let version = env!("CARGO_PKG_VERSION");
    let samples: Vec<&str> = ctx
        .analysis_type
        .samples()
        .iter()
        .map(|s| s.as_str())
        .collect();

    let mut out = String::new();
    out.push_str(&format!("r2d2-vaf v{}\n", version));
    out.push_str(&format!(
        "Analysis: {} ({})\n",
        ctx.analysis_type,
        samples.join(", ")
    ));
    out.push_str(&format!(
        "Variants: {} merged, {} classified, {} skipped (variant type), {} unmatched\n",
        ctx.variants.len(),
        ctx.stats.classified,
        ctx.skipped_variant_type,
        ctx.stats.no_scenario + ctx.stats.wrong_vaf_values
    ));

    if ctx.stats.scenario_counts.is_empty() {
        out.push_str("Scenarios: none\n");
    } else {
        let counts: Vec<String> = ctx
            .stats
            .scenario_counts
            .iter()
            .map(|(event, n)| format!("{}={}", event, n))
            .collect();
        out.push_str(&format!("Scenarios: {}\n", counts.join(", ")));
    }
    out.push_str(&format!("Output: {}\n", ctx.output.tsv_path.display()));

    out
}
