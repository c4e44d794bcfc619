use std::collections::BTreeMap;
use std::sync::Arc;

use anyhow::{Context, Result, bail};
use clap::Parser;
use tracing_subscriber::EnvFilter;

use r2d2_vaf::cli::{Cli, ClassifyArgs, Commands, RulesCommand, RulesShowArgs, RunArgs};
use r2d2_vaf::ctx::{CountColumns, Ctx, ExtraColumns};
use r2d2_vaf::io;
use r2d2_vaf::pipeline::Pipeline;
use r2d2_vaf::pipeline::stage0_scaffold::Stage0Scaffold;
use r2d2_vaf::pipeline::stage1_input::Stage1Input;
use r2d2_vaf::pipeline::stage2_merge::Stage2Merge;
use r2d2_vaf::pipeline::stage3_vaf::Stage3Vaf;
use r2d2_vaf::pipeline::stage4_classify::Stage4Classify;
use r2d2_vaf::pipeline::stage5_output::Stage5Output;
use r2d2_vaf::ruleset::{self, RuleSource};
use r2d2_vaf::scenario::{
    AnalysisType, GermlineBranch, SampleType, ScenarioCalculator, VafValues, analysis_types_for,
};

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Run(args) => handle_run(args)?,
        Commands::Classify(args) => handle_classify(args)?,
        Commands::Rules(args) => match args.command {
            RulesCommand::Show(show) => handle_rules_show(show)?,
        },
        Commands::Validate(args) => {
            let source = RuleSource::File(args.rules);
            let calculator = ruleset::load_calculator(&source)?;
            println!("r2d2-vaf validate ok");
            println!("rules: {}", calculator.rule_count());
            for analysis in calculator.analysis_types() {
                let branches: Vec<String> = GermlineBranch::ALL
                    .iter()
                    .map(|b| (b, calculator.rules_for(analysis, *b).len()))
                    .filter(|(_, n)| *n > 0)
                    .map(|(b, n)| format!("{}={}", b, n))
                    .collect();
                println!("{}\t{}", analysis, branches.join(", "));
            }
        }
    }

    Ok(())
}

fn handle_run(args: RunArgs) -> Result<()> {
    let source = RuleSource::from_arg(args.rules.as_deref());
    let calculator = Arc::new(ruleset::load_calculator(&source)?);

    let present: Vec<SampleType> = SampleType::ALL
        .into_iter()
        .filter(|s| args.input(*s).is_some())
        .collect();

    let analyses = match args.analysis_type {
        Some(forced) => {
            let analysis = AnalysisType::from(forced);
            let missing: Vec<&str> = analysis
                .samples()
                .iter()
                .filter(|s| !present.contains(*s))
                .map(|s| s.as_str())
                .collect();
            if !missing.is_empty() {
                bail!(
                    "analysis {} requires MAFs for: {}",
                    analysis,
                    missing.join(", ")
                );
            }
            vec![analysis]
        }
        None => analysis_types_for(&present),
    };
    if analyses.is_empty() {
        bail!(
            "no analysis can be conducted with the {} MAF file(s) provided",
            present.len()
        );
    }

    for analysis in analyses {
        let inputs: BTreeMap<SampleType, std::path::PathBuf> = analysis
            .samples()
            .iter()
            .filter_map(|s| args.input(*s).map(|p| (*s, p.clone())))
            .collect();

        let mut ctx = Ctx::new(
            analysis,
            inputs,
            args.out.clone(),
            &source.label(),
            args.json,
            env!("CARGO_PKG_VERSION"),
        );
        ctx.threads = args.threads;
        ctx.sample_id = args.sample_id.clone();
        ctx.sample_id_header = args.sample_id_header.clone();
        ctx.extra_columns = extra_columns(&args);
        for &sample in analysis.samples() {
            let defaults = CountColumns::default();
            let (ref_col, alt_col) = args.count_columns(sample);
            ctx.count_columns.insert(
                sample,
                CountColumns {
                    ref_count: ref_col.cloned().unwrap_or(defaults.ref_count),
                    alt_count: alt_col.cloned().unwrap_or(defaults.alt_count),
                },
            );
        }

        let pipeline = Pipeline::new(vec![
            Box::new(Stage0Scaffold::new()),
            Box::new(Stage1Input::new()),
            Box::new(Stage2Merge::new()),
            Box::new(Stage3Vaf::new()),
            Box::new(Stage4Classify::new(Arc::clone(&calculator))),
            Box::new(Stage5Output::new()),
        ]);
        pipeline.run(&mut ctx)?;

        print_summary(&ctx);
    }

    Ok(())
}

fn extra_columns(args: &RunArgs) -> ExtraColumns {
    let mut per_sample = BTreeMap::new();
    for sample in SampleType::ALL {
        let cols = args.sample_extra_columns(sample);
        if !cols.is_empty() {
            per_sample.insert(sample, cols.to_vec());
        }
    }
    ExtraColumns {
        shared: args.extra_columns.clone(),
        per_sample,
    }
}

fn print_summary(ctx: &Ctx) {
    print!("{}", io::summary::format_summary(ctx));
    if !ctx.warnings.is_empty() {
        println!("warnings:");
        for warning in &ctx.warnings {
            println!("- {}", warning);
        }
    }
}

fn handle_classify(args: ClassifyArgs) -> Result<()> {
    let source = RuleSource::from_arg(args.rules.as_deref());
    let calculator = ruleset::load_calculator(&source)?;

    let mut vafs = VafValues::new();
    for (sample, value) in args.vafs {
        if vafs.insert(sample, value).is_some() {
            bail!("VAF for {} given more than once", sample);
        }
    }

    let analysis = AnalysisType::from(args.analysis_type);
    let event = calculator
        .categorize(analysis, &vafs)
        .with_context(|| format!("classification failed for {}", analysis))?;
    println!("{}", event);
    Ok(())
}

fn handle_rules_show(args: RulesShowArgs) -> Result<()> {
    let source = RuleSource::from_arg(args.rules.as_deref());
    let calculator = ruleset::load_calculator(&source)?;
    let only = args.analysis_type.map(AnalysisType::from);

    println!("scenario rules ({}):", source.label());
    for analysis in calculator.analysis_types() {
        if only.is_some_and(|a| a != analysis) {
            continue;
        }
        print_analysis_rules(&calculator, analysis);
    }
    Ok(())
}

fn print_analysis_rules(calculator: &ScenarioCalculator, analysis: AnalysisType) {
    for branch in GermlineBranch::ALL {
        for rule in calculator.rules_for(analysis, branch) {
            let conditions: Vec<String> = rule
                .conditions
                .iter()
                .map(|(sample, cond)| format!("{} {}", sample, cond))
                .collect();
            let conditions = if conditions.is_empty() {
                "*".to_string()
            } else {
                conditions.join("; ")
            };
            println!(
                "{}\t{}\t{}\t{}\t{}",
                analysis, branch, rule.priority, rule.event, conditions
            );
        }
    }
}
