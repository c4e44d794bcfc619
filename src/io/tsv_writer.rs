use std::io::{BufWriter, Write};
use std::path::Path;

use anyhow::{Context, Result, bail};

use crate::ctx::{Ctx, VariantRow};
use crate::io::maf::MERGE_COLUMNS;

const REFERENCE_ALLELE: &str = "Reference_Allele";
const ALLELE1: &str = "Tumor_Seq_Allele1";
const ALLELE2: &str = "Tumor_Seq_Allele2";

pub fn header(ctx: &Ctx) -> Vec<String> {
    let mut cols = Vec::new();
    if ctx.sample_id.is_some() {
        cols.push(ctx.sample_id_header.clone());
    }
    cols.push("scenario".to_string());
    cols.extend(MERGE_COLUMNS.iter().map(|c| c.to_string()));
    cols.push(REFERENCE_ALLELE.to_string());

    let samples = ctx.analysis_type.samples();
    for sample in samples {
        cols.push(format!("Allele1_{}", sample.printable()));
        cols.push(format!("Allele2_{}", sample.printable()));
    }
    for &sample in samples {
        for extra in ctx.extra_columns.for_sample(sample) {
            cols.push(format!("{}_{}", extra, sample.printable()));
        }
    }
    for sample in samples {
        cols.push(format!("Ref_Read_Count_{}", sample.printable()));
        cols.push(format!("Alt_Read_Count_{}", sample.printable()));
        cols.push(format!("VAF_{}", sample.printable()));
    }
    cols
}

/// Writes classified rows; rows without a scenario are left out.
/// Returns the number of data rows written.
pub fn write_tsv(path: &Path, ctx: &Ctx) -> Result<usize> {
    let file = std::fs::File::create(path)
        .with_context(|| format!("failed to create {}", path.display()))?;
    let mut w = BufWriter::new(file);

    let header = header(ctx);
    writeln!(w, "{}", header.join("\t"))?;

    let mut written = 0usize;
    for row in &ctx.rows {
        let Some(event) = row.scenario() else {
            continue;
        };
        let fields = row_fields(ctx, row, event.as_str())?;
        if fields.len() != header.len() {
            bail!(
                "output row has {} fields but header has {}",
                fields.len(),
                header.len()
            );
        }
        writeln!(w, "{}", fields.join("\t"))?;
        written += 1;
    }
    w.flush()?;

    Ok(written)
}

fn row_fields(ctx: &Ctx, row: &VariantRow, scenario: &str) -> Result<Vec<String>> {
    let variant = ctx
        .variants
        .get(row.variant)
        .context("variant index out of range")?;

    let mut out = Vec::new();
    if let Some(id) = &ctx.sample_id {
        out.push(id.clone());
    }
    out.push(scenario.to_string());
    out.extend(variant.locus.fields.iter().cloned());

    // Reference allele comes from the first sample that called the locus.
    let reference = variant
        .rows
        .iter()
        .find_map(|(sample, &r)| {
            ctx.tables
                .get(sample)
                .and_then(|t| t.value_by_name(r, REFERENCE_ALLELE))
        })
        .unwrap_or("");
    out.push(reference.to_string());

    let samples = ctx.analysis_type.samples();
    for sample in samples {
        let cell = |name: &str| -> String {
            match (ctx.tables.get(sample), variant.rows.get(sample)) {
                (Some(table), Some(&r)) => table.value_by_name(r, name).unwrap_or("").to_string(),
                _ => String::new(),
            }
        };
        out.push(cell(ALLELE1));
        out.push(cell(ALLELE2));
    }
    for sample in samples {
        for extra in ctx.extra_columns.for_sample(*sample) {
            let value = match (ctx.tables.get(sample), variant.rows.get(sample)) {
                (Some(table), Some(&r)) => table.value_by_name(r, extra).unwrap_or(""),
                _ => "",
            };
            out.push(value.to_string());
        }
    }
    for sample in samples {
        let counts = row
            .counts
            .get(sample)
            .with_context(|| format!("read counts missing for {}", sample))?;
        out.push(format!("{}", counts.ref_count));
        out.push(format!("{}", counts.alt_count));
        out.push(format!("{:.6}", counts.vaf));
    }

    Ok(out)
}
