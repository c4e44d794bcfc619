use std::collections::HashMap;
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};

use crate::io::open_maybe_gz;
use crate::scenario::SampleType;

/// Columns that identify a variant across samples.
pub const MERGE_COLUMNS: [&str; 7] = [
    "Hugo_Symbol",
    "Chromosome",
    "Start_position",
    "End_position",
    "Strand",
    "Variant_Classification",
    "Variant_Type",
];

pub const DEFAULT_REF_COUNT_COLUMN: &str = "t_ref_count";
pub const DEFAULT_ALT_COUNT_COLUMN: &str = "t_alt_count";

#[derive(Debug, Clone)]
pub struct MafTable {
    pub sample: SampleType,
    pub path: PathBuf,
    pub columns: Vec<String>,
    pub rows: Vec<Vec<String>>,
    index: HashMap<String, usize>,
}

impl MafTable {
    pub fn new(
        sample: SampleType,
        path: PathBuf,
        columns: Vec<String>,
        rows: Vec<Vec<String>>,
    ) -> Self {
        let mut index = HashMap::new();
        for (i, name) in columns.iter().enumerate() {
            // First column wins on duplicate headers.
            index.entry(name.clone()).or_insert(i);
        }
        Self {
            sample,
            path,
            columns,
            rows,
            index,
        }
    }

    pub fn column(&self, name: &str) -> Option<usize> {
        self.index.get(name).copied()
    }

    pub fn require_column(&self, name: &str) -> Result<usize> {
        match self.column(name) {
            Some(idx) => Ok(idx),
            None => bail!(
                "column {} not found in {} sample ({})",
                name,
                self.sample,
                self.path.display()
            ),
        }
    }

    pub fn value(&self, row: usize, col: usize) -> &str {
        self.rows[row].get(col).map(|s| s.as_str()).unwrap_or("")
    }

    pub fn value_by_name(&self, row: usize, name: &str) -> Option<&str> {
        self.column(name).map(|col| self.value(row, col))
    }
}

/// Reads a tab-separated MAF: `#` lines are skipped and the first remaining
/// line is the header. Every merge column must be present.
pub fn read_maf(path: &Path, sample: SampleType) -> Result<MafTable> {
    let reader = open_maybe_gz(path)
        .with_context(|| format!("failed to open {} MAF {}", sample, path.display()))?;
    let mut reader = BufReader::new(reader);

    let mut columns: Option<Vec<String>> = None;
    let mut rows = Vec::new();
    let mut line = String::new();
    let mut line_no = 0usize;
    while reader.read_line(&mut line)? > 0 {
        line_no += 1;
        let trimmed = line.trim_end_matches(['\n', '\r']);
        if trimmed.trim().is_empty() || trimmed.starts_with('#') {
            line.clear();
            continue;
        }
        let mut fields: Vec<String> = trimmed.split('\t').map(|f| f.trim().to_string()).collect();
        let header_len = match columns.as_ref() {
            Some(header) => header.len(),
            None => {
                columns = Some(fields);
                line.clear();
                continue;
            }
        };
        if fields.len() > header_len {
            bail!(
                "{}:{} row has {} fields but header has {}",
                path.display(),
                line_no,
                fields.len(),
                header_len
            );
        }
        // Trailing empty cells are often dropped by upstream tools.
        fields.resize(header_len, String::new());
        rows.push(fields);
        line.clear();
    }

    let columns = columns.with_context(|| format!("{} MAF {} has no header", sample, path.display()))?;
    let table = MafTable::new(sample, path.to_path_buf(), columns, rows);
    for name in MERGE_COLUMNS {
        if table.column(name).is_none() {
            bail!(
                "merge column {} not found in {} sample ({})",
                name,
                sample,
                path.display()
            );
        }
    }

    Ok(table)
}
