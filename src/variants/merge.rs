use std::collections::{BTreeMap, HashMap};

use crate::io::maf::{MERGE_COLUMNS, MafTable};
use crate::scenario::SampleType;

/// Merge-column values in `MERGE_COLUMNS` order.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Locus {
    pub fields: Vec<String>,
}

impl Locus {
    pub fn hugo_symbol(&self) -> &str {
        &self.fields[0]
    }

    pub fn variant_type(&self) -> &str {
        &self.fields[6]
    }
}

#[derive(Debug, Clone)]
pub struct MergedVariant {
    pub locus: Locus,
    /// Row index into each sample's table; absent when the sample has no call here.
    pub rows: BTreeMap<SampleType, usize>,
}

#[derive(Debug, Clone, Default)]
pub struct MergeResult {
    pub variants: Vec<MergedVariant>,
    pub warnings: Vec<String>,
}

/// Outer-joins the sample tables on the merge columns.
///
/// Output order is first appearance, scanning samples in canonical order.
/// A locus repeated inside one file keeps its first row.
pub fn merge_tables(tables: &BTreeMap<SampleType, MafTable>) -> MergeResult {
    let mut index: HashMap<Locus, usize> = HashMap::new();
    let mut result = MergeResult::default();

    for (sample, table) in tables {
        let cols: Vec<Option<usize>> = MERGE_COLUMNS.iter().map(|c| table.column(c)).collect();
        for row in 0..table.rows.len() {
            let locus = Locus {
                fields: cols
                    .iter()
                    .map(|c| c.map(|i| table.value(row, i).to_string()).unwrap_or_default())
                    .collect(),
            };

            let slot = match index.get(&locus) {
                Some(&slot) => slot,
                None => {
                    let slot = result.variants.len();
                    index.insert(locus.clone(), slot);
                    result.variants.push(MergedVariant {
                        locus,
                        rows: BTreeMap::new(),
                    });
                    slot
                }
            };

            let variant = &mut result.variants[slot];
            if let Some(first) = variant.rows.get(sample) {
                result.warnings.push(format!(
                    "duplicate locus {} in {} sample at row {} (kept first at row {})",
                    variant.locus.fields.join(":"),
                    sample,
                    row + 1,
                    first + 1
                ));
            } else {
                variant.rows.insert(*sample, row);
            }
        }
    }

    result
}
