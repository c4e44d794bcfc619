use std::collections::HashSet;
use std::path::Path;

use anyhow::{Context, Result, bail};

use crate::scenario::rules::RuleSection;

pub fn load_builtin_v1() -> Result<Vec<RuleSection>> {
    let content = include_str!("../../assets/scenarios_v1.ini");
    parse_rules_ini(content, "built-in v1")
}

pub fn load_rules_ini(path: &Path) -> Result<Vec<RuleSection>> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read rules file {}", path.display()))?;
    parse_rules_ini(&content, &path.display().to_string())
}

/// Parses INI-style rule sections, keeping file order for both sections and
/// entries. The first `=` or `:` on an entry line splits key from value, so
/// `dna_normal = = 0.0 0.0` keeps the range comparator in the value.
pub fn parse_rules_ini(content: &str, source: &str) -> Result<Vec<RuleSection>> {
    let mut sections: Vec<RuleSection> = Vec::new();
    let mut seen: HashSet<String> = HashSet::new();

    for (idx, line) in content.lines().enumerate() {
        let line_no = idx + 1;
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') || trimmed.starts_with(';') {
            continue;
        }

        if let Some(rest) = trimmed.strip_prefix('[') {
            let name = rest
                .strip_suffix(']')
                .ok_or_else(|| anyhow::anyhow!("{}:{} unterminated section header", source, line_no))?
                .trim();
            if name.is_empty() {
                bail!("{}:{} empty section name", source, line_no);
            }
            if !seen.insert(name.to_string()) {
                bail!("{}:{} duplicate section [{}]", source, line_no, name);
            }
            sections.push(RuleSection::new(name, Vec::new()));
            continue;
        }

        let split_at = trimmed
            .find(['=', ':'])
            .ok_or_else(|| anyhow::anyhow!("{}:{} expected 'key = value'", source, line_no))?;
        let key = trimmed[..split_at].trim().to_ascii_lowercase();
        let value = trimmed[split_at + 1..].trim();
        if key.is_empty() {
            bail!("{}:{} empty key", source, line_no);
        }

        let section = match sections.last_mut() {
            Some(s) => s,
            None => bail!("{}:{} entry outside of any section", source, line_no),
        };
        if section.entries.iter().any(|(k, _)| *k == key) {
            bail!(
                "{}:{} duplicate key '{}' in section [{}]",
                source,
                line_no,
                key,
                section.name
            );
        }
        section.entries.push((key, value.to_string()));
    }

    Ok(sections)
}
