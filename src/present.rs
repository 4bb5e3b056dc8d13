//! Read-only views over ranked records: the selected-type ranking, its CSV
//! export, and the multi-panel overview. Every function here is a pure
//! function of the records and the caller's current selection.

use std::{fmt::Write as _, io::Write};

use anyhow::{Context, Result};
use serde::Serialize;

use crate::{
    category::Category,
    rank::RankedRecord,
    table::{self, Align},
};

pub const EXPORT_HEADERS: [&str; 4] = ["Country", "MBTI", "Proportion", "Rank"];

/// Records for `category`, rank ascending.
pub fn top_for_category(records: &[RankedRecord], category: Category) -> Vec<RankedRecord> {
    let mut selected = records
        .iter()
        .filter(|record| record.category == category)
        .cloned()
        .collect::<Vec<_>>();
    selected.sort_by_key(|record| record.rank);
    selected
}

/// Writes the export CSV (`Country,MBTI,Proportion,Rank`). The header is
/// always written, even when there are no records.
pub fn write_export<W: Write>(records: &[RankedRecord], writer: &mut csv::Writer<W>) -> Result<()> {
    writer
        .write_record(EXPORT_HEADERS)
        .context("Writing export header")?;
    for record in records {
        writer
            .serialize(record)
            .with_context(|| format!("Writing export row for {}", record.key))?;
    }
    writer.flush().context("Flushing export")?;
    Ok(())
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Panel {
    pub category: Category,
    /// Rank ascending, which is value descending with ties in row order.
    pub entries: Vec<RankedRecord>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Overview {
    pub panels: Vec<Panel>,
}

impl Overview {
    pub fn records(&self) -> impl Iterator<Item = &RankedRecord> {
        self.panels.iter().flat_map(|panel| panel.entries.iter())
    }
}

/// One panel per category in `categories` that is also in `selected`
/// (all of `categories` when nothing is selected).
pub fn overview(
    records: &[RankedRecord],
    categories: &[Category],
    selected: Option<&[Category]>,
) -> Overview {
    let panels = categories
        .iter()
        .filter(|category| selected.is_none_or(|chosen| chosen.contains(category)))
        .map(|category| Panel {
            category: *category,
            entries: top_for_category(records, *category),
        })
        .collect();
    Overview { panels }
}

/// Rank / country / proportion table with a bar column scaled to the
/// largest proportion shown.
pub fn render_ranking(records: &[RankedRecord]) -> String {
    let max = records.iter().map(|r| r.value).fold(0.0_f64, f64::max);
    let headers = ["Rank", "Country", "Proportion", ""]
        .iter()
        .map(|h| h.to_string())
        .collect::<Vec<_>>();
    let rows = records
        .iter()
        .map(|record| {
            vec![
                record.rank.to_string(),
                record.key.clone(),
                format_proportion(record.value),
                table::render_bar(record.value, max, table::DEFAULT_BAR_WIDTH),
            ]
        })
        .collect::<Vec<_>>();
    table::render_table(
        &headers,
        &rows,
        &[Align::Right, Align::Left, Align::Right, Align::Left],
    )
}

pub fn render_overview(overview: &Overview) -> String {
    let mut output = String::new();
    for (idx, panel) in overview.panels.iter().enumerate() {
        if idx > 0 {
            output.push('\n');
        }
        let _ = writeln!(output, "== {} ==", panel.category);
        if panel.entries.is_empty() {
            let _ = writeln!(output, "(no ranked entries)");
        } else {
            output.push_str(&render_ranking(&panel.entries));
        }
    }
    output
}

/// Fraction with four decimals plus the percentage, e.g. `0.0450 (4.50%)`.
pub fn format_proportion(value: f64) -> String {
    format!("{value:.4} ({:.2}%)", value * 100.0)
}
