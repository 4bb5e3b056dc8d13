//! Wide-to-long reshape and per-category top-N ranking.

use std::cmp::Ordering;

use itertools::Itertools;
use serde::{Deserialize, Serialize};

use crate::{category::Category, validate::ValidatedTable};

pub const TOP_N: usize = 10;

/// One (row, category) cell of the validated table.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LongRecord {
    pub key: String,
    pub category: Category,
    pub value: Option<f64>,
}

/// A ranked entry. Field names double as the export CSV header.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RankedRecord {
    #[serde(rename = "Country")]
    pub key: String,
    #[serde(rename = "MBTI")]
    pub category: Category,
    #[serde(rename = "Proportion")]
    pub value: f64,
    #[serde(rename = "Rank")]
    pub rank: usize,
}

/// Emits one record per (row, category), category-major, rows in table order.
/// Missing values are kept.
pub fn reshape(table: &ValidatedTable, categories: &[Category]) -> Vec<LongRecord> {
    categories
        .iter()
        .filter_map(|category| table.column(*category))
        .flat_map(|column| {
            table
                .keys()
                .iter()
                .zip(&column.values)
                .map(|(key, value)| LongRecord {
                    key: key.clone(),
                    category: column.category,
                    value: *value,
                })
        })
        .collect()
}

/// Top [`TOP_N`] rows per category, grouped by category in the order given.
pub fn rank(table: &ValidatedTable, categories: &[Category]) -> Vec<RankedRecord> {
    rank_long(reshape(table, categories), categories, TOP_N)
}

/// Ranks already-reshaped records. Within a category the sort is stable, so
/// equal values keep their reshape order.
pub fn rank_long(records: Vec<LongRecord>, categories: &[Category], limit: usize) -> Vec<RankedRecord> {
    let mut groups = records
        .into_iter()
        .filter_map(|record| record.value.map(|value| (record.category, record.key, value)))
        .into_group_map_by(|(category, _, _)| *category);

    let mut ranked = Vec::new();
    for category in categories.iter().unique() {
        let Some(mut entries) = groups.remove(category) else {
            continue;
        };
        entries.sort_by(|a, b| b.2.partial_cmp(&a.2).unwrap_or(Ordering::Equal));
        ranked.extend(
            entries
                .into_iter()
                .take(limit)
                .enumerate()
                .map(|(position, (category, key, value))| RankedRecord {
                    key,
                    category,
                    value,
                    rank: position + 1,
                }),
        );
    }
    ranked
}
