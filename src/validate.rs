//! Validation and normalization of a [`RawTable`].
//!
//! Produces a new [`ValidatedTable`] holding the key column and one numeric
//! column per recognized type code. The raw table is never modified.
//!
//! Cells that do not parse as finite numbers become missing values and are
//! reported as diagnostics. A column left with no numeric value at all rejects the run.
//!
//! Each column then goes through the percentage heuristic: when strictly more
//! than half of its present values are strictly greater than 1, the column is
//! assumed to hold percentages and every value is divided by 100. This is an
//! approximation; mixed-scale columns can be misclassified, and a column with
//! exactly half of its values above 1 is left alone.

use std::fmt;

use serde::Serialize;

use crate::{category::Category, error::PipelineError, loader::RawTable};

pub const KEY_COLUMN: &str = "Country";

const RESCALE_MIN_FRACTION: f64 = 0.5;
const PERCENT_DIVISOR: f64 = 100.0;
const MAX_REPORTED_CELLS: usize = 5;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategoryColumn {
    pub category: Category,
    pub values: Vec<Option<f64>>,
    pub rescaled: bool,
}

impl CategoryColumn {
    pub fn present_count(&self) -> usize {
        self.values.iter().filter(|value| value.is_some()).count()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ValidatedTable {
    keys: Vec<String>,
    columns: Vec<CategoryColumn>,
}

impl ValidatedTable {
    pub fn keys(&self) -> &[String] {
        &self.keys
    }

    pub fn columns(&self) -> &[CategoryColumn] {
        &self.columns
    }

    pub fn column(&self, category: Category) -> Option<&CategoryColumn> {
        self.columns.iter().find(|column| column.category == category)
    }

    pub fn row_count(&self) -> usize {
        self.keys.len()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Diagnostic {
    /// Non-empty cells that failed numeric coercion. `rows` holds 1-based
    /// file line numbers (header is line 1) of the first few offenders.
    CoercedToMissing {
        category: Category,
        count: usize,
        rows: Vec<usize>,
        samples: Vec<String>,
    },
    Rescaled {
        category: Category,
        fraction_above_one: f64,
    },
    IgnoredColumn {
        column: String,
    },
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Diagnostic::CoercedToMissing {
                category,
                count,
                rows,
                samples,
            } => {
                let lines = rows
                    .iter()
                    .map(ToString::to_string)
                    .collect::<Vec<_>>()
                    .join(", ");
                write!(
                    f,
                    "Column '{category}': {count} non-numeric cell(s) treated as missing (lines {lines}; e.g. {:?})",
                    samples
                )
            }
            Diagnostic::Rescaled {
                category,
                fraction_above_one,
            } => write!(
                f,
                "Column '{category}' looks like percentages ({:.0}% of values > 1); divided by 100",
                fraction_above_one * 100.0
            ),
            Diagnostic::IgnoredColumn { column } => {
                write!(f, "Column '{column}' is not a recognized type code; ignored")
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Validation {
    pub table: ValidatedTable,
    /// Recognized categories in canonical order.
    pub categories: Vec<Category>,
    pub diagnostics: Vec<Diagnostic>,
}

pub fn validate(raw: &RawTable) -> Result<Validation, PipelineError> {
    let key_index = raw
        .column_index(KEY_COLUMN)
        .ok_or_else(|| PipelineError::MissingKeyColumn {
            column: KEY_COLUMN.to_string(),
        })?;

    let recognized = Category::ALL
        .into_iter()
        .filter_map(|category| {
            raw.column_index(category.code())
                .map(|column_index| (category, column_index))
        })
        .collect::<Vec<_>>();
    if recognized.is_empty() {
        return Err(PipelineError::NoRecognizedCategories);
    }

    let mut diagnostics = raw
        .headers()
        .iter()
        .filter(|header| header.as_str() != KEY_COLUMN && Category::from_header(header).is_none())
        .map(|header| Diagnostic::IgnoredColumn {
            column: header.clone(),
        })
        .collect::<Vec<_>>();

    let mut columns = Vec::with_capacity(recognized.len());
    let mut unusable = Vec::new();
    for (category, column_index) in recognized {
        let (column, failures) = coerce_column(raw, category, column_index);
        if let Some(diagnostic) = failures {
            diagnostics.push(diagnostic);
        }
        if column.present_count() == 0 {
            unusable.push(category.code().to_string());
            continue;
        }
        columns.push(column);
    }
    if !unusable.is_empty() {
        return Err(PipelineError::UnusableColumn { columns: unusable });
    }

    for column in &mut columns {
        if let Some(fraction_above_one) = rescale_if_percent(column) {
            diagnostics.push(Diagnostic::Rescaled {
                category: column.category,
                fraction_above_one,
            });
        }
    }

    let keys = (0..raw.row_count())
        .map(|row| raw.cell(row, key_index).to_string())
        .collect();
    let categories = columns.iter().map(|column| column.category).collect();
    Ok(Validation {
        table: ValidatedTable { keys, columns },
        categories,
        diagnostics,
    })
}

/// Parses a single cell. Empty cells, non-finite numbers (`NaN`, `inf`,
/// overflowing literals) and anything unparsable are missing.
pub fn coerce_cell(raw: &str) -> Option<f64> {
    raw.trim()
        .parse::<f64>()
        .ok()
        .filter(|value| value.is_finite())
}

fn coerce_column(
    raw: &RawTable,
    category: Category,
    column_index: usize,
) -> (CategoryColumn, Option<Diagnostic>) {
    let mut values = Vec::with_capacity(raw.row_count());
    let mut count = 0usize;
    let mut rows = Vec::new();
    let mut samples = Vec::new();
    for row in 0..raw.row_count() {
        let cell = raw.cell(row, column_index);
        let trimmed = cell.trim();
        let value = coerce_cell(trimmed);
        if value.is_none() && !trimmed.is_empty() {
            count += 1;
            if rows.len() < MAX_REPORTED_CELLS {
                rows.push(row + 2);
                samples.push(trimmed.to_string());
            }
        }
        values.push(value);
    }
    let diagnostic = (count > 0).then(|| Diagnostic::CoercedToMissing {
        category,
        count,
        rows,
        samples,
    });
    (
        CategoryColumn {
            category,
            values,
            rescaled: false,
        },
        diagnostic,
    )
}

/// Applies the percentage heuristic in place on a freshly built column and
/// returns the observed fraction when the column was rescaled.
fn rescale_if_percent(column: &mut CategoryColumn) -> Option<f64> {
    let fraction = fraction_above_one(&column.values)?;
    if fraction <= RESCALE_MIN_FRACTION {
        return None;
    }
    for value in column.values.iter_mut().flatten() {
        *value /= PERCENT_DIVISOR;
    }
    column.rescaled = true;
    Some(fraction)
}

/// Share of present values strictly greater than 1, or `None` when the
/// column has no present values.
pub fn fraction_above_one(values: &[Option<f64>]) -> Option<f64> {
    let (present, above) = values
        .iter()
        .flatten()
        .fold((0usize, 0usize), |(present, above), value| {
            (present + 1, above + usize::from(*value > 1.0))
        });
    (present > 0).then(|| above as f64 / present as f64)
}
