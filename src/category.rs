//! The closed set of sixteen type codes recognized as category columns.
//!
//! Order matters: [`Category::ALL`] is the canonical display order, and every
//! stage that reports categories (validation, ranking, overview panels)
//! preserves it.

use std::{fmt, str::FromStr};

use anyhow::{Result, anyhow};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Category {
    Infj,
    Isfj,
    Intp,
    Isfp,
    Entp,
    Infp,
    Entj,
    Istp,
    Intj,
    Esfp,
    Estj,
    Enfp,
    Estp,
    Istj,
    Enfj,
    Esfj,
}

impl Category {
    pub const ALL: [Category; 16] = [
        Category::Infj,
        Category::Isfj,
        Category::Intp,
        Category::Isfp,
        Category::Entp,
        Category::Infp,
        Category::Entj,
        Category::Istp,
        Category::Intj,
        Category::Esfp,
        Category::Estj,
        Category::Enfp,
        Category::Estp,
        Category::Istj,
        Category::Enfj,
        Category::Esfj,
    ];

    /// Column header for this category, exactly as it must appear in input.
    pub fn code(self) -> &'static str {
        match self {
            Category::Infj => "INFJ",
            Category::Isfj => "ISFJ",
            Category::Intp => "INTP",
            Category::Isfp => "ISFP",
            Category::Entp => "ENTP",
            Category::Infp => "INFP",
            Category::Entj => "ENTJ",
            Category::Istp => "ISTP",
            Category::Intj => "INTJ",
            Category::Esfp => "ESFP",
            Category::Estj => "ESTJ",
            Category::Enfp => "ENFP",
            Category::Estp => "ESTP",
            Category::Istj => "ISTJ",
            Category::Enfj => "ENFJ",
            Category::Esfj => "ESFJ",
        }
    }

    /// Exact, case-sensitive header match.
    pub fn from_header(header: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|category| category.code() == header)
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for Category {
    type Err = anyhow::Error;

    fn from_str(value: &str) -> Result<Self> {
        let trimmed = value.trim();
        Self::ALL
            .into_iter()
            .find(|category| category.code().eq_ignore_ascii_case(trimmed))
            .ok_or_else(|| anyhow!("Unknown type code '{value}'"))
    }
}
