use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

use crate::category::Category;

pub const DEFAULT_DATA_FILE: &str = "countriesMBTI_16types.csv";

#[derive(Debug, Parser)]
#[command(author, version, about = "Rank countries by MBTI type proportion", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Show the top 10 countries for one type and optionally export them as CSV
    Top(TopArgs),
    /// Show the top 10 countries for several types, one panel per type
    Overview(OverviewArgs),
    /// List the 16 recognized type codes and how each was loaded
    Types(TypesArgs),
    /// Preview the normalized long-form records before ranking
    Preview(PreviewArgs),
}

#[derive(Debug, Clone, Args)]
pub struct SourceArgs {
    /// Default table location; used whenever it can be opened
    #[arg(long = "data", env = "MBTI_ATLAS_DATA", default_value = DEFAULT_DATA_FILE)]
    pub data: PathBuf,
    /// Fallback table used when the default file is unavailable (`-` for stdin)
    #[arg(short = 'u', long = "upload")]
    pub upload: Option<PathBuf>,
    /// CSV delimiter character (supports ',', 'tab', ';', '|')
    #[arg(long, value_parser = parse_delimiter)]
    pub delimiter: Option<u8>,
    /// Character encoding of the input table (defaults to utf-8)
    #[arg(long = "input-encoding")]
    pub input_encoding: Option<String>,
}

#[derive(Debug, Clone, Copy, ValueEnum, PartialEq, Eq, Default)]
#[value(rename_all = "kebab-case")]
pub enum OutputFormat {
    #[default]
    Table,
    Csv,
    Json,
}

#[derive(Debug, Args)]
pub struct TopArgs {
    #[command(flatten)]
    pub source: SourceArgs,
    /// Type code to rank, e.g. INFJ (case-insensitive)
    #[arg(short = 't', long = "type", value_parser = parse_category)]
    pub category: Category,
    /// Write the ranking as CSV (Country,MBTI,Proportion,Rank) to this path (`-` for stdout)
    #[arg(short = 'o', long = "output")]
    pub output: Option<PathBuf>,
    /// Format for the ranking printed to stdout
    #[arg(long, value_enum, default_value_t = OutputFormat::Table)]
    pub format: OutputFormat,
}

#[derive(Debug, Args)]
pub struct OverviewArgs {
    #[command(flatten)]
    pub source: SourceArgs,
    /// Comma-separated type codes to show (defaults to every recognized type)
    #[arg(long = "types", value_delimiter = ',', value_parser = parse_category)]
    pub types: Vec<Category>,
    /// Format for the overview printed to stdout
    #[arg(long, value_enum, default_value_t = OutputFormat::Table)]
    pub format: OutputFormat,
}

#[derive(Debug, Args)]
pub struct TypesArgs {
    #[command(flatten)]
    pub source: SourceArgs,
}

#[derive(Debug, Args)]
pub struct PreviewArgs {
    #[command(flatten)]
    pub source: SourceArgs,
    /// Number of long-form records to display
    #[arg(long, default_value_t = 10)]
    pub rows: usize,
}

pub fn parse_category(value: &str) -> Result<Category, String> {
    value.parse::<Category>().map_err(|err| err.to_string())
}

pub fn parse_delimiter(value: &str) -> Result<u8, String> {
    match value {
        "tab" | "\t" => Ok(b'\t'),
        "comma" | "," => Ok(b','),
        "|" | "pipe" => Ok(b'|'),
        ";" | "semicolon" => Ok(b';'),
        other => {
            let mut chars = other.chars();
            let first = chars
                .next()
                .ok_or_else(|| "Delimiter cannot be empty".to_string())?;
            if chars.next().is_some() {
                return Err("Delimiter must be a single character".to_string());
            }
            if !first.is_ascii() {
                return Err("Delimiter must be ASCII".to_string());
            }
            Ok(first as u8)
        }
    }
}
