//! Loader → Validator → Ranker, run end to end for one CLI invocation.

use anyhow::Result;
use log::{debug, info, warn};

use crate::{
    category::Category,
    cli::SourceArgs,
    io_utils,
    loader::{self, DataSource, LoadOptions, Loaded, RawTable, Upload},
    printable_delimiter,
    rank::{self, RankedRecord},
    validate::{self, Diagnostic, Validation},
};

#[derive(Debug, Clone)]
pub struct PipelineOutput {
    pub source: DataSource,
    pub validation: Validation,
    pub records: Vec<RankedRecord>,
}

impl PipelineOutput {
    pub fn categories(&self) -> &[Category] {
        &self.validation.categories
    }
}

pub fn load_source(args: &SourceArgs) -> Result<Loaded> {
    let encoding = io_utils::resolve_encoding(args.input_encoding.as_deref())?;
    let options = LoadOptions {
        delimiter: args.delimiter,
        encoding,
    };
    if let Some(delimiter) = args.delimiter {
        debug!("Using delimiter '{}'", printable_delimiter(delimiter));
    }
    let upload = args.upload.as_deref().map(Upload::from_path);
    let loaded = loader::load(Some(args.data.as_path()), upload, &options)?;
    info!(
        "Loaded {} row(s) and {} column(s) from {}",
        loaded.table.row_count(),
        loaded.table.headers().len(),
        loaded.source
    );
    Ok(loaded)
}

/// Validates and ranks `table`, logging every diagnostic.
pub fn process(table: &RawTable) -> Result<(Validation, Vec<RankedRecord>)> {
    let validation = validate::validate(table)?;
    log_diagnostics(&validation.diagnostics);
    let records = rank::rank(&validation.table, &validation.categories);
    info!(
        "Ranked {} record(s) across {} type(s)",
        records.len(),
        validation.categories.len()
    );
    Ok((validation, records))
}

pub fn execute(args: &SourceArgs) -> Result<PipelineOutput> {
    let Loaded { table, source } = load_source(args)?;
    let (validation, records) = process(&table)?;
    Ok(PipelineOutput {
        source,
        validation,
        records,
    })
}

fn log_diagnostics(diagnostics: &[Diagnostic]) {
    for diagnostic in diagnostics {
        match diagnostic {
            Diagnostic::CoercedToMissing { .. } => warn!("{diagnostic}"),
            Diagnostic::Rescaled { .. } => info!("{diagnostic}"),
            Diagnostic::IgnoredColumn { .. } => debug!("{diagnostic}"),
        }
    }
}
