use anyhow::Result;
use log::info;

use crate::{cli::PreviewArgs, pipeline, present, rank, table};

pub fn execute(args: &PreviewArgs) -> Result<()> {
    let loaded = pipeline::load_source(&args.source)?;
    let (validation, _) = pipeline::process(&loaded.table)?;
    let records = rank::reshape(&validation.table, &validation.categories);

    let rows = records
        .iter()
        .take(args.rows)
        .map(|record| {
            vec![
                record.key.clone(),
                record.category.to_string(),
                record
                    .value
                    .map(present::format_proportion)
                    .unwrap_or_else(|| "<missing>".to_string()),
            ]
        })
        .collect::<Vec<_>>();
    let headers = vec![
        "Country".to_string(),
        "MBTI".to_string(),
        "Proportion".to_string(),
    ];
    print!("{}", table::render_table(&headers, &rows, &[]));
    info!(
        "Displayed {} of {} long-form record(s) from {}",
        rows.len(),
        records.len(),
        loaded.source
    );
    Ok(())
}
