use anyhow::{Context, Result};
use log::{debug, info};

use crate::{
    cli::{OutputFormat, TopArgs},
    io_utils, pipeline, present,
};

pub fn execute(args: &TopArgs) -> Result<()> {
    let output = pipeline::execute(&args.source)?;
    let ranking = present::top_for_category(&output.records, args.category);
    if ranking.is_empty() {
        info!(
            "Type {} is not present in {}; nothing to rank",
            args.category, output.source
        );
    }

    match args.format {
        OutputFormat::Table => {
            println!("Top {} for {}", ranking.len(), args.category);
            print!("{}", present::render_ranking(&ranking));
        }
        OutputFormat::Csv => {
            let mut writer = io_utils::open_csv_writer(None)?;
            present::write_export(&ranking, &mut writer)?;
        }
        OutputFormat::Json => {
            let json = serde_json::to_string_pretty(&ranking).context("Serializing ranking")?;
            println!("{json}");
        }
    }

    if let Some(path) = &args.output {
        if io_utils::is_dash(path) && args.format == OutputFormat::Csv {
            debug!("Export already written to stdout; skipping duplicate");
            return Ok(());
        }
        let mut writer = io_utils::open_csv_writer(Some(path.as_path()))?;
        present::write_export(&ranking, &mut writer)
            .with_context(|| format!("Exporting ranking to {path:?}"))?;
        info!(
            "Exported {} row(s) for {} to {:?}",
            ranking.len(),
            args.category,
            path
        );
    }
    Ok(())
}
