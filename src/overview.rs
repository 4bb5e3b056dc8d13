use anyhow::{Context, Result};
use log::{info, warn};

use crate::{
    cli::{OutputFormat, OverviewArgs},
    io_utils, pipeline, present,
};

pub fn execute(args: &OverviewArgs) -> Result<()> {
    let output = pipeline::execute(&args.source)?;
    for category in &args.types {
        if !output.categories().contains(category) {
            warn!("Type {category} is not present in {}; skipped", output.source);
        }
    }
    let selected = (!args.types.is_empty()).then_some(args.types.as_slice());
    let overview = present::overview(&output.records, output.categories(), selected);

    match args.format {
        OutputFormat::Table => print!("{}", present::render_overview(&overview)),
        OutputFormat::Csv => {
            let records = overview.records().cloned().collect::<Vec<_>>();
            let mut writer = io_utils::open_csv_writer(None)?;
            present::write_export(&records, &mut writer)?;
        }
        OutputFormat::Json => {
            let json =
                serde_json::to_string_pretty(&overview).context("Serializing overview")?;
            println!("{json}");
        }
    }
    info!("Rendered {} panel(s)", overview.panels.len());
    Ok(())
}
