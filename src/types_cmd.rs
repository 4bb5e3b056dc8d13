//! Listing of the recognized type codes against the loaded table.

use anyhow::Result;
use log::info;

use crate::{category::Category, cli::TypesArgs, pipeline, table};

pub fn execute(args: &TypesArgs) -> Result<()> {
    let output = pipeline::execute(&args.source)?;
    let validated = &output.validation.table;

    let rows = Category::ALL
        .iter()
        .enumerate()
        .map(|(idx, category)| {
            let (present, values, rescaled) = match validated.column(*category) {
                Some(column) => (
                    "yes".to_string(),
                    column.present_count().to_string(),
                    if column.rescaled { "yes" } else { "no" }.to_string(),
                ),
                None => ("no".to_string(), String::new(), String::new()),
            };
            vec![(idx + 1).to_string(), category.to_string(), present, values, rescaled]
        })
        .collect::<Vec<_>>();
    let headers = ["#", "type", "present", "values", "rescaled"]
        .iter()
        .map(|h| h.to_string())
        .collect::<Vec<_>>();
    print!(
        "{}",
        table::render_table(
            &headers,
            &rows,
            &[
                table::Align::Right,
                table::Align::Left,
                table::Align::Left,
                table::Align::Right,
                table::Align::Left,
            ],
        )
    );
    info!(
        "{} of {} type(s) present in {}",
        output.categories().len(),
        Category::ALL.len(),
        output.source
    );
    Ok(())
}
