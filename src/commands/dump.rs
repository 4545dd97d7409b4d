use std::{error::Error, fs};

use crate::{DumpSchemaCommand, TableFilter, commands::init_logging, introspector_for};

/// Write the filtered table descriptors as a pretty-printed JSON snapshot,
/// to `--output` or stdout.
pub async fn run_dump_schema_command(
    command: DumpSchemaCommand,
    verbose: bool,
) -> Result<(), Box<dyn Error>> {
    init_logging(verbose);

    let tables = introspector_for(&command.source)?.list_tables().await?;
    let tables = TableFilter::from_source(&command.source).apply(tables);
    let json = serde_json::to_string_pretty(&tables)?;

    match command.output {
        Some(path) => {
            fs::write(&path, json + "\n")?;
            println!("Wrote {} tables to {}", tables.len(), path.display());
        }
        None => println!("{json}"),
    }
    Ok(())
}
