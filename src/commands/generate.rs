use entigen_codegen::{
    DuplicateRelationPolicy, EntityTransformer, EntityWriterContext, OutputTarget,
};
use std::{error::Error, path::Path, process::Command, str::FromStr};
use tracing::warn;

use crate::{
    DEFAULT_NAMESPACE, DEFAULT_OUTPUT_DIR, GenerateEntitiesCommand, TableFilter,
    commands::init_logging, introspector_for, prompt::value_or_prompt,
};

/// Generate the entity files and return the names of the generated entities.
pub async fn run_generate_entities_command(
    command: GenerateEntitiesCommand,
    verbose: bool,
) -> Result<Vec<String>, Box<dyn Error>> {
    init_logging(verbose);

    let interactive = !command.non_interactive;
    let namespace = value_or_prompt(
        command.namespace,
        interactive,
        "Entity namespace",
        DEFAULT_NAMESPACE,
    )?;
    if namespace.trim().is_empty() {
        return Err("Entity namespace must not be empty".into());
    }
    let output_dir = value_or_prompt(
        command.dir.map(|dir| dir.display().to_string()),
        interactive,
        "Output directory",
        DEFAULT_OUTPUT_DIR,
    )?;
    let target = OutputTarget::from_str(&command.target)?;
    let policy = DuplicateRelationPolicy::from_str(&command.on_duplicate_relation)?;

    let tables = introspector_for(&command.source)?.list_tables().await?;
    let tables = TableFilter::from_source(&command.source).apply(tables);

    let writer = EntityTransformer::transform(&tables, policy)?;
    let context = EntityWriterContext::new(target, namespace, !command.no_fluent_setters);
    let output = writer.generate(&context);

    let paths = output.write_to(Path::new(&output_dir))?;

    if target == OutputTarget::Rust {
        for path in paths.iter() {
            format_file(path);
        }
    }

    let entities: Vec<String> = writer
        .entities()
        .iter()
        .map(|entity| entity.class_name().to_owned())
        .collect();
    println!("... Done. Generated entities:");
    for entity in entities.iter() {
        println!("  - {entity}");
    }
    Ok(entities)
}

/// Run rustfmt over one generated file, warning when it fails.
fn format_file(path: &Path) {
    match Command::new("rustfmt").arg(path).status() {
        Ok(status) if status.success() => {}
        Ok(status) => warn!("rustfmt failed on `{}`: {status}", path.display()),
        Err(e) => warn!("Cannot run rustfmt on `{}`: {e}", path.display()),
    }
}
