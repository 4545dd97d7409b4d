mod entity;
mod error;
mod schema;
mod util;

pub use entity::*;
pub use error::*;
pub use schema::*;

use std::path::Path;

/// Generate one PHP/Doctrine entity file per table into `output_dir`.
///
/// This is the one-call form of [`EntityTransformer::transform`],
/// [`EntityWriter::generate`] and [`WriterOutput::write_to`] with default
/// options. The returned entities are in input order.
pub fn generate<P>(
    tables: &[TableDescriptor],
    namespace: &str,
    output_dir: P,
) -> Result<Vec<GeneratedEntity>, Error>
where
    P: AsRef<Path>,
{
    let writer = EntityTransformer::transform(tables, DuplicateRelationPolicy::default())?;
    let context = EntityWriterContext::new(OutputTarget::Php, namespace.to_owned(), true);
    writer.generate(&context).write_to(output_dir)?;
    Ok(writer.into_entities())
}
