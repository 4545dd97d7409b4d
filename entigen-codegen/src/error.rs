use std::{io, path::PathBuf};

#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The output directory is unusable, e.g. the path names an existing file
    #[error("Cannot create output directory `{}`: {source}", path.display())]
    DirectoryCreation {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    /// The source database could not be reached or its schema listed
    #[error("Cannot read database schema: {0}")]
    SchemaIntrospection(String),
    #[error("Cannot write `{}`: {source}", path.display())]
    FileWrite {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    /// Two fields of one entity derived the same property name
    #[error("Ambiguous property `{property}` on table `{table}`")]
    AmbiguousProperty { table: String, property: String },
    /// Two tables derived the same class name
    #[error("Table `{table}` maps to class `{class_name}`, which another table already uses")]
    AmbiguousEntity { table: String, class_name: String },
    #[error("{0}")]
    TransformError(String),
}
