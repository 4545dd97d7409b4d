mod php;
mod rust;

use crate::{Error, GeneratedEntity};
use std::{
    fs,
    path::{Path, PathBuf},
    str::FromStr,
};
use tracing::info;

#[derive(Clone, Debug)]
pub struct EntityWriter {
    pub(crate) entities: Vec<GeneratedEntity>,
}

pub struct WriterOutput {
    pub files: Vec<OutputFile>,
}

pub struct OutputFile {
    pub name: String,
    pub content: String,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum OutputTarget {
    /// Doctrine ORM entity classes
    #[default]
    Php,
    /// Plain Rust structs with accessors
    Rust,
}

#[derive(Debug)]
pub struct EntityWriterContext {
    pub(crate) target: OutputTarget,
    pub(crate) namespace: String,
    pub(crate) fluent_setters: bool,
}

impl OutputTarget {
    pub fn extension(&self) -> &'static str {
        match self {
            Self::Php => "php",
            Self::Rust => "rs",
        }
    }
}

impl FromStr for OutputTarget {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s {
            "php" => Self::Php,
            "rust" => Self::Rust,
            v => {
                return Err(Error::TransformError(format!(
                    "Unsupported output target '{v}'"
                )));
            }
        })
    }
}

impl EntityWriterContext {
    pub fn new(target: OutputTarget, namespace: String, fluent_setters: bool) -> Self {
        Self {
            target,
            namespace,
            fluent_setters,
        }
    }
}

impl EntityWriter {
    pub fn entities(&self) -> &[GeneratedEntity] {
        &self.entities
    }

    pub fn into_entities(self) -> Vec<GeneratedEntity> {
        self.entities
    }

    pub fn generate(&self, context: &EntityWriterContext) -> WriterOutput {
        let mut files = self.write_entities(context);
        if context.target == OutputTarget::Rust {
            files.push(rust::write_index_file(&self.entities, context));
        }
        WriterOutput { files }
    }

    pub fn write_entities(&self, context: &EntityWriterContext) -> Vec<OutputFile> {
        self.entities
            .iter()
            .map(|entity| {
                let entity_file = format!(
                    "{}.{}",
                    entity.class_name,
                    context.target.extension()
                );
                info!("Generating {}", entity_file);
                for field in entity.fields.iter() {
                    info!("    > {}", field.get_info());
                }

                let content = match context.target {
                    OutputTarget::Php => php::write_entity(entity, context),
                    OutputTarget::Rust => rust::write_entity(entity, context),
                };
                OutputFile {
                    name: entity_file,
                    content,
                }
            })
            .collect()
    }
}

impl WriterOutput {
    /// Write every file into `dir`, creating it first. Existing files are
    /// overwritten; files written before a failure are left in place.
    pub fn write_to<P>(&self, dir: P) -> Result<Vec<PathBuf>, Error>
    where
        P: AsRef<Path>,
    {
        let dir = dir.as_ref();
        if !dir.is_dir() {
            fs::create_dir_all(dir).map_err(|source| Error::DirectoryCreation {
                path: dir.to_path_buf(),
                source,
            })?;
            info!("Created directory {}", dir.display());
        }

        let mut written = Vec::with_capacity(self.files.len());
        for OutputFile { name, content } in self.files.iter() {
            let file_path = dir.join(name);
            info!("Writing {}", file_path.display());
            fs::write(&file_path, content.as_bytes()).map_err(|source| Error::FileWrite {
                path: file_path.clone(),
                source,
            })?;
            written.push(file_path);
        }
        Ok(written)
    }
}

pub(crate) fn write_doc_comment(lines: &mut Vec<String>, prefix: &str) {
    let ver = env!("CARGO_PKG_VERSION");
    lines.push(format!("{prefix} Generated by entigen-codegen {ver}"));
}
