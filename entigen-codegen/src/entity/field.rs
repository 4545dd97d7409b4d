use crate::{ColumnKind, util::upper_first};

/// Target-neutral property type. Renderers map it to a concrete type.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FieldType {
    Integer,
    String,
    Boolean,
    DateTime,
    Float,
    Array,
    Object,
    Binary,
    /// Fallback for column types without a mapping
    Mixed,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Field {
    pub(crate) name: String,
    pub(crate) kind: FieldKind,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum FieldKind {
    Scalar(ScalarField),
    Relation(RelationField),
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ScalarField {
    pub(crate) column: String,
    pub(crate) column_kind: ColumnKind,
    pub(crate) field_type: FieldType,
    pub(crate) identity: Option<Identity>,
    pub(crate) length: Option<u32>,
    pub(crate) nullable: bool,
}

/// Marks a primary-key field.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Identity {
    pub(crate) generated: bool,
}

/// Many-to-one reference derived from a foreign key.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RelationField {
    pub(crate) target_table: String,
    pub(crate) target_class: String,
    pub(crate) local_column: String,
    pub(crate) referenced_column: String,
}

impl From<&ColumnKind> for FieldType {
    fn from(kind: &ColumnKind) -> Self {
        match kind {
            ColumnKind::Integer | ColumnKind::SmallInt | ColumnKind::BigInt => Self::Integer,
            ColumnKind::String | ColumnKind::Text | ColumnKind::Guid => Self::String,
            ColumnKind::Boolean => Self::Boolean,
            ColumnKind::DateTime | ColumnKind::DateTimeTz | ColumnKind::Date | ColumnKind::Time => {
                Self::DateTime
            }
            ColumnKind::Decimal | ColumnKind::Float => Self::Float,
            ColumnKind::Array | ColumnKind::SimpleArray | ColumnKind::Json => Self::Array,
            ColumnKind::Object => Self::Object,
            ColumnKind::Blob => Self::Binary,
            ColumnKind::Unknown(_) => Self::Mixed,
        }
    }
}

impl Field {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn kind(&self) -> &FieldKind {
        &self.kind
    }

    pub fn as_scalar(&self) -> Option<&ScalarField> {
        match &self.kind {
            FieldKind::Scalar(scalar) => Some(scalar),
            FieldKind::Relation(_) => None,
        }
    }

    pub fn as_relation(&self) -> Option<&RelationField> {
        match &self.kind {
            FieldKind::Relation(relation) => Some(relation),
            FieldKind::Scalar(_) => None,
        }
    }

    pub fn is_relation(&self) -> bool {
        matches!(self.kind, FieldKind::Relation(_))
    }

    /// `createdAt` -> `getCreatedAt`
    pub fn getter_name(&self) -> String {
        format!("get{}", upper_first(&self.name))
    }

    /// `createdAt` -> `setCreatedAt`
    pub fn setter_name(&self) -> String {
        format!("set{}", upper_first(&self.name))
    }

    /// One-line description used in generation logs.
    pub fn get_info(&self) -> String {
        match &self.kind {
            FieldKind::Scalar(scalar) => {
                let mut info = format!(
                    "Column `{}`: {} -> {}",
                    scalar.column, scalar.column_kind, self.name
                );
                if let Some(length) = scalar.length {
                    info.push_str(&format!(", length {length}"));
                }
                if scalar.is_generated() {
                    info.push_str(", primary_key, auto_increment");
                } else if scalar.is_identity() {
                    info.push_str(", primary_key");
                }
                if scalar.nullable {
                    info.push_str(", nullable");
                }
                info
            }
            FieldKind::Relation(relation) => format!(
                "Relation `{}` -> {}.{} as {}",
                relation.local_column, relation.target_table, relation.referenced_column, self.name
            ),
        }
    }
}

impl ScalarField {
    pub fn column(&self) -> &str {
        &self.column
    }

    pub fn column_kind(&self) -> &ColumnKind {
        &self.column_kind
    }

    pub fn field_type(&self) -> FieldType {
        self.field_type
    }

    pub fn is_identity(&self) -> bool {
        self.identity.is_some()
    }

    /// Whether the database generates the value (auto increment).
    pub fn is_generated(&self) -> bool {
        self.identity.is_some_and(|identity| identity.generated)
    }

    pub fn length(&self) -> Option<u32> {
        self.length
    }

    pub fn is_nullable(&self) -> bool {
        self.nullable
    }
}

impl RelationField {
    pub fn target_table(&self) -> &str {
        &self.target_table
    }

    pub fn target_class(&self) -> &str {
        &self.target_class
    }

    pub fn local_column(&self) -> &str {
        &self.local_column
    }

    pub fn referenced_column(&self) -> &str {
        &self.referenced_column
    }
}
