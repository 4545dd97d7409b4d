use crate::{Field, RelationField, ScalarField};

/// In-memory entity definition for one table, ready to be rendered.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GeneratedEntity {
    pub(crate) class_name: String,
    pub(crate) table_name: String,
    pub(crate) fields: Vec<Field>,
}

impl GeneratedEntity {
    pub fn class_name(&self) -> &str {
        &self.class_name
    }

    pub fn table_name(&self) -> &str {
        &self.table_name
    }

    pub fn fields(&self) -> &[Field] {
        &self.fields
    }

    pub fn field(&self, name: &str) -> Option<&Field> {
        self.fields.iter().find(|field| field.name == name)
    }

    pub fn scalars(&self) -> impl Iterator<Item = (&Field, &ScalarField)> {
        self.fields
            .iter()
            .filter_map(|field| field.as_scalar().map(|scalar| (field, scalar)))
    }

    pub fn relations(&self) -> impl Iterator<Item = (&Field, &RelationField)> {
        self.fields
            .iter()
            .filter_map(|field| field.as_relation().map(|relation| (field, relation)))
    }
}
