mod column;
mod statement;

pub use column::*;

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Structural snapshot of one table, as reported by schema introspection.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableDescriptor {
    pub name: String,
    pub columns: Vec<ColumnDescriptor>,
    #[serde(default)]
    pub foreign_keys: Vec<ForeignKeyDescriptor>,
    #[serde(default)]
    pub primary_key: BTreeSet<String>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ForeignKeyDescriptor {
    pub local_column: String,
    pub referenced_table: String,
    pub referenced_column: String,
}

impl TableDescriptor {
    pub fn new<T>(name: T) -> Self
    where
        T: Into<String>,
    {
        Self {
            name: name.into(),
            columns: Vec::new(),
            foreign_keys: Vec::new(),
            primary_key: BTreeSet::new(),
        }
    }

    pub fn column(mut self, column: ColumnDescriptor) -> Self {
        self.columns.push(column);
        self
    }

    pub fn primary_key<T>(mut self, column: T) -> Self
    where
        T: Into<String>,
    {
        self.primary_key.insert(column.into());
        self
    }

    pub fn foreign_key<L, T, R>(mut self, local_column: L, referenced_table: T, referenced_column: R) -> Self
    where
        L: Into<String>,
        T: Into<String>,
        R: Into<String>,
    {
        self.foreign_keys.push(ForeignKeyDescriptor {
            local_column: local_column.into(),
            referenced_table: referenced_table.into(),
            referenced_column: referenced_column.into(),
        });
        self
    }

    pub fn is_primary_key(&self, column: &str) -> bool {
        self.primary_key.contains(column)
    }
}
