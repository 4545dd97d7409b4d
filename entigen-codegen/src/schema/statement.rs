use crate::{
    ColumnDescriptor, ColumnKind, Error, ForeignKeyDescriptor, TableDescriptor,
    util::unpack_table_ref,
};
use sea_query::{ColumnDef, ColumnSpec, ColumnType, StringLen, TableCreateStatement};
use tracing::warn;

impl TryFrom<&TableCreateStatement> for TableDescriptor {
    type Error = Error;

    fn try_from(table_create: &TableCreateStatement) -> Result<Self, Self::Error> {
        let name = table_create
            .get_table_name()
            .and_then(unpack_table_ref)
            .ok_or_else(|| Error::TransformError("Table name should not be empty".into()))?;

        let mut table = TableDescriptor::new(name);
        for col_def in table_create.get_columns().iter() {
            let primary_key = col_def
                .get_column_spec()
                .iter()
                .any(|spec| matches!(spec, ColumnSpec::PrimaryKey));
            if primary_key {
                table.primary_key.insert(col_def.get_column_name());
            }
        }
        table.primary_key.extend(
            table_create
                .get_indexes()
                .iter()
                .filter(|index| index.is_primary_key())
                .flat_map(|index| index.get_index_spec().get_column_names()),
        );

        for col_def in table_create.get_columns().iter() {
            let mut column = ColumnDescriptor::try_from(col_def)?;
            if table.is_primary_key(&column.name) {
                column.nullable = false;
            }
            table.columns.push(column);
        }

        for fk_create in table_create.get_foreign_key_create_stmts().iter() {
            let tbl_fk = fk_create.get_foreign_key();
            let referenced_table = tbl_fk
                .get_ref_table()
                .and_then(unpack_table_ref)
                .ok_or_else(|| {
                    Error::TransformError(format!(
                        "Foreign key on table `{}` has no referenced table",
                        table.name
                    ))
                })?;
            let columns = tbl_fk.get_columns();
            let ref_columns = tbl_fk.get_ref_columns();
            let (Some(local_column), Some(referenced_column)) =
                (columns.first(), ref_columns.first())
            else {
                return Err(Error::TransformError(format!(
                    "Foreign key on table `{}` has no columns",
                    table.name
                )));
            };
            if columns.len() > 1 {
                warn!(
                    "Composite foreign key {}.({}) -> {}: only `{}` is mapped",
                    table.name,
                    columns.join(", "),
                    referenced_table,
                    local_column
                );
            }
            table.foreign_keys.push(ForeignKeyDescriptor {
                local_column: local_column.clone(),
                referenced_table,
                referenced_column: referenced_column.clone(),
            });
        }

        Ok(table)
    }
}

impl TryFrom<&ColumnDef> for ColumnDescriptor {
    type Error = Error;

    fn try_from(col_def: &ColumnDef) -> Result<Self, Self::Error> {
        let name = col_def.get_column_name();
        let col_type = col_def.get_column_type().ok_or_else(|| {
            Error::TransformError(format!("Column `{name}` has no column type"))
        })?;
        let specs = col_def.get_column_spec();
        let nullable = !specs
            .iter()
            .any(|spec| matches!(spec, ColumnSpec::NotNull | ColumnSpec::PrimaryKey));
        let autoincrement = specs
            .iter()
            .any(|spec| matches!(spec, ColumnSpec::AutoIncrement));
        Ok(Self {
            name,
            kind: column_kind(col_type),
            nullable,
            length: column_length(col_type),
            autoincrement,
        })
    }
}

fn column_kind(col_type: &ColumnType) -> ColumnKind {
    match col_type {
        ColumnType::TinyInteger
        | ColumnType::Integer
        | ColumnType::TinyUnsigned
        | ColumnType::Unsigned => ColumnKind::Integer,
        ColumnType::SmallInteger | ColumnType::SmallUnsigned => ColumnKind::SmallInt,
        ColumnType::BigInteger | ColumnType::BigUnsigned => ColumnKind::BigInt,
        ColumnType::Char(_) | ColumnType::String(_) | ColumnType::Enum { .. } => {
            ColumnKind::String
        }
        ColumnType::Text => ColumnKind::Text,
        ColumnType::Uuid => ColumnKind::Guid,
        ColumnType::Boolean => ColumnKind::Boolean,
        ColumnType::DateTime | ColumnType::Timestamp => ColumnKind::DateTime,
        ColumnType::TimestampWithTimeZone => ColumnKind::DateTimeTz,
        ColumnType::Date => ColumnKind::Date,
        ColumnType::Time => ColumnKind::Time,
        ColumnType::Decimal(_) | ColumnType::Money(_) => ColumnKind::Decimal,
        ColumnType::Float | ColumnType::Double => ColumnKind::Float,
        ColumnType::Array(_) => ColumnKind::Array,
        ColumnType::Json | ColumnType::JsonBinary => ColumnKind::Json,
        ColumnType::Blob | ColumnType::Binary(_) | ColumnType::VarBinary(_) => ColumnKind::Blob,
        ColumnType::Custom(iden) => ColumnKind::Unknown(iden.to_string().to_lowercase()),
        other => ColumnKind::Unknown(type_name(other)),
    }
}

fn column_length(col_type: &ColumnType) -> Option<u32> {
    match col_type {
        ColumnType::Char(len) => *len,
        ColumnType::String(StringLen::N(len)) | ColumnType::VarBinary(StringLen::N(len)) => {
            Some(*len)
        }
        ColumnType::Binary(len) => Some(*len),
        _ => None,
    }
}

/// `Interval(None, None)` -> `interval`
fn type_name(col_type: &ColumnType) -> String {
    format!("{col_type:?}")
        .chars()
        .take_while(|c| c.is_ascii_alphanumeric())
        .collect::<String>()
        .to_lowercase()
}
