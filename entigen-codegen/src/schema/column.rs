use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};

/// Abstract column type, independent of the database dialect.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "String", from = "String")]
pub enum ColumnKind {
    Integer,
    SmallInt,
    BigInt,
    String,
    Text,
    Guid,
    Boolean,
    DateTime,
    DateTimeTz,
    Date,
    Time,
    Decimal,
    Float,
    Array,
    SimpleArray,
    Json,
    Object,
    Blob,
    /// Any type the generator has no mapping for, keeping the name reported
    /// by the database
    Unknown(String),
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnDescriptor {
    pub name: String,
    #[serde(rename = "type")]
    pub kind: ColumnKind,
    #[serde(default)]
    pub nullable: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub length: Option<u32>,
    #[serde(default)]
    pub autoincrement: bool,
}

impl ColumnKind {
    /// The Doctrine mapping type name.
    pub fn as_str(&self) -> &str {
        match self {
            Self::Integer => "integer",
            Self::SmallInt => "smallint",
            Self::BigInt => "bigint",
            Self::String => "string",
            Self::Text => "text",
            Self::Guid => "guid",
            Self::Boolean => "boolean",
            Self::DateTime => "datetime",
            Self::DateTimeTz => "datetimetz",
            Self::Date => "date",
            Self::Time => "time",
            Self::Decimal => "decimal",
            Self::Float => "float",
            Self::Array => "array",
            Self::SimpleArray => "simple_array",
            Self::Json => "json",
            Self::Object => "object",
            Self::Blob => "blob",
            Self::Unknown(name) => name,
        }
    }
}

impl FromStr for ColumnKind {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s.to_ascii_lowercase().as_str() {
            "integer" | "int" => Self::Integer,
            "smallint" => Self::SmallInt,
            "bigint" => Self::BigInt,
            "string" | "varchar" => Self::String,
            "text" => Self::Text,
            "guid" | "uuid" => Self::Guid,
            "boolean" | "bool" => Self::Boolean,
            "datetime" => Self::DateTime,
            "datetimetz" => Self::DateTimeTz,
            "date" => Self::Date,
            "time" => Self::Time,
            "decimal" => Self::Decimal,
            "float" => Self::Float,
            "array" => Self::Array,
            "simple_array" => Self::SimpleArray,
            "json" => Self::Json,
            "object" => Self::Object,
            "blob" => Self::Blob,
            other => Self::Unknown(other.to_owned()),
        })
    }
}

impl From<String> for ColumnKind {
    fn from(s: String) -> Self {
        match s.parse() {
            Ok(kind) => kind,
            Err(never) => match never {},
        }
    }
}

impl From<ColumnKind> for String {
    fn from(kind: ColumnKind) -> Self {
        kind.as_str().to_owned()
    }
}

impl fmt::Display for ColumnKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl ColumnDescriptor {
    pub fn new<T>(name: T, kind: ColumnKind) -> Self
    where
        T: Into<String>,
    {
        Self {
            name: name.into(),
            kind,
            nullable: false,
            length: None,
            autoincrement: false,
        }
    }

    pub fn nullable(mut self) -> Self {
        self.nullable = true;
        self
    }

    pub fn length(mut self, length: u32) -> Self {
        self.length = Some(length);
        self
    }

    pub fn autoincrement(mut self) -> Self {
        self.autoincrement = true;
        self
    }
}
