use serde::Serialize;
use serde::Serializer;
use serde_json::Value;

use crate::metadata::ColumnDescriptor;
use crate::metadata::ColumnType;
use crate::utils::inflection::Inflect;

/// Columns maintained by the model layer itself, which clients may read but never write.
pub(crate) const READONLY_COLUMNS: [&str; 3] = ["id","created_at","updated_at"];

/// A JSON Schema `type`. Column types that have no JSON Schema equivalent are passed through by name.
#[derive(Debug,Clone,PartialEq,Eq)]
pub(crate) enum PropertyType {
    String,
    Number,
    Integer,
    Boolean,
    Array,
    Object,
    Raw(String)
}

impl PropertyType {

    pub(crate) fn name(&self) -> &str {
        match self {
            Self::String => "string",
            Self::Number => "number",
            Self::Integer => "integer",
            Self::Boolean => "boolean",
            Self::Array => "array",
            Self::Object => "object",
            Self::Raw(name) => name,
        }
    }

}

impl From<&ColumnType> for PropertyType {

    fn from(value: &ColumnType) -> Self {
        match value {
            ColumnType::String |
            ColumnType::Text |
            ColumnType::Date |
            ColumnType::Datetime => Self::String,
            ColumnType::Decimal => Self::Number,
            ColumnType::Integer => Self::Integer,
            ColumnType::Boolean => Self::Boolean,
            ColumnType::Float |
            ColumnType::Binary |
            ColumnType::Other(_) => Self::Raw(value.name().to_owned()),
        }
    }
}

impl Serialize for PropertyType {

    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.name())
    }
}

fn property_format(column_type: &ColumnType) -> Option<&'static str> {
    match column_type {
        ColumnType::Datetime => Some("date-time"),
        ColumnType::Date => Some("date"),
        _ => None
    }
}

#[derive(Debug,Clone,PartialEq,Serialize)]
pub(crate) struct ColumnProperty {
    pub(crate) description: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(crate) identity: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(crate) readonly: Option<bool>,
    #[serde(rename = "type")]
    pub(crate) property_type: PropertyType,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(crate) format: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(crate) default: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(crate) maxlength: Option<u64>,
}

pub(crate) fn column_property(column: &ColumnDescriptor) -> ColumnProperty {
    ColumnProperty {
        description: column.name.titleize(),
        identity: column.primary.then_some(true),
        readonly: READONLY_COLUMNS.contains(&column.name.as_str()).then_some(true),
        property_type: PropertyType::from(&column.column_type),
        format: property_format(&column.column_type),
        default: column.default.clone().filter(|value| !value.is_null()),
        maxlength: match column.column_type {
            ColumnType::String => column.limit,
            _ => None
        },
    }
}
