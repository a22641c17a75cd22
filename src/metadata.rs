use std::collections::HashSet;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;
use std::path::PathBuf;
use std::ffi::OsStr;

use schemars::JsonSchema;
use serde::Deserialize;
use serde_json::Value;
use walkdir::WalkDir;

use crate::errors::CommandError;
use crate::progress::ProgressObserver;
use crate::utils::inflection::Inflect;

/// The raw column types recognized from the model layer. Anything else is kept by its lowercase name.
#[derive(Debug,Clone,PartialEq,Eq)]
pub(crate) enum ColumnType {
    String,
    Text,
    Integer,
    Float,
    Decimal,
    Boolean,
    Date,
    Datetime,
    Binary,
    Other(String)
}

impl ColumnType {

    pub(crate) fn name(&self) -> &str {
        match self {
            Self::String => "string",
            Self::Text => "text",
            Self::Integer => "integer",
            Self::Float => "float",
            Self::Decimal => "decimal",
            Self::Boolean => "boolean",
            Self::Date => "date",
            Self::Datetime => "datetime",
            Self::Binary => "binary",
            Self::Other(name) => name,
        }
    }
}

impl From<String> for ColumnType {

    fn from(value: String) -> Self {
        let value = value.to_lowercase();
        match value.as_str() {
            "string" => Self::String,
            "text" => Self::Text,
            "integer" => Self::Integer,
            "float" => Self::Float,
            "decimal" => Self::Decimal,
            "boolean" => Self::Boolean,
            "date" => Self::Date,
            "datetime" => Self::Datetime,
            "binary" => Self::Binary,
            _ => Self::Other(value)
        }
    }
}

impl<'de> Deserialize<'de> for ColumnType {

    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Ok(String::deserialize(deserializer)?.into())
    }
}

#[derive(Debug,Clone,Deserialize,JsonSchema)]
/// One column of a model's table.
pub(crate) struct ColumnDescriptor {
    /// The column name
    pub(crate) name: String,
    #[serde(rename = "type")]
    #[schemars(with = "String")]
    /// The model layer's type for the column, such as "string", "integer" or "datetime"
    pub(crate) column_type: ColumnType,
    #[serde(default)]
    /// True if this column is the primary key
    pub(crate) primary: bool,
    #[serde(default)]
    /// The column's default value, if any
    pub(crate) default: Option<Value>,
    #[serde(default)]
    /// The maximum length of a string column
    pub(crate) limit: Option<u64>,
}

#[derive(Debug,Clone,Copy,PartialEq,Eq,Deserialize,JsonSchema)]
#[serde(rename_all = "snake_case")]
pub(crate) enum AssociationKind {
    BelongsTo,
    HasMany,
    /// Any other kind of association, which is not represented in the schema.
    #[serde(other)]
    Other
}

#[derive(Debug,Clone,Deserialize,JsonSchema)]
/// A relationship from a model to another model.
pub(crate) struct AssociationDescriptor {
    /// The association name, for belongs_to this is the foreign key column without the `_id`
    pub(crate) name: String,
    #[serde(rename = "macro")]
    /// The kind of association
    pub(crate) kind: AssociationKind,
    /// The plural resource name of the associated model, used to build references
    pub(crate) plural_name: String,
}

#[derive(Debug,Clone,Deserialize,JsonSchema)]
/// Structural metadata for one model.
pub(crate) struct ModelDescriptor {
    /// The model class name, namespaces separated with `::`
    pub(crate) name: String,
    #[serde(default)]
    /// The plural table name, derived from the model name if not given
    pub(crate) table_name: Option<String>,
    #[serde(default)]
    /// The columns, in declared order
    pub(crate) columns: Vec<ColumnDescriptor>,
    #[serde(default)]
    /// The associations, in declared order
    pub(crate) associations: Vec<AssociationDescriptor>,
}

impl ModelDescriptor {

    pub(crate) fn table_name(&self) -> String {
        match &self.table_name {
            Some(table_name) => table_name.clone(),
            None => self.name.tableize()
        }
    }

    /// The namespace part of the tableized name, with its trailing slash: `Admin::User` -> `admin/`.
    pub(crate) fn reference_prefix(&self) -> String {
        let tableized = self.name.tableize();
        match tableized.rfind('/') {
            Some(index) => tableized[..=index].to_owned(),
            None => String::new()
        }
    }

    pub(crate) fn association(&self, name: &str) -> Option<&AssociationDescriptor> {
        self.associations.iter().find(|association| association.name == name)
    }

    fn check_unique_names(&self) -> Result<(),String> {
        let mut columns = HashSet::new();
        for column in &self.columns {
            if !columns.insert(column.name.as_str()) {
                return Err(format!("model '{}' lists column '{}' twice",self.name,column.name))
            }
        }
        let mut associations = HashSet::new();
        for association in &self.associations {
            if !associations.insert(association.name.as_str()) {
                return Err(format!("model '{}' lists association '{}' twice",self.name,association.name))
            }
        }
        Ok(())
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum ModelSource {
    One(ModelDescriptor),
    Many(Vec<ModelDescriptor>)
}

fn read_model_file(path: &Path, models: &mut Vec<ModelDescriptor>) -> Result<(),CommandError> {
    let file = File::open(path).map_err(|e| CommandError::ModelSourceRead(path.to_owned(),format!("{}",e)))?;
    let source = serde_json::from_reader::<_,ModelSource>(BufReader::new(file)).map_err(|e| CommandError::ModelSourceRead(path.to_owned(),format!("{}",e)))?;
    let loaded = match source {
        ModelSource::One(model) => vec![model],
        ModelSource::Many(many) => many,
    };
    for model in loaded {
        model.check_unique_names().map_err(|e| CommandError::ModelSourceRead(path.to_owned(),e))?;
        models.push(model);
    }
    Ok(())
}

fn list_model_files(model_path: &Path) -> Result<Vec<PathBuf>,CommandError> {
    if model_path.is_file() {
        return Ok(vec![model_path.to_owned()])
    }

    let mut result = Vec::new();
    for entry in WalkDir::new(model_path).sort_by_file_name() {
        let entry = entry.map_err(|e| CommandError::MetadataUnavailable(format!("{}",e)))?;
        if entry.file_type().is_file() && entry.path().extension().and_then(OsStr::to_str) == Some("json") {
            result.push(entry.into_path())
        }
    }
    Ok(result)
}

/// Loads every model descriptor found under the path, which may be a single metadata file or a directory searched recursively for `.json` files.
pub(crate) fn load_models<Progress: ProgressObserver>(model_path: &Path, progress: &mut Progress) -> Result<Vec<ModelDescriptor>,CommandError> {

    if !model_path.exists() {
        return Err(CommandError::MetadataUnavailable(format!("model path '{}' does not exist",model_path.display())))
    }

    let files = list_model_files(model_path)?;

    progress.start_known_endpoint(|| ("Loading model metadata.",files.len()));

    let mut models = Vec::new();
    for (i,file) in files.iter().enumerate() {
        read_model_file(file, &mut models)?;
        progress.update(|| i + 1);
    }

    progress.finish(|| format!("Loaded {} models.",models.len()));

    Ok(models)
}

pub(crate) fn find_model<'models>(models: &'models [ModelDescriptor], name: &str) -> Result<&'models ModelDescriptor,CommandError> {
    models.iter().find(|model| model.name == name).ok_or_else(|| CommandError::UnknownModel(name.to_owned()))
}
