use std::error::Error;
use std::fmt::Display;
use std::io::Error as IoError;
use std::path::PathBuf;

use serde_json::Error as JsonError;

pub(crate) use clap::error::Error as ArgumentError;

#[derive(Debug)]
pub(crate) enum CommandError {
    IoError(IoError),
    MetadataUnavailable(String),
    ModelSourceRead(PathBuf,String),
    RouteSourceRead(String),
    UnknownModel(String),
    SchemaSerialize(String),
    WriteFailures(usize),
}

impl Error for CommandError {

}

impl Display for CommandError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::IoError(a) => write!(f,"io: {}",a),
            Self::MetadataUnavailable(a) => write!(f,"Model metadata could not be loaded: {}",a),
            Self::ModelSourceRead(path, a) => write!(f,"Error reading model metadata from '{}': {}",path.display(),a),
            Self::RouteSourceRead(a) => write!(f,"Error reading route table: {}",a),
            Self::UnknownModel(a) => write!(f,"Model '{}' not found in the model metadata.",a),
            Self::SchemaSerialize(a) => write!(f,"Error serializing schema: {}",a),
            Self::WriteFailures(count) => write!(f,"{} schema file(s) could not be written.",count),
        }
    }
}

impl From<IoError> for CommandError {

    fn from(value: IoError) -> Self {
        Self::IoError(value)
    }
}

impl From<JsonError> for CommandError {

    fn from(value: JsonError) -> Self {
        Self::SchemaSerialize(format!("{}",value))
    }
}

#[derive(Debug)]
pub(crate) enum ProgramError {
    ArgumentError(ArgumentError),
    CommandError(CommandError)
}

impl Error for ProgramError {

}

impl Display for ProgramError {

    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::ArgumentError(a) => write!(f,"{}",a),
            Self::CommandError(a) => write!(f,"{}",a),
        }
    }
}

impl From<ArgumentError> for ProgramError {

    fn from(value: ArgumentError) -> Self {
        Self::ArgumentError(value)
    }
}

impl From<CommandError> for ProgramError {

    fn from(value: CommandError) -> Self {
        Self::CommandError(value)
    }
}
