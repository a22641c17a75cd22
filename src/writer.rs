use std::fs;
use std::fs::OpenOptions;
use std::io::ErrorKind;
use std::io::Write;
use std::path::Path;
use std::path::PathBuf;

use crate::errors::CommandError;
use crate::progress::ProgressObserver;
use crate::progress::WatchableIterator;
use crate::schema::SchemaDocument;
use crate::utils::inflection::Inflect;

enum WriteOutcome {
    Created,
    Exists
}

/// What happened to each schema file in one run.
#[derive(Debug,Default)]
pub(crate) struct PersistReport {
    pub(crate) created: Vec<PathBuf>,
    pub(crate) skipped: Vec<PathBuf>,
    pub(crate) failed: Vec<(PathBuf,CommandError)>,
}

/// `Admin::User` is written to `<out_dir>/admin/user.json`
pub(crate) fn schema_path(out_dir: &Path, document: &SchemaDocument) -> PathBuf {
    out_dir.join(format!("{}.json",document.title().underscore()))
}

fn write_document(document: &SchemaDocument, path: &Path) -> Result<WriteOutcome,CommandError> {
    let json = serde_json::to_string_pretty(document)?;

    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }

    // create_new makes the existence check and the create one operation, so an existing file is never touched.
    let mut file = match OpenOptions::new().write(true).create_new(true).open(path) {
        Ok(file) => file,
        Err(err) if err.kind() == ErrorKind::AlreadyExists => return Ok(WriteOutcome::Exists),
        Err(err) => return Err(err.into())
    };
    file.write_all(json.as_bytes())?;
    Ok(WriteOutcome::Created)
}

/// Writes each document to its own file under the output directory. Existing files are skipped, and a failure to write one file doesn't stop the others.
pub(crate) fn persist<Progress: ProgressObserver>(documents: &[SchemaDocument], out_dir: &Path, progress: &mut Progress) -> PersistReport {

    let mut report = PersistReport::default();

    for document in documents.iter().watch(progress, "Writing schema files.", "Schema files written.") {
        let path = schema_path(out_dir, document);
        match write_document(document, &path) {
            Ok(WriteOutcome::Created) => report.created.push(path),
            Ok(WriteOutcome::Exists) => report.skipped.push(path),
            Err(err) => report.failed.push((path,err)),
        }
    }

    report

}
