use std::fs;
use std::fs::File;
use std::io::Write;
use std::path::Path;
use std::path::PathBuf;

use clap::Args;
use clap_markdown::help_markdown;
use schemars::schema_for;
use schemars::JsonSchema;

use crate::commands::SchemaBuilder;
use crate::commands::Task;
use crate::errors::CommandError;
use crate::metadata::ModelDescriptor;
use crate::progress::ProgressObserver;
use crate::routes::RouteDescriptor;
use crate::subcommand_def;

fn write_command_help(target: &Path) -> Result<(),CommandError> {
    let mut target = File::create(target)?;
    write!(&mut target,"{}",help_markdown::<SchemaBuilder>())?;
    Ok(())
}

fn write_input_schema<Schema: JsonSchema>(target: &Path) -> Result<(),CommandError> {
    let mut target = File::create(target)?;
    let schema = schema_for!(Schema);
    write!(&mut target,"{}",serde_json::to_string_pretty(&schema)?)?;
    Ok(())
}

subcommand_def!{
    /// Writes the command line documentation and json schemas for the metadata input files to folders.
    #[command(hide=true)]
    pub(crate) struct Docs {

        #[arg(long)]
        /// The folder to output the generated documentation to
        docs: PathBuf,

        #[arg(long)]
        /// The folder to output the input file schemas to
        schemas: PathBuf

    }
}

impl Task for Docs {
    fn run<Progress: ProgressObserver>(self, _: &mut Progress) -> Result<(),CommandError> {
        fs::create_dir_all(&self.docs)?;
        fs::create_dir_all(&self.schemas)?;

        write_command_help(&self.docs.join("Commands.md"))?;

        write_input_schema::<ModelDescriptor>(&self.schemas.join("model.schema.json"))?;
        write_input_schema::<Vec<RouteDescriptor>>(&self.schemas.join("routes.schema.json"))?;

        Ok(())
    }
}

#[cfg(test)]
mod test {

    use std::fs;

    use tempfile::TempDir;

    use super::Docs;
    use crate::commands::Task;

    #[test]
    fn test_docs() {
        let dir = TempDir::new().unwrap();
        let docs = Docs {
            docs: dir.path().join("docs"),
            schemas: dir.path().join("schemas")
        };
        docs.run(&mut ()).unwrap();

        let commands = fs::read_to_string(dir.path().join("docs").join("Commands.md")).unwrap();
        assert!(commands.contains("write"));

        let model: serde_json::Value = serde_json::from_str(&fs::read_to_string(dir.path().join("schemas").join("model.schema.json")).unwrap()).unwrap();
        assert_eq!(model["title"],"ModelDescriptor");
        assert!(model["properties"]["columns"].is_object());

        let routes: serde_json::Value = serde_json::from_str(&fs::read_to_string(dir.path().join("schemas").join("routes.schema.json")).unwrap()).unwrap();
        assert_eq!(routes["type"],"array");
    }

}
