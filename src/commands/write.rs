use clap::Args;
use console::style;

use super::Task;
use crate::config::SchemaBuilderConfig;
use crate::errors::CommandError;
use crate::generator::ModelSchemaGenerator;
use crate::metadata::load_models;
use crate::progress::ProgressObserver;
use crate::routes::load_routes;
use crate::subcommand_def;
use crate::writer::persist;
use crate::writer::PersistReport;

subcommand_def!{
    /// Writes a schema file for every model. Existing schema files are never overwritten.
    pub(crate) struct Write {

        #[command(flatten)]
        config: SchemaBuilderConfig

    }
}

fn print_report(report: &PersistReport) {
    if !report.skipped.is_empty() {
        println!("{}",style("== Existing Files ==").bold());
        println!("Please rename them before they can be re-generated");
        for path in &report.skipped {
            println!("{}",path.display());
        }
    }
    if !report.created.is_empty() {
        println!("{}",style("== Created Files ==").bold());
        for path in &report.created {
            println!("{}",path.display());
        }
    }
    if !report.failed.is_empty() {
        eprintln!("{}",style("== Failed Files ==").bold().red());
        for (path,err) in &report.failed {
            eprintln!("{}: {}",path.display(),err);
        }
    }
}

impl Write {

    fn generate<Progress: ProgressObserver>(&self, progress: &mut Progress) -> Result<PersistReport,CommandError> {

        let models = load_models(&self.config.model_path()?, progress)?;
        let routes = load_routes(&self.config.routes_path()?, progress)?;

        let generator = ModelSchemaGenerator::new(routes);
        let documents = generator.generate_all(&models, progress);

        Ok(persist(&documents, &self.config.out_path()?, progress))

    }
}

impl Task for Write {

    fn run<Progress: ProgressObserver>(self, progress: &mut Progress) -> Result<(),CommandError> {

        let report = self.generate(progress)?;

        print_report(&report);

        if report.failed.is_empty() {
            Ok(())
        } else {
            Err(CommandError::WriteFailures(report.failed.len()))
        }

    }
}

#[cfg(test)]
mod test {

    use std::fs;
    use std::path::Path;

    use clap::Parser;
    use tempfile::TempDir;

    use super::Write;
    use crate::commands::Task;

    #[derive(Parser)]
    struct TestCommand {
        #[command(flatten)]
        write: Write
    }

    fn write_command(base_path: &Path) -> Write {
        let base_path = base_path.display().to_string();
        TestCommand::try_parse_from(["test","--base-path",base_path.as_str()]).unwrap().write
    }

    fn setup() -> TempDir {
        let dir = TempDir::new().unwrap();
        fs::create_dir_all(dir.path().join("app").join("models")).unwrap();
        fs::create_dir_all(dir.path().join("config")).unwrap();
        fs::write(dir.path().join("app").join("models").join("article.json"), r#"{
            "name": "Article",
            "columns": [
                {"name": "id", "type": "integer", "primary": true},
                {"name": "author_id", "type": "integer"},
                {"name": "title", "type": "string", "limit": 255}
            ],
            "associations": [
                {"name": "author", "macro": "belongs_to", "plural_name": "authors"},
                {"name": "comments", "macro": "has_many", "plural_name": "comments"}
            ]
        }"#).unwrap();
        fs::write(dir.path().join("config").join("routes.json"), r#"[
            {"requirements": {"controller": "articles", "action": "show"}, "verb": "^GET$", "path": "/articles/:id(.:format)"}
        ]"#).unwrap();
        dir
    }

    #[test]
    fn test_write_then_skip() {
        let dir = setup();
        let target = dir.path().join("json-schema").join("article.json");

        let report = write_command(dir.path()).generate(&mut ()).unwrap();
        assert_eq!(report.created,vec![target.clone()]);

        let document: serde_json::Value = serde_json::from_str(&fs::read_to_string(&target).unwrap()).unwrap();
        assert_eq!(document["properties"]["author"]["$ref"],"/authors/new.schema#");
        assert_eq!(document["properties"]["comments"]["items"]["$ref"],"/comments/new.schema#");
        assert_eq!(document["links"][0]["href"],"/articles/{id}");

        let report = write_command(dir.path()).generate(&mut ()).unwrap();
        assert_eq!(report.skipped,vec![target]);
        write_command(dir.path()).run(&mut ()).unwrap();
    }

    #[test]
    fn test_missing_models() {
        let dir = TempDir::new().unwrap();
        assert!(write_command(dir.path()).run(&mut ()).is_err());
    }

}
