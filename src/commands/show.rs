use clap::Args;

use super::Task;
use crate::config::SchemaBuilderConfig;
use crate::errors::CommandError;
use crate::generator::ModelSchemaGenerator;
use crate::metadata::find_model;
use crate::metadata::load_models;
use crate::progress::ProgressObserver;
use crate::routes::load_routes;
use crate::subcommand_def;

subcommand_def!{
    /// Prints the schema for one model, without writing any files
    pub(crate) struct Show {

        /// The model's name, including any namespace, such as `Admin::User`
        model: String,

        #[command(flatten)]
        config: SchemaBuilderConfig

    }
}

impl Show {

    fn render<Progress: ProgressObserver>(&self, progress: &mut Progress) -> Result<String,CommandError> {
        let models = load_models(&self.config.model_path()?, progress)?;
        let model = find_model(&models, &self.model)?;
        let routes = load_routes(&self.config.routes_path()?, progress)?;
        ModelSchemaGenerator::new(routes).render(model, progress)
    }
}

impl Task for Show {

    fn run<Progress: ProgressObserver>(self, progress: &mut Progress) -> Result<(),CommandError> {
        println!("{}",self.render(progress)?);
        Ok(())
    }
}
