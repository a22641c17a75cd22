use std::env;
use std::path::PathBuf;

use clap::Args;

use crate::errors::CommandError;

/// Where the metadata is read from and the schemas are written to. Relative paths are resolved against the base path.
#[derive(Args,Debug,Clone)]
pub(crate) struct SchemaBuilderConfig {

    #[arg(long)]
    /// Base path of the application, defaults to the current directory
    base_path: Option<PathBuf>,

    #[arg(long,default_value="app/models")]
    /// A model metadata file, or a folder searched recursively for model metadata `.json` files
    model_path: PathBuf,

    #[arg(long,default_value="config/routes.json")]
    /// The route table file, if it doesn't exist the schemas won't have links
    routes_path: PathBuf,

    #[arg(long,default_value="json-schema")]
    /// The folder to write schema files to
    out_path: PathBuf,

}

impl SchemaBuilderConfig {

    fn base_path(&self) -> Result<PathBuf,CommandError> {
        match &self.base_path {
            Some(base_path) => Ok(base_path.clone()),
            None => Ok(env::current_dir()?)
        }
    }

    pub(crate) fn model_path(&self) -> Result<PathBuf,CommandError> {
        Ok(self.base_path()?.join(&self.model_path))
    }

    pub(crate) fn routes_path(&self) -> Result<PathBuf,CommandError> {
        Ok(self.base_path()?.join(&self.routes_path))
    }

    pub(crate) fn out_path(&self) -> Result<PathBuf,CommandError> {
        Ok(self.base_path()?.join(&self.out_path))
    }

}

#[cfg(test)]
mod test {

    use std::env;
    use std::path::Path;

    use clap::Parser;

    use super::SchemaBuilderConfig;

    #[derive(Parser)]
    struct TestCommand {
        #[command(flatten)]
        config: SchemaBuilderConfig
    }

    fn parse(args: &[&str]) -> SchemaBuilderConfig {
        TestCommand::try_parse_from(std::iter::once("test").chain(args.iter().copied())).unwrap().config
    }

    #[test]
    fn test_defaults() {
        let config = parse(&["--base-path","/srv/app"]);
        assert_eq!(config.model_path().unwrap(),Path::new("/srv/app/app/models"));
        assert_eq!(config.routes_path().unwrap(),Path::new("/srv/app/config/routes.json"));
        assert_eq!(config.out_path().unwrap(),Path::new("/srv/app/json-schema"));

        let config = parse(&[]);
        assert_eq!(config.out_path().unwrap(),env::current_dir().unwrap().join("json-schema"));
    }

    #[test]
    fn test_overrides() {
        let config = parse(&["--base-path","/srv/app","--model-path","db/models.json","--out-path","/tmp/schemas"]);
        assert_eq!(config.model_path().unwrap(),Path::new("/srv/app/db/models.json"));
        assert_eq!(config.out_path().unwrap(),Path::new("/tmp/schemas"));
    }

}
