use std::cell::OnceCell;

use crate::errors::CommandError;
use crate::metadata::ModelDescriptor;
use crate::progress::ProgressObserver;
use crate::routes::RouteDescriptor;
use crate::schema::assemble;
use crate::schema::SchemaDocument;
use crate::schema::links::LinkIndex;

/// Generates schema documents for models, sharing one link index built from the route table on first use.
pub(crate) struct ModelSchemaGenerator {
    routes: Vec<RouteDescriptor>,
    links: OnceCell<LinkIndex>
}

impl ModelSchemaGenerator {

    pub(crate) const fn new(routes: Vec<RouteDescriptor>) -> Self {
        Self {
            routes,
            links: OnceCell::new()
        }
    }

    pub(crate) fn link_index<Progress: ProgressObserver>(&self, progress: &Progress) -> &LinkIndex {
        self.links.get_or_init(|| LinkIndex::build(&self.routes, progress))
    }

    pub(crate) fn generate_one<Progress: ProgressObserver>(&self, model: &ModelDescriptor, progress: &Progress) -> SchemaDocument {
        assemble(model, self.link_index(progress), progress)
    }

    pub(crate) fn generate_all<Progress: ProgressObserver>(&self, models: &[ModelDescriptor], progress: &mut Progress) -> Vec<SchemaDocument> {

        let links = self.link_index(progress);

        progress.start_known_endpoint(|| ("Generating schemas.",models.len()));

        let mut documents = Vec::with_capacity(models.len());
        for (i,model) in models.iter().enumerate() {
            documents.push(assemble(model, links, progress));
            progress.update(|| i + 1);
        }

        progress.finish(|| format!("Generated {} schemas.",documents.len()));

        documents
    }

    /// Renders one model's schema as pretty printed JSON.
    pub(crate) fn render<Progress: ProgressObserver>(&self, model: &ModelDescriptor, progress: &Progress) -> Result<String,CommandError> {
        Ok(serde_json::to_string_pretty(&self.generate_one(model, progress))?)
    }

}
