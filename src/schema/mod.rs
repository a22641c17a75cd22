use std::collections::HashSet;

use indexmap::IndexMap;
use indexmap::map::Entry;
use serde::Serialize;

use crate::metadata::AssociationKind;
use crate::metadata::ModelDescriptor;
use crate::progress::ProgressObserver;
use crate::utils::inflection::Inflect;

pub(crate) mod columns;
pub(crate) mod associations;
pub(crate) mod links;

use columns::ColumnProperty;
use columns::PropertyType;
use columns::column_property;
use associations::AssociationProperty;
use associations::CollectionProperty;
use associations::Reference;
use associations::RESERVED_ASSOCIATION;
use associations::association_property;
use associations::foreign_key_association;
use links::LinkDescriptor;
use links::LinkIndex;

pub(crate) const JSON_SCHEMA_DRAFT: &str = "http://json-schema.org/draft-04/schema#";

#[derive(Debug,Clone,PartialEq,Serialize)]
#[serde(untagged)]
pub(crate) enum Property {
    Column(ColumnProperty),
    Reference(Reference),
    Collection(CollectionProperty)
}

impl From<AssociationProperty> for Property {

    fn from(value: AssociationProperty) -> Self {
        match value {
            AssociationProperty::Reference(reference) => Self::Reference(reference),
            AssociationProperty::Collection(collection) => Self::Collection(collection),
        }
    }
}

/// The JSON Schema for one model. Once assembled it is only read and serialized.
#[derive(Debug,Clone,PartialEq,Serialize)]
pub(crate) struct SchemaDocument {
    #[serde(rename = "$schema")]
    schema: &'static str,
    #[serde(rename = "type")]
    schema_type: PropertyType,
    title: String,
    description: String,
    properties: IndexMap<String,Property>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    links: Vec<LinkDescriptor>,
}

impl SchemaDocument {

    fn template() -> Self {
        Self {
            schema: JSON_SCHEMA_DRAFT,
            schema_type: PropertyType::Object,
            title: String::new(),
            description: "object".to_owned(),
            properties: IndexMap::new(),
            links: Vec::new()
        }
    }

    pub(crate) fn title(&self) -> &str {
        &self.title
    }

    #[cfg(test)] pub(crate) const fn properties(&self) -> &IndexMap<String,Property> {
        &self.properties
    }

    #[cfg(test)] pub(crate) fn links(&self) -> &[LinkDescriptor] {
        &self.links
    }

}

struct PropertiesBuilder<'progress, Progress: ProgressObserver> {
    model: &'progress str,
    properties: IndexMap<String,Property>,
    progress: &'progress Progress
}

impl<Progress: ProgressObserver> PropertiesBuilder<'_, Progress> {

    // first one in wins, keys have to be unique
    fn insert(&mut self, name: &str, property: Property) {
        match self.properties.entry(name.to_owned()) {
            Entry::Occupied(_) => self.progress.warning(|| format!("Model '{}' already has a property '{}', the duplicate was dropped.",self.model,name)),
            Entry::Vacant(entry) => _ = entry.insert(property),
        }
    }

}

/// Assembles a model's schema from its columns and associations, adding links for its table from the index.
pub(crate) fn assemble<Progress: ProgressObserver>(model: &ModelDescriptor, links: &LinkIndex, progress: &Progress) -> SchemaDocument {

    let prefix = model.reference_prefix();

    let mut document = SchemaDocument::template();
    document.title.clone_from(&model.name);
    document.description = model.name.titleize().replace('/', " ");

    let mut builder = PropertiesBuilder {
        model: &model.name,
        properties: IndexMap::new(),
        progress
    };
    let mut referenced = HashSet::new();

    for column in &model.columns {
        if let Some(association) = foreign_key_association(model, column) {
            if let Some(property) = association_property(&prefix, association) {
                builder.insert(&association.name, property.into());
            }
            _ = referenced.insert(association.name.as_str());
        } else {
            builder.insert(&column.name, Property::Column(column_property(column)));
        }
    }

    for association in &model.associations {
        if referenced.contains(association.name.as_str()) || association.name == RESERVED_ASSOCIATION {
            continue;
        }
        match association.kind {
            AssociationKind::HasMany => if let Some(property) = association_property(&prefix, association) {
                builder.insert(&association.name, property.into())
            },
            AssociationKind::BelongsTo => progress.warning(|| format!("Model '{}' has no column '{}_id' for belongs_to '{}', it was skipped.",model.name,association.name,association.name)),
            AssociationKind::Other => (),
        }
    }

    document.properties = builder.properties;

    if let Some(links) = links.get(&model.table_name()) {
        document.links = links.to_vec();
    }

    document

}
