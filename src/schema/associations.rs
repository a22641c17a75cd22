use serde::Serialize;

use crate::metadata::AssociationDescriptor;
use crate::metadata::AssociationKind;
use crate::metadata::ColumnDescriptor;
use crate::metadata::ModelDescriptor;
use crate::schema::columns::PropertyType;
use crate::utils::inflection::Inflect;

/// The version history association is bookkeeping, never part of a model's schema.
pub(crate) const RESERVED_ASSOCIATION: &str = "versions";

const FOREIGN_KEY_SUFFIX: &str = "_id";

#[derive(Debug,Clone,PartialEq,Eq,Serialize)]
pub(crate) struct Reference {
    #[serde(rename = "$ref")]
    pub(crate) reference: String
}

impl Reference {

    pub(crate) fn to(prefix: &str, association: &AssociationDescriptor) -> Self {
        Self {
            reference: format!("/{}{}/new.schema#",prefix,association.plural_name)
        }
    }
}

#[derive(Debug,Clone,PartialEq,Eq,Serialize)]
pub(crate) struct CollectionProperty {
    #[serde(rename = "type")]
    pub(crate) property_type: PropertyType,
    pub(crate) format: &'static str,
    pub(crate) title: String,
    #[serde(rename = "uniqueItems")]
    pub(crate) unique_items: bool,
    pub(crate) items: Reference
}

#[derive(Debug,Clone,PartialEq,Eq)]
pub(crate) enum AssociationProperty {
    Reference(Reference),
    Collection(CollectionProperty)
}

/// If the column is the foreign key of a belongs_to association, returns that association. These columns are represented by a reference instead.
pub(crate) fn foreign_key_association<'model>(model: &'model ModelDescriptor, column: &ColumnDescriptor) -> Option<&'model AssociationDescriptor> {
    let name = column.name.strip_suffix(FOREIGN_KEY_SUFFIX).filter(|name| !name.is_empty())?;
    model.association(name).filter(|association| {
        association.kind == AssociationKind::BelongsTo && association.name != RESERVED_ASSOCIATION
    })
}

/// `prefix` is the model's namespace prefix, see `ModelDescriptor::reference_prefix`.
pub(crate) fn association_property(prefix: &str, association: &AssociationDescriptor) -> Option<AssociationProperty> {
    if association.name == RESERVED_ASSOCIATION {
        return None
    }
    match association.kind {
        AssociationKind::BelongsTo => Some(AssociationProperty::Reference(Reference::to(prefix, association))),
        AssociationKind::HasMany => Some(AssociationProperty::Collection(CollectionProperty {
            property_type: PropertyType::Array,
            format: "table",
            title: association.name.camelize(),
            unique_items: true,
            items: Reference::to(prefix, association),
        })),
        AssociationKind::Other => None,
    }
}
