//! Object specifications
//!
//! An [`ObjectSpecification`] is the fully-introspected metamodel node of
//! one domain class: a class-level facet holder plus one holder-wrapping
//! spec per member. The member set is fixed once construction completes;
//! specifications are published behind `Arc` and never mutated afterwards.

use trestle_applib::BeanSort;
use trestle_ident::{Identifier, LogicalTypeName};

use crate::facets::{Facet, FacetHolder, FacetKind};

/// Specification of one property.
#[derive(Debug, Clone)]
pub struct PropertySpec {
    id: String,
    holder: FacetHolder,
}

impl PropertySpec {
    pub(crate) fn new(id: &str, holder: FacetHolder) -> Self {
        Self {
            id: id.to_string(),
            holder,
        }
    }

    /// The property id.
    pub fn id(&self) -> &str {
        &self.id
    }

    /// The property's facets.
    pub fn holder(&self) -> &FacetHolder {
        &self.holder
    }
}

/// Specification of one collection.
#[derive(Debug, Clone)]
pub struct CollectionSpec {
    id: String,
    holder: FacetHolder,
}

impl CollectionSpec {
    pub(crate) fn new(id: &str, holder: FacetHolder) -> Self {
        Self {
            id: id.to_string(),
            holder,
        }
    }

    /// The collection id.
    pub fn id(&self) -> &str {
        &self.id
    }

    /// The collection's facets.
    pub fn holder(&self) -> &FacetHolder {
        &self.holder
    }
}

/// Specification of one action parameter.
#[derive(Debug, Clone)]
pub struct ActionParameterSpec {
    name: String,
    index: usize,
    holder: FacetHolder,
}

impl ActionParameterSpec {
    pub(crate) fn new(name: &str, index: usize, holder: FacetHolder) -> Self {
        Self {
            name: name.to_string(),
            index,
            holder,
        }
    }

    /// The declared parameter name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Zero-based position in the signature.
    pub fn index(&self) -> usize {
        self.index
    }

    /// The parameter's facets.
    pub fn holder(&self) -> &FacetHolder {
        &self.holder
    }
}

/// Specification of one action.
#[derive(Debug, Clone)]
pub struct ActionSpec {
    id: String,
    holder: FacetHolder,
    parameters: Vec<ActionParameterSpec>,
}

impl ActionSpec {
    pub(crate) fn new(id: &str, holder: FacetHolder, parameters: Vec<ActionParameterSpec>) -> Self {
        Self {
            id: id.to_string(),
            holder,
            parameters,
        }
    }

    /// The action id.
    pub fn id(&self) -> &str {
        &self.id
    }

    /// The action's facets.
    pub fn holder(&self) -> &FacetHolder {
        &self.holder
    }

    /// Parameter specs, in signature order.
    pub fn parameters(&self) -> &[ActionParameterSpec] {
        &self.parameters
    }
}

/// The fully-introspected metamodel node of one domain class.
#[derive(Debug)]
pub struct ObjectSpecification {
    identifier: Identifier,
    logical_type_name: LogicalTypeName,
    bean_sort: BeanSort,
    holder: FacetHolder,
    properties: Vec<PropertySpec>,
    collections: Vec<CollectionSpec>,
    actions: Vec<ActionSpec>,
}

impl ObjectSpecification {
    pub(crate) fn new(
        logical_type_name: LogicalTypeName,
        bean_sort: BeanSort,
        holder: FacetHolder,
        properties: Vec<PropertySpec>,
        collections: Vec<CollectionSpec>,
        actions: Vec<ActionSpec>,
    ) -> Self {
        Self {
            identifier: Identifier::class_identifier(logical_type_name.clone()),
            logical_type_name,
            bean_sort,
            holder,
            properties,
            collections,
            actions,
        }
    }

    /// The class identifier.
    pub fn identifier(&self) -> &Identifier {
        &self.identifier
    }

    /// The class's logical type name.
    pub fn logical_type_name(&self) -> &LogicalTypeName {
        &self.logical_type_name
    }

    /// Broad classification of the class.
    pub fn bean_sort(&self) -> BeanSort {
        self.bean_sort
    }

    /// The class-level facets.
    pub fn holder(&self) -> &FacetHolder {
        &self.holder
    }

    /// Convenience lookup on the class-level holder.
    pub fn get_facet(&self, kind: FacetKind) -> Option<&Facet> {
        self.holder.get_facet(kind)
    }

    /// All property specs, inherited members first, in declaration order.
    pub fn properties(&self) -> &[PropertySpec] {
        &self.properties
    }

    /// All collection specs.
    pub fn collections(&self) -> &[CollectionSpec] {
        &self.collections
    }

    /// All action specs.
    pub fn actions(&self) -> &[ActionSpec] {
        &self.actions
    }

    /// Look up a property by id.
    pub fn property(&self, id: &str) -> Option<&PropertySpec> {
        self.properties.iter().find(|p| p.id() == id)
    }

    /// Look up a collection by id.
    pub fn collection(&self, id: &str) -> Option<&CollectionSpec> {
        self.collections.iter().find(|c| c.id() == id)
    }

    /// Look up an action by id.
    pub fn action(&self, id: &str) -> Option<&ActionSpec> {
        self.actions.iter().find(|a| a.id() == id)
    }

    /// Property ids in declaration order.
    pub fn property_ids(&self) -> Vec<String> {
        self.properties.iter().map(|p| p.id().to_string()).collect()
    }

    /// All member ids (properties, collections, actions), in order.
    pub fn member_ids(&self) -> Vec<&str> {
        self.properties
            .iter()
            .map(PropertySpec::id)
            .chain(self.collections.iter().map(CollectionSpec::id))
            .chain(self.actions.iter().map(ActionSpec::id))
            .collect()
    }

    /// Mutable access for the post-processing pass. Crate-internal: once
    /// the specification is published, no holder is mutated again.
    pub(crate) fn holder_mut(&mut self) -> &mut FacetHolder {
        &mut self.holder
    }

    pub(crate) fn properties_mut(&mut self) -> &mut [PropertySpec] {
        &mut self.properties
    }
}

impl PropertySpec {
    pub(crate) fn holder_mut(&mut self) -> &mut FacetHolder {
        &mut self.holder
    }
}
