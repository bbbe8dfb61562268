//! Scope - Capability through which components declare resources
//!
//! A Scope stands in for the provisioning engine's registration API: it
//! collects resource declarations under a component name and records the
//! outputs the component exposes. Components receive a Scope explicitly
//! instead of inheriting engine plumbing, so a component is just a function
//! from configuration to outputs.

use std::collections::{BTreeMap, HashMap};

use tracing::debug;

use crate::graph::{GraphError, ResourceGraph};
use crate::resource::{AttrRef, Resource, ResourceId, Value};
use crate::schema::ResourceSchema;

/// Error registering a declaration with a scope
#[derive(Debug, thiserror::Error)]
pub enum ScopeError {
    #[error(transparent)]
    Graph(#[from] GraphError),

    #[error("resource '{id}' failed schema validation: {details}")]
    InvalidResource { id: ResourceId, details: String },
}

/// Value registered as a component output
#[derive(Debug, Clone, PartialEq)]
pub enum OutputValue {
    /// Concrete value known at declaration time
    Literal(Value),
    /// Deferred reference resolved by the engine after apply
    Ref(AttrRef),
    /// Ordered list of deferred references
    RefList(Vec<AttrRef>),
    /// Explicitly absent (a disabled optional feature), distinct from
    /// not-yet-known
    Absent,
}

/// Handle to a declared resource, used to wire references to it
#[derive(Debug, Clone)]
pub struct ResourceHandle {
    id: ResourceId,
}

impl ResourceHandle {
    /// Binding name of the declared resource within its graph
    pub fn binding(&self) -> &str {
        &self.id.name
    }

    pub fn kind(&self) -> &str {
        &self.id.kind
    }

    /// Deferred reference to one of the resource's attributes
    pub fn attr(&self, attribute: impl Into<String>) -> AttrRef {
        AttrRef::new(self.id.name.clone(), attribute)
    }
}

/// Declaration scope for a single component instance
#[derive(Debug)]
pub struct Scope {
    name: String,
    graph: ResourceGraph,
    outputs: BTreeMap<String, OutputValue>,
    schemas: HashMap<String, ResourceSchema>,
}

impl Scope {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            graph: ResourceGraph::new(),
            outputs: BTreeMap::new(),
            schemas: HashMap::new(),
        }
    }

    /// Component name this scope declares under
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Binding name a local resource name maps to within this scope
    pub fn scoped_name(&self, local: &str) -> String {
        format!("{}-{}", self.name, local)
    }

    /// Register a schema; subsequent declarations of that kind are
    /// validated against it. Kinds without a schema pass unchecked.
    pub fn register_schema(&mut self, schema: ResourceSchema) {
        self.schemas.insert(schema.kind.clone(), schema);
    }

    pub fn register_schemas(&mut self, schemas: impl IntoIterator<Item = ResourceSchema>) {
        for schema in schemas {
            self.register_schema(schema);
        }
    }

    /// Declare a resource. The resource's name is prefixed with the scope
    /// name to form its binding, and reference edges are recorded in the
    /// scope's graph.
    pub fn declare(&mut self, mut resource: Resource) -> Result<ResourceHandle, ScopeError> {
        resource.id.name = self.scoped_name(&resource.id.name);

        if let Some(schema) = self.schemas.get(&resource.id.kind)
            && let Err(errors) = schema.validate(&resource.attributes)
        {
            let details: Vec<String> = errors.iter().map(|e| e.to_string()).collect();
            return Err(ScopeError::InvalidResource {
                id: resource.id.clone(),
                details: details.join("; "),
            });
        }

        let id = resource.id.clone();
        self.graph.add(resource)?;
        debug!(resource = %id, "declared resource");
        Ok(ResourceHandle { id })
    }

    /// Register a named output of the component
    pub fn export(&mut self, name: impl Into<String>, value: OutputValue) {
        self.outputs.insert(name.into(), value);
    }

    pub fn output(&self, name: &str) -> Option<&OutputValue> {
        self.outputs.get(name)
    }

    pub fn outputs(&self) -> &BTreeMap<String, OutputValue> {
        &self.outputs
    }

    pub fn graph(&self) -> &ResourceGraph {
        &self.graph
    }

    /// Consume the scope, yielding the declared graph and outputs
    pub fn into_parts(self) -> (ResourceGraph, BTreeMap<String, OutputValue>) {
        (self.graph, self.outputs)
    }
}
