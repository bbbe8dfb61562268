//! Resource - Declared resources and their attribute values

use std::collections::HashMap;

/// Unique identifier for a declared resource
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ResourceId {
    /// Resource kind (e.g., "vpc", "nat_gateway")
    pub kind: String,
    /// Binding name, unique within a graph (e.g., "main-public-subnet-0")
    pub name: String,
}

impl ResourceId {
    pub fn new(kind: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            kind: kind.into(),
            name: name.into(),
        }
    }
}

impl std::fmt::Display for ResourceId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}.{}", self.kind, self.name)
    }
}

/// Attribute value of a declared resource
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    String(String),
    Int(i64),
    Bool(bool),
    List(Vec<Value>),
    Map(HashMap<String, Value>),
    /// Deferred reference to another resource's attribute
    /// (binding_name, attribute_name), resolved by the provisioning engine
    /// during its own apply phase. Never awaited by components.
    ResourceRef(String, String),
}

/// Reference to a single attribute of a declared resource: a graph node
/// plus a field accessor. This is the typed form handed to callers as an
/// output; [`Value::ResourceRef`] is its attribute-wiring form.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct AttrRef {
    /// Binding name of the referenced resource
    pub binding: String,
    /// Attribute being referenced (e.g., "id", "arn")
    pub attribute: String,
}

impl AttrRef {
    pub fn new(binding: impl Into<String>, attribute: impl Into<String>) -> Self {
        Self {
            binding: binding.into(),
            attribute: attribute.into(),
        }
    }
}

impl std::fmt::Display for AttrRef {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}.{}", self.binding, self.attribute)
    }
}

impl From<AttrRef> for Value {
    fn from(r: AttrRef) -> Self {
        Value::ResourceRef(r.binding, r.attribute)
    }
}

/// Desired state of a single resource, as declared by a component
#[derive(Debug, Clone, PartialEq)]
pub struct Resource {
    pub id: ResourceId,
    pub attributes: HashMap<String, Value>,
}

impl Resource {
    pub fn new(kind: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: ResourceId::new(kind, name),
            attributes: HashMap::new(),
        }
    }

    pub fn with_attribute(mut self, key: impl Into<String>, value: Value) -> Self {
        self.attributes.insert(key.into(), value);
        self
    }

    pub fn attribute(&self, key: &str) -> Option<&Value> {
        self.attributes.get(key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resource_builder() {
        let resource = Resource::new("vpc", "main")
            .with_attribute("cidr_block", Value::String("10.0.0.0/16".to_string()))
            .with_attribute("enable_dns_support", Value::Bool(true));

        assert_eq!(resource.id.kind, "vpc");
        assert_eq!(resource.id.name, "main");
        assert_eq!(
            resource.attribute("cidr_block"),
            Some(&Value::String("10.0.0.0/16".to_string()))
        );
        assert_eq!(resource.attribute("missing"), None);
    }

    #[test]
    fn attr_ref_converts_to_resource_ref() {
        let r = AttrRef::new("vpc", "id");
        let value: Value = r.into();
        assert_eq!(
            value,
            Value::ResourceRef("vpc".to_string(), "id".to_string())
        );
    }

    #[test]
    fn resource_id_display() {
        let id = ResourceId::new("subnet", "public-0");
        assert_eq!(id.to_string(), "subnet.public-0");
    }
}
