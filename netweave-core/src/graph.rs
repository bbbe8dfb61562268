//! Graph - Ordered resource declarations and their reference edges
//!
//! A ResourceGraph is the unit handed to the provisioning engine: an
//! ordered list of resource declarations plus the dependency edges implied
//! by [`Value::ResourceRef`] attribute values. The engine resolves actual
//! creation order from these edges; the graph itself performs no side
//! effects.

use std::collections::{BTreeMap, HashMap, HashSet};

use crate::resource::{Resource, Value};

/// Reference from one resource to another, extracted from its attributes
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReferenceEdge {
    /// Binding name of the referenced resource
    pub target: String,
    /// Attribute being referenced (e.g., "id")
    pub attribute: String,
    /// Where the reference is used (e.g., "vpc_id")
    pub used_in: String,
}

/// Error building a resource graph
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GraphError {
    #[error("duplicate resource binding '{name}'")]
    DuplicateBinding { name: String },
}

/// Declared resources plus the reference edges between them
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ResourceGraph {
    resources: Vec<Resource>,
    /// Binding name -> index into `resources`
    bindings: HashMap<String, usize>,
    /// Binding name -> outgoing reference edges
    edges: HashMap<String, Vec<ReferenceEdge>>,
    /// Target binding -> bindings that reference it
    reverse_edges: HashMap<String, Vec<String>>,
}

impl ResourceGraph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a resource declaration, extracting reference edges from its
    /// attribute values. Binding names must be unique.
    pub fn add(&mut self, resource: Resource) -> Result<(), GraphError> {
        let binding = resource.id.name.clone();
        if self.bindings.contains_key(&binding) {
            return Err(GraphError::DuplicateBinding { name: binding });
        }

        let mut refs = Vec::new();
        for (key, value) in &resource.attributes {
            collect_references(key, value, &mut refs);
        }
        for edge in &refs {
            self.reverse_edges
                .entry(edge.target.clone())
                .or_default()
                .push(binding.clone());
        }
        if !refs.is_empty() {
            self.edges.insert(binding.clone(), refs);
        }

        self.bindings.insert(binding, self.resources.len());
        self.resources.push(resource);
        Ok(())
    }

    /// Resources in declaration order
    pub fn resources(&self) -> &[Resource] {
        &self.resources
    }

    pub fn get(&self, binding: &str) -> Option<&Resource> {
        self.bindings.get(binding).map(|i| &self.resources[*i])
    }

    pub fn len(&self) -> usize {
        self.resources.len()
    }

    pub fn is_empty(&self) -> bool {
        self.resources.is_empty()
    }

    /// Outgoing reference edges of a resource
    pub fn dependencies_of(&self, binding: &str) -> &[ReferenceEdge] {
        self.edges.get(binding).map_or(&[], |v| v.as_slice())
    }

    /// Bindings that reference this resource
    pub fn dependents_of(&self, binding: &str) -> &[String] {
        self.reverse_edges
            .get(binding)
            .map_or(&[], |v| v.as_slice())
    }

    /// References whose target binding is not declared in this graph
    pub fn unresolved_references(&self) -> Vec<(String, String)> {
        let mut unresolved = Vec::new();
        for (source, edges) in &self.edges {
            for edge in edges {
                if !self.bindings.contains_key(&edge.target) {
                    unresolved.push((source.clone(), edge.target.clone()));
                }
            }
        }
        unresolved.sort();
        unresolved
    }

    /// Check if the reference edges contain a cycle
    pub fn has_cycle(&self) -> bool {
        let mut visited = HashSet::new();
        let mut rec_stack = HashSet::new();

        for node in self.edges.keys() {
            if self.has_cycle_util(node, &mut visited, &mut rec_stack) {
                return true;
            }
        }
        false
    }

    fn has_cycle_util(
        &self,
        node: &str,
        visited: &mut HashSet<String>,
        rec_stack: &mut HashSet<String>,
    ) -> bool {
        if rec_stack.contains(node) {
            return true;
        }
        if visited.contains(node) {
            return false;
        }

        visited.insert(node.to_string());
        rec_stack.insert(node.to_string());

        if let Some(edges) = self.edges.get(node) {
            for edge in edges {
                if self.has_cycle_util(&edge.target, visited, rec_stack) {
                    return true;
                }
            }
        }

        rec_stack.remove(node);
        false
    }

    /// Generate a summary of the graph for display
    pub fn summary(&self) -> GraphSummary {
        let mut kinds: BTreeMap<String, usize> = BTreeMap::new();
        for resource in &self.resources {
            *kinds.entry(resource.id.kind.clone()).or_default() += 1;
        }
        GraphSummary {
            total: self.resources.len(),
            kinds,
        }
    }

    /// One line per declaration, in declaration order
    pub fn display_brief(&self) -> String {
        let mut output = String::new();
        for resource in &self.resources {
            output.push_str(&format!("+ {}\n", resource.id));
        }
        output
    }
}

/// Count of declared resources, per kind
#[derive(Debug, Default, PartialEq, Eq)]
pub struct GraphSummary {
    pub total: usize,
    pub kinds: BTreeMap<String, usize>,
}

impl GraphSummary {
    pub fn count_of(&self, kind: &str) -> usize {
        self.kinds.get(kind).copied().unwrap_or(0)
    }
}

impl std::fmt::Display for GraphSummary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let kinds: Vec<String> = self
            .kinds
            .iter()
            .map(|(kind, count)| format!("{}: {}", kind, count))
            .collect();
        write!(f, "Graph: {} resources ({})", self.total, kinds.join(", "))
    }
}

fn collect_references(used_in: &str, value: &Value, out: &mut Vec<ReferenceEdge>) {
    match value {
        Value::ResourceRef(target, attribute) => out.push(ReferenceEdge {
            target: target.clone(),
            attribute: attribute.clone(),
            used_in: used_in.to_string(),
        }),
        Value::List(items) => {
            for item in items {
                collect_references(used_in, item, out);
            }
        }
        Value::Map(map) => {
            for (key, item) in map {
                collect_references(key, item, out);
            }
        }
        _ => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::collections::HashMap;

    #[test]
    fn duplicate_binding_is_rejected() {
        let mut graph = ResourceGraph::new();
        graph.add(Resource::new("vpc", "main")).unwrap();
        let err = graph.add(Resource::new("subnet", "main")).unwrap_err();
        assert_eq!(
            err,
            GraphError::DuplicateBinding {
                name: "main".to_string()
            }
        );
    }

    #[test]
    fn edges_extracted_from_attributes() {
        let mut graph = ResourceGraph::new();
        graph.add(Resource::new("vpc", "vpc")).unwrap();
        graph
            .add(Resource::new("subnet", "subnet-0").with_attribute(
                "vpc_id",
                Value::ResourceRef("vpc".to_string(), "id".to_string()),
            ))
            .unwrap();

        let deps = graph.dependencies_of("subnet-0");
        assert_eq!(deps.len(), 1);
        assert_eq!(deps[0].target, "vpc");
        assert_eq!(deps[0].attribute, "id");
        assert_eq!(deps[0].used_in, "vpc_id");
        assert_eq!(graph.dependents_of("vpc"), &["subnet-0".to_string()]);
    }

    #[test]
    fn edges_extracted_through_lists_and_maps() {
        let mut graph = ResourceGraph::new();
        graph.add(Resource::new("log_group", "lg")).unwrap();

        let statement = Value::Map(HashMap::from([(
            "resource".to_string(),
            Value::ResourceRef("lg".to_string(), "arn".to_string()),
        )]));
        graph
            .add(
                Resource::new("iam_role_policy", "policy")
                    .with_attribute("statement", Value::List(vec![statement])),
            )
            .unwrap();

        let deps = graph.dependencies_of("policy");
        assert_eq!(deps.len(), 1);
        assert_eq!(deps[0].target, "lg");
        assert_eq!(deps[0].attribute, "arn");
    }

    #[test]
    fn cycle_detection() {
        let mut graph = ResourceGraph::new();
        graph
            .add(Resource::new("a", "a").with_attribute(
                "b_id",
                Value::ResourceRef("b".to_string(), "id".to_string()),
            ))
            .unwrap();
        graph
            .add(Resource::new("b", "b").with_attribute(
                "a_id",
                Value::ResourceRef("a".to_string(), "id".to_string()),
            ))
            .unwrap();
        assert!(graph.has_cycle());
    }

    #[test]
    fn acyclic_graph_has_no_cycle() {
        let mut graph = ResourceGraph::new();
        graph.add(Resource::new("vpc", "vpc")).unwrap();
        graph
            .add(Resource::new("subnet", "subnet").with_attribute(
                "vpc_id",
                Value::ResourceRef("vpc".to_string(), "id".to_string()),
            ))
            .unwrap();
        assert!(!graph.has_cycle());
    }

    #[test]
    fn unresolved_references_reported() {
        let mut graph = ResourceGraph::new();
        graph
            .add(Resource::new("subnet", "orphan").with_attribute(
                "vpc_id",
                Value::ResourceRef("missing".to_string(), "id".to_string()),
            ))
            .unwrap();
        assert_eq!(
            graph.unresolved_references(),
            vec![("orphan".to_string(), "missing".to_string())]
        );
    }

    #[test]
    fn summary_counts_by_kind() {
        let mut graph = ResourceGraph::new();
        graph.add(Resource::new("vpc", "vpc")).unwrap();
        graph.add(Resource::new("subnet", "subnet-0")).unwrap();
        graph.add(Resource::new("subnet", "subnet-1")).unwrap();

        let summary = graph.summary();
        assert_eq!(summary.total, 3);
        assert_eq!(summary.count_of("subnet"), 2);
        assert_eq!(summary.count_of("vpc"), 1);
        assert_eq!(summary.count_of("eip"), 0);
        assert_eq!(
            summary.to_string(),
            "Graph: 3 resources (subnet: 2, vpc: 1)"
        );
    }

    #[test]
    fn display_brief_in_declaration_order() {
        let mut graph = ResourceGraph::new();
        graph.add(Resource::new("vpc", "vpc")).unwrap();
        graph.add(Resource::new("subnet", "subnet-0")).unwrap();
        assert_eq!(graph.display_brief(), "+ vpc.vpc\n+ subnet.subnet-0\n");
    }
}
