//! Engine-facing declaration payloads
//!
//! Converts declared resources into the JSON document shape the
//! provisioning engine consumes: provider type names and property names
//! come from the resource configuration tables, tag maps become Key/Value
//! lists, and deferred references are rendered as `$ref` objects for the
//! engine to resolve during apply.

use heck::ToPascalCase;
use netweave_core::graph::ResourceGraph;
use netweave_core::resource::{Resource, Value};
use serde_json::{Value as JsonValue, json};

use crate::resources::get_resource_config;

/// Error rendering a declaration
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RenderError {
    #[error("no resource configuration for kind '{kind}'")]
    UnknownKind { kind: String },
}

/// Render a single resource declaration
pub fn render_resource(resource: &Resource) -> Result<JsonValue, RenderError> {
    let config = get_resource_config(&resource.id.kind).ok_or_else(|| RenderError::UnknownKind {
        kind: resource.id.kind.clone(),
    })?;

    let mut properties = serde_json::Map::new();
    for (key, value) in &resource.attributes {
        if key == "tags" {
            if config.has_tags {
                properties.insert("Tags".to_string(), render_tags(value));
            }
            continue;
        }
        let provider_name = config
            .attributes
            .iter()
            .find(|(attr, _, _)| *attr == key.as_str())
            .map(|(_, provider, _)| (*provider).to_string())
            .unwrap_or_else(|| key.to_pascal_case());
        properties.insert(provider_name, value_to_json(value));
    }

    Ok(json!({
        "type": config.provider_type_name,
        "name": resource.id.name,
        "properties": JsonValue::Object(properties),
    }))
}

/// Render a whole graph, in declaration order
pub fn render_graph(graph: &ResourceGraph) -> Result<JsonValue, RenderError> {
    let mut resources = Vec::with_capacity(graph.len());
    for resource in graph.resources() {
        resources.push(render_resource(resource)?);
    }
    Ok(json!({ "resources": resources }))
}

/// Tag maps render as a Key/Value list, sorted by key
fn render_tags(value: &Value) -> JsonValue {
    let Value::Map(map) = value else {
        return value_to_json(value);
    };
    let mut entries: Vec<(&String, &Value)> = map.iter().collect();
    entries.sort_by(|a, b| a.0.cmp(b.0));
    JsonValue::Array(
        entries
            .into_iter()
            .map(|(k, v)| json!({ "Key": k, "Value": value_to_json(v) }))
            .collect(),
    )
}

fn value_to_json(value: &Value) -> JsonValue {
    match value {
        Value::String(s) => json!(s),
        Value::Int(n) => json!(n),
        Value::Bool(b) => json!(b),
        Value::List(items) => JsonValue::Array(items.iter().map(value_to_json).collect()),
        // Nested map keys are pascal-cased to match provider documents
        // (e.g. policy bodies: "statement" -> "Statement")
        Value::Map(map) => {
            let mut obj = serde_json::Map::new();
            for (k, v) in map {
                obj.insert(k.to_pascal_case(), value_to_json(v));
            }
            JsonValue::Object(obj)
        }
        Value::ResourceRef(binding, attribute) => json!({
            "$ref": { "binding": binding, "attribute": attribute }
        }),
    }
}
