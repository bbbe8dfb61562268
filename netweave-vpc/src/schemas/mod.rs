//! Attribute schemas for the resource kinds this component declares
//!
//! Schemas are registered with a [`Scope`](netweave_core::scope::Scope) to
//! validate declarations as they are made.

pub mod logging;
pub mod network;

use netweave_core::resource::Value;
use netweave_core::schema::{AttributeType, ResourceSchema};

/// Tags type shared by all taggable kinds (string map)
pub fn tags_type() -> AttributeType {
    AttributeType::Map(Box::new(AttributeType::String))
}

/// Non-empty string type for names that must be present
pub fn non_empty_string() -> AttributeType {
    AttributeType::Custom {
        name: "NonEmptyString".to_string(),
        base: Box::new(AttributeType::String),
        validate: |value| match value {
            Value::String(s) if s.is_empty() => Err("Must not be empty".to_string()),
            Value::String(_) | Value::ResourceRef(_, _) => Ok(()),
            _ => Err("Expected string".to_string()),
        },
    }
}

/// All schemas, ready for [`Scope::register_schemas`](netweave_core::scope::Scope::register_schemas)
pub fn all_schemas() -> Vec<ResourceSchema> {
    vec![
        network::vpc_schema(),
        network::internet_gateway_schema(),
        network::subnet_schema(),
        network::route_table_schema(),
        network::route_schema(),
        network::route_table_association_schema(),
        network::eip_schema(),
        network::nat_gateway_schema(),
        network::default_security_group_schema(),
        logging::log_group_schema(),
        logging::iam_role_schema(),
        logging::iam_role_policy_schema(),
        logging::flow_log_schema(),
    ]
}
