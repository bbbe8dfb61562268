//! Schemas for the flow-logging resource kinds

use netweave_core::resource::Value;
use netweave_core::schema::{AttributeSchema, AttributeType, ResourceSchema};

use super::{non_empty_string, tags_type};

/// Traffic direction captured by a flow log
pub fn traffic_type() -> AttributeType {
    AttributeType::Enum(vec![
        "ACCEPT".to_string(),
        "REJECT".to_string(),
        "ALL".to_string(),
    ])
}

/// Log retention in days; must be positive
pub fn retention_days() -> AttributeType {
    AttributeType::Custom {
        name: "RetentionDays".to_string(),
        base: Box::new(AttributeType::Int),
        validate: |value| {
            if let Value::Int(n) = value {
                if *n > 0 {
                    Ok(())
                } else {
                    Err(format!("Retention must be a positive number of days, got {}", n))
                }
            } else {
                Err("Expected integer".to_string())
            }
        },
    }
}

pub fn log_group_schema() -> ResourceSchema {
    ResourceSchema::new("log_group")
        .with_description("Log sink receiving flow records")
        .attribute(AttributeSchema::new("log_group_name", non_empty_string()).required())
        .attribute(AttributeSchema::new("retention_in_days", retention_days()))
        .attribute(AttributeSchema::new("tags", tags_type()))
}

pub fn iam_role_schema() -> ResourceSchema {
    ResourceSchema::new("iam_role")
        .with_description("Trust role assumed by the flow-log service")
        .attribute(AttributeSchema::new("role_name", non_empty_string()))
        .attribute(
            AttributeSchema::new("assume_role_policy_document", AttributeType::Any).required(),
        )
        .attribute(AttributeSchema::new("tags", tags_type()))
}

pub fn iam_role_policy_schema() -> ResourceSchema {
    ResourceSchema::new("iam_role_policy")
        .attribute(AttributeSchema::new("policy_name", non_empty_string()).required())
        .attribute(AttributeSchema::new("role_name", AttributeType::String).required())
        .attribute(AttributeSchema::new("policy_document", AttributeType::Any).required())
}

pub fn flow_log_schema() -> ResourceSchema {
    ResourceSchema::new("flow_log")
        .with_description("Flow-log binding for a monitored network")
        .attribute(AttributeSchema::new("resource_id", AttributeType::String).required())
        .attribute(
            AttributeSchema::new(
                "resource_type",
                AttributeType::Enum(vec!["VPC".to_string(), "Subnet".to_string()]),
            )
            .required(),
        )
        .attribute(AttributeSchema::new("traffic_type", traffic_type()))
        .attribute(AttributeSchema::new("log_group_name", AttributeType::String))
        .attribute(AttributeSchema::new(
            "deliver_logs_permission_arn",
            AttributeType::String,
        ))
        .attribute(AttributeSchema::new("tags", tags_type()))
}
