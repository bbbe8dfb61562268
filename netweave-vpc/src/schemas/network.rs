//! Schemas for the core network resource kinds

use netweave_core::schema::{AttributeSchema, AttributeType, ResourceSchema, types};

use super::{non_empty_string, tags_type};

/// Returns the schema for the network resource
///
/// The address block is required; tenancy is restricted to the two modes
/// the component supports.
pub fn vpc_schema() -> ResourceSchema {
    ResourceSchema::new("vpc")
        .with_description("An IPv4 virtual network")
        .attribute(AttributeSchema::new("cidr_block", types::cidr()).required())
        .attribute(
            AttributeSchema::new(
                "instance_tenancy",
                AttributeType::Enum(vec!["default".to_string(), "dedicated".to_string()]),
            )
            .with_description("Tenancy of instances launched into the network"),
        )
        .attribute(AttributeSchema::new("enable_dns_support", AttributeType::Bool))
        .attribute(AttributeSchema::new("enable_dns_hostnames", AttributeType::Bool))
        .attribute(AttributeSchema::new("tags", tags_type()))
        .attribute(
            AttributeSchema::new("id", AttributeType::String)
                .with_description("Engine-assigned identifier (read-only)"),
        )
}

pub fn internet_gateway_schema() -> ResourceSchema {
    ResourceSchema::new("internet_gateway")
        .with_description("Internet gateway bound to the network")
        .attribute(AttributeSchema::new("vpc_id", AttributeType::String).required())
        .attribute(AttributeSchema::new("tags", tags_type()))
}

/// Returns the schema for subnets
///
/// Each subnet carries its zone and whether instances launched into it get
/// a public address.
pub fn subnet_schema() -> ResourceSchema {
    ResourceSchema::new("subnet")
        .attribute(AttributeSchema::new("vpc_id", AttributeType::String).required())
        .attribute(AttributeSchema::new("cidr_block", types::cidr()).required())
        .attribute(AttributeSchema::new("availability_zone", non_empty_string()).required())
        .attribute(AttributeSchema::new(
            "map_public_ip_on_launch",
            AttributeType::Bool,
        ))
        .attribute(AttributeSchema::new("tags", tags_type()))
}

pub fn route_table_schema() -> ResourceSchema {
    ResourceSchema::new("route_table")
        .attribute(AttributeSchema::new("vpc_id", AttributeType::String).required())
        .attribute(AttributeSchema::new("tags", tags_type()))
}

/// Returns the schema for routes
///
/// A route points a destination range at exactly one next-hop target;
/// which target attribute is set depends on the route's purpose.
pub fn route_schema() -> ResourceSchema {
    ResourceSchema::new("route")
        .attribute(AttributeSchema::new("route_table_id", AttributeType::String).required())
        .attribute(AttributeSchema::new("destination_cidr_block", types::cidr()).required())
        .attribute(AttributeSchema::new("gateway_id", AttributeType::String))
        .attribute(AttributeSchema::new("nat_gateway_id", AttributeType::String))
}

pub fn route_table_association_schema() -> ResourceSchema {
    ResourceSchema::new("route_table_association")
        .attribute(AttributeSchema::new("subnet_id", AttributeType::String).required())
        .attribute(AttributeSchema::new("route_table_id", AttributeType::String).required())
}

pub fn eip_schema() -> ResourceSchema {
    ResourceSchema::new("eip")
        .with_description("Elastic address allocated for a NAT gateway")
        .attribute(AttributeSchema::new(
            "domain",
            AttributeType::Enum(vec!["vpc".to_string()]),
        ))
        .attribute(AttributeSchema::new("tags", tags_type()))
}

pub fn nat_gateway_schema() -> ResourceSchema {
    ResourceSchema::new("nat_gateway")
        .with_description("Managed egress point for one zone's private subnet")
        .attribute(AttributeSchema::new("subnet_id", AttributeType::String).required())
        .attribute(AttributeSchema::new("allocation_id", AttributeType::String).required())
        .attribute(AttributeSchema::new("tags", tags_type()))
}

/// Returns the schema for the default security group override
///
/// Egress rules are free-form rule maps; ingress is intentionally absent
/// so the provider's default ingress-deny applies.
pub fn default_security_group_schema() -> ResourceSchema {
    ResourceSchema::new("default_security_group")
        .attribute(AttributeSchema::new("vpc_id", AttributeType::String).required())
        .attribute(AttributeSchema::new(
            "egress",
            AttributeType::List(Box::new(AttributeType::Any)),
        ))
        .attribute(AttributeSchema::new("tags", tags_type()))
}
