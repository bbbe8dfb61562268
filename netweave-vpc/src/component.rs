//! Network component - declares a VPC topology as a resource graph
//!
//! Translates a validated [`NetworkConfig`] into resource declarations
//! wired with deferred references. The declaration pass is a single
//! synchronous enumeration with no suspension points; the provisioning
//! engine resolves actual creation order from the reference edges.

use std::collections::HashMap;

use netweave_core::resource::{Resource, Value};
use netweave_core::scope::{OutputValue, ResourceHandle, Scope, ScopeError};
use tracing::info;

use crate::config::NetworkConfig;
use crate::outputs::{FlowLogId, NetworkOutputs};
use crate::validate::{self, ValidationError};

/// Error declaring a network
#[derive(Debug, thiserror::Error)]
pub enum NetworkError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Scope(#[from] ScopeError),
}

/// Declare the full network topology into `scope` and return its outputs
///
/// Validation runs first and aborts before anything is declared. The
/// declaration order follows the reference edges: network, internet
/// gateway, per-zone subnets, route tables and their associations, the
/// default security group override, and the optional flow-logging bundle.
/// Output lists follow the input zone order.
pub fn declare_network(
    scope: &mut Scope,
    config: &NetworkConfig,
) -> Result<NetworkOutputs, NetworkError> {
    validate::validate(config)?;

    let zone_count = config.zone_count();
    info!(
        component = scope.name(),
        zones = zone_count,
        nat = config.nat_enabled,
        flow_logs = config.flow_logs_enabled,
        "declaring network topology"
    );

    let vpc_tags = merged_tags(config, scope.scoped_name("vpc"), &[]);
    let vpc = scope.declare(
        Resource::new("vpc", "vpc")
            .with_attribute("cidr_block", Value::String(config.address_block.clone()))
            .with_attribute(
                "instance_tenancy",
                Value::String(config.tenancy.as_str().to_string()),
            )
            .with_attribute("enable_dns_support", Value::Bool(true))
            .with_attribute("enable_dns_hostnames", Value::Bool(true))
            .with_attribute("tags", vpc_tags),
    )?;

    let igw_tags = merged_tags(config, scope.scoped_name("igw"), &[]);
    let igw = scope.declare(
        Resource::new("internet_gateway", "igw")
            .with_attribute("vpc_id", vpc.attr("id").into())
            .with_attribute("tags", igw_tags),
    )?;

    // One public and one private subnet per zone, paired by index
    let mut public_subnets = Vec::with_capacity(zone_count);
    let mut private_subnets = Vec::with_capacity(zone_count);
    for (i, zone) in config.availability_zones.iter().enumerate() {
        let local = format!("public-subnet-{}", i);
        let tags = merged_tags(
            config,
            scope.scoped_name(&local),
            &[("Zone", zone), ("Type", "public")],
        );
        let subnet = scope.declare(
            Resource::new("subnet", &local)
                .with_attribute("vpc_id", vpc.attr("id").into())
                .with_attribute(
                    "cidr_block",
                    Value::String(config.public_subnet_cidrs[i].clone()),
                )
                .with_attribute("availability_zone", Value::String(zone.clone()))
                .with_attribute("map_public_ip_on_launch", Value::Bool(true))
                .with_attribute("tags", tags),
        )?;
        public_subnets.push(subnet);

        let local = format!("private-subnet-{}", i);
        let tags = merged_tags(
            config,
            scope.scoped_name(&local),
            &[("Zone", zone), ("Type", "private")],
        );
        let subnet = scope.declare(
            Resource::new("subnet", &local)
                .with_attribute("vpc_id", vpc.attr("id").into())
                .with_attribute(
                    "cidr_block",
                    Value::String(config.private_subnet_cidrs[i].clone()),
                )
                .with_attribute("availability_zone", Value::String(zone.clone()))
                .with_attribute("map_public_ip_on_launch", Value::Bool(false))
                .with_attribute("tags", tags),
        )?;
        private_subnets.push(subnet);
    }

    // Single shared route table for all public subnets
    let public_rt_tags = merged_tags(config, scope.scoped_name("public-rt"), &[]);
    let public_rt = scope.declare(
        Resource::new("route_table", "public-rt")
            .with_attribute("vpc_id", vpc.attr("id").into())
            .with_attribute("tags", public_rt_tags),
    )?;
    scope.declare(
        Resource::new("route", "public-default-route")
            .with_attribute("route_table_id", public_rt.attr("id").into())
            .with_attribute(
                "destination_cidr_block",
                Value::String("0.0.0.0/0".to_string()),
            )
            .with_attribute("gateway_id", igw.attr("id").into()),
    )?;
    for (i, subnet) in public_subnets.iter().enumerate() {
        scope.declare(
            Resource::new("route_table_association", format!("public-rta-{}", i))
                .with_attribute("subnet_id", subnet.attr("id").into())
                .with_attribute("route_table_id", public_rt.attr("id").into()),
        )?;
    }

    // Private routing: one route table per zone. With NAT enabled each
    // table gets a default route to its own zone's NAT gateway; without
    // NAT the tables carry no default route.
    let mut nat_gateways = Vec::new();
    let mut private_route_tables = Vec::with_capacity(zone_count);
    if config.nat_enabled {
        for (i, zone) in config.availability_zones.iter().enumerate() {
            let local = format!("nat-eip-{}", i);
            let tags = merged_tags(config, scope.scoped_name(&local), &[("Zone", zone)]);
            let eip = scope.declare(
                Resource::new("eip", &local)
                    .with_attribute("domain", Value::String("vpc".to_string()))
                    .with_attribute("tags", tags),
            )?;

            let local = format!("nat-{}", i);
            let tags = merged_tags(config, scope.scoped_name(&local), &[("Zone", zone)]);
            let nat = scope.declare(
                Resource::new("nat_gateway", &local)
                    .with_attribute("subnet_id", public_subnets[i].attr("id").into())
                    .with_attribute("allocation_id", eip.attr("id").into())
                    .with_attribute("tags", tags),
            )?;

            let local = format!("private-rt-{}", i);
            let tags = merged_tags(config, scope.scoped_name(&local), &[("Zone", zone)]);
            let rt = scope.declare(
                Resource::new("route_table", &local)
                    .with_attribute("vpc_id", vpc.attr("id").into())
                    .with_attribute("tags", tags),
            )?;
            scope.declare(
                Resource::new("route", format!("private-default-route-{}", i))
                    .with_attribute("route_table_id", rt.attr("id").into())
                    .with_attribute(
                        "destination_cidr_block",
                        Value::String("0.0.0.0/0".to_string()),
                    )
                    .with_attribute("nat_gateway_id", nat.attr("id").into()),
            )?;

            nat_gateways.push(nat);
            private_route_tables.push(rt);
        }
    } else {
        for (i, zone) in config.availability_zones.iter().enumerate() {
            let local = format!("private-rt-{}", i);
            let tags = merged_tags(config, scope.scoped_name(&local), &[("Zone", zone)]);
            let rt = scope.declare(
                Resource::new("route_table", &local)
                    .with_attribute("vpc_id", vpc.attr("id").into())
                    .with_attribute("tags", tags),
            )?;
            private_route_tables.push(rt);
        }
    }
    for (i, subnet) in private_subnets.iter().enumerate() {
        scope.declare(
            Resource::new("route_table_association", format!("private-rta-{}", i))
                .with_attribute("subnet_id", subnet.attr("id").into())
                .with_attribute("route_table_id", private_route_tables[i].attr("id").into()),
        )?;
    }

    // Default security group: all egress, no explicit ingress
    let default_sg_tags = merged_tags(config, scope.scoped_name("default-sg"), &[]);
    let egress_rule = Value::Map(HashMap::from([
        ("protocol".to_string(), Value::String("-1".to_string())),
        ("from_port".to_string(), Value::Int(0)),
        ("to_port".to_string(), Value::Int(0)),
        (
            "cidr_blocks".to_string(),
            Value::List(vec![Value::String("0.0.0.0/0".to_string())]),
        ),
    ]));
    scope.declare(
        Resource::new("default_security_group", "default-sg")
            .with_attribute("vpc_id", vpc.attr("id").into())
            .with_attribute("egress", Value::List(vec![egress_rule]))
            .with_attribute("tags", default_sg_tags),
    )?;

    // Flow logging is declared as a complete bundle or not at all
    let flow_log_id = if config.flow_logs_enabled {
        let log_group_name = format!("/vpc/flow-logs/{}", scope.name());
        let tags = merged_tags(config, scope.scoped_name("flow-log-group"), &[]);
        let log_group = scope.declare(
            Resource::new("log_group", "flow-log-group")
                .with_attribute("log_group_name", Value::String(log_group_name))
                .with_attribute(
                    "retention_in_days",
                    Value::Int(config.flow_log_retention_days),
                )
                .with_attribute("tags", tags),
        )?;

        let role_name = scope.scoped_name("flow-log-role");
        let tags = merged_tags(config, role_name.clone(), &[]);
        let role = scope.declare(
            Resource::new("iam_role", "flow-log-role")
                .with_attribute("role_name", Value::String(role_name))
                .with_attribute("assume_role_policy_document", flow_log_trust_policy())
                .with_attribute("tags", tags),
        )?;

        scope.declare(
            Resource::new("iam_role_policy", "flow-log-role-policy")
                .with_attribute("policy_name", Value::String("flow-log-writer".to_string()))
                .with_attribute("role_name", role.attr("name").into())
                .with_attribute("policy_document", flow_log_access_policy(&log_group)),
        )?;

        let tags = merged_tags(config, scope.scoped_name("flow-log"), &[]);
        let flow_log = scope.declare(
            Resource::new("flow_log", "flow-log")
                .with_attribute("resource_id", vpc.attr("id").into())
                .with_attribute("resource_type", Value::String("VPC".to_string()))
                .with_attribute("traffic_type", Value::String("ALL".to_string()))
                .with_attribute("log_group_name", log_group.attr("name").into())
                .with_attribute("deliver_logs_permission_arn", role.attr("arn").into())
                .with_attribute("tags", tags),
        )?;
        FlowLogId::Enabled(flow_log.attr("id"))
    } else {
        FlowLogId::Disabled
    };

    let outputs = NetworkOutputs {
        vpc_id: vpc.attr("id"),
        vpc_cidr: config.address_block.clone(),
        public_subnet_ids: public_subnets.iter().map(|s| s.attr("id")).collect(),
        private_subnet_ids: private_subnets.iter().map(|s| s.attr("id")).collect(),
        public_route_table_id: public_rt.attr("id"),
        private_route_table_ids: private_route_tables.iter().map(|rt| rt.attr("id")).collect(),
        nat_gateway_ids: nat_gateways.iter().map(|nat| nat.attr("id")).collect(),
        internet_gateway_id: igw.attr("id"),
        flow_log_id,
    };

    scope.export("vpc_id", OutputValue::Ref(outputs.vpc_id.clone()));
    scope.export(
        "vpc_cidr",
        OutputValue::Literal(Value::String(outputs.vpc_cidr.clone())),
    );
    scope.export(
        "public_subnet_ids",
        OutputValue::RefList(outputs.public_subnet_ids.clone()),
    );
    scope.export(
        "private_subnet_ids",
        OutputValue::RefList(outputs.private_subnet_ids.clone()),
    );
    scope.export(
        "public_route_table_id",
        OutputValue::Ref(outputs.public_route_table_id.clone()),
    );
    scope.export(
        "private_route_table_ids",
        OutputValue::RefList(outputs.private_route_table_ids.clone()),
    );
    scope.export(
        "nat_gateway_ids",
        OutputValue::RefList(outputs.nat_gateway_ids.clone()),
    );
    scope.export(
        "internet_gateway_id",
        OutputValue::Ref(outputs.internet_gateway_id.clone()),
    );
    scope.export(
        "flow_log_id",
        match &outputs.flow_log_id {
            FlowLogId::Enabled(r) => OutputValue::Ref(r.clone()),
            FlowLogId::Disabled => OutputValue::Absent,
        },
    );

    Ok(outputs)
}

/// Merge the configured extra tags with the standard tag set and any
/// per-resource tags. Standard and per-resource keys win on collision.
fn merged_tags(config: &NetworkConfig, name: String, extras: &[(&str, &str)]) -> Value {
    let mut tags: HashMap<String, Value> = config
        .extra_tags
        .iter()
        .map(|(k, v)| (k.clone(), Value::String(v.clone())))
        .collect();
    tags.insert("Name".to_string(), Value::String(name));
    tags.insert(
        "Environment".to_string(),
        Value::String(config.environment.clone()),
    );
    tags.insert("Project".to_string(), Value::String(config.project.clone()));
    tags.insert(
        "ManagedBy".to_string(),
        Value::String("netweave".to_string()),
    );
    for (key, value) in extras {
        tags.insert(key.to_string(), Value::String(value.to_string()));
    }
    Value::Map(tags)
}

/// Trust policy allowing the flow-log service to assume the role
fn flow_log_trust_policy() -> Value {
    Value::Map(HashMap::from([
        (
            "version".to_string(),
            Value::String("2012-10-17".to_string()),
        ),
        (
            "statement".to_string(),
            Value::List(vec![Value::Map(HashMap::from([
                ("effect".to_string(), Value::String("Allow".to_string())),
                (
                    "action".to_string(),
                    Value::String("sts:AssumeRole".to_string()),
                ),
                (
                    "principal".to_string(),
                    Value::Map(HashMap::from([(
                        "service".to_string(),
                        Value::String("vpc-flow-logs.amazonaws.com".to_string()),
                    )])),
                ),
            ]))]),
        ),
    ]))
}

/// Minimal log-write and describe permissions, scoped to the sink
fn flow_log_access_policy(log_group: &ResourceHandle) -> Value {
    Value::Map(HashMap::from([
        (
            "version".to_string(),
            Value::String("2012-10-17".to_string()),
        ),
        (
            "statement".to_string(),
            Value::List(vec![Value::Map(HashMap::from([
                ("effect".to_string(), Value::String("Allow".to_string())),
                (
                    "action".to_string(),
                    Value::List(vec![
                        Value::String("logs:CreateLogStream".to_string()),
                        Value::String("logs:PutLogEvents".to_string()),
                        Value::String("logs:DescribeLogGroups".to_string()),
                        Value::String("logs:DescribeLogStreams".to_string()),
                    ]),
                ),
                ("resource".to_string(), log_group.attr("arn").into()),
            ]))]),
        ),
    ]))
}
