//! Resource kind configurations for the provisioning engine
//!
//! This module defines:
//! - The resource kinds the network component declares
//! - Mapping between kind attribute names and provider property names

// =============================================================================
// Resource Configuration
// =============================================================================

/// Attribute mapping: (attribute_name, provider_name, is_required_for_create)
pub type AttrMapping = (&'static str, &'static str, bool);

/// Resource kind configuration
pub struct ResourceConfig {
    /// Provider type name (e.g., "AWS::EC2::VPC")
    pub provider_type_name: &'static str,
    /// Standard attribute mappings (attribute name -> provider name)
    pub attributes: &'static [AttrMapping],
    /// Whether this resource kind carries tags
    pub has_tags: bool,
}

// =============================================================================
// Network Resources
// =============================================================================

pub const VPC_CONFIG: ResourceConfig = ResourceConfig {
    provider_type_name: "AWS::EC2::VPC",
    attributes: &[
        ("cidr_block", "CidrBlock", true),
        ("enable_dns_support", "EnableDnsSupport", false),
        ("enable_dns_hostnames", "EnableDnsHostnames", false),
        ("instance_tenancy", "InstanceTenancy", false),
    ],
    has_tags: true,
};

pub const INTERNET_GATEWAY_CONFIG: ResourceConfig = ResourceConfig {
    provider_type_name: "AWS::EC2::InternetGateway",
    attributes: &[("vpc_id", "VpcId", true)],
    has_tags: true,
};

pub const SUBNET_CONFIG: ResourceConfig = ResourceConfig {
    provider_type_name: "AWS::EC2::Subnet",
    attributes: &[
        ("vpc_id", "VpcId", true),
        ("cidr_block", "CidrBlock", true),
        ("availability_zone", "AvailabilityZone", false),
        ("map_public_ip_on_launch", "MapPublicIpOnLaunch", false),
    ],
    has_tags: true,
};

// =============================================================================
// Route Resources
// =============================================================================

pub const ROUTE_TABLE_CONFIG: ResourceConfig = ResourceConfig {
    provider_type_name: "AWS::EC2::RouteTable",
    attributes: &[("vpc_id", "VpcId", true)],
    has_tags: true,
};

pub const ROUTE_CONFIG: ResourceConfig = ResourceConfig {
    provider_type_name: "AWS::EC2::Route",
    attributes: &[
        ("route_table_id", "RouteTableId", true),
        ("destination_cidr_block", "DestinationCidrBlock", true),
        ("gateway_id", "GatewayId", false),
        ("nat_gateway_id", "NatGatewayId", false),
    ],
    has_tags: false,
};

pub const ROUTE_TABLE_ASSOCIATION_CONFIG: ResourceConfig = ResourceConfig {
    provider_type_name: "AWS::EC2::SubnetRouteTableAssociation",
    attributes: &[
        ("subnet_id", "SubnetId", true),
        ("route_table_id", "RouteTableId", true),
    ],
    has_tags: false,
};

// =============================================================================
// NAT / EIP Resources
// =============================================================================

pub const EIP_CONFIG: ResourceConfig = ResourceConfig {
    provider_type_name: "AWS::EC2::EIP",
    attributes: &[("domain", "Domain", false)],
    has_tags: true,
};

pub const NAT_GATEWAY_CONFIG: ResourceConfig = ResourceConfig {
    provider_type_name: "AWS::EC2::NatGateway",
    attributes: &[
        ("subnet_id", "SubnetId", true),
        ("allocation_id", "AllocationId", false),
    ],
    has_tags: true,
};

// =============================================================================
// Security Resources
// =============================================================================

pub const DEFAULT_SECURITY_GROUP_CONFIG: ResourceConfig = ResourceConfig {
    provider_type_name: "AWS::EC2::SecurityGroup",
    attributes: &[("vpc_id", "VpcId", true), ("egress", "SecurityGroupEgress", false)],
    has_tags: true,
};

// =============================================================================
// Flow Logging Resources
// =============================================================================

pub const LOG_GROUP_CONFIG: ResourceConfig = ResourceConfig {
    provider_type_name: "AWS::Logs::LogGroup",
    attributes: &[
        ("log_group_name", "LogGroupName", true),
        ("retention_in_days", "RetentionInDays", false),
    ],
    has_tags: true,
};

pub const IAM_ROLE_CONFIG: ResourceConfig = ResourceConfig {
    provider_type_name: "AWS::IAM::Role",
    attributes: &[
        ("role_name", "RoleName", false),
        ("assume_role_policy_document", "AssumeRolePolicyDocument", true),
    ],
    has_tags: true,
};

pub const IAM_ROLE_POLICY_CONFIG: ResourceConfig = ResourceConfig {
    provider_type_name: "AWS::IAM::RolePolicy",
    attributes: &[
        ("policy_name", "PolicyName", true),
        ("role_name", "RoleName", true),
        ("policy_document", "PolicyDocument", true),
    ],
    has_tags: false,
};

pub const FLOW_LOG_CONFIG: ResourceConfig = ResourceConfig {
    provider_type_name: "AWS::EC2::FlowLog",
    attributes: &[
        ("resource_id", "ResourceId", true),
        ("resource_type", "ResourceType", true),
        ("traffic_type", "TrafficType", false),
        ("log_group_name", "LogGroupName", false),
        ("deliver_logs_permission_arn", "DeliverLogsPermissionArn", false),
    ],
    has_tags: true,
};

// =============================================================================
// Config Lookup
// =============================================================================

/// Get the resource configuration for a kind
pub fn get_resource_config(kind: &str) -> Option<&'static ResourceConfig> {
    match kind {
        "vpc" => Some(&VPC_CONFIG),
        "internet_gateway" => Some(&INTERNET_GATEWAY_CONFIG),
        "subnet" => Some(&SUBNET_CONFIG),
        "route_table" => Some(&ROUTE_TABLE_CONFIG),
        "route" => Some(&ROUTE_CONFIG),
        "route_table_association" => Some(&ROUTE_TABLE_ASSOCIATION_CONFIG),
        "eip" => Some(&EIP_CONFIG),
        "nat_gateway" => Some(&NAT_GATEWAY_CONFIG),
        "default_security_group" => Some(&DEFAULT_SECURITY_GROUP_CONFIG),
        "log_group" => Some(&LOG_GROUP_CONFIG),
        "iam_role" => Some(&IAM_ROLE_CONFIG),
        "iam_role_policy" => Some(&IAM_ROLE_POLICY_CONFIG),
        "flow_log" => Some(&FLOW_LOG_CONFIG),
        _ => None,
    }
}

/// All resource kinds the component declares
pub fn resource_kinds() -> &'static [&'static str] {
    &[
        "vpc",
        "internet_gateway",
        "subnet",
        "route_table",
        "route",
        "route_table_association",
        "eip",
        "nat_gateway",
        "default_security_group",
        "log_group",
        "iam_role",
        "iam_role_policy",
        "flow_log",
    ]
}
