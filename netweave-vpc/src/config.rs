//! Configuration for the network component

use std::collections::HashMap;
use std::fmt;

use serde::{Deserialize, Serialize};

/// Instance tenancy mode for the network
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Tenancy {
    #[default]
    Default,
    Dedicated,
}

impl Tenancy {
    pub fn as_str(&self) -> &'static str {
        match self {
            Tenancy::Default => "default",
            Tenancy::Dedicated => "dedicated",
        }
    }
}

impl fmt::Display for Tenancy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Configuration for a VPC network topology
///
/// Required fields are the address block, the zone list, the two subnet
/// CIDR lists (index-paired with the zones) and the environment/project
/// labels. Everything else defaults: default tenancy, NAT and flow logs
/// enabled, 7-day flow-log retention, no extra tags.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NetworkConfig {
    /// IPv4 CIDR block for the network (e.g., "10.0.0.0/16")
    pub address_block: String,
    /// Availability zones; one public and one private subnet per zone
    pub availability_zones: Vec<String>,
    /// Public subnet CIDRs, index-paired with `availability_zones`
    pub public_subnet_cidrs: Vec<String>,
    /// Private subnet CIDRs, index-paired with `availability_zones`
    pub private_subnet_cidrs: Vec<String>,
    /// Environment label applied to every resource tag set
    pub environment: String,
    /// Project label applied to every resource tag set
    pub project: String,
    #[serde(default)]
    pub tenancy: Tenancy,
    /// One NAT gateway per zone when enabled
    #[serde(default = "default_true")]
    pub nat_enabled: bool,
    #[serde(default = "default_true")]
    pub flow_logs_enabled: bool,
    /// Retention for the flow-log sink, in days
    #[serde(default = "default_retention_days")]
    pub flow_log_retention_days: i64,
    /// Additional tags merged into every resource tag set
    #[serde(default)]
    pub extra_tags: HashMap<String, String>,
}

fn default_true() -> bool {
    true
}

fn default_retention_days() -> i64 {
    7
}

impl NetworkConfig {
    pub fn new(
        address_block: impl Into<String>,
        environment: impl Into<String>,
        project: impl Into<String>,
    ) -> Self {
        Self {
            address_block: address_block.into(),
            availability_zones: Vec::new(),
            public_subnet_cidrs: Vec::new(),
            private_subnet_cidrs: Vec::new(),
            environment: environment.into(),
            project: project.into(),
            tenancy: Tenancy::Default,
            nat_enabled: true,
            flow_logs_enabled: true,
            flow_log_retention_days: default_retention_days(),
            extra_tags: HashMap::new(),
        }
    }

    /// Set the zones and their index-paired subnet CIDR lists
    pub fn with_zones(
        mut self,
        zones: Vec<String>,
        public_cidrs: Vec<String>,
        private_cidrs: Vec<String>,
    ) -> Self {
        self.availability_zones = zones;
        self.public_subnet_cidrs = public_cidrs;
        self.private_subnet_cidrs = private_cidrs;
        self
    }

    pub fn with_tenancy(mut self, tenancy: Tenancy) -> Self {
        self.tenancy = tenancy;
        self
    }

    pub fn with_nat(mut self, enabled: bool) -> Self {
        self.nat_enabled = enabled;
        self
    }

    pub fn with_flow_logs(mut self, enabled: bool) -> Self {
        self.flow_logs_enabled = enabled;
        self
    }

    pub fn with_flow_log_retention_days(mut self, days: i64) -> Self {
        self.flow_log_retention_days = days;
        self
    }

    pub fn with_extra_tag(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.extra_tags.insert(key.into(), value.into());
        self
    }

    pub fn zone_count(&self) -> usize {
        self.availability_zones.len()
    }
}
