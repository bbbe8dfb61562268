//! Argument validation for the network component
//!
//! Checks run in a fixed order and abort on the first violation, before
//! any resource is declared. Only presence, shape and CIDR syntax are
//! checked here; subnet-within-block containment and overlap detection are
//! not performed.

use std::sync::LazyLock;

use regex::Regex;
use thiserror::Error;
use tracing::debug;

use crate::config::NetworkConfig;

/// Error raised when the configuration violates a validation rule
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("'{field}' is required and must not be empty")]
    MissingField { field: &'static str },

    #[error("'{field}' must have one entry per availability zone ({expected}), got {got}")]
    LengthMismatch {
        field: &'static str,
        expected: usize,
        got: usize,
    },

    #[error("'{field}' must be an IPv4 CIDR block with a /8 to /30 prefix, got '{value}'")]
    InvalidCidr { field: String, value: String },
}

static CIDR_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(\d{1,3})\.(\d{1,3})\.(\d{1,3})\.(\d{1,3})/(\d{1,2})$")
        .expect("CIDR pattern compiles")
});

/// Check whether a string is an IPv4 CIDR block with octets in 0-255 and a
/// prefix length in 8-30
pub fn is_valid_cidr(s: &str) -> bool {
    let Some(caps) = CIDR_PATTERN.captures(s) else {
        return false;
    };
    let octets_ok = (1..=4).all(|i| caps[i].parse::<u32>().is_ok_and(|octet| octet <= 255));
    let prefix_ok = caps[5].parse::<u32>().is_ok_and(|p| (8..=30).contains(&p));
    octets_ok && prefix_ok
}

/// Validate a [`NetworkConfig`], failing fast on the first violated rule
pub fn validate(config: &NetworkConfig) -> Result<(), ValidationError> {
    if config.address_block.is_empty() {
        return Err(ValidationError::MissingField {
            field: "address_block",
        });
    }
    if config.availability_zones.is_empty() {
        return Err(ValidationError::MissingField {
            field: "availability_zones",
        });
    }

    let zones = config.availability_zones.len();
    if config.public_subnet_cidrs.len() != zones {
        return Err(ValidationError::LengthMismatch {
            field: "public_subnet_cidrs",
            expected: zones,
            got: config.public_subnet_cidrs.len(),
        });
    }
    if config.private_subnet_cidrs.len() != zones {
        return Err(ValidationError::LengthMismatch {
            field: "private_subnet_cidrs",
            expected: zones,
            got: config.private_subnet_cidrs.len(),
        });
    }

    if config.environment.is_empty() {
        return Err(ValidationError::MissingField {
            field: "environment",
        });
    }
    if config.project.is_empty() {
        return Err(ValidationError::MissingField { field: "project" });
    }

    if !is_valid_cidr(&config.address_block) {
        return Err(ValidationError::InvalidCidr {
            field: "address_block".to_string(),
            value: config.address_block.clone(),
        });
    }
    for (i, cidr) in config.public_subnet_cidrs.iter().enumerate() {
        if !is_valid_cidr(cidr) {
            return Err(ValidationError::InvalidCidr {
                field: format!("public_subnet_cidrs[{}]", i),
                value: cidr.clone(),
            });
        }
    }
    for (i, cidr) in config.private_subnet_cidrs.iter().enumerate() {
        if !is_valid_cidr(cidr) {
            return Err(ValidationError::InvalidCidr {
                field: format!("private_subnet_cidrs[{}]", i),
                value: cidr.clone(),
            });
        }
    }

    debug!(
        zones,
        nat = config.nat_enabled,
        flow_logs = config.flow_logs_enabled,
        "network configuration validated"
    );
    Ok(())
}
