//! Outputs exposed by the network component

use netweave_core::resource::AttrRef;

/// Flow-log output: a concrete identifier reference when logging is
/// enabled, or an explicit disabled marker. Never a bare null, so a
/// disabled feature stays distinguishable from a not-yet-resolved value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FlowLogId {
    Enabled(AttrRef),
    Disabled,
}

impl FlowLogId {
    pub fn is_enabled(&self) -> bool {
        matches!(self, FlowLogId::Enabled(_))
    }

    pub fn as_attr_ref(&self) -> Option<&AttrRef> {
        match self {
            FlowLogId::Enabled(r) => Some(r),
            FlowLogId::Disabled => None,
        }
    }
}

/// Identifiers and derived values surfaced to callers
///
/// All lists follow the input zone order: `public_subnet_ids[i]`,
/// `private_subnet_ids[i]`, `private_route_table_ids[i]` and
/// `nat_gateway_ids[i]` all belong to `availability_zones[i]`.
#[derive(Debug, Clone, PartialEq)]
pub struct NetworkOutputs {
    pub vpc_id: AttrRef,
    pub vpc_cidr: String,
    pub public_subnet_ids: Vec<AttrRef>,
    pub private_subnet_ids: Vec<AttrRef>,
    pub public_route_table_id: AttrRef,
    pub private_route_table_ids: Vec<AttrRef>,
    /// Empty when NAT is disabled
    pub nat_gateway_ids: Vec<AttrRef>,
    pub internet_gateway_id: AttrRef,
    pub flow_log_id: FlowLogId,
}
