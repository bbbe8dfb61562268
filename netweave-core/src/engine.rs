//! Engine - Seam to the external provisioning engine
//!
//! The provisioning engine owns diffing, dependency ordering, apply and
//! rollback. Components only build a [`ResourceGraph`]; an Engine
//! implementation turns that graph into actual infrastructure state. This
//! crate ships no real engine, only the trait boundary.

use std::future::Future;
use std::pin::Pin;

use crate::graph::ResourceGraph;
use crate::resource::ResourceId;

/// Error type for Engine operations
#[derive(Debug)]
pub struct EngineError {
    pub message: String,
    pub resource_id: Option<ResourceId>,
    pub cause: Option<Box<dyn std::error::Error + Send + Sync>>,
}

impl std::fmt::Display for EngineError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if let Some(ref id) = self.resource_id {
            write!(f, "[{}] {}", id, self.message)
        } else {
            write!(f, "{}", self.message)
        }
    }
}

impl std::error::Error for EngineError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.cause
            .as_ref()
            .map(|e| e.as_ref() as &dyn std::error::Error)
    }
}

impl EngineError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            resource_id: None,
            cause: None,
        }
    }

    pub fn for_resource(mut self, id: ResourceId) -> Self {
        self.resource_id = Some(id);
        self
    }

    pub fn with_cause(mut self, cause: impl std::error::Error + Send + Sync + 'static) -> Self {
        self.cause = Some(Box::new(cause));
        self
    }
}

pub type EngineResult<T> = Result<T, EngineError>;

/// Return type for async operations
pub type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

/// Outcome of handing a graph to the engine
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ApplySummary {
    pub created: usize,
    pub unchanged: usize,
}

/// External provisioning engine boundary
///
/// Implementations must respect the graph's reference edges when choosing
/// creation order (a route referencing a NAT gateway id is applied after
/// that NAT gateway). Errors from the engine propagate to the caller
/// unmodified; no retries or partial-state cleanup happen on this side of
/// the boundary.
pub trait Engine: Send + Sync {
    /// Name of this Engine (e.g., "aws")
    fn name(&self) -> &'static str;

    /// Apply a declared graph
    fn apply(&self, graph: &ResourceGraph) -> BoxFuture<'_, EngineResult<ApplySummary>>;
}

/// Engine implementation for Box<dyn Engine>
/// This enables dynamic dispatch for Engines
impl Engine for Box<dyn Engine> {
    fn name(&self) -> &'static str {
        (**self).name()
    }

    fn apply(&self, graph: &ResourceGraph) -> BoxFuture<'_, EngineResult<ApplySummary>> {
        (**self).apply(graph)
    }
}
