//! Netweave Core
//!
//! Declaration model shared by netweave infrastructure components:
//! resources with deferred cross-references, the scope capability they are
//! declared through, and the seam to the external provisioning engine that
//! turns a declared graph into cloud state.

pub mod engine;
pub mod graph;
pub mod resource;
pub mod schema;
pub mod scope;
