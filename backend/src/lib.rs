//! Project hub backend library.
//!
//! Hexagonal layout: [`domain`] holds entities, ports, and the lifecycle
//! service; [`inbound`] adapts HTTP onto the driving ports; [`outbound`]
//! provides the in-process adapters behind the driven ports.

pub mod doc;
pub mod domain;
pub mod inbound;
pub mod outbound;
#[cfg(feature = "test-support")]
pub mod test_support;

/// Public OpenAPI surface used by Swagger UI and tooling.
pub use doc::ApiDoc;
