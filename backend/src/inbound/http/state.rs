//! Shared HTTP adapter state.
//!
//! HTTP handlers accept this state via `actix_web::web::Data` so they only
//! depend on domain ports (use-cases) and remain testable without I/O.

use std::sync::Arc;

use crate::domain::ports::{ProjectLifecycleCommand, ProjectLifecycleQuery};

/// Parameter object bundling the driving ports used by HTTP handlers.
#[derive(Clone)]
pub struct HttpStatePorts {
    pub projects: Arc<dyn ProjectLifecycleCommand>,
    pub projects_query: Arc<dyn ProjectLifecycleQuery>,
}

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    pub projects: Arc<dyn ProjectLifecycleCommand>,
    pub projects_query: Arc<dyn ProjectLifecycleQuery>,
}

impl From<HttpStatePorts> for HttpState {
    fn from(ports: HttpStatePorts) -> Self {
        Self::new(ports)
    }
}

impl HttpState {
    /// Construct state from a ports bundle.
    ///
    /// The lifecycle service implements both ports, so the same `Arc` usually
    /// backs both fields.
    ///
    /// # Examples
    /// ```no_run
    /// use std::sync::Arc;
    ///
    /// use project_hub::domain::{LifecyclePorts, ProjectLifecycleService};
    /// use project_hub::inbound::http::state::{HttpState, HttpStatePorts};
    ///
    /// fn build(ports: LifecyclePorts) -> HttpState {
    ///     let service = Arc::new(ProjectLifecycleService::new(ports));
    ///     HttpState::new(HttpStatePorts {
    ///         projects: service.clone(),
    ///         projects_query: service,
    ///     })
    /// }
    /// ```
    pub fn new(ports: HttpStatePorts) -> Self {
        let HttpStatePorts {
            projects,
            projects_query,
        } = ports;
        Self {
            projects,
            projects_query,
        }
    }
}
