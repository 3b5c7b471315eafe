use crate::adapters::memory::InMemoryService;
use crate::config::toml_config::ServiceConfig;
use crate::domain::ports::ServiceRuntime;
use std::sync::Arc;

/// Shared handler state. Holds no mutable data of its own.
#[derive(Clone)]
pub struct AppState {
    pub runtime: Arc<dyn ServiceRuntime>,
    pub authority: String,
    pub default_agent: String,
    pub version: String,
}

impl AppState {
    pub fn new(runtime: Arc<dyn ServiceRuntime>, service: &ServiceConfig) -> Self {
        Self {
            runtime,
            authority: service.authority.clone(),
            default_agent: service.default_agent.clone(),
            version: service.version.clone(),
        }
    }

    pub fn in_memory(service: &ServiceConfig) -> Self {
        Self::new(
            Arc::new(InMemoryService::new(service.authority.clone())),
            service,
        )
    }
}
