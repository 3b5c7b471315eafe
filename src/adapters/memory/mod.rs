//! In-process implementation of the external service layer.
//!
//! Holds every object in memory behind `tokio::sync::RwLock`s, mints
//! identifiers under a configured authority, and enforces the rules the
//! external service owns (non-empty catalogs cannot be deleted, entries must
//! agree with their column's grade system).

mod commenting;
mod grading;

pub use commenting::InMemoryCommentingManager;
pub use grading::InMemoryGradingManager;

use crate::domain::id::Id;
use crate::domain::locale::Proxy;
use crate::domain::ports::{CommentingManager, GradingManager, ServiceRuntime};
use crate::utils::error::Result;
use async_trait::async_trait;
use std::sync::Arc;
use tokio::sync::RwLock;
use uuid::Uuid;

#[derive(Debug, Clone)]
pub(crate) struct IdMinter {
    authority: String,
}

impl IdMinter {
    pub(crate) fn new(authority: impl Into<String>) -> Self {
        Self {
            authority: authority.into(),
        }
    }

    pub(crate) fn mint(&self, namespace: &str) -> Id {
        Id::new(namespace, Uuid::new_v4().simple().to_string(), &self.authority)
    }
}

#[derive(Clone)]
pub struct InMemoryService {
    minter: IdMinter,
    commenting: Arc<RwLock<commenting::CommentingStore>>,
    grading: Arc<RwLock<grading::GradingStore>>,
}

impl InMemoryService {
    pub fn new(authority: impl Into<String>) -> Self {
        Self {
            minter: IdMinter::new(authority),
            commenting: Arc::new(RwLock::new(commenting::CommentingStore::default())),
            grading: Arc::new(RwLock::new(grading::GradingStore::default())),
        }
    }
}

#[async_trait]
impl ServiceRuntime for InMemoryService {
    async fn commenting_manager(&self, proxy: &Proxy) -> Result<Arc<dyn CommentingManager>> {
        tracing::debug!("Opening commenting manager for {}", proxy.agent_id);
        Ok(Arc::new(InMemoryCommentingManager::new(
            self.commenting.clone(),
            self.minter.clone(),
            proxy.clone(),
        )))
    }

    async fn grading_manager(&self, proxy: &Proxy) -> Result<Arc<dyn GradingManager>> {
        tracing::debug!("Opening grading manager for {}", proxy.agent_id);
        Ok(Arc::new(InMemoryGradingManager::new(
            self.grading.clone(),
            self.minter.clone(),
            proxy.clone(),
        )))
    }
}
