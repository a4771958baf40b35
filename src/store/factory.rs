//! Backend selection at process startup.

use std::sync::Arc;

use anyhow::{anyhow, Result};
use uuid::Uuid;

use crate::config::Config;

use super::{DatabaseStore, SessionStores, Store};

/// The backend picked at startup, resolved to a store per request.
///
/// The database store is shared by every session; memory stores are scoped to
/// the session that owns them.
#[derive(Clone)]
pub enum StoreProvider {
    Database(Arc<DatabaseStore>),
    Memory(SessionStores),
}

impl StoreProvider {
    /// Provider for the session-scoped in-memory backend.
    pub fn memory() -> Self {
        Self::Memory(SessionStores::new())
    }

    /// Build the provider named by the configuration.
    pub async fn from_config(config: &Config) -> Result<Self> {
        match config.storage.backend.as_str() {
            "memory" => Ok(Self::memory()),
            "database" => {
                let url = config.storage.database_url.as_deref().ok_or_else(|| {
                    anyhow!("storage.database_url is required for the database backend")
                })?;
                let store = DatabaseStore::connect(url).await?;
                Ok(Self::Database(Arc::new(store)))
            }
            other => Err(anyhow!("Unknown storage backend: {other}")),
        }
    }

    /// Resolve the store serving `session` for the duration of one request.
    pub async fn store_for(&self, session: Uuid) -> Arc<dyn Store> {
        match self {
            Self::Database(store) => Arc::clone(store) as Arc<dyn Store>,
            Self::Memory(sessions) => sessions.store_for(session).await as Arc<dyn Store>,
        }
    }
}
