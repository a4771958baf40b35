//! Per-session flash messages.
//!
//! A flash is set by the request that performs a mutation and drained by the
//! next read of a list view, one message per session at a time.

use std::collections::HashMap;
use std::sync::Arc;

use serde::Serialize;
use tokio::sync::Mutex;
use uuid::Uuid;

/// One-shot user-facing notice.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Flash {
    pub kind: FlashKind,
    pub message: String,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum FlashKind {
    Success,
    Error,
}

impl Flash {
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            kind: FlashKind::Success,
            message: message.into(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            kind: FlashKind::Error,
            message: message.into(),
        }
    }
}

/// Pending flashes keyed by session.
#[derive(Clone, Default)]
pub struct FlashStore {
    inner: Arc<Mutex<HashMap<Uuid, Flash>>>,
}

impl FlashStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn set(&self, session: Uuid, flash: Flash) {
        self.inner.lock().await.insert(session, flash);
    }

    /// Remove and return the pending flash, if any.
    pub async fn take(&self, session: Uuid) -> Option<Flash> {
        self.inner.lock().await.remove(&session)
    }
}
