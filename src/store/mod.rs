//! Persistence contract for lists and todos.
//!
//! One [`Store`] trait, two interchangeable backends: an in-memory store
//! scoped to the requesting session ([`MemoryStore`]) and a relational
//! database store ([`DatabaseStore`]). The backend is picked once at startup
//! through [`StoreProvider`]; handlers only ever see `Arc<dyn Store>`.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

pub mod database;
pub mod factory;
pub mod memory;

pub use database::DatabaseStore;
pub use factory::StoreProvider;
pub use memory::{MemoryStore, SessionStores};

/// Errors surfaced by store operations.
///
/// Backend failures are fatal for the current request and are not retried;
/// the contract makes no distinction between recoverable and fatal errors.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("database error: {0}")]
    Database(#[from] sea_orm::DbErr),
}

/// A single actionable item belonging to exactly one list.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Todo {
    pub id: i32,
    pub name: String,
    pub completed: bool,
    pub list_id: i32,
}

/// A named collection of todos.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct List {
    pub id: i32,
    pub name: String,
    pub todos: Vec<Todo>,
}

impl List {
    pub fn todos_count(&self) -> i64 {
        self.todos.len() as i64
    }

    pub fn todos_remaining_count(&self) -> i64 {
        self.todos.iter().filter(|todo| !todo.completed).count() as i64
    }

    /// A list is complete once it has todos and none of them remain open.
    pub fn is_complete(&self) -> bool {
        !self.todos.is_empty() && self.todos_remaining_count() == 0
    }

    /// Aggregate view of this list. Counts are computed, never stored.
    pub fn summary(&self) -> ListSummary {
        ListSummary {
            id: self.id,
            name: self.name.clone(),
            todos_count: self.todos_count(),
            todos_remaining_count: self.todos_remaining_count(),
        }
    }
}

/// Aggregate view of a list: its identity plus todo counts.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListSummary {
    pub id: i32,
    pub name: String,
    pub todos_count: i64,
    pub todos_remaining_count: i64,
}

impl ListSummary {
    /// A list is complete once it has todos and none of them remain open.
    pub fn is_complete(&self) -> bool {
        self.todos_count > 0 && self.todos_remaining_count == 0
    }
}

/// The persistence contract both backends implement.
///
/// The store trusts its callers: names are validated before any mutation, and
/// existence is checked through [`Store::find_list`]. A missing id is a normal
/// outcome (`None`) for lookups and a silent no-op for mutations, never an
/// error.
#[async_trait]
pub trait Store: Send + Sync {
    /// All list summaries, ordered by id ascending.
    async fn all_lists(&self) -> Result<Vec<ListSummary>, StoreError>;

    /// Look up one list with its todos. `None` when the id is unknown.
    async fn find_list(&self, id: i32) -> Result<Option<List>, StoreError>;

    /// Allocate a fresh id and create an empty list under `name`.
    async fn create_list(&self, name: &str) -> Result<(), StoreError>;

    /// Rename a list in place. No-op when the id is unknown.
    async fn update_list_name(&self, id: i32, new_name: &str) -> Result<(), StoreError>;

    /// Remove a list and every todo it owns. Todos go first, then the list;
    /// the two steps are not atomic.
    async fn delete_list(&self, id: i32) -> Result<(), StoreError>;

    /// Add an open todo to a list, with an id fresh within that list.
    async fn create_todo(&self, list_id: i32, name: &str) -> Result<(), StoreError>;

    /// Remove one todo from a list.
    async fn delete_todo(&self, list_id: i32, todo_id: i32) -> Result<(), StoreError>;

    /// Set the completion flag of one todo.
    async fn update_todo_status(
        &self,
        list_id: i32,
        todo_id: i32,
        completed: bool,
    ) -> Result<(), StoreError>;

    /// Mark every todo of a list completed. Idempotent.
    async fn mark_all_completed(&self, list_id: i32) -> Result<(), StoreError>;

    /// The todos of a list in deterministic order: id ascending for the
    /// database backend, insertion order for the in-memory backend.
    async fn todos_for_list(&self, list_id: i32) -> Result<Vec<Todo>, StoreError>;
}
