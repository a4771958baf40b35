//! Session-scoped in-memory backend.
//!
//! Each browser session gets its own [`MemoryStore`], handed out by
//! [`SessionStores`] at request boundaries. State lives behind one async
//! mutex per session; concurrent requests from the same session (two browser
//! tabs) can interleave and overwrite each other's mutations. That race is
//! accepted, not guarded against.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::Mutex;
use uuid::Uuid;

use super::{List, ListSummary, Store, StoreError, Todo};

/// Next id within a collection: one past the highest id still present, or 0
/// for an empty collection.
///
/// Ids are never reused while any entry remains, but emptying the collection
/// restarts allocation at 0: the allocator only sees ids that are currently
/// present.
fn next_element_id<I>(ids: I) -> i32
where
    I: Iterator<Item = i32>,
{
    ids.max().map_or(0, |max| max + 1)
}

/// In-memory store holding the lists of a single session.
#[derive(Default)]
pub struct MemoryStore {
    lists: Mutex<Vec<List>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl Store for MemoryStore {
    async fn all_lists(&self) -> Result<Vec<ListSummary>, StoreError> {
        let lists = self.lists.lock().await;
        // New lists always get an id above every present one, so insertion
        // order is already id-ascending.
        Ok(lists.iter().map(List::summary).collect())
    }

    async fn find_list(&self, id: i32) -> Result<Option<List>, StoreError> {
        let lists = self.lists.lock().await;
        Ok(lists.iter().find(|list| list.id == id).cloned())
    }

    async fn create_list(&self, name: &str) -> Result<(), StoreError> {
        let mut lists = self.lists.lock().await;
        let id = next_element_id(lists.iter().map(|list| list.id));
        lists.push(List {
            id,
            name: name.to_string(),
            todos: Vec::new(),
        });
        Ok(())
    }

    async fn update_list_name(&self, id: i32, new_name: &str) -> Result<(), StoreError> {
        let mut lists = self.lists.lock().await;
        if let Some(list) = lists.iter_mut().find(|list| list.id == id) {
            list.name = new_name.to_string();
        }
        Ok(())
    }

    async fn delete_list(&self, id: i32) -> Result<(), StoreError> {
        let mut lists = self.lists.lock().await;
        // Same two-step shape as the database backend: owned todos first,
        // then the list itself.
        if let Some(list) = lists.iter_mut().find(|list| list.id == id) {
            list.todos.clear();
        }
        lists.retain(|list| list.id != id);
        Ok(())
    }

    async fn create_todo(&self, list_id: i32, name: &str) -> Result<(), StoreError> {
        let mut lists = self.lists.lock().await;
        if let Some(list) = lists.iter_mut().find(|list| list.id == list_id) {
            let id = next_element_id(list.todos.iter().map(|todo| todo.id));
            list.todos.push(Todo {
                id,
                name: name.to_string(),
                completed: false,
                list_id,
            });
        }
        Ok(())
    }

    async fn delete_todo(&self, list_id: i32, todo_id: i32) -> Result<(), StoreError> {
        let mut lists = self.lists.lock().await;
        if let Some(list) = lists.iter_mut().find(|list| list.id == list_id) {
            list.todos.retain(|todo| todo.id != todo_id);
        }
        Ok(())
    }

    async fn update_todo_status(
        &self,
        list_id: i32,
        todo_id: i32,
        completed: bool,
    ) -> Result<(), StoreError> {
        let mut lists = self.lists.lock().await;
        if let Some(list) = lists.iter_mut().find(|list| list.id == list_id) {
            if let Some(todo) = list.todos.iter_mut().find(|todo| todo.id == todo_id) {
                todo.completed = completed;
            }
        }
        Ok(())
    }

    async fn mark_all_completed(&self, list_id: i32) -> Result<(), StoreError> {
        let mut lists = self.lists.lock().await;
        if let Some(list) = lists.iter_mut().find(|list| list.id == list_id) {
            for todo in &mut list.todos {
                todo.completed = true;
            }
        }
        Ok(())
    }

    async fn todos_for_list(&self, list_id: i32) -> Result<Vec<Todo>, StoreError> {
        let lists = self.lists.lock().await;
        Ok(lists
            .iter()
            .find(|list| list.id == list_id)
            .map(|list| list.todos.clone())
            .unwrap_or_default())
    }
}

/// Registry of per-session memory stores, handed out at request boundaries.
#[derive(Clone, Default)]
pub struct SessionStores {
    inner: Arc<Mutex<HashMap<Uuid, Arc<MemoryStore>>>>,
}

impl SessionStores {
    pub fn new() -> Self {
        Self::default()
    }

    /// The store owned by `session`, created empty on first use.
    pub async fn store_for(&self, session: Uuid) -> Arc<MemoryStore> {
        let mut stores = self.inner.lock().await;
        Arc::clone(
            stores
                .entry(session)
                .or_insert_with(|| Arc::new(MemoryStore::new())),
        )
    }
}
