//! Relational database backend.
//!
//! One SeaORM connection pool created at startup from the configured URL
//! (SQLite or Postgres), shared by every session. Each store operation runs
//! as an independent statement; there is no multi-statement transaction, so a
//! crash between the two halves of [`Store::delete_list`] can leave orphaned
//! todo rows behind.

use async_trait::async_trait;
use sea_orm::sea_query::TableCreateStatement;
use sea_orm::{ConnectOptions, ConnectionTrait, Database, DatabaseConnection, Schema};

use crate::entities::{list, todo};
use crate::repositories::{ListRepository, TodoRepository};

use super::{List, ListSummary, Store, StoreError, Todo};

/// Store backed by a relational database via SeaORM.
pub struct DatabaseStore {
    conn: DatabaseConnection,
}

impl DatabaseStore {
    /// Connect to the database at `url` and make sure the schema exists.
    ///
    /// Statement logging stays on: every query is logged with its parameters,
    /// which is the only request-level trace the database backend emits.
    pub async fn connect(url: &str) -> Result<Self, StoreError> {
        let mut options = ConnectOptions::new(url.to_owned());
        options.max_connections(5).min_connections(1);

        let conn = Database::connect(options).await?;
        let store = Self { conn };
        store.init_schema().await?;
        Ok(store)
    }

    /// Create the `lists` and `todos` tables when they are missing.
    async fn init_schema(&self) -> Result<(), StoreError> {
        let builder = self.conn.get_database_backend();
        let schema = Schema::new(builder);

        let mut lists_table: TableCreateStatement = schema.create_table_from_entity(list::Entity);
        lists_table.if_not_exists();
        self.conn.execute(builder.build(&lists_table)).await?;

        let mut todos_table: TableCreateStatement = schema.create_table_from_entity(todo::Entity);
        todos_table.if_not_exists();
        self.conn.execute(builder.build(&todos_table)).await?;

        Ok(())
    }
}

#[async_trait]
impl Store for DatabaseStore {
    async fn all_lists(&self) -> Result<Vec<ListSummary>, StoreError> {
        Ok(ListRepository::summaries(&self.conn).await?)
    }

    async fn find_list(&self, id: i32) -> Result<Option<List>, StoreError> {
        let Some(model) = ListRepository::get_by_id(&self.conn, id).await? else {
            return Ok(None);
        };
        let todos = TodoRepository::get_for_list(&self.conn, id).await?;
        Ok(Some(List {
            id: model.id,
            name: model.name,
            todos: todos.into_iter().map(Todo::from).collect(),
        }))
    }

    async fn create_list(&self, name: &str) -> Result<(), StoreError> {
        Ok(ListRepository::create(&self.conn, name).await?)
    }

    async fn update_list_name(&self, id: i32, new_name: &str) -> Result<(), StoreError> {
        Ok(ListRepository::rename(&self.conn, id, new_name).await?)
    }

    async fn delete_list(&self, id: i32) -> Result<(), StoreError> {
        // Todos first: the foreign key forbids removing a list that still
        // owns rows. Two independent statements, not a transaction.
        TodoRepository::delete_for_list(&self.conn, id).await?;
        ListRepository::delete(&self.conn, id).await?;
        Ok(())
    }

    async fn create_todo(&self, list_id: i32, name: &str) -> Result<(), StoreError> {
        Ok(TodoRepository::create(&self.conn, list_id, name).await?)
    }

    async fn delete_todo(&self, list_id: i32, todo_id: i32) -> Result<(), StoreError> {
        Ok(TodoRepository::delete(&self.conn, list_id, todo_id).await?)
    }

    async fn update_todo_status(
        &self,
        list_id: i32,
        todo_id: i32,
        completed: bool,
    ) -> Result<(), StoreError> {
        Ok(TodoRepository::set_status(&self.conn, list_id, todo_id, completed).await?)
    }

    async fn mark_all_completed(&self, list_id: i32) -> Result<(), StoreError> {
        Ok(TodoRepository::complete_all(&self.conn, list_id).await?)
    }

    async fn todos_for_list(&self, list_id: i32) -> Result<Vec<Todo>, StoreError> {
        let todos = TodoRepository::get_for_list(&self.conn, list_id).await?;
        Ok(todos.into_iter().map(Todo::from).collect())
    }
}

impl From<todo::Model> for Todo {
    fn from(model: todo::Model) -> Self {
        Self {
            id: model.id,
            name: model.name,
            completed: model.completed,
            list_id: model.list_id,
        }
    }
}
