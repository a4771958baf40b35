//! Todo repository for database operations.

use sea_orm::sea_query::Expr;
use sea_orm::{
    ActiveValue, ColumnTrait, ConnectionTrait, DbErr, EntityTrait, QueryFilter, QueryOrder,
};

use crate::entities::todo;

/// Repository for todo-related database operations.
pub struct TodoRepository;

impl TodoRepository {
    /// All todos of one list, ordered by id ascending.
    pub async fn get_for_list<C>(conn: &C, list_id: i32) -> Result<Vec<todo::Model>, DbErr>
    where
        C: ConnectionTrait,
    {
        todo::Entity::find()
            .filter(todo::Column::ListId.eq(list_id))
            .order_by_asc(todo::Column::Id)
            .all(conn)
            .await
    }

    /// Insert an open todo under a list; the engine assigns the id.
    pub async fn create<C>(conn: &C, list_id: i32, name: &str) -> Result<(), DbErr>
    where
        C: ConnectionTrait,
    {
        let model = todo::ActiveModel {
            name: ActiveValue::Set(name.to_string()),
            completed: ActiveValue::Set(false),
            list_id: ActiveValue::Set(list_id),
            ..Default::default()
        };
        todo::Entity::insert(model).exec(conn).await?;
        Ok(())
    }

    /// Delete one todo of a list. Affects zero rows when either id is unknown.
    pub async fn delete<C>(conn: &C, list_id: i32, todo_id: i32) -> Result<(), DbErr>
    where
        C: ConnectionTrait,
    {
        todo::Entity::delete_many()
            .filter(todo::Column::ListId.eq(list_id))
            .filter(todo::Column::Id.eq(todo_id))
            .exec(conn)
            .await?;
        Ok(())
    }

    /// Delete every todo owned by a list.
    pub async fn delete_for_list<C>(conn: &C, list_id: i32) -> Result<(), DbErr>
    where
        C: ConnectionTrait,
    {
        todo::Entity::delete_many()
            .filter(todo::Column::ListId.eq(list_id))
            .exec(conn)
            .await?;
        Ok(())
    }

    /// Set the completion flag of one todo.
    pub async fn set_status<C>(
        conn: &C,
        list_id: i32,
        todo_id: i32,
        completed: bool,
    ) -> Result<(), DbErr>
    where
        C: ConnectionTrait,
    {
        todo::Entity::update_many()
            .col_expr(todo::Column::Completed, Expr::value(completed))
            .filter(todo::Column::ListId.eq(list_id))
            .filter(todo::Column::Id.eq(todo_id))
            .exec(conn)
            .await?;
        Ok(())
    }

    /// Mark every todo of a list completed in one statement.
    pub async fn complete_all<C>(conn: &C, list_id: i32) -> Result<(), DbErr>
    where
        C: ConnectionTrait,
    {
        todo::Entity::update_many()
            .col_expr(todo::Column::Completed, Expr::value(true))
            .filter(todo::Column::ListId.eq(list_id))
            .exec(conn)
            .await?;
        Ok(())
    }
}
