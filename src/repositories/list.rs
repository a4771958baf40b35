//! List repository for database operations.

use sea_orm::sea_query::Expr;
use sea_orm::{
    ActiveValue, ColumnTrait, ConnectionTrait, DbErr, EntityTrait, FromQueryResult, JoinType,
    QueryFilter, QueryOrder, QuerySelect, RelationTrait,
};

use crate::entities::{list, todo};
use crate::store::ListSummary;

/// Row shape of the aggregate summary query.
#[derive(Debug, FromQueryResult)]
struct SummaryRow {
    id: i32,
    name: String,
    todos_count: i64,
    todos_remaining_count: i64,
}

/// Repository for list-related database operations.
pub struct ListRepository;

impl ListRepository {
    /// All lists with todo aggregates, ordered by id ascending.
    ///
    /// One left-join query grouped by list id: total todos are a plain count,
    /// remaining todos a sum over a not-completed case expression. Counts are
    /// computed here, never stored.
    pub async fn summaries<C>(conn: &C) -> Result<Vec<ListSummary>, DbErr>
    where
        C: ConnectionTrait,
    {
        let rows = list::Entity::find()
            .select_only()
            .column(list::Column::Id)
            .column(list::Column::Name)
            .column_as(todo::Column::Id.count(), "todos_count")
            .column_as(
                Expr::expr(
                    Expr::case(
                        Expr::col((todo::Entity, todo::Column::Completed)).eq(false),
                        1,
                    )
                    .finally(0),
                )
                .sum(),
                "todos_remaining_count",
            )
            .join(JoinType::LeftJoin, list::Relation::Todos.def())
            .group_by(list::Column::Id)
            .group_by(list::Column::Name)
            .order_by_asc(list::Column::Id)
            .into_model::<SummaryRow>()
            .all(conn)
            .await?;

        Ok(rows
            .into_iter()
            .map(|row| ListSummary {
                id: row.id,
                name: row.name,
                todos_count: row.todos_count,
                todos_remaining_count: row.todos_remaining_count,
            })
            .collect())
    }

    /// Get a single list by id.
    pub async fn get_by_id<C>(conn: &C, id: i32) -> Result<Option<list::Model>, DbErr>
    where
        C: ConnectionTrait,
    {
        list::Entity::find_by_id(id).one(conn).await
    }

    /// Insert a new list; the engine's auto-increment assigns the id.
    pub async fn create<C>(conn: &C, name: &str) -> Result<(), DbErr>
    where
        C: ConnectionTrait,
    {
        let model = list::ActiveModel {
            name: ActiveValue::Set(name.to_string()),
            ..Default::default()
        };
        list::Entity::insert(model).exec(conn).await?;
        Ok(())
    }

    /// Rename a list. Affects zero rows when the id is unknown.
    pub async fn rename<C>(conn: &C, id: i32, new_name: &str) -> Result<(), DbErr>
    where
        C: ConnectionTrait,
    {
        list::Entity::update_many()
            .col_expr(list::Column::Name, Expr::value(new_name))
            .filter(list::Column::Id.eq(id))
            .exec(conn)
            .await?;
        Ok(())
    }

    /// Delete a list row. Owned todos must already be gone; the foreign key
    /// on `todos.list_id` rejects the delete otherwise.
    pub async fn delete<C>(conn: &C, id: i32) -> Result<(), DbErr>
    where
        C: ConnectionTrait,
    {
        list::Entity::delete_many()
            .filter(list::Column::Id.eq(id))
            .exec(conn)
            .await?;
        Ok(())
    }
}
