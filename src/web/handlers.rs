//! Request handlers translating HTTP into store calls.
//!
//! Every handler resolves the session's store, validates input against the
//! current state, and performs at most one store mutation. A referenced list
//! that does not exist is a normal outcome: the user is redirected to the
//! list index with an error flash, nothing is mutated.

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Redirect, Response},
    Extension, Form, Json,
};
use log::info;
use serde::{Deserialize, Serialize};

use crate::ordering::{sorted_lists, sorted_todos};
use crate::store::{ListSummary, Store, Todo};
use crate::validation::{validate_list_name, validate_todo_name};

use super::error::AppError;
use super::flash::Flash;
use super::session::SessionId;
use super::AppState;

#[derive(Debug, Deserialize)]
pub struct ListForm {
    pub list_name: String,
}

#[derive(Debug, Deserialize)]
pub struct TodoForm {
    pub todo: String,
}

#[derive(Debug, Deserialize)]
pub struct TodoStatusForm {
    /// Desired completion state, posted as "true" or "false"
    pub completed: String,
}

#[derive(Debug, Serialize)]
pub struct ListsView {
    pub lists: Vec<ListSummary>,
    pub flash: Option<Flash>,
}

#[derive(Debug, Serialize)]
pub struct ListView {
    pub id: i32,
    pub name: String,
    pub todos: Vec<Todo>,
    pub todos_count: i64,
    pub todos_remaining_count: i64,
    pub complete: bool,
    pub flash: Option<Flash>,
}

/// `GET /`
pub async fn index() -> Redirect {
    Redirect::to("/lists")
}

/// `GET /lists`: all lists, incomplete first, with any pending flash.
pub async fn all_lists(
    State(state): State<AppState>,
    Extension(session): Extension<SessionId>,
) -> Result<Json<ListsView>, AppError> {
    let store = store_for(&state, session).await;
    let lists = sorted_lists(store.all_lists().await?);
    let flash = state.flash.take(session.0).await;
    Ok(Json(ListsView { lists, flash }))
}

/// `POST /lists`: create a list from the `list_name` form field.
pub async fn create_list(
    State(state): State<AppState>,
    Extension(session): Extension<SessionId>,
    Form(form): Form<ListForm>,
) -> Result<Response, AppError> {
    let store = store_for(&state, session).await;
    let name = form.list_name.trim().to_string();

    let existing = store.all_lists().await?;
    if let Some(message) = validate_list_name(&name, existing.iter().map(|l| l.name.as_str())) {
        return Err(AppError::unprocessable(message));
    }

    store.create_list(&name).await?;
    info!("created list {name:?}");
    state
        .flash
        .set(session.0, Flash::success("The list has been created."))
        .await;
    Ok(Redirect::to("/lists").into_response())
}

/// `GET /lists/{list_id}`: one list with its todos, open items first.
pub async fn show_list(
    State(state): State<AppState>,
    Extension(session): Extension<SessionId>,
    Path(list_id): Path<i32>,
) -> Result<Response, AppError> {
    let store = store_for(&state, session).await;
    let Some(list) = store.find_list(list_id).await? else {
        return Ok(list_not_found(&state, session).await);
    };

    let flash = state.flash.take(session.0).await;
    let view = ListView {
        id: list.id,
        todos_count: list.todos_count(),
        todos_remaining_count: list.todos_remaining_count(),
        complete: list.is_complete(),
        name: list.name,
        todos: sorted_todos(list.todos),
        flash,
    };
    Ok(Json(view).into_response())
}

/// `POST /lists/{list_id}`: rename a list from the `list_name` form field.
pub async fn rename_list(
    State(state): State<AppState>,
    Extension(session): Extension<SessionId>,
    Path(list_id): Path<i32>,
    Form(form): Form<ListForm>,
) -> Result<Response, AppError> {
    let store = store_for(&state, session).await;
    if store.find_list(list_id).await?.is_none() {
        return Ok(list_not_found(&state, session).await);
    }

    let name = form.list_name.trim().to_string();
    let existing = store.all_lists().await?;
    if let Some(message) = validate_list_name(&name, existing.iter().map(|l| l.name.as_str())) {
        return Err(AppError::unprocessable(message));
    }

    store.update_list_name(list_id, &name).await?;
    state
        .flash
        .set(
            session.0,
            Flash::success(format!("The list name has been changed to \"{name}\".")),
        )
        .await;
    Ok(Redirect::to(&format!("/lists/{list_id}")).into_response())
}

/// `POST /lists/{list_id}/destroy`: delete a list and everything it owns.
pub async fn delete_list(
    State(state): State<AppState>,
    Extension(session): Extension<SessionId>,
    Path(list_id): Path<i32>,
    headers: HeaderMap,
) -> Result<Response, AppError> {
    let store = store_for(&state, session).await;
    let Some(list) = store.find_list(list_id).await? else {
        return Ok(list_not_found(&state, session).await);
    };

    store.delete_list(list_id).await?;
    info!("deleted list {:?} ({} todos)", list.name, list.todos.len());

    if is_ajax(&headers) {
        return Ok(StatusCode::NO_CONTENT.into_response());
    }
    state
        .flash
        .set(
            session.0,
            Flash::success(format!("The list \"{}\" was deleted.", list.name)),
        )
        .await;
    Ok(Redirect::to("/lists").into_response())
}

/// `POST /lists/{list_id}/complete_all`: mark every todo of a list done.
pub async fn complete_all(
    State(state): State<AppState>,
    Extension(session): Extension<SessionId>,
    Path(list_id): Path<i32>,
) -> Result<Response, AppError> {
    let store = store_for(&state, session).await;
    if store.find_list(list_id).await?.is_none() {
        return Ok(list_not_found(&state, session).await);
    }

    store.mark_all_completed(list_id).await?;
    state
        .flash
        .set(session.0, Flash::success("All todos have been completed."))
        .await;
    Ok(Redirect::to(&format!("/lists/{list_id}")).into_response())
}

/// `POST /lists/{list_id}/todos`: add a todo from the `todo` form field.
pub async fn create_todo(
    State(state): State<AppState>,
    Extension(session): Extension<SessionId>,
    Path(list_id): Path<i32>,
    Form(form): Form<TodoForm>,
) -> Result<Response, AppError> {
    let store = store_for(&state, session).await;
    let Some(list) = store.find_list(list_id).await? else {
        return Ok(list_not_found(&state, session).await);
    };

    let name = form.todo.trim().to_string();
    if let Some(message) = validate_todo_name(&name, list.todos.iter().map(|t| t.name.as_str())) {
        return Err(AppError::unprocessable(message));
    }

    store.create_todo(list_id, &name).await?;
    state
        .flash
        .set(
            session.0,
            Flash::success(format!("The todo \"{name}\" was added.")),
        )
        .await;
    Ok(Redirect::to(&format!("/lists/{list_id}")).into_response())
}

/// `POST /lists/{list_id}/todos/{todo_id}`: set one todo's completion flag
/// from the `completed` form field.
pub async fn update_todo_status(
    State(state): State<AppState>,
    Extension(session): Extension<SessionId>,
    Path((list_id, todo_id)): Path<(i32, i32)>,
    Form(form): Form<TodoStatusForm>,
) -> Result<Response, AppError> {
    let store = store_for(&state, session).await;
    if store.find_list(list_id).await?.is_none() {
        return Ok(list_not_found(&state, session).await);
    }

    let completed = form.completed == "true";
    store.update_todo_status(list_id, todo_id, completed).await?;
    state
        .flash
        .set(session.0, Flash::success("The todo has been updated."))
        .await;
    Ok(Redirect::to(&format!("/lists/{list_id}")).into_response())
}

/// `POST /lists/{list_id}/todos/{todo_id}/destroy`: remove one todo.
pub async fn delete_todo(
    State(state): State<AppState>,
    Extension(session): Extension<SessionId>,
    Path((list_id, todo_id)): Path<(i32, i32)>,
    headers: HeaderMap,
) -> Result<Response, AppError> {
    let store = store_for(&state, session).await;
    let Some(list) = store.find_list(list_id).await? else {
        return Ok(list_not_found(&state, session).await);
    };

    store.delete_todo(list_id, todo_id).await?;

    if is_ajax(&headers) {
        return Ok(StatusCode::NO_CONTENT.into_response());
    }
    let message = match list.todos.iter().find(|t| t.id == todo_id) {
        Some(todo) => format!("The todo \"{}\" was deleted.", todo.name),
        None => "The todo was deleted.".to_string(),
    };
    state.flash.set(session.0, Flash::success(message)).await;
    Ok(Redirect::to(&format!("/lists/{list_id}")).into_response())
}

async fn store_for(state: &AppState, session: SessionId) -> Arc<dyn Store> {
    state.stores.store_for(session.0).await
}

/// Redirect to the index with an error flash; no mutation has happened.
async fn list_not_found(state: &AppState, session: SessionId) -> Response {
    state
        .flash
        .set(session.0, Flash::error("The specified list was not found."))
        .await;
    Redirect::to("/lists").into_response()
}

/// Requests of asynchronous origin announce themselves with this header and
/// get a bare status instead of a redirect.
fn is_ajax(headers: &HeaderMap) -> bool {
    headers
        .get("x-requested-with")
        .and_then(|value| value.to_str().ok())
        .is_some_and(|value| value.eq_ignore_ascii_case("xmlhttprequest"))
}
