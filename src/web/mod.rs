//! HTTP surface: router, handlers, session identity and flash messages.
//!
//! Thin glue over the store contract. Handlers translate path parameters and
//! form fields into store calls; reads come back as JSON, successful form
//! posts redirect to a canonical URL, and AJAX-origin mutations get a bare
//! success status instead of the redirect.

pub mod error;
pub mod flash;
pub mod handlers;
pub mod session;

use axum::{
    middleware,
    routing::{get, post},
    Router,
};

use crate::store::StoreProvider;

use flash::FlashStore;

/// Shared state for every handler.
#[derive(Clone)]
pub struct AppState {
    pub stores: StoreProvider,
    pub flash: FlashStore,
}

/// Build the application router around the given store provider.
pub fn router(stores: StoreProvider) -> Router {
    let state = AppState {
        stores,
        flash: FlashStore::new(),
    };

    Router::new()
        .route("/", get(handlers::index))
        .route("/lists", get(handlers::all_lists).post(handlers::create_list))
        .route(
            "/lists/:list_id",
            get(handlers::show_list).post(handlers::rename_list),
        )
        .route("/lists/:list_id/destroy", post(handlers::delete_list))
        .route("/lists/:list_id/complete_all", post(handlers::complete_all))
        .route("/lists/:list_id/todos", post(handlers::create_todo))
        .route(
            "/lists/:list_id/todos/:todo_id",
            post(handlers::update_todo_status),
        )
        .route(
            "/lists/:list_id/todos/:todo_id/destroy",
            post(handlers::delete_todo),
        )
        .layer(middleware::from_fn(session::session_middleware))
        .with_state(state)
}
