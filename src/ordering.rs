//! Completeness ordering for lists and todos.
//!
//! Both sorts are stable: entries that compare equal keep their input order.
//! The input order is the store's deterministic order (id ascending), so
//! incomplete entries stay id-sorted among themselves, as do complete ones.

use crate::store::{ListSummary, Todo};

/// Order list summaries with incomplete lists first and complete lists last.
pub fn sorted_lists(mut lists: Vec<ListSummary>) -> Vec<ListSummary> {
    lists.sort_by_key(ListSummary::is_complete);
    lists
}

/// Order todos with open items first and completed items last.
pub fn sorted_todos(mut todos: Vec<Todo>) -> Vec<Todo> {
    todos.sort_by_key(|todo| todo.completed);
    todos
}
