//! Listkeeper - a session- or database-backed to-do list manager over HTTP
//!
//! Users create named lists, add and complete todo items, and view aggregate
//! completion state. All persistence goes through one [`store::Store`]
//! contract with two interchangeable backends: an in-memory store scoped to
//! the requesting session, and a relational database store. The backend is
//! picked once at startup from the configuration.
//!
//! # Modules
//!
//! The library is organized into several key modules:
//!
//! * [`config`] - Application configuration management
//! * [`store`] - The persistence contract and its two backends
//! * [`validation`] - Name validation rules for lists and todos
//! * [`ordering`] - Completeness ordering for list and todo views
//! * [`web`] - HTTP surface built on axum
//! * [`logger`] - Log setup

/// Configuration module for managing application settings
pub mod config;

/// SeaORM entity models for database tables
pub mod entities;

/// Logging setup built on fern
pub mod logger;

/// Completeness ordering for lists and todos
pub mod ordering;

/// Repository layer for database operations
pub mod repositories;

/// Persistence contract and backends
pub mod store;

/// Name validation rules
pub mod validation;

/// HTTP routing, handlers, sessions and flash messages
pub mod web;

// Re-export the domain types for convenient access
pub use store::{List, ListSummary, Store, StoreError, Todo};
