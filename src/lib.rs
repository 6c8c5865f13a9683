//! Books Gateway Library
//!
//! HTTP handlers, store implementations and configuration for a gateway that
//! exposes CRUD endpoints over a single PostgreSQL `books` table.

pub mod api;
pub mod config;
pub mod error;
pub mod models;
pub mod store;
