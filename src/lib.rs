//! contentdesk: terminal admin console for a REST content backend.
//!
//! The crate is split into the backend client (`api`), the entity model and
//! its declarative schema (`models`, `schema`), and the interactive console
//! (`console`). The binary in `main.rs` wires them together.

pub mod api;
pub mod cli;
pub mod config;
pub mod console;
pub mod models;
pub mod report;
pub mod schema;
