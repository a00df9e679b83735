//! Async operation management for the console
//!
//! Screens describe backend calls; the dispatcher runs them on tokio tasks
//! and owns those tasks for the lifetime of one screen activation.

pub mod dispatcher;

pub use dispatcher::RequestDispatcher;
