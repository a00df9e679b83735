//! Client for the content backend REST API
//!
//! Screens never talk to the network directly. They describe what they need
//! as an [`ApiRequest`] and the console executes it through a
//! [`ContentBackend`], normally the reqwest based [`ApiClient`].

pub mod client;
pub mod errors;
pub mod request;

pub use client::{ApiClient, ContentBackend};
pub use errors::ApiError;
pub use request::ApiRequest;
