//! Events flowing back into the console event loop

use serde_json::Value;

use crate::api::ApiError;
use crate::models::Id;

/// Identifies one activation of a screen. Retired ids never become current again.
pub type ActivationId = u64;

/// Outcome of a backend call as delivered to a screen
pub type ApiResponse = Result<Value, ApiError>;

/// Purpose of a request, so a screen can route the response
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Ticket {
    /// Full collection for a list screen
    Collection,
    /// Single entity prefetched by an edit form
    Entity,
    /// Option list of the selector bound to this field key
    Options(&'static str),
    /// Create or update submission
    Submit,
    /// Delete of the given row
    Delete(Id),
    /// Joined topic metadata and chapter list
    TopicDetail,
}

/// Application events that arrive asynchronously
#[derive(Debug)]
pub enum AppEvent {
    /// A backend request finished
    Response {
        activation: ActivationId,
        ticket: Ticket,
        outcome: ApiResponse,
    },
}
