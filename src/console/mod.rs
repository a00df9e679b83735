//! contentdesk terminal user interface
//!
//! The console is a set of screens (home menu, resource lists, resource
//! forms, topic detail) driven by one [`App`]. Screens are pure state
//! machines: they turn key presses and backend responses into
//! [`ScreenAction`]s, and the app executes those actions.

pub mod app;
pub mod components;
pub mod events;
pub mod handlers;
pub mod operations;
pub mod remote;
pub mod routes;
pub mod screens;
pub mod traits;
pub mod ui;

pub use app::App;
pub use events::{ActivationId, ApiResponse, AppEvent, Ticket};
pub use remote::{RemoteState, SubmitState};
pub use routes::Route;
pub use traits::{Screen, ScreenAction};
