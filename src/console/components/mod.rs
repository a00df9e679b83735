//! Reusable UI components for the console
//!
//! Composable widgets shared by the screens: the menu, the entity table, form
//! inputs and the status bar.

pub mod confirm_dialog;
pub mod entity_table;
pub mod form_field;
pub mod menu;
pub mod option_selector;
pub mod status_display;

pub use confirm_dialog::ConfirmDialog;
pub use entity_table::{EntityTable, SortOrder, TableRow};
pub use form_field::FormField;
pub use menu::{Menu, MenuEntry};
pub use option_selector::{OptionSelector, SelectOption};
pub use status_display::{StatusDisplay, StatusMessage, StatusType};
