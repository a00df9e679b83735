//! Screen modules for the console

pub mod main_menu;
pub mod resource_form;
pub mod resource_list;
pub mod topic_detail;

// Re-export all screens
pub use main_menu::MainMenuScreen;
pub use resource_form::ResourceFormScreen;
pub use resource_list::ResourceListScreen;
pub use topic_detail::TopicDetailScreen;
