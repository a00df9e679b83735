//! Console routes and the screens they build

use crate::console::screens::{
    MainMenuScreen, ResourceFormScreen, ResourceListScreen, TopicDetailScreen,
};
use crate::console::traits::Screen;
use crate::models::{
    capitalize, Campaign, Id, Platform, Post, PostStatus, PostType, Resource, Tag, Topic,
};

/// Every page of the console
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    Home,
    List(Resource),
    New(Resource),
    Edit(Resource, Id),
    Topic(Id),
}

impl Route {
    /// Where `Esc` leads; `None` for the root
    pub fn parent(&self) -> Option<Route> {
        match self {
            Route::Home => None,
            Route::List(_) => Some(Route::Home),
            Route::New(resource) | Route::Edit(resource, _) => Some(Route::List(*resource)),
            Route::Topic(_) => Some(Route::List(Resource::Topics)),
        }
    }

    /// Status bar label
    pub fn label(&self) -> String {
        match self {
            Route::Home => "Home".to_string(),
            Route::List(resource) => resource.title(),
            Route::New(resource) => format!("New {}", capitalize(resource.singular())),
            Route::Edit(resource, id) => {
                format!("Edit {} #{}", capitalize(resource.singular()), id)
            }
            Route::Topic(id) => format!("Topic #{}", id),
        }
    }

    /// Build a fresh, not yet activated screen for this route
    pub fn build_screen(&self) -> Box<dyn Screen> {
        match *self {
            Route::Home => Box::new(MainMenuScreen::new()),
            Route::List(resource) => list_screen(resource),
            Route::New(resource) => match resource {
                Resource::Posts => Box::new(ResourceFormScreen::<Post>::create()),
                Resource::Campaigns => Box::new(ResourceFormScreen::<Campaign>::create()),
                Resource::Platforms => Box::new(ResourceFormScreen::<Platform>::create()),
                Resource::Tags => Box::new(ResourceFormScreen::<Tag>::create()),
                read_only => list_screen(read_only),
            },
            Route::Edit(resource, id) => match resource {
                Resource::Posts => Box::new(ResourceFormScreen::<Post>::edit(id)),
                Resource::Campaigns => Box::new(ResourceFormScreen::<Campaign>::edit(id)),
                Resource::Platforms => Box::new(ResourceFormScreen::<Platform>::edit(id)),
                Resource::Tags => Box::new(ResourceFormScreen::<Tag>::edit(id)),
                read_only => list_screen(read_only),
            },
            Route::Topic(id) => Box::new(TopicDetailScreen::new(id)),
        }
    }
}

fn list_screen(resource: Resource) -> Box<dyn Screen> {
    match resource {
        Resource::Posts => Box::new(ResourceListScreen::<Post>::new()),
        Resource::Campaigns => Box::new(ResourceListScreen::<Campaign>::new()),
        Resource::Platforms => Box::new(ResourceListScreen::<Platform>::new()),
        Resource::Tags => Box::new(ResourceListScreen::<Tag>::new()),
        Resource::PostTypes => Box::new(ResourceListScreen::<PostType>::new()),
        Resource::PostStatuses => Box::new(ResourceListScreen::<PostStatus>::new()),
        // Chapters are browsed through their topic
        Resource::Topics | Resource::Chapters => Box::new(ResourceListScreen::<Topic>::new()),
    }
}
