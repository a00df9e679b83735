//! Declarative description of entities for the generic list and form screens
//!
//! Each entity declares the columns its list shows and the fields its form
//! edits. The console screens are written once against these traits.

use std::collections::BTreeMap;

use serde::de::DeserializeOwned;
use serde_json::Value;
use thiserror::Error;

use crate::console::routes::Route;
use crate::models::{Id, Resource};

/// A list column: header text and share of the row width in percent
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Column {
    pub title: &'static str,
    pub width: u16,
}

impl Column {
    pub const fn new(title: &'static str, width: u16) -> Self {
        Self { title, width }
    }
}

/// Kind of input a form field is edited with
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    Text,
    TextArea,
    /// Foreign key chosen from the option list of another resource
    Select(Resource),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldSpec {
    pub key: &'static str,
    pub label: &'static str,
    pub kind: FieldKind,
}

impl FieldSpec {
    pub const fn new(key: &'static str, label: &'static str, kind: FieldKind) -> Self {
        Self { key, label, kind }
    }
}

/// Entity stored by the backend and shown in a list screen
pub trait Entity: DeserializeOwned + Clone + Send + 'static {
    const RESOURCE: Resource;

    fn id(&self) -> Id;

    fn columns() -> &'static [Column];

    /// One display string per column, in column order
    fn cells(&self) -> Vec<String>;

    /// Route opened when a row of a read-only resource is activated
    fn detail_route(_id: Id) -> Option<Route> {
        None
    }
}

/// Entity the console can create and replace
pub trait EditableEntity: Entity {
    fn fields() -> &'static [FieldSpec];

    fn to_draft(&self) -> Draft;

    /// Build the request body, coercing foreign keys to integers
    fn payload(draft: &Draft) -> Result<Value, DraftError>;
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DraftError {
    #[error("{0} is required")]
    Missing(String),

    #[error("{label} must be a number, got '{value}'")]
    NotNumeric { label: String, value: String },

    #[error("Failed to encode request body: {0}")]
    Encode(String),
}

/// Editable form state. Every value is held as a string while editing.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Draft {
    values: BTreeMap<String, String>,
}

impl Draft {
    pub fn for_fields(fields: &[FieldSpec]) -> Self {
        let values = fields
            .iter()
            .map(|field| (field.key.to_string(), String::new()))
            .collect();
        Self { values }
    }

    pub fn get(&self, key: &str) -> &str {
        self.values.get(key).map(String::as_str).unwrap_or("")
    }

    pub fn set(&mut self, key: &str, value: impl Into<String>) {
        self.values.insert(key.to_string(), value.into());
    }

    /// Required text value
    pub fn text(&self, key: &str, label: &str) -> Result<String, DraftError> {
        let value = self.get(key);
        if value.trim().is_empty() {
            return Err(DraftError::Missing(label.to_string()));
        }
        Ok(value.to_string())
    }

    /// Required foreign key, parsed from its string form
    pub fn foreign_key(&self, key: &str, label: &str) -> Result<Id, DraftError> {
        let value = self.text(key, label)?;
        value.trim().parse().map_err(|_| DraftError::NotNumeric {
            label: label.to_string(),
            value,
        })
    }

    /// Report the first blank field in declaration order
    pub fn check_required(&self, fields: &[FieldSpec]) -> Result<(), DraftError> {
        for field in fields {
            if self.get(field.key).trim().is_empty() {
                return Err(DraftError::Missing(field.label.to_string()));
            }
        }
        Ok(())
    }
}
