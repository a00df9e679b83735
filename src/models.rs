use chrono::{DateTime, Local, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::console::routes::Route;
use crate::schema::{Column, Draft, DraftError, EditableEntity, Entity, FieldKind, FieldSpec};

/// Backend identifier of every entity.
pub type Id = i64;

/// Resource families exposed by the content backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Resource {
    Posts,
    Campaigns,
    Platforms,
    Tags,
    PostTypes,
    PostStatuses,
    Topics,
    Chapters,
}

impl Resource {
    /// Collection path relative to the API base URL
    pub fn collection_path(&self) -> &'static str {
        match self {
            Resource::Posts => "api/content/posts/",
            Resource::Campaigns => "api/content/campaigns/",
            Resource::Platforms => "api/content/platforms/",
            Resource::Tags => "api/content/tags/",
            Resource::PostTypes => "api/content/post-types/",
            Resource::PostStatuses => "api/content/post-statuses/",
            Resource::Topics => "api/learning/topics/",
            Resource::Chapters => "api/learning/chapters/",
        }
    }

    /// Path of a single entity relative to the API base URL
    pub fn item_path(&self, id: Id) -> String {
        format!("{}{}/", self.collection_path(), id)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Resource::Posts => "posts",
            Resource::Campaigns => "campaigns",
            Resource::Platforms => "platforms",
            Resource::Tags => "tags",
            Resource::PostTypes => "post-types",
            Resource::PostStatuses => "post-statuses",
            Resource::Topics => "topics",
            Resource::Chapters => "chapters",
        }
    }

    pub fn singular(&self) -> &'static str {
        match self {
            Resource::Posts => "post",
            Resource::Campaigns => "campaign",
            Resource::Platforms => "platform",
            Resource::Tags => "tag",
            Resource::PostTypes => "post type",
            Resource::PostStatuses => "post status",
            Resource::Topics => "topic",
            Resource::Chapters => "chapter",
        }
    }

    pub fn plural(&self) -> &'static str {
        match self {
            Resource::Posts => "posts",
            Resource::Campaigns => "campaigns",
            Resource::Platforms => "platforms",
            Resource::Tags => "tags",
            Resource::PostTypes => "post types",
            Resource::PostStatuses => "post statuses",
            Resource::Topics => "topics",
            Resource::Chapters => "chapters",
        }
    }

    /// Page heading used by list screens
    pub fn title(&self) -> String {
        match self {
            Resource::Topics => "Learning Topics".to_string(),
            _ => format!("Manage {}", capitalize(self.plural())),
        }
    }

    /// Resources the console only browses.
    pub fn is_read_only(&self) -> bool {
        matches!(
            self,
            Resource::PostTypes | Resource::PostStatuses | Resource::Topics | Resource::Chapters
        )
    }
}

/// Upper-case the first letter of every word ("post types" -> "Post Types")
pub fn capitalize(s: &str) -> String {
    s.split(' ')
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect::<String>(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

/// Render a backend timestamp in local time.
pub fn format_timestamp(ts: Option<&DateTime<Utc>>) -> String {
    match ts {
        Some(ts) => ts.with_timezone(&Local).format("%Y-%m-%d %H:%M").to_string(),
        None => "-".to_string(),
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Campaign {
    pub id: Id,
    pub name: String,
    #[serde(default)]
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Platform {
    pub id: Id,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Tag {
    pub id: Id,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PostType {
    pub id: Id,
    pub name: String,
    #[serde(default)]
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PostStatus {
    pub id: Id,
    pub name: String,
    /// Position on the editorial board
    #[serde(default)]
    pub order: i32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Post {
    pub id: Id,
    pub title: String,
    pub body: String,
    pub campaign: Id,
    pub platform: Id,
    pub post_type: Id,
    pub status: Id,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub scheduled_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub published_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub campaign_name: Option<String>,
    #[serde(default)]
    pub platform_name: Option<String>,
    #[serde(default)]
    pub status_name: Option<String>,
    #[serde(default)]
    pub tags: Vec<Id>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Topic {
    pub id: Id,
    #[serde(alias = "name")]
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Chapter {
    pub id: Id,
    #[serde(alias = "name")]
    pub title: String,
    #[serde(default, alias = "description")]
    pub content: Option<String>,
    pub topic: Id,
}

/// Label/identifier pair used by option selectors
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OptionItem {
    pub id: Id,
    pub name: String,
}

/// Body sent when creating or replacing a post
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PostPayload {
    pub title: String,
    pub body: String,
    pub campaign: Id,
    pub platform: Id,
    pub post_type: Id,
    pub status: Id,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CampaignPayload {
    pub name: String,
    pub description: String,
}

/// Body of resources that only carry a name (platforms, tags)
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NamePayload {
    pub name: String,
}

fn to_body<T: Serialize>(payload: T) -> Result<Value, DraftError> {
    serde_json::to_value(payload).map_err(|e| DraftError::Encode(e.to_string()))
}

const ID_COLUMN: Column = Column::new("ID", 8);

impl Entity for Post {
    const RESOURCE: Resource = Resource::Posts;

    fn id(&self) -> Id {
        self.id
    }

    fn columns() -> &'static [Column] {
        const COLUMNS: &[Column] = &[
            ID_COLUMN,
            Column::new("Title", 36),
            Column::new("Status", 16),
            Column::new("Created At", 20),
            Column::new("Updated At", 20),
        ];
        COLUMNS
    }

    fn cells(&self) -> Vec<String> {
        vec![
            self.id.to_string(),
            self.title.clone(),
            self.status_name
                .clone()
                .unwrap_or_else(|| format!("#{}", self.status)),
            format_timestamp(self.created_at.as_ref()),
            format_timestamp(self.updated_at.as_ref()),
        ]
    }
}

impl EditableEntity for Post {
    fn fields() -> &'static [FieldSpec] {
        const FIELDS: &[FieldSpec] = &[
            FieldSpec::new("title", "Title", FieldKind::Text),
            FieldSpec::new("campaign", "Campaign", FieldKind::Select(Resource::Campaigns)),
            FieldSpec::new("platform", "Platform", FieldKind::Select(Resource::Platforms)),
            FieldSpec::new("post_type", "Post Type", FieldKind::Select(Resource::PostTypes)),
            FieldSpec::new("status", "Status", FieldKind::Select(Resource::PostStatuses)),
            FieldSpec::new("body", "Body", FieldKind::TextArea),
        ];
        FIELDS
    }

    fn to_draft(&self) -> Draft {
        let mut draft = Draft::for_fields(Self::fields());
        draft.set("title", &self.title);
        draft.set("body", &self.body);
        draft.set("campaign", self.campaign.to_string());
        draft.set("platform", self.platform.to_string());
        draft.set("post_type", self.post_type.to_string());
        draft.set("status", self.status.to_string());
        draft
    }

    fn payload(draft: &Draft) -> Result<Value, DraftError> {
        to_body(PostPayload {
            title: draft.text("title", "Title")?,
            body: draft.text("body", "Body")?,
            campaign: draft.foreign_key("campaign", "Campaign")?,
            platform: draft.foreign_key("platform", "Platform")?,
            post_type: draft.foreign_key("post_type", "Post Type")?,
            status: draft.foreign_key("status", "Status")?,
        })
    }
}

impl Entity for Campaign {
    const RESOURCE: Resource = Resource::Campaigns;

    fn id(&self) -> Id {
        self.id
    }

    fn columns() -> &'static [Column] {
        const COLUMNS: &[Column] = &[
            ID_COLUMN,
            Column::new("Name", 30),
            Column::new("Description", 62),
        ];
        COLUMNS
    }

    fn cells(&self) -> Vec<String> {
        vec![self.id.to_string(), self.name.clone(), self.description.clone()]
    }
}

impl EditableEntity for Campaign {
    fn fields() -> &'static [FieldSpec] {
        const FIELDS: &[FieldSpec] = &[
            FieldSpec::new("name", "Campaign Name", FieldKind::Text),
            FieldSpec::new("description", "Description", FieldKind::TextArea),
        ];
        FIELDS
    }

    fn to_draft(&self) -> Draft {
        let mut draft = Draft::for_fields(Self::fields());
        draft.set("name", &self.name);
        draft.set("description", &self.description);
        draft
    }

    fn payload(draft: &Draft) -> Result<Value, DraftError> {
        to_body(CampaignPayload {
            name: draft.text("name", "Campaign Name")?,
            description: draft.text("description", "Description")?,
        })
    }
}

impl Entity for Platform {
    const RESOURCE: Resource = Resource::Platforms;

    fn id(&self) -> Id {
        self.id
    }

    fn columns() -> &'static [Column] {
        const COLUMNS: &[Column] = &[ID_COLUMN, Column::new("Name", 92)];
        COLUMNS
    }

    fn cells(&self) -> Vec<String> {
        vec![self.id.to_string(), self.name.clone()]
    }
}

impl EditableEntity for Platform {
    fn fields() -> &'static [FieldSpec] {
        const FIELDS: &[FieldSpec] = &[FieldSpec::new("name", "Platform Name", FieldKind::Text)];
        FIELDS
    }

    fn to_draft(&self) -> Draft {
        let mut draft = Draft::for_fields(Self::fields());
        draft.set("name", &self.name);
        draft
    }

    fn payload(draft: &Draft) -> Result<Value, DraftError> {
        to_body(NamePayload {
            name: draft.text("name", "Platform Name")?,
        })
    }
}

impl Entity for Tag {
    const RESOURCE: Resource = Resource::Tags;

    fn id(&self) -> Id {
        self.id
    }

    fn columns() -> &'static [Column] {
        const COLUMNS: &[Column] = &[ID_COLUMN, Column::new("Name", 92)];
        COLUMNS
    }

    fn cells(&self) -> Vec<String> {
        vec![self.id.to_string(), self.name.clone()]
    }
}

impl EditableEntity for Tag {
    fn fields() -> &'static [FieldSpec] {
        const FIELDS: &[FieldSpec] = &[FieldSpec::new("name", "Tag Name", FieldKind::Text)];
        FIELDS
    }

    fn to_draft(&self) -> Draft {
        let mut draft = Draft::for_fields(Self::fields());
        draft.set("name", &self.name);
        draft
    }

    fn payload(draft: &Draft) -> Result<Value, DraftError> {
        to_body(NamePayload {
            name: draft.text("name", "Tag Name")?,
        })
    }
}

impl Entity for PostType {
    const RESOURCE: Resource = Resource::PostTypes;

    fn id(&self) -> Id {
        self.id
    }

    fn columns() -> &'static [Column] {
        const COLUMNS: &[Column] = &[
            ID_COLUMN,
            Column::new("Name", 30),
            Column::new("Description", 62),
        ];
        COLUMNS
    }

    fn cells(&self) -> Vec<String> {
        vec![self.id.to_string(), self.name.clone(), self.description.clone()]
    }
}

impl Entity for PostStatus {
    const RESOURCE: Resource = Resource::PostStatuses;

    fn id(&self) -> Id {
        self.id
    }

    fn columns() -> &'static [Column] {
        const COLUMNS: &[Column] = &[ID_COLUMN, Column::new("Name", 72), Column::new("Order", 20)];
        COLUMNS
    }

    fn cells(&self) -> Vec<String> {
        vec![self.id.to_string(), self.name.clone(), self.order.to_string()]
    }
}

impl Entity for Topic {
    const RESOURCE: Resource = Resource::Topics;

    fn id(&self) -> Id {
        self.id
    }

    fn columns() -> &'static [Column] {
        const COLUMNS: &[Column] = &[
            ID_COLUMN,
            Column::new("Title", 32),
            Column::new("Description", 60),
        ];
        COLUMNS
    }

    fn cells(&self) -> Vec<String> {
        vec![
            self.id.to_string(),
            self.title.clone(),
            self.description.clone().unwrap_or_default(),
        ]
    }

    fn detail_route(id: Id) -> Option<Route> {
        Some(Route::Topic(id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_resource_paths() {
        assert_eq!(Resource::Tags.collection_path(), "api/content/tags/");
        assert_eq!(Resource::Posts.item_path(5), "api/content/posts/5/");
        assert_eq!(Resource::PostStatuses.collection_path(), "api/content/post-statuses/");
        assert_eq!(Resource::Topics.item_path(2), "api/learning/topics/2/");
    }

    #[test]
    fn test_resource_titles() {
        assert_eq!(Resource::Tags.title(), "Manage Tags");
        assert_eq!(Resource::PostTypes.title(), "Manage Post Types");
        assert_eq!(Resource::Topics.title(), "Learning Topics");
    }

    #[test]
    fn test_post_decodes_backend_shape() {
        let post: Post = serde_json::from_value(json!({
            "id": 5,
            "change_item": null,
            "campaign": 1,
            "platform": 2,
            "post_type": 3,
            "status": 4,
            "lesson": null,
            "title": "Launch day",
            "body": "We are live",
            "scheduled_at": null,
            "published_at": null,
            "created_at": "2024-05-01T10:00:00.123456Z",
            "updated_at": "2024-05-02T11:30:00Z",
            "tags": [1, 2],
            "campaign_name": "Fall Sale",
            "platform_name": "LinkedIn",
            "status_name": "draft"
        }))
        .unwrap();

        assert_eq!(post.id, 5);
        assert_eq!(post.status_name.as_deref(), Some("draft"));
        assert_eq!(post.tags, vec![1, 2]);
        assert!(post.created_at.is_some());
        assert_eq!(post.cells()[2], "draft");
    }

    #[test]
    fn test_topic_accepts_name_alias() {
        let topic: Topic = serde_json::from_value(json!({"id": 1, "name": "Rust", "description": null})).unwrap();
        assert_eq!(topic.title, "Rust");
        assert_eq!(topic.cells(), vec!["1", "Rust", ""]);

        let chapter: Chapter =
            serde_json::from_value(json!({"id": 7, "name": "Ownership", "description": "Moves", "topic": 1}))
                .unwrap();
        assert_eq!(chapter.title, "Ownership");
        assert_eq!(chapter.content.as_deref(), Some("Moves"));
    }

    #[test]
    fn test_post_payload_coerces_foreign_keys() {
        let mut draft = Draft::for_fields(Post::fields());
        draft.set("title", "Hello");
        draft.set("body", "World");
        draft.set("campaign", "1");
        draft.set("platform", "2");
        draft.set("post_type", "3");
        draft.set("status", "4");

        let body = Post::payload(&draft).unwrap();
        assert_eq!(
            body,
            json!({"title": "Hello", "body": "World", "campaign": 1, "platform": 2, "post_type": 3, "status": 4})
        );
    }

    #[test]
    fn test_post_draft_round_trips_through_strings() {
        let post: Post = serde_json::from_value(json!({
            "id": 9, "title": "T", "body": "B", "campaign": 11, "platform": 12, "post_type": 13, "status": 14
        }))
        .unwrap();
        let draft = post.to_draft();
        assert_eq!(draft.get("campaign"), "11");
        assert_eq!(draft.get("status"), "14");
    }

    #[test]
    fn test_campaign_payload_requires_every_field() {
        let mut draft = Draft::for_fields(Campaign::fields());
        draft.set("name", "Fall Sale");
        let err = Campaign::payload(&draft).unwrap_err();
        assert_eq!(err, DraftError::Missing("Description".to_string()));
    }
}
