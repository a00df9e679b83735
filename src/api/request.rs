use serde_json::Value;

use crate::models::{Id, Resource};

/// One backend call, described as data
#[derive(Debug, Clone, PartialEq)]
pub enum ApiRequest {
    List {
        resource: Resource,
        query: Vec<(String, String)>,
    },
    Get {
        resource: Resource,
        id: Id,
    },
    Create {
        resource: Resource,
        body: Value,
    },
    Update {
        resource: Resource,
        id: Id,
        body: Value,
    },
    Delete {
        resource: Resource,
        id: Id,
    },
}

impl ApiRequest {
    pub fn list(resource: Resource) -> Self {
        ApiRequest::List {
            resource,
            query: Vec::new(),
        }
    }

    /// Collection filtered by a single query parameter (`?topic=3`)
    pub fn list_filtered(resource: Resource, key: &str, value: impl ToString) -> Self {
        ApiRequest::List {
            resource,
            query: vec![(key.to_string(), value.to_string())],
        }
    }

    pub fn get(resource: Resource, id: Id) -> Self {
        ApiRequest::Get { resource, id }
    }

    pub fn create(resource: Resource, body: Value) -> Self {
        ApiRequest::Create { resource, body }
    }

    pub fn update(resource: Resource, id: Id, body: Value) -> Self {
        ApiRequest::Update { resource, id, body }
    }

    pub fn delete(resource: Resource, id: Id) -> Self {
        ApiRequest::Delete { resource, id }
    }

    pub fn method(&self) -> &'static str {
        match self {
            ApiRequest::List { .. } | ApiRequest::Get { .. } => "GET",
            ApiRequest::Create { .. } => "POST",
            ApiRequest::Update { .. } => "PUT",
            ApiRequest::Delete { .. } => "DELETE",
        }
    }

    /// Path relative to the API base URL, without the query string
    pub fn path(&self) -> String {
        match self {
            ApiRequest::List { resource, .. } | ApiRequest::Create { resource, .. } => {
                resource.collection_path().to_string()
            }
            ApiRequest::Get { resource, id }
            | ApiRequest::Update { resource, id, .. }
            | ApiRequest::Delete { resource, id } => resource.item_path(*id),
        }
    }

    pub fn query(&self) -> &[(String, String)] {
        match self {
            ApiRequest::List { query, .. } => query,
            _ => &[],
        }
    }

    pub fn body(&self) -> Option<&Value> {
        match self {
            ApiRequest::Create { body, .. } | ApiRequest::Update { body, .. } => Some(body),
            _ => None,
        }
    }

    /// Short form for logs, e.g. `GET api/learning/chapters/?topic=3`
    pub fn describe(&self) -> String {
        let query = self
            .query()
            .iter()
            .map(|(k, v)| format!("{}={}", k, v))
            .collect::<Vec<_>>()
            .join("&");
        if query.is_empty() {
            format!("{} {}", self.method(), self.path())
        } else {
            format!("{} {}?{}", self.method(), self.path(), query)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_request_paths_and_methods() {
        let request = ApiRequest::update(Resource::Posts, 5, json!({"title": "x"}));
        assert_eq!(request.method(), "PUT");
        assert_eq!(request.path(), "api/content/posts/5/");
        assert_eq!(request.body(), Some(&json!({"title": "x"})));

        let request = ApiRequest::create(Resource::Campaigns, json!({}));
        assert_eq!(request.method(), "POST");
        assert_eq!(request.path(), "api/content/campaigns/");

        assert_eq!(ApiRequest::delete(Resource::Tags, 1).describe(), "DELETE api/content/tags/1/");
    }

    #[test]
    fn test_filtered_list_describe() {
        let request = ApiRequest::list_filtered(Resource::Chapters, "topic", 3);
        assert_eq!(request.describe(), "GET api/learning/chapters/?topic=3");
        assert_eq!(request.body(), None);
    }
}
