//! Request and response types for the SiYuan kernel API.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Response envelope wrapping every API reply.
#[derive(Debug, Deserialize)]
pub(crate) struct Envelope {
    pub code: i64,
    #[serde(default)]
    pub msg: String,
    #[serde(default)]
    pub data: Value,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notebook {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub icon: String,
    #[serde(default)]
    pub sort: i64,
    #[serde(default)]
    pub closed: bool,
}

#[derive(Debug, Deserialize)]
pub(crate) struct NotebookList {
    #[serde(default)]
    pub notebooks: Vec<Notebook>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct CreatedNotebook {
    pub notebook: Notebook,
}

/// A child block as returned by `getChildBlocks`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Block {
    pub id: String,
    #[serde(rename = "type", default)]
    pub block_type: String,
    #[serde(rename = "subType", default, skip_serializing_if = "Option::is_none")]
    pub sub_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BlockKramdown {
    pub id: String,
    pub kramdown: String,
}

/// Result of `exportMdContent`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExportResult {
    #[serde(default)]
    pub content: String,
    #[serde(rename = "hPath", default, skip_serializing_if = "Option::is_none")]
    pub h_path: Option<String>,
}

/// Result of `getDoc`. Fields beyond content and path are kept verbatim.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DocContent {
    #[serde(default)]
    pub content: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Backlink {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub content: String,
    #[serde(default)]
    pub path: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Backlinks {
    #[serde(default)]
    pub backlinks: Vec<Backlink>,
}

/// Payload encoding for block writes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DataType {
    #[default]
    Markdown,
    Dom,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CreateDocRequest {
    pub notebook: String,
    pub path: String,
    pub markdown: String,
    #[serde(rename = "parentID", skip_serializing_if = "Option::is_none")]
    pub parent_id: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MoveDocsRequest {
    #[serde(rename = "fromPaths")]
    pub from_paths: Vec<String>,
    #[serde(rename = "toNotebook")]
    pub to_notebook: String,
    #[serde(rename = "toPath")]
    pub to_path: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MoveDocsByIdRequest {
    #[serde(rename = "fromIDs")]
    pub from_ids: Vec<String>,
    #[serde(rename = "toID")]
    pub to_id: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UpdateBlockRequest {
    pub id: String,
    #[serde(rename = "dataType")]
    pub data_type: DataType,
    pub data: String,
}

/// Where a new or moved block goes relative to an existing one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BlockAnchor {
    /// Place right after this block.
    After(String),
    /// Place right before this block.
    Before(String),
    /// Place as the last child of this block.
    Under(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct InsertBlockRequest {
    #[serde(rename = "dataType")]
    pub data_type: DataType,
    pub data: String,
    #[serde(rename = "previousID", skip_serializing_if = "Option::is_none")]
    pub previous_id: Option<String>,
    #[serde(rename = "nextID", skip_serializing_if = "Option::is_none")]
    pub next_id: Option<String>,
    #[serde(rename = "parentID", skip_serializing_if = "Option::is_none")]
    pub parent_id: Option<String>,
}

impl InsertBlockRequest {
    pub fn new(data_type: DataType, data: impl Into<String>, anchor: BlockAnchor) -> Self {
        let mut req = Self {
            data_type,
            data: data.into(),
            previous_id: None,
            next_id: None,
            parent_id: None,
        };
        match anchor {
            BlockAnchor::After(id) => req.previous_id = Some(id),
            BlockAnchor::Before(id) => req.next_id = Some(id),
            BlockAnchor::Under(id) => req.parent_id = Some(id),
        }
        req
    }
}

/// One row of a SQL query result.
pub type SqlRow = Map<String, Value>;

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn insert_request_uses_api_field_names() {
        let req = InsertBlockRequest::new(DataType::Markdown, "hi", BlockAnchor::After("b1".into()));
        assert_eq!(
            serde_json::to_value(&req).unwrap(),
            json!({"dataType": "markdown", "data": "hi", "previousID": "b1"})
        );
    }

    #[test]
    fn notebook_defaults_optional_fields() {
        let nb: Notebook = serde_json::from_value(json!({"id": "n1", "name": "Inbox"})).unwrap();
        assert_eq!(nb.icon, "");
        assert!(!nb.closed);
    }

    #[test]
    fn doc_content_keeps_unknown_fields() {
        let doc: DocContent =
            serde_json::from_value(json!({"content": "<p/>", "rootID": "r1", "mode": 0})).unwrap();
        assert_eq!(doc.content, "<p/>");
        assert_eq!(doc.extra.get("rootID"), Some(&json!("r1")));
    }
}
