//! Document (file tree) operations.

use serde_json::json;
use tracing::{debug, info};

use super::SiyuanClient;
use super::error::ApiError;
use super::types::{
    CreateDocRequest, DocContent, ExportResult, MoveDocsByIdRequest, MoveDocsRequest,
};
use crate::paths::{child_doc_path, normalize_doc_path};

impl SiyuanClient {
    /// Create a document from Markdown and return its ID.
    pub fn create_doc(&self, request: &CreateDocRequest) -> Result<String, ApiError> {
        info!("Creating document {} in notebook {}", request.path, request.notebook);
        let mut payload = json!({
            "notebook": request.notebook,
            "path": request.path,
            "markdown": request.markdown,
        });
        if let Some(parent_id) = &request.parent_id {
            payload["parentID"] = json!(parent_id);
        }
        self.post("/api/filetree/createDocWithMd", &payload)
    }

    /// Remove a document by notebook and path.
    pub fn remove_doc(&self, notebook: &str, path: &str) -> Result<(), ApiError> {
        info!("Removing document {} from notebook {}", path, notebook);
        self.post_unit("/api/filetree/removeDoc", &json!({ "notebook": notebook, "path": path }))
    }

    pub fn remove_doc_by_id(&self, id: &str) -> Result<(), ApiError> {
        info!("Removing document {}", id);
        self.post_unit("/api/filetree/removeDocByID", &json!({ "id": id }))
    }

    /// Rename a document addressed by its human-readable path.
    ///
    /// The path is resolved to an ID first; the first match is renamed.
    pub fn rename_doc(&self, notebook: &str, hpath: &str, title: &str) -> Result<(), ApiError> {
        let ids = self.ids_by_hpath(notebook, hpath)?;
        let id = ids
            .into_iter()
            .next()
            .ok_or_else(|| ApiError::NotFound(format!("document {hpath}")))?;
        self.rename_doc_by_id(&id, title)
    }

    pub fn rename_doc_by_id(&self, id: &str, title: &str) -> Result<(), ApiError> {
        info!("Renaming document {} to {}", id, title);
        self.post_unit("/api/filetree/renameDocByID", &json!({ "id": id, "title": title }))
    }

    pub fn move_docs(&self, request: &MoveDocsRequest) -> Result<(), ApiError> {
        info!("Moving {:?} to {}:{}", request.from_paths, request.to_notebook, request.to_path);
        self.post_unit(
            "/api/filetree/moveDocs",
            &json!({
                "fromPaths": request.from_paths,
                "toNotebook": request.to_notebook,
                "toPath": request.to_path,
            }),
        )
    }

    pub fn move_docs_by_id(&self, request: &MoveDocsByIdRequest) -> Result<(), ApiError> {
        info!("Moving {:?} under {}", request.from_ids, request.to_id);
        self.post_unit(
            "/api/filetree/moveDocsByID",
            &json!({ "fromIDs": request.from_ids, "toID": request.to_id }),
        )
    }

    /// Export a document as SiYuan Kramdown with frontmatter.
    pub fn export_md_content(&self, id: &str) -> Result<ExportResult, ApiError> {
        self.post("/api/export/exportMdContent", &json!({ "id": id }))
    }

    pub fn hpath_by_path(&self, notebook: &str, path: &str) -> Result<String, ApiError> {
        let value: Option<String> = self.post(
            "/api/filetree/getHPathByPath",
            &json!({ "notebook": notebook, "path": path }),
        )?;
        Ok(value.unwrap_or_default())
    }

    pub fn hpath_by_id(&self, id: &str) -> Result<String, ApiError> {
        let value: Option<String> = self.post("/api/filetree/getHPathByID", &json!({ "id": id }))?;
        Ok(value.unwrap_or_default())
    }

    /// Resolve a human-readable path to document IDs.
    pub fn ids_by_hpath(&self, notebook: &str, hpath: &str) -> Result<Vec<String>, ApiError> {
        let ids: Option<Vec<String>> = self.post(
            "/api/filetree/getIDsByHPath",
            &json!({ "path": hpath, "notebook": notebook }),
        )?;
        let ids = ids.unwrap_or_default();
        debug!("{} resolved to {} id(s)", hpath, ids.len());
        Ok(ids)
    }

    /// Fetch a document's rendered content.
    pub fn get_doc(&self, id: &str) -> Result<DocContent, ApiError> {
        self.post("/api/filetree/getDoc", &json!({ "id": id }))
    }

    /// Create `child` below the document at `parent` and return the new ID.
    ///
    /// A root parent (`/`) creates a top-level document. Otherwise the parent
    /// must resolve to an existing document.
    pub fn insert_child_doc(
        &self,
        notebook: &str,
        parent: &str,
        child: &str,
        markdown: &str,
    ) -> Result<(String, String), ApiError> {
        let parent = normalize_doc_path(parent);
        let full_path = child_doc_path(&parent, child);

        let parent_id = if parent == "/" {
            None
        } else {
            let ids = self.ids_by_hpath(notebook, &parent)?;
            Some(
                ids.into_iter()
                    .next()
                    .ok_or_else(|| ApiError::NotFound(format!("parent document {parent}")))?,
            )
        };

        let id = self.create_doc(&CreateDocRequest {
            notebook: notebook.to_string(),
            path: full_path.clone(),
            markdown: markdown.to_string(),
            parent_id,
        })?;
        Ok((id, full_path))
    }
}
