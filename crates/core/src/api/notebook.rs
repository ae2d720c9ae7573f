//! Notebook operations.

use serde_json::{Value, json};
use tracing::info;

use super::SiyuanClient;
use super::error::ApiError;
use super::types::{CreatedNotebook, Notebook, NotebookList};

impl SiyuanClient {
    /// List all notebooks.
    pub fn list_notebooks(&self) -> Result<Vec<Notebook>, ApiError> {
        let list: NotebookList = self.post("/api/notebook/lsNotebooks", &json!({}))?;
        Ok(list.notebooks)
    }

    /// Create a notebook and return it.
    pub fn create_notebook(&self, name: &str) -> Result<Notebook, ApiError> {
        info!("Creating notebook {}", name);
        let created: CreatedNotebook =
            self.post("/api/notebook/createNotebook", &json!({ "name": name }))?;
        Ok(created.notebook)
    }

    pub fn rename_notebook(&self, id: &str, name: &str) -> Result<(), ApiError> {
        info!("Renaming notebook {} to {}", id, name);
        self.post_unit("/api/notebook/renameNotebook", &json!({ "notebook": id, "name": name }))
    }

    pub fn remove_notebook(&self, id: &str) -> Result<(), ApiError> {
        info!("Removing notebook {}", id);
        self.post_unit("/api/notebook/removeNotebook", &json!({ "notebook": id }))
    }

    pub fn open_notebook(&self, id: &str) -> Result<(), ApiError> {
        self.post_unit("/api/notebook/openNotebook", &json!({ "notebook": id }))
    }

    pub fn close_notebook(&self, id: &str) -> Result<(), ApiError> {
        self.post_unit("/api/notebook/closeNotebook", &json!({ "notebook": id }))
    }

    /// Fetch a notebook's configuration object.
    pub fn notebook_conf(&self, id: &str) -> Result<Value, ApiError> {
        self.post_value("/api/notebook/getNotebookConf", &json!({ "notebook": id }))
    }
}
