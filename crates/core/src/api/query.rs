//! SQL queries, assets and system information.

use serde_json::json;

use super::SiyuanClient;
use super::error::ApiError;
use super::types::SqlRow;

impl SiyuanClient {
    /// Run a SQL statement against the block database.
    pub fn sql_query(&self, stmt: &str) -> Result<Vec<SqlRow>, ApiError> {
        let rows: Option<Vec<SqlRow>> = self.post("/api/query/sql", &json!({ "stmt": stmt }))?;
        Ok(rows.unwrap_or_default())
    }

    /// List asset paths stored in a notebook.
    pub fn list_assets(&self, notebook: &str) -> Result<Vec<String>, ApiError> {
        let assets: Option<Vec<String>> =
            self.post("/api/asset/lsAssets", &json!({ "notebook": notebook }))?;
        Ok(assets.unwrap_or_default())
    }

    /// Kernel version string.
    pub fn system_version(&self) -> Result<String, ApiError> {
        let version: Option<String> = self.post("/api/system/version", &json!({}))?;
        Ok(version.unwrap_or_default())
    }
}
