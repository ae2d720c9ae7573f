//! Block operations.

use std::collections::BTreeMap;

use serde_json::json;
use tracing::info;

use super::SiyuanClient;
use super::error::ApiError;
use super::types::{
    Backlinks, Block, BlockKramdown, DataType, InsertBlockRequest, UpdateBlockRequest,
};

impl SiyuanClient {
    /// Fetch a block's Kramdown source.
    pub fn block_kramdown(&self, id: &str) -> Result<BlockKramdown, ApiError> {
        self.post("/api/block/getBlockKramdown", &json!({ "id": id }))
    }

    pub fn update_block(&self, request: &UpdateBlockRequest) -> Result<(), ApiError> {
        info!("Updating block {}", request.id);
        self.post_unit(
            "/api/block/updateBlock",
            &json!({ "id": request.id, "dataType": request.data_type, "data": request.data }),
        )
    }

    pub fn delete_block(&self, id: &str) -> Result<(), ApiError> {
        info!("Deleting block {}", id);
        self.post_unit("/api/block/deleteBlock", &json!({ "id": id }))
    }

    pub fn insert_block(&self, request: &InsertBlockRequest) -> Result<(), ApiError> {
        let mut payload = json!({ "dataType": request.data_type, "data": request.data });
        if let Some(id) = &request.previous_id {
            payload["previousID"] = json!(id);
        }
        if let Some(id) = &request.next_id {
            payload["nextID"] = json!(id);
        }
        if let Some(id) = &request.parent_id {
            payload["parentID"] = json!(id);
        }
        self.post_unit("/api/block/insertBlock", &payload)
    }

    /// Insert as the first child of `parent_id`.
    pub fn prepend_block(
        &self,
        parent_id: &str,
        data_type: DataType,
        data: &str,
    ) -> Result<(), ApiError> {
        self.post_unit(
            "/api/block/prependBlock",
            &json!({ "parentID": parent_id, "dataType": data_type, "data": data }),
        )
    }

    /// Insert as the last child of `parent_id`.
    pub fn append_block(
        &self,
        parent_id: &str,
        data_type: DataType,
        data: &str,
    ) -> Result<(), ApiError> {
        self.post_unit(
            "/api/block/appendBlock",
            &json!({ "parentID": parent_id, "dataType": data_type, "data": data }),
        )
    }

    /// Move a block after `previous_id`, or under `parent_id`.
    pub fn move_block(
        &self,
        id: &str,
        previous_id: Option<&str>,
        parent_id: Option<&str>,
    ) -> Result<(), ApiError> {
        info!("Moving block {}", id);
        let mut payload = json!({ "id": id });
        if let Some(prev) = previous_id {
            payload["previousID"] = json!(prev);
        }
        if let Some(parent) = parent_id {
            payload["parentID"] = json!(parent);
        }
        self.post_unit("/api/block/moveBlock", &payload)
    }

    pub fn child_blocks(&self, id: &str) -> Result<Vec<Block>, ApiError> {
        let blocks: Option<Vec<Block>> =
            self.post("/api/block/getChildBlocks", &json!({ "id": id }))?;
        Ok(blocks.unwrap_or_default())
    }

    pub fn fold_block(&self, id: &str) -> Result<(), ApiError> {
        self.post_unit("/api/block/foldBlock", &json!({ "id": id }))
    }

    pub fn unfold_block(&self, id: &str) -> Result<(), ApiError> {
        self.post_unit("/api/block/unfoldBlock", &json!({ "id": id }))
    }

    /// Repoint references from one definition block to another.
    ///
    /// With `ref_ids` empty, every referencing block is updated.
    pub fn transfer_block_ref(
        &self,
        from_id: &str,
        to_id: &str,
        ref_ids: &[String],
    ) -> Result<(), ApiError> {
        info!("Transferring references from {} to {}", from_id, to_id);
        let mut payload = json!({ "fromID": from_id, "toID": to_id });
        if !ref_ids.is_empty() {
            payload["refIDs"] = json!(ref_ids);
        }
        self.post_unit("/api/block/transferBlockRef", &payload)
    }

    pub fn block_attrs(&self, id: &str) -> Result<BTreeMap<String, String>, ApiError> {
        let attrs: Option<BTreeMap<String, String>> =
            self.post("/api/attr/getBlockAttrs", &json!({ "id": id }))?;
        Ok(attrs.unwrap_or_default())
    }

    pub fn set_block_attrs(
        &self,
        id: &str,
        attrs: &BTreeMap<String, String>,
    ) -> Result<(), ApiError> {
        info!("Setting {} attribute(s) on block {}", attrs.len(), id);
        self.post_unit("/api/attr/setBlockAttrs", &json!({ "id": id, "attrs": attrs }))
    }

    pub fn backlinks(&self, id: &str) -> Result<Backlinks, ApiError> {
        let links: Option<Backlinks> = self.post("/api/ref/listBacklink", &json!({ "id": id }))?;
        Ok(links.unwrap_or_default())
    }
}
