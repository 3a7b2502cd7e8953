//! Messages exchanged with a key-generation worker.
//!
//! ```json
//! {"type": "generateKey", "payload": {"taxonId": 1, "options": {"entityLimit": 50}}}
//! {"type": "generateKey:result", "payload": {"rootNode": {...}}}
//! {"type": "generateKey:error", "error": "[EMPTY_SUBTREE] ..."}
//! ```

use serde::{Deserialize, Serialize};
use taxokey_core::models::{GenerationOptions, KeyNode};
use taxokey_core::types::EntityId;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateKeyPayload {
    pub taxon_id: EntityId,
    #[serde(default)]
    pub options: GenerationOptions,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct KeyResultPayload {
    pub root_node: KeyNode,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum WorkerRequest {
    #[serde(rename = "generateKey")]
    GenerateKey { payload: GenerateKeyPayload },
}

impl WorkerRequest {
    pub fn generate_key(taxon_id: EntityId, options: GenerationOptions) -> Self {
        Self::GenerateKey {
            payload: GenerateKeyPayload { taxon_id, options },
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum WorkerResponse {
    #[serde(rename = "generateKey:result")]
    Result { payload: KeyResultPayload },
    #[serde(rename = "generateKey:error")]
    Error { error: String },
}

impl WorkerResponse {
    pub fn is_error(&self) -> bool {
        matches!(self, Self::Error { .. })
    }

    pub fn root_node(&self) -> Option<&KeyNode> {
        match self {
            Self::Result { payload } => Some(&payload.root_node),
            Self::Error { .. } => None,
        }
    }
}
