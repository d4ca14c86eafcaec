//! Request handlers, one module per resource.

pub mod collaborators;
pub mod orders;
pub mod products;

use serde::{Deserialize, Serialize};

/// Plain confirmation body for operations without a resource to return.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MessageResponse {
    /// What happened
    pub message: String,
    /// How many records were affected
    #[serde(skip_serializing_if = "Option::is_none")]
    pub count: Option<u64>,
}

impl MessageResponse {
    /// Message with an affected-record count.
    pub fn with_count(message: impl Into<String>, count: u64) -> Self {
        Self {
            message: message.into(),
            count: Some(count),
        }
    }
}

/// GET /health
pub async fn health() -> &'static str {
    "ok"
}
