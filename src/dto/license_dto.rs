//! DTOs de licencia/activación

use serde::{Deserialize, Serialize};

/// Request de activación
#[derive(Debug, Deserialize)]
pub struct ActivateRequest {
    pub key: Option<String>,
}

/// Response de activación
#[derive(Debug, Serialize)]
pub struct ActivateResponse {
    pub success: bool,
    pub message: String,
}
