//! Authentication response bodies

use serde::{Deserialize, Serialize};
use tg_core::Claims;

/// Body of a successful logout
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogoutResponse {
    pub message: String,
}

/// Claims of the authenticated caller
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProfileResponse {
    pub claims: Claims,
}
