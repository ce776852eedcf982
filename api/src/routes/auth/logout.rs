use actix_web::{web, HttpResponse};
use tracing::info;

use tg_shared::ApiResponse;

use crate::app::AppState;
use crate::dto::auth::LogoutResponse;
use crate::middleware::auth::AuthContext;

pub const LOGOUT_MESSAGE: &str = "Logged out successfully";

/// Handler for POST /api/v1/auth/logout
///
/// Revokes the bearer token the request was authenticated with. Later
/// requests carrying the same token are rejected until the revocation
/// lapses.
///
/// # Headers
///
/// ```text
/// Authorization: Bearer {token}
/// ```
///
/// # Response
///
/// ## Success (200 OK)
/// ```json
/// {
///     "data": { "message": "Logged out successfully" }
/// }
/// ```
///
/// ## Errors
/// - 401 Unauthorized: Missing, invalid, expired or already revoked token
pub async fn logout(auth: AuthContext, state: web::Data<AppState>) -> HttpResponse {
    let until = state.authenticator.logout(&auth.token);
    info!(%until, "Logout completed");

    HttpResponse::Ok().json(ApiResponse::new(LogoutResponse {
        message: LOGOUT_MESSAGE.to_string(),
    }))
}
