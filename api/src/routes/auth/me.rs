use actix_web::HttpResponse;

use tg_shared::ApiResponse;

use crate::dto::auth::ProfileResponse;
use crate::middleware::auth::AuthContext;

/// Handler for GET /api/v1/auth/me
///
/// Returns the claims carried by the caller's token, `exp` included.
pub async fn me(auth: AuthContext) -> HttpResponse {
    HttpResponse::Ok().json(ApiResponse::new(ProfileResponse {
        claims: auth.claims,
    }))
}
