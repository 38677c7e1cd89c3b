//! Merchant admin JWT authentication

use axum::{
    extract::{Request, State},
    middleware::Next,
    response::{IntoResponse, Response},
};
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use shared::error::AppError;

use crate::state::AppState;

/// JWT claims for merchant admin authentication
#[derive(Debug, Serialize, Deserialize)]
pub struct AdminClaims {
    /// Admin user ID
    pub sub: String,
    /// Store this admin manages
    pub store_id: i64,
    /// Expiration (Unix timestamp seconds)
    pub exp: usize,
    /// Issued at (Unix timestamp seconds)
    pub iat: usize,
}

/// Authenticated merchant identity extracted from JWT.
///
/// `store_id` is the tenant key: every admin query filters by it, so a
/// token can never read or mutate another store's data.
#[derive(Debug, Clone)]
pub struct AdminIdentity {
    pub admin_id: String,
    pub store_id: i64,
}

const JWT_EXPIRY_HOURS: i64 = 24;

/// Create a JWT token for a merchant admin
#[allow(dead_code)]
pub fn create_token(
    admin_id: &str,
    store_id: i64,
    secret: &str,
) -> Result<String, jsonwebtoken::errors::Error> {
    let now = chrono::Utc::now();
    let claims = AdminClaims {
        sub: admin_id.to_string(),
        store_id,
        exp: (now + chrono::Duration::hours(JWT_EXPIRY_HOURS)).timestamp() as usize,
        iat: now.timestamp() as usize,
    };

    jsonwebtoken::encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
}

/// Middleware that extracts and verifies the admin JWT from the
/// Authorization header, then inserts [`AdminIdentity`] into extensions
pub async fn admin_auth_middleware(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response, Response> {
    let auth_header = request
        .headers()
        .get("Authorization")
        .and_then(|v| v.to_str().ok())
        .ok_or_else(|| AppError::not_authenticated().into_response())?;

    let token = auth_header
        .strip_prefix("Bearer ")
        .ok_or_else(|| AppError::not_authenticated().into_response())?;

    let validation = Validation::default();
    let token_data = jsonwebtoken::decode::<AdminClaims>(
        token,
        &DecodingKey::from_secret(state.jwt_secret.as_bytes()),
        &validation,
    )
    .map_err(|e| {
        tracing::debug!("JWT validation failed: {e}");
        AppError::invalid_token("Invalid or expired token").into_response()
    })?;

    let identity = AdminIdentity {
        admin_id: token_data.claims.sub,
        store_id: token_data.claims.store_id,
    };

    request.extensions_mut().insert(identity);

    Ok(next.run(request).await)
}
