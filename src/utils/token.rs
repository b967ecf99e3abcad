use chrono::Duration;
use jsonwebtoken::{encode, EncodingKey, Header};
use uuid::Uuid;

use crate::config::get_config;
use crate::error::{Error, Result};
use crate::middleware::auth::Claims;
use crate::models::user::UserRole;

/// Issues the signed session token returned by login. The claims carry the
/// user id and role; expiry comes from `JWT_TTL_HOURS`.
pub fn issue_session_token(user_id: Uuid, role: UserRole) -> Result<String> {
    let config = get_config();
    let exp = crate::utils::time::now() + Duration::hours(config.jwt_ttl_hours);
    let claims = Claims {
        sub: user_id.to_string(),
        exp: exp.timestamp() as usize,
        role: Some(role.as_str().to_string()),
    };
    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(config.jwt_secret.as_bytes()),
    )
    .map_err(|e| Error::Internal(format!("Failed to sign session token: {}", e)))
}
