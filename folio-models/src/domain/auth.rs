use super::user::UserInfo;
use chrono::Utc;
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

#[derive(Debug, Serialize, Deserialize, Validate)]
pub struct LoginRequest {
    #[validate(required(message = "email is required"), email(message = "email is invalid"))]
    pub email: Option<String>,
    #[validate(required(message = "password is required"))]
    pub password: Option<String>,
}

#[derive(Debug, Serialize, Clone)]
#[serde(rename_all = "camelCase")]
pub struct LoginResponse {
    pub token: String,
    pub expires_at: i64,
    pub user: UserInfo,
}

/// Session token claims.
///
/// Tokens carry the caller's email so the maintenance gate and the admin guard can
/// resolve the local user record without a second round trip to the issuer.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Claims {
    pub jti: String,
    pub sub: String,
    pub iss: String,
    pub exp: i64,
    pub nbf: i64,
    pub iat: i64,
    pub email: String,
}

impl Claims {
    pub fn new(iss: String, user_id: i32, email: String, expire_secs: i64) -> Self {
        let now = Utc::now().timestamp();
        Self {
            jti: Uuid::new_v4().into(),
            sub: user_id.to_string(),
            iss,
            exp: now + expire_secs,
            nbf: now,
            iat: now,
            email,
        }
    }
}

/// Identity of a caller as resolved from a valid session token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    pub user_id: Option<i32>,
    pub email: String,
}

impl From<Claims> for Session {
    fn from(claims: Claims) -> Self {
        Self {
            user_id: claims.sub.parse().ok(),
            email: claims.email,
        }
    }
}
