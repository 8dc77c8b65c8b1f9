use chrono::{Duration, Utc};
use jsonwebtoken::errors::{Error, ErrorKind};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use shared_types::Session;
use uuid::Uuid;

/// Claims carried in the session cookie. The role is copied from the
/// profile at sign-in and on session refresh.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Claims {
    pub sub: Uuid,
    pub email: String,
    pub name: String,
    pub role: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avatar_url: Option<String>,
    pub exp: i64,
    pub iat: i64,
    pub jti: String,
}

impl Claims {
    pub fn session(&self) -> Session {
        Session {
            user_id: self.sub,
            email: self.email.clone(),
            display_name: self.name.clone(),
            role: self.role.clone(),
            avatar_url: self.avatar_url.clone(),
        }
    }
}

fn jwt_secret() -> Result<String, Error> {
    std::env::var("JWT_SECRET")
        .ok()
        .filter(|s| !s.is_empty())
        .ok_or_else(|| ErrorKind::InvalidKeyFormat.into())
}

pub fn session_expiry_hours() -> i64 {
    std::env::var("JWT_SESSION_EXPIRY_HOURS")
        .ok()
        .and_then(|v| v.parse().ok())
        .filter(|h: &i64| *h > 0)
        .unwrap_or(12)
}

/// Sign a session token for `session`.
pub fn issue_session_token(session: &Session) -> Result<String, Error> {
    let now = Utc::now();
    let claims = Claims {
        sub: session.user_id,
        email: session.email.clone(),
        name: session.display_name.clone(),
        role: session.role.clone(),
        avatar_url: session.avatar_url.clone(),
        iat: now.timestamp(),
        exp: (now + Duration::hours(session_expiry_hours())).timestamp(),
        jti: Uuid::new_v4().to_string(),
    };
    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(jwt_secret()?.as_bytes()),
    )
}

/// Verify signature and expiry.
pub fn validate_session_token(token: &str) -> Result<Claims, Error> {
    let token_data = decode::<Claims>(
        token,
        &DecodingKey::from_secret(jwt_secret()?.as_bytes()),
        &Validation::default(),
    )?;
    Ok(token_data.claims)
}
