use crate::{
    config::IdTokenSettings,
    models::{AuthContext, LoginUser},
    utils::AppError,
};
use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::HashSet;
use uuid::Uuid;

// Standard claims plus whatever the rules put on context.idToken.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct IdTokenClaims {
    pub sub: String,
    pub email: String,
    pub iat: usize,
    pub exp: usize,
    pub jti: String,
    pub aud: String,
    pub iss: String,
    #[serde(flatten)]
    pub custom: Map<String, Value>,
}

const RESERVED_CLAIMS: [&str; 7] = ["sub", "email", "iat", "exp", "jti", "aud", "iss"];

/// Mint an HS256 id token for `user` carrying the rule-added claims.
///
/// Rules cannot override the registered claims; such entries are dropped.
pub fn issue_id_token(
    user: &LoginUser,
    context: &AuthContext,
    settings: &IdTokenSettings,
) -> Result<String, AppError> {
    let now = Utc::now();
    let iat = now.timestamp() as usize;
    let exp = Duration::try_hours(settings.ttl_hours)
        .and_then(|ttl| now.checked_add_signed(ttl))
        .ok_or_else(|| {
            AppError::Token(format!("Id token lifetime of {} hours is out of range", settings.ttl_hours))
        })?
        .timestamp() as usize;

    let custom = context
        .id_token
        .iter()
        .filter(|(name, _)| {
            let reserved = RESERVED_CLAIMS.contains(&name.as_str());
            if reserved {
                log::warn!("⚠️  Ignoring reserved id token claim set by a rule: {}", name);
            }
            !reserved
        })
        .map(|(name, value)| (name.clone(), value.clone()))
        .collect();

    let claims = IdTokenClaims {
        sub: user.email.clone(),
        email: user.email.clone(),
        iat,
        exp,
        jti: Uuid::new_v4().to_string(),
        aud: settings.audience.clone(),
        iss: settings.issuer.clone(),
        custom,
    };

    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(settings.secret.as_ref()),
    )
    .map_err(|e| AppError::Token(format!("Failed to generate id token: {}", e)))
}

pub fn verify_id_token(token: &str, settings: &IdTokenSettings) -> Result<IdTokenClaims, AppError> {
    let mut validation = Validation::new(Algorithm::HS256);
    validation.set_audience(&[settings.audience.as_str()]);

    let mut issuers = HashSet::new();
    issuers.insert(settings.issuer.clone());
    validation.iss = Some(issuers);

    decode::<IdTokenClaims>(
        token,
        &DecodingKey::from_secret(settings.secret.as_ref()),
        &validation,
    )
    .map(|data| data.claims)
    .map_err(|e| AppError::Token(format!("Invalid token: {}", e)))
}
