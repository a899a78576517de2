use axum_extra::extract::cookie::{Cookie, SameSite};
use axum_extra::extract::CookieJar;
use chrono::Utc;
use color_eyre::eyre::{eyre, Context, ContextCompat, Result};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Validation};
use secrecy::{ExposeSecret, Secret};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::domain::{AuthAPIError, OrgId, StaffRole, WorkerId};

use super::constants::{JWT_COOKIE_NAME, JWT_SECRET};

// Create cookie with a new JWT auth token
#[tracing::instrument(name = "Generating auth cookie", skip_all)]
pub fn generate_auth_cookie(
    worker_id: &WorkerId,
    org_id: &OrgId,
    role: StaffRole,
) -> Result<Cookie<'static>> {
    let token = generate_auth_token(worker_id, org_id, role)?;
    Ok(create_auth_cookie(token))
}

// Create cookie and set the value to the passed-in token string
#[tracing::instrument(name = "Creating auth cookie", skip_all)]
fn create_auth_cookie(token: Secret<String>) -> Cookie<'static> {
    let cookie =
        Cookie::build((JWT_COOKIE_NAME, token.expose_secret().to_owned()))
            .path("/") // apply cookie to all URLs on the server
            .http_only(true) // prevent JavaScript from accessing the cookie
            .same_site(SameSite::Lax) // send cookie with "same-site" requests, and with "cross-site" top-level navigations.
            .build();

    cookie
}

// This value determines how long the JWT auth token is valid for
pub const TOKEN_TTL_SECONDS: i64 = 600; // 10 minutes

// Create JWT auth token
#[tracing::instrument(name = "Generating auth token", skip_all)]
fn generate_auth_token(
    worker_id: &WorkerId,
    org_id: &OrgId,
    role: StaffRole,
) -> Result<Secret<String>> {
    let delta = chrono::Duration::try_seconds(TOKEN_TTL_SECONDS)
        .wrap_err("Failed to create 10 minute time delta")?;

    // Create JWT expiration time
    let exp = Utc::now()
        .checked_add_signed(delta)
        .ok_or(eyre!("failed to add to current time"))?
        .timestamp();

    // Cast exp to a usize, which is what Claims expects
    let exp: usize = exp.try_into().wrap_err(format!(
        "failed to cast exp time to usize. exp time: {}",
        exp
    ))?;

    let claims = Claims {
        sub: worker_id.as_str().to_owned(),
        org: org_id.as_ref().to_string(),
        role: role.to_string(),
        exp,
    };

    create_token(&claims)
}

// Check if JWT auth token is valid by decoding it using the JWT secret
#[tracing::instrument(name = "Validating auth token", skip_all)]
pub fn validate_token(token: &Secret<String>) -> Result<Claims> {
    decode::<Claims>(
        token.expose_secret(),
        &DecodingKey::from_secret(JWT_SECRET.expose_secret().as_bytes()),
        &Validation::default(),
    )
    .map(|data| data.claims)
    .wrap_err("failed to decode token")
}

// Create JWT auth token by encoding claims using the JWT secret
#[tracing::instrument(name = "Creating auth token", skip_all)]
fn create_token(claims: &Claims) -> Result<Secret<String>> {
    let token_string = encode(
        &jsonwebtoken::Header::default(),
        &claims,
        &EncodingKey::from_secret(JWT_SECRET.expose_secret().as_bytes()),
    )
    .wrap_err("failed to create token")?;

    Ok(Secret::new(token_string))
}

#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String,
    pub org: String,
    pub role: String,
    pub exp: usize,
}

// The authenticated caller as seen by every handler.
#[derive(Debug, Clone, PartialEq)]
pub struct Caller {
    pub worker_id: WorkerId,
    pub org_id: OrgId,
    pub role: StaffRole,
}

impl Caller {
    pub fn is_admin(&self) -> bool {
        self.role == StaffRole::Admin
    }
}

impl TryFrom<Claims> for Caller {
    type Error = AuthAPIError;

    fn try_from(claims: Claims) -> Result<Self, Self::Error> {
        let worker_id = WorkerId::parse(&claims.sub)
            .map_err(|_| AuthAPIError::InvalidToken)?;
        let org_id = OrgId::parse(&claims.org)
            .map_err(|_| AuthAPIError::InvalidToken)?;
        let role = StaffRole::from_str(&claims.role)
            .map_err(|_| AuthAPIError::InvalidToken)?;
        Ok(Caller {
            worker_id,
            org_id,
            role,
        })
    }
}

#[tracing::instrument(name = "Resolving caller from cookie jar", skip_all)]
pub fn get_caller(jar: &CookieJar) -> Result<Caller, AuthAPIError> {
    let cookie = jar
        .get(JWT_COOKIE_NAME)
        .ok_or(AuthAPIError::MissingToken)?;
    let token = Secret::new(cookie.value().to_owned());
    let claims =
        validate_token(&token).map_err(|_| AuthAPIError::InvalidToken)?;
    Caller::try_from(claims)
}
