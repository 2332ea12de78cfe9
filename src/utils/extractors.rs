use axum::http::HeaderMap;

use crate::{
    error::{AppError, Result},
    models::UserRole,
    utils::jwt::{self, Claims},
};

pub fn extract_user_id(claims: &Claims) -> Result<i32> {
    claims
        .sub
        .parse::<i32>()
        .map_err(|_| AppError::Unauthorized("Unauthorized".to_string()))
}

pub fn claims_from_headers(headers: &HeaderMap) -> Result<Claims> {
    let auth_header = headers
        .get(http::header::AUTHORIZATION)
        .and_then(|header| header.to_str().ok())
        .ok_or_else(|| AppError::Unauthorized("Not authenticated".to_string()))?;

    let token = auth_header
        .strip_prefix("Bearer ")
        .ok_or_else(|| AppError::Unauthorized("Invalid token format".to_string()))?;

    jwt::verify_token(token)
}

/// Admin-only routes share paths with public ones, so the role check happens
/// in the handler rather than a router layer. Non-admin callers get a 401.
pub fn require_admin(headers: &HeaderMap) -> Result<Claims> {
    let claims = claims_from_headers(headers)?;

    if claims.role != UserRole::Admin {
        return Err(AppError::Unauthorized("Unauthorized".to_string()));
    }

    Ok(claims)
}
