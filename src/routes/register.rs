use axum::{extract::State, Json};

use crate::{
    error::{AppError, Result},
    models::{AuthResponse, RegisterRequest},
    queries::user_queries,
    utils::jwt,
    AppState,
};

pub async fn register_user(
    State(state): State<AppState>,
    Json(payload): Json<RegisterRequest>,
) -> Result<Json<AuthResponse>> {
    validate_registration(&payload)?;

    if user_queries::find_by_email(&state.db, &payload.email)
        .await?
        .is_some()
    {
        return Err(AppError::Conflict("Email already registered".to_string()));
    }

    let password_hash = bcrypt::hash(&payload.password, bcrypt::DEFAULT_COST)
        .map_err(|e| AppError::InternalError(format!("Password hashing failed: {}", e)))?;

    let user = user_queries::create_user(&state.db, &payload, &password_hash).await?;

    let token = jwt::generate_token(user.id, &user.email, user.role)?;

    Ok(Json(AuthResponse { token }))
}

fn validate_registration(payload: &RegisterRequest) -> Result<()> {
    if payload.email.is_empty() || !payload.email.contains('@') {
        return Err(AppError::BadRequest("Invalid email address".to_string()));
    }

    if payload.name.trim().is_empty() {
        return Err(AppError::BadRequest("Name cannot be empty".to_string()));
    }

    if payload.password.len() < 8 {
        return Err(AppError::BadRequest(
            "Password must be at least 8 characters".to_string(),
        ));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(name: &str, email: &str, password: &str) -> RegisterRequest {
        RegisterRequest {
            name: name.to_string(),
            email: email.to_string(),
            password: password.to_string(),
            address: None,
            phone_number: None,
        }
    }

    #[test]
    fn test_valid_registration() {
        assert!(validate_registration(&request("Ana", "ana@example.com", "longenough")).is_ok());
    }

    #[test]
    fn test_rejects_bad_email() {
        assert!(validate_registration(&request("Ana", "not-an-email", "longenough")).is_err());
        assert!(validate_registration(&request("Ana", "", "longenough")).is_err());
    }

    #[test]
    fn test_rejects_blank_name() {
        assert!(validate_registration(&request("   ", "ana@example.com", "longenough")).is_err());
    }

    #[test]
    fn test_rejects_short_password() {
        assert!(validate_registration(&request("Ana", "ana@example.com", "short")).is_err());
    }
}
