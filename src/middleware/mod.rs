use axum::{extract::Request, middleware::Next, response::Response};

use crate::{error::AppError, utils::extractors::claims_from_headers};

pub async fn auth_middleware(mut req: Request, next: Next) -> Result<Response, AppError> {
    let claims = claims_from_headers(req.headers())?;

    req.extensions_mut().insert(claims);

    Ok(next.run(req).await)
}
