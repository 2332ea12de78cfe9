use serde::Serialize;

/// Standard success envelope: `{"success": true, "data": ...}`.
/// Errors are shaped by `AppError::into_response`.
#[derive(Debug, Serialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    pub data: T,
}

impl<T> ApiResponse<T> {
    pub fn new(data: T) -> Self {
        Self {
            success: true,
            data,
        }
    }
}
