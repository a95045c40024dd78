mod categories;
mod questions;
mod quizzes;

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;

pub use categories::category_router;
pub use questions::questions_router;
pub use quizzes::quizzes_router;

pub type ApiResponse<T> = Result<T, ApiError>;

#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("resource not found")]
    NotFound,
    #[error("unprocessable request: {0}")]
    Unprocessable(String),
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
}

impl ApiError {
    /// Collapses a failed insert or delete into 422, keeping 404 for missing rows.
    pub fn from_mutation(error: sqlx::Error) -> Self {
        match error {
            sqlx::Error::RowNotFound => ApiError::NotFound,
            error => ApiError::Unprocessable(error.to_string()),
        }
    }

    fn status(&self) -> StatusCode {
        match self {
            ApiError::NotFound | ApiError::Database(sqlx::Error::RowNotFound) => {
                StatusCode::NOT_FOUND
            }
            ApiError::Unprocessable(_) => StatusCode::UNPROCESSABLE_ENTITY,
            ApiError::Database(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

pub fn error_body(status: StatusCode) -> Json<serde_json::Value> {
    let message = match status {
        StatusCode::NOT_FOUND => "The requested resource could not be found",
        StatusCode::UNPROCESSABLE_ENTITY => {
            "The request was well-formed but was unable to be followed due to semantic errors"
        }
        _ => "The server encountered an internal error",
    };
    Json(json!({
        "success": false,
        "error": status.as_u16(),
        "message": message,
    }))
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        match &self {
            ApiError::Database(sqlx::Error::RowNotFound) | ApiError::NotFound => {}
            ApiError::Unprocessable(reason) => tracing::warn!("Rejected request: {reason}"),
            ApiError::Database(error) => tracing::error!("Database failure: {error:#?}"),
        }
        (status, error_body(status)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn row_not_found_is_404_everywhere() {
        assert_eq!(
            ApiError::from(sqlx::Error::RowNotFound).status(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            ApiError::from_mutation(sqlx::Error::RowNotFound).status(),
            StatusCode::NOT_FOUND
        );
    }

    #[test]
    fn failed_mutations_are_422() {
        let error = ApiError::from_mutation(sqlx::Error::PoolTimedOut);
        assert_eq!(error.status(), StatusCode::UNPROCESSABLE_ENTITY);
    }

    #[test]
    fn failed_reads_are_500() {
        let error = ApiError::from(sqlx::Error::PoolTimedOut);
        assert_eq!(error.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn body_carries_code_and_success_flag() {
        let Json(body) = error_body(StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(body["success"], false);
        assert_eq!(body["error"], 422);
    }
}
