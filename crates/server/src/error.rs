//! Unified error handling for the server.
//!
//! Every handler returns `Result<_, AppError>`; the `IntoResponse` impl maps
//! each error to a status code and a JSON body of the form
//! `{"message": "..."}`. Internal details never reach the client.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use thiserror::Error;

use crate::db::RepositoryError;
use crate::services::CheckoutError;

/// Application-level error type.
#[derive(Debug, Error)]
pub enum AppError {
    /// Database operation failed.
    #[error("Database error: {0}")]
    Database(#[from] RepositoryError),

    /// Checkout failed.
    #[error("{0}")]
    Checkout(#[from] CheckoutError),

    /// Resource not found.
    #[error("{0}")]
    NotFound(String),

    /// User is not authenticated.
    #[error("{0}")]
    Unauthorized(String),

    /// User lacks permission.
    #[error("{0}")]
    Forbidden(String),

    /// Bad request from client.
    #[error("{0}")]
    BadRequest(String),

    /// Internal server error.
    #[error("Internal error: {0}")]
    Internal(String),
}

impl AppError {
    fn status(&self) -> StatusCode {
        match self {
            Self::Database(e) => repository_status(e),
            Self::Checkout(e) => checkout_status(e),
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            Self::Forbidden(_) => StatusCode::FORBIDDEN,
            Self::BadRequest(_) => StatusCode::BAD_REQUEST,
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// The message sent to the client. Server-side failures are collapsed to
    /// a generic message.
    fn client_message(&self) -> String {
        match self {
            Self::Database(e) => match e {
                RepositoryError::NotFound => "Not found".to_string(),
                RepositoryError::Conflict(msg) => msg.clone(),
                RepositoryError::Database(_) | RepositoryError::DataCorruption(_) => {
                    "Internal server error".to_string()
                }
            },
            Self::Checkout(CheckoutError::Repository(_)) | Self::Internal(_) => {
                "Internal server error".to_string()
            }
            _ => self.to_string(),
        }
    }
}

fn repository_status(e: &RepositoryError) -> StatusCode {
    match e {
        RepositoryError::NotFound => StatusCode::NOT_FOUND,
        RepositoryError::Conflict(_) => StatusCode::CONFLICT,
        RepositoryError::Database(_) | RepositoryError::DataCorruption(_) => {
            StatusCode::INTERNAL_SERVER_ERROR
        }
    }
}

fn checkout_status(e: &CheckoutError) -> StatusCode {
    match e {
        CheckoutError::ProductUnavailable => StatusCode::NOT_FOUND,
        CheckoutError::InsufficientStock { .. } => StatusCode::UNPROCESSABLE_ENTITY,
        CheckoutError::EmptyCart
        | CheckoutError::InvalidQuantity
        | CheckoutError::InvalidEmail
        | CheckoutError::InvalidVoucherCode
        | CheckoutError::VoucherAlreadyUsed
        | CheckoutError::VoucherNotApplicable => StatusCode::BAD_REQUEST,
        CheckoutError::Repository(_) => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::error!(error = %self, "request error");
        }

        (status, Json(json!({ "message": self.client_message() }))).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn get_status(err: AppError) -> StatusCode {
        err.into_response().status()
    }

    #[test]
    fn test_checkout_error_status_codes() {
        assert_eq!(
            get_status(CheckoutError::ProductUnavailable.into()),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            get_status(
                CheckoutError::InsufficientStock {
                    name: "Bigas 5kg".to_string()
                }
                .into()
            ),
            StatusCode::UNPROCESSABLE_ENTITY
        );
        assert_eq!(
            get_status(CheckoutError::InvalidVoucherCode.into()),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            get_status(CheckoutError::VoucherAlreadyUsed.into()),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            get_status(CheckoutError::VoucherNotApplicable.into()),
            StatusCode::BAD_REQUEST
        );
    }

    #[test]
    fn test_repository_error_status_codes() {
        assert_eq!(
            get_status(RepositoryError::NotFound.into()),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            get_status(RepositoryError::Conflict("Slug already taken".to_string()).into()),
            StatusCode::CONFLICT
        );
        assert_eq!(
            get_status(RepositoryError::DataCorruption("bad status".to_string()).into()),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_internal_details_are_not_leaked() {
        let err = AppError::Database(RepositoryError::DataCorruption(
            "orders.status: bogus".to_string(),
        ));
        assert_eq!(err.client_message(), "Internal server error");

        let err = AppError::Internal("pool exhausted".to_string());
        assert_eq!(err.client_message(), "Internal server error");
    }

    #[test]
    fn test_conflict_message_reaches_client() {
        let err = AppError::Database(RepositoryError::Conflict("Slug already taken".to_string()));
        assert_eq!(err.client_message(), "Slug already taken");
    }
}
