use axum::{http::StatusCode, response::{IntoResponse, Response}, Json};
use serde::Serialize;
use serde_json::json;

use crate::validate;

pub type AppResult<T> = Result<T, AppError>;

/// Every way a request can end early. The `Display` text is what the client sees.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Only POST requests are allowed")]
    MethodNotAllowed,
    #[error("Action parameter is required")]
    MissingAction,
    #[error("Invalid action")]
    InvalidAction,
    #[error("All fields are required")]
    MissingFields,
    #[error("Invalid email address")]
    InvalidEmail,
    #[error("Number of participants must be greater than 0")]
    InvalidParticipants,
    #[error("This time slot is already booked. Please choose another time.")]
    SlotTaken,

    #[error("Database connection failed")]
    Connection(#[source] sqlx::Error),
    #[error("Failed to book tour")]
    Booking(#[source] sqlx::Error),
    #[error("Failed to send message")]
    Contact(#[source] sqlx::Error),
}

impl AppError {
    pub fn status(&self) -> StatusCode {
        use AppError::*;
        match self {
            MethodNotAllowed => StatusCode::METHOD_NOT_ALLOWED,
            MissingAction | InvalidAction | MissingFields | InvalidEmail | InvalidParticipants
            | SlotTaken => StatusCode::BAD_REQUEST,
            Connection(_) | Booking(_) | Contact(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn storage_cause(&self) -> Option<&sqlx::Error> {
        match self {
            AppError::Connection(e) | AppError::Booking(e) | AppError::Contact(e) => Some(e),
            _ => None,
        }
    }
}

impl From<validate::Error> for AppError {
    fn from(err: validate::Error) -> Self {
        match err {
            validate::Error::MissingField(field) => {
                tracing::debug!(%field, "required field missing");
                AppError::MissingFields
            }
            validate::Error::InvalidEmail => AppError::InvalidEmail,
            validate::Error::NotPositive => AppError::InvalidParticipants,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        match self.storage_cause() {
            // the cause stays in the log, the client only gets the generic message
            Some(cause) => tracing::error!(error = %cause, "{}", self),
            None => tracing::debug!(%status, "rejected: {}", self),
        }

        (
            status,
            Json(json!({
                "success": false,
                "message": self.to_string(),
            })),
        )
            .into_response()
    }
}

/// Id of the row a successful action created, rendered next to `success` and `message`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Created {
    BookingId(i64),
    ContactId(i64),
}

#[derive(Debug, Serialize)]
pub struct ApiResponse {
    pub success: bool,
    pub message: &'static str,
    #[serde(flatten)]
    pub created: Option<Created>,
}

impl ApiResponse {
    pub fn created(message: &'static str, created: Created) -> Self {
        Self {
            success: true,
            message,
            created: Some(created),
        }
    }
}

impl IntoResponse for ApiResponse {
    fn into_response(self) -> Response {
        (StatusCode::OK, Json(self)).into_response()
    }
}
