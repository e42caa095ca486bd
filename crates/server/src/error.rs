use axum::{
    Json,
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use database::error::StoreError;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use utoipa::ToSchema;

/// Every failure a handler can report; the message is what the client sees
#[derive(Debug, Error)]
pub enum ApiError {
    /// Missing or malformed input
    #[error("{0}")]
    Validation(String),

    #[error("{0}")]
    NotFound(String),

    /// Uniqueness conflict, or a delete blocked by dependent rows
    #[error("{0}")]
    Conflict(String),

    /// The write referenced a row that does not exist
    #[error("{0}")]
    InvalidReference(String),

    #[error("{0}")]
    Unexpected(String),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            Self::Validation(_) | Self::InvalidReference(_) => StatusCode::BAD_REQUEST,
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::Conflict(_) => StatusCode::CONFLICT,
            Self::Unexpected(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let body = ErrorBody {
            error: self.to_string(),
        };

        (status, Json(body)).into_response()
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        log::debug!("Rejected request body: {}", rejection.body_text());
        Self::Validation("Invalid request body".to_string())
    }
}

/// Body of every error response
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ErrorBody {
    pub error: String,
}

/// Body of a successful delete
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct MessageBody {
    pub message: String,
}

/// The kind of request a persistence failure happened in
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    Fetch,
    Create,
    Update,
    Delete,
}

/// Client-facing wording for one resource
#[derive(Debug, Clone, Copy)]
pub struct ResourceMessages {
    pub not_found: &'static str,
    pub id_required: &'static str,
    pub duplicate: &'static str,
    pub invalid_reference: &'static str,
    pub has_dependents: &'static str,
    pub fetch_failed: &'static str,
    pub create_failed: &'static str,
    pub update_failed: &'static str,
    pub delete_failed: &'static str,
}

impl ResourceMessages {
    pub fn not_found(&self) -> ApiError {
        ApiError::NotFound(self.not_found.to_string())
    }

    pub fn id_required(&self) -> ApiError {
        ApiError::Validation(self.id_required.to_string())
    }

    /// Maps a persistence failure onto the HTTP taxonomy
    pub fn store_error(&self, operation: Operation, err: StoreError) -> ApiError {
        match (operation, err) {
            (_, StoreError::NotFound) => self.not_found(),
            (_, StoreError::UniqueViolation(detail)) => {
                log::warn!("{}: {detail}", self.duplicate);
                ApiError::Conflict(self.duplicate.to_string())
            }
            (Operation::Delete, StoreError::ForeignKeyViolation(detail)) => {
                log::warn!("{}: {detail}", self.has_dependents);
                ApiError::Conflict(self.has_dependents.to_string())
            }
            (_, StoreError::ForeignKeyViolation(detail)) => {
                log::warn!("{}: {detail}", self.invalid_reference);
                ApiError::InvalidReference(self.invalid_reference.to_string())
            }
            (operation, StoreError::Db(err)) => {
                let message = self.failure(operation);
                log::error!("{message}: {err}");
                ApiError::Unexpected(message.to_string())
            }
        }
    }

    fn failure(&self, operation: Operation) -> &'static str {
        match operation {
            Operation::Fetch => self.fetch_failed,
            Operation::Create => self.create_failed,
            Operation::Update => self.update_failed,
            Operation::Delete => self.delete_failed,
        }
    }
}
