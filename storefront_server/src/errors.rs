use actix_web::{
    error::ResponseError,
    http::{header::ContentType, StatusCode},
    HttpResponse,
};
use log::error;
use storefront_engine::{AuthApiError, CatalogApiError, ShoppingApiError};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ServerError {
    #[error("Could not initialize server. {0}")]
    InitializeError(String),
    #[error("An error occurred on the backend of the server. {0}")]
    BackendError(String),
    #[error("Could not read request body: {0}")]
    InvalidRequestBody(String),
    #[error("Could not read request path: {0}")]
    InvalidRequestPath(String),
    #[error("{0}")]
    ValidationError(String),
    #[error("An I/O error happened in the server. {0}")]
    IOError(#[from] std::io::Error),
    #[error("Invalid server configuration. {0}")]
    ConfigurationError(String),
    #[error("UnspecifiedError. {0}")]
    Unspecified(String),
    #[error("{0}")]
    AuthenticationError(#[from] AuthError),
    #[error("The data was not found. {0}")]
    NoRecordFound(String),
    #[error("{0}")]
    Conflict(String),
}

impl ResponseError for ServerError {
    fn status_code(&self) -> StatusCode {
        match self {
            Self::InvalidRequestBody(_) => StatusCode::BAD_REQUEST,
            Self::InvalidRequestPath(_) => StatusCode::BAD_REQUEST,
            Self::ValidationError(_) => StatusCode::BAD_REQUEST,
            Self::AuthenticationError(e) => match e {
                AuthError::MissingToken => StatusCode::UNAUTHORIZED,
                AuthError::InvalidToken => StatusCode::UNAUTHORIZED,
                AuthError::InvalidCredentials => StatusCode::UNAUTHORIZED,
                AuthError::SigningError(_) => StatusCode::INTERNAL_SERVER_ERROR,
            },
            Self::NoRecordFound(_) => StatusCode::NOT_FOUND,
            Self::Conflict(_) => StatusCode::CONFLICT,
            Self::InitializeError(_) => StatusCode::INTERNAL_SERVER_ERROR,
            Self::BackendError(_) => StatusCode::INTERNAL_SERVER_ERROR,
            Self::IOError(_) => StatusCode::INTERNAL_SERVER_ERROR,
            Self::ConfigurationError(_) => StatusCode::INTERNAL_SERVER_ERROR,
            Self::Unspecified(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status_code())
            .insert_header(ContentType::json())
            .body(serde_json::json!({ "error": self.to_string() }).to_string())
    }
}

/// Authentication failures. Messages are deliberately generic: a caller learns that it was refused, not which check
/// failed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AuthError {
    #[error("Authorization header is required")]
    MissingToken,
    #[error("Invalid or expired token")]
    InvalidToken,
    #[error("Invalid email or password")]
    InvalidCredentials,
    #[error("Could not sign access token. {0}")]
    SigningError(String),
}

impl From<AuthApiError> for ServerError {
    fn from(e: AuthApiError) -> Self {
        match e {
            AuthApiError::ValidationError(s) => Self::ValidationError(s),
            AuthApiError::AuthenticationFailed => Self::AuthenticationError(AuthError::InvalidCredentials),
            AuthApiError::DuplicateAccount => Self::Conflict(e.to_string()),
            AuthApiError::HashingError(s) => {
                error!("🔑️ Password hashing failed. {s}");
                Self::BackendError("Could not process the password".to_string())
            },
            AuthApiError::DatabaseError(s) => Self::BackendError(format!("Database error: {s}")),
        }
    }
}

impl From<CatalogApiError> for ServerError {
    fn from(e: CatalogApiError) -> Self {
        match e {
            CatalogApiError::ValidationError(s) => Self::ValidationError(s),
            CatalogApiError::ProductNotFound(_) => Self::NoRecordFound(e.to_string()),
            CatalogApiError::DuplicateProduct => Self::Conflict(e.to_string()),
            CatalogApiError::ProductInUse(_) => Self::Conflict(e.to_string()),
            CatalogApiError::DatabaseError(s) => Self::BackendError(format!("Database error: {s}")),
        }
    }
}

impl From<ShoppingApiError> for ServerError {
    fn from(e: ShoppingApiError) -> Self {
        match e {
            ShoppingApiError::ValidationError(s) => Self::ValidationError(s),
            ShoppingApiError::DuplicateRecord => Self::Conflict(e.to_string()),
            ShoppingApiError::UnknownReference => Self::ValidationError(e.to_string()),
            ShoppingApiError::RecordNotFound(_) => Self::NoRecordFound(e.to_string()),
            ShoppingApiError::DatabaseError(s) => Self::BackendError(format!("Database error: {s}")),
        }
    }
}
