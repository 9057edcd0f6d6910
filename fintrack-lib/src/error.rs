use actix_web::body::BoxBody;
use actix_web::http::StatusCode;
use actix_web::{HttpResponse, ResponseError};
use fintrack_repo::category_repo::CategoryRepoError;
use fintrack_repo::transaction_repo::TransactionRepoError;
use fintrack_repo::user_repo::UserRepoError;
use serde::Serialize;
use std::collections::BTreeMap;
use thiserror::Error;
use tracing::error;

/// Field-keyed validation messages, serialized as
/// `{"field": ["message", ...]}`.
#[derive(Serialize, Clone, PartialEq, Eq, Debug, Default)]
pub struct ValidationErrors {
    #[serde(flatten)]
    errors: BTreeMap<&'static str, Vec<String>>,
}

impl ValidationErrors {
    pub fn new() -> ValidationErrors {
        ValidationErrors::default()
    }

    pub fn add(&mut self, field: &'static str, message: impl Into<String>) {
        self.errors.entry(field).or_default().push(message.into());
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn into_result(self) -> Result<(), HandlerError> {
        if self.is_empty() {
            Ok(())
        } else {
            Err(HandlerError::Validation(self))
        }
    }
}

#[derive(Error, Debug)]
pub enum HandlerError {
    #[error("Invalid data provided")]
    Validation(ValidationErrors),
    #[error("The provided credentials are incorrect.")]
    InvalidCredentials,
    #[error("This action is unauthorized.")]
    Forbidden,
    #[error("{0} not found")]
    NotFound(&'static str),
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl ResponseError for HandlerError {
    fn status_code(&self) -> StatusCode {
        match self {
            HandlerError::Validation(_) => StatusCode::UNPROCESSABLE_ENTITY,
            HandlerError::InvalidCredentials => StatusCode::UNAUTHORIZED,
            HandlerError::Forbidden => StatusCode::FORBIDDEN,
            HandlerError::NotFound(_) => StatusCode::NOT_FOUND,
            HandlerError::Other(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse<BoxBody> {
        match self {
            HandlerError::Validation(errors) => {
                HttpResponse::UnprocessableEntity().json(serde_json::json!({ "error": errors }))
            }
            HandlerError::Other(e) => {
                error!(error = %e, "request failed");
                HttpResponse::InternalServerError()
                    .json(serde_json::json!({ "error": "Internal server error" }))
            }
            _ => HttpResponse::build(self.status_code())
                .json(serde_json::json!({ "error": self.to_string() })),
        }
    }
}

impl From<UserRepoError> for HandlerError {
    fn from(e: UserRepoError) -> Self {
        match e {
            UserRepoError::UserNotFound(_) | UserRepoError::UserEmailNotFound(_) => {
                HandlerError::NotFound("User")
            }
            UserRepoError::EmailTaken(_) => {
                let mut errors = ValidationErrors::new();
                errors.add("email", "The email has already been taken.");
                HandlerError::Validation(errors)
            }
            UserRepoError::Other(e) => HandlerError::Other(e),
        }
    }
}

impl From<CategoryRepoError> for HandlerError {
    fn from(e: CategoryRepoError) -> Self {
        match e {
            CategoryRepoError::CategoryNotFound(_) => HandlerError::NotFound("Category"),
            CategoryRepoError::CategoryNameTaken(_) => {
                let mut errors = ValidationErrors::new();
                errors.add("name", "The name has already been taken.");
                HandlerError::Validation(errors)
            }
            CategoryRepoError::Other(e) => HandlerError::Other(e),
        }
    }
}

impl From<TransactionRepoError> for HandlerError {
    fn from(e: TransactionRepoError) -> Self {
        match e {
            TransactionRepoError::TransactionNotFound(_) => HandlerError::NotFound("Transaction"),
            TransactionRepoError::Other(e) => HandlerError::Other(e),
        }
    }
}
