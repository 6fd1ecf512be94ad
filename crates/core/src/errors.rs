use thiserror::Error;

use crate::{domain::product::ProductId, validation::FieldError};

pub const PRODUCT_NOT_FOUND_MESSAGE: &str = "产品不存在";

#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum DomainError {
    #[error("product {0} does not exist")]
    ProductNotFound(ProductId),
    #[error("payload validation failed ({} field error(s))", .0.len())]
    Validation(Vec<FieldError>),
}

#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum ApplicationError {
    #[error(transparent)]
    Domain(#[from] DomainError),
    #[error("persistence failure: {0}")]
    Persistence(String),
}

#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum InterfaceError {
    #[error("not found: {message}")]
    NotFound { message: String, correlation_id: String },
    #[error("unprocessable entity: {} field error(s)", errors.len())]
    Unprocessable { errors: Vec<FieldError>, correlation_id: String },
    #[error("internal error: {message}")]
    Internal { message: String, correlation_id: String },
}

impl InterfaceError {
    pub fn status_code(&self) -> u16 {
        match self {
            Self::NotFound { .. } => 404,
            Self::Unprocessable { .. } => 422,
            Self::Internal { .. } => 500,
        }
    }

    pub fn user_message(&self) -> &'static str {
        match self {
            Self::NotFound { .. } => PRODUCT_NOT_FOUND_MESSAGE,
            Self::Unprocessable { .. } => "Unprocessable Entity",
            Self::Internal { .. } => "Internal Server Error",
        }
    }
}

impl ApplicationError {
    pub fn into_interface(self, correlation_id: impl Into<String>) -> InterfaceError {
        let correlation_id = correlation_id.into();
        let mut mapped = InterfaceError::from(self);
        match &mut mapped {
            InterfaceError::NotFound { correlation_id: id, .. }
            | InterfaceError::Unprocessable { correlation_id: id, .. }
            | InterfaceError::Internal { correlation_id: id, .. } => *id = correlation_id,
        }
        mapped
    }
}

impl From<ApplicationError> for InterfaceError {
    fn from(value: ApplicationError) -> Self {
        match value {
            ApplicationError::Domain(DomainError::ProductNotFound(id)) => Self::NotFound {
                message: format!("product {id} does not exist"),
                correlation_id: "unassigned".to_owned(),
            },
            ApplicationError::Domain(DomainError::Validation(errors)) => {
                Self::Unprocessable { errors, correlation_id: "unassigned".to_owned() }
            }
            ApplicationError::Persistence(message) => {
                Self::Internal { message, correlation_id: "unassigned".to_owned() }
            }
        }
    }
}

impl From<DomainError> for InterfaceError {
    fn from(value: DomainError) -> Self {
        ApplicationError::from(value).into()
    }
}
