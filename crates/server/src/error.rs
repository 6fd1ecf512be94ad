use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use catalog_core::errors::{ApplicationError, DomainError, InterfaceError};
use catalog_core::validation::FieldError;
use catalog_core::ProductId;
use catalog_db::RepositoryError;
use serde::Serialize;
use tracing::{error, warn};

/// FastAPI-style error envelope.
#[derive(Debug, Serialize)]
pub struct DetailResponse<D> {
    pub detail: D,
}

#[derive(Debug)]
pub struct ApiError(pub InterfaceError);

impl ApiError {
    pub fn not_found(id: ProductId, correlation_id: &str) -> Self {
        warn!(
            event_name = "catalog.product.not_found",
            correlation_id = %correlation_id,
            product_id = id.0,
            "product lookup missed"
        );
        Self(
            ApplicationError::from(DomainError::ProductNotFound(id))
                .into_interface(correlation_id),
        )
    }

    pub fn unknown_product(raw_id: &str, correlation_id: &str) -> Self {
        warn!(
            event_name = "catalog.product.not_found",
            correlation_id = %correlation_id,
            product_id = %raw_id,
            "product id outside the storable range"
        );
        Self(InterfaceError::NotFound {
            message: format!("product {raw_id} does not exist"),
            correlation_id: correlation_id.to_string(),
        })
    }

    pub fn unprocessable(errors: Vec<FieldError>) -> Self {
        Self(DomainError::Validation(errors).into())
    }

    pub fn persistence(source: RepositoryError, correlation_id: &str) -> Self {
        error!(
            event_name = "catalog.store.error",
            correlation_id = %correlation_id,
            error = %source,
            "catalog store operation failed"
        );
        Self(ApplicationError::Persistence(source.to_string()).into_interface(correlation_id))
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = StatusCode::from_u16(self.0.status_code())
            .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);

        match self.0 {
            InterfaceError::Unprocessable { errors, .. } => {
                (status, Json(DetailResponse { detail: errors })).into_response()
            }
            other => {
                (status, Json(DetailResponse { detail: other.user_message() })).into_response()
            }
        }
    }
}
