use std::num::IntErrorKind;

use axum::{
    body::Bytes,
    extract::{FromRequest, FromRequestParts, Path, Request},
    http::request::Parts,
    response::{IntoResponse, Response},
};
use catalog_core::validation::{parse_payload, FieldError, Payload};
use catalog_core::ProductId;

use crate::api::correlation_id;
use crate::error::ApiError;

const PRODUCT_ID_PARAM: &str = "product_id";

/// `{product_id}` path segment. Non-integer ids are a 422, not a 400; integers
/// too large for any record are a 404.
#[derive(Clone, Copy, Debug)]
pub struct ProductPath(pub ProductId);

impl<S> FromRequestParts<S> for ProductPath
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let invalid =
            || ApiError::unprocessable(vec![FieldError::invalid_path_integer(PRODUCT_ID_PARAM)]);

        let Path(raw) = Path::<String>::from_request_parts(parts, state)
            .await
            .map_err(|_| invalid())?;
        let raw = raw.trim();
        match raw.parse::<i64>() {
            Ok(id) => Ok(Self(ProductId(id))),
            // No stored record can carry an id outside i64.
            Err(error)
                if matches!(error.kind(), IntErrorKind::PosOverflow | IntErrorKind::NegOverflow) =>
            {
                Err(ApiError::unknown_product(raw, &correlation_id()))
            }
            Err(_) => Err(invalid()),
        }
    }
}

/// JSON body checked field-by-field before deserialisation.
///
/// The body is parsed whatever the request content type says.
pub struct PayloadJson<T>(pub T);

impl<T, S> FromRequest<S> for PayloadJson<T>
where
    T: Payload + 'static,
    S: Send + Sync,
{
    type Rejection = Response;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let body = Bytes::from_request(req, state).await.map_err(IntoResponse::into_response)?;

        parse_payload::<T>(&body)
            .map(PayloadJson)
            .map_err(|errors| ApiError::unprocessable(errors).into_response())
    }
}
