use std::sync::Arc;

use axum::{extract::State, http::StatusCode, routing::get, Json, Router};
use catalog_core::CatalogSummary;
use catalog_db::ProductRepository;
use chrono::Utc;
use serde::Serialize;

#[derive(Clone)]
pub struct HealthState {
    products: Arc<dyn ProductRepository>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct HealthCheck {
    pub status: &'static str,
    pub detail: String,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct CatalogCheck {
    pub status: &'static str,
    pub detail: String,
    pub summary: Option<CatalogSummary>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub service: HealthCheck,
    pub catalog: CatalogCheck,
    pub checked_at: String,
}

pub fn router(products: Arc<dyn ProductRepository>) -> Router {
    Router::new().route("/health", get(health)).with_state(HealthState { products })
}

pub async fn health(State(state): State<HealthState>) -> (StatusCode, Json<HealthResponse>) {
    let catalog = catalog_check(state.products.as_ref()).await;
    let ready = catalog.status == "ready";

    let payload = HealthResponse {
        status: if ready { "ready" } else { "degraded" },
        service: HealthCheck {
            status: "ready",
            detail: "catalog-server runtime initialized".to_string(),
        },
        catalog,
        checked_at: Utc::now().to_rfc3339(),
    };

    let status_code = if ready { StatusCode::OK } else { StatusCode::SERVICE_UNAVAILABLE };
    (status_code, Json(payload))
}

async fn catalog_check(products: &dyn ProductRepository) -> CatalogCheck {
    match products.list().await {
        Ok(records) => CatalogCheck {
            status: "ready",
            detail: "catalog store readable".to_string(),
            summary: Some(CatalogSummary::from_products(&records)),
        },
        Err(error) => CatalogCheck {
            status: "degraded",
            detail: format!("catalog store read failed: {error}"),
            summary: None,
        },
    }
}
