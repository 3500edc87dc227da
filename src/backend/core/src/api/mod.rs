//! HTTP API for job offers.
//!
//! | Route                                  | Handler                         |
//! |----------------------------------------|---------------------------------|
//! | `GET    /api/job-offers`               | filtered, paged search          |
//! | `GET    /api/job-offers/company/{p}`   | company prefix search           |
//! | `GET    /api/job-offers/{id}`          | single offer with `ETag`        |
//! | `POST   /api/job-offers`               | create, `201` with `Location`   |
//! | `PUT    /api/job-offers/{id}`          | update guarded by `If-Match`    |
//! | `DELETE /api/job-offers/{id}`          | delete, always `204`            |
//! | `GET    /health`, `GET /metrics`       | liveness and Prometheus text    |

pub mod dto;
mod handlers;

use axum::{http::header, routing::get, Router};
use std::sync::Arc;
use std::time::Duration;
use tower_http::{
    cors::{Any, CorsLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};

use crate::config::PaginationConfig;
use crate::notify::Notifier;
use crate::service::{JobOfferReadService, JobOfferWriteService};
use crate::store::JobOfferStore;
use crate::telemetry::MetricsRegistry;

/// Path of the job offer collection.
pub const API_PATH: &str = "/api/job-offers";

/// Application state shared across handlers.
#[derive(Clone)]
pub struct AppState {
    pub read: JobOfferReadService,
    pub write: JobOfferWriteService,
    pub metrics: MetricsRegistry,
    pub pagination: PaginationConfig,
}

impl AppState {
    pub fn new(
        store: Arc<dyn JobOfferStore>,
        notifier: Arc<dyn Notifier>,
        metrics: MetricsRegistry,
        pagination: PaginationConfig,
    ) -> Self {
        Self {
            read: JobOfferReadService::new(store.clone()),
            write: JobOfferWriteService::new(store, notifier),
            metrics,
            pagination,
        }
    }
}

/// Build the API router.
///
/// Requests running longer than `request_timeout` are answered with
/// `408 Request Timeout`.
pub fn build_router(state: AppState, request_timeout: Duration) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any)
        .expose_headers([header::ETAG, header::LOCATION]);

    Router::new()
        .route("/health", get(handlers::health_check))
        .route("/metrics", get(handlers::prometheus_metrics))
        .route(API_PATH, get(handlers::find_all).post(handlers::create))
        .route(
            &format!("{}/company/:prefix", API_PATH),
            get(handlers::find_by_company),
        )
        .route(
            &format!("{}/:id", API_PATH),
            get(handlers::find_by_id)
                .put(handlers::update)
                .delete(handlers::delete_by_id),
        )
        .layer(TimeoutLayer::new(request_timeout))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}
