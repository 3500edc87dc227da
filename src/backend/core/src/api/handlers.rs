//! API request handlers.
//!
//! All handlers return `Result<_, JobConnectError>` so that errors are
//! converted to HTTP status codes by the `IntoResponse` implementation on
//! `JobConnectError`.

use axum::{
    extract::{Path, Query, State},
    http::{header, HeaderMap, HeaderName, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use chrono::NaiveDate;
use serde::Deserialize;
use tracing::{debug, trace};

use super::dto::{JobOfferDto, JobOfferModel};
use super::{AppState, API_PATH};
use crate::domain::JobOfferId;
use crate::error::{ErrorCode, JobConnectError};
use crate::pagination::{Page, PageRequest};
use crate::query::SearchParams;
use crate::version;

const X_FORWARDED_PROTO: HeaderName = HeaderName::from_static("x-forwarded-proto");
const X_FORWARDED_HOST: HeaderName = HeaderName::from_static("x-forwarded-host");
const X_FORWARDED_PREFIX: HeaderName = HeaderName::from_static("x-forwarded-prefix");

// ═══════════════════════════════════════════════════════════════════════════════
// Health & Metrics
// ═══════════════════════════════════════════════════════════════════════════════

pub async fn health_check() -> impl IntoResponse {
    Json(serde_json::json!({
        "status": "healthy",
        "version": env!("CARGO_PKG_VERSION"),
        "timestamp": chrono::Utc::now().to_rfc3339()
    }))
}

pub async fn prometheus_metrics(State(state): State<AppState>) -> impl IntoResponse {
    (
        [(header::CONTENT_TYPE, "text/plain; version=0.0.4; charset=utf-8")],
        state.metrics.render(),
    )
}

// ═══════════════════════════════════════════════════════════════════════════════
// Queries
// ═══════════════════════════════════════════════════════════════════════════════

#[derive(Debug, Default, Deserialize)]
pub struct PagingQuery {
    pub page: Option<u64>,
    pub size: Option<u64>,
}

#[derive(Debug, Default, Deserialize)]
pub struct ApplicationsQuery {
    #[serde(default)]
    pub applications: bool,
}

/// `GET /api/job-offers?...`
///
/// `page` and `size` select the page; every other parameter is a filter.
pub async fn find_all(
    State(state): State<AppState>,
    Query(pairs): Query<Vec<(String, String)>>,
) -> Result<Json<Page<JobOfferModel>>, JobConnectError> {
    debug!(?pairs, "find_all");

    let mut params = SearchParams::from_pairs(pairs);
    let paging = PagingQuery {
        page: take_number(&mut params, "page")?,
        size: take_number(&mut params, "size")?,
    };
    let page = page_request(&state, &paging);
    trace!(?params, ?page, "find_all");

    let offers = state.read.find_all(&params, &page).await?;
    Ok(Json(offers.map(|offer| JobOfferModel::from_offer(offer, false))))
}

/// `GET /api/job-offers/company/{prefix}`
pub async fn find_by_company(
    State(state): State<AppState>,
    Path(prefix): Path<String>,
    Query(paging): Query<PagingQuery>,
) -> Result<Json<Page<JobOfferModel>>, JobConnectError> {
    debug!(%prefix, "find_by_company");

    let page = page_request(&state, &paging);
    let offers = state.read.find_by_company(&prefix, &page).await?;
    Ok(Json(offers.map(|offer| JobOfferModel::from_offer(offer, false))))
}

/// `GET /api/job-offers/{id}`
///
/// Answers `304 Not Modified` without a body when `If-None-Match` already
/// names the current version.
pub async fn find_by_id(
    State(state): State<AppState>,
    Path(id): Path<JobOfferId>,
    Query(query): Query<ApplicationsQuery>,
    headers: HeaderMap,
) -> Result<Response, JobConnectError> {
    let if_none_match = headers
        .get(header::IF_NONE_MATCH)
        .and_then(|value| value.to_str().ok());
    debug!(%id, applications = query.applications, ?if_none_match, "find_by_id");

    let offer = state.read.find_by_id(id, query.applications).await?;
    if version::matches_if_none_match(offer.version, if_none_match) {
        trace!(version = offer.version, "not modified");
        return Ok(StatusCode::NOT_MODIFIED.into_response());
    }

    let etag = version::encode(offer.version);
    let body = JobOfferModel::from_offer(offer, query.applications);
    Ok(([(header::ETAG, etag)], Json(body)).into_response())
}

// ═══════════════════════════════════════════════════════════════════════════════
// Commands
// ═══════════════════════════════════════════════════════════════════════════════

/// `POST /api/job-offers`
pub async fn create(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(dto): Json<JobOfferDto>,
) -> Result<Response, JobConnectError> {
    debug!(?dto, "create");

    let offer = dto.into_job_offer(today())?;
    let created = state.write.create(offer).await?;

    let location = format!("{}/{}", base_uri(&headers), created.id);
    Ok((StatusCode::CREATED, [(header::LOCATION, location)]).into_response())
}

/// `PUT /api/job-offers/{id}`
///
/// Requires `If-Match` with the version last read; answers with the new
/// version in `ETag`.
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<JobOfferId>,
    headers: HeaderMap,
    Json(dto): Json<JobOfferDto>,
) -> Result<Response, JobConnectError> {
    let if_match = headers
        .get(header::IF_MATCH)
        .map(|value| value.to_str().unwrap_or_default());
    debug!(%id, ?if_match, "update");

    let changes = dto.into_changes(today())?;
    let expected = version::decode(if_match)?;
    trace!(expected, "update");

    let updated = state.write.update(&changes, id, expected).await?;
    Ok((
        StatusCode::NO_CONTENT,
        [(header::ETAG, version::encode(updated.version))],
    )
        .into_response())
}

/// `DELETE /api/job-offers/{id}`
pub async fn delete_by_id(
    State(state): State<AppState>,
    Path(id): Path<JobOfferId>,
) -> Result<StatusCode, JobConnectError> {
    debug!(%id, "delete_by_id");

    state.write.delete_by_id(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

// ═══════════════════════════════════════════════════════════════════════════════
// Helpers
// ═══════════════════════════════════════════════════════════════════════════════

fn today() -> NaiveDate {
    chrono::Utc::now().date_naive()
}

fn page_request(state: &AppState, paging: &PagingQuery) -> PageRequest {
    PageRequest::new(
        paging.page.unwrap_or(0),
        paging.size.unwrap_or(state.pagination.default_size),
    )
    .with_max_size(state.pagination.max_size)
}

/// Remove a paging parameter from the filters and parse its last value.
fn take_number(params: &mut SearchParams, name: &str) -> Result<Option<u64>, JobConnectError> {
    let Some(values) = params.remove(name) else {
        return Ok(None);
    };
    let Some(raw) = values.last() else {
        return Ok(None);
    };

    raw.parse::<u64>().map(Some).map_err(|e| {
        JobConnectError::new(
            ErrorCode::InvalidInput,
            format!("Query parameter {} must be a non-negative integer", name),
        )
        .with_context(name, raw)
        .with_source(e)
    })
}

/// Collection URI for the `Location` header.
///
/// Behind a gateway the `X-Forwarded-*` headers describe the public address;
/// otherwise the `Host` header is used.
fn base_uri(headers: &HeaderMap) -> String {
    let get = |name: &HeaderName| headers.get(name).and_then(|value| value.to_str().ok());

    match get(&X_FORWARDED_HOST) {
        Some(host) => {
            let proto = get(&X_FORWARDED_PROTO).unwrap_or("http");
            let prefix = get(&X_FORWARDED_PREFIX).unwrap_or_default();
            format!("{}://{}{}{}", proto, host, prefix, API_PATH)
        }
        None => {
            let host = get(&header::HOST).unwrap_or("localhost");
            format!("http://{}{}", host, API_PATH)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    #[test]
    fn test_base_uri_from_host() {
        let mut headers = HeaderMap::new();
        headers.insert(header::HOST, HeaderValue::from_static("localhost:8080"));

        assert_eq!(base_uri(&headers), "http://localhost:8080/api/job-offers");
    }

    #[test]
    fn test_base_uri_behind_gateway() {
        let mut headers = HeaderMap::new();
        headers.insert(header::HOST, HeaderValue::from_static("internal:8080"));
        headers.insert(X_FORWARDED_PROTO, HeaderValue::from_static("https"));
        headers.insert(X_FORWARDED_HOST, HeaderValue::from_static("jobs.example.com"));
        headers.insert(X_FORWARDED_PREFIX, HeaderValue::from_static("/jobconnect"));

        assert_eq!(
            base_uri(&headers),
            "https://jobs.example.com/jobconnect/api/job-offers"
        );
    }

    #[test]
    fn test_take_number() {
        let mut params = SearchParams::from_pairs([("page", "2"), ("company", "Acme")]);
        assert_eq!(take_number(&mut params, "page").unwrap(), Some(2));
        assert_eq!(take_number(&mut params, "size").unwrap(), None);
        assert!(params.get("page").is_none());
        assert_eq!(params.len(), 1);

        let mut params = SearchParams::from_pairs([("size", "-1")]);
        let err = take_number(&mut params, "size").unwrap_err();
        assert_eq!(err.code(), ErrorCode::InvalidInput);
    }
}
