//! Welcome guide route handlers.

use std::time::Instant;

use axum::extract::{Path, State};
use axum::routing::get;
use axum::{Extension, Json, Router};
use rusqlite::Connection;
use seedbed_core::content_types::WELCOME_GUIDE;
use seedbed_core::errors::Result;
use seedbed_core::{log_op_end, log_op_error, log_op_start};
use seedbed_core_types::RequestContext;
use seedbed_store::SqliteCms;
use serde_json::Value;

use crate::error::ApiError;
use crate::response::{populated_entry_json, transform_response};
use crate::state::AppState;

const OP: &str = "find_welcome_guide_by_slug";
const POPULATE: [&str; 2] = ["sections", "resources"];

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/api/welcome-guides/by-slug/:slug", get(find_by_slug))
        .route("/api/welcome-guides/by-slug", get(missing_slug))
        .route("/api/welcome-guides/by-slug/", get(missing_slug))
}

/// GET /api/welcome-guides/by-slug/:slug
pub async fn find_by_slug(
    State(state): State<AppState>,
    context: Option<Extension<RequestContext>>,
    Path(slug): Path<String>,
) -> std::result::Result<Json<Value>, ApiError> {
    let context = context.map(|Extension(c)| c).unwrap_or_default();
    if slug.trim().is_empty() {
        return Err(ApiError::bad_request("Slug is required").with_context(&context));
    }

    log_op_start!(OP, slug = %slug, request_id = %context.request_id);
    let start = Instant::now();

    let found = state
        .conn()
        .and_then(|conn| lookup(&conn, &slug))
        .map_err(|e| {
            let e = e.with_request_context(&context);
            log_op_error!(
                OP,
                e.clone(),
                duration_ms = start.elapsed().as_millis() as u64,
                request_id = %context.request_id
            );
            ApiError::from(e)
        })?;

    log_op_end!(
        OP,
        duration_ms = start.elapsed().as_millis() as u64,
        found = found.is_some()
    );

    match found {
        Some(entry) => Ok(transform_response(entry)),
        None => Err(ApiError::not_found("Welcome Guide not found").with_context(&context)),
    }
}

/// GET /api/welcome-guides/by-slug (no slug segment)
pub async fn missing_slug(context: Option<Extension<RequestContext>>) -> ApiError {
    let context = context.map(|Extension(c)| c).unwrap_or_default();
    ApiError::bad_request("Slug is required").with_context(&context)
}

fn lookup(conn: &Connection, slug: &str) -> Result<Option<Value>> {
    let cms = SqliteCms::new(conn);
    let Some(guide) = cms.find_one_by_slug(WELCOME_GUIDE, slug)? else {
        return Ok(None);
    };
    let mut relations = Vec::with_capacity(POPULATE.len());
    for attribute in POPULATE {
        relations.push((attribute, cms.related(&guide, attribute)?));
    }
    Ok(Some(populated_entry_json(&guide, &relations)))
}
