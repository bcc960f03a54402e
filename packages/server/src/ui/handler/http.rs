//! HTTP API endpoint handlers.
//!
//! Every route answers 403 with an empty body unless the request carries a
//! valid token. `/staffs` additionally answers 405 to anything but `GET`,
//! before looking at the token.

use std::sync::Arc;

use axum::{
    body::Body,
    extract::{RawQuery, State},
    http::{HeaderValue, Method, StatusCode, header},
    response::{IntoResponse, Response},
};
use serde::Serialize;

use crate::{
    infrastructure::dto::{
        conversion::{messages_to_document, playtime_to_document},
        http::StaffStatsDto,
    },
    ui::{auth::Credentials, state::AppState},
};

const JSON_CONTENT_TYPE: &str = "application/json; charset=utf-8";

/// Stats for every staff member in the roster
pub async fn list_staffs(
    State(state): State<Arc<AppState>>,
    method: Method,
    RawQuery(query): RawQuery,
) -> Response {
    if method != Method::GET {
        return StatusCode::METHOD_NOT_ALLOWED.into_response();
    }
    if let Err(rejection) = authorize(&state, query.as_deref()) {
        return rejection;
    }

    let stats = state.get_staff_stats_usecase.execute().await;

    // Domain Model から DTO への変換
    let body: Vec<StaffStatsDto> = stats.into_iter().map(StaffStatsDto::from).collect();
    json_response(&body)
}

/// staffId → messages
pub async fn list_messages(
    State(state): State<Arc<AppState>>,
    RawQuery(query): RawQuery,
) -> Response {
    if let Err(rejection) = authorize(&state, query.as_deref()) {
        return rejection;
    }

    let messages = state.get_messages_usecase.execute().await;
    json_response(&messages_to_document(&messages))
}

/// staffId → date → minutes
pub async fn list_playtime(
    State(state): State<Arc<AppState>>,
    RawQuery(query): RawQuery,
) -> Response {
    if let Err(rejection) = authorize(&state, query.as_deref()) {
        return rejection;
    }

    let playtime = state.get_playtime_usecase.execute().await;
    json_response(&playtime_to_document(&playtime))
}

fn authorize(state: &AppState, query: Option<&str>) -> Result<(), Response> {
    state
        .authenticator
        .authenticate(&Credentials { query })
        .map_err(|e| {
            tracing::debug!("Rejected request: {}", e);
            StatusCode::FORBIDDEN.into_response()
        })
}

/// Compact JSON with an explicit content type and length
fn json_response<T: Serialize>(payload: &T) -> Response {
    match serde_json::to_vec(payload) {
        Ok(body) => (
            StatusCode::OK,
            [
                (
                    header::CONTENT_TYPE,
                    HeaderValue::from_static(JSON_CONTENT_TYPE),
                ),
                (header::CONTENT_LENGTH, HeaderValue::from(body.len())),
            ],
            Body::from(body),
        )
            .into_response(),
        Err(e) => {
            tracing::error!("Failed to serialize response: {}", e);
            StatusCode::INTERNAL_SERVER_ERROR.into_response()
        }
    }
}
