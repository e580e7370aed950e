use std::sync::Arc;

use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use serde::Deserialize;
use serde_json::json;
use tracing::{info, warn};

use crate::error::AccessTokenError;
use crate::server::server::AppState;
use crate::token::GoogleTokenFetcher;

pub const TOKEN_PATH: &str = "/token";

#[derive(Clone)]
pub struct TokenState {
    fetcher: Arc<GoogleTokenFetcher>,
}

impl TokenState {
    pub fn new(fetcher: GoogleTokenFetcher) -> Self {
        Self {
            fetcher: Arc::new(fetcher),
        }
    }

    pub fn router(&self) -> Router<AppState> {
        info!("served path: {}", TOKEN_PATH);
        Router::new().route(TOKEN_PATH, get(handle_token))
    }
}

#[derive(Debug, Deserialize)]
pub struct TokenQuery {
    pub scope: Option<String>,
}

async fn handle_token(State(state): State<AppState>, Query(query): Query<TokenQuery>) -> Response {
    let fetcher = &state.token_state.fetcher;
    let scope = query
        .scope
        .filter(|scope| !scope.is_empty())
        .unwrap_or_else(|| fetcher.settings().default_scope.clone());

    match fetcher.get_access_token(&scope).await {
        Ok(data) => (StatusCode::OK, Json(data)).into_response(),
        Err(e) => {
            let status = if e.is::<AccessTokenError>() {
                StatusCode::SERVICE_UNAVAILABLE
            } else {
                StatusCode::BAD_GATEWAY
            };
            warn!(scope = %scope, status = %status, "token request failed: {:#}", e);
            (status, Json(json!({ "error": e.to_string() }))).into_response()
        }
    }
}
