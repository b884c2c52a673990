//! The catalog normalizer endpoint at `/`.
//!
//! Fetches the Printful store catalog on every `GET` and answers with the
//! storefront product array. Errors are reported as `{"error": "..."}`
//! with status 500 rather than the `/api/v1` envelope.
//!
//! `PRINTFUL_API_KEY` is read once at startup into [`AppState`]; a rotated
//! key takes effect after a restart.

use axum::{
    extract::State,
    http::{header, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use serde::Serialize;
use storefront_catalog::CatalogError;
use tower::ServiceBuilder;
use tower_http::set_header::SetResponseHeaderLayer;

use super::AppState;

const PRINTFUL_API_KEY_VAR: &str = "PRINTFUL_API_KEY";

#[derive(Debug, Serialize)]
struct NormalizerError {
    error: String,
}

fn error_response(message: impl Into<String>) -> Response {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(NormalizerError {
            error: message.into(),
        }),
    )
        .into_response()
}

/// Routes for `/`, with the permissive CORS headers stamped on every
/// response including errors.
pub(super) fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(get_catalog).options(preflight))
        .layer(
            ServiceBuilder::new()
                .layer(SetResponseHeaderLayer::overriding(
                    header::ACCESS_CONTROL_ALLOW_ORIGIN,
                    HeaderValue::from_static("*"),
                ))
                .layer(SetResponseHeaderLayer::overriding(
                    header::ACCESS_CONTROL_ALLOW_METHODS,
                    HeaderValue::from_static("GET, OPTIONS"),
                ))
                .layer(SetResponseHeaderLayer::overriding(
                    header::ACCESS_CONTROL_ALLOW_HEADERS,
                    HeaderValue::from_static("Content-Type, Authorization"),
                )),
        )
}

async fn preflight() -> StatusCode {
    StatusCode::OK
}

async fn get_catalog(State(state): State<AppState>) -> Response {
    let Some(api_key) = state.printful_api_key.clone() else {
        let err = CatalogError::MissingCredential {
            var: PRINTFUL_API_KEY_VAR,
        };
        tracing::error!(error = %err, "catalog request rejected");
        return error_response(err.to_string());
    };

    // Detached from the request future: a client disconnect must not cancel
    // the upstream call halfway.
    let client = state.catalog.clone();
    let fetch = tokio::spawn(async move { client.fetch_catalog(&api_key).await });

    match fetch.await {
        Ok(Ok(products)) => (StatusCode::OK, Json(products)).into_response(),
        Ok(Err(err)) => {
            tracing::error!(error = %err, "catalog fetch failed");
            error_response(err.to_string())
        }
        Err(join_err) => {
            tracing::error!(error = %join_err, "catalog fetch task aborted");
            error_response("catalog fetch task aborted")
        }
    }
}
