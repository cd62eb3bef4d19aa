//! Request extractors whose rejections are catalog errors.
//!
//! axum's own `Json` and `Query` extractors reject with plain-text bodies.
//! These wrappers keep every error response in the `{"error": ...}` shape.

use axum::body::Bytes;
use axum::extract::{FromRequest, FromRequestParts, Query, Request};
use axum::http::request::Parts;
use axum::http::{HeaderMap, header};
use serde::de::DeserializeOwned;

use crate::core::Error;

/// JSON request body.
///
/// A body that is empty or not declared as JSON is reported as
/// "No data provided"; one that fails to decode names the decode error.
#[derive(Debug, Clone)]
pub struct JsonBody<T>(pub T);

impl<S, T> FromRequest<S> for JsonBody<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = Error;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        if !is_json(req.headers()) {
            return Err(Error::invalid_payload("No data provided"));
        }

        let bytes = Bytes::from_request(req, state)
            .await
            .map_err(|rejection| Error::invalid_payload(rejection.body_text()))?;
        if bytes.iter().all(u8::is_ascii_whitespace) {
            return Err(Error::invalid_payload("No data provided"));
        }

        serde_json::from_slice(&bytes)
            .map(Self)
            .map_err(|e| Error::invalid_payload(format!("Invalid JSON payload: {}", e)))
    }
}

fn is_json(headers: &HeaderMap) -> bool {
    headers
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.split(';').next())
        .map(|mime| {
            let mime = mime.trim().to_ascii_lowercase();
            mime == "application/json" || mime.ends_with("+json")
        })
        .unwrap_or(false)
}

/// URL query string.
#[derive(Debug, Clone)]
pub struct QueryParams<T>(pub T);

impl<S, T> FromRequestParts<S> for QueryParams<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = Error;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        Query::<T>::from_request_parts(parts, state)
            .await
            .map(|Query(value)| Self(value))
            .map_err(|rejection| {
                Error::invalid_payload(format!("Invalid query string: {}", rejection.body_text()))
            })
    }
}
