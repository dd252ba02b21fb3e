//! Body extractor accepting either JSON or URL-encoded forms.

use crate::errors::AppError;
use axum::{
    extract::{FromRequest, Request},
    http::header,
    Form, Json,
};
use serde::de::DeserializeOwned;

/// Deserializes the body as JSON when the content type says so, and as
/// `application/x-www-form-urlencoded` otherwise.
///
/// Rejections are reported as [`AppError`], so a malformed body gets the
/// same JSON error shape as every other failure.
///
/// # Example
/// ```ignore
/// #[derive(Deserialize)]
/// struct Submit {
///     username: Option<String>,
/// }
///
/// async fn submit(JsonOrForm(payload): JsonOrForm<Submit>) -> String {
///     payload.username.unwrap_or_default()
/// }
/// ```
pub struct JsonOrForm<T>(pub T);

fn is_json(request: &Request) -> bool {
    request
        .headers()
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.split(';').next())
        .map(|mime| {
            let mime = mime.trim();
            mime.eq_ignore_ascii_case("application/json") || mime.ends_with("+json")
        })
        .unwrap_or(false)
}

impl<T, S> FromRequest<S> for JsonOrForm<T>
where
    T: DeserializeOwned + Send,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        if is_json(&req) {
            let Json(data) = Json::<T>::from_request(req, state).await?;
            Ok(JsonOrForm(data))
        } else {
            let Form(data) = Form::<T>::from_request(req, state).await?;
            Ok(JsonOrForm(data))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{body::Body, http::StatusCode, response::IntoResponse};
    use serde::Deserialize;

    #[derive(Debug, Deserialize)]
    struct Payload {
        name: Option<String>,
    }

    async fn extract(content_type: &str, body: &str) -> Result<Payload, StatusCode> {
        let request = axum::http::Request::builder()
            .method("POST")
            .uri("/")
            .header(header::CONTENT_TYPE, content_type)
            .body(Body::from(body.to_string()))
            .unwrap();

        JsonOrForm::<Payload>::from_request(request, &())
            .await
            .map(|JsonOrForm(p)| p)
            .map_err(|e| e.into_response().status())
    }

    #[tokio::test]
    async fn test_extracts_json() {
        let payload = extract("application/json", r#"{"name":"a"}"#).await.unwrap();
        assert_eq!(payload.name.as_deref(), Some("a"));
    }

    #[tokio::test]
    async fn test_extracts_json_with_charset() {
        let payload = extract("application/json; charset=utf-8", r#"{"name":"b"}"#)
            .await
            .unwrap();
        assert_eq!(payload.name.as_deref(), Some("b"));
    }

    #[tokio::test]
    async fn test_extracts_form() {
        let payload = extract("application/x-www-form-urlencoded", "name=c%20d")
            .await
            .unwrap();
        assert_eq!(payload.name.as_deref(), Some("c d"));
    }

    #[tokio::test]
    async fn test_malformed_json_is_client_error() {
        let status = extract("application/json", "{not json").await.unwrap_err();
        assert!(status.is_client_error());
    }

    #[tokio::test]
    async fn test_unknown_content_type_is_rejected() {
        let status = extract("text/plain", "name=x").await.unwrap_err();
        assert_eq!(status, StatusCode::UNSUPPORTED_MEDIA_TYPE);
    }
}
