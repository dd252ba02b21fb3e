use axum::{
    Router,
    extract::{ConnectInfo, State},
    http::{Extensions, HeaderMap, StatusCode, header},
    response::{IntoResponse, Response},
    routing::post,
};
use axum_helpers::{AppError, AuditEvent, AuditOutcome, ClientMetadata, ErrorResponse, JsonOrForm};
use serde_json::json;
use std::net::SocketAddr;
use std::sync::Arc;
use utoipa::OpenApi;

use crate::models::SubmitForm;
use crate::redirect::LocalRedirect;
use crate::repository::SubmissionRepository;
use crate::service::SubmissionService;

/// OpenAPI documentation for the submission endpoint
#[derive(OpenApi)]
#[openapi(
    paths(submit),
    components(schemas(SubmitForm, ErrorResponse)),
    tags(
        (name = "Submissions", description = "Submission intake")
    )
)]
pub struct ApiDoc;

/// HTTP-facing knobs of the submit endpoint
#[derive(Debug, Clone, Default)]
pub struct SubmitOptions {
    /// Where accepted submissions are sent
    pub redirect: LocalRedirect,
    /// Include error detail in 500 bodies (development only)
    pub reveal_errors: bool,
}

struct SubmitState<R: SubmissionRepository> {
    service: SubmissionService<R>,
    options: SubmitOptions,
}

/// Create the submissions router (`POST /login`)
pub fn router<R: SubmissionRepository + 'static>(
    service: SubmissionService<R>,
    options: SubmitOptions,
) -> Router {
    let state = Arc::new(SubmitState { service, options });

    Router::new()
        .route("/login", post(submit::<R>))
        .with_state(state)
}

/// Accept a submission
///
/// The secret is hashed before it is stored. On success the client is
/// redirected to the configured same-origin path.
#[utoipa::path(
    post,
    path = "/login",
    tag = "Submissions",
    request_body(
        content = SubmitForm,
        content_type = "application/x-www-form-urlencoded",
    ),
    responses(
        (status = 302, description = "Stored; redirects to the configured local path",
            headers(("location" = String, description = "Same-origin redirect target"))),
        (status = 400, description = "Username or secret missing", body = ErrorResponse),
        (status = 500, description = "Configuration or storage failure", body = ErrorResponse)
    )
)]
async fn submit<R: SubmissionRepository>(
    State(state): State<Arc<SubmitState<R>>>,
    headers: HeaderMap,
    extensions: Extensions,
    JsonOrForm(form): JsonOrForm<SubmitForm>,
) -> Result<Response, AppError> {
    let peer = extensions
        .get::<ConnectInfo<SocketAddr>>()
        .map(|ConnectInfo(addr)| *addr);
    let client = ClientMetadata::from_request(&headers, peer);
    let username = form.username.clone().filter(|u| !u.is_empty());

    match state.service.submit(form, client.clone()).await {
        Ok(submission) => {
            AuditEvent::new("submission.create", AuditOutcome::Success)
                .with_subject(username)
                .with_client(&client)
                .with_details(json!({ "submission_id": submission.id }))
                .log();

            Ok((
                StatusCode::FOUND,
                [(header::LOCATION, state.options.redirect.to_string())],
            )
                .into_response())
        }
        Err(err) => {
            AuditEvent::new("submission.create", AuditOutcome::Failure)
                .with_subject(username)
                .with_client(&client)
                .with_details(json!({ "reason": err.kind() }))
                .log();

            Err(err.into_app_error(state.options.reveal_errors))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{CONFIGURATION_MESSAGE, GENERIC_MESSAGE};
    use crate::repository::MockSubmissionRepository;
    use crate::service::tests::{SlowRepository, verifies};
    use crate::service::SubmissionTimeouts;
    use axum::body::Body;
    use axum::http::Request;
    use database::{ConnectionError, UriError};
    use http_body_util::BodyExt;
    use std::time::Duration;
    use tower::ServiceExt;

    fn app<R: SubmissionRepository + 'static>(repo: R, options: SubmitOptions) -> Router {
        router(SubmissionService::new(repo), options)
    }

    fn form_request(body: &str) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri("/login")
            .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
            .header(header::USER_AGENT, "test-agent/1.0")
            .header("x-forwarded-for", "203.0.113.9")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    async fn json_body(response: Response) -> ErrorResponse {
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn test_empty_username_is_400() {
        let mut repo = MockSubmissionRepository::new();
        repo.expect_connect().never();
        repo.expect_insert().never();

        let response = app(repo, SubmitOptions::default())
            .oneshot(form_request("username=&secret=b"))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = json_body(response).await;
        assert_eq!(body.error, "Validation error");
        assert_eq!(body.message, "Username and secret are required");
    }

    #[tokio::test]
    async fn test_accepted_submission_redirects_locally() {
        let mut repo = MockSubmissionRepository::new();
        repo.expect_connect().times(1).returning(|| Ok(()));
        repo.expect_insert()
            .times(1)
            .withf(|s| {
                s.username == "a"
                    && verifies(&s.secret_hash, "b")
                    && s.client_agent.as_deref() == Some("test-agent/1.0")
                    && s.client_address.as_deref() == Some("203.0.113.9")
            })
            .returning(|_| Ok(()));

        let options = SubmitOptions {
            redirect: LocalRedirect::parse("/thanks").unwrap(),
            reveal_errors: false,
        };
        let response = app(repo, options)
            .oneshot(form_request("username=a&secret=b"))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::FOUND);
        assert_eq!(response.headers()[header::LOCATION], "/thanks");
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        assert!(bytes.is_empty());
    }

    #[tokio::test]
    async fn test_json_body_is_accepted() {
        let mut repo = MockSubmissionRepository::new();
        repo.expect_connect().returning(|| Ok(()));
        repo.expect_insert().times(1).returning(|_| Ok(()));

        let request = Request::builder()
            .method("POST")
            .uri("/login")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(r#"{"username":"a","secret":"b"}"#))
            .unwrap();

        let response = app(repo, SubmitOptions::default())
            .oneshot(request)
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::FOUND);
        assert_eq!(response.headers()[header::LOCATION], "/");
    }

    #[tokio::test]
    async fn test_missing_uri_gives_generic_configuration_error() {
        let mut repo = MockSubmissionRepository::new();
        repo.expect_connect()
            .returning(|| Err(ConnectionError::Config(UriError::Missing).into()));
        repo.expect_insert().never();

        let options = SubmitOptions {
            reveal_errors: true,
            ..Default::default()
        };
        let response = app(repo, options)
            .oneshot(form_request("username=a&secret=b"))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let body = json_body(response).await;
        assert_eq!(body.error, "Configuration error");
        assert_eq!(body.message, CONFIGURATION_MESSAGE);
    }

    #[tokio::test]
    async fn test_production_hides_error_detail() {
        let mut repo = MockSubmissionRepository::new();
        repo.expect_connect().returning(|| {
            Err(ConnectionError::AuthenticationFailed("bad auth".into()).into())
        });

        let response = app(repo, SubmitOptions::default())
            .oneshot(form_request("username=a&secret=b"))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let body = json_body(response).await;
        assert_eq!(body.error, "Internal server error");
        assert_eq!(body.message, GENERIC_MESSAGE);
    }

    #[tokio::test]
    async fn test_development_reveals_error_detail() {
        let mut repo = MockSubmissionRepository::new();
        repo.expect_connect().returning(|| {
            Err(ConnectionError::AuthenticationFailed("bad auth".into()).into())
        });

        let options = SubmitOptions {
            reveal_errors: true,
            ..Default::default()
        };
        let response = app(repo, options)
            .oneshot(form_request("username=a&secret=b"))
            .await
            .unwrap();

        let body = json_body(response).await;
        assert_eq!(
            body.message,
            "Authentication failed. Please check your MongoDB username and password."
        );
    }

    #[tokio::test]
    async fn test_slow_save_is_500() {
        let repo = SlowRepository {
            connect: Duration::ZERO,
            insert: Duration::from_secs(5),
        };
        let service = SubmissionService::with_timeouts(
            repo,
            SubmissionTimeouts {
                connect: Duration::from_millis(50),
                save: Duration::from_millis(50),
            },
        );
        let options = SubmitOptions {
            reveal_errors: true,
            ..Default::default()
        };

        let response = router(service, options)
            .oneshot(form_request("username=a&secret=b"))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let body = json_body(response).await;
        assert_eq!(body.message, "Save operation timed out after 50ms");
    }

    #[tokio::test]
    async fn test_peer_address_used_without_proxy_headers() {
        let mut repo = MockSubmissionRepository::new();
        repo.expect_connect().returning(|| Ok(()));
        repo.expect_insert()
            .times(1)
            .withf(|s| s.client_address.as_deref() == Some("192.0.2.77"))
            .returning(|_| Ok(()));

        let mut request = Request::builder()
            .method("POST")
            .uri("/login")
            .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
            .body(Body::from("username=a&secret=b"))
            .unwrap();
        let peer: SocketAddr = "192.0.2.77:40000".parse().unwrap();
        request.extensions_mut().insert(ConnectInfo(peer));

        let response = app(repo, SubmitOptions::default())
            .oneshot(request)
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::FOUND);
    }
}
