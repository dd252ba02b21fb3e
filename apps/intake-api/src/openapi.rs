//! OpenAPI documentation configuration

use utoipa::OpenApi;

use crate::api::{diagnostics, health};

/// Combined OpenAPI documentation for all APIs
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Intake API",
        version = "0.1.0",
        description = "Accepts submissions and stores them in MongoDB"
    ),
    servers(
        (url = "http://localhost:3000", description = "Local development server")
    ),
    paths(health::database_health, diagnostics::debug_env),
    components(schemas(health::DatabaseHealth, diagnostics::DebugEnv)),
    nest(
        (path = "/api", api = domain_submissions::ApiDoc)
    ),
    tags(
        (name = "Submissions", description = "Submission intake"),
        (name = "Operations", description = "Health and diagnostics")
    )
)]
pub struct ApiDoc;
