//! Submission API routes
//!
//! Wires the submissions domain to the shared connection manager.

use axum::Router;
use domain_submissions::{MongoSubmissionRepository, SubmissionService, SubmitOptions, handlers};

use crate::state::AppState;

pub fn router(state: &AppState) -> Router {
    let repository = MongoSubmissionRepository::new(state.connections.clone());
    let service = SubmissionService::new(repository);

    handlers::router(
        service,
        SubmitOptions {
            redirect: state.config.redirect.clone(),
            reveal_errors: state.reveal_errors(),
        },
    )
}
