//! Submissions Domain
//!
//! Accepts `{username, secret}` submissions, stores them in MongoDB and
//! redirects the client to a same-origin path.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────┐
//! │  Handlers   │  ← POST /login, audit events, redirect
//! └──────┬──────┘
//!        │
//! ┌──────▼──────┐
//! │   Service   │  ← Presence checks, timeouts, secret hashing
//! └──────┬──────┘
//!        │
//! ┌──────▼──────┐
//! │ Repository  │  ← Data access (trait + MongoDB implementation)
//! └──────┬──────┘
//!        │
//! ┌──────▼──────┐
//! │   Models    │  ← Submission record, form DTO
//! └─────────────┘
//! ```
//!
//! The secret never leaves the service layer in clear text: only its
//! argon2 PHC string is persisted.
//!
//! # Usage
//!
//! ```rust,ignore
//! use domain_submissions::{handlers, MongoSubmissionRepository, SubmissionService, SubmitOptions};
//!
//! let repository = MongoSubmissionRepository::new(connections.clone());
//! let service = SubmissionService::new(repository);
//! let router = handlers::router(service, SubmitOptions::default());
//! ```

pub mod error;
pub mod handlers;
pub mod models;
pub mod mongodb;
pub mod redirect;
pub mod repository;
pub mod service;

pub use error::{SubmissionError, SubmissionResult};
pub use handlers::{ApiDoc, SubmitOptions};
pub use models::{Submission, SubmitForm};
pub use crate::mongodb::MongoSubmissionRepository;
pub use redirect::{LocalRedirect, RedirectError};
pub use repository::SubmissionRepository;
pub use service::{SubmissionService, SubmissionTimeouts};
