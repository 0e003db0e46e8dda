//! # nutri-quiz
//!
//! Terminal client for the NutriGuide supplement-recommendation service:
//! a customer-facing onboarding quiz plus an operator analytics dashboard,
//! both talking to the same HTTP backend.
//!
//! The crate is split along one seam: [`session`] holds the pure state
//! machine (events in, effects out, no IO), and [`app`] is the async shell
//! that renders frames, reads keys, and runs network effects in spawned
//! tasks.

mod api;
mod app;
pub mod config;
pub mod models;
pub mod session;
mod ui;

pub use api::{ApiClient, ApiError};
pub use app::run;
pub use config::{AppConfig, Capabilities, Landing, DEFAULT_API_BASE};

/// Top-level failure of a session.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("api error: {0}")]
    Api(#[from] ApiError),
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}
