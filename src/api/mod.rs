//! HTTP boundary to the recommendation backend.

mod client;

pub use client::{ApiClient, ApiError};
