//! # geotrack-client
//!
//! Asynchronous REST client for the tracking server's image-report API.
//!
//! All calls are single-attempt: a failed call surfaces immediately with
//! the server's response body as the error detail, and the caller
//! decides whether to re-trigger.

mod client;
mod query;

pub use client::ApiClient;
pub use query::ImageQuery;
