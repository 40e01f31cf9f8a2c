//! # geotrack-console
//!
//! Page view-models for the administrative console. Each page owns its
//! in-memory record store and derives the visible slice through the
//! core filter engine and pager; all network failures surface as
//! page-local error state, never as process failures.

pub mod pages;

pub use pages::{ReportPage, SettingsPage, UploadPage};
