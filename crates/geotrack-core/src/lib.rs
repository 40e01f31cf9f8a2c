//! # geotrack-core
//!
//! Core types and logic for the geotrack administrative console.
//!
//! This crate provides the pieces shared by every page of the console:
//! the wire models for image reports and devices, the keyword filter
//! engine, the pager, the two-phase upload state machine, and the
//! persisted preference store.

pub mod defaults;
pub mod error;
pub mod filter;
pub mod models;
pub mod pager;
pub mod prefs;
pub mod upload;

// Re-export commonly used types at crate root
pub use error::{Error, Result};
pub use filter::{filter_by_device, filter_by_fields, keyword_matches, sort_newest_first};
pub use models::{DeviceIndex, DeviceRef, ImageRecord, NewImageReport};
pub use pager::{Pager, PAGE_SIZE_OPTIONS};
pub use prefs::{FilePreferences, MemoryPreferences, PreferenceStore};
pub use upload::{UploadDraft, UploadForm, UploadPhase};
