//! Core data models for the geotrack console.
//!
//! Wire structs use camelCase field names because the tracking server's
//! REST API speaks the field names of its JavaScript front-end.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

// =============================================================================
// IMAGE REPORTS
// =============================================================================

/// One uploaded image-report entry with device, position, and timestamp
/// metadata. Created by a metadata-submit call; `id` is server-assigned.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImageRecord {
    pub id: i64,
    pub device_id: i64,
    pub uploaded_at: DateTime<Utc>,
    pub latitude: f64,
    pub longitude: f64,
    pub file_name: String,
    pub file_extension: String,
}

impl ImageRecord {
    /// Server path of the attached binary, addressed by convention from
    /// the record's own fields rather than a separate lookup.
    pub fn upload_path(&self) -> String {
        format!(
            "/api/uploads/{}/{}.{}",
            self.id, self.file_name, self.file_extension
        )
    }

    /// Display form of the upload timestamp (`YYYY-MM-DD HH:MM:SS`).
    pub fn display_timestamp(&self) -> String {
        self.uploaded_at.format("%Y-%m-%d %H:%M:%S").to_string()
    }
}

/// Metadata body for creating a new image report.
///
/// The binary itself is attached in a second call once the server has
/// assigned an id (see [`crate::upload`]).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewImageReport {
    pub device_id: i64,
    pub latitude: f64,
    pub longitude: f64,
    pub file_name: String,
    pub file_extension: String,
}

// =============================================================================
// DEVICES
// =============================================================================

/// Lightweight identity/name projection of a tracked device, used only
/// for display joins against `ImageRecord::device_id`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeviceRef {
    pub id: i64,
    pub unique_id: String,
    pub name: String,
}

/// Read-through reference-data cache of devices keyed by id.
///
/// Built once from a device-list fetch and shared read-only across the
/// record-list and form components for display-time joins.
#[derive(Debug, Clone, Default)]
pub struct DeviceIndex {
    by_id: HashMap<i64, DeviceRef>,
}

impl DeviceIndex {
    pub fn new(devices: Vec<DeviceRef>) -> Self {
        Self {
            by_id: devices.into_iter().map(|d| (d.id, d)).collect(),
        }
    }

    pub fn get(&self, device_id: i64) -> Option<&DeviceRef> {
        self.by_id.get(&device_id)
    }

    /// Display fields for a device id. Unknown ids yield empty strings
    /// so a stale record never breaks rendering.
    pub fn display_fields(&self, device_id: i64) -> (&str, &str) {
        match self.by_id.get(&device_id) {
            Some(device) => (device.unique_id.as_str(), device.name.as_str()),
            None => ("", ""),
        }
    }

    pub fn len(&self) -> usize {
        self.by_id.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_id.is_empty()
    }
}
