//! Two-phase image upload state machine.
//!
//! The API models an image as metadata plus a separate binary resource,
//! so the form submits in two strictly ordered phases: a metadata
//! create (`POST /api/images`) that yields the server-assigned id, then
//! a binary attach (`POST /api/images/{id}/upload`) keyed by that id.
//!
//! Phases: `Empty → MetadataReady → Created(id) → Attached(id)`.
//! A create failure stays in `MetadataReady`; an attach failure stays
//! in `Created` so the attach can be retried without re-submitting
//! metadata. Each successful transition clears the retained error
//! message; each failure sets it.

use tracing::{debug, warn};

use crate::error::{Error, Result};
use crate::models::NewImageReport;

/// Where the form is in the create-then-attach sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UploadPhase {
    /// Required fields incomplete; no call may be issued.
    Empty,
    /// All required fields present; metadata create may be submitted.
    MetadataReady,
    /// Metadata create succeeded; holds the server-assigned record id.
    Created(i64),
    /// Binary attach succeeded for the created record.
    Attached(i64),
}

/// Field input collected from the operator.
#[derive(Debug, Clone, Default)]
pub struct UploadDraft {
    pub device_id: Option<i64>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub file_name: String,
    pub file_extension: String,
    pub file: Option<Vec<u8>>,
}

impl UploadDraft {
    /// Required fields for the metadata create call.
    fn missing_fields(&self) -> Vec<&'static str> {
        let mut missing = Vec::new();
        if self.file_name.is_empty() {
            missing.push("fileName");
        }
        if self.file_extension.is_empty() {
            missing.push("fileExtension");
        }
        if self.device_id.is_none() {
            missing.push("deviceId");
        }
        if self.latitude.is_none() {
            missing.push("latitude");
        }
        if self.longitude.is_none() {
            missing.push("longitude");
        }
        missing
    }

    fn is_complete(&self) -> bool {
        self.missing_fields().is_empty()
    }
}

/// Editable record form driving the two-phase upload.
#[derive(Debug, Clone, Default)]
pub struct UploadForm {
    draft: UploadDraft,
    created_id: Option<i64>,
    attached: bool,
    last_error: Option<String>,
}

impl UploadForm {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn draft(&self) -> &UploadDraft {
        &self.draft
    }

    pub fn phase(&self) -> UploadPhase {
        match (self.created_id, self.attached) {
            (Some(id), true) => UploadPhase::Attached(id),
            (Some(id), false) => UploadPhase::Created(id),
            (None, _) if self.draft.is_complete() => UploadPhase::MetadataReady,
            (None, _) => UploadPhase::Empty,
        }
    }

    /// Error message retained from the last failed transition, if any.
    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    pub fn set_device_id(&mut self, device_id: i64) {
        self.draft.device_id = Some(device_id);
    }

    pub fn set_position(&mut self, latitude: f64, longitude: f64) {
        self.draft.latitude = Some(latitude);
        self.draft.longitude = Some(longitude);
    }

    /// Select the binary and derive file name/extension by splitting the
    /// source file name on its final dot. A name without an extension
    /// leaves the extension field empty (and the form incomplete).
    pub fn select_file(&mut self, source_name: &str, bytes: Vec<u8>) {
        match source_name.rsplit_once('.') {
            Some((name, extension)) => {
                self.draft.file_name = name.to_string();
                self.draft.file_extension = extension.to_string();
            }
            None => {
                self.draft.file_name = source_name.to_string();
                self.draft.file_extension = String::new();
            }
        }
        self.draft.file = Some(bytes);
        debug!(
            file_name = %self.draft.file_name,
            file_extension = %self.draft.file_extension,
            size = self.draft.file.as_ref().map(Vec::len).unwrap_or(0),
            "file selected"
        );
    }

    /// Override the derived file name.
    pub fn set_file_name(&mut self, file_name: &str) {
        self.draft.file_name = file_name.to_string();
    }

    /// Metadata body for the create call, or a validation error naming
    /// the missing fields. No call may be issued while `Empty`.
    pub fn metadata(&self) -> Result<NewImageReport> {
        let missing = self.draft.missing_fields();
        if !missing.is_empty() {
            return Err(Error::Validation(format!(
                "required fields missing: {}",
                missing.join(", ")
            )));
        }
        Ok(NewImageReport {
            device_id: self.draft.device_id.unwrap_or_default(),
            latitude: self.draft.latitude.unwrap_or_default(),
            longitude: self.draft.longitude.unwrap_or_default(),
            file_name: self.draft.file_name.clone(),
            file_extension: self.draft.file_extension.clone(),
        })
    }

    /// Server id from a successful create, if any.
    pub fn created_id(&self) -> Option<i64> {
        self.created_id
    }

    /// The attach call is only valid once a created id exists and a
    /// binary has been selected.
    pub fn can_attach(&self) -> bool {
        self.created_id.is_some() && !self.attached && self.draft.file.is_some()
    }

    /// Binary and record id for the attach call, or a validation error
    /// when attach is initiated out of order (no call may be issued).
    pub fn attach_payload(&self) -> Result<(i64, &[u8])> {
        let id = self
            .created_id
            .ok_or_else(|| Error::Validation("metadata has not been created yet".to_string()))?;
        let bytes = self
            .draft
            .file
            .as_deref()
            .ok_or_else(|| Error::Validation("no file selected".to_string()))?;
        Ok((id, bytes))
    }

    /// Record a successful metadata create.
    pub fn record_created(&mut self, id: i64) {
        debug!(record_id = id, "metadata created");
        self.created_id = Some(id);
        self.last_error = None;
    }

    /// Record a failed metadata create; the form stays editable.
    pub fn record_create_failure(&mut self, message: impl Into<String>) {
        let message = message.into();
        warn!(error = %message, "metadata create failed");
        self.last_error = Some(message);
    }

    /// Record a successful binary attach.
    pub fn record_attached(&mut self) {
        debug!(record_id = ?self.created_id, "file attached");
        self.attached = true;
        self.last_error = None;
    }

    /// Record a failed attach; the created id is kept so the attach can
    /// be retried without re-submitting metadata.
    pub fn record_attach_failure(&mut self, message: impl Into<String>) {
        let message = message.into();
        warn!(record_id = ?self.created_id, error = %message, "file attach failed");
        self.last_error = Some(message);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn complete_form() -> UploadForm {
        let mut form = UploadForm::new();
        form.set_device_id(7);
        form.set_position(52.52, 13.405);
        form.select_file("gate-cam.front.jpg", vec![1, 2, 3]);
        form
    }

    #[test]
    fn test_starts_empty() {
        let form = UploadForm::new();
        assert_eq!(form.phase(), UploadPhase::Empty);
        assert!(form.metadata().is_err());
        assert!(!form.can_attach());
    }

    #[test]
    fn test_validation_names_missing_fields() {
        let mut form = UploadForm::new();
        form.set_device_id(7);
        let err = form.metadata().unwrap_err();
        let message = err.to_string();
        assert!(message.contains("fileName"));
        assert!(message.contains("latitude"));
        assert!(!message.contains("deviceId"));
    }

    #[test]
    fn test_complete_fields_reach_metadata_ready() {
        let form = complete_form();
        assert_eq!(form.phase(), UploadPhase::MetadataReady);
        let metadata = form.metadata().unwrap();
        assert_eq!(metadata.device_id, 7);
        // Extension split on the final dot only
        assert_eq!(metadata.file_name, "gate-cam.front");
        assert_eq!(metadata.file_extension, "jpg");
    }

    #[test]
    fn test_file_without_extension_stays_incomplete() {
        let mut form = UploadForm::new();
        form.set_device_id(1);
        form.set_position(0.0, 0.0);
        form.select_file("README", vec![1]);
        assert_eq!(form.phase(), UploadPhase::Empty);
    }

    #[test]
    fn test_attach_before_create_is_rejected() {
        let form = complete_form();
        assert!(!form.can_attach());
        match form.attach_payload() {
            Err(Error::Validation(_)) => {}
            other => panic!("expected validation error, got {other:?}"),
        }
    }

    #[test]
    fn test_create_success_enables_attach() {
        let mut form = complete_form();
        form.record_created(42);
        assert_eq!(form.phase(), UploadPhase::Created(42));
        assert!(form.can_attach());
        let (id, bytes) = form.attach_payload().unwrap();
        assert_eq!(id, 42);
        assert_eq!(bytes, &[1, 2, 3]);
    }

    #[test]
    fn test_create_failure_retains_message_and_phase() {
        let mut form = complete_form();
        form.record_create_failure("bad deviceId");
        assert_eq!(form.phase(), UploadPhase::MetadataReady);
        assert_eq!(form.last_error(), Some("bad deviceId"));
    }

    #[test]
    fn test_attach_failure_keeps_created_for_retry() {
        let mut form = complete_form();
        form.record_created(42);
        form.record_attach_failure("disk full");
        assert_eq!(form.phase(), UploadPhase::Created(42));
        assert_eq!(form.last_error(), Some("disk full"));
        assert!(form.can_attach());
    }

    #[test]
    fn test_success_clears_previous_error() {
        let mut form = complete_form();
        form.record_create_failure("bad deviceId");
        form.record_created(42);
        assert!(form.last_error().is_none());

        form.record_attach_failure("disk full");
        form.record_attached();
        assert!(form.last_error().is_none());
        assert_eq!(form.phase(), UploadPhase::Attached(42));
        assert!(!form.can_attach());
    }
}
