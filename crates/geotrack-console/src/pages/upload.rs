//! Upload form page: drives the two-phase create-then-attach flow.
//!
//! The page never issues an attach before the metadata create has
//! returned an id; the state machine in `geotrack-core` enforces the
//! ordering and this page maps call outcomes back into it.

use tracing::info;

use geotrack_client::ApiClient;
use geotrack_core::{Result, UploadForm, UploadPhase};

/// Editable record form bound to the remote client.
pub struct UploadPage<'a> {
    client: &'a ApiClient,
    form: UploadForm,
}

impl<'a> UploadPage<'a> {
    pub fn new(client: &'a ApiClient) -> Self {
        Self {
            client,
            form: UploadForm::new(),
        }
    }

    pub fn form(&self) -> &UploadForm {
        &self.form
    }

    pub fn form_mut(&mut self) -> &mut UploadForm {
        &mut self.form
    }

    pub fn phase(&self) -> UploadPhase {
        self.form.phase()
    }

    pub fn last_error(&self) -> Option<&str> {
        self.form.last_error()
    }

    /// Phase one. Returns `true` when the record id has been stored.
    /// Validation failures and server rejections both leave the form
    /// editable with the message retained; no call is issued while the
    /// required fields are incomplete.
    pub async fn submit_metadata(&mut self) -> bool {
        let metadata = match self.form.metadata() {
            Ok(metadata) => metadata,
            Err(error) => {
                self.form.record_create_failure(error.detail());
                return false;
            }
        };
        match self.client.create_image(&metadata).await {
            Ok(record) => {
                self.form.record_created(record.id);
                true
            }
            Err(error) => {
                self.form.record_create_failure(error.detail());
                false
            }
        }
    }

    /// Phase two. Refuses to issue a call until a created id exists; on
    /// failure the created id is kept so attach can be retried without
    /// re-submitting metadata.
    pub async fn attach(&mut self) -> bool {
        let (id, bytes) = match self.form.attach_payload() {
            Ok((id, bytes)) => (id, bytes.to_vec()),
            Err(error) => {
                self.form.record_attach_failure(error.detail());
                return false;
            }
        };
        match self.client.attach_image(id, bytes).await {
            Ok(()) => {
                self.form.record_attached();
                true
            }
            Err(error) => {
                self.form.record_attach_failure(error.detail());
                false
            }
        }
    }

    /// Explicit compensation for an abandoned form: deletes a
    /// created-but-never-attached record so no orphan metadata survives,
    /// then resets the form. A form that never created anything just
    /// resets.
    pub async fn discard(&mut self) -> Result<()> {
        if let UploadPhase::Created(id) = self.form.phase() {
            self.client.remove_image(id).await?;
            info!(record_id = id, "discarded unattached record");
        }
        self.form = UploadForm::new();
        Ok(())
    }
}
