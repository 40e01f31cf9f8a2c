//! Image-report settings page.
//!
//! Same record-list shape as the report page, but filtered over the
//! record's own fields (no device join), with an optional device
//! narrowing and a row delete action. No sort step here: records stay
//! in fetched order.

use geotrack_client::{ApiClient, ImageQuery};
use geotrack_core::{filter_by_fields, ImageRecord, Pager, Result};

/// Record store and view state for the settings page.
pub struct SettingsPage<'a> {
    client: &'a ApiClient,
    items: Vec<ImageRecord>,
    keyword: String,
    device_filter: Option<i64>,
    pager: Pager,
    loading: bool,
    last_error: Option<String>,
}

impl<'a> SettingsPage<'a> {
    pub fn new(client: &'a ApiClient) -> Self {
        Self {
            client,
            items: Vec::new(),
            keyword: String::new(),
            device_filter: None,
            pager: Pager::new(),
            loading: false,
            last_error: None,
        }
    }

    /// Re-fetch the record list, keeping the previous list on failure.
    pub async fn refresh(&mut self) {
        self.loading = true;
        match self.client.list_images(&ImageQuery::default()).await {
            Ok(items) => {
                self.items = items;
                self.last_error = None;
                self.pager.clamp(self.filtered_count());
            }
            Err(error) => {
                self.last_error = Some(error.detail());
            }
        }
        self.loading = false;
    }

    /// Delete a record, then re-fetch so the list reflects the server.
    pub async fn remove(&mut self, id: i64) -> Result<()> {
        self.client.remove_image(id).await?;
        self.refresh().await;
        Ok(())
    }

    pub fn items(&self) -> &[ImageRecord] {
        &self.items
    }

    pub fn loading(&self) -> bool {
        self.loading
    }

    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    pub fn set_keyword(&mut self, keyword: &str) {
        self.keyword = keyword.to_string();
        self.pager.clamp(self.filtered_count());
    }

    /// Narrow the list to a single device, or clear the narrowing.
    pub fn set_device_filter(&mut self, device_id: Option<i64>) {
        self.device_filter = device_id;
        self.pager.clamp(self.filtered_count());
    }

    pub fn pager(&self) -> &Pager {
        &self.pager
    }

    pub fn set_page_size(&mut self, page_size: usize) {
        self.pager.set_page_size(page_size);
    }

    pub fn next_page(&mut self) {
        let count = self.filtered_count();
        self.pager.next_page(count);
    }

    pub fn previous_page(&mut self) {
        self.pager.previous_page();
    }

    fn filtered(&self) -> Vec<&ImageRecord> {
        let mut view = filter_by_fields(&self.items, &self.keyword);
        if let Some(device_id) = self.device_filter {
            view.retain(|record| record.device_id == device_id);
        }
        view
    }

    pub fn filtered_count(&self) -> usize {
        self.filtered().len()
    }

    /// The records currently on screen, in fetched order.
    pub fn visible(&self) -> Vec<&ImageRecord> {
        let view = self.filtered();
        self.pager.page_slice(&view).to_vec()
    }
}
