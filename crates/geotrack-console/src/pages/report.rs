//! Image-report listing page.
//!
//! Holds the fetched records plus the device reference index, and
//! derives the visible slice: keyword filter over the joined device
//! fields, newest-first sort, then the pager window.

use tracing::debug;

use geotrack_client::{ApiClient, ImageQuery};
use geotrack_core::{
    filter_by_device, sort_newest_first, DeviceIndex, ImageRecord, Pager, PreferenceStore, Result,
};

/// Record store and view state for the report page.
pub struct ReportPage<'a> {
    client: &'a ApiClient,
    items: Vec<ImageRecord>,
    devices: DeviceIndex,
    keyword: String,
    pager: Pager,
    loading: bool,
    last_error: Option<String>,
    show_all_devices: bool,
}

impl<'a> ReportPage<'a> {
    /// The show-all-devices flag is read once from the injected
    /// preference store; it only affects the device-list fetch.
    pub fn new(client: &'a ApiClient, prefs: &dyn PreferenceStore) -> Self {
        Self {
            client,
            items: Vec::new(),
            devices: DeviceIndex::default(),
            keyword: String::new(),
            pager: Pager::new(),
            loading: false,
            last_error: None,
            show_all_devices: prefs.show_all_devices(),
        }
    }

    /// Re-fetch records and the device index. On failure the previous
    /// (possibly empty) list stays displayed, the error is retained for
    /// display, and the loading flag is always cleared.
    pub async fn refresh(&mut self) {
        self.loading = true;
        match self.load().await {
            Ok((items, devices)) => {
                self.items = items;
                self.devices = devices;
                self.last_error = None;
                self.pager.clamp(self.filtered_count());
            }
            Err(error) => {
                self.last_error = Some(error.detail());
            }
        }
        self.loading = false;
    }

    async fn load(&self) -> Result<(Vec<ImageRecord>, DeviceIndex)> {
        let items = self.client.list_images(&ImageQuery::all()).await?;
        let devices = self.client.device_index(self.show_all_devices).await?;
        debug!(
            items = items.len(),
            devices = devices.len(),
            "report page loaded"
        );
        Ok((items, devices))
    }

    pub fn items(&self) -> &[ImageRecord] {
        &self.items
    }

    pub fn devices(&self) -> &DeviceIndex {
        &self.devices
    }

    pub fn loading(&self) -> bool {
        self.loading
    }

    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    pub fn keyword(&self) -> &str {
        &self.keyword
    }

    /// Update the search keyword. The keyword itself is never reset
    /// automatically, but the page index is re-clamped against the new
    /// filtered set.
    pub fn set_keyword(&mut self, keyword: &str) {
        self.keyword = keyword.to_string();
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

    pub fn set_page_index(&mut self, page_index: usize) {
        let count = self.filtered_count();
        self.pager.set_page_index(page_index, count);
    }

    pub fn has_next(&self) -> bool {
        self.pager.has_next(self.filtered_count())
    }

    pub fn has_previous(&self) -> bool {
        self.pager.has_previous()
    }

    pub fn filtered_count(&self) -> usize {
        filter_by_device(&self.items, &self.keyword, &self.devices).len()
    }

    /// The records currently on screen: filtered, sorted newest-first,
    /// and windowed by the pager.
    pub fn visible(&self) -> Vec<&ImageRecord> {
        let mut view = filter_by_device(&self.items, &self.keyword, &self.devices);
        sort_newest_first(&mut view);
        self.pager.page_slice(&view).to_vec()
    }
}
