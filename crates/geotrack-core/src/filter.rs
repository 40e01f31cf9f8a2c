//! Keyword filtering for record-list pages.
//!
//! The filter is a pure, order-preserving predicate over derived display
//! fields: it never mutates or reorders its input. Sorting is a
//! separate, independent step ([`sort_newest_first`]) applied by pages
//! that want newest-first tables.

use tracing::debug;

use crate::models::{DeviceIndex, ImageRecord};

/// Case-insensitive substring match over a set of searchable fields.
///
/// An empty keyword matches everything.
pub fn keyword_matches<'a, I>(keyword: &str, fields: I) -> bool
where
    I: IntoIterator<Item = &'a str>,
{
    if keyword.is_empty() {
        return true;
    }
    let needle = keyword.to_lowercase();
    fields
        .into_iter()
        .any(|field| field.to_lowercase().contains(&needle))
}

/// Filter records by keyword against the joined device's unique id and
/// name (the report-page behavior).
pub fn filter_by_device<'a>(
    records: &'a [ImageRecord],
    keyword: &str,
    devices: &DeviceIndex,
) -> Vec<&'a ImageRecord> {
    let result: Vec<&ImageRecord> = records
        .iter()
        .filter(|record| {
            let (unique_id, name) = devices.display_fields(record.device_id);
            keyword_matches(keyword, [unique_id, name])
        })
        .collect();

    debug!(
        keyword,
        total = records.len(),
        matched = result.len(),
        "device keyword filter applied"
    );
    result
}

/// Filter records by keyword against the record's own searchable fields
/// (the settings-page behavior, where no device join is required).
pub fn filter_by_fields<'a>(records: &'a [ImageRecord], keyword: &str) -> Vec<&'a ImageRecord> {
    records
        .iter()
        .filter(|record| {
            let id = record.id.to_string();
            keyword_matches(
                keyword,
                [
                    record.file_name.as_str(),
                    record.file_extension.as_str(),
                    id.as_str(),
                ],
            )
        })
        .collect()
}

/// Sort a filtered view descending by upload time. Stable, so records
/// sharing a timestamp keep their fetched order.
pub fn sort_newest_first(records: &mut [&ImageRecord]) {
    records.sort_by(|a, b| b.uploaded_at.cmp(&a.uploaded_at));
}
