//! Typed query parameters for the image-report listing endpoint.

use chrono::{DateTime, SecondsFormat, Utc};

/// Query shape for `GET /api/images`: either everything (`all=true`) or
/// a time range optionally narrowed by device and group ids.
#[derive(Debug, Clone, Default)]
pub struct ImageQuery {
    all: bool,
    from: Option<DateTime<Utc>>,
    to: Option<DateTime<Utc>>,
    device_ids: Vec<i64>,
    group_ids: Vec<i64>,
}

impl ImageQuery {
    /// Request every report visible to the session.
    pub fn all() -> Self {
        Self {
            all: true,
            ..Self::default()
        }
    }

    /// Request reports within a time range.
    pub fn range(from: DateTime<Utc>, to: DateTime<Utc>) -> Self {
        Self {
            from: Some(from),
            to: Some(to),
            ..Self::default()
        }
    }

    /// Narrow to a device. Repeatable.
    pub fn device(mut self, device_id: i64) -> Self {
        self.device_ids.push(device_id);
        self
    }

    /// Narrow to a device group. Repeatable.
    pub fn group(mut self, group_id: i64) -> Self {
        self.group_ids.push(group_id);
        self
    }

    /// Serialize into query pairs; repeated ids become repeated keys.
    pub fn to_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = Vec::new();
        if self.all {
            pairs.push(("all", "true".to_string()));
        }
        if let Some(from) = self.from {
            pairs.push(("from", from.to_rfc3339_opts(SecondsFormat::Secs, true)));
        }
        if let Some(to) = self.to {
            pairs.push(("to", to.to_rfc3339_opts(SecondsFormat::Secs, true)));
        }
        for id in &self.device_ids {
            pairs.push(("deviceId", id.to_string()));
        }
        for id in &self.group_ids {
            pairs.push(("groupId", id.to_string()));
        }
        pairs
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_all_query() {
        let pairs = ImageQuery::all().to_pairs();
        assert_eq!(pairs, vec![("all", "true".to_string())]);
    }

    #[test]
    fn test_range_query_with_repeated_ids() {
        let from = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        let to = Utc.with_ymd_and_hms(2024, 1, 2, 0, 0, 0).unwrap();
        let pairs = ImageQuery::range(from, to)
            .device(3)
            .device(5)
            .group(9)
            .to_pairs();

        assert_eq!(
            pairs,
            vec![
                ("from", "2024-01-01T00:00:00Z".to_string()),
                ("to", "2024-01-02T00:00:00Z".to_string()),
                ("deviceId", "3".to_string()),
                ("deviceId", "5".to_string()),
                ("groupId", "9".to_string()),
            ]
        );
    }

    #[test]
    fn test_default_query_is_empty() {
        assert!(ImageQuery::default().to_pairs().is_empty());
    }
}
