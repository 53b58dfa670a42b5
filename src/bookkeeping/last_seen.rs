//! Last-seen timestamps.

use chrono::{DateTime, Utc};

use crate::store::{ClientStore, StoreError};

/// Storage format, e.g. `2024-03-09T14:05:00Z`.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%dT%H:%M:%SZ";

pub fn format_timestamp(at: DateTime<Utc>) -> String {
    at.format(TIMESTAMP_FORMAT).to_string()
}

/// Read the previous timestamp for `client`, then overwrite it with now.
pub async fn touch(
    store: &dyn ClientStore,
    client: &str,
) -> Result<(Option<String>, String), StoreError> {
    touch_at(store, client, Utc::now()).await
}

pub(crate) async fn touch_at(
    store: &dyn ClientStore,
    client: &str,
    now: DateTime<Utc>,
) -> Result<(Option<String>, String), StoreError> {
    let previous = store.get(client).await?;
    if let Some(last_access) = &previous {
        tracing::info!(client = %client, last_seen = %last_access, "{} last seen @ {}", client, last_access);
    }

    let current = format_timestamp(now);
    store.set(client, &current).await?;
    Ok((previous, current))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryStore;
    use chrono::TimeZone;

    #[test]
    fn test_timestamp_format() {
        let at = Utc.with_ymd_and_hms(2024, 3, 9, 14, 5, 0).unwrap();
        assert_eq!(format_timestamp(at), "2024-03-09T14:05:00Z");
    }

    #[tokio::test]
    async fn test_second_visit_sees_first() {
        let store = MemoryStore::new();
        let first = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        let second = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 5).unwrap();

        let (previous, current) = touch_at(&store, "192.0.2.7", first).await.unwrap();
        assert_eq!(previous, None);
        assert_eq!(current, "2024-01-01T00:00:00Z");

        let (previous, current) = touch_at(&store, "192.0.2.7", second).await.unwrap();
        assert_eq!(previous.as_deref(), Some("2024-01-01T00:00:00Z"));
        assert_eq!(current, "2024-01-01T00:00:05Z");

        assert_eq!(store.peek("192.0.2.7").as_deref(), Some("2024-01-01T00:00:05Z"));
    }

    #[tokio::test]
    async fn test_clients_tracked_separately() {
        let store = MemoryStore::new();
        touch(&store, "192.0.2.1").await.unwrap();
        let (previous, _) = touch(&store, "192.0.2.2").await.unwrap();
        assert!(previous.is_none());
        assert_eq!(store.len(), 2);
    }
}
