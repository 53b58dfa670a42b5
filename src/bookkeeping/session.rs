//! Create-once session ids.

use uuid::Uuid;

use crate::observability::metrics;
use crate::store::{ClientStore, StoreError};

/// New random 128-bit id as 32 lowercase hex characters.
pub fn new_session_id() -> String {
    Uuid::new_v4().simple().to_string()
}

/// Return the session id for `client`, creating it on first sight.
///
/// The boolean is true when this call stored the id. If a concurrent request
/// stores one between our read and write, its id wins and is returned.
pub async fn resolve(store: &dyn ClientStore, client: &str) -> Result<(String, bool), StoreError> {
    if let Some(existing) = store.get(client).await? {
        return Ok((existing, false));
    }

    let candidate = new_session_id();
    if store.set_if_absent(client, &candidate).await? {
        metrics::record_session_created();
        tracing::info!(client = %client, session_id = %candidate, "Created session");
        return Ok((candidate, true));
    }

    match store.get(client).await? {
        Some(winner) => Ok((winner, false)),
        // Key vanished again (expired or deleted out of band); keep ours.
        None => {
            store.set(client, &candidate).await?;
            Ok((candidate, true))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryStore;

    fn is_hex(s: &str) -> bool {
        !s.is_empty() && s.chars().all(|c| c.is_ascii_hexdigit())
    }

    #[test]
    fn test_new_session_id_shape() {
        let id = new_session_id();
        assert_eq!(id.len(), 32);
        assert!(is_hex(&id));
        assert_ne!(id, new_session_id());
    }

    #[tokio::test]
    async fn test_created_once() {
        let store = MemoryStore::new();

        let (first, created) = resolve(&store, "198.51.100.4").await.unwrap();
        assert!(created);
        assert!(is_hex(&first));
        assert_eq!(store.peek("198.51.100.4").as_deref(), Some(first.as_str()));

        let (second, created) = resolve(&store, "198.51.100.4").await.unwrap();
        assert!(!created);
        assert_eq!(first, second);
        assert_eq!(store.peek("198.51.100.4").as_deref(), Some(first.as_str()));
    }

    #[tokio::test]
    async fn test_concurrent_first_requests_agree() {
        let store = MemoryStore::new();
        let mut tasks = Vec::new();
        for _ in 0..16 {
            let store = store.clone();
            tasks.push(tokio::spawn(async move {
                resolve(&store, "198.51.100.9").await.unwrap()
            }));
        }

        let mut ids = Vec::new();
        let mut created = 0;
        for task in tasks {
            let (id, was_created) = task.await.unwrap();
            if was_created {
                created += 1;
            }
            ids.push(id);
        }

        assert_eq!(created, 1);
        ids.dedup();
        assert_eq!(ids.len(), 1);
    }
}
