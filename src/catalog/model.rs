//! Album records and the in-memory table holding them.

use std::sync::Arc;

use dashmap::mapref::entry::Entry;
use dashmap::DashMap;
use serde::{Deserialize, Serialize};

/// A record album.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Album {
    pub id: String,
    pub title: String,
    pub artist: String,
    pub price: f64,
}

impl Album {
    fn new(id: &str, title: &str, artist: &str, price: f64) -> Self {
        Self {
            id: id.to_string(),
            title: title.to_string(),
            artist: artist.to_string(),
            price,
        }
    }
}

/// Albums every fresh catalog starts with.
pub fn seed_albums() -> Vec<Album> {
    vec![
        Album::new("1", "Tubthumper", "Chumbawumba", 56.99),
        Album::new("2", "Jeru", "Gerry Mulligan", 17.99),
        Album::new("3", "Sarah Vaughan and Clifford Brown", "Sarah Vaughan", 39.99),
    ]
}

/// Thread-safe album table keyed by id.
#[derive(Clone, Default)]
pub struct AlbumTable {
    inner: Arc<DashMap<String, Album>>,
}

impl AlbumTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// A table holding [`seed_albums`].
    pub fn seeded() -> Self {
        let table = Self::new();
        for album in seed_albums() {
            if !table.insert(album.clone()) {
                tracing::warn!(id = %album.id, "unable to insert seed album");
            }
        }
        table
    }

    /// Insert a new album. Returns false if the id is taken.
    pub fn insert(&self, album: Album) -> bool {
        match self.inner.entry(album.id.clone()) {
            Entry::Occupied(_) => false,
            Entry::Vacant(slot) => {
                slot.insert(album);
                true
            }
        }
    }

    pub fn get(&self, id: &str) -> Option<Album> {
        self.inner.get(id).map(|r| r.value().clone())
    }

    /// All albums ordered by id.
    pub fn all(&self) -> Vec<Album> {
        let mut albums: Vec<Album> = self.inner.iter().map(|r| r.value().clone()).collect();
        albums.sort_by(|a, b| a.id.cmp(&b.id));
        albums
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_seeded_in_id_order() {
        let table = AlbumTable::seeded();
        let ids: Vec<_> = table.all().into_iter().map(|a| a.id).collect();
        assert_eq!(ids, vec!["1", "2", "3"]);
        assert_eq!(table.get("2").unwrap().title, "Jeru");
    }

    #[test]
    fn test_duplicate_id_rejected() {
        let table = AlbumTable::seeded();
        let dup = Album::new("1", "Other", "Someone", 1.0);
        assert!(!table.insert(dup));
        assert_eq!(table.get("1").unwrap().title, "Tubthumper");
    }

    #[test]
    fn test_album_json_shape() {
        let json = serde_json::to_value(Album::new("9", "Blue Train", "John Coltrane", 24.5)).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "id": "9",
                "title": "Blue Train",
                "artist": "John Coltrane",
                "price": 24.5
            })
        );
    }
}
