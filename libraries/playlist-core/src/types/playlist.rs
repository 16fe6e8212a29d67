/// Playlist domain types
use serde::{Deserialize, Serialize};
use std::fmt;

use super::{lenient, Song};

/// Server-assigned identifier. Attached on read, never used for addressing.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RemoteId {
    Number(i64),
    Text(String),
}

impl fmt::Display for RemoteId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RemoteId::Number(n) => write!(f, "{}", n),
            RemoteId::Text(s) => f.write_str(s),
        }
    }
}

/// Playlist as held by the collection service
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Playlist {
    /// Server identifier, if the service sent one
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<RemoteId>,

    /// Playlist name; the addressing key for get and delete
    #[serde(rename = "nombre", default, deserialize_with = "lenient::text")]
    pub name: String,

    #[serde(rename = "descripcion", default)]
    pub description: Option<String>,

    /// Songs in insertion order
    #[serde(rename = "canciones", default, deserialize_with = "lenient::list")]
    pub songs: Vec<Song>,
}

impl Playlist {
    /// Create a playlist without a server identifier
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: None,
            name: name.into(),
            description: None,
            songs: Vec::new(),
        }
    }

    /// Set the description
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Set the songs
    pub fn with_songs(mut self, songs: Vec<Song>) -> Self {
        self.songs = songs;
        self
    }

    /// Description, or "" when the service sent none
    pub fn description_text(&self) -> &str {
        self.description.as_deref().unwrap_or_default()
    }

    /// True if the content (ignoring the server id) matches.
    ///
    /// An absent description and an empty one compare equal.
    pub fn same_content(&self, other: &Playlist) -> bool {
        self.name == other.name
            && self.description_text() == other.description_text()
            && self.songs == other.songs
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_server_payload() {
        let playlist: Playlist = serde_json::from_value(serde_json::json!({
            "id": 7,
            "nombre": "Road Trip",
            "descripcion": "Summer drive",
            "canciones": [
                { "titulo": "Starlight", "artista": "Muse", "album": "", "anno": "2006", "genero": "" }
            ]
        }))
        .unwrap();

        assert_eq!(playlist.id, Some(RemoteId::Number(7)));
        assert_eq!(playlist.name, "Road Trip");
        assert_eq!(playlist.description.as_deref(), Some("Summer drive"));
        assert_eq!(playlist.songs.len(), 1);
        assert_eq!(playlist.songs[0].artist, "Muse");
    }

    #[test]
    fn tolerates_sparse_payload() {
        let playlist: Playlist = serde_json::from_value(serde_json::json!({
            "id": "65a1f",
            "nombre": "Empty",
            "descripcion": null,
            "canciones": null
        }))
        .unwrap();

        assert_eq!(playlist.id, Some(RemoteId::Text("65a1f".into())));
        assert!(playlist.description.is_none());
        assert!(playlist.songs.is_empty());
        assert_eq!(playlist.description_text(), "");
    }

    #[test]
    fn content_comparison_ignores_id() {
        let mut a = Playlist::new("Focus").with_description("");
        a.id = Some(RemoteId::Number(1));
        let b = Playlist::new("Focus");

        assert_ne!(a, b);
        assert!(a.same_content(&b));
        assert!(!a.same_content(&Playlist::new("Other")));
    }
}
