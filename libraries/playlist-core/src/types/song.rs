/// Song domain types
use crate::error::DraftError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::lenient;

/// A flat record of descriptive text. Songs carry no identifier and are
/// ordered by their position inside the owning playlist.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Song {
    #[serde(rename = "titulo", default, deserialize_with = "lenient::text")]
    pub title: String,

    #[serde(rename = "artista", default, deserialize_with = "lenient::text")]
    pub artist: String,

    #[serde(default, deserialize_with = "lenient::text")]
    pub album: String,

    /// Free text, never validated as a number
    #[serde(rename = "anno", default, deserialize_with = "lenient::text")]
    pub year: String,

    #[serde(rename = "genero", default, deserialize_with = "lenient::text")]
    pub genre: String,
}

impl Song {
    /// Create a song with every field empty
    pub fn empty() -> Self {
        Self::default()
    }

    /// Create a song from its five fields, in display order
    pub fn new(
        title: impl Into<String>,
        artist: impl Into<String>,
        album: impl Into<String>,
        year: impl Into<String>,
        genre: impl Into<String>,
    ) -> Self {
        Self {
            title: title.into(),
            artist: artist.into(),
            album: album.into(),
            year: year.into(),
            genre: genre.into(),
        }
    }

    pub fn field(&self, field: SongField) -> &str {
        match field {
            SongField::Title => &self.title,
            SongField::Artist => &self.artist,
            SongField::Album => &self.album,
            SongField::Year => &self.year,
            SongField::Genre => &self.genre,
        }
    }

    pub fn set_field(&mut self, field: SongField, value: impl Into<String>) {
        let slot = match field {
            SongField::Title => &mut self.title,
            SongField::Artist => &mut self.artist,
            SongField::Album => &mut self.album,
            SongField::Year => &mut self.year,
            SongField::Genre => &mut self.genre,
        };
        *slot = value.into();
    }
}

/// Editable song attribute
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SongField {
    Title,
    Artist,
    Album,
    Year,
    Genre,
}

impl SongField {
    /// All fields in display order
    pub const ALL: [SongField; 5] = [
        SongField::Title,
        SongField::Artist,
        SongField::Album,
        SongField::Year,
        SongField::Genre,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            SongField::Title => "title",
            SongField::Artist => "artist",
            SongField::Album => "album",
            SongField::Year => "year",
            SongField::Genre => "genre",
        }
    }
}

impl fmt::Display for SongField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SongField {
    type Err = DraftError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        SongField::ALL
            .into_iter()
            .find(|field| field.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| DraftError::UnknownField(s.to_string()))
    }
}
