/// Draft playlist under construction
use crate::error::DraftError;
use serde::{Deserialize, Serialize};

use super::{Song, SongField};

/// A playlist that has not been sent to the service yet.
///
/// Drafts are edited field by field and song by song, then submitted as the
/// body of a create request. Nothing here touches the network.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Draft {
    #[serde(rename = "nombre")]
    name: String,

    #[serde(rename = "descripcion")]
    description: String,

    #[serde(rename = "canciones")]
    songs: Vec<Song>,
}

impl Draft {
    /// Create an empty draft
    pub fn new() -> Self {
        Self::default()
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn songs(&self) -> &[Song] {
        &self.songs
    }

    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = name.into();
    }

    pub fn set_description(&mut self, description: impl Into<String>) {
        self.description = description.into();
    }

    /// Append an all-empty song and return its index
    pub fn append_song(&mut self) -> usize {
        self.songs.push(Song::empty());
        self.songs.len() - 1
    }

    /// Set one field of the song at `index`.
    ///
    /// An out-of-bounds index leaves the draft unchanged.
    pub fn set_song_field(
        &mut self,
        index: usize,
        field: SongField,
        value: impl Into<String>,
    ) -> Result<(), DraftError> {
        let len = self.songs.len();
        let song = self
            .songs
            .get_mut(index)
            .ok_or(DraftError::SongIndexOutOfBounds { index, len })?;
        song.set_field(field, value);
        Ok(())
    }

    /// Remove and return the song at `index`
    pub fn remove_song(&mut self, index: usize) -> Result<Song, DraftError> {
        if index >= self.songs.len() {
            return Err(DraftError::SongIndexOutOfBounds {
                index,
                len: self.songs.len(),
            });
        }
        Ok(self.songs.remove(index))
    }

    /// Check the only precondition for submission: a name that is not blank
    pub fn validate(&self) -> Result<(), DraftError> {
        if self.name.trim().is_empty() {
            return Err(DraftError::NameRequired);
        }
        Ok(())
    }

    /// True if nothing has been entered
    pub fn is_empty(&self) -> bool {
        self.name.is_empty() && self.description.is_empty() && self.songs.is_empty()
    }

    /// Discard everything
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}
