/// Command-line argument types
use playlist_core::{Song, SongField};
use std::str::FromStr;

/// A song given as `title|artist|album|year|genre`.
///
/// Trailing fields may be left out and are then empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SongArg(pub Song);

impl FromStr for SongArg {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let parts: Vec<&str> = s.split('|').map(str::trim).collect();
        if parts.len() > SongField::ALL.len() {
            return Err(format!(
                "expected at most {} fields (title|artist|album|year|genre), got {}",
                SongField::ALL.len(),
                parts.len()
            ));
        }

        let mut song = Song::empty();
        for (field, value) in SongField::ALL.into_iter().zip(parts) {
            song.set_field(field, value);
        }
        Ok(SongArg(song))
    }
}
