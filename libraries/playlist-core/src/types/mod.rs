mod draft;
mod lenient;
mod playlist;
mod song;

pub use draft::Draft;
pub use playlist::{Playlist, RemoteId};
pub use song::{Song, SongField};
