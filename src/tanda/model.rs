//! Track, queue and tanda types shared by the core and the renderers.

/// Genre value that marks a cortina. Compared case-sensitively.
pub const CORTINA_GENRE: &str = "Cortina";

/// One entry of the player's queue.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct TrackRecord {
    pub title: String,
    pub artist: String,
    pub genre: String,
}

impl TrackRecord {
    pub fn new(
        title: impl Into<String>,
        artist: impl Into<String>,
        genre: impl Into<String>,
    ) -> Self {
        Self {
            title: title.into(),
            artist: artist.into(),
            genre: genre.into(),
        }
    }

    /// Whether this record is a cortina (a tanda delimiter).
    pub fn is_cortina(&self) -> bool {
        self.genre == CORTINA_GENRE
    }
}

/// The queue in playback order.
pub type Queue = Vec<TrackRecord>;

/// A group of consecutive records, usually closed by a cortina.
pub type Tanda = Vec<TrackRecord>;

/// Result of one segmentation pass.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PlaybackState {
    pub current_tanda: Tanda,
    pub next_tanda: Tanda,
    pub current_track: TrackRecord,
}
