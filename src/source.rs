//! Access to the external player's queue.
//!
//! A [`QueueSource`] hands out the raw field lists of the active queue and
//! the record that is playing right now. Backends clean every field before
//! returning it; the tanda core never sees raw player output.

mod apple_music;
mod mpris;

use thiserror::Error;

use crate::config::{SourceKind, SourceSettings};
use crate::tanda::TrackRecord;

pub use apple_music::AppleMusicSource;
pub use mpris::MprisSource;

#[derive(Error, Debug)]
pub enum SourceError {
    /// The player could not be reached or reported nothing to show.
    #[error("player unavailable: {0}")]
    Unavailable(String),
    /// The player answered with something we could not parse.
    #[error("unexpected player output: {0}")]
    Malformed(String),
}

/// Parallel field lists of the active queue, in playback order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawQueue {
    pub titles: Vec<String>,
    pub artists: Vec<String>,
    pub genres: Vec<String>,
}

pub trait QueueSource {
    /// Short human readable name for logs.
    fn name(&self) -> &str;

    fn fetch_queue(&mut self) -> Result<RawQueue, SourceError>;

    fn fetch_current(&mut self) -> Result<TrackRecord, SourceError>;
}

/// Build the backend selected in `settings`.
pub fn from_settings(settings: &SourceSettings) -> Box<dyn QueueSource> {
    match settings.kind {
        SourceKind::AppleMusic => Box::new(AppleMusicSource::new(&settings.app_name)),
        SourceKind::Mpris => Box::new(MprisSource::new(settings.mpris_player.clone())),
    }
}

/// Strip embedded line breaks and surrounding whitespace from a player field.
pub fn clean_field(raw: &str) -> String {
    raw.replace(['\n', '\r'], "").trim().to_string()
}
