//! Presentation helpers shared by the text, HTML and TUI outputs.
//!
//! These functions turn a [`PlaybackState`] into plain lines plus a
//! highlight tag; each output decides how a highlight looks.

mod html;
mod text;

use std::time::Duration;

use crate::tanda::{PlaybackState, TrackRecord};

pub use html::{DEFAULT_STYLESHEET, render_html};
pub use text::{redraw_text, render_text};

pub const CURRENT_HEADER: &str = "CURRENT TANDA";
pub const NEXT_HEADER: &str = "NEXT TANDA";

/// Everything one redraw needs.
pub struct View<'a> {
    pub state: &'a PlaybackState,
    pub elapsed: Duration,
    pub dj: &'a str,
}

/// How the playing record is emphasized, by genre.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Highlight {
    Tango,
    Vals,
    Milonga,
    /// Cortinas and anything that is not a dance.
    Break,
}

impl Highlight {
    pub fn for_genre(genre: &str) -> Self {
        match genre.to_lowercase().as_str() {
            "tango" => Self::Tango,
            "vals" => Self::Vals,
            "milonga" | "tango foxtrot" => Self::Milonga,
            _ => Self::Break,
        }
    }

    pub fn pad(self) -> &'static str {
        match self {
            Self::Break => "\u{2615} ",
            _ => "\u{266B} ",
        }
    }
}

/// One rendered song line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SongLine {
    pub text: String,
    pub highlight: Option<Highlight>,
}

/// Heading plus one line per record. Empty tandas produce nothing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TandaBlock {
    pub heading: String,
    pub lines: Vec<SongLine>,
}

/// Lay out `tanda` under `header`, emphasizing records equal to `highlight`.
pub fn tanda_block(
    tanda: &[TrackRecord],
    highlight: Option<&TrackRecord>,
    header: &str,
) -> Option<TandaBlock> {
    let first = tanda.first()?;
    let heading = format!("{header}: {}", title_case(&first.genre));

    let lines = tanda
        .iter()
        .map(|track| {
            let hl = highlight
                .filter(|h| *h == track)
                .map(|_| Highlight::for_genre(&track.genre));
            let pad = hl.map(Highlight::pad).unwrap_or("  ");
            SongLine {
                text: format!("{pad}{}", song_text(track)),
                highlight: hl,
            }
        })
        .collect();

    Some(TandaBlock { heading, lines })
}

/// `"artist, title"`, or `"Cortina: artist, title"` with a leading `z_`
/// dropped from the title.
pub fn song_text(track: &TrackRecord) -> String {
    if track.is_cortina() {
        let title = track.title.strip_prefix("z_").unwrap_or(&track.title);
        format!("Cortina: {}, {}", track.artist, title)
    } else {
        format!("{}, {}", track.artist, track.title)
    }
}

/// `"tango foxtrot"` -> `"Tango Foxtrot"`.
pub fn title_case(genre: &str) -> String {
    genre
        .to_lowercase()
        .split(' ')
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(c) => c.to_uppercase().chain(chars).collect(),
                None => String::new(),
            }
        })
        .collect::<Vec<String>>()
        .join(" ")
}

/// `"1 hours, 2 minutes and 3 seconds"`.
pub fn format_elapsed(elapsed: Duration) -> String {
    let secs = elapsed.as_secs();
    format!(
        "{} hours, {} minutes and {} seconds",
        secs / 3600,
        (secs % 3600) / 60,
        secs % 60
    )
}

pub fn elapsed_line(dj: &str, elapsed: Duration) -> String {
    format!("DJ {dj}: {}", format_elapsed(elapsed))
}
