use thiserror::Error;

/// The three field lists reported by the player do not line up.
///
/// Usually a title, artist or genre contains the separator the player output
/// was split on, so every later entry is shifted.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error(
    "please check your playlist: {titles} tracks, {artists} artists, {genres} genres \
     (a field containing the list separator is the usual cause)"
)]
pub struct InconsistentFieldCount {
    pub titles: usize,
    pub artists: usize,
    pub genres: usize,
}

/// No cortina closes a tanda after the current track, or the current track
/// is not in the queue at all.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
#[error("no tanda around the current track")]
pub struct UndefinedCurrentTanda;
