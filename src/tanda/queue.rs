use super::error::InconsistentFieldCount;
use super::model::{Queue, TrackRecord};

/// Zip the parallel field lists reported by the player into a [`Queue`].
///
/// Order is kept as-is; duplicates are kept too (a song may be queued twice).
pub fn normalize(
    titles: Vec<String>,
    artists: Vec<String>,
    genres: Vec<String>,
) -> Result<Queue, InconsistentFieldCount> {
    if titles.len() != artists.len() || titles.len() != genres.len() {
        return Err(InconsistentFieldCount {
            titles: titles.len(),
            artists: artists.len(),
            genres: genres.len(),
        });
    }

    Ok(titles
        .into_iter()
        .zip(artists)
        .zip(genres)
        .map(|((title, artist), genre)| TrackRecord {
            title,
            artist,
            genre,
        })
        .collect())
}
