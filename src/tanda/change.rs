use super::model::TrackRecord;

/// Whether `current` differs from the tanda shown last time.
///
/// With no previous tanda there is always something new to show.
pub fn has_changed(previous: Option<&[TrackRecord]>, current: &[TrackRecord]) -> bool {
    match previous {
        Some(prev) => prev != current,
        None => true,
    }
}
