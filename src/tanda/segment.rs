use super::error::UndefinedCurrentTanda;
use super::model::{PlaybackState, Tanda, TrackRecord};

/// Locate the tanda containing `current` and the tanda after it.
///
/// The current tanda ends with the first cortina at or after the first
/// occurrence of `current`. Groups closed before that point are dropped
/// together with their cortina. The next tanda runs from the record after
/// the closing cortina up to and including the following cortina, or to the
/// end of the queue.
pub fn segment(
    queue: &[TrackRecord],
    current: &TrackRecord,
) -> Result<PlaybackState, UndefinedCurrentTanda> {
    let mut working: Tanda = Vec::new();
    let mut seen_current = false;
    let mut closed_at = None;

    for (idx, record) in queue.iter().enumerate() {
        if !seen_current && record == current {
            seen_current = true;
        }

        if record.is_cortina() {
            if seen_current {
                working.push(record.clone());
                closed_at = Some(idx);
                break;
            }
            working.clear();
            continue;
        }

        working.push(record.clone());
    }

    let closed_at = closed_at.ok_or(UndefinedCurrentTanda)?;

    let mut next_tanda: Tanda = Vec::new();
    for record in &queue[closed_at + 1..] {
        next_tanda.push(record.clone());
        if record.is_cortina() {
            break;
        }
    }

    Ok(PlaybackState {
        current_tanda: working,
        next_tanda,
        current_track: current.clone(),
    })
}
