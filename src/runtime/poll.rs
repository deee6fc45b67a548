//! One poll pass: fetch, normalize, segment, compare.

use std::time::{Duration, Instant};

use crate::source::QueueSource;
use crate::tanda::{self, PlaybackState, Tanda, TrackRecord};

/// State carried from one poll to the next.
#[derive(Debug, Clone)]
pub struct PollContext {
    pub start_time: Instant,
    /// Added to the time since `start_time` when showing the elapsed time.
    pub time_offset: Duration,
    /// Current tanda of the last successful pass.
    pub previous_tanda: Option<Tanda>,
    /// Playing record of the last successful pass.
    pub previous_track: Option<TrackRecord>,
}

impl PollContext {
    pub fn new(time_offset: Duration) -> Self {
        Self {
            start_time: Instant::now(),
            time_offset,
            previous_tanda: None,
            previous_track: None,
        }
    }

    pub fn elapsed(&self) -> Duration {
        self.start_time.elapsed() + self.time_offset
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PollOutcome {
    /// The current tanda differs from the one shown last time.
    Changed(PlaybackState),
    /// Same current tanda, but another record of it is playing.
    Moved(PlaybackState),
    /// Same current tanda and same playing record as last time.
    Unchanged(PlaybackState),
    /// Nothing usable this cycle.
    Skipped(String),
}

/// Run one pass against `source`. Errors never escape: they turn into
/// [`PollOutcome::Skipped`] and leave `ctx` untouched.
pub fn poll_once(source: &mut dyn QueueSource, mut ctx: PollContext) -> (PollContext, PollOutcome) {
    let raw = match source.fetch_queue() {
        Ok(raw) => raw,
        Err(e) => {
            tracing::warn!(source = source.name(), error = %e, "failed to fetch queue");
            return (ctx, PollOutcome::Skipped(e.to_string()));
        }
    };
    let current = match source.fetch_current() {
        Ok(track) => track,
        Err(e) => {
            tracing::warn!(source = source.name(), error = %e, "failed to fetch current track");
            return (ctx, PollOutcome::Skipped(e.to_string()));
        }
    };

    let titles = raw.titles.clone();
    let queue = match tanda::normalize(raw.titles, raw.artists, raw.genres) {
        Ok(queue) => queue,
        Err(e) => {
            tracing::warn!(error = %e, "inconsistent playlist");
            for (idx, title) in titles.iter().enumerate() {
                tracing::debug!(idx, title = %title, "playlist entry");
            }
            return (ctx, PollOutcome::Skipped(e.to_string()));
        }
    };

    let state = match tanda::segment(&queue, &current) {
        Ok(state) => state,
        Err(e) => {
            tracing::debug!(track = %current.title, queue_len = queue.len(), "{e}");
            return (ctx, PollOutcome::Skipped(e.to_string()));
        }
    };

    if tanda::has_changed(ctx.previous_tanda.as_deref(), &state.current_tanda) {
        tracing::info!(
            first = %state.current_tanda.first().map(|t| t.title.as_str()).unwrap_or_default(),
            tracks = state.current_tanda.len(),
            "current tanda changed"
        );
        ctx.previous_tanda = Some(state.current_tanda.clone());
        ctx.previous_track = Some(state.current_track.clone());
        (ctx, PollOutcome::Changed(state))
    } else if ctx.previous_track.as_ref() != Some(&state.current_track) {
        tracing::debug!(track = %state.current_track.title, "playing record moved");
        ctx.previous_track = Some(state.current_track.clone());
        (ctx, PollOutcome::Moved(state))
    } else {
        (ctx, PollOutcome::Unchanged(state))
    }
}
