use std::time::{Duration, Instant};

use anyhow::Result;
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use ratatui::{Terminal, backend::CrosstermBackend};

use crate::config;
use crate::runtime::poll::{PollContext, PollOutcome, poll_once};
use crate::source::QueueSource;
use crate::tanda::PlaybackState;
use crate::ui;

/// Upper bound on how long we wait for input before redrawing the clock.
const TICK: Duration = Duration::from_millis(250);

/// Full-screen loop: poll the player every interval, redraw on every tick,
/// return when the user quits.
pub fn run(
    terminal: &mut Terminal<CrosstermBackend<std::io::Stdout>>,
    source: &mut dyn QueueSource,
    settings: &config::Settings,
    dj: &str,
) -> Result<()> {
    let interval = Duration::from_secs(settings.poll.interval_secs);
    let mut ctx = PollContext::new(Duration::from_secs(settings.poll.time_offset_secs));
    let mut state: Option<PlaybackState> = None;
    let mut status = String::new();
    let mut next_poll = Instant::now();

    loop {
        if Instant::now() >= next_poll {
            let (new_ctx, outcome) = poll_once(source, ctx);
            ctx = new_ctx;
            match outcome {
                PollOutcome::Changed(s) | PollOutcome::Moved(s) | PollOutcome::Unchanged(s) => {
                    status = format!("source: {}", source.name());
                    state = Some(s);
                }
                // Keep showing the last tanda; the player may be between songs.
                PollOutcome::Skipped(reason) => status = reason,
            }
            next_poll = Instant::now() + interval;
        }

        let elapsed = ctx.elapsed();
        terminal.draw(|f| ui::draw(f, state.as_ref(), dj, elapsed, &status))?;

        let timeout = next_poll.saturating_duration_since(Instant::now()).min(TICK);
        if event::poll(timeout)? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press && is_quit(&key) {
                    return Ok(());
                }
            }
        }
    }
}

fn is_quit(key: &KeyEvent) -> bool {
    match key.code {
        KeyCode::Char('q') | KeyCode::Esc => true,
        KeyCode::Char('c') => key.modifiers.contains(KeyModifiers::CONTROL),
        _ => false,
    }
}
