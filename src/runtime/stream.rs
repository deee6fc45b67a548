use std::io::Write;
use std::thread;
use std::time::Duration;

use anyhow::Result;

use crate::config;
use crate::render::{self, View};
use crate::runtime::poll::{PollContext, PollOutcome, poll_once};
use crate::source::QueueSource;

pub enum StreamFormat {
    /// Clear the screen and print ANSI text.
    Text,
    /// Print a full HTML page styled with the given CSS.
    Html { stylesheet: String },
}

/// Print the tandas to `out` whenever the current tanda or the playing
/// record changes. Only
/// returns when writing fails (e.g. the reader closed the pipe).
pub fn run(
    out: &mut impl Write,
    source: &mut dyn QueueSource,
    poll: &config::PollSettings,
    dj: &str,
    format: &StreamFormat,
) -> Result<()> {
    let interval = Duration::from_secs(poll.interval_secs);
    let mut ctx = PollContext::new(Duration::from_secs(poll.time_offset_secs));

    loop {
        let (new_ctx, outcome) = poll_once(source, ctx);
        ctx = new_ctx;

        if let PollOutcome::Changed(state) | PollOutcome::Moved(state) = outcome {
            let view = View {
                state: &state,
                elapsed: ctx.elapsed(),
                dj,
            };
            match format {
                StreamFormat::Text => render::redraw_text(out, &view)?,
                StreamFormat::Html { stylesheet } => {
                    writeln!(out, "{}", render::render_html(&view, stylesheet))?;
                    out.flush()?;
                }
            }
        }

        thread::sleep(interval);
    }
}

/// CSS for `html` mode: the configured file, or the built-in default.
pub fn load_stylesheet(display: &config::DisplaySettings) -> String {
    let Some(path) = &display.stylesheet else {
        return render::DEFAULT_STYLESHEET.to_string();
    };
    match std::fs::read_to_string(path) {
        Ok(css) => css,
        Err(e) => {
            tracing::warn!(path = %path.display(), error = %e, "failed to read stylesheet, using default");
            render::DEFAULT_STYLESHEET.to_string()
        }
    }
}
