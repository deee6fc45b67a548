use std::io;

use anyhow::{Context, Result};
use crossterm::execute;
use crossterm::terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode};
use ratatui::{Terminal, backend::CrosstermBackend};

use crate::cli::Cli;
use crate::config::OutputMode;
use crate::source;

mod event_loop;
mod logging;
mod poll;
mod settings;
mod stream;

pub fn run(cli: Cli) -> Result<()> {
    let mut settings = settings::load_settings();
    settings::apply_cli(&mut settings, &cli);

    if cli.print_config {
        let text = settings
            .to_toml()
            .context("Failed to serialize settings")?;
        print!("{text}");
        return Ok(());
    }

    let log_path = logging::init(&settings.log)?;
    // Print log path to stderr so the operator can tail it.
    eprintln!("tandas log: {}", log_path.display());

    tracing::info!(
        source = ?settings.source.kind,
        output = ?settings.display.output,
        interval_secs = settings.poll.interval_secs,
        "tandas starting"
    );

    let mut source = source::from_settings(&settings.source);
    let dj = settings::dj_name(&settings);

    match settings.display.output {
        OutputMode::Tui => {
            enable_raw_mode().context("Failed to enable raw mode")?;
            let mut stdout = io::stdout();
            execute!(stdout, EnterAlternateScreen).context("Failed to enter alternate screen")?;
            let backend = CrosstermBackend::new(stdout);
            let mut terminal = Terminal::new(backend).context("Failed to create terminal")?;

            let run_result = event_loop::run(&mut terminal, source.as_mut(), &settings, &dj);

            disable_raw_mode().ok();
            execute!(terminal.backend_mut(), LeaveAlternateScreen).ok();
            terminal.show_cursor().ok();

            run_result
        }
        OutputMode::Text => stream::run(
            &mut io::stdout().lock(),
            source.as_mut(),
            &settings.poll,
            &dj,
            &stream::StreamFormat::Text,
        ),
        OutputMode::Html => {
            let stylesheet = stream::load_stylesheet(&settings.display);
            stream::run(
                &mut io::stdout().lock(),
                source.as_mut(),
                &settings.poll,
                &dj,
                &stream::StreamFormat::Html { stylesheet },
            )
        }
    }
}

#[cfg(test)]
mod tests;
