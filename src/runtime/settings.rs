use crate::cli::Cli;
use crate::config::{self, SourceKind};

pub fn load_settings() -> config::Settings {
    match config::Settings::load() {
        Ok(s) => {
            if let Err(msg) = s.validate() {
                eprintln!("tandas: invalid config, using defaults: {msg}");
                config::Settings::default()
            } else {
                s
            }
        }
        Err(e) => {
            // Config is optional; failures should not prevent the app from starting.
            eprintln!("tandas: failed to load config, using defaults: {e}");
            config::Settings::default()
        }
    }
}

/// Apply command line flags on top of loaded settings.
pub fn apply_cli(settings: &mut config::Settings, cli: &Cli) {
    if let Some(interval) = cli.interval {
        settings.poll.interval_secs = interval;
    }
    if let Some(offset) = cli.time_offset {
        settings.poll.time_offset_secs = offset;
    }
    if let Some(dj) = &cli.dj {
        settings.display.dj = Some(dj.clone());
    }
    if let Some(output) = cli.output {
        settings.display.output = output;
    }
    if let Some(kind) = cli.source {
        settings.source.kind = kind;
    }
    if let Some(player) = &cli.player {
        match settings.source.kind {
            SourceKind::AppleMusic => settings.source.app_name = player.clone(),
            SourceKind::Mpris => settings.source.mpris_player = Some(player.clone()),
        }
    }
}

/// DJ name for the elapsed time line: configured name, then the login name.
pub fn dj_name(settings: &config::Settings) -> String {
    settings
        .display
        .dj
        .clone()
        .filter(|s| !s.trim().is_empty())
        .or_else(|| std::env::var("USER").ok())
        .or_else(|| std::env::var("USERNAME").ok())
        .unwrap_or_else(|| "unknown".to_string())
}
