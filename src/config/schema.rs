use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Top-level settings loaded from `config.toml`.
///
/// File format: TOML
/// Default path (Linux/XDG): `$XDG_CONFIG_HOME/tandas/config.toml` or `~/.config/tandas/config.toml`
///
/// Precedence (highest wins):
/// 1) Command line flags (applied by the runtime)
/// 2) Environment variables (prefix `TANDAS__`, `__` as nested separator)
/// 3) Config file (if present)
/// 4) Struct defaults
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct Settings {
    pub poll: PollSettings,
    pub source: SourceSettings,
    pub display: DisplaySettings,
    pub log: LogSettings,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct PollSettings {
    /// Seconds between two looks at the player queue. Must be >= 1.
    pub interval_secs: u64,
    /// Seconds added to the elapsed time shown under the tandas, for when
    /// the milonga started before this program did.
    pub time_offset_secs: u64,
}

impl Default for PollSettings {
    fn default() -> Self {
        Self {
            interval_secs: 1,
            time_offset_secs: 0,
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct SourceSettings {
    /// Which player backend to read the queue from.
    pub kind: SourceKind,
    /// Application scripted through `osascript` (`Music`, or `iTunes` on old macOS).
    pub app_name: String,
    /// MPRIS bus name of the player. Short names such as `rhythmbox` are
    /// expanded to `org.mpris.MediaPlayer2.rhythmbox`. When unset, the first
    /// player on the session bus that exposes a track list is used.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mpris_player: Option<String>,
}

impl Default for SourceSettings {
    fn default() -> Self {
        Self {
            kind: SourceKind::default(),
            app_name: "Music".to_string(),
            mpris_player: None,
        }
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, Deserialize, Serialize, clap::ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum SourceKind {
    #[serde(alias = "apple_music", alias = "music", alias = "itunes", alias = "osascript")]
    AppleMusic,
    Mpris,
}

impl Default for SourceKind {
    fn default() -> Self {
        if cfg!(target_os = "macos") {
            Self::AppleMusic
        } else {
            Self::Mpris
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct DisplaySettings {
    pub output: OutputMode,
    /// Name shown on the elapsed time line. Falls back to `$USER`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dj: Option<String>,
    /// CSS file embedded into the page in `html` mode.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stylesheet: Option<PathBuf>,
}

impl Default for DisplaySettings {
    fn default() -> Self {
        Self {
            output: OutputMode::Tui,
            dj: None,
            stylesheet: None,
        }
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, Deserialize, Serialize, clap::ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum OutputMode {
    /// Full-screen terminal view.
    Tui,
    /// Clear the screen and print colored text on every change.
    #[serde(alias = "ansi", alias = "plain")]
    Text,
    /// Print an HTML page on every change.
    Html,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct LogSettings {
    /// `tracing` filter directive. `RUST_LOG` wins when set.
    pub filter: String,
    /// Log file. Defaults to `$XDG_STATE_HOME/tandas/tandas.log`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file: Option<PathBuf>,
}

impl Default for LogSettings {
    fn default() -> Self {
        Self {
            filter: "info".to_string(),
            file: None,
        }
    }
}
