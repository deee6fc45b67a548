use clap::Parser;

use crate::config::{OutputMode, SourceKind};

/// Shows the current and the next tanda of the playing queue.
///
/// Flags override the config file and `TANDAS__*` environment variables.
#[derive(Parser, Debug, Default)]
#[command(name = "tandas", version, about)]
pub struct Cli {
    /// Seconds between two looks at the player queue
    #[arg(long, short = 'i', value_parser = clap::value_parser!(u64).range(1..))]
    pub interval: Option<u64>,

    /// Seconds to add to the elapsed time (milonga started earlier)
    #[arg(long, short = 't')]
    pub time_offset: Option<u64>,

    /// DJ name shown next to the elapsed time
    #[arg(long)]
    pub dj: Option<String>,

    /// How to show the tandas
    #[arg(long, short = 'o', value_enum)]
    pub output: Option<OutputMode>,

    /// Player backend to read the queue from
    #[arg(long, short = 's', value_enum)]
    pub source: Option<SourceKind>,

    /// Application name (apple-music) or MPRIS bus name (mpris)
    #[arg(long, short = 'p')]
    pub player: Option<String>,

    /// Print the effective configuration as TOML and exit
    #[arg(long)]
    pub print_config: bool,
}
