//! # tandas
//!
//! Watches the queue of a running media player and shows which tanda is
//! playing, which one comes next, and how long the milonga has been going.
//!
//! The segmentation logic lives in [`tanda`] and knows nothing about players
//! or terminals. [`source`] talks to the player, [`render`] and [`ui`] draw,
//! and [`runtime`] ties them together in a single-threaded poll loop.

mod cli;
mod config;
mod render;
mod runtime;
mod source;
mod tanda;
mod ui;

use anyhow::{Context, Result};
use clap::Parser;

fn main() -> Result<()> {
    let cli = cli::Cli::parse();
    runtime::run(cli).context("tandas stopped")
}
