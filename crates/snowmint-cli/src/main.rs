#![doc = include_str!("../README.md")]

mod commands;
mod config;
mod telemetry;

use clap::Parser;
use config::{AppConfig, CliArgs, ClockKind};
use snowmint::{MonotonicClock, SnowflakeGenerator};
use std::io::{BufWriter, Write};

fn main() -> anyhow::Result<()> {
    // Load from .env
    let _ = dotenvy::dotenv();
    let args = CliArgs::parse();
    let config = AppConfig::try_from(args)?;

    telemetry::init_telemetry()?;
    tracing::debug!("Starting with config: {:#?}", config);

    let stdout = std::io::stdout();
    let mut out = BufWriter::new(stdout.lock());

    match config.clock {
        ClockKind::System => {
            let generator = SnowflakeGenerator::with_epoch(config.node_id, config.epoch);
            commands::run(&config, &generator, &mut out)?;
        }
        ClockKind::Monotonic => {
            let generator =
                SnowflakeGenerator::with_clock(config.node_id, config.epoch, MonotonicClock::new());
            commands::run(&config, &generator, &mut out)?;
        }
    }

    out.flush()?;
    Ok(())
}
