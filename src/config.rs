//! Command-line configuration for the terminal host.

use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;
use thiserror::Error;

pub const MIN_FPS: u32 = 1;
pub const MAX_FPS: u32 = 240;

#[derive(Parser, Debug)]
#[command(name = "space_invaders")]
#[command(about = "Hold off a descending alien formation from behind four barriers")]
pub struct Args {
    /// Simulation ticks per second
    #[arg(long, default_value_t = 60)]
    pub fps: u32,

    /// Seed for the random draw stream (fresh entropy when omitted)
    #[arg(long)]
    pub seed: Option<u64>,

    /// File that receives log output
    #[arg(long, default_value = "space_invaders.log")]
    pub log_file: PathBuf,

    /// Ring the terminal bell for sound effects
    #[arg(long)]
    pub bell: bool,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("frame rate {fps} is outside {min}..={max}", min = MIN_FPS, max = MAX_FPS)]
    FpsOutOfRange { fps: u32 },
}

/// Validated host settings.
#[derive(Debug, Clone)]
pub struct Config {
    pub frame: Duration,
    pub seed: Option<u64>,
    pub log_file: PathBuf,
    pub bell: bool,
}

impl Args {
    pub fn into_config(self) -> Result<Config, ConfigError> {
        if !(MIN_FPS..=MAX_FPS).contains(&self.fps) {
            return Err(ConfigError::FpsOutOfRange { fps: self.fps });
        }
        Ok(Config {
            frame: Duration::from_secs_f64(1.0 / f64::from(self.fps)),
            seed: self.seed,
            log_file: self.log_file,
            bell: self.bell,
        })
    }
}
