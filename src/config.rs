//! Command-line configuration

use crate::player::DEFAULT_TICK_MS;
use clap::{Parser, ValueEnum};
use rustc_hash::FxHashMap;
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(name = "cstepper")]
#[command(about = "Step through small C teaching examples line by line", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Built-in example to open
    #[arg(default_value = crate::catalog::currency::ID)]
    pub example: String,

    /// Load a custom example definition (JSON) instead of a built-in one
    #[arg(long, value_name = "FILE")]
    pub custom: Option<PathBuf>,

    /// Input value for the example, e.g. --input dollars=250
    #[arg(long = "input", short = 'i', value_name = "KEY=VALUE", value_parser = parse_key_value)]
    pub inputs: Vec<(String, String)>,

    /// Use defaults for inputs not given with --input instead of prompting
    #[arg(long)]
    pub no_prompt: bool,

    /// Milliseconds between steps while playing
    #[arg(long, default_value_t = DEFAULT_TICK_MS, value_parser = clap::value_parser!(u64).range(1..))]
    pub speed: u64,

    /// List the built-in examples and exit
    #[arg(long)]
    pub list: bool,

    /// Print the resolved trace as JSON and exit
    #[arg(long)]
    pub dump_trace: bool,

    /// Write logs to this file (the terminal belongs to the UI)
    #[arg(long, value_name = "PATH")]
    pub log_file: Option<PathBuf>,

    /// Log verbosity when --log-file is set
    #[arg(long, value_enum, default_value = "info")]
    pub log_level: LogLevel,
}

impl Cli {
    /// Inputs given on the command line, later flags winning
    pub fn provided_inputs(&self) -> FxHashMap<String, String> {
        self.inputs.iter().cloned().collect()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl From<LogLevel> for tracing::Level {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Error => tracing::Level::ERROR,
            LogLevel::Warn => tracing::Level::WARN,
            LogLevel::Info => tracing::Level::INFO,
            LogLevel::Debug => tracing::Level::DEBUG,
            LogLevel::Trace => tracing::Level::TRACE,
        }
    }
}

fn parse_key_value(s: &str) -> Result<(String, String), String> {
    let (key, value) = s
        .split_once('=')
        .ok_or_else(|| format!("expected KEY=VALUE, got '{}'", s))?;
    let key = key.trim();
    if key.is_empty() {
        return Err(format!("missing key in '{}'", s));
    }
    Ok((key.to_string(), value.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let cli = Cli::try_parse_from(["cstepper"]).unwrap();
        assert_eq!(cli.example, "currency-converter");
        assert_eq!(cli.speed, DEFAULT_TICK_MS);
        assert!(cli.inputs.is_empty());
        assert_eq!(cli.log_level, LogLevel::Info);
    }

    #[test]
    fn repeated_inputs() {
        let cli = Cli::try_parse_from([
            "cstepper",
            "test-average",
            "--input",
            "numTests=2",
            "-i",
            "grades=90, 80",
            "-i",
            "numTests=4",
        ])
        .unwrap();
        let provided = cli.provided_inputs();
        assert_eq!(provided["numTests"], "4");
        assert_eq!(provided["grades"], "90, 80");
    }

    #[test]
    fn rejects_zero_speed_and_bad_inputs() {
        assert!(Cli::try_parse_from(["cstepper", "--speed", "0"]).is_err());
        assert!(Cli::try_parse_from(["cstepper", "--input", "novalue"]).is_err());
        assert!(Cli::try_parse_from(["cstepper", "--input", "=3"]).is_err());
    }
}
