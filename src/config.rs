//! Configuration and CLI argument handling

use clap::Parser;

use crate::controller::TimerOptions;

/// CLI argument parsing structure
#[derive(Parser, Debug)]
#[command(name = "pausable-timer")]
#[command(about = "A pausable countdown/count-up timer with an HTTP control surface")]
#[command(version)]
pub struct Config {
    /// Port to bind the server to
    #[arg(short, long, default_value = "20554")]
    pub port: u16,

    /// Host address to bind to
    #[arg(long, default_value = "127.0.0.1")]
    pub host: String,

    /// Seconds to count down from, or to count up to with --count-up
    #[arg(short, long, default_value = "60")]
    pub time: u64,

    /// Count up from zero instead of down to zero
    #[arg(short, long)]
    pub count_up: bool,

    /// Start counting as soon as the server is up
    #[arg(short, long)]
    pub auto_start: bool,

    /// Enable verbose logging
    #[arg(short, long)]
    pub verbose: bool,
}

impl Config {
    /// Parse configuration from command line arguments
    pub fn parse() -> Self {
        Parser::parse()
    }

    /// Get the server address as a formatted string
    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Get the appropriate log level based on verbose flag
    pub fn log_level(&self) -> &'static str {
        if self.verbose { "debug" } else { "info" }
    }

    /// Timer options for the hosted timer
    pub fn timer_options(&self) -> TimerOptions {
        TimerOptions {
            time: i64::try_from(self.time).unwrap_or(i64::MAX),
            count_up: self.count_up,
            auto_start: self.auto_start,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = Config::try_parse_from(["pausable-timer"]).unwrap();
        assert_eq!(config.address(), "127.0.0.1:20554");
        assert_eq!(config.log_level(), "info");
        assert_eq!(config.timer_options(), TimerOptions::countdown(60));
    }

    #[test]
    fn test_count_up_flags() {
        let config =
            Config::try_parse_from(["pausable-timer", "-t", "90", "--count-up", "-a", "-v"]).unwrap();
        assert_eq!(config.timer_options(), TimerOptions::count_up(90).auto_start(true));
        assert_eq!(config.log_level(), "debug");
    }
}
