use std::env;
use std::time::Duration;

use chrono_tz::Tz;
use eyre::{Result, eyre};
use tracing::Level;

/// Configuration for the poller daemon.
///
/// This struct contains all the parameters the daemon needs: the Telegram
/// bot token for delivery, the database connection, and the pacing knobs
/// for polling and sending.
#[derive(Debug, Clone)]
pub struct PollerConfig {
    /// Telegram bot token (required)
    pub bot_token: String,
    /// Database connection URL (required)
    pub database_url: String,
    /// How often a poll cycle runs (defaults to 180 seconds)
    pub poll_interval: Duration,
    /// Per-subscriber bound on one provider fetch (defaults to 25 seconds)
    pub fetch_timeout: Duration,
    /// Advisory pause between outbound sends (defaults to 50 ms)
    pub send_delay: Duration,
    /// Timezone the feeds publish against (defaults to Europe/Kyiv)
    pub timezone: Tz,
    /// Log level for the daemon (defaults to info)
    pub log_level: Level,
}

impl PollerConfig {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        let bot_token = env::var("BOT_TOKEN")
            .map_err(|_| eyre!("BOT_TOKEN environment variable not set"))?;

        let database_url = env::var("DATABASE_URL")
            .map_err(|_| eyre!("DATABASE_URL environment variable not set"))?;

        let poll_interval = Duration::from_secs(parse_var("POLL_SECONDS", 180)?);
        let fetch_timeout = Duration::from_secs(parse_var("FETCH_TIMEOUT_SECONDS", 25)?);
        let send_delay = Duration::from_millis(parse_var("SEND_DELAY_MS", 50)?);

        let timezone = env::var("TIMEZONE")
            .unwrap_or_else(|_| "Europe/Kyiv".to_string())
            .parse::<Tz>()
            .map_err(|e| eyre!("Invalid TIMEZONE value: {e}"))?;

        let log_level = match env::var("LOG_LEVEL")
            .unwrap_or_else(|_| "info".to_string())
            .as_str()
        {
            "trace" => Level::TRACE,
            "debug" => Level::DEBUG,
            "info" => Level::INFO,
            "warn" => Level::WARN,
            "error" => Level::ERROR,
            _ => Level::INFO,
        };

        Ok(Self {
            bot_token,
            database_url,
            poll_interval,
            fetch_timeout,
            send_delay,
            timezone,
            log_level,
        })
    }
}

fn parse_var(name: &str, default: u64) -> Result<u64> {
    match env::var(name) {
        Ok(raw) => raw.parse().map_err(|_| eyre!("{name} must be a number")),
        Err(_) => Ok(default),
    }
}
