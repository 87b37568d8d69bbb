use crate::errors::ConfigError;
use chrono::{FixedOffset, Offset, Utc};
use std::{env, str::FromStr, time::Duration};

pub const DEFAULT_API_BASE_URL: &str = "https://api-web.nhle.com/v1";
pub const DEFAULT_LOGO_BASE_URL: &str = "https://assets.nhle.com/logos/nhl/svg";

/// Runtime settings, read once from the environment at startup.
#[derive(Debug, Clone)]
pub struct Settings {
    pub port: u16,
    pub api_base_url: String,
    pub api_timeout: Duration,
    pub logo_base_url: String,
    /// Offset used to print scheduled start times. The NHL schedule is in UTC.
    pub display_utc_offset_hours: i32,
    pub leaders_limit: usize,
    pub auto_refresh_secs: u64,
    pub auto_refresh_on_load: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            port: 8080,
            api_base_url: DEFAULT_API_BASE_URL.to_owned(),
            api_timeout: Duration::from_secs(10),
            logo_base_url: DEFAULT_LOGO_BASE_URL.to_owned(),
            display_utc_offset_hours: -5,
            leaders_limit: 25,
            auto_refresh_secs: 60,
            auto_refresh_on_load: false,
        }
    }
}

impl Settings {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let defaults = Self::default();
        let non_empty = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());

        let display_utc_offset_hours = parse_or(
            "DISPLAY_UTC_OFFSET_HOURS",
            non_empty("DISPLAY_UTC_OFFSET_HOURS"),
            defaults.display_utc_offset_hours,
        )?;
        if !(-12..=14).contains(&display_utc_offset_hours) {
            return Err(ConfigError::Invalid {
                key: "DISPLAY_UTC_OFFSET_HOURS",
                value: display_utc_offset_hours.to_string(),
                reason: "must be between -12 and 14".to_owned(),
            });
        }

        let auto_refresh_secs = parse_or(
            "AUTO_REFRESH_SECS",
            non_empty("AUTO_REFRESH_SECS"),
            defaults.auto_refresh_secs,
        )?;
        if auto_refresh_secs == 0 {
            return Err(ConfigError::Invalid {
                key: "AUTO_REFRESH_SECS",
                value: "0".to_owned(),
                reason: "interval must be at least one second".to_owned(),
            });
        }

        Ok(Self {
            port: parse_or("PORT", non_empty("PORT"), defaults.port)?,
            api_base_url: non_empty("NHL_API_BASE_URL")
                .map(|url| url.trim().trim_end_matches('/').to_owned())
                .unwrap_or(defaults.api_base_url),
            api_timeout: Duration::from_secs(parse_or(
                "NHL_API_TIMEOUT_SECS",
                non_empty("NHL_API_TIMEOUT_SECS"),
                defaults.api_timeout.as_secs(),
            )?),
            logo_base_url: non_empty("NHL_LOGO_BASE_URL")
                .map(|url| url.trim().trim_end_matches('/').to_owned())
                .unwrap_or(defaults.logo_base_url),
            display_utc_offset_hours,
            leaders_limit: parse_or("LEADERS_LIMIT", non_empty("LEADERS_LIMIT"), defaults.leaders_limit)?,
            auto_refresh_secs,
            auto_refresh_on_load: parse_or(
                "AUTO_REFRESH",
                non_empty("AUTO_REFRESH"),
                defaults.auto_refresh_on_load,
            )?,
        })
    }

    pub fn display_offset(&self) -> FixedOffset {
        FixedOffset::east_opt(self.display_utc_offset_hours * 3600).unwrap_or_else(|| Utc.fix())
    }
}

fn parse_or<T>(key: &'static str, raw: Option<String>, default: T) -> Result<T, ConfigError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    match raw {
        None => Ok(default),
        Some(value) => value.trim().parse().map_err(|err: T::Err| ConfigError::Invalid {
            key,
            reason: err.to_string(),
            value,
        }),
    }
}
