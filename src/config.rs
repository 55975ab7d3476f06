use crate::error::ConfigError;
use serde::Deserialize;
use std::path::PathBuf;
use std::time::Duration;

const DEFAULT_CACHE_PATH: &str = "site.cached";
const DEFAULT_INTERVAL_HOURS: u64 = 4;

/// Environment variables as they arrive, before validation
#[derive(Debug, Deserialize)]
struct RawEnv {
    scrapfly_api_key: String,
    url: String,
    max_price: u64,
    discord_enabled: Option<String>,
    discord_token: Option<String>,
    discord_channel_id: Option<String>,
    cache_path: Option<String>,
    announce_interval_hours: Option<u64>,
}

/// Credentials and destination for announcements
#[derive(Clone)]
pub struct DiscordConfig {
    pub token: String,
    pub channel_id: String,
}

/// Everything the run needs, built once at startup
#[derive(Clone)]
pub struct AppConfig {
    pub scrapfly_api_key: String,
    pub url: String,
    pub max_price: u64,
    pub cache_path: PathBuf,
    pub announce_interval: Duration,
    /// `None` when notifications are disabled
    pub discord: Option<DiscordConfig>,
}

impl AppConfig {
    /// Load from the process environment, after an optional `.env` file
    pub fn load() -> Result<Self, ConfigError> {
        // A missing .env file is fine.
        let _ = dotenvy::dotenv();
        Self::from_raw(envy::from_env::<RawEnv>()?)
    }

    pub fn from_vars<I>(vars: I) -> Result<Self, ConfigError>
    where
        I: IntoIterator<Item = (String, String)>,
    {
        Self::from_raw(envy::from_iter::<_, RawEnv>(vars)?)
    }

    fn from_raw(raw: RawEnv) -> Result<Self, ConfigError> {
        let scrapfly_api_key = non_empty(raw.scrapfly_api_key, "SCRAPFLY_API_KEY")?;
        let url = non_empty(raw.url, "URL")?;

        let discord = if raw.discord_enabled.as_deref().is_some_and(bool_str) {
            let token = raw
                .discord_token
                .filter(|t| !t.trim().is_empty())
                .ok_or(ConfigError::MissingDiscord("DISCORD_TOKEN"))?;
            let channel_id = raw
                .discord_channel_id
                .filter(|c| !c.trim().is_empty())
                .ok_or(ConfigError::MissingDiscord("DISCORD_CHANNEL_ID"))?;
            Some(DiscordConfig { token, channel_id })
        } else {
            None
        };

        let hours = raw.announce_interval_hours.unwrap_or(DEFAULT_INTERVAL_HOURS);
        if hours == 0 {
            return Err(ConfigError::ZeroInterval);
        }

        Ok(Self {
            scrapfly_api_key,
            url,
            max_price: raw.max_price,
            cache_path: raw
                .cache_path
                .filter(|p| !p.trim().is_empty())
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from(DEFAULT_CACHE_PATH)),
            announce_interval: Duration::from_secs(hours * 60 * 60),
            discord,
        })
    }
}

fn non_empty(value: String, name: &'static str) -> Result<String, ConfigError> {
    if value.trim().is_empty() {
        Err(ConfigError::Empty(name))
    } else {
        Ok(value)
    }
}

/// Loose boolean parsing for flags like `DISCORD_ENABLED`
pub fn bool_str(value: &str) -> bool {
    matches!(
        value.trim().to_lowercase().as_str(),
        "true" | "1" | "t" | "y" | "yes"
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn vars(pairs: &[(&str, &str)]) -> Vec<(String, String)> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    const BASE: &[(&str, &str)] = &[
        ("SCRAPFLY_API_KEY", "scp-test"),
        ("URL", "https://example.com/floorplans"),
        ("MAX_PRICE", "1500"),
    ];

    #[test]
    fn minimal_environment_uses_defaults() {
        let config = AppConfig::from_vars(vars(BASE)).unwrap();
        assert_eq!(config.scrapfly_api_key, "scp-test");
        assert_eq!(config.url, "https://example.com/floorplans");
        assert_eq!(config.max_price, 1500);
        assert_eq!(config.cache_path, PathBuf::from("site.cached"));
        assert_eq!(config.announce_interval, Duration::from_secs(4 * 60 * 60));
        assert!(config.discord.is_none());
    }

    #[test]
    fn missing_required_value_fails() {
        for skip in ["SCRAPFLY_API_KEY", "URL", "MAX_PRICE"] {
            let partial: Vec<_> = BASE.iter().copied().filter(|(k, _)| *k != skip).collect();
            assert!(AppConfig::from_vars(vars(&partial)).is_err(), "{skip}");
        }
    }

    #[test]
    fn empty_required_value_fails() {
        let mut env = vars(BASE);
        env[1].1 = "  ".to_string();
        assert!(matches!(
            AppConfig::from_vars(env),
            Err(ConfigError::Empty("URL"))
        ));
    }

    #[test]
    fn non_numeric_max_price_fails() {
        let mut env = vars(BASE);
        env[2].1 = "cheap".to_string();
        assert!(matches!(AppConfig::from_vars(env), Err(ConfigError::Env(_))));
    }

    #[test]
    fn enabled_discord_requires_token_and_channel() {
        let mut env = vars(BASE);
        env.extend(vars(&[("DISCORD_ENABLED", "yes"), ("DISCORD_CHANNEL_ID", "42")]));
        assert!(matches!(
            AppConfig::from_vars(env),
            Err(ConfigError::MissingDiscord("DISCORD_TOKEN"))
        ));

        let mut env = vars(BASE);
        env.extend(vars(&[("DISCORD_ENABLED", "1"), ("DISCORD_TOKEN", "tok")]));
        assert!(matches!(
            AppConfig::from_vars(env),
            Err(ConfigError::MissingDiscord("DISCORD_CHANNEL_ID"))
        ));
    }

    #[test]
    fn enabled_discord_is_carried() {
        let mut env = vars(BASE);
        env.extend(vars(&[
            ("DISCORD_ENABLED", "True"),
            ("DISCORD_TOKEN", "tok"),
            ("DISCORD_CHANNEL_ID", "1234567890"),
        ]));
        let discord = AppConfig::from_vars(env).unwrap().discord.unwrap();
        assert_eq!(discord.token, "tok");
        assert_eq!(discord.channel_id, "1234567890");
    }

    #[test]
    fn disabled_discord_ignores_missing_credentials() {
        let mut env = vars(BASE);
        env.extend(vars(&[("DISCORD_ENABLED", "no")]));
        assert!(AppConfig::from_vars(env).unwrap().discord.is_none());
    }

    #[test]
    fn overrides_cache_path_and_interval() {
        let mut env = vars(BASE);
        env.extend(vars(&[
            ("CACHE_PATH", "/tmp/page.html"),
            ("ANNOUNCE_INTERVAL_HOURS", "12"),
        ]));
        let config = AppConfig::from_vars(env).unwrap();
        assert_eq!(config.cache_path, PathBuf::from("/tmp/page.html"));
        assert_eq!(config.announce_interval, Duration::from_secs(12 * 60 * 60));
    }

    #[test]
    fn zero_interval_is_rejected() {
        let mut env = vars(BASE);
        env.extend(vars(&[("ANNOUNCE_INTERVAL_HOURS", "0")]));
        assert!(matches!(
            AppConfig::from_vars(env),
            Err(ConfigError::ZeroInterval)
        ));
    }

    #[test]
    fn bool_str_accepts_common_truthy_spellings() {
        for yes in ["true", "TRUE", "1", "t", "y", "Yes"] {
            assert!(bool_str(yes), "{yes}");
        }
        for no in ["", "false", "0", "no", "enabled"] {
            assert!(!bool_str(no), "{no}");
        }
    }
}
