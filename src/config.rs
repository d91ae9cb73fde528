use std::env;
use std::path::PathBuf;
use teloxide::types::{ChatId, Recipient, UserId};
use thiserror::Error;
use url::Url;

pub const DEFAULT_VERCEL_API: &str = "https://api.vercel.com";
pub const DEFAULT_PREMIUM_FILE: &str = "./premium.json";

#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("expected {0}")]
    Missing(&'static str),
    #[error("{var} should be {expected}, got {value:?}")]
    Invalid {
        var: &'static str,
        expected: &'static str,
        value: String,
    },
}

#[derive(Clone, Debug)]
pub struct Settings {
    pub bot_token: String,
    pub owner: UserId,
    pub channel: Recipient,
    pub group: Recipient,
    pub channel_username: String,
    pub group_username: String,
    pub vercel_token: String,
    pub vercel_api: Url,
    pub premium_file: PathBuf,
}

impl Settings {
    /// Reads the process environment, after loading `.env` if there is one.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|var| env::var(var).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let required = |var: &'static str| {
            lookup(var).filter(|v| !v.is_empty()).ok_or(ConfigError::Missing(var))
        };

        let owner = required("OWNER_ID")?;
        let owner = owner.parse::<u64>().map_err(|_| ConfigError::Invalid {
            var: "OWNER_ID",
            expected: "u64",
            value: owner.clone(),
        })?;

        let vercel_api = lookup("VERCEL_API_URL").unwrap_or_else(|| DEFAULT_VERCEL_API.to_string());
        let vercel_api = vercel_api.parse::<Url>().map_err(|_| ConfigError::Invalid {
            var: "VERCEL_API_URL",
            expected: "valid url",
            value: vercel_api.clone(),
        })?;

        Ok(Settings {
            bot_token: required("BOT_TOKEN")?,
            owner: UserId(owner),
            channel: recipient(required("CHANNEL_ID")?),
            group: recipient(required("GROUP_ID")?),
            channel_username: required("CHANNEL_USERNAME")?,
            group_username: required("GROUP_USERNAME")?,
            vercel_token: required("VERCEL_TOKEN")?,
            vercel_api,
            premium_file: lookup("PREMIUM_FILE")
                .unwrap_or_else(|| DEFAULT_PREMIUM_FILE.to_string())
                .into(),
        })
    }
}

/// Numeric ids become chat ids, anything else (`@name`) a public username.
fn recipient(raw: String) -> Recipient {
    match raw.parse::<i64>() {
        Ok(id) => Recipient::Id(ChatId(id)),
        Err(_) => Recipient::ChannelUsername(raw),
    }
}
