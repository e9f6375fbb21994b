//! Bot configuration: defaults, optional TOML file, then process environment.
//!
//! | Key / Env | Default | Description |
//! |-----------|---------|-------------|
//! | DISCORD_TOKEN | (required) | Platform login token. |
//! | OPENAI_API_KEY | (required) | Completion provider key. |
//! | GUILD_ID | (required) | The one community the bot serves. |
//! | MEMBER_ROLE_ID | 1431482088002945264 | Role granted to new members. |
//! | PROPOSALS_CHANNEL_ID | 1431482627218608191 | Where `/submit` ideas are copied. |
//! | COMPLETION_BASE_URL | https://api.openai.com/v1 | OpenAI-compatible endpoint. |
//! | COMPLETION_MODEL | gpt-4o-mini | |
//! | COMPLETION_MAX_TOKENS | 500 | |
//! | COMPLETION_TEMPERATURE | 0.7 | |
//! | ACTIVITY | DRP Community | "Watching" presence text. |
//!
//! The file is `ELDERCORE_CONFIG` if set, else `config/eldercore.toml`; it is optional.

use std::fmt;
use std::path::Path;

use serde::Deserialize;

use crate::completion::{DEFAULT_API_BASE, DEFAULT_MAX_TOKENS, DEFAULT_MODEL, DEFAULT_TEMPERATURE};
use crate::error::ConfigError;

pub const DEFAULT_CONFIG_PATH: &str = "config/eldercore.toml";
pub const DEFAULT_MEMBER_ROLE_ID: &str = "1431482088002945264";
pub const DEFAULT_PROPOSALS_CHANNEL_ID: &str = "1431482627218608191";
pub const DEFAULT_ACTIVITY: &str = "DRP Community";

#[derive(Clone, Deserialize)]
pub struct BotConfig {
    #[serde(default)]
    pub discord_token: String,
    #[serde(default)]
    pub openai_api_key: String,
    #[serde(default)]
    pub guild_id: String,
    pub member_role_id: String,
    pub proposals_channel_id: String,
    pub completion_base_url: String,
    pub completion_model: String,
    pub completion_max_tokens: u32,
    pub completion_temperature: f32,
    pub activity: String,
}

impl fmt::Debug for BotConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BotConfig")
            .field("discord_token", &"<redacted>")
            .field("openai_api_key", &"<redacted>")
            .field("guild_id", &self.guild_id)
            .field("member_role_id", &self.member_role_id)
            .field("proposals_channel_id", &self.proposals_channel_id)
            .field("completion_base_url", &self.completion_base_url)
            .field("completion_model", &self.completion_model)
            .field("completion_max_tokens", &self.completion_max_tokens)
            .field("completion_temperature", &self.completion_temperature)
            .field("activity", &self.activity)
            .finish()
    }
}

impl BotConfig {
    /// Load from `ELDERCORE_CONFIG` (or the default path) and the environment.
    pub fn load() -> Result<Self, ConfigError> {
        let path = std::env::var("ELDERCORE_CONFIG").unwrap_or_else(|_| DEFAULT_CONFIG_PATH.to_string());
        Self::load_from(Path::new(&path))
    }

    /// Load with an explicit file path; a missing file is skipped.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let builder = config::Config::builder()
            .set_default("member_role_id", DEFAULT_MEMBER_ROLE_ID)?
            .set_default("proposals_channel_id", DEFAULT_PROPOSALS_CHANNEL_ID)?
            .set_default("completion_base_url", DEFAULT_API_BASE)?
            .set_default("completion_model", DEFAULT_MODEL)?
            .set_default("completion_max_tokens", i64::from(DEFAULT_MAX_TOKENS))?
            .set_default("completion_temperature", f64::from(DEFAULT_TEMPERATURE))?
            .set_default("activity", DEFAULT_ACTIVITY)?;

        let builder = if path.exists() {
            builder.add_source(config::File::from(path))
        } else {
            builder
        };

        let built = builder.add_source(config::Environment::default()).build()?;
        let cfg: Self = built.try_deserialize()?;
        cfg.validate()
    }

    fn validate(self) -> Result<Self, ConfigError> {
        if self.discord_token.trim().is_empty() {
            return Err(ConfigError::Missing("DISCORD_TOKEN"));
        }
        if self.openai_api_key.trim().is_empty() {
            return Err(ConfigError::Missing("OPENAI_API_KEY"));
        }
        if self.guild_id.trim().is_empty() {
            return Err(ConfigError::Missing("GUILD_ID"));
        }
        Ok(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_config(body: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::Builder::new()
            .suffix(".toml")
            .tempfile()
            .expect("tempfile");
        file.write_all(body.as_bytes()).expect("write config");
        file
    }

    #[test]
    fn file_values_and_defaults() {
        let file = write_config(
            r#"
discord_token = "token"
openai_api_key = "sk-file"
guild_id = "42"
proposals_channel_id = "7"
"#,
        );
        let cfg = BotConfig::load_from(file.path()).expect("load");
        assert_eq!(cfg.guild_id, "42");
        assert_eq!(cfg.proposals_channel_id, "7");
        assert_eq!(cfg.member_role_id, DEFAULT_MEMBER_ROLE_ID);
        assert_eq!(cfg.completion_model, DEFAULT_MODEL);
        assert_eq!(cfg.completion_max_tokens, 500);
        assert_eq!(cfg.activity, DEFAULT_ACTIVITY);
    }

    #[test]
    fn missing_guild_is_rejected() {
        let file = write_config(
            r#"
discord_token = "token"
openai_api_key = "sk-file"
guild_id = "  "
"#,
        );
        match BotConfig::load_from(file.path()) {
            Err(ConfigError::Missing(key)) => assert_eq!(key, "GUILD_ID"),
            other => panic!("expected missing GUILD_ID, got {other:?}"),
        }
    }

    #[test]
    fn debug_redacts_secrets() {
        let file = write_config(
            r#"
discord_token = "super-secret-token"
openai_api_key = "sk-secret"
guild_id = "42"
"#,
        );
        let cfg = BotConfig::load_from(file.path()).expect("load");
        let shown = format!("{cfg:?}");
        assert!(!shown.contains("super-secret-token"));
        assert!(!shown.contains("sk-secret"));
        assert!(shown.contains("42"));
    }
}
