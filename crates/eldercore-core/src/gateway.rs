//! Chat-platform collaborator seams.
//!
//! The core never talks to the platform directly. The gateway adapter implements
//! [`Gateway`] for community-wide actions and [`Responder`] for the reply channel of a
//! single command invocation.

use std::collections::HashMap;

use async_trait::async_trait;

use crate::error::GatewayError;
use crate::messages::{Reply, RichMessage};

/// Inbound slash-command invocation.
#[derive(Debug, Clone, Default)]
pub struct CommandRequest {
    pub name: String,
    pub user_id: String,
    /// Display name, used as author on forwarded proposals.
    pub user_name: String,
    pub guild_id: Option<String>,
    pub options: HashMap<String, String>,
}

impl CommandRequest {
    pub fn new(name: impl Into<String>, user_id: impl Into<String>) -> Self {
        let user_id = user_id.into();
        Self {
            name: name.into(),
            user_name: user_id.clone(),
            user_id,
            ..Self::default()
        }
    }

    pub fn with_option(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.options.insert(key.into(), value.into());
        self
    }

    pub fn with_user_name(mut self, name: impl Into<String>) -> Self {
        self.user_name = name.into();
        self
    }

    pub fn with_guild(mut self, guild_id: impl Into<String>) -> Self {
        self.guild_id = Some(guild_id.into());
        self
    }

    pub fn option(&self, key: &str) -> Option<&str> {
        self.options.get(key).map(String::as_str)
    }
}

/// A member joining a community.
#[derive(Debug, Clone)]
pub struct MemberJoin {
    pub guild_id: String,
    pub user_id: String,
    pub user_tag: String,
}

/// Slash-command string option declared at registration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OptionSpec {
    pub name: &'static str,
    pub description: &'static str,
    pub required: bool,
}

/// Slash command declared at registration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandSpec {
    pub name: &'static str,
    pub description: &'static str,
    pub options: Vec<OptionSpec>,
}

/// Reply channel for one command invocation.
#[async_trait]
pub trait Responder: Send + Sync {
    /// Acknowledge now and reply later with [`Responder::edit_reply`].
    async fn acknowledge(&self) -> Result<(), GatewayError>;

    async fn reply(&self, reply: Reply) -> Result<(), GatewayError>;

    /// Replace the acknowledgment (or earlier reply).
    async fn edit_reply(&self, reply: Reply) -> Result<(), GatewayError>;
}

/// Community-wide platform operations.
#[async_trait]
pub trait Gateway: Send + Sync {
    async fn send_direct(&self, user_id: &str, message: &RichMessage) -> Result<(), GatewayError>;

    async fn send_to_channel(&self, channel_id: &str, message: &RichMessage) -> Result<(), GatewayError>;

    async fn channel_exists(&self, guild_id: &str, channel_id: &str) -> Result<bool, GatewayError>;

    async fn role_exists(&self, guild_id: &str, role_id: &str) -> Result<bool, GatewayError>;

    async fn grant_role(&self, guild_id: &str, user_id: &str, role_id: &str) -> Result<(), GatewayError>;

    /// Presence string shown as "Watching ...".
    async fn set_watching(&self, activity: &str) -> Result<(), GatewayError>;

    async fn register_commands(&self, guild_id: &str, commands: &[CommandSpec]) -> Result<(), GatewayError>;
}
