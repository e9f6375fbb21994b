//! Lifecycle hooks: readiness and member join.
//!
//! Every step after the community guard is attempted independently; a failed welcome DM
//! does not stop the role grant or the ledger entry, and each result is reported.

use std::sync::Arc;

use tracing::{info, warn};

use crate::dispatcher::command_specs;
use crate::gateway::{Gateway, MemberJoin};
use crate::ledger::XpStore;
use crate::messages;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StepOutcome {
    Done,
    Skipped(String),
    Failed(String),
}

impl StepOutcome {
    pub fn is_done(&self) -> bool {
        matches!(self, StepOutcome::Done)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum JoinReport {
    /// Join belonged to another community.
    Ignored,
    Welcomed {
        welcome: StepOutcome,
        role: StepOutcome,
        ledger: StepOutcome,
    },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReadyReport {
    pub presence: StepOutcome,
    pub commands: StepOutcome,
}

pub struct LifecycleHooks {
    ledger: Arc<dyn XpStore>,
    guild_id: String,
    member_role_id: Option<String>,
    activity: String,
}

impl LifecycleHooks {
    pub fn new(ledger: Arc<dyn XpStore>, guild_id: impl Into<String>, activity: impl Into<String>) -> Self {
        Self {
            ledger,
            guild_id: guild_id.into(),
            member_role_id: None,
            activity: activity.into(),
        }
    }

    pub fn with_member_role(mut self, role_id: impl Into<String>) -> Self {
        self.member_role_id = Some(role_id.into());
        self
    }

    pub fn guild_id(&self) -> &str {
        &self.guild_id
    }

    /// Announce readiness, set presence and register slash commands.
    pub async fn on_ready(&self, gateway: &dyn Gateway, bot_tag: &str) -> ReadyReport {
        info!("✅ ElderCore is online! Logged in as {}", bot_tag);

        let presence = match gateway.set_watching(&self.activity).await {
            Ok(()) => StepOutcome::Done,
            Err(e) => {
                warn!(error = %e, "could not set presence");
                StepOutcome::Failed(e.to_string())
            }
        };

        let commands = match gateway.register_commands(&self.guild_id, &command_specs()).await {
            Ok(()) => StepOutcome::Done,
            Err(e) => {
                warn!(guild_id = %self.guild_id, error = %e, "slash command registration failed");
                StepOutcome::Failed(e.to_string())
            }
        };

        ReadyReport { presence, commands }
    }

    pub async fn on_member_join(&self, gateway: &dyn Gateway, member: &MemberJoin) -> JoinReport {
        if member.guild_id != self.guild_id {
            return JoinReport::Ignored;
        }

        let welcome = match gateway.send_direct(&member.user_id, &messages::welcome()).await {
            Ok(()) => StepOutcome::Done,
            Err(e) => {
                warn!(user_id = %member.user_id, error = %e, "welcome message not delivered");
                StepOutcome::Failed(e.to_string())
            }
        };

        let role = self.grant_member_role(gateway, member).await;

        self.ledger.initialize(&member.user_id);
        let ledger = StepOutcome::Done;

        info!(user = %member.user_tag, "✅ Welcomed {}", member.user_tag);
        JoinReport::Welcomed { welcome, role, ledger }
    }

    async fn grant_member_role(&self, gateway: &dyn Gateway, member: &MemberJoin) -> StepOutcome {
        let Some(role_id) = self.member_role_id.as_deref() else {
            return StepOutcome::Skipped("no member role configured".to_string());
        };
        match gateway.role_exists(&member.guild_id, role_id).await {
            Ok(true) => {}
            Ok(false) => {
                warn!(role_id, "member role not found, skipping grant");
                return StepOutcome::Skipped(format!("role {role_id} not found"));
            }
            Err(e) => {
                warn!(role_id, error = %e, "role lookup failed");
                return StepOutcome::Failed(e.to_string());
            }
        }
        match gateway.grant_role(&member.guild_id, &member.user_id, role_id).await {
            Ok(()) => StepOutcome::Done,
            Err(e) => {
                warn!(role_id, user_id = %member.user_id, error = %e, "role grant failed");
                StepOutcome::Failed(e.to_string())
            }
        }
    }
}
