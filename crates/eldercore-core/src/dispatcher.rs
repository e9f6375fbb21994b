//! Command Dispatcher: routes slash commands to handlers.
//!
//! Handlers read or write the [`XpStore`], call the [`CompletionBridge`], and reply through
//! the invocation's [`Responder`]. A handler failure never escapes [`Dispatcher::dispatch`];
//! it is logged and turned into a generic ephemeral reply.

use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use tracing::{error, info, warn};

use crate::completion::{CompletionBridge, DEFAULT_TOPIC};
use crate::error::DispatchError;
use crate::gateway::{CommandRequest, CommandSpec, Gateway, OptionSpec, Responder};
use crate::ledger::{XpStore, SUBMIT_REWARD, VERIFY_REWARD};
use crate::messages::{self, Reply};
use crate::missions::MissionPool;

/// Rows shown by `/rank`.
pub const LEADERBOARD_SIZE: usize = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Learn,
    Daily,
    Xp,
    Rank,
    Verify,
    Submit,
}

impl Command {
    pub const ALL: [Command; 6] = [
        Command::Learn,
        Command::Daily,
        Command::Xp,
        Command::Rank,
        Command::Verify,
        Command::Submit,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Command::Learn => "learn",
            Command::Daily => "daily",
            Command::Xp => "xp",
            Command::Rank => "rank",
            Command::Verify => "verify",
            Command::Submit => "submit",
        }
    }

    /// Registration shape of this command.
    pub fn spec(self) -> CommandSpec {
        let (description, options) = match self {
            Command::Learn => (
                "Learn about DRP, blockchain, AI or rights",
                vec![OptionSpec {
                    name: "topic",
                    description: "drp, blockchain, ai or rights",
                    required: true,
                }],
            ),
            Command::Daily => ("Get a daily mission", Vec::new()),
            Command::Xp => ("Show your XP and level", Vec::new()),
            Command::Rank => ("Show the XP leaderboard", Vec::new()),
            Command::Verify => (
                "Verify a completed activity",
                vec![OptionSpec {
                    name: "activity",
                    description: "What did you do?",
                    required: true,
                }],
            ),
            Command::Submit => (
                "Submit an idea to the proposals channel",
                vec![OptionSpec {
                    name: "idea",
                    description: "Your idea",
                    required: true,
                }],
            ),
        };
        CommandSpec {
            name: self.name(),
            description,
            options,
        }
    }
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Command {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Command::ALL.into_iter().find(|c| c.name() == s).ok_or(())
    }
}

/// All slash commands the bot registers.
pub fn command_specs() -> Vec<CommandSpec> {
    Command::ALL.into_iter().map(Command::spec).collect()
}

/// A best-effort step that did not complete.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Warning {
    pub step: &'static str,
    pub reason: String,
}

impl Warning {
    fn new(step: &'static str, reason: impl Into<String>) -> Self {
        Self {
            step,
            reason: reason.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommandOutcome {
    /// Unrecognized command name; nothing was sent.
    Ignored,
    Handled {
        command: Command,
        warnings: Vec<Warning>,
    },
    /// The handler failed; a generic ephemeral error reply was attempted.
    Failed { command: Command, reason: String },
}

/// Where `/submit` copies ideas.
#[derive(Debug, Clone)]
pub struct ProposalsChannel {
    pub guild_id: String,
    pub channel_id: String,
}

pub struct Dispatcher {
    ledger: Arc<dyn XpStore>,
    bridge: CompletionBridge,
    missions: MissionPool,
    proposals: Option<ProposalsChannel>,
}

impl Dispatcher {
    pub fn new(ledger: Arc<dyn XpStore>, bridge: CompletionBridge) -> Self {
        Self {
            ledger,
            bridge,
            missions: MissionPool::default(),
            proposals: None,
        }
    }

    pub fn with_proposals_channel(mut self, guild_id: impl Into<String>, channel_id: impl Into<String>) -> Self {
        self.proposals = Some(ProposalsChannel {
            guild_id: guild_id.into(),
            channel_id: channel_id.into(),
        });
        self
    }

    pub fn with_missions(mut self, missions: MissionPool) -> Self {
        self.missions = missions;
        self
    }

    pub fn ledger(&self) -> &Arc<dyn XpStore> {
        &self.ledger
    }

    /// Route one invocation. Never returns an error; see [`CommandOutcome`].
    pub async fn dispatch(
        &self,
        request: &CommandRequest,
        responder: &dyn Responder,
        gateway: &dyn Gateway,
    ) -> CommandOutcome {
        let Ok(command) = request.name.parse::<Command>() else {
            return CommandOutcome::Ignored;
        };
        info!(command = %command, user_id = %request.user_id, "command received");

        let result = match command {
            Command::Learn => self.learn(request, responder).await,
            Command::Daily => self.daily(responder).await,
            Command::Xp => self.xp(request, responder).await,
            Command::Rank => self.rank(responder).await,
            Command::Verify => self.verify(request, responder).await,
            Command::Submit => self.submit(request, responder, gateway).await,
        };

        match result {
            Ok(warnings) => {
                for w in &warnings {
                    warn!(command = %command, step = w.step, reason = %w.reason, "best-effort step skipped");
                }
                CommandOutcome::Handled { command, warnings }
            }
            Err(e) => {
                error!(command = %command, user_id = %request.user_id, error = %e, "command failed");
                let generic = Reply::text(messages::GENERIC_ERROR).ephemeral();
                if let Err(reply_err) = responder.reply(generic).await {
                    error!(command = %command, error = %reply_err, "could not deliver error reply");
                }
                CommandOutcome::Failed {
                    command,
                    reason: e.to_string(),
                }
            }
        }
    }

    async fn learn(&self, request: &CommandRequest, responder: &dyn Responder) -> Result<Vec<Warning>, DispatchError> {
        // Acknowledge before the provider call; the platform enforces a reply deadline.
        responder.acknowledge().await?;
        let topic = request
            .option("topic")
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .unwrap_or(DEFAULT_TOPIC);

        let reply = match self.bridge.explain(topic).await {
            Ok(content) => Reply::rich(messages::lesson(topic, &content)),
            Err(e) => {
                warn!(topic, error = %e, "completion provider failed");
                Reply::text(messages::LEARN_FAILED)
            }
        };
        responder.edit_reply(reply).await?;
        Ok(Vec::new())
    }

    async fn daily(&self, responder: &dyn Responder) -> Result<Vec<Warning>, DispatchError> {
        let mission = self.missions.daily(&mut rand::thread_rng());
        responder
            .reply(Reply::rich(messages::daily_mission(&mission)))
            .await?;
        Ok(Vec::new())
    }

    async fn xp(&self, request: &CommandRequest, responder: &dyn Responder) -> Result<Vec<Warning>, DispatchError> {
        let xp = self.ledger.get(&request.user_id);
        responder
            .reply(Reply::rich(messages::stats(xp)).ephemeral())
            .await?;
        Ok(Vec::new())
    }

    async fn rank(&self, responder: &dyn Responder) -> Result<Vec<Warning>, DispatchError> {
        let standings = self.ledger.top(LEADERBOARD_SIZE);
        responder
            .reply(Reply::rich(messages::leaderboard(&standings)))
            .await?;
        Ok(Vec::new())
    }

    /// Grants unconditionally: no validation, dedup or rate limit on `activity`.
    async fn verify(&self, request: &CommandRequest, responder: &dyn Responder) -> Result<Vec<Warning>, DispatchError> {
        let activity = request
            .option("activity")
            .ok_or(DispatchError::MissingOption("activity"))?;
        let total = self.ledger.increment(&request.user_id, VERIFY_REWARD);
        info!(user_id = %request.user_id, total, "activity verified");
        responder
            .reply(Reply::rich(messages::verified(activity, VERIFY_REWARD)))
            .await?;
        Ok(Vec::new())
    }

    async fn submit(
        &self,
        request: &CommandRequest,
        responder: &dyn Responder,
        gateway: &dyn Gateway,
    ) -> Result<Vec<Warning>, DispatchError> {
        let idea = request.option("idea").ok_or(DispatchError::MissingOption("idea"))?;
        let total = self.ledger.increment(&request.user_id, SUBMIT_REWARD);
        info!(user_id = %request.user_id, total, "idea submitted");
        responder
            .reply(Reply::rich(messages::submitted(idea, SUBMIT_REWARD)))
            .await?;

        let mut warnings = Vec::new();
        if let Some(w) = self.forward_proposal(request, idea, gateway).await {
            warnings.push(w);
        }
        Ok(warnings)
    }

    async fn forward_proposal(&self, request: &CommandRequest, idea: &str, gateway: &dyn Gateway) -> Option<Warning> {
        let Some(proposals) = &self.proposals else {
            return Some(Warning::new("forward_proposal", "no proposals channel configured"));
        };
        let guild_id = request.guild_id.as_deref().unwrap_or(&proposals.guild_id);
        match gateway.channel_exists(guild_id, &proposals.channel_id).await {
            Ok(true) => {}
            Ok(false) => {
                return Some(Warning::new(
                    "forward_proposal",
                    format!("channel {} not found", proposals.channel_id),
                ))
            }
            Err(e) => return Some(Warning::new("forward_proposal", e.to_string())),
        }

        let copy = messages::proposal(idea, &request.user_name);
        match gateway.send_to_channel(&proposals.channel_id, &copy).await {
            Ok(()) => None,
            Err(e) => Some(Warning::new("forward_proposal", e.to_string())),
        }
    }
}
