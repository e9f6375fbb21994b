//! ElderCore — core library.
//! XP ledger, tiers, daily missions, the completion bridge and command dispatch for the
//! DRP community bot. Platform access goes through the traits in [`gateway`].

pub mod completion;
pub mod config;
pub mod dispatcher;
pub mod error;
pub mod gateway;
pub mod ledger;
pub mod levels;
pub mod lifecycle;
pub mod messages;
pub mod missions;

pub use completion::{CompletionBridge, CompletionProvider, CompletionRequest, OpenAiClient};
pub use config::BotConfig;
pub use dispatcher::{command_specs, Command, CommandOutcome, Dispatcher, Warning};
pub use error::{CompletionError, ConfigError, DispatchError, GatewayError};
pub use gateway::{CommandRequest, CommandSpec, Gateway, MemberJoin, OptionSpec, Responder};
pub use ledger::{InMemoryLedger, Standing, XpStore};
pub use lifecycle::{JoinReport, LifecycleHooks, ReadyReport, StepOutcome};
pub use messages::{Field, Reply, RichMessage};
pub use missions::{DailyMission, MissionPool};

pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
