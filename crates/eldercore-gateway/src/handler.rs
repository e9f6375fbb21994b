//! Discord event handler: hands ready, member-join and slash-command events to the core.

use std::sync::Arc;

use eldercore_core::{CommandOutcome, Dispatcher, JoinReport, LifecycleHooks, MemberJoin};
use serenity::all::{Context, EventHandler, Interaction, Member, Ready};
use serenity::async_trait;
use tracing::{debug, info};

use crate::discord::{command_request, DiscordGateway, InteractionResponder};

pub struct Handler {
    dispatcher: Arc<Dispatcher>,
    hooks: Arc<LifecycleHooks>,
}

impl Handler {
    pub fn new(dispatcher: Arc<Dispatcher>, hooks: Arc<LifecycleHooks>) -> Self {
        Self { dispatcher, hooks }
    }
}

#[async_trait]
impl EventHandler for Handler {
    async fn ready(&self, ctx: Context, ready: Ready) {
        let report = self.hooks.on_ready(&DiscordGateway::new(&ctx), &ready.user.tag()).await;
        debug!(?report, "ready hooks finished");
    }

    async fn guild_member_addition(&self, ctx: Context, new_member: Member) {
        let join = MemberJoin {
            guild_id: new_member.guild_id.to_string(),
            user_id: new_member.user.id.to_string(),
            user_tag: new_member.user.tag(),
        };
        match self.hooks.on_member_join(&DiscordGateway::new(&ctx), &join).await {
            JoinReport::Ignored => debug!(guild_id = %join.guild_id, "join from another guild ignored"),
            report => info!(user = %join.user_tag, ?report, "member join handled"),
        }
    }

    async fn interaction_create(&self, ctx: Context, interaction: Interaction) {
        let Interaction::Command(command) = interaction else {
            return;
        };
        let request = command_request(&command);
        let responder = InteractionResponder::new(&ctx, &command);
        let outcome = self
            .dispatcher
            .dispatch(&request, &responder, &DiscordGateway::new(&ctx))
            .await;
        if outcome == CommandOutcome::Ignored {
            debug!(command = %request.name, "unrecognized command ignored");
        }
    }
}
