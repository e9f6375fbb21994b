//! serenity adapter: renders core messages as embeds and implements the core's
//! `Gateway` / `Responder` seams against Discord's HTTP API.

use std::sync::atomic::{AtomicBool, Ordering};

use async_trait::async_trait;
use eldercore_core::{CommandRequest, CommandSpec, Gateway, GatewayError, Reply, Responder, RichMessage};
use serenity::all::{
    ActivityData, ChannelId, CommandInteraction, CommandOptionType, Context, CreateCommand, CreateCommandOption,
    CreateEmbed, CreateEmbedAuthor, CreateEmbedFooter, CreateInteractionResponse, CreateInteractionResponseMessage,
    CreateMessage, EditInteractionResponse, GuildId, RoleId, UserId,
};

fn request_error(e: serenity::Error) -> GatewayError {
    GatewayError::Request(e.to_string())
}

/// Parse a Discord snowflake. Zero is not a valid id.
pub fn snowflake(raw: &str) -> Result<u64, GatewayError> {
    match raw.trim().parse::<u64>() {
        Ok(id) if id != 0 => Ok(id),
        _ => Err(GatewayError::InvalidId(raw.to_string())),
    }
}

pub fn build_embed(message: &RichMessage) -> CreateEmbed {
    let mut embed = CreateEmbed::new();
    if let Some(ref title) = message.title {
        embed = embed.title(title);
    }
    if let Some(ref description) = message.description {
        embed = embed.description(description);
    }
    if let Some(color) = message.color {
        embed = embed.color(color);
    }
    for field in &message.fields {
        embed = embed.field(&field.name, &field.value, field.inline);
    }
    if let Some(ref footer) = message.footer {
        embed = embed.footer(CreateEmbedFooter::new(footer));
    }
    if let Some(ref author) = message.author {
        embed = embed.author(CreateEmbedAuthor::new(author));
    }
    embed
}

fn build_command(spec: &CommandSpec) -> CreateCommand {
    spec.options.iter().fold(
        CreateCommand::new(spec.name).description(spec.description),
        |cmd, opt| {
            cmd.add_option(
                CreateCommandOption::new(CommandOptionType::String, opt.name, opt.description).required(opt.required),
            )
        },
    )
}

/// Core request from a slash-command interaction; string options only.
pub fn command_request(command: &CommandInteraction) -> CommandRequest {
    let mut request = CommandRequest::new(command.data.name.clone(), command.user.id.to_string())
        .with_user_name(command.user.name.clone());
    if let Some(guild_id) = command.guild_id {
        request = request.with_guild(guild_id.to_string());
    }
    for option in &command.data.options {
        if let Some(value) = option.value.as_str() {
            request = request.with_option(option.name.clone(), value);
        }
    }
    request
}

/// Community-wide operations for the duration of one event.
pub struct DiscordGateway<'a> {
    ctx: &'a Context,
}

impl<'a> DiscordGateway<'a> {
    pub fn new(ctx: &'a Context) -> Self {
        Self { ctx }
    }
}

#[async_trait]
impl Gateway for DiscordGateway<'_> {
    async fn send_direct(&self, user_id: &str, message: &RichMessage) -> Result<(), GatewayError> {
        let user = UserId::new(snowflake(user_id)?);
        let channel = user.create_dm_channel(&self.ctx.http).await.map_err(request_error)?;
        channel
            .send_message(&self.ctx.http, CreateMessage::new().embed(build_embed(message)))
            .await
            .map_err(request_error)?;
        Ok(())
    }

    async fn send_to_channel(&self, channel_id: &str, message: &RichMessage) -> Result<(), GatewayError> {
        ChannelId::new(snowflake(channel_id)?)
            .send_message(&self.ctx.http, CreateMessage::new().embed(build_embed(message)))
            .await
            .map_err(request_error)?;
        Ok(())
    }

    async fn channel_exists(&self, guild_id: &str, channel_id: &str) -> Result<bool, GatewayError> {
        let channel = ChannelId::new(snowflake(channel_id)?);
        let channels = GuildId::new(snowflake(guild_id)?)
            .channels(&self.ctx.http)
            .await
            .map_err(request_error)?;
        Ok(channels.contains_key(&channel))
    }

    async fn role_exists(&self, guild_id: &str, role_id: &str) -> Result<bool, GatewayError> {
        let role = RoleId::new(snowflake(role_id)?);
        let roles = GuildId::new(snowflake(guild_id)?)
            .roles(&self.ctx.http)
            .await
            .map_err(request_error)?;
        Ok(roles.contains_key(&role))
    }

    async fn grant_role(&self, guild_id: &str, user_id: &str, role_id: &str) -> Result<(), GatewayError> {
        self.ctx
            .http
            .add_member_role(
                GuildId::new(snowflake(guild_id)?),
                UserId::new(snowflake(user_id)?),
                RoleId::new(snowflake(role_id)?),
                Some("ElderCore: new member"),
            )
            .await
            .map_err(request_error)
    }

    async fn set_watching(&self, activity: &str) -> Result<(), GatewayError> {
        self.ctx.set_activity(Some(ActivityData::watching(activity)));
        Ok(())
    }

    async fn register_commands(&self, guild_id: &str, commands: &[CommandSpec]) -> Result<(), GatewayError> {
        let builders = commands.iter().map(build_command).collect();
        GuildId::new(snowflake(guild_id)?)
            .set_commands(&self.ctx.http, builders)
            .await
            .map_err(request_error)?;
        Ok(())
    }
}

/// Reply channel of one slash-command interaction.
pub struct InteractionResponder<'a> {
    ctx: &'a Context,
    command: &'a CommandInteraction,
    acknowledged: AtomicBool,
}

impl<'a> InteractionResponder<'a> {
    pub fn new(ctx: &'a Context, command: &'a CommandInteraction) -> Self {
        Self {
            ctx,
            command,
            acknowledged: AtomicBool::new(false),
        }
    }
}

#[async_trait]
impl Responder for InteractionResponder<'_> {
    async fn acknowledge(&self) -> Result<(), GatewayError> {
        self.command.defer(&self.ctx.http).await.map_err(request_error)?;
        self.acknowledged.store(true, Ordering::SeqCst);
        Ok(())
    }

    async fn reply(&self, reply: Reply) -> Result<(), GatewayError> {
        // An acknowledged interaction only accepts edits.
        if self.acknowledged.load(Ordering::SeqCst) {
            return self.edit_reply(reply).await;
        }
        let mut message = CreateInteractionResponseMessage::new().ephemeral(reply.ephemeral);
        if let Some(content) = reply.content {
            message = message.content(content);
        }
        if let Some(ref embed) = reply.embed {
            message = message.embed(build_embed(embed));
        }
        self.command
            .create_response(&self.ctx.http, CreateInteractionResponse::Message(message))
            .await
            .map_err(request_error)
    }

    async fn edit_reply(&self, reply: Reply) -> Result<(), GatewayError> {
        let mut edit = EditInteractionResponse::new();
        if let Some(content) = reply.content {
            edit = edit.content(content);
        }
        if let Some(ref embed) = reply.embed {
            edit = edit.embed(build_embed(embed));
        }
        self.command
            .edit_response(&self.ctx.http, edit)
            .await
            .map_err(request_error)?;
        Ok(())
    }
}
