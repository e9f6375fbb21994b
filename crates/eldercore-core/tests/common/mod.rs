//! Recording fakes for the platform and completion collaborators.

#![allow(dead_code)]

use std::collections::HashSet;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use eldercore_core::{
    CommandSpec, CompletionBridge, CompletionError, CompletionProvider, CompletionRequest, Dispatcher, Gateway,
    GatewayError, InMemoryLedger, Reply, Responder, RichMessage, XpStore,
};

pub const GUILD: &str = "guild-1";
pub const PROPOSALS: &str = "proposals";
pub const ROLE: &str = "member-role";

/// What the responder saw, in order.
#[derive(Debug, Clone, PartialEq)]
pub enum ResponderEvent {
    Acknowledged,
    Replied(Reply),
    Edited(Reply),
}

#[derive(Default)]
pub struct RecordingResponder {
    pub events: Mutex<Vec<ResponderEvent>>,
    /// Fail the first `reply` call.
    pub fail_reply_once: Mutex<bool>,
}

impl RecordingResponder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failing_first_reply() -> Self {
        let r = Self::default();
        *r.fail_reply_once.lock().unwrap() = true;
        r
    }

    pub fn events(&self) -> Vec<ResponderEvent> {
        self.events.lock().unwrap().clone()
    }

    /// The last reply or edit.
    pub fn last(&self) -> Option<Reply> {
        self.events().into_iter().rev().find_map(|e| match e {
            ResponderEvent::Replied(r) | ResponderEvent::Edited(r) => Some(r),
            ResponderEvent::Acknowledged => None,
        })
    }

    pub fn last_embed(&self) -> RichMessage {
        self.last().and_then(|r| r.embed).expect("rich reply")
    }
}

#[async_trait]
impl Responder for RecordingResponder {
    async fn acknowledge(&self) -> Result<(), GatewayError> {
        self.events.lock().unwrap().push(ResponderEvent::Acknowledged);
        Ok(())
    }

    async fn reply(&self, reply: Reply) -> Result<(), GatewayError> {
        let mut fail = self.fail_reply_once.lock().unwrap();
        if *fail {
            *fail = false;
            return Err(GatewayError::Request("interaction expired".into()));
        }
        self.events.lock().unwrap().push(ResponderEvent::Replied(reply));
        Ok(())
    }

    async fn edit_reply(&self, reply: Reply) -> Result<(), GatewayError> {
        self.events.lock().unwrap().push(ResponderEvent::Edited(reply));
        Ok(())
    }
}

#[derive(Default)]
pub struct FakeGateway {
    pub channels: Mutex<HashSet<String>>,
    pub roles: Mutex<HashSet<String>>,
    pub fail_dm: bool,
    pub fail_role_grant: bool,
    pub fail_presence: bool,
    pub direct: Mutex<Vec<(String, RichMessage)>>,
    pub channel_posts: Mutex<Vec<(String, RichMessage)>>,
    pub grants: Mutex<Vec<(String, String, String)>>,
    pub presence: Mutex<Option<String>>,
    pub registered: Mutex<Vec<(String, Vec<CommandSpec>)>>,
}

impl FakeGateway {
    pub fn with_community() -> Self {
        let g = Self::default();
        g.channels.lock().unwrap().insert(PROPOSALS.to_string());
        g.roles.lock().unwrap().insert(ROLE.to_string());
        g
    }

    pub fn channel_posts(&self) -> Vec<(String, RichMessage)> {
        self.channel_posts.lock().unwrap().clone()
    }

    pub fn grants(&self) -> Vec<(String, String, String)> {
        self.grants.lock().unwrap().clone()
    }

    pub fn direct(&self) -> Vec<(String, RichMessage)> {
        self.direct.lock().unwrap().clone()
    }
}

#[async_trait]
impl Gateway for FakeGateway {
    async fn send_direct(&self, user_id: &str, message: &RichMessage) -> Result<(), GatewayError> {
        if self.fail_dm {
            return Err(GatewayError::Request("cannot send messages to this user".into()));
        }
        self.direct.lock().unwrap().push((user_id.to_string(), message.clone()));
        Ok(())
    }

    async fn send_to_channel(&self, channel_id: &str, message: &RichMessage) -> Result<(), GatewayError> {
        if !self.channels.lock().unwrap().contains(channel_id) {
            return Err(GatewayError::NotFound(channel_id.to_string()));
        }
        self.channel_posts
            .lock()
            .unwrap()
            .push((channel_id.to_string(), message.clone()));
        Ok(())
    }

    async fn channel_exists(&self, _guild_id: &str, channel_id: &str) -> Result<bool, GatewayError> {
        Ok(self.channels.lock().unwrap().contains(channel_id))
    }

    async fn role_exists(&self, _guild_id: &str, role_id: &str) -> Result<bool, GatewayError> {
        Ok(self.roles.lock().unwrap().contains(role_id))
    }

    async fn grant_role(&self, guild_id: &str, user_id: &str, role_id: &str) -> Result<(), GatewayError> {
        if self.fail_role_grant {
            return Err(GatewayError::Request("missing permissions".into()));
        }
        self.grants
            .lock()
            .unwrap()
            .push((guild_id.to_string(), user_id.to_string(), role_id.to_string()));
        Ok(())
    }

    async fn set_watching(&self, activity: &str) -> Result<(), GatewayError> {
        if self.fail_presence {
            return Err(GatewayError::Request("shard not connected".into()));
        }
        *self.presence.lock().unwrap() = Some(activity.to_string());
        Ok(())
    }

    async fn register_commands(&self, guild_id: &str, commands: &[CommandSpec]) -> Result<(), GatewayError> {
        self.registered
            .lock()
            .unwrap()
            .push((guild_id.to_string(), commands.to_vec()));
        Ok(())
    }
}

/// Completion provider returning a canned answer, or failing.
pub struct ScriptedProvider {
    pub answer: Option<String>,
    pub requests: Arc<Mutex<Vec<CompletionRequest>>>,
}

impl ScriptedProvider {
    pub fn answering(answer: &str) -> Self {
        Self {
            answer: Some(answer.to_string()),
            requests: Arc::default(),
        }
    }

    pub fn failing() -> Self {
        Self {
            answer: None,
            requests: Arc::default(),
        }
    }
}

#[async_trait]
impl CompletionProvider for ScriptedProvider {
    async fn complete(&self, request: &CompletionRequest) -> Result<String, CompletionError> {
        self.requests.lock().unwrap().push(request.clone());
        self.answer
            .clone()
            .ok_or_else(|| CompletionError::Status(503, "provider unavailable".into()))
    }
}

pub fn dispatcher_with(provider: ScriptedProvider) -> (Dispatcher, Arc<InMemoryLedger>) {
    let ledger = Arc::new(InMemoryLedger::new());
    let store: Arc<dyn XpStore> = ledger.clone();
    let dispatcher =
        Dispatcher::new(store, CompletionBridge::new(Box::new(provider))).with_proposals_channel(GUILD, PROPOSALS);
    (dispatcher, ledger)
}
