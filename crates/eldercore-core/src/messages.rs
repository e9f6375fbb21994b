//! ElderCore voice: every rich message the bot sends, in one place.
//!
//! [`RichMessage`] is platform-neutral (title, description, color, fields, footer,
//! author); the gateway adapter renders it into the platform's embed type.

use crate::ledger::Standing;
use crate::levels;
use crate::missions::DailyMission;

pub const COLOR_WELCOME: u32 = 0x00ff88;
pub const COLOR_LEARN: u32 = 0x0099ff;
pub const COLOR_DAILY: u32 = 0xffaa00;
pub const COLOR_STATS: u32 = 0x00ff88;
pub const COLOR_RANK: u32 = 0xff00ff;
pub const COLOR_VERIFY: u32 = 0x00dd00;
pub const COLOR_SUBMIT: u32 = 0x9900ff;

pub const LEARN_FAILED: &str = "❌ Failed to fetch learning content.";
pub const GENERIC_ERROR: &str = "❌ Error occurred";
pub const EMPTY_LEADERBOARD: &str = "No members yet!";
pub const LEARN_FOOTER: &str = "ElderCore | Powered by OpenAI";
pub const PROJECT_URL: &str = "https://github.com/Decentralized-Rights-Protocol/Dr-Blockchain";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Field {
    pub name: String,
    pub value: String,
    pub inline: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RichMessage {
    pub title: Option<String>,
    pub description: Option<String>,
    pub color: Option<u32>,
    pub fields: Vec<Field>,
    pub footer: Option<String>,
    pub author: Option<String>,
}

impl RichMessage {
    pub fn new(color: u32) -> Self {
        Self {
            color: Some(color),
            ..Self::default()
        }
    }

    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn field(mut self, name: impl Into<String>, value: impl Into<String>, inline: bool) -> Self {
        self.fields.push(Field {
            name: name.into(),
            value: value.into(),
            inline,
        });
        self
    }

    pub fn footer(mut self, footer: impl Into<String>) -> Self {
        self.footer = Some(footer.into());
        self
    }

    pub fn author(mut self, author: impl Into<String>) -> Self {
        self.author = Some(author.into());
        self
    }

    /// Value of the first field named `name`.
    pub fn field_value(&self, name: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|f| f.name == name)
            .map(|f| f.value.as_str())
    }
}

/// A reply to a command invocation: plain text, a rich message, or both.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Reply {
    pub content: Option<String>,
    pub embed: Option<RichMessage>,
    /// Visible only to the invoking user.
    pub ephemeral: bool,
}

impl Reply {
    pub fn text(content: impl Into<String>) -> Self {
        Self {
            content: Some(content.into()),
            ..Self::default()
        }
    }

    pub fn rich(embed: RichMessage) -> Self {
        Self {
            embed: Some(embed),
            ..Self::default()
        }
    }

    pub fn ephemeral(mut self) -> Self {
        self.ephemeral = true;
        self
    }
}

pub fn welcome() -> RichMessage {
    RichMessage::new(COLOR_WELCOME)
        .title("🌍 Welcome to DRP!")
        .description("Building AI powered human rights verification.")
        .field("📚 Resources", format!("[GitHub]({PROJECT_URL})"), false)
        .field("🎯 Get Started", "Type `/learn topic:drp`!", false)
        .field("🏆 Earn XP", "Complete missions and contribute!", false)
}

pub fn lesson(topic: &str, content: &str) -> RichMessage {
    RichMessage::new(COLOR_LEARN)
        .title(format!("📖 Learn: {}", topic.to_uppercase()))
        .description(content)
        .footer(LEARN_FOOTER)
}

pub fn daily_mission(mission: &DailyMission) -> RichMessage {
    RichMessage::new(COLOR_DAILY)
        .title("🎯 Daily Mission")
        .description(mission.text)
        .field("⭐ XP Reward", format!("+{} XP", mission.reward), true)
        .footer("Use /verify to claim!")
}

pub fn stats(xp: u64) -> RichMessage {
    RichMessage::new(COLOR_STATS)
        .title("📊 Your Stats")
        .field("XP", xp.to_string(), true)
        .field("Level", levels::classify(xp), true)
}

/// Numbered leaderboard lines, or the explicit empty state.
pub fn leaderboard_text(standings: &[Standing]) -> String {
    if standings.is_empty() {
        return EMPTY_LEADERBOARD.to_string();
    }
    standings
        .iter()
        .enumerate()
        .map(|(i, s)| format!("{}. <@{}> - {}XP", i + 1, s.user_id, s.xp))
        .collect::<Vec<_>>()
        .join("\n")
}

pub fn leaderboard(standings: &[Standing]) -> RichMessage {
    RichMessage::new(COLOR_RANK)
        .title("🏆 Leaderboard")
        .description(leaderboard_text(standings))
        .footer("Top 10")
}

pub fn verified(activity: &str, gained: u64) -> RichMessage {
    RichMessage::new(COLOR_VERIFY)
        .title("✅ Activity Verified!")
        .description(format!("Activity: {activity}"))
        .field("XP Gained", format!("+{gained} XP"), true)
}

pub fn submitted(idea: &str, gained: u64) -> RichMessage {
    RichMessage::new(COLOR_SUBMIT)
        .title("📝 Idea Submitted!")
        .description(idea)
        .field("XP Gained", format!("+{gained} XP"), true)
}

pub fn proposal(idea: &str, author: &str) -> RichMessage {
    RichMessage::new(COLOR_SUBMIT)
        .title("New Proposal")
        .description(idea)
        .author(author)
}
