//! Daily mission pool.
//!
//! A "daily" mission is a uniform draw from a fixed list; it is not scoped to a calendar
//! day. The advertised reward is drawn independently of the mission.

use rand::Rng;

pub const MISSIONS: &[&str] = &[
    "Help a newcomer understand DRP",
    "Share a DRP idea in #ideas-feedback",
    "Test a blockchain feature",
    "Write about human rights in tech",
    "Contribute to GitHub discussion",
];

pub const REWARD_MIN: u64 = 25;
pub const REWARD_SPAN: u64 = 50;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DailyMission {
    pub text: &'static str,
    /// Displayed only; never granted automatically.
    pub reward: u64,
}

#[derive(Debug, Clone)]
pub struct MissionPool {
    missions: &'static [&'static str],
}

impl Default for MissionPool {
    fn default() -> Self {
        Self { missions: MISSIONS }
    }
}

impl MissionPool {
    /// Pool over a custom list. Returns `None` for an empty list.
    pub fn with_missions(missions: &'static [&'static str]) -> Option<Self> {
        if missions.is_empty() {
            None
        } else {
            Some(Self { missions })
        }
    }

    pub fn draw<R: Rng>(&self, rng: &mut R) -> &'static str {
        self.missions[rng.gen_range(0..self.missions.len())]
    }

    /// Reward in `[25, 74]`, independent of which mission was drawn.
    pub fn draw_reward<R: Rng>(&self, rng: &mut R) -> u64 {
        REWARD_MIN + rng.gen_range(0..REWARD_SPAN)
    }

    pub fn daily<R: Rng>(&self, rng: &mut R) -> DailyMission {
        DailyMission {
            text: self.draw(rng),
            reward: self.draw_reward(rng),
        }
    }
}
