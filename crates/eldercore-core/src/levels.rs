//! Level tiers derived from XP. Nothing here is stored.

/// XP per tier step.
pub const TIER_STEP: u64 = 100;

/// Ordered tier names; the last one absorbs everything at or above 500 XP.
pub const TIERS: [&str; 6] = [
    "🌱 Citizen",
    "🛠️ Builder",
    "⚡ Validator",
    "🔮 Elder",
    "🌍 Ambassador",
    "🦋 Luminary",
];

/// Tier index for `xp`, clamped into `TIERS`.
pub fn tier_index(xp: u64) -> usize {
    let raw = xp / TIER_STEP;
    raw.min((TIERS.len() - 1) as u64) as usize
}

pub fn classify(xp: u64) -> &'static str {
    TIERS[tier_index(xp)]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn boundaries() {
        assert_eq!(classify(0), TIERS[0]);
        assert_eq!(classify(99), TIERS[0]);
        assert_eq!(classify(100), TIERS[1]);
        assert_eq!(classify(499), TIERS[4]);
        assert_eq!(classify(500), TIERS[5]);
        assert_eq!(classify(10_000), TIERS[5]);
        assert_eq!(classify(u64::MAX), TIERS[5]);
    }

    #[test]
    fn monotonic() {
        let mut last = 0;
        for xp in (0..2_000).step_by(7) {
            let idx = tier_index(xp);
            assert!(idx >= last, "tier dropped at {xp}");
            last = idx;
        }
    }
}
