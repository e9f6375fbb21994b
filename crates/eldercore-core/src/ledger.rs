//! XP Ledger: per-user experience points, in memory for the lifetime of the process.
//!
//! The store sits behind [`XpStore`] so the dispatcher and lifecycle hooks can be handed
//! an isolated ledger in tests, or a persistent one later.

use std::sync::atomic::{AtomicU64, Ordering};

use dashmap::DashMap;

/// XP granted by `/verify`.
pub const VERIFY_REWARD: u64 = 50;
/// XP granted by `/submit`.
pub const SUBMIT_REWARD: u64 = 25;

/// One ranked ledger row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Standing {
    pub user_id: String,
    pub xp: u64,
}

/// Injectable XP store. Implementations must make `increment` atomic per user.
pub trait XpStore: Send + Sync {
    /// Stored XP, or 0 for a user never seen.
    fn get(&self, user_id: &str) -> u64;

    /// Add `amount` and return the new total. Creates the entry when absent.
    fn increment(&self, user_id: &str, amount: u64) -> u64;

    /// Materialize a zero entry. Never resets an existing total.
    fn initialize(&self, user_id: &str);

    /// Up to `n` rows by XP descending; ties keep insertion order.
    fn top(&self, n: usize) -> Vec<Standing>;

    fn is_empty(&self) -> bool;
}

#[derive(Debug, Clone, Copy)]
struct Entry {
    xp: u64,
    seq: u64,
}

/// Default [`XpStore`]: a concurrent map plus an insertion counter for stable ranking.
#[derive(Debug, Default)]
pub struct InMemoryLedger {
    entries: DashMap<String, Entry>,
    next_seq: AtomicU64,
}

impl InMemoryLedger {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    fn fresh(&self) -> Entry {
        Entry {
            xp: 0,
            seq: self.next_seq.fetch_add(1, Ordering::Relaxed),
        }
    }
}

impl XpStore for InMemoryLedger {
    fn get(&self, user_id: &str) -> u64 {
        self.entries.get(user_id).map(|e| e.xp).unwrap_or(0)
    }

    fn increment(&self, user_id: &str, amount: u64) -> u64 {
        let mut entry = self
            .entries
            .entry(user_id.to_string())
            .or_insert_with(|| self.fresh());
        entry.xp = entry.xp.saturating_add(amount);
        tracing::debug!(user_id, amount, total = entry.xp, "xp granted");
        entry.xp
    }

    fn initialize(&self, user_id: &str) {
        self.entries
            .entry(user_id.to_string())
            .or_insert_with(|| self.fresh());
    }

    fn top(&self, n: usize) -> Vec<Standing> {
        let mut rows: Vec<(String, Entry)> = self
            .entries
            .iter()
            .map(|r| (r.key().clone(), *r.value()))
            .collect();
        rows.sort_by(|a, b| b.1.xp.cmp(&a.1.xp).then(a.1.seq.cmp(&b.1.seq)));
        rows.truncate(n);
        rows.into_iter()
            .map(|(user_id, e)| Standing { user_id, xp: e.xp })
            .collect()
    }

    fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
