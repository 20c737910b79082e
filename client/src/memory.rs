use std::collections::HashMap;
use std::sync::Mutex;

use anyhow::{Result, anyhow, bail};
use arena_battle::{MAX_TEAM_SIZE, Outcome};
use arena_roster::RosterEntry;
use async_trait::async_trait;
use rand::Rng;
use rand::seq::SliceRandom;

use crate::backend::Backend;
use crate::config::OwnerId;

/// Heals a player profile holds when full
pub const DEFAULT_MAX_HEALS: u32 = 2;

/// Largest collection a player may own
pub const DEFAULT_MAX_COLLECTION: usize = 10;

/// Where opponents come from
enum Opponents {
    /// Always the same group
    Fixed(Vec<RosterEntry>),
    /// A random group of 2-4 drawn from the pool
    Pool(Vec<RosterEntry>),
}

struct MemoryState {
    rosters: HashMap<OwnerId, Vec<RosterEntry>>,
    collections: HashMap<OwnerId, Vec<RosterEntry>>,
    heals: HashMap<OwnerId, u32>,
    results: Vec<(u64, Outcome)>,
    opponents: Opponents,
    fail_reports: bool,
}

/// In-process backend for tests and local play
pub struct MemoryBackend {
    state: Mutex<MemoryState>,
    max_heals: u32,
    max_collection: usize,
}

impl MemoryBackend {
    pub fn new() -> Self {
        Self {
            state: Mutex::new(MemoryState {
                rosters: HashMap::new(),
                collections: HashMap::new(),
                heals: HashMap::new(),
                results: Vec::new(),
                opponents: Opponents::Fixed(Vec::new()),
                fail_reports: false,
            }),
            max_heals: DEFAULT_MAX_HEALS,
            max_collection: DEFAULT_MAX_COLLECTION,
        }
    }

    /// Set the battle team of a player
    pub fn with_roster(self, owner: OwnerId, roster: Vec<RosterEntry>) -> Self {
        self.lock_state().rosters.insert(owner, roster);
        self
    }

    /// Always send out this exact group
    pub fn with_opponents(self, opponents: Vec<RosterEntry>) -> Self {
        self.lock_state().opponents = Opponents::Fixed(opponents);
        self
    }

    /// Draw a random group from this pool for each battle
    pub fn with_opponent_pool(self, pool: Vec<RosterEntry>) -> Self {
        self.lock_state().opponents = Opponents::Pool(pool);
        self
    }

    /// Make every result report fail
    pub fn with_failing_reports(self) -> Self {
        self.lock_state().fail_reports = true;
        self
    }

    pub fn heals(&self, owner: &OwnerId) -> u32 {
        self.lock_state()
            .heals
            .get(owner)
            .copied()
            .unwrap_or(self.max_heals)
    }

    pub fn set_heals(&self, owner: &OwnerId, heals: u32) {
        self.lock_state()
            .heals
            .insert(owner.clone(), heals.min(self.max_heals));
    }

    /// Every result reported so far, in order
    pub fn results(&self) -> Vec<(u64, Outcome)> {
        self.lock_state().results.clone()
    }

    /// Creatures captured by a player
    pub fn collection(&self, owner: &OwnerId) -> Vec<RosterEntry> {
        self.lock_state()
            .collections
            .get(owner)
            .cloned()
            .unwrap_or_default()
    }

    fn lock_state(&self) -> std::sync::MutexGuard<'_, MemoryState> {
        // State stays consistent even if a holder panicked
        self.state.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn pick_group(pool: &[RosterEntry]) -> Vec<RosterEntry> {
        let mut rng = rand::thread_rng();
        let size = rng.gen_range(2..=MAX_TEAM_SIZE);
        (0..size)
            .filter_map(|_| pool.choose(&mut rng).cloned())
            .collect()
    }
}

impl Default for MemoryBackend {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Backend for MemoryBackend {
    async fn load_roster(&self, owner: &OwnerId) -> Result<Vec<RosterEntry>> {
        let state = self.lock_state();
        Ok(state.rosters.get(owner).cloned().unwrap_or_default())
    }

    async fn load_opponent_roster(&self) -> Result<Vec<RosterEntry>> {
        let state = self.lock_state();
        match &state.opponents {
            Opponents::Fixed(group) => Ok(group.clone()),
            Opponents::Pool(pool) if pool.is_empty() => bail!("Opponent pool is empty"),
            Opponents::Pool(pool) => Ok(Self::pick_group(pool)),
        }
    }

    async fn report_battle_result(&self, member_id: u64, outcome: Outcome) -> Result<()> {
        let mut state = self.lock_state();
        if state.fail_reports {
            bail!("Result service unavailable");
        }
        state.results.push((member_id, outcome));
        Ok(())
    }

    async fn apply_heal_usage(&self, owner: &OwnerId, count: u32) -> Result<u32> {
        let max = self.max_heals;
        let mut state = self.lock_state();
        let heals = state.heals.entry(owner.clone()).or_insert(max);
        if *heals == 0 && count > 0 {
            return Err(anyhow!("No heals left for {}", owner));
        }
        *heals = heals.saturating_sub(count);
        Ok(*heals)
    }

    async fn reset_heals(&self, owner: &OwnerId) -> Result<u32> {
        let max = self.max_heals;
        let mut state = self.lock_state();
        state.heals.insert(owner.clone(), max);
        Ok(max)
    }

    async fn capture(&self, owner: &OwnerId, poke_id: u64, nickname: Option<String>) -> Result<()> {
        let max = self.max_collection;
        let mut state = self.lock_state();

        let species = match &state.opponents {
            Opponents::Fixed(group) | Opponents::Pool(group) => {
                group.iter().find(|e| e.poke_id == poke_id).cloned()
            }
        };
        let Some(mut entry) = species else {
            bail!("Unknown species {}", poke_id);
        };

        let collection = state.collections.entry(owner.clone()).or_default();
        if collection.len() >= max {
            bail!("You can only have {} creatures in your collection", max);
        }

        entry.id = None;
        entry.nickname = nickname.filter(|n| !n.trim().is_empty());
        collection.push(entry);
        Ok(())
    }
}
