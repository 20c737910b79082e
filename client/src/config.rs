use std::time::Duration;

use arena_battle::SessionConfig;

/// Identity of the player whose team is loaded
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct OwnerId(pub String);

impl OwnerId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }
}

impl std::fmt::Display for OwnerId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Everything a battle driver needs to know up front
pub struct ArenaConfig {
    pub owner: OwnerId,
    pub session: SessionConfig,
    /// Period of the cooldown timer
    pub tick_interval: Duration,
}

impl ArenaConfig {
    pub fn new(owner: OwnerId) -> Self {
        Self {
            owner,
            session: SessionConfig::default(),
            tick_interval: Duration::from_secs(1),
        }
    }

    /// Seed the heal budget, typically with the heals left on the player's profile
    pub fn with_heals(mut self, heals: u32) -> Self {
        self.session.heal_budget = heals;
        self
    }
}
