use anyhow::Result;
use arena_battle::Outcome;
use arena_roster::RosterEntry;
use async_trait::async_trait;

use crate::config::OwnerId;

/// Services the battle driver calls out to.
///
/// Implementations talk to whatever stores teams, heal counters and battle
/// results. None of these calls may be retried by the driver; a failure is
/// logged and the battle carries on.
///
/// # Example
///
/// ```ignore
/// struct HttpBackend { /* ... */ }
///
/// #[async_trait]
/// impl Backend for HttpBackend {
///     async fn load_roster(&self, owner: &OwnerId) -> Result<Vec<RosterEntry>> {
///         let body = self.get(&format!("/players/{}/team/", owner)).await?;
///         arena_roster::parse_roster(&body)
///     }
///     // ...
/// }
/// ```
#[async_trait]
pub trait Backend: Send + Sync + 'static {
    /// The player's battle team, in team order
    async fn load_roster(&self, owner: &OwnerId) -> Result<Vec<RosterEntry>>;

    /// One to four opposing members
    async fn load_opponent_roster(&self) -> Result<Vec<RosterEntry>>;

    /// Record a battle result for one owned creature
    async fn report_battle_result(&self, member_id: u64, outcome: Outcome) -> Result<()>;

    /// Spend `count` heals from the player's profile; returns heals left
    async fn apply_heal_usage(&self, owner: &OwnerId, count: u32) -> Result<u32>;

    /// Refill the player's heals; returns the new count
    async fn reset_heals(&self, owner: &OwnerId) -> Result<u32>;

    /// Add a defeated wild creature to the player's collection
    async fn capture(&self, owner: &OwnerId, poke_id: u64, nickname: Option<String>) -> Result<()>;
}
