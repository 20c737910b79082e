use arena_battle::{Action, BattleMember, InvalidAction, Resolution, Team, TurnOutcome};
use async_trait::async_trait;

/// Trait for reacting to battle events.
///
/// Implement this trait to drive a front end from the battle loop. All
/// methods have default no-op implementations, so you only need to
/// implement the events you care about.
///
/// # Example
///
/// ```ignore
/// struct Printer;
///
/// #[async_trait]
/// impl BattleHandler for Printer {
///     async fn on_turn(&mut self, outcome: &TurnOutcome) {
///         if let Some(strike) = &outcome.player_strike {
///             println!("{} used {}!", strike.attacker, strike.move_name);
///         }
///     }
/// }
/// ```
#[async_trait]
pub trait BattleHandler: Send {
    /// Called after every accepted action.
    async fn on_turn(&mut self, outcome: &TurnOutcome) {
        let _ = outcome;
    }

    /// Called when an action was refused. The battle did not change.
    async fn on_rejected(&mut self, action: &Action, reason: &InvalidAction) {
        let _ = (action, reason);
    }

    /// Called when the player's active member fainted and a teammate must be chosen.
    async fn on_forced_switch(&mut self, team: &Team) {
        let _ = team;
    }

    /// Called once when the battle is decided.
    async fn on_resolved(&mut self, resolution: &Resolution) {
        let _ = resolution;
    }

    /// Called after a defeated opponent joined the player's collection.
    async fn on_captured(&mut self, member: &BattleMember) {
        let _ = member;
    }
}
