//! Battle error types

use thiserror::Error;

use crate::types::MoveSlot;

/// Hard failures: the battle cannot be set up
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum BattleError {
    #[error("Cannot start a battle with an empty roster")]
    EmptyRoster,

    #[error("Battle has already been started")]
    AlreadyStarted,
}

/// A disallowed but foreseeable action
///
/// Returning one of these never changes the session, and the opponent does
/// not get a riposte.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum InvalidAction {
    #[error("Battle is not in progress")]
    NotInProgress,

    #[error("A fainted member must be replaced first")]
    ForcedSwitchPending,

    #[error("Move {slot} is cooling down ({remaining} ticks left)")]
    CooldownPending { slot: MoveSlot, remaining: u32 },

    #[error("Active member has no move in slot {0}")]
    MoveUnavailable(MoveSlot),

    #[error("No heals left")]
    NoHealsLeft,

    #[error("No team member at index {0}")]
    SwitchOutOfRange(usize),

    #[error("Team member {0} has fainted")]
    SwitchToFainted(usize),

    #[error("Team member {0} is already active")]
    AlreadyActive(usize),
}
