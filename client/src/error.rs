use arena_battle::{InvalidAction, Redirect};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ArenaError {
    /// Setup could not produce a battle; the caller should navigate away
    #[error("Battle aborted, redirecting to {redirect:?}")]
    Aborted { redirect: Redirect },

    #[error("Action rejected: {0}")]
    Rejected(#[from] InvalidAction),

    #[error("Nothing to capture")]
    NothingToCapture,

    #[error("Battle driver stopped")]
    Closed,

    #[error("Backend call failed: {0:#}")]
    Collaborator(#[from] anyhow::Error),
}
