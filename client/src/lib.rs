//! Async battle client for poke-arena.
//!
//! Connects a [`BattleSession`] to the services around it: loading teams,
//! reporting results, keeping the player's heal counter and capturing
//! defeated opponents. The battle itself lives in `arena-battle`.
//!
//! # Example
//!
//! ```ignore
//! let backend = Arc::new(MemoryBackend::new().with_roster(owner.clone(), team));
//! let mut driver = BattleDriver::setup(backend, ArenaConfig::new(owner)).await?;
//!
//! let (handle, commands) = command_channel(16);
//! tokio::spawn(async move {
//!     handle.attack(MoveSlot::Basic).await?;
//!     handle.leave().await
//! });
//! driver.run(commands, &mut MyHandler).await;
//! ```

mod backend;
mod config;
mod driver;
mod error;
mod handle;
mod handler;
mod memory;

pub use backend::Backend;
pub use config::{ArenaConfig, OwnerId};
pub use driver::{BattleDriver, EndReport};
pub use error::ArenaError;
pub use handle::{ArenaHandle, Command, command_channel};
pub use handler::BattleHandler;
pub use memory::{DEFAULT_MAX_COLLECTION, DEFAULT_MAX_HEALS, MemoryBackend};

pub use arena_battle::{
    Action, BattleMember, BattleSession, InvalidAction, MoveSlot, Outcome, Phase, Redirect,
    Resolution, SessionConfig, Team, TurnOutcome,
};
pub use arena_roster::RosterEntry;
