//! Battle session: phases, cooldowns, heal budget and the end-of-battle latch

mod config;
mod controller;
mod cooldown;

pub use config::{CooldownPolicy, HealPolicy, SessionConfig};
pub use controller::{Action, BattleSession, Outcome, Phase, Redirect, Resolution};
pub use cooldown::Cooldowns;
