//! Battle engine for poke-arena.
//!
//! This crate holds everything a battle needs that does not touch the
//! outside world: teams, the damage formula, turn sequencing and the session
//! state machine.
//!
//! # Overview
//!
//! ```text
//! arena-roster (roster payloads)
//!        │
//!        ▼
//! arena-battle (teams + turns + session) ← THIS CRATE
//!        │
//!        ▼
//! arena-client (async driver, backend collaborators)
//! ```
//!
//! # Main Types
//!
//! ## Team Model
//! - [`BattleMember`] - One creature's battle snapshot
//! - [`Team`] - Ordered roster with one active member; transitions return new values
//!
//! ## Turn Resolution
//! - [`TurnEngine`] - Resolves a player action and the opponent's riposte
//! - [`Effectiveness`] - Type effectiveness lookup ([`TypeChart`], [`Neutral`], [`Fixed`])
//! - [`DamageBreakdown`] - Base damage and the effectiveness delta
//!
//! ## Session
//! - [`BattleSession`] - Phases, cooldowns, heal budget and the end-of-battle latch
//!
//! # Example Usage
//!
//! ```ignore
//! use arena_battle::{Action, BattleSession, MoveSlot, SessionConfig};
//!
//! let mut session = BattleSession::new(SessionConfig::default());
//! session.start(&my_roster, &opponents)?;
//!
//! let outcome = session.act(Action::Attack(MoveSlot::Basic))?;
//! if let Some(strike) = outcome.player_strike {
//!     println!("{} used {} for {}", strike.attacker, strike.move_name, strike.damage.total);
//! }
//!
//! if let Some(resolution) = session.take_resolution() {
//!     println!("Battle over: {}", resolution.outcome);
//! }
//! ```

pub mod engine;
pub mod error;
pub mod session;
pub mod types;

// Re-export main types at crate root for convenience
pub use engine::{
    DamageBreakdown, Effect, Effectiveness, Exchange, Fixed, Neutral, Strike, TurnAction,
    TurnEngine, TurnOutcome, TypeChart, Verdict, compute_damage, move_power,
};
pub use error::{BattleError, InvalidAction};
pub use session::{
    Action, BattleSession, CooldownPolicy, Cooldowns, HealPolicy, Outcome, Phase, Redirect,
    Resolution, SessionConfig,
};
pub use types::{BattleMember, MAX_TEAM_SIZE, MoveSlot, SpecialMove, TYPE_CHART, Team, Type};

pub use arena_roster::RosterEntry;
