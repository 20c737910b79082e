//! Turn resolution: damage, effectiveness and exchange sequencing

mod damage;
mod effectiveness;
mod turn;

pub use damage::{DamageBreakdown, compute_damage, move_power};
pub use effectiveness::{Effect, Effectiveness, Fixed, Neutral, TypeChart};
pub use turn::{Exchange, Strike, TurnAction, TurnEngine, TurnOutcome, Verdict};
