//! Domain types for battle members and teams

mod member;
mod moves;
mod pokemon_type;
mod team;

pub use member::BattleMember;
pub use moves::{MoveSlot, SpecialMove};
pub use pokemon_type::{TYPE_CHART, Type};
pub use team::{MAX_TEAM_SIZE, Team};
