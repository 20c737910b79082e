//! Damage formula

use crate::types::{BattleMember, MoveSlot};

/// Damage dealt by one strike
///
/// `base` is the floored power before effectiveness; `extra` is what
/// effectiveness added (negative when resisted).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DamageBreakdown {
    pub base: u32,
    pub extra: i64,
    pub total: u32,
}

/// Final damage: `floor(power * multiplier)`, never negative
pub fn compute_damage(power: f64, multiplier: f64) -> DamageBreakdown {
    let power = if power.is_finite() { power.max(0.0) } else { 0.0 };
    let multiplier = if multiplier.is_finite() { multiplier.max(0.0) } else { 1.0 };

    let base = power.floor() as u32;
    let total = (power * multiplier).floor() as u32;

    DamageBreakdown {
        base,
        extra: total as i64 - base as i64,
        total,
    }
}

/// Raw power of a move for this attacker
///
/// Returns `None` when the slot has no special move defined.
pub fn move_power(attacker: &BattleMember, slot: MoveSlot) -> Option<f64> {
    match slot {
        MoveSlot::Basic => Some(attacker.attack as f64),
        special => attacker.special(special).map(|mv| mv.power_for(attacker.attack)),
    }
}
