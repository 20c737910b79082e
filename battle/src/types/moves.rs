//! Move slots and special move definitions

/// The three move buttons a player has
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum MoveSlot {
    /// Basic attack, power = attacker's attack stat
    Basic,
    Special1,
    Special2,
}

impl MoveSlot {
    pub const ALL: [MoveSlot; 3] = [MoveSlot::Basic, MoveSlot::Special1, MoveSlot::Special2];

    /// Multiplier of `attack` used when a special move has no explicit power
    pub fn default_multiplier(&self) -> f64 {
        match self {
            MoveSlot::Basic => 1.0,
            MoveSlot::Special1 => 1.2,
            MoveSlot::Special2 => 1.5,
        }
    }

    /// Name shown when the roster did not name the move
    pub fn default_name(&self) -> &'static str {
        match self {
            MoveSlot::Basic => "Basic Attack",
            MoveSlot::Special1 => "Special 1",
            MoveSlot::Special2 => "Special 2",
        }
    }

    pub fn is_special(&self) -> bool {
        !matches!(self, MoveSlot::Basic)
    }
}

impl std::fmt::Display for MoveSlot {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            MoveSlot::Basic => "basic",
            MoveSlot::Special1 => "special1",
            MoveSlot::Special2 => "special2",
        };
        f.write_str(s)
    }
}

/// A special move attached to a member
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SpecialMove {
    pub name: String,

    /// Explicit power; takes precedence over the multiplier
    pub power: Option<f64>,

    /// Fallback: power = attack * multiplier
    pub multiplier: f64,
}

impl SpecialMove {
    pub fn new(name: impl Into<String>, power: Option<f64>, multiplier: f64) -> Self {
        Self {
            name: name.into(),
            power,
            multiplier,
        }
    }

    /// Default definition for a slot: unnamed, multiplier-based
    pub fn fallback(slot: MoveSlot) -> Self {
        Self::new(slot.default_name(), None, slot.default_multiplier())
    }

    /// Raw power of this move for an attacker with the given attack stat
    pub fn power_for(&self, attack: u32) -> f64 {
        match self.power {
            Some(power) => power.max(0.0),
            None => (attack as f64 * self.multiplier).max(0.0),
        }
    }
}
