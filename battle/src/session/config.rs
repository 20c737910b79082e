/// How much a heal restores
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum HealPolicy {
    /// Fixed number of HP
    Flat(u32),
    /// Share of the member's max HP, rounded
    Fraction(f64),
}

impl HealPolicy {
    /// HP restored for a member with the given max HP (before capping)
    pub fn amount(&self, max_hp: u32) -> u32 {
        match *self {
            HealPolicy::Flat(hp) => hp,
            HealPolicy::Fraction(f) if f.is_finite() && f > 0.0 => {
                (max_hp as f64 * f).round() as u32
            }
            HealPolicy::Fraction(_) => 0,
        }
    }
}

impl Default for HealPolicy {
    fn default() -> Self {
        HealPolicy::Fraction(0.2)
    }
}

/// Ticks a move is locked after use
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CooldownPolicy {
    pub basic: u32,
    pub special1: u32,
    pub special2: u32,
}

impl Default for CooldownPolicy {
    fn default() -> Self {
        Self {
            basic: 1,
            special1: 5,
            special2: 8,
        }
    }
}

/// Per-battle settings, passed in when the session is created
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SessionConfig {
    /// Heals the player may use this battle
    pub heal_budget: u32,
    pub heal_policy: HealPolicy,
    pub cooldowns: CooldownPolicy,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            heal_budget: 2,
            heal_policy: HealPolicy::default(),
            cooldowns: CooldownPolicy::default(),
        }
    }
}
