//! Type effectiveness lookups

use crate::types::Type;

/// Result of an effectiveness lookup
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Effect {
    /// Damage multiplier (0.0 = immune, 1.0 = neutral)
    pub multiplier: f64,

    /// Short description for display, e.g. "super effective"
    pub note: Option<String>,
}

impl Effect {
    pub fn neutral() -> Self {
        Self {
            multiplier: 1.0,
            note: None,
        }
    }

    /// Effect with the standard note for its multiplier
    pub fn from_multiplier(multiplier: f64) -> Self {
        let note = if multiplier == 0.0 {
            Some("no effect")
        } else if multiplier > 1.0 {
            Some("super effective")
        } else if multiplier < 1.0 {
            Some("not very effective")
        } else {
            None
        };

        Self {
            multiplier,
            note: note.map(str::to_string),
        }
    }
}

/// Pure lookup from attacker/defender type names to a damage multiplier
///
/// Implementations must not fail: pairings they do not recognize are neutral.
pub trait Effectiveness {
    fn effectiveness(&self, attacker_types: &[String], defender_types: &[String]) -> Effect;
}

/// The standard 18-type chart
///
/// Each attacking type is multiplied across every defending type and the
/// attacker's best type is used. Unknown type names count as neutral.
#[derive(Debug, Clone, Copy, Default)]
pub struct TypeChart;

impl Effectiveness for TypeChart {
    fn effectiveness(&self, attacker_types: &[String], defender_types: &[String]) -> Effect {
        let defenders: Vec<Type> = defender_types
            .iter()
            .filter_map(|t| Type::from_name(t))
            .collect();

        let best = attacker_types
            .iter()
            .map(|name| match Type::from_name(name) {
                Some(t) => t.effectiveness_multi(&defenders) as f64,
                None => 1.0,
            })
            .fold(None, |best: Option<f64>, m| Some(best.map_or(m, |b| b.max(m))));

        Effect::from_multiplier(best.unwrap_or(1.0))
    }
}

/// Ignores types entirely
#[derive(Debug, Clone, Copy, Default)]
pub struct Neutral;

impl Effectiveness for Neutral {
    fn effectiveness(&self, _attacker_types: &[String], _defender_types: &[String]) -> Effect {
        Effect::neutral()
    }
}

/// Same multiplier for every pairing
#[derive(Debug, Clone, Copy)]
pub struct Fixed(pub f64);

impl Effectiveness for Fixed {
    fn effectiveness(&self, _attacker_types: &[String], _defender_types: &[String]) -> Effect {
        Effect::from_multiplier(self.0.max(0.0))
    }
}

/// Any lookup closure, e.g. `|_: &[String], _: &[String]| Effect::neutral()`
impl<F> Effectiveness for F
where
    F: Fn(&[String], &[String]) -> Effect,
{
    fn effectiveness(&self, attacker_types: &[String], defender_types: &[String]) -> Effect {
        self(attacker_types, defender_types)
    }
}
