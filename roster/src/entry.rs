use serde::{Deserialize, Serialize};

/// One creature as delivered by a roster collaborator.
///
/// Field names follow the backend payload, so a roster can be deserialized
/// directly from the JSON returned by the team and opponent endpoints.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RosterEntry {
    /// Id of the owned creature. Wild opponents have none.
    #[serde(default)]
    pub id: Option<u64>,

    /// Species id, used when capturing
    pub poke_id: u64,

    pub name: String,

    #[serde(default)]
    pub nickname: Option<String>,

    pub hp: u32,
    pub attack: u32,
    pub defense: u32,

    /// Elemental types in display order, e.g. `["Grass", "Poison"]`
    pub types: Vec<String>,

    #[serde(default)]
    pub level: Option<u8>,

    #[serde(default)]
    pub special1_name: Option<String>,
    #[serde(default)]
    pub special1_power: Option<f64>,
    #[serde(default)]
    pub special1_multiplier: Option<f64>,

    #[serde(default)]
    pub special2_name: Option<String>,
    #[serde(default)]
    pub special2_power: Option<f64>,
    #[serde(default)]
    pub special2_multiplier: Option<f64>,
}

/// The flattened `specialN_*` fields of a roster entry
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpecialEntry<'a> {
    pub name: Option<&'a str>,
    pub power: Option<f64>,
    pub multiplier: Option<f64>,
}

impl RosterEntry {
    /// Create an entry with the required stats and no special-move data
    pub fn new(
        poke_id: u64,
        name: impl Into<String>,
        hp: u32,
        attack: u32,
        defense: u32,
        types: Vec<String>,
    ) -> Self {
        Self {
            id: None,
            poke_id,
            name: name.into(),
            nickname: None,
            hp,
            attack,
            defense,
            types,
            level: None,
            special1_name: None,
            special1_power: None,
            special1_multiplier: None,
            special2_name: None,
            special2_power: None,
            special2_multiplier: None,
        }
    }

    /// Display name (nickname if set, otherwise species name)
    pub fn display_name(&self) -> &str {
        self.nickname.as_deref().unwrap_or(&self.name)
    }

    /// Special move data for slot 1 or 2. Any other slot yields `None`.
    pub fn special(&self, slot: u8) -> Option<SpecialEntry<'_>> {
        match slot {
            1 => Some(SpecialEntry {
                name: self.special1_name.as_deref(),
                power: self.special1_power,
                multiplier: self.special1_multiplier,
            }),
            2 => Some(SpecialEntry {
                name: self.special2_name.as_deref(),
                power: self.special2_power,
                multiplier: self.special2_multiplier,
            }),
            _ => None,
        }
    }
}
