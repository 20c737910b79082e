//! Battle member snapshot

use arena_roster::RosterEntry;

use super::moves::{MoveSlot, SpecialMove};

/// One creature during a battle
///
/// Stats are fixed at team creation; only `current_hp` changes, and only
/// through the team transitions.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BattleMember {
    /// Owned-creature id (None for wild opponents)
    pub id: Option<u64>,

    /// Species id
    pub poke_id: u64,

    pub name: String,
    pub nickname: Option<String>,

    /// Level (1-100)
    pub level: u8,

    pub max_hp: u32,
    pub attack: u32,
    pub defense: u32,

    /// Elemental type names in roster order
    pub types: Vec<String>,

    pub special1: Option<SpecialMove>,
    pub special2: Option<SpecialMove>,

    current_hp: u32,
}

impl BattleMember {
    /// Create a member at full HP with no special moves
    pub fn new(
        name: impl Into<String>,
        max_hp: u32,
        attack: u32,
        defense: u32,
        types: Vec<String>,
    ) -> Self {
        Self {
            id: None,
            poke_id: 0,
            name: name.into(),
            nickname: None,
            level: 100,
            max_hp,
            attack,
            defense,
            types,
            special1: None,
            special2: None,
            current_hp: max_hp,
        }
    }

    /// Create from a roster entry, at full HP
    ///
    /// Both special slots are always populated: missing names and powers fall
    /// back to the slot defaults.
    pub fn from_roster(entry: &RosterEntry) -> Self {
        let special = |slot: MoveSlot, n: u8| {
            let fallback = SpecialMove::fallback(slot);
            match entry.special(n) {
                Some(data) => SpecialMove {
                    name: data.name.map(str::to_string).unwrap_or(fallback.name),
                    power: data.power,
                    multiplier: data.multiplier.unwrap_or(fallback.multiplier),
                },
                None => fallback,
            }
        };

        Self {
            id: entry.id,
            poke_id: entry.poke_id,
            name: entry.name.clone(),
            nickname: entry.nickname.clone(),
            level: entry.level.unwrap_or(100),
            max_hp: entry.hp,
            attack: entry.attack,
            defense: entry.defense,
            types: entry.types.clone(),
            special1: Some(special(MoveSlot::Special1, 1)),
            special2: Some(special(MoveSlot::Special2, 2)),
            current_hp: entry.hp,
        }
    }

    /// Builder: set current HP (clamped to `max_hp`)
    pub fn with_hp(mut self, hp: u32) -> Self {
        self.current_hp = hp.min(self.max_hp);
        self
    }

    /// Builder: attach a special move to a slot
    pub fn with_special(mut self, slot: MoveSlot, special: SpecialMove) -> Self {
        match slot {
            MoveSlot::Special1 => self.special1 = Some(special),
            MoveSlot::Special2 => self.special2 = Some(special),
            MoveSlot::Basic => {}
        }
        self
    }

    /// Display name (nickname if set, otherwise species name)
    pub fn display_name(&self) -> &str {
        self.nickname.as_deref().unwrap_or(&self.name)
    }

    pub fn current_hp(&self) -> u32 {
        self.current_hp
    }

    /// HP as percentage (0-100)
    pub fn hp_percent(&self) -> u32 {
        if self.max_hp == 0 {
            return 0;
        }
        (self.current_hp * 100) / self.max_hp
    }

    pub fn is_fainted(&self) -> bool {
        self.current_hp == 0
    }

    pub fn is_full_hp(&self) -> bool {
        self.current_hp >= self.max_hp
    }

    /// Special move definition for a slot. `Basic` has none.
    pub fn special(&self, slot: MoveSlot) -> Option<&SpecialMove> {
        match slot {
            MoveSlot::Basic => None,
            MoveSlot::Special1 => self.special1.as_ref(),
            MoveSlot::Special2 => self.special2.as_ref(),
        }
    }

    /// Returns (new member, fainted)
    pub(crate) fn damaged(&self, amount: u32) -> (Self, bool) {
        let mut next = self.clone();
        next.current_hp = self.current_hp.saturating_sub(amount);
        let fainted = next.current_hp == 0;
        (next, fainted)
    }

    /// Returns (new member, HP actually restored)
    pub(crate) fn healed(&self, amount: u32) -> (Self, u32) {
        let mut next = self.clone();
        next.current_hp = self.current_hp.saturating_add(amount).min(self.max_hp);
        let restored = next.current_hp - self.current_hp;
        (next, restored)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry() -> RosterEntry {
        let mut entry = RosterEntry::new(7, "Squirtle", 220, 48, 65, vec!["Water".into()]);
        entry.id = Some(3);
        entry.special1_name = Some("Water Gun".to_string());
        entry.special2_power = Some(110.0);
        entry.special2_multiplier = Some(2.0);
        entry
    }

    #[test]
    fn test_from_roster_full_hp() {
        let member = BattleMember::from_roster(&entry());
        assert_eq!(member.id, Some(3));
        assert_eq!(member.current_hp(), 220);
        assert_eq!(member.max_hp, 220);
        assert_eq!(member.level, 100);
        assert!(!member.is_fainted());
        assert!(member.is_full_hp());
    }

    #[test]
    fn test_from_roster_special_defaults() {
        let member = BattleMember::from_roster(&entry());

        let first = member.special(MoveSlot::Special1).unwrap();
        assert_eq!(first.name, "Water Gun");
        assert_eq!(first.power, None);
        assert_eq!(first.multiplier, 1.2);

        let second = member.special(MoveSlot::Special2).unwrap();
        assert_eq!(second.name, "Special 2");
        assert_eq!(second.power, Some(110.0));
        assert_eq!(second.multiplier, 2.0);

        assert!(member.special(MoveSlot::Basic).is_none());
    }

    #[test]
    fn test_damaged_floors_at_zero() {
        let member = BattleMember::new("Test", 100, 10, 10, vec!["Normal".into()]);

        let (hit, fainted) = member.damaged(30);
        assert_eq!(hit.current_hp(), 70);
        assert!(!fainted);

        let (dead, fainted) = hit.damaged(500);
        assert_eq!(dead.current_hp(), 0);
        assert!(fainted);

        // Original untouched
        assert_eq!(member.current_hp(), 100);
    }

    #[test]
    fn test_healed_caps_at_max() {
        let member = BattleMember::new("Test", 100, 10, 10, vec!["Normal".into()]).with_hp(90);
        let (healed, restored) = member.healed(25);
        assert_eq!(healed.current_hp(), 100);
        assert_eq!(restored, 10);
    }

    #[test]
    fn test_with_hp_clamped() {
        let member = BattleMember::new("Test", 100, 10, 10, vec!["Normal".into()]).with_hp(400);
        assert_eq!(member.current_hp(), 100);
        assert_eq!(member.hp_percent(), 100);
    }

    #[test]
    fn test_display_name() {
        let mut member = BattleMember::new("Pikachu", 100, 55, 40, vec!["Electric".into()]);
        assert_eq!(member.display_name(), "Pikachu");
        member.nickname = Some("Sparky".to_string());
        assert_eq!(member.display_name(), "Sparky");
    }
}
