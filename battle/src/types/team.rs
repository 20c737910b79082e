//! Team model: an ordered roster with one active slot

use arena_roster::RosterEntry;

use super::member::BattleMember;
use crate::error::BattleError;

/// Maximum members brought into a battle; longer rosters are cut
pub const MAX_TEAM_SIZE: usize = 4;

/// One side's roster during a battle
///
/// Transitions never mutate in place: each returns a new `Team`, so a value
/// held by a reader never changes underneath it.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Team {
    members: Vec<BattleMember>,
    active_index: usize,
}

impl Team {
    /// Build a team from battle members
    ///
    /// Keeps at most [`MAX_TEAM_SIZE`] members, every one at full HP, with
    /// the first member active.
    pub fn init(roster: Vec<BattleMember>) -> Result<Self, BattleError> {
        if roster.is_empty() {
            return Err(BattleError::EmptyRoster);
        }

        let members = roster
            .into_iter()
            .take(MAX_TEAM_SIZE)
            .map(|m| {
                let max_hp = m.max_hp;
                m.with_hp(max_hp)
            })
            .collect();

        Ok(Self {
            members,
            active_index: 0,
        })
    }

    /// Build a team straight from roster entries
    pub fn from_roster(entries: &[RosterEntry]) -> Result<Self, BattleError> {
        Self::init(entries.iter().map(BattleMember::from_roster).collect())
    }

    /// The member currently fighting
    pub fn active(&self) -> Option<&BattleMember> {
        self.members.get(self.active_index)
    }

    pub fn active_index(&self) -> usize {
        self.active_index
    }

    pub fn members(&self) -> &[BattleMember] {
        &self.members
    }

    pub fn get(&self, index: usize) -> Option<&BattleMember> {
        self.members.get(index)
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    /// Damage the active member
    ///
    /// Returns the new team and whether the active member is now at 0 HP.
    /// Zero damage is allowed and changes nothing.
    #[must_use]
    pub fn apply_damage_to_active(&self, amount: u32) -> (Team, bool) {
        let Some(active) = self.active() else {
            return (self.clone(), false);
        };

        let (member, fainted) = active.damaged(amount);
        (self.with_active_member(member), fainted)
    }

    /// Restore HP to the active member, capped at its max HP
    ///
    /// Returns the new team and the amount actually restored.
    #[must_use]
    pub fn heal_active(&self, amount: u32) -> (Team, u32) {
        let Some(active) = self.active() else {
            return (self.clone(), 0);
        };

        let (member, restored) = active.healed(amount);
        (self.with_active_member(member), restored)
    }

    /// Make another member active
    ///
    /// An out-of-range or fainted target leaves the team unchanged, as does
    /// switching to the member that is already active.
    #[must_use]
    pub fn switch_active(&self, index: usize) -> Team {
        if !self.can_switch_to(index) {
            return self.clone();
        }

        Team {
            members: self.members.clone(),
            active_index: index,
        }
    }

    /// Check if a member exists and is still standing
    pub fn can_switch_to(&self, index: usize) -> bool {
        self.members.get(index).is_some_and(|m| !m.is_fainted())
    }

    /// First member in roster order with HP left, skipping `except`
    pub fn find_next_alive_index_after(&self, except: Option<usize>) -> Option<usize> {
        self.members
            .iter()
            .enumerate()
            .filter(|(idx, _)| Some(*idx) != except)
            .find(|(_, m)| !m.is_fainted())
            .map(|(idx, _)| idx)
    }

    /// Check if every member has fainted
    pub fn is_all_fainted(&self) -> bool {
        self.members.iter().all(|m| m.is_fainted())
    }

    pub fn alive_count(&self) -> usize {
        self.members.iter().filter(|m| !m.is_fainted()).count()
    }

    pub fn fainted_count(&self) -> usize {
        self.members.iter().filter(|m| m.is_fainted()).count()
    }

    /// Members that could be switched in (alive, not active)
    pub fn bench(&self) -> impl Iterator<Item = (usize, &BattleMember)> {
        self.members
            .iter()
            .enumerate()
            .filter(move |(idx, m)| *idx != self.active_index && !m.is_fainted())
    }

    fn with_active_member(&self, member: BattleMember) -> Team {
        let mut members = self.members.clone();
        members[self.active_index] = member;
        Team {
            members,
            active_index: self.active_index,
        }
    }
}
