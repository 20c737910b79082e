//! Exchange sequencing: player action, then the opponent's riposte

use super::damage::{DamageBreakdown, compute_damage, move_power};
use super::effectiveness::Effectiveness;
use crate::error::InvalidAction;
use crate::types::{BattleMember, MoveSlot, Team};

/// An action already cleared by the session (cooldowns, heal budget)
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TurnAction {
    Attack(MoveSlot),
    /// Heal the active member by this many HP
    Heal(u32),
    /// Voluntary switch to a team index
    Switch(usize),
}

/// One attack landing on a defender
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Strike {
    pub attacker: String,
    pub defender: String,
    pub slot: MoveSlot,
    pub move_name: String,
    pub damage: DamageBreakdown,
    pub multiplier: f64,
    pub note: Option<String>,
    pub defender_fainted: bool,
}

/// What happened during one exchange
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TurnOutcome {
    /// The player's attack, if the action was one
    pub player_strike: Option<Strike>,

    /// The opponent's counter-attack, if it happened
    pub riposte: Option<Strike>,

    /// HP restored by a heal
    pub healed: Option<u32>,

    /// Player member switched in (voluntary or forced)
    pub switched_to: Option<usize>,

    /// Opponent member sent out after its active member fainted
    pub opponent_switched_to: Option<usize>,
}

/// Where the battle stands after an exchange
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Verdict {
    Continue,
    /// Player's active member fainted and a teammate must be chosen
    ForcedSwitch,
    Win,
    Lose,
}

/// Result of resolving one action against both teams
#[derive(Debug, Clone, PartialEq)]
pub struct Exchange {
    pub player: Team,
    pub opponent: Team,
    pub outcome: TurnOutcome,
    pub verdict: Verdict,
}

/// Stateless turn resolver, parameterized by the effectiveness lookup
#[derive(Debug, Clone, Default)]
pub struct TurnEngine<E> {
    effectiveness: E,
}

impl<E: Effectiveness> TurnEngine<E> {
    pub fn new(effectiveness: E) -> Self {
        Self { effectiveness }
    }

    pub fn effectiveness(&self) -> &E {
        &self.effectiveness
    }

    /// Compute one strike without applying it
    ///
    /// `defender_fainted` is filled in against the defender's current HP.
    pub fn strike(
        &self,
        attacker: &BattleMember,
        defender: &BattleMember,
        slot: MoveSlot,
    ) -> Option<Strike> {
        let power = move_power(attacker, slot)?;
        let effect = self.effectiveness.effectiveness(&attacker.types, &defender.types);
        let damage = compute_damage(power, effect.multiplier);

        let move_name = match attacker.special(slot) {
            Some(mv) => mv.name.clone(),
            None => slot.default_name().to_string(),
        };

        Some(Strike {
            attacker: attacker.display_name().to_string(),
            defender: defender.display_name().to_string(),
            slot,
            move_name,
            damage,
            multiplier: effect.multiplier,
            note: effect.note,
            defender_fainted: damage.total >= defender.current_hp(),
        })
    }

    /// Resolve a player action and, when due, the opponent's riposte
    pub fn resolve(
        &self,
        player: &Team,
        opponent: &Team,
        action: TurnAction,
    ) -> Result<Exchange, InvalidAction> {
        let mut outcome = TurnOutcome::default();

        let player = match action {
            TurnAction::Attack(slot) => {
                let (attacker, defender) = match (player.active(), opponent.active()) {
                    (Some(a), Some(d)) => (a, d),
                    _ => return Err(InvalidAction::NotInProgress),
                };
                let strike = self
                    .strike(attacker, defender, slot)
                    .ok_or(InvalidAction::MoveUnavailable(slot))?;

                let (opponent, fainted) = opponent.apply_damage_to_active(strike.damage.total);
                outcome.player_strike = Some(strike);

                if fainted {
                    if opponent.is_all_fainted() {
                        return Ok(Exchange {
                            player: player.clone(),
                            opponent,
                            outcome,
                            verdict: Verdict::Win,
                        });
                    }

                    // A fresh opponent does not counter on the turn it comes in
                    let next = opponent.find_next_alive_index_after(Some(opponent.active_index()));
                    let opponent = match next {
                        Some(idx) => opponent.switch_active(idx),
                        None => opponent,
                    };
                    outcome.opponent_switched_to = next;

                    return Ok(Exchange {
                        player: player.clone(),
                        opponent,
                        outcome,
                        verdict: Verdict::Continue,
                    });
                }

                return Ok(self.riposte(player.clone(), opponent, outcome));
            }
            TurnAction::Heal(amount) => {
                let (player, restored) = player.heal_active(amount);
                outcome.healed = Some(restored);
                player
            }
            TurnAction::Switch(index) => {
                check_switch(player, index)?;
                outcome.switched_to = Some(index);
                player.switch_active(index)
            }
        };

        Ok(self.riposte(player, opponent.clone(), outcome))
    }

    /// Opponent's active member counters with its basic attack
    fn riposte(&self, player: Team, opponent: Team, mut outcome: TurnOutcome) -> Exchange {
        let strike = match (opponent.active(), player.active()) {
            (Some(attacker), Some(defender)) => self.strike(attacker, defender, MoveSlot::Basic),
            _ => None,
        };

        let Some(strike) = strike else {
            return Exchange {
                player,
                opponent,
                outcome,
                verdict: Verdict::Continue,
            };
        };

        let (player, fainted) = player.apply_damage_to_active(strike.damage.total);
        outcome.riposte = Some(strike);

        let verdict = if !fainted {
            Verdict::Continue
        } else if player.is_all_fainted() {
            Verdict::Lose
        } else {
            Verdict::ForcedSwitch
        };

        Exchange {
            player,
            opponent,
            outcome,
            verdict,
        }
    }

    /// Bring in a replacement after the player's active member fainted
    pub fn resolve_forced_switch(
        &self,
        player: &Team,
        index: usize,
    ) -> Result<(Team, TurnOutcome), InvalidAction> {
        check_switch(player, index)?;
        let outcome = TurnOutcome {
            switched_to: Some(index),
            ..TurnOutcome::default()
        };
        Ok((player.switch_active(index), outcome))
    }
}

fn check_switch(team: &Team, index: usize) -> Result<(), InvalidAction> {
    match team.get(index) {
        None => Err(InvalidAction::SwitchOutOfRange(index)),
        Some(m) if m.is_fainted() => Err(InvalidAction::SwitchToFainted(index)),
        Some(_) if index == team.active_index() => Err(InvalidAction::AlreadyActive(index)),
        Some(_) => Ok(()),
    }
}
