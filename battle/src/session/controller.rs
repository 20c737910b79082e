use arena_roster::RosterEntry;

use super::config::SessionConfig;
use super::cooldown::Cooldowns;
use crate::engine::{
    Effectiveness, Exchange, TurnAction, TurnEngine, TurnOutcome, TypeChart, Verdict,
};
use crate::error::{BattleError, InvalidAction};
use crate::types::{BattleMember, MoveSlot, Team};

/// Final result of a battle, from the player's side
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum Outcome {
    Win,
    Lose,
}

impl Outcome {
    pub fn as_str(&self) -> &'static str {
        match self {
            Outcome::Win => "win",
            Outcome::Lose => "lose",
        }
    }
}

impl std::fmt::Display for Outcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Where the front end should send the player after an aborted setup
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Redirect {
    /// The player has no team yet
    TeamEditor,
    Dashboard,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Phase {
    /// Waiting for rosters; no actions accepted
    Setup,
    InProgress,
    /// Player's active member fainted; only a switch is accepted
    ForcedSwitch,
    Resolved(Outcome),
    Aborted(Redirect),
}

impl Phase {
    pub fn is_terminal(&self) -> bool {
        matches!(self, Phase::Resolved(_) | Phase::Aborted(_))
    }
}

/// A player command
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Action {
    Attack(MoveSlot),
    Heal,
    Switch(usize),
}

/// Everything the end-of-battle side effects need, handed out once
#[derive(Debug, Clone, PartialEq)]
pub struct Resolution {
    pub outcome: Outcome,

    /// Player member credited with the result (its owned-creature id)
    pub member_id: Option<u64>,
    pub member_name: String,

    /// Heals spent during this battle
    pub heals_used: u32,

    /// On a win, the opponent member that went down last
    pub capture: Option<BattleMember>,
}

/// State of one battle from setup to resolution
#[derive(Debug, Clone)]
pub struct BattleSession<E = TypeChart> {
    config: SessionConfig,
    engine: TurnEngine<E>,
    phase: Phase,
    player: Option<Team>,
    opponent: Option<Team>,
    cooldowns: Cooldowns,
    heals_left: u32,
    heals_used: u32,
    end_processed: bool,
}

impl BattleSession<TypeChart> {
    /// Session using the standard type chart
    pub fn new(config: SessionConfig) -> Self {
        Self::with_effectiveness(config, TypeChart)
    }
}

impl<E: Effectiveness> BattleSession<E> {
    pub fn with_effectiveness(config: SessionConfig, effectiveness: E) -> Self {
        let heals_left = config.heal_budget;
        Self {
            config,
            engine: TurnEngine::new(effectiveness),
            phase: Phase::Setup,
            player: None,
            opponent: None,
            cooldowns: Cooldowns::new(),
            heals_left,
            heals_used: 0,
            end_processed: false,
        }
    }

    /// Load both rosters and begin the battle
    ///
    /// An empty roster on either side aborts the session for good.
    pub fn start(
        &mut self,
        player: &[RosterEntry],
        opponent: &[RosterEntry],
    ) -> Result<(), BattleError> {
        let player = player.iter().map(BattleMember::from_roster).collect();
        let opponent = opponent.iter().map(BattleMember::from_roster).collect();
        self.start_with_members(player, opponent)
    }

    /// Same as [`start`](Self::start), from already-built members
    ///
    /// Only valid once, in [`Phase::Setup`]; later calls fail with
    /// [`BattleError::AlreadyStarted`] and leave the session as it was.
    pub fn start_with_members(
        &mut self,
        player: Vec<BattleMember>,
        opponent: Vec<BattleMember>,
    ) -> Result<(), BattleError> {
        if self.phase != Phase::Setup {
            return Err(BattleError::AlreadyStarted);
        }

        let player = match Team::init(player) {
            Ok(team) => team,
            Err(e) => {
                self.phase = Phase::Aborted(Redirect::TeamEditor);
                return Err(e);
            }
        };
        let opponent = match Team::init(opponent) {
            Ok(team) => team,
            Err(e) => {
                self.phase = Phase::Aborted(Redirect::Dashboard);
                return Err(e);
            }
        };

        self.player = Some(player);
        self.opponent = Some(opponent);
        self.phase = Phase::InProgress;
        Ok(())
    }

    /// Abandon setup, e.g. when a roster could not be loaded
    pub fn abort(&mut self, redirect: Redirect) {
        if self.phase == Phase::Setup {
            self.phase = Phase::Aborted(redirect);
        }
    }

    /// Apply one player action
    ///
    /// On `Err` nothing changed: no cooldown armed, no heal spent, no riposte.
    pub fn act(&mut self, action: Action) -> Result<TurnOutcome, InvalidAction> {
        let (player, opponent) = match (self.phase, &self.player, &self.opponent) {
            (Phase::InProgress | Phase::ForcedSwitch, Some(p), Some(o)) => (p, o),
            _ => return Err(InvalidAction::NotInProgress),
        };

        if self.phase == Phase::ForcedSwitch {
            let Action::Switch(index) = action else {
                return Err(InvalidAction::ForcedSwitchPending);
            };
            let (team, outcome) = self.engine.resolve_forced_switch(player, index)?;
            self.player = Some(team);
            self.phase = Phase::InProgress;
            return Ok(outcome);
        }

        let exchange = match action {
            Action::Attack(slot) => {
                let remaining = self.cooldowns.get(slot);
                if remaining > 0 {
                    return Err(InvalidAction::CooldownPending { slot, remaining });
                }
                let exchange = self.engine.resolve(player, opponent, TurnAction::Attack(slot))?;
                self.cooldowns.arm(slot, &self.config.cooldowns);
                exchange
            }
            Action::Heal => {
                if self.heals_left == 0 {
                    return Err(InvalidAction::NoHealsLeft);
                }
                let active = player.active().ok_or(InvalidAction::NotInProgress)?;
                let amount = self.config.heal_policy.amount(active.max_hp);
                let exchange = self.engine.resolve(player, opponent, TurnAction::Heal(amount))?;
                self.heals_left -= 1;
                self.heals_used += 1;
                exchange
            }
            Action::Switch(index) => {
                self.engine.resolve(player, opponent, TurnAction::Switch(index))?
            }
        };

        Ok(self.apply(exchange))
    }

    fn apply(&mut self, exchange: Exchange) -> TurnOutcome {
        let Exchange {
            player,
            opponent,
            outcome,
            verdict,
        } = exchange;

        self.player = Some(player);
        self.opponent = Some(opponent);
        self.phase = match verdict {
            Verdict::Continue => Phase::InProgress,
            Verdict::ForcedSwitch => Phase::ForcedSwitch,
            Verdict::Win => Phase::Resolved(Outcome::Win),
            Verdict::Lose => Phase::Resolved(Outcome::Lose),
        };
        outcome
    }

    /// Advance cooldown timers by one tick
    pub fn tick(&mut self) {
        self.cooldowns.tick();
    }

    /// Claim the end-of-battle record
    ///
    /// Returns `Some` exactly once per session, on the first call after the
    /// battle is resolved. Every later call returns `None`.
    pub fn take_resolution(&mut self) -> Option<Resolution> {
        let Phase::Resolved(outcome) = self.phase else {
            return None;
        };
        if self.end_processed {
            return None;
        }
        self.end_processed = true;

        let active = self.player.as_ref().and_then(Team::active);
        let capture = match outcome {
            Outcome::Win => self.opponent.as_ref().and_then(Team::active).cloned(),
            Outcome::Lose => None,
        };

        Some(Resolution {
            outcome,
            member_id: active.and_then(|m| m.id),
            member_name: active.map(|m| m.display_name().to_string()).unwrap_or_default(),
            heals_used: self.heals_used,
            capture,
        })
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn result(&self) -> Option<Outcome> {
        match self.phase {
            Phase::Resolved(outcome) => Some(outcome),
            _ => None,
        }
    }

    pub fn is_over(&self) -> bool {
        self.phase.is_terminal()
    }

    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    pub fn player_team(&self) -> Option<&Team> {
        self.player.as_ref()
    }

    pub fn opponent_team(&self) -> Option<&Team> {
        self.opponent.as_ref()
    }

    pub fn player_active(&self) -> Option<&BattleMember> {
        self.player.as_ref().and_then(Team::active)
    }

    pub fn opponent_active(&self) -> Option<&BattleMember> {
        self.opponent.as_ref().and_then(Team::active)
    }

    pub fn cooldowns(&self) -> &Cooldowns {
        &self.cooldowns
    }

    pub fn cooldown(&self, slot: MoveSlot) -> u32 {
        self.cooldowns.get(slot)
    }

    pub fn heals_left(&self) -> u32 {
        self.heals_left
    }

    pub fn heals_used(&self) -> u32 {
        self.heals_used
    }

    /// Check whether an action would currently be accepted
    ///
    /// Cheap pre-check for enabling buttons; `act` still validates.
    pub fn can_act(&self, action: Action) -> bool {
        let Some(player) = self.player.as_ref() else {
            return false;
        };
        match (self.phase, action) {
            (Phase::ForcedSwitch, Action::Switch(index)) => player.can_switch_to(index),
            (Phase::InProgress, Action::Attack(slot)) => {
                self.cooldowns.is_ready(slot)
                    && player
                        .active()
                        .is_some_and(|m| !slot.is_special() || m.special(slot).is_some())
            }
            (Phase::InProgress, Action::Heal) => {
                self.heals_left > 0
            }
            (Phase::InProgress, Action::Switch(index)) => {
                index != player.active_index() && player.can_switch_to(index)
            }
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::{Fixed, Neutral};
    use crate::session::HealPolicy;
    use crate::types::SpecialMove;

    fn member(name: &str, hp: u32, attack: u32) -> BattleMember {
        BattleMember::new(name, hp, attack, 40, vec!["Normal".into()])
    }

    fn owned(id: u64, name: &str, hp: u32, attack: u32) -> BattleMember {
        let mut m = member(name, hp, attack);
        m.id = Some(id);
        m
    }

    fn session(player: Vec<BattleMember>, opponent: Vec<BattleMember>) -> BattleSession<Neutral> {
        let mut session = BattleSession::with_effectiveness(SessionConfig::default(), Neutral);
        session.start_with_members(player, opponent).unwrap();
        session
    }

    #[test]
    fn test_setup_rejects_actions() {
        let mut session = BattleSession::new(SessionConfig::default());
        assert_eq!(session.phase(), Phase::Setup);
        assert_eq!(session.act(Action::Attack(MoveSlot::Basic)), Err(InvalidAction::NotInProgress));
        assert!(session.player_active().is_none());
        assert!(session.take_resolution().is_none());
    }

    #[test]
    fn test_empty_player_roster_aborts() {
        let mut session = BattleSession::new(SessionConfig::default());
        let opponent = vec![RosterEntry::new(19, "Rattata", 150, 56, 35, vec!["Normal".into()])];

        assert_eq!(session.start(&[], &opponent), Err(BattleError::EmptyRoster));
        assert_eq!(session.phase(), Phase::Aborted(Redirect::TeamEditor));
        assert!(session.is_over());
        assert_eq!(session.act(Action::Heal), Err(InvalidAction::NotInProgress));
        assert!(session.take_resolution().is_none());
    }

    #[test]
    fn test_empty_opponent_roster_aborts() {
        let mut session = BattleSession::new(SessionConfig::default());
        let player = vec![RosterEntry::new(1, "Bulbasaur", 225, 49, 49, vec!["Grass".into()])];

        assert!(session.start(&player, &[]).is_err());
        assert_eq!(session.phase(), Phase::Aborted(Redirect::Dashboard));
    }

    #[test]
    fn test_start_from_roster() {
        let mut session = BattleSession::new(SessionConfig::default());
        let player = vec![RosterEntry::new(4, "Charmander", 195, 52, 43, vec!["Fire".into()])];
        let opponent = vec![RosterEntry::new(1, "Bulbasaur", 225, 49, 49, vec!["Grass".into()])];
        session.start(&player, &opponent).unwrap();

        assert_eq!(session.phase(), Phase::InProgress);
        let outcome = session.act(Action::Attack(MoveSlot::Basic)).unwrap();
        // Fire into Grass doubles
        assert_eq!(outcome.player_strike.unwrap().damage.total, 104);
        assert_eq!(session.opponent_active().unwrap().current_hp(), 121);
    }

    #[test]
    fn test_one_hit_win_scenario() {
        let mut session = session(
            vec![owned(9, "Hero", 100, 50)],
            vec![member("Weakling", 40, 10)],
        );

        let outcome = session.act(Action::Attack(MoveSlot::Basic)).unwrap();

        assert_eq!(outcome.player_strike.unwrap().damage.total, 50);
        assert!(outcome.riposte.is_none());
        assert_eq!(session.phase(), Phase::Resolved(Outcome::Win));
        assert_eq!(session.result(), Some(Outcome::Win));
        assert_eq!(session.player_active().unwrap().current_hp(), 100);

        let resolution = session.take_resolution().unwrap();
        assert_eq!(resolution.outcome, Outcome::Win);
        assert_eq!(resolution.member_id, Some(9));
        assert_eq!(resolution.capture.unwrap().name, "Weakling");
    }

    #[test]
    fn test_resolution_latch_fires_once() {
        let mut session = session(vec![member("Hero", 100, 50)], vec![member("Weakling", 40, 10)]);
        assert!(session.take_resolution().is_none());

        session.act(Action::Attack(MoveSlot::Basic)).unwrap();

        let taken = (0..5).filter_map(|_| session.take_resolution()).count();
        assert_eq!(taken, 1);

        // Further actions are rejected and cannot re-arm the latch
        assert_eq!(
            session.act(Action::Attack(MoveSlot::Special1)),
            Err(InvalidAction::NotInProgress)
        );
        assert!(session.take_resolution().is_none());
    }

    #[test]
    fn test_cooldown_gate() {
        let mut session = session(vec![member("Hero", 100, 10)], vec![member("Tank", 1000, 1)]);

        session.act(Action::Attack(MoveSlot::Basic)).unwrap();
        assert_eq!(session.cooldown(MoveSlot::Basic), 1);

        let before_opp = session.opponent_active().unwrap().current_hp();
        let before_player = session.player_active().unwrap().current_hp();
        assert_eq!(
            session.act(Action::Attack(MoveSlot::Basic)),
            Err(InvalidAction::CooldownPending { slot: MoveSlot::Basic, remaining: 1 })
        );
        // Rejection changed nothing and drew no riposte
        assert_eq!(session.opponent_active().unwrap().current_hp(), before_opp);
        assert_eq!(session.player_active().unwrap().current_hp(), before_player);

        session.tick();
        assert!(session.act(Action::Attack(MoveSlot::Basic)).is_ok());
    }

    #[test]
    fn test_special_cooldowns_independent() {
        let hero = member("Hero", 100, 10)
            .with_special(MoveSlot::Special1, SpecialMove::fallback(MoveSlot::Special1))
            .with_special(MoveSlot::Special2, SpecialMove::fallback(MoveSlot::Special2));
        let mut session = session(vec![hero], vec![member("Tank", 1000, 1)]);

        session.act(Action::Attack(MoveSlot::Special2)).unwrap();
        assert_eq!(session.cooldown(MoveSlot::Special2), 8);
        assert_eq!(session.cooldown(MoveSlot::Special1), 0);

        session.act(Action::Attack(MoveSlot::Special1)).unwrap();
        assert_eq!(session.cooldown(MoveSlot::Special1), 5);

        for _ in 0..20 {
            session.tick();
        }
        assert_eq!(*session.cooldowns(), Cooldowns::default());
    }

    #[test]
    fn test_missing_special_does_not_arm_cooldown() {
        let mut session = session(vec![member("Plain", 100, 10)], vec![member("Tank", 1000, 1)]);
        assert_eq!(
            session.act(Action::Attack(MoveSlot::Special1)),
            Err(InvalidAction::MoveUnavailable(MoveSlot::Special1))
        );
        assert_eq!(session.cooldown(MoveSlot::Special1), 0);
        assert!(!session.can_act(Action::Attack(MoveSlot::Special1)));
    }

    #[test]
    fn test_heal_budget_scenario() {
        let config = SessionConfig {
            heal_budget: 1,
            heal_policy: HealPolicy::Fraction(0.2),
            ..SessionConfig::default()
        };
        let mut session = BattleSession::with_effectiveness(config, Neutral);
        session
            .start_with_members(vec![member("Hero", 100, 10)], vec![member("Pacifist", 500, 0)])
            .unwrap();

        // Bring the player to 50/100 through the team transition
        let (hurt, _) = session.player.as_ref().unwrap().apply_damage_to_active(50);
        session.player = Some(hurt);

        let outcome = session.act(Action::Heal).unwrap();
        assert_eq!(outcome.healed, Some(20));
        // Heal always draws a riposte, even a harmless one
        assert_eq!(outcome.riposte.unwrap().damage.total, 0);
        assert_eq!(session.player_active().unwrap().current_hp(), 70);
        assert_eq!(session.heals_left(), 0);
        assert_eq!(session.heals_used(), 1);

        assert_eq!(session.act(Action::Heal), Err(InvalidAction::NoHealsLeft));
        assert_eq!(session.player_active().unwrap().current_hp(), 70);
        assert_eq!(session.heals_left(), 0);
    }

    #[test]
    fn test_heal_at_full_hp_still_spends_and_draws_riposte() {
        let mut session = session(vec![member("Hero", 100, 10)], vec![member("Foe", 100, 10)]);
        assert!(session.can_act(Action::Heal));

        let outcome = session.act(Action::Heal).unwrap();
        assert_eq!(outcome.healed, Some(0));
        assert_eq!(outcome.riposte.unwrap().damage.total, 10);
        assert_eq!(session.player_active().unwrap().current_hp(), 90);
        assert_eq!(session.heals_left(), 1);
        assert_eq!(session.heals_used(), 1);
    }

    #[test]
    fn test_second_start_is_rejected() {
        let mut session = session(vec![member("Hero", 100, 10)], vec![member("Foe", 100, 10)]);
        session.act(Action::Attack(MoveSlot::Basic)).unwrap();

        let again =
            session.start_with_members(vec![member("Other", 50, 5)], vec![member("Foe", 100, 10)]);
        assert_eq!(again, Err(BattleError::AlreadyStarted));
        assert_eq!(session.phase(), Phase::InProgress);
        assert_eq!(session.player_active().unwrap().name, "Hero");
        assert_eq!(session.opponent_active().unwrap().current_hp(), 90);
    }

    #[test]
    fn test_start_after_abort_is_rejected() {
        let mut session = BattleSession::new(SessionConfig::default());
        assert_eq!(
            session.start_with_members(Vec::new(), vec![member("Foe", 100, 10)]),
            Err(BattleError::EmptyRoster)
        );
        assert_eq!(session.phase(), Phase::Aborted(Redirect::TeamEditor));

        let retry =
            session.start_with_members(vec![member("Hero", 100, 10)], vec![member("Foe", 100, 10)]);
        assert_eq!(retry, Err(BattleError::AlreadyStarted));
        assert_eq!(session.phase(), Phase::Aborted(Redirect::TeamEditor));
        assert!(session.player_team().is_none());
    }

    #[test]
    fn test_forced_switch_flow() {
        let mut session = session(
            vec![owned(1, "Glass", 10, 5), owned(2, "Backup", 100, 5)],
            vec![member("Brute", 500, 40)],
        );

        let outcome = session.act(Action::Attack(MoveSlot::Basic)).unwrap();
        assert!(outcome.riposte.unwrap().defender_fainted);
        assert_eq!(session.phase(), Phase::ForcedSwitch);

        // Everything but a valid switch is blocked
        session.tick();
        assert_eq!(
            session.act(Action::Attack(MoveSlot::Basic)),
            Err(InvalidAction::ForcedSwitchPending)
        );
        assert_eq!(session.act(Action::Heal), Err(InvalidAction::ForcedSwitchPending));
        assert_eq!(session.act(Action::Switch(0)), Err(InvalidAction::SwitchToFainted(0)));
        assert_eq!(session.act(Action::Switch(7)), Err(InvalidAction::SwitchOutOfRange(7)));
        assert_eq!(session.phase(), Phase::ForcedSwitch);
        assert!(session.can_act(Action::Switch(1)));

        let outcome = session.act(Action::Switch(1)).unwrap();
        assert_eq!(outcome.switched_to, Some(1));
        assert!(outcome.riposte.is_none());
        assert_eq!(session.phase(), Phase::InProgress);
        assert_eq!(session.player_active().unwrap().current_hp(), 100);
    }

    #[test]
    fn test_loss_reports_heals_used() {
        let mut session = session(vec![owned(5, "Hero", 100, 1)], vec![member("Brute", 500, 30)]);

        session.act(Action::Attack(MoveSlot::Basic)).unwrap();
        session.act(Action::Heal).unwrap();
        session.tick();
        session.act(Action::Attack(MoveSlot::Basic)).unwrap();
        session.tick();
        session.act(Action::Attack(MoveSlot::Basic)).unwrap();

        assert_eq!(session.phase(), Phase::Resolved(Outcome::Lose));
        let resolution = session.take_resolution().unwrap();
        assert_eq!(resolution.outcome, Outcome::Lose);
        assert_eq!(resolution.member_id, Some(5));
        assert_eq!(resolution.heals_used, 1);
        assert!(resolution.capture.is_none());
    }

    #[test]
    fn test_voluntary_switch_consumes_turn() {
        let mut session = session(
            vec![member("Lead", 100, 5), member("Bench", 100, 5)],
            vec![member("Foe", 500, 25)],
        );

        assert_eq!(session.act(Action::Switch(0)), Err(InvalidAction::AlreadyActive(0)));
        let outcome = session.act(Action::Switch(1)).unwrap();
        assert_eq!(outcome.riposte.unwrap().damage.total, 25);
        assert_eq!(session.player_active().unwrap().name, "Bench");
        assert_eq!(session.player_active().unwrap().current_hp(), 75);
    }

    #[test]
    fn test_team_battle_to_win() {
        let mut session = BattleSession::with_effectiveness(SessionConfig::default(), Fixed(1.0));
        session
            .start_with_members(
                vec![member("Hero", 500, 60)],
                vec![member("A", 50, 10), member("B", 50, 10), member("C", 50, 10)],
            )
            .unwrap();

        for expected_next in [Some(1), Some(2)] {
            let outcome = session.act(Action::Attack(MoveSlot::Basic)).unwrap();
            assert_eq!(outcome.opponent_switched_to, expected_next);
            assert!(outcome.riposte.is_none());
            session.tick();
        }

        session.act(Action::Attack(MoveSlot::Basic)).unwrap();
        assert_eq!(session.result(), Some(Outcome::Win));
        assert_eq!(session.take_resolution().unwrap().capture.unwrap().name, "C");
        assert_eq!(session.player_active().unwrap().current_hp(), 500);
    }

    #[test]
    fn test_hp_invariant_over_long_battle() {
        let mut session = session(
            vec![member("P1", 120, 13), member("P2", 90, 17)],
            vec![member("O1", 150, 11), member("O2", 70, 19)],
        );

        for step in 0..200 {
            if session.is_over() {
                break;
            }
            let action = if session.phase() == Phase::ForcedSwitch {
                let next = session
                    .player_team()
                    .unwrap()
                    .find_next_alive_index_after(None)
                    .unwrap();
                Action::Switch(next)
            } else if step % 4 == 3 {
                Action::Heal
            } else {
                Action::Attack(MoveSlot::Basic)
            };
            let _ = session.act(action);
            session.tick();

            for team in [session.player_team().unwrap(), session.opponent_team().unwrap()] {
                for m in team.members() {
                    assert!(m.current_hp() <= m.max_hp);
                }
            }
        }

        assert!(session.is_over());
    }
}
