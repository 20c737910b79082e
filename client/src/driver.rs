use std::sync::Arc;

use anyhow::Context;
use arena_battle::{
    Action, BattleMember, BattleSession, Effectiveness, InvalidAction, Outcome, Phase, Redirect,
    Resolution, TurnOutcome, TypeChart,
};
use tokio::sync::mpsc;
use tokio::task::JoinHandle;

use crate::backend::Backend;
use crate::config::{ArenaConfig, OwnerId};
use crate::error::ArenaError;
use crate::handle::Command;
use crate::handler::BattleHandler;

/// What the end-of-battle report managed to do
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EndReport {
    /// The result reached the backend
    pub reported: bool,
    /// Heals on the player's profile afterwards, when the backend told us
    pub heals: Option<u32>,
}

/// Owns one battle session and connects it to the backend.
///
/// Actions are applied one at a time. When the session resolves, the
/// outcome is reported from a background task that runs at most once per
/// battle; its failures are logged and never retried.
pub struct BattleDriver<B: Backend, E: Effectiveness = TypeChart> {
    backend: Arc<B>,
    owner: OwnerId,
    tick_interval: std::time::Duration,
    session: BattleSession<E>,
    capture: Option<BattleMember>,
    pending_report: Option<JoinHandle<EndReport>>,
}

impl<B: Backend> BattleDriver<B, TypeChart> {
    /// Load both rosters and start a battle using the standard type chart
    pub async fn setup(backend: Arc<B>, config: ArenaConfig) -> Result<Self, ArenaError> {
        Self::setup_with(backend, config, TypeChart).await
    }
}

impl<B: Backend, E: Effectiveness> BattleDriver<B, E> {
    /// Load both rosters and start a battle
    ///
    /// An empty player team aborts with a redirect to the team editor.
    pub async fn setup_with(
        backend: Arc<B>,
        config: ArenaConfig,
        effectiveness: E,
    ) -> Result<Self, ArenaError> {
        let ArenaConfig {
            owner,
            session,
            tick_interval,
        } = config;
        let mut session = BattleSession::with_effectiveness(session, effectiveness);

        let loaded = tokio::try_join!(
            async {
                backend
                    .load_roster(&owner)
                    .await
                    .with_context(|| format!("Failed to load team of {}", owner))
            },
            async {
                backend
                    .load_opponent_roster()
                    .await
                    .context("Failed to load opponents")
            },
        );

        let (player, opponent) = match loaded {
            Ok(rosters) => rosters,
            Err(e) => {
                session.abort(Redirect::Dashboard);
                tracing::warn!(owner = %owner, error = %e, "Battle setup failed");
                return Err(e.into());
            }
        };

        if let Err(e) = session.start(&player, &opponent) {
            let redirect = match session.phase() {
                Phase::Aborted(redirect) => redirect,
                _ => Redirect::Dashboard,
            };
            tracing::info!(owner = %owner, error = %e, ?redirect, "Battle aborted");
            return Err(ArenaError::Aborted { redirect });
        }

        tracing::info!(
            owner = %owner,
            team = player.len(),
            opponents = opponent.len(),
            "Battle started"
        );

        Ok(Self {
            backend,
            owner,
            tick_interval,
            session,
            capture: None,
            pending_report: None,
        })
    }

    pub fn session(&self) -> &BattleSession<E> {
        &self.session
    }

    pub fn owner(&self) -> &OwnerId {
        &self.owner
    }

    /// Apply one player action
    pub fn act(&mut self, action: Action) -> Result<TurnOutcome, InvalidAction> {
        match self.session.act(action) {
            Ok(outcome) => {
                tracing::debug!(?action, ?outcome, phase = ?self.session.phase(), "Turn resolved");
                self.process_end();
                Ok(outcome)
            }
            Err(reason) => {
                tracing::debug!(?action, %reason, "Action rejected");
                Err(reason)
            }
        }
    }

    /// Advance cooldowns by one tick
    pub fn tick(&mut self) {
        self.session.tick();
    }

    /// Run the end-of-battle side effects if the battle just resolved
    ///
    /// Safe to call any number of times: the session hands out its
    /// resolution only once.
    fn process_end(&mut self) -> Option<Resolution> {
        let resolution = self.session.take_resolution()?;

        tracing::info!(
            owner = %self.owner,
            outcome = %resolution.outcome,
            member_id = ?resolution.member_id,
            heals_used = resolution.heals_used,
            "Battle resolved"
        );

        self.capture = resolution.capture.clone();
        self.pending_report = Some(tokio::spawn(report_end(
            Arc::clone(&self.backend),
            self.owner.clone(),
            resolution.clone(),
        )));
        Some(resolution)
    }

    /// Wait for the end-of-battle report, if one was started
    pub async fn settle(&mut self) -> Option<EndReport> {
        let handle = self.pending_report.take()?;
        match handle.await {
            Ok(report) => Some(report),
            Err(e) => {
                tracing::warn!(error = %e, "End-of-battle report task failed");
                None
            }
        }
    }

    /// Capture the last defeated opponent; only possible once, after a win
    pub async fn capture(&mut self, nickname: Option<String>) -> Result<BattleMember, ArenaError> {
        let member = self.capture.take().ok_or(ArenaError::NothingToCapture)?;

        if let Err(e) = self
            .backend
            .capture(&self.owner, member.poke_id, nickname)
            .await
        {
            tracing::warn!(
                owner = %self.owner,
                poke_id = member.poke_id,
                error = %e,
                "Capture failed"
            );
            self.capture = Some(member);
            return Err(e.into());
        }

        tracing::info!(owner = %self.owner, poke_id = member.poke_id, "Captured {}", member.name);
        Ok(member)
    }

    /// Run the battle loop until the handle leaves or is dropped.
    ///
    /// Commands and cooldown ticks are handled one at a time, so no two
    /// transitions ever interleave.
    pub async fn run<H: BattleHandler>(
        &mut self,
        mut commands: mpsc::Receiver<Command>,
        handler: &mut H,
    ) {
        let mut ticker = tokio::time::interval(self.tick_interval);
        ticker.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Delay);
        // The first tick completes immediately
        ticker.tick().await;

        loop {
            tokio::select! {
                _ = ticker.tick() => self.tick(),
                command = commands.recv() => match command {
                    Some(Command::Leave) | None => break,
                    Some(command) => self.dispatch(command, handler).await,
                },
            }
        }

        tracing::debug!(owner = %self.owner, phase = ?self.session.phase(), "Battle loop stopped");
    }

    async fn dispatch<H: BattleHandler>(&mut self, command: Command, handler: &mut H) {
        match command {
            Command::Act { action, reply } => {
                let result = match self.session.act(action) {
                    Ok(outcome) => {
                        tracing::debug!(?action, ?outcome, "Turn resolved");
                        handler.on_turn(&outcome).await;
                        if self.session.phase() == Phase::ForcedSwitch
                            && let Some(team) = self.session.player_team()
                        {
                            handler.on_forced_switch(team).await;
                        }
                        if let Some(resolution) = self.process_end() {
                            handler.on_resolved(&resolution).await;
                        }
                        Ok(outcome)
                    }
                    Err(reason) => {
                        tracing::debug!(?action, %reason, "Action rejected");
                        handler.on_rejected(&action, &reason).await;
                        Err(reason.into())
                    }
                };
                let _ = reply.send(result);
            }
            Command::Capture { nickname, reply } => {
                let result = self.capture(nickname).await;
                if let Ok(member) = &result {
                    handler.on_captured(member).await;
                }
                let _ = reply.send(result);
            }
            Command::Leave => {}
        }
    }
}

/// Report a finished battle to the backend
///
/// Each step runs even if an earlier one failed.
async fn report_end<B: Backend>(
    backend: Arc<B>,
    owner: OwnerId,
    resolution: Resolution,
) -> EndReport {
    let mut report = EndReport::default();

    match resolution.member_id {
        Some(member_id) => match backend.report_battle_result(member_id, resolution.outcome).await {
            Ok(()) => report.reported = true,
            Err(e) => {
                tracing::warn!(
                    member_id,
                    outcome = %resolution.outcome,
                    error = %e,
                    "Failed to report battle result"
                )
            }
        },
        None => tracing::warn!(owner = %owner, "Active member has no id, result not reported"),
    }

    match resolution.outcome {
        Outcome::Win => match backend.reset_heals(&owner).await {
            Ok(heals) => report.heals = Some(heals),
            Err(e) => tracing::warn!(owner = %owner, error = %e, "Failed to reset heals"),
        },
        Outcome::Lose if resolution.heals_used > 0 => {
            match backend.apply_heal_usage(&owner, resolution.heals_used).await {
                Ok(left) => report.heals = Some(left),
                Err(e) => tracing::warn!(
                    owner = %owner,
                    heals_used = resolution.heals_used,
                    error = %e,
                    "Failed to record heal usage"
                ),
            }
        }
        Outcome::Lose => {}
    }

    report
}
