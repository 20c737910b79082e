//! Random Arena Battle Example
//!
//! Plays one battle against a random wild group using the in-memory
//! backend. The player picks random actions and switches when forced.
//!
//! Run with `RUST_LOG`-style filtering through tracing-subscriber:
//! `cargo run -p arena-client --example arena_battle`

use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use arena_client::{
    Action, ArenaConfig, ArenaError, ArenaHandle, BattleDriver, BattleHandler, BattleMember,
    InvalidAction, MemoryBackend, MoveSlot, OwnerId, Resolution, RosterEntry, Team, TurnOutcome,
    command_channel,
};
use async_trait::async_trait;
use rand::seq::SliceRandom;

fn entry(id: u64, poke_id: u64, name: &str, hp: u32, attack: u32, types: &[&str]) -> RosterEntry {
    let mut entry = RosterEntry::new(
        poke_id,
        name,
        hp,
        attack,
        40,
        types.iter().map(|t| t.to_string()).collect(),
    );
    entry.id = Some(id);
    entry
}

struct Printer;

#[async_trait]
impl BattleHandler for Printer {
    async fn on_turn(&mut self, outcome: &TurnOutcome) {
        for strike in outcome.player_strike.iter().chain(outcome.riposte.iter()) {
            print!(
                "{} used {} on {} for {} damage",
                strike.attacker, strike.move_name, strike.defender, strike.damage.total
            );
            match &strike.note {
                Some(note) => println!(" ({})", note),
                None => println!(),
            }
            if strike.defender_fainted {
                println!("{} fainted!", strike.defender);
            }
        }
        if let Some(amount) = outcome.healed {
            println!("Healed {} HP", amount);
        }
    }

    async fn on_rejected(&mut self, action: &Action, reason: &InvalidAction) {
        println!("Can't {:?}: {}", action, reason);
    }

    async fn on_forced_switch(&mut self, team: &Team) {
        println!("Choose a new member ({} left)", team.alive_count());
    }

    async fn on_resolved(&mut self, resolution: &Resolution) {
        println!(
            "Battle over: {} with {} ({} heals used)",
            resolution.outcome, resolution.member_name, resolution.heals_used
        );
    }

    async fn on_captured(&mut self, member: &BattleMember) {
        println!("Caught {}!", member.display_name());
    }
}

async fn play(handle: ArenaHandle) -> Result<()> {
    let actions = [
        Action::Attack(MoveSlot::Basic),
        Action::Attack(MoveSlot::Special1),
        Action::Attack(MoveSlot::Special2),
        Action::Heal,
    ];

    loop {
        let action = *actions.choose(&mut rand::thread_rng()).unwrap_or(&actions[0]);
        match handle.act(action).await {
            Ok(_) => {}
            Err(ArenaError::Rejected(InvalidAction::ForcedSwitchPending)) => {
                for index in 0..arena_battle::MAX_TEAM_SIZE {
                    if handle.switch_to(index).await.is_ok() {
                        break;
                    }
                }
            }
            Err(ArenaError::Rejected(InvalidAction::NotInProgress)) => break,
            Err(ArenaError::Rejected(_)) => tokio::time::sleep(Duration::from_millis(100)).await,
            Err(e) => return Err(e.into()),
        }
    }

    match handle.capture(Some("Buddy".to_string())).await {
        Ok(_) | Err(ArenaError::NothingToCapture) => {}
        Err(e) => println!("Capture failed: {}", e),
    }
    handle.leave().await?;
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt::init();

    let owner = OwnerId::new("red");
    let team = vec![
        entry(1, 25, "Pikachu", 120, 35, &["Electric"]),
        entry(2, 4, "Charmander", 110, 32, &["Fire"]),
        entry(3, 7, "Squirtle", 130, 28, &["Water"]),
    ];
    let pool = vec![
        entry(0, 16, "Pidgey", 80, 20, &["Normal", "Flying"]),
        entry(0, 19, "Rattata", 70, 24, &["Normal"]),
        entry(0, 43, "Oddish", 90, 22, &["Grass", "Poison"]),
        entry(0, 74, "Geodude", 100, 26, &["Rock", "Ground"]),
        entry(0, 129, "Magikarp", 60, 5, &["Water"]),
    ];

    let backend = Arc::new(
        MemoryBackend::new()
            .with_roster(owner.clone(), team)
            .with_opponent_pool(pool),
    );

    let config = ArenaConfig {
        tick_interval: Duration::from_millis(100),
        ..ArenaConfig::new(owner.clone())
    }
    .with_heals(backend.heals(&owner));

    let mut driver = BattleDriver::setup(Arc::clone(&backend), config).await?;
    if let Some(opponent) = driver.session().opponent_active() {
        println!("A wild {} appeared!", opponent.name);
    }

    let (handle, commands) = command_channel(16);
    let player = tokio::spawn(play(handle));

    driver.run(commands, &mut Printer).await;
    player.await??;

    if let Some(report) = driver.settle().await {
        println!("Result reported: {}, heals now {:?}", report.reported, report.heals);
    }
    println!("Collection: {} member(s)", backend.collection(&owner).len());

    Ok(())
}
