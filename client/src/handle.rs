use arena_battle::{Action, BattleMember, MoveSlot, TurnOutcome};
use tokio::sync::{mpsc, oneshot};

use crate::error::ArenaError;

/// Requests processed by the battle loop, one at a time
#[derive(Debug)]
pub enum Command {
    Act {
        action: Action,
        reply: oneshot::Sender<Result<TurnOutcome, ArenaError>>,
    },
    Capture {
        nickname: Option<String>,
        reply: oneshot::Sender<Result<BattleMember, ArenaError>>,
    },
    /// Stop the loop; the battle is abandoned
    Leave,
}

/// Create a connected handle / command receiver pair
pub fn command_channel(buffer: usize) -> (ArenaHandle, mpsc::Receiver<Command>) {
    let (tx, rx) = mpsc::channel(buffer);
    (ArenaHandle { tx }, rx)
}

/// Cloneable handle for sending player commands to a running battle.
///
/// This can be passed to UI event handlers and cloned freely.
#[derive(Clone)]
pub struct ArenaHandle {
    tx: mpsc::Sender<Command>,
}

impl ArenaHandle {
    pub async fn act(&self, action: Action) -> Result<TurnOutcome, ArenaError> {
        let (reply, rx) = oneshot::channel();
        self.send(Command::Act { action, reply }).await?;
        rx.await.map_err(|_| ArenaError::Closed)?
    }

    pub async fn attack(&self, slot: MoveSlot) -> Result<TurnOutcome, ArenaError> {
        self.act(Action::Attack(slot)).await
    }

    pub async fn heal(&self) -> Result<TurnOutcome, ArenaError> {
        self.act(Action::Heal).await
    }

    pub async fn switch_to(&self, index: usize) -> Result<TurnOutcome, ArenaError> {
        self.act(Action::Switch(index)).await
    }

    /// Capture the defeated opponent after a win
    pub async fn capture(&self, nickname: Option<String>) -> Result<BattleMember, ArenaError> {
        let (reply, rx) = oneshot::channel();
        self.send(Command::Capture { nickname, reply }).await?;
        rx.await.map_err(|_| ArenaError::Closed)?
    }

    /// Abandon the battle
    pub async fn leave(&self) -> Result<(), ArenaError> {
        self.send(Command::Leave).await
    }

    async fn send(&self, command: Command) -> Result<(), ArenaError> {
        self.tx.send(command).await.map_err(|_| ArenaError::Closed)
    }
}
