//! Match driver: turn orchestration around a [`GameSession`].
//!
//! The driver owns the session and is the single logical thread of
//! control: every mutation happens inside [`MatchDriver::run`], in the
//! order commands are accepted. Deferred work - the computer's reply and
//! the post-win celebration chain - is a [`Scheduled`] send of a command
//! stamped with the session generation observed at scheduling time; a
//! command whose stamp no longer matches at fire time is a no-op, so a
//! stale timer can never corrupt a newer session.

use crate::action::{InvalidMove, Move};
use crate::position::Position;
use crate::schedule::{Scheduled, send_after};
use crate::search::{self, Difficulty};
use crate::session::{GameSession, PlayerKind, SessionStatus, Snapshot};
use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tokio::sync::mpsc;
use tracing::{debug, info, instrument, warn};

/// Commands processed by the driver, one at a time.
///
/// The generation-stamped variants are produced by the driver's own
/// timers; external callers send the others.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// A move intent for the active slot at a raw board index.
    Move {
        /// Board index (0-8); anything else is rejected as unplayable.
        index: usize,
    },
    /// Clear the board and status, keep scores.
    NewGame,
    /// Clear the board, status, and every tally.
    ResetScores,
    /// Deferred computer reply.
    ComputerMove {
        /// Session generation when the reply was scheduled.
        generation: u64,
    },
    /// Deferred end of the celebration window.
    CelebrationOver {
        /// Session generation when the window opened.
        generation: u64,
    },
    /// Deferred reset signal after the celebration closes.
    ResetSignal {
        /// Session generation when the signal was scheduled.
        generation: u64,
    },
    /// Stop the driver.
    Shutdown,
}

/// Events emitted to the hosting UI.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GameEvent {
    /// The session changed; here is the new view.
    StateChanged(Snapshot),
    /// The computer's reply has been scheduled.
    ComputerThinking,
    /// A move was committed.
    MoveMade {
        /// Display name of the mover.
        player: String,
        /// Where the mark landed.
        position: Position,
    },
    /// A move intent was rejected; the session is unchanged.
    MoveRejected {
        /// Why the move was rejected.
        reason: InvalidMove,
    },
    /// The game reached a terminal state.
    GameOver {
        /// Winner's display name, or `None` for a draw.
        winner: Option<String>,
    },
    /// The celebration window closed.
    CelebrationEnded,
    /// The caller should reset the session (fires a beat after the
    /// celebration ends; draws never request this).
    ResetRequested,
}

/// Callback fired once per won game with the winner's display name.
///
/// Intended for an external leaderboard, which adds exactly one win per
/// call; the engine itself persists nothing.
pub type WinObserver = Box<dyn Fn(&str) + Send>;

/// Driver timing and strength settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DriverConfig {
    /// Delay before the computer's reply, so the prior move can render.
    pub move_delay: Duration,
    /// How long the post-win celebration window stays open.
    pub celebration: Duration,
    /// Pause between celebration end and the reset signal.
    pub reset_grace: Duration,
    /// Computer strength.
    pub difficulty: Difficulty,
}

impl Default for DriverConfig {
    fn default() -> Self {
        Self {
            move_delay: Duration::from_millis(500),
            celebration: Duration::from_secs(5),
            reset_grace: Duration::from_secs(1),
            difficulty: Difficulty::Perfect,
        }
    }
}

/// Orchestrates one session: human intents in, events out, computer
/// replies and celebration timing in between.
pub struct MatchDriver {
    session: GameSession,
    config: DriverConfig,
    command_tx: mpsc::UnboundedSender<Command>,
    command_rx: mpsc::UnboundedReceiver<Command>,
    event_tx: mpsc::UnboundedSender<GameEvent>,
    win_observer: Option<WinObserver>,
    pending_move: Option<Scheduled>,
    pending_celebration: Option<Scheduled>,
    pending_reset: Option<Scheduled>,
}

impl MatchDriver {
    /// Creates a driver around a session.
    pub fn new(
        session: GameSession,
        config: DriverConfig,
        event_tx: mpsc::UnboundedSender<GameEvent>,
    ) -> Self {
        let (command_tx, command_rx) = mpsc::unbounded_channel();
        Self {
            session,
            config,
            command_tx,
            command_rx,
            event_tx,
            win_observer: None,
            pending_move: None,
            pending_celebration: None,
            pending_reset: None,
        }
    }

    /// Installs the win-observed callback.
    pub fn with_win_observer(mut self, observer: impl Fn(&str) + Send + 'static) -> Self {
        self.win_observer = Some(Box::new(observer));
        self
    }

    /// Handle for sending commands to the running driver.
    pub fn commands(&self) -> mpsc::UnboundedSender<Command> {
        self.command_tx.clone()
    }

    /// The session as the driver currently sees it.
    pub fn session(&self) -> &GameSession {
        &self.session
    }

    /// Runs the driver until [`Command::Shutdown`] or the command channel
    /// closes.
    #[instrument(skip(self))]
    pub async fn run(mut self) -> Result<()> {
        info!("starting match driver");
        self.emit_state()?;
        self.schedule_computer_turn()?;

        while let Some(command) = self.command_rx.recv().await {
            debug!(?command, "processing command");
            match command {
                Command::Move { index } => self.on_move_intent(index)?,
                Command::NewGame => self.on_reset(false)?,
                Command::ResetScores => self.on_reset(true)?,
                Command::ComputerMove { generation } => self.on_computer_move(generation)?,
                Command::CelebrationOver { generation } => {
                    self.on_celebration_over(generation)?
                }
                Command::ResetSignal { generation } => self.on_reset_signal(generation)?,
                Command::Shutdown => break,
            }
        }

        info!("match driver stopped");
        Ok(())
    }

    fn emit_state(&self) -> Result<()> {
        self.event_tx
            .send(GameEvent::StateChanged(self.session.snapshot()))?;
        Ok(())
    }

    /// Schedules the computer's reply if it is now a computer's turn.
    fn schedule_computer_turn(&mut self) -> Result<()> {
        if self.session.status() == SessionStatus::InProgress
            && self.session.active_slot().kind == PlayerKind::Computer
        {
            self.event_tx.send(GameEvent::ComputerThinking)?;
            self.pending_move = Some(send_after(
                self.command_tx.clone(),
                self.config.move_delay,
                Command::ComputerMove {
                    generation: self.session.generation(),
                },
            ));
        }
        Ok(())
    }

    fn on_move_intent(&mut self, index: usize) -> Result<()> {
        let player = self.session.active_slot().name.clone();
        let position = Position::from_index(index);
        let result = self.session.apply_move_at(index);
        self.handle_move(player, position, result)
    }

    fn on_computer_move(&mut self, generation: u64) -> Result<()> {
        if generation != self.session.generation() {
            debug!(
                scheduled = generation,
                current = self.session.generation(),
                "discarding stale computer move"
            );
            return Ok(());
        }

        let slot = self.session.active_slot();
        if slot.kind != PlayerKind::Computer {
            return Ok(());
        }
        let computer = slot.mark;
        let player = slot.name.clone();
        let Some(position) = search::choose_move(
            self.session.board(),
            computer,
            computer.opponent(),
            self.config.difficulty,
        ) else {
            return Ok(());
        };

        let result = self.session.apply_move(Move::new(computer, position));
        self.handle_move(player, Some(position), result)
    }

    /// Common commit path for human and computer moves.
    fn handle_move(
        &mut self,
        player: String,
        position: Option<Position>,
        result: Result<GameSession, InvalidMove>,
    ) -> Result<()> {
        match result {
            Ok(next) => {
                // An accepted move supersedes any pending computer reply.
                self.pending_move = None;
                self.session = next;
                if let Some(position) = position {
                    self.event_tx.send(GameEvent::MoveMade { player, position })?;
                }
                self.after_transition()
            }
            Err(reason) => {
                warn!(%player, %reason, "move rejected");
                self.event_tx.send(GameEvent::MoveRejected { reason })?;
                Ok(())
            }
        }
    }

    fn after_transition(&mut self) -> Result<()> {
        self.emit_state()?;
        match self.session.status() {
            SessionStatus::InProgress => self.schedule_computer_turn(),
            SessionStatus::Won(winner) => {
                let name = self.session.slot(winner).name.clone();
                if let Some(observer) = &self.win_observer {
                    observer(&name);
                }
                self.event_tx.send(GameEvent::GameOver {
                    winner: Some(name),
                })?;
                self.pending_celebration = Some(send_after(
                    self.command_tx.clone(),
                    self.config.celebration,
                    Command::CelebrationOver {
                        generation: self.session.generation(),
                    },
                ));
                Ok(())
            }
            SessionStatus::Draw => {
                // A draw parks the session until the caller resets it.
                self.event_tx.send(GameEvent::GameOver { winner: None })?;
                Ok(())
            }
        }
    }

    fn on_celebration_over(&mut self, generation: u64) -> Result<()> {
        if generation != self.session.generation() {
            debug!("discarding stale celebration expiry");
            return Ok(());
        }
        self.session = self.session.end_celebration();
        self.event_tx.send(GameEvent::CelebrationEnded)?;
        self.emit_state()?;
        self.pending_reset = Some(send_after(
            self.command_tx.clone(),
            self.config.reset_grace,
            Command::ResetSignal {
                generation: self.session.generation(),
            },
        ));
        Ok(())
    }

    fn on_reset_signal(&mut self, generation: u64) -> Result<()> {
        if generation != self.session.generation() {
            debug!("discarding stale reset signal");
            return Ok(());
        }
        self.event_tx.send(GameEvent::ResetRequested)?;
        Ok(())
    }

    fn on_reset(&mut self, zero_scores: bool) -> Result<()> {
        self.pending_move = None;
        self.pending_celebration = None;
        self.pending_reset = None;
        self.session = if zero_scores {
            self.session.reset_scores()
        } else {
            self.session.reset_board()
        };
        self.emit_state()?;
        self.schedule_computer_turn()
    }
}
