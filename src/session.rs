//! Game session: slots, scores, and the move state machine.
//!
//! A [`GameSession`] is an immutable value; `apply_move` and the resets are
//! pure transitions returning a new session. That keeps the state machine
//! independently testable without any UI harness, and means a stale caller
//! can never mutate state out from under a newer one.

use crate::action::{InvalidMove, Move};
use crate::board::{Board, Mark};
use crate::position::Position;
use crate::rules::{self, Outcome};
use serde::{Deserialize, Serialize};
use tracing::{info, instrument, warn};

/// Who controls a slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PlayerKind {
    /// Human player; moves arrive as external intents.
    Human,
    /// Computer player; moves come from the search via the driver.
    Computer,
}

/// One of the two player slots in a session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerSlot {
    /// Player's display name.
    pub name: String,
    /// Which mark this slot plays.
    pub mark: Mark,
    /// Who controls the slot.
    pub kind: PlayerKind,
}

impl PlayerSlot {
    /// Creates a slot.
    pub fn new(name: impl Into<String>, mark: Mark, kind: PlayerKind) -> Self {
        Self {
            name: name.into(),
            mark,
            kind,
        }
    }

    /// Shorthand for a human-controlled slot.
    pub fn human(name: impl Into<String>, mark: Mark) -> Self {
        Self::new(name, mark, PlayerKind::Human)
    }

    /// Shorthand for a computer-controlled slot.
    pub fn computer(name: impl Into<String>, mark: Mark) -> Self {
        Self::new(name, mark, PlayerKind::Computer)
    }
}

/// Identifies one of the two slots.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SlotId {
    /// The first slot.
    A,
    /// The second slot.
    B,
}

impl SlotId {
    /// Returns the other slot.
    pub fn other(self) -> Self {
        match self {
            SlotId::A => SlotId::B,
            SlotId::B => SlotId::A,
        }
    }
}

/// Current status of a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SessionStatus {
    /// Moves are being accepted.
    InProgress,
    /// The named slot completed a line. No moves until reset.
    Won(SlotId),
    /// Full board, no winner. No moves until reset.
    Draw,
}

/// Error creating a session.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display)]
pub enum SessionError {
    /// Both slots claim the same mark.
    #[display("players must use different marks")]
    DuplicateMark,
    /// Both slots use the same name.
    #[display("players must have different names")]
    DuplicateName,
}

impl std::error::Error for SessionError {}

/// A two-player game session.
///
/// Owns one board, the active-slot pointer, running scores, and a
/// monotonically increasing generation counter. The generation changes on
/// every accepted move and every reset, so any deferred work stamped with
/// an older generation can recognize itself as stale.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameSession {
    board: Board,
    slot_a: PlayerSlot,
    slot_b: PlayerSlot,
    first_to_move: SlotId,
    active: SlotId,
    status: SessionStatus,
    score_a: u32,
    score_b: u32,
    draws: u32,
    celebrating: bool,
    history: Vec<Move>,
    generation: u64,
}

/// Read-only view of a session for the rendering collaborator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Snapshot {
    /// The board.
    pub board: Board,
    /// Display name of the slot to move (or the slot that just moved,
    /// once the session is terminal).
    pub active_slot_name: String,
    /// Session status.
    pub status: SessionStatus,
    /// Slot A's win count.
    pub score_a: u32,
    /// Slot B's win count.
    pub score_b: u32,
    /// Number of drawn games.
    pub draws: u32,
    /// Whether the post-win celebration window is open.
    pub celebrating: bool,
}

impl GameSession {
    /// Creates a session with the given slots and first mover.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError`] if the slots share a mark or a name.
    #[instrument(skip(slot_a, slot_b))]
    pub fn new(
        slot_a: PlayerSlot,
        slot_b: PlayerSlot,
        first_to_move: SlotId,
    ) -> Result<Self, SessionError> {
        if slot_a.mark == slot_b.mark {
            return Err(SessionError::DuplicateMark);
        }
        if slot_a.name == slot_b.name {
            return Err(SessionError::DuplicateName);
        }
        info!(
            slot_a = %slot_a.name,
            slot_b = %slot_b.name,
            first = ?first_to_move,
            "creating session"
        );
        Ok(Self {
            board: Board::new(),
            slot_a,
            slot_b,
            first_to_move,
            active: first_to_move,
            status: SessionStatus::InProgress,
            score_a: 0,
            score_b: 0,
            draws: 0,
            celebrating: false,
            history: Vec::new(),
            generation: 0,
        })
    }

    // ─────────────────────────────────────────────────────────────
    //  Accessors
    // ─────────────────────────────────────────────────────────────

    /// Returns the board.
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Returns the slot with the given id.
    pub fn slot(&self, id: SlotId) -> &PlayerSlot {
        match id {
            SlotId::A => &self.slot_a,
            SlotId::B => &self.slot_b,
        }
    }

    /// Id of the slot to move.
    pub fn active(&self) -> SlotId {
        self.active
    }

    /// Slot designated to open each game.
    pub fn first_to_move(&self) -> SlotId {
        self.first_to_move
    }

    /// The slot to move.
    pub fn active_slot(&self) -> &PlayerSlot {
        self.slot(self.active)
    }

    /// Returns the session status.
    pub fn status(&self) -> SessionStatus {
        self.status
    }

    /// Win count for a slot.
    pub fn score(&self, id: SlotId) -> u32 {
        match id {
            SlotId::A => self.score_a,
            SlotId::B => self.score_b,
        }
    }

    /// Number of drawn games.
    pub fn draws(&self) -> u32 {
        self.draws
    }

    /// Whether the post-win celebration window is open.
    pub fn celebrating(&self) -> bool {
        self.celebrating
    }

    /// Moves accepted this game, in order.
    pub fn history(&self) -> &[Move] {
        &self.history
    }

    /// Current generation. Changes on every accepted move and reset.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// The slot playing the given mark.
    pub fn slot_of(&self, mark: Mark) -> SlotId {
        if self.slot_a.mark == mark {
            SlotId::A
        } else {
            SlotId::B
        }
    }

    /// Winner's display name, if the session is won.
    pub fn winner_name(&self) -> Option<&str> {
        match self.status {
            SessionStatus::Won(id) => Some(self.slot(id).name.as_str()),
            _ => None,
        }
    }

    /// Read-only view for rendering.
    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            board: self.board.clone(),
            active_slot_name: self.active_slot().name.clone(),
            status: self.status,
            score_a: self.score_a,
            score_b: self.score_b,
            draws: self.draws,
            celebrating: self.celebrating,
        }
    }

    // ─────────────────────────────────────────────────────────────
    //  Transitions - every method returns a new session value
    // ─────────────────────────────────────────────────────────────

    /// Validates and applies a move, returning the successor session.
    ///
    /// Checks, in order: the mark belongs to the active slot, the session
    /// is in progress, the target square is open. A win credits the
    /// winning slot with exactly one point and opens the celebration
    /// window; a full board records a draw; otherwise the turn passes.
    ///
    /// # Errors
    ///
    /// [`InvalidMove`] on any rejection; the session is unchanged.
    #[instrument(skip(self), fields(generation = self.generation))]
    pub fn apply_move(&self, mv: Move) -> Result<Self, InvalidMove> {
        if mv.mark != self.active_slot().mark {
            warn!(mark = %mv.mark, "move from the wrong mark rejected");
            return Err(InvalidMove::NotYourTurn(mv.mark));
        }
        if self.status != SessionStatus::InProgress {
            warn!(status = ?self.status, "move after game end rejected");
            return Err(InvalidMove::GameOver);
        }

        let mut next = self.clone();
        next.board.place(mv.position, mv.mark)?;
        next.history.push(mv);
        next.generation += 1;

        match rules::evaluate(&next.board) {
            Outcome::Winner { mark, line } => {
                let winner = next.slot_of(mark);
                next.status = SessionStatus::Won(winner);
                next.celebrating = true;
                // Always +1 per win event, never a locally-tracked total.
                match winner {
                    SlotId::A => next.score_a += 1,
                    SlotId::B => next.score_b += 1,
                }
                info!(winner = %next.slot(winner).name, ?line, "game won");
            }
            Outcome::Full => {
                next.status = SessionStatus::Draw;
                next.draws += 1;
                info!("game drawn");
            }
            Outcome::InProgress => {
                next.active = next.active.other();
            }
        }

        Ok(next)
    }

    /// Applies a move at a raw index for the active slot.
    ///
    /// Out-of-range indices are rejected as [`InvalidMove::CellOccupied`];
    /// they are the same class of malformed input.
    pub fn apply_move_at(&self, index: usize) -> Result<Self, InvalidMove> {
        let position =
            Position::from_index(index).ok_or(InvalidMove::CellOccupied(index))?;
        self.apply_move(Move::new(self.active_slot().mark, position))
    }

    /// Closes the celebration window. Status stays [`SessionStatus::Won`].
    pub fn end_celebration(&self) -> Self {
        let mut next = self.clone();
        next.celebrating = false;
        next
    }

    /// Starts a fresh game: clears the board and status, keeps scores.
    #[instrument(skip(self))]
    pub fn reset_board(&self) -> Self {
        info!("resetting board");
        let mut next = self.clone();
        next.board.clear();
        next.status = SessionStatus::InProgress;
        next.active = next.first_to_move;
        next.celebrating = false;
        next.history.clear();
        next.generation += 1;
        next
    }

    /// Clears the board, status, and every tally.
    #[instrument(skip(self))]
    pub fn reset_scores(&self) -> Self {
        info!("resetting scores");
        let mut next = self.reset_board();
        next.score_a = 0;
        next.score_b = 0;
        next.draws = 0;
        next
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn session() -> GameSession {
        GameSession::new(
            PlayerSlot::human("Ada", Mark::X),
            PlayerSlot::computer("Deep Toe", Mark::O),
            SlotId::A,
        )
        .unwrap()
    }

    fn play(session: &GameSession, indices: &[usize]) -> GameSession {
        indices.iter().fold(session.clone(), |s, i| {
            s.apply_move_at(*i).expect("legal scripted move")
        })
    }

    #[test]
    fn test_duplicate_mark_rejected() {
        let result = GameSession::new(
            PlayerSlot::human("Ada", Mark::X),
            PlayerSlot::human("Grace", Mark::X),
            SlotId::A,
        );
        assert_eq!(result, Err(SessionError::DuplicateMark));
    }

    #[test]
    fn test_duplicate_name_rejected() {
        let result = GameSession::new(
            PlayerSlot::human("Ada", Mark::X),
            PlayerSlot::human("Ada", Mark::O),
            SlotId::A,
        );
        assert_eq!(result, Err(SessionError::DuplicateName));
    }

    #[test]
    fn test_turn_alternates() {
        let s = session();
        assert_eq!(s.active(), SlotId::A);
        let s = s.apply_move_at(4).unwrap();
        assert_eq!(s.active(), SlotId::B);
        let s = s.apply_move_at(0).unwrap();
        assert_eq!(s.active(), SlotId::A);
    }

    #[test]
    fn test_wrong_mark_rejected() {
        let s = session();
        let result = s.apply_move(Move::new(Mark::O, Position::Center));
        assert_eq!(result, Err(InvalidMove::NotYourTurn(Mark::O)));
    }

    #[test]
    fn test_occupied_square_rejected() {
        let s = play(&session(), &[4]);
        let result = s.apply_move_at(4);
        assert_eq!(result, Err(InvalidMove::CellOccupied(4)));
    }

    #[test]
    fn test_out_of_range_index_rejected() {
        let s = session();
        assert_eq!(s.apply_move_at(9), Err(InvalidMove::CellOccupied(9)));
        assert_eq!(s.history().len(), 0);
    }

    #[test]
    fn test_win_scores_exactly_one() {
        // X: 0 1 2, O: 3 4
        let s = play(&session(), &[0, 3, 1, 4, 2]);
        assert_eq!(s.status(), SessionStatus::Won(SlotId::A));
        assert_eq!(s.score(SlotId::A), 1);
        assert_eq!(s.score(SlotId::B), 0);
        assert!(s.celebrating());
        assert_eq!(s.winner_name(), Some("Ada"));
    }

    #[test]
    fn test_draw_counts_and_stays_parked() {
        // X O X / O X X / O X O in alternating order.
        let s = play(&session(), &[0, 1, 2, 3, 4, 6, 5, 8, 7]);
        assert_eq!(s.status(), SessionStatus::Draw);
        assert_eq!(s.draws(), 1);
        assert!(!s.celebrating());
    }

    #[test]
    fn test_terminal_session_rejects_moves() {
        let s = play(&session(), &[0, 3, 1, 4, 2]);
        assert_eq!(s.apply_move_at(5), Err(InvalidMove::GameOver));
        // The wrong-mark guard fires first for stale events.
        assert_eq!(
            s.apply_move(Move::new(Mark::O, Position::MiddleRight)),
            Err(InvalidMove::NotYourTurn(Mark::O))
        );
    }

    #[test]
    fn test_reset_board_keeps_scores() {
        let s = play(&session(), &[0, 3, 1, 4, 2]).reset_board();
        assert_eq!(s.status(), SessionStatus::InProgress);
        assert_eq!(s.board().filled_count(), 0);
        assert_eq!(s.score(SlotId::A), 1);
        assert_eq!(s.active(), SlotId::A);
        assert!(!s.celebrating());
    }

    #[test]
    fn test_reset_scores_zeroes_everything() {
        let s = play(&session(), &[0, 3, 1, 4, 2]).reset_scores();
        assert_eq!(s.status(), SessionStatus::InProgress);
        assert_eq!(s.score(SlotId::A), 0);
        assert_eq!(s.score(SlotId::B), 0);
        assert_eq!(s.draws(), 0);
    }

    #[test]
    fn test_generation_moves_forward() {
        let s0 = session();
        let s1 = s0.apply_move_at(4).unwrap();
        assert!(s1.generation() > s0.generation());
        let s2 = s1.reset_board();
        assert!(s2.generation() > s1.generation());
    }

    #[test]
    fn test_rejection_leaves_session_unchanged() {
        let s = play(&session(), &[4]);
        let before = s.clone();
        assert!(s.apply_move_at(4).is_err());
        assert_eq!(s, before);
    }

    #[test]
    fn test_snapshot_serializes() {
        let snap = play(&session(), &[4]).snapshot();
        assert_eq!(snap.active_slot_name, "Deep Toe");
        let json = serde_json::to_string(&snap).unwrap();
        assert!(json.contains("\"active_slot_name\":\"Deep Toe\""));
    }
}
