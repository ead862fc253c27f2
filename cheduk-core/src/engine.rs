//! Transition engine: apply one action to a state
//!
//! Every transition clones the input and mutates the copy. Legality is
//! decided by re-running the action assembler for the action's query point
//! and checking membership, so anything the assembler would not offer is
//! refused and the input comes back unchanged.

use thiserror::Error;

use crate::actions::{get_valid_actions, GameAction};
use crate::board::HexCoord;
use crate::pieces::{Piece, PieceId, PieceType, Player};
use crate::setup::{reference_point, spy_zone};
use crate::state::{GamePhase, GameState};
use crate::victory::check_victory;

/// Why an action was refused
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ActionRejected {
    #[error("the game is already over")]
    GameOver,
    #[error("it is {current:?}'s turn, not {actor:?}'s")]
    NotYourTurn { current: Player, actor: Player },
    #[error("{kind} is not a legal action in this position")]
    NotLegal { kind: &'static str },
}

/// Apply an action. Illegal actions yield the unchanged input.
pub fn perform_action(state: &GameState, action: &GameAction) -> GameState {
    try_perform_action(state, action).unwrap_or_else(|_| state.clone())
}

/// Apply an action, reporting why it was refused
pub fn try_perform_action(state: &GameState, action: &GameAction) -> Result<GameState, ActionRejected> {
    let result = check_legal(state, action).and_then(|()| {
        let mut next = state.clone();
        next.apply_action_internal(action)
            .ok_or(ActionRejected::NotLegal { kind: action.kind() })?;
        Ok(next)
    });

    if let Err(e) = &result {
        tracing::debug!("Rejected {} on turn {}: {}", action.kind(), state.turn, e);
    }
    result
}

fn check_legal(state: &GameState, action: &GameAction) -> Result<(), ActionRejected> {
    if state.game_over {
        return Err(ActionRejected::GameOver);
    }
    if let Some(actor) = acting_player(state, action) {
        if actor != state.current_player {
            return Err(ActionRejected::NotYourTurn {
                current: state.current_player,
                actor,
            });
        }
    }
    if !get_valid_actions(state, action.origin()).contains(action) {
        return Err(ActionRejected::NotLegal { kind: action.kind() });
    }
    Ok(())
}

/// Side the action is played for, when it can be told
fn acting_player(state: &GameState, action: &GameAction) -> Option<Player> {
    match *action {
        GameAction::Move { from, .. } => state.board.get(from).map(|p| p.player),
        GameAction::GatherInfo { at, .. } => state.board.get(at).map(|p| p.player),
        GameAction::Castle { player, .. }
        | GameAction::PlaceAmbassador { player, .. }
        | GameAction::PlaceSpy { player, .. } => Some(player),
        GameAction::Return { piece_id, .. } => Player::BOTH
            .into_iter()
            .find(|&p| state.returning_spies[p].iter().any(|s| s.id == piece_id)),
        GameAction::Resurrect { piece_id, .. } => Player::BOTH
            .into_iter()
            .flat_map(|p| state.captured_pieces[p].iter())
            .find(|s| s.id == piece_id)
            .map(|s| s.player),
    }
}

fn take_by_id(pieces: &mut Vec<Piece>, id: PieceId) -> Option<Piece> {
    let index = pieces.iter().position(|p| p.id == id)?;
    Some(pieces.remove(index))
}

/// First-placement alternation: `preferred` if it still has a spy and
/// somewhere to put it, otherwise the other side under the same test
fn next_spy_placer(state: &GameState, preferred: Player) -> Option<Player> {
    [preferred, preferred.opponent()].into_iter().find(|&p| {
        state.next_unplaced_spy(p).is_some()
            && state
                .empty_territory_tiles(p)
                .any(|c| spy_zone(p).contains(&c))
    })
}

/// Sum of distances from a side's spies on the board to its reference point
fn total_spy_distance(state: &GameState, player: Player) -> i32 {
    let reference = reference_point(player);
    state
        .board
        .pieces()
        .filter(|(_, p)| p.player == player && p.piece_type == PieceType::Spy)
        .map(|(c, _)| c.distance_to(reference))
        .sum()
}

impl GameState {
    /// Apply a pre-validated action. `None` means the state disagreed with
    /// the action (a piece missing where it was expected).
    fn apply_action_internal(&mut self, action: &GameAction) -> Option<()> {
        let mover = self.current_player;
        let phase_before = self.game_phase;

        let next_player = match *action {
            GameAction::Move { from, to } => {
                self.apply_move(from, to)?;
                mover.opponent()
            }
            GameAction::Castle { player, chief, diplomat } => {
                self.apply_castle(player, chief, diplomat)?;
                mover.opponent()
            }
            GameAction::GatherInfo { at, piece_id } => {
                self.apply_gather_info(at, piece_id)?;
                mover.opponent()
            }
            GameAction::Return { to, piece_id } => {
                let spy = take_by_id(&mut self.returning_spies[mover], piece_id)?;
                self.board.set(to, spy);
                mover.opponent()
            }
            GameAction::Resurrect { to, piece_id } => {
                let piece = take_by_id(&mut self.captured_pieces[mover.opponent()], piece_id)?;
                self.board.set(to, piece);
                mover.opponent()
            }
            GameAction::PlaceAmbassador { player, to, piece_id } => {
                self.apply_place_ambassador(player, to, piece_id)?
            }
            GameAction::PlaceSpy { player, to, piece_id } => self.apply_place_spy(player, to, piece_id)?,
        };

        // Victory is judged with the mover still current
        let status = check_victory(self);
        self.turn += 1;
        if self.game_phase == GamePhase::Main {
            self.refresh_embassy_occupancy();
        }

        if phase_before != self.game_phase {
            tracing::debug!("Phase {:?} -> {:?} on turn {}", phase_before, self.game_phase, self.turn);
        }

        if status.game_over {
            self.game_over = true;
            self.winner = status.winner;
            tracing::info!("Game over on turn {}: {:?} wins", self.turn, status.winner);
        } else {
            self.current_player = next_player;
        }
        Some(())
    }

    // ========================================================================
    // MAIN PHASE
    // ========================================================================

    fn apply_move(&mut self, from: HexCoord, to: HexCoord) -> Option<()> {
        let piece = *self.board.get(from)?;
        let player = piece.player;

        let protector = match self.board.get(to) {
            Some(target) if target.piece_type == PieceType::Chief && target.is_enemy_of(&piece) => {
                let owner = target.player;
                to.neighbors().find(|&n| {
                    self.board
                        .get(n)
                        .is_some_and(|p| p.player == owner && p.piece_type == PieceType::Guard)
                })
            }
            _ => None,
        };

        if let Some(guard_at) = protector {
            // Guard dies in the Chief's place; the mover stays put
            let guard = self.board.remove(guard_at)?;
            self.captured_pieces[player].push(guard);
            return Some(());
        }

        self.board.remove(from);
        if let Some(captured) = self.board.set(to, piece) {
            self.captured_pieces[player].push(captured);
        }
        self.award_embassy_bonus(player, &[to]);
        Some(())
    }

    fn apply_castle(&mut self, player: Player, chief_at: HexCoord, diplomat_at: HexCoord) -> Option<()> {
        let chief = self.board.remove(chief_at)?;
        let Some(diplomat) = self.board.remove(diplomat_at) else {
            self.board.set(chief_at, chief);
            return None;
        };
        self.board.set(chief_at, diplomat);
        self.board.set(diplomat_at, chief);
        self.castling_used[player] = true;
        self.award_embassy_bonus(player, &[chief_at, diplomat_at]);
        Some(())
    }

    fn apply_gather_info(&mut self, at: HexCoord, piece_id: PieceId) -> Option<()> {
        if self.board.get(at)?.id != piece_id {
            return None;
        }
        let spy = self.board.remove(at)?;
        self.returning_spies[spy.player].push(spy);
        self.info_scores[spy.player] += 1;
        self.info_gathered_tiles.push(at);
        Some(())
    }

    /// One-shot point for first standing on the enemy embassy
    fn award_embassy_bonus(&mut self, player: Player, landings: &[HexCoord]) {
        let enemy = player.opponent();
        if self.embassy_first_capture[enemy] {
            return;
        }
        if landings.iter().any(|&c| self.is_enemy_embassy(player, c)) {
            self.embassy_first_capture[enemy] = true;
            self.info_scores[player] += 1;
        }
    }

    // ========================================================================
    // PLACEMENT
    // ========================================================================

    /// Seat the ambassador; returns the side to act next
    fn apply_place_ambassador(&mut self, player: Player, to: HexCoord, piece_id: PieceId) -> Option<Player> {
        let ambassador = take_by_id(&mut self.unplaced_pieces[player], piece_id)?;
        self.board.set(to, ambassador);
        self.embassy_locations[player] = Some(to);
        self.recompute_territory(player);

        if player == Player::Red {
            self.game_phase = GamePhase::PlacementAmbassadorBlue;
            return Some(Player::Blue);
        }

        let distance = |p: Player| {
            self.embassy_locations[p]
                .map(|e| e.distance_to(reference_point(p)))
                .unwrap_or(i32::MAX)
        };
        let (red, blue) = (distance(Player::Red), distance(Player::Blue));

        // Closer side moves first in main, the other side places spies first
        let first_placer = if red < blue {
            self.main_game_first_player = Some(Player::Red);
            Player::Blue
        } else if blue < red {
            self.main_game_first_player = Some(Player::Blue);
            Player::Red
        } else {
            Player::Red
        };

        Some(self.advance_spy_placement(first_placer))
    }

    /// Seat one spy; returns the side to act next
    fn apply_place_spy(&mut self, player: Player, to: HexCoord, piece_id: PieceId) -> Option<Player> {
        let spy = take_by_id(&mut self.unplaced_pieces[player], piece_id)?;
        self.board.set(to, spy);
        Some(self.advance_spy_placement(player.opponent()))
    }

    /// Hand spy placement to the next side able to place, or start main play
    fn advance_spy_placement(&mut self, preferred: Player) -> Player {
        if let Some(next) = next_spy_placer(self, preferred) {
            self.game_phase = GamePhase::spy_placement(next);
            return next;
        }

        let first = self.main_game_first_player.unwrap_or_else(|| {
            let red = total_spy_distance(self, Player::Red);
            let blue = total_spy_distance(self, Player::Blue);
            if blue < red {
                Player::Blue
            } else {
                Player::Red
            }
        });
        self.main_game_first_player = Some(first);
        self.game_phase = GamePhase::Main;
        first
    }
}
