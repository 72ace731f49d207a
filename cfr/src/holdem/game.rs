//! The abstracted heads-up pot-limit betting game: legal actions, pot
//! accounting and street transitions. Two actions per turn (fold/call-check
//! or check/raise depending on `to_call`), exactly one pot-sized raise per
//! street, no open bet sizing.

use std::fmt;

use rand::Rng;

use super::cards::{hand_key, Card, Deck};
use super::hand_eval::calc_hand_score;
use crate::error::{Result, SolverError};

/// Action codes, fixed by the external interface contract: `0` fold, `1`
/// call/check, `2` raise.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Action {
    Fold = 0,
    CallOrCheck = 1,
    Raise = 2,
}

impl Action {
    pub fn code(self) -> u8 {
        self as u8
    }

    fn glyph(self) -> char {
        match self {
            Action::Fold => 'f',
            Action::CallOrCheck => 'c',
            Action::Raise => 'r',
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.glyph())
    }
}

/// `0` preflop, `1` flop, `2` turn, `3` river, `4` terminal/showdown.
pub type Stage = u8;
const SHOWDOWN: Stage = 4;

#[derive(Debug, Clone)]
pub struct GameState {
    pub deck: Deck,
    pub board: Vec<Card>,
    pub hole_cards: [[Card; 2]; 2],
    pub player: usize,
    pub dealer: usize,
    pub stage: Stage,
    pub pot: i64,
    pub to_call: i64,
    pub checked: bool,
    pub history: String,
    pub terminal: bool,
    pub winner: Option<usize>,
}

impl GameState {
    /// Deals a fresh heads-up hand: both hole cards dealt, blinds posted,
    /// dealer (small blind) to act first preflop.
    pub fn new_root<R: Rng>(rng: &mut R, dealer: usize) -> GameState {
        let mut deck = Deck::shuffled(rng);
        let h0 = deck.draw_n(2);
        let h1 = deck.draw_n(2);
        GameState {
            deck,
            board: vec![],
            hole_cards: [[h0[0], h0[1]], [h1[0], h1[1]]],
            player: dealer,
            dealer,
            stage: 0,
            pot: 2,
            to_call: 0,
            checked: false,
            history: String::new(),
            terminal: false,
            winner: None,
        }
    }

    /// Checks the state invariants (board size matches stage, no duplicate
    /// cards, non-negative `to_call`, terminal states have a winner).
    /// Surfaces `SolverError::InvalidState` for inputs arriving from
    /// outside the trainer (e.g. a query request), rather than panicking,
    /// since those can be caller-supplied.
    pub fn validate(&self) -> Result<()> {
        let expected_board = match self.stage {
            0 => 0,
            1 => 3,
            2 => 4,
            3 | 4 => 5,
            s => return Err(SolverError::InvalidState(format!("unknown stage {}", s))),
        };
        if self.board.len() != expected_board {
            return Err(SolverError::InvalidState(format!(
                "board has {} cards, expected {} at stage {}",
                self.board.len(),
                expected_board,
                self.stage
            )));
        }
        if self.to_call < 0 {
            return Err(SolverError::InvalidState("to_call is negative".into()));
        }
        if self.pot < 2 {
            return Err(SolverError::InvalidState("pot is below the two posted blinds".into()));
        }
        if self.terminal && self.winner.is_none() {
            return Err(SolverError::InvalidState("terminal state has no winner".into()));
        }
        let mut seen = std::collections::HashSet::new();
        for &c in self.hole_cards[0]
            .iter()
            .chain(&self.hole_cards[1])
            .chain(&self.board)
            .chain(self.deck.remaining())
        {
            if !seen.insert(c) {
                return Err(SolverError::InvalidState(format!("duplicate card {}", c)));
            }
        }
        Ok(())
    }

    /// Legal actions depend only on `to_call`.
    pub fn legal_actions(&self) -> Vec<Action> {
        if self.to_call > 0 {
            vec![Action::Fold, Action::CallOrCheck]
        } else {
            vec![Action::CallOrCheck, Action::Raise]
        }
    }

    /// Applies `action`, advancing streets and dealing board cards as
    /// needed. Returns a new state; the receiver is left untouched so
    /// sibling branches in the CFR recursion never alias.
    pub fn apply(&self, action: Action) -> GameState {
        let mut next = self.clone();
        let actor = next.player;
        next.history.push(action.glyph());

        match action {
            Action::Fold => {
                next.terminal = true;
                next.winner = Some(1 - actor);
            }
            Action::CallOrCheck => {
                if next.to_call > 0 {
                    next.pot += next.to_call;
                    next.to_call = 0;
                    next.advance_street();
                } else if next.checked {
                    next.advance_street();
                } else {
                    next.checked = true;
                    next.player = 1 - actor;
                }
            }
            Action::Raise => {
                let bet = next.pot + next.to_call;
                next.pot += bet;
                next.to_call = bet;
                next.checked = false;
                next.player = 1 - actor;
            }
        }
        next
    }

    /// Street progression: deal the next street's board cards, reset
    /// per-street betting state, and flip first-to-act to the non-dealer
    /// post-flop (the dealer only acts first preflop).
    fn advance_street(&mut self) {
        match self.stage {
            0 => self.board.extend(self.deck.draw_n(3)),
            1 | 2 => self.board.extend(self.deck.draw_n(1)),
            _ => {}
        }
        self.stage += 1;
        if self.stage < SHOWDOWN {
            self.player = 1 - self.dealer;
        }
        self.to_call = 0;
        self.checked = false;
        self.history.push('|');
    }

    pub fn is_terminal(&self) -> bool {
        self.terminal || self.stage == SHOWDOWN
    }

    /// Utility for `perspective`: `+pot` if they won, `-pot` if they lost,
    /// `0` on an exact showdown tie.
    pub fn terminal_utility(&self, perspective: usize) -> f64 {
        debug_assert!(self.is_terminal());
        if let Some(winner) = self.winner {
            return if winner == perspective { self.pot as f64 } else { -(self.pot as f64) };
        }
        let score0 = calc_hand_score(&[&self.hole_cards[0][..], &self.board[..]].concat());
        let score1 = calc_hand_score(&[&self.hole_cards[1][..], &self.board[..]].concat());
        use std::cmp::Ordering::*;
        match score0.cmp(&score1) {
            Equal => 0.0,
            Greater if perspective == 0 => self.pot as f64,
            Greater => -(self.pot as f64),
            Less if perspective == 0 => -(self.pot as f64),
            Less => self.pot as f64,
        }
    }

    /// The fingerprint of the decision node for `player`:
    /// `hand_key|board_key|history|pot|to_call`.
    pub fn fingerprint(&self, player: usize) -> String {
        format!(
            "{}|{}|{}|{}|{}",
            hand_key(&self.hole_cards[player]),
            hand_key(&self.board),
            self.history,
            self.pot,
            self.to_call
        )
    }
}
