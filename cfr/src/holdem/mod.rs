pub mod cards;
pub mod game;
pub mod hand_eval;

pub use cards::{card_to_str, hand_key, Card, Deck};
pub use game::{Action, GameState, Stage};
pub use hand_eval::{calc_hand_score, HandScore};
