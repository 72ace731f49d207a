//! Integer card encoding and a draw-only deck: `c / 13` is the suit, `c % 13`
//! the rank, 0 = deuce through 12 = ace.

use rand::seq::SliceRandom;
use rand::Rng;

pub type Card = u8;

pub const NUM_CARDS: u8 = 52;
const RANKS: &[u8; 13] = b"23456789TJQKA";
const SUITS: &[u8; 4] = b"cdhs";

pub fn rank_of(card: Card) -> u8 {
    card % 13
}

pub fn suit_of(card: Card) -> u8 {
    card / 13
}

pub fn card_to_str(card: Card) -> String {
    let mut s = String::with_capacity(2);
    s.push(RANKS[rank_of(card) as usize] as char);
    s.push(SUITS[suit_of(card) as usize] as char);
    s
}

/// Canonical key for a set of cards: the per-card strings sorted
/// lexicographically and concatenated, per the external interfaces contract.
pub fn hand_key(cards: &[Card]) -> String {
    let mut strs: Vec<String> = cards.iter().map(|&c| card_to_str(c)).collect();
    strs.sort();
    strs.concat()
}

/// A shuffled, ordered sequence of the 52 cards. Dealing removes from the
/// front via a cursor.
#[derive(Debug, Clone)]
pub struct Deck {
    cards: Vec<Card>,
    pos: usize,
}

impl Deck {
    pub fn shuffled<R: Rng>(rng: &mut R) -> Deck {
        let mut cards: Vec<Card> = (0..NUM_CARDS).collect();
        cards.shuffle(rng);
        Deck { cards, pos: 0 }
    }

    pub fn draw(&mut self) -> Card {
        let card = self.cards[self.pos];
        self.pos += 1;
        card
    }

    pub fn draw_n(&mut self, n: usize) -> Vec<Card> {
        let drawn = self.cards[self.pos..self.pos + n].to_vec();
        self.pos += n;
        drawn
    }

    pub fn remaining(&self) -> &[Card] {
        &self.cards[self.pos..]
    }
}
