//! Seven-card hand evaluator.
//!
//! Ranks any 5-7 card combination into a totally ordered `HandScore`:
//! `category` in `0..=8` (high card through straight flush) plus a
//! fixed-arity tuple of tiebreaker ranks in comparison order. Larger is
//! better under the derived lexicographic `Ord`.
//!
//! Straight detection uses a 13-bit mask of present ranks; the wheel
//! (A-2-3-4-5) is a five-high straight, ranked below every other straight.
//! Straight-flush detection only scans cards of the flush suit, so an
//! off-suit straight can never combine with an unrelated flush.

use std::cmp::Reverse;

use super::cards::{rank_of, suit_of, Card};

pub const HIGH_CARD: u8 = 0;
pub const ONE_PAIR: u8 = 1;
pub const TWO_PAIR: u8 = 2;
pub const THREE_OF_A_KIND: u8 = 3;
pub const STRAIGHT: u8 = 4;
pub const FLUSH: u8 = 5;
pub const FULL_HOUSE: u8 = 6;
pub const FOUR_OF_A_KIND: u8 = 7;
pub const STRAIGHT_FLUSH: u8 = 8;

#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub struct HandScore {
    pub category: u8,
    pub tiebreakers: Vec<u8>,
}

impl HandScore {
    fn new(category: u8, tiebreakers: Vec<u8>) -> HandScore {
        HandScore {
            category,
            tiebreakers,
        }
    }
}

const WHEEL_RANKS: [u8; 5] = [12, 3, 2, 1, 0];
const WHEEL_HIGH: u8 = 3;

fn rank_mask(ranks: impl Iterator<Item = u8>) -> u16 {
    let mut mask = 0u16;
    for r in ranks {
        mask |= 1 << r;
    }
    mask
}

/// Highest rank of a 5-card straight within `mask`, or `None`. The wheel
/// (A-2-3-4-5) is checked first and reports its five-high as `WHEEL_HIGH`.
fn check_straight(mask: u16) -> Option<u8> {
    if WHEEL_RANKS.iter().all(|&r| mask & (1 << r) != 0) {
        return Some(WHEEL_HIGH);
    }
    for high in (4..=12).rev() {
        if (0..5).all(|i| mask & (1 << (high - i)) != 0) {
            return Some(high);
        }
    }
    None
}

fn top_n(mut ranks: Vec<u8>, n: usize) -> Vec<u8> {
    ranks.sort_by_key(|&r| Reverse(r));
    ranks.truncate(n);
    ranks
}

/// Ranks the 5-7 given cards. Asserts on caller bugs (duplicate or
/// out-of-range cards, or fewer than 5 cards); behavior for those is
/// undefined in release builds.
pub fn calc_hand_score(cards: &[Card]) -> HandScore {
    debug_assert!(cards.len() >= 5 && cards.len() <= 7, "need 5-7 cards, got {}", cards.len());
    debug_assert!(cards.iter().all(|&c| c < 52), "card out of range");
    #[cfg(debug_assertions)]
    {
        let mut sorted = cards.to_vec();
        sorted.sort_unstable();
        sorted.dedup();
        debug_assert_eq!(sorted.len(), cards.len(), "duplicate card in {:?}", cards);
    }

    let ranks: Vec<u8> = cards.iter().map(|&c| rank_of(c)).collect();
    let suits: Vec<u8> = cards.iter().map(|&c| suit_of(c)).collect();

    let mut rank_counts = [0u8; 13];
    for &r in &ranks {
        rank_counts[r as usize] += 1;
    }
    let mut suit_counts = [0u8; 4];
    for &s in &suits {
        suit_counts[s as usize] += 1;
    }
    let flush_suit = (0..4).find(|&s| suit_counts[s] >= 5);

    if let Some(flush_suit) = flush_suit {
        let flush_ranks: Vec<u8> =
            ranks.iter().zip(&suits).filter(|(_, &s)| s as usize == flush_suit).map(|(&r, _)| r).collect();
        if let Some(high) = check_straight(rank_mask(flush_ranks.iter().copied())) {
            return HandScore::new(STRAIGHT_FLUSH, vec![high]);
        }
    }

    for r in (0..13u8).rev() {
        if rank_counts[r as usize] == 4 {
            let kicker = ranks.iter().copied().filter(|&rr| rr != r).max().unwrap();
            return HandScore::new(FOUR_OF_A_KIND, vec![r, kicker]);
        }
    }

    let mut triple = None;
    let mut pair = None;
    for r in (0..13u8).rev() {
        if rank_counts[r as usize] >= 3 && triple.is_none() {
            triple = Some(r);
        } else if rank_counts[r as usize] >= 2 && pair.is_none() {
            pair = Some(r);
        }
    }
    if let (Some(trips), Some(pair)) = (triple, pair) {
        return HandScore::new(FULL_HOUSE, vec![trips, pair]);
    }

    if let Some(flush_suit) = flush_suit {
        let flush_ranks: Vec<u8> =
            ranks.iter().zip(&suits).filter(|(_, &s)| s as usize == flush_suit).map(|(&r, _)| r).collect();
        return HandScore::new(FLUSH, top_n(flush_ranks, 5));
    }

    if let Some(high) = check_straight(rank_mask(ranks.iter().copied())) {
        return HandScore::new(STRAIGHT, vec![high]);
    }

    if let Some(trips) = triple {
        let kickers = top_n(ranks.iter().copied().filter(|&rr| rr != trips).collect(), 2);
        return HandScore::new(THREE_OF_A_KIND, [vec![trips], kickers].concat());
    }

    let mut pairs: Vec<u8> = (0..13u8).rev().filter(|&r| rank_counts[r as usize] >= 2).collect();
    if pairs.len() >= 2 {
        pairs.truncate(2);
        let kicker =
            ranks.iter().copied().filter(|rr| !pairs.contains(rr)).max().unwrap();
        return HandScore::new(TWO_PAIR, vec![pairs[0], pairs[1], kicker]);
    }
    if let Some(&pair_rank) = pairs.first() {
        let kickers = top_n(ranks.iter().copied().filter(|&rr| rr != pair_rank).collect(), 3);
        return HandScore::new(ONE_PAIR, [vec![pair_rank], kickers].concat());
    }

    HandScore::new(HIGH_CARD, top_n(ranks, 5))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(s: &str) -> Vec<Card> {
        super::super::cards::test_support::parse_cards(s)
    }

    fn score(s: &str) -> HandScore {
        calc_hand_score(&parse(s))
    }

    #[test]
    fn total_order_holds_for_known_rankings() {
        let straight_flush = score("Ah Kh Qh Jh Th");
        let quads = score("Ah Ad Ac As Kh");
        let full_house = score("Ah As Ac Kh Kd");
        let flush = score("Ah Th 8h 6h 2h");
        let straight = score("Ah Kh Qd Jh Th");
        let trips = score("Ah Ad Ac Kh Qd");
        let two_pair = score("Ah Ad Kh Kd Qc");
        let one_pair = score("Ah Ad Kh Qd Jc");
        let high_card = score("Ah Kd Qc Js 9h");

        let ordered = [
            straight_flush,
            quads,
            full_house,
            flush,
            straight,
            trips,
            two_pair,
            one_pair,
            high_card,
        ];
        for w in ordered.windows(2) {
            assert!(w[0] > w[1], "{:?} should rank above {:?}", w[0], w[1]);
        }
    }

    #[test]
    fn wheel_is_five_high_and_loses_to_six_high() {
        let wheel = score("Ah 2d 3c 4h 5s");
        let six_high = score("2h 3d 4c 5h 6s");
        assert_eq!(wheel.category, STRAIGHT);
        assert_eq!(wheel.tiebreakers, vec![WHEEL_HIGH]);
        assert!(six_high > wheel);
    }

    #[test]
    fn straight_flush_requires_suited_straight() {
        // Hearts (A,K,T,9,2) form a flush but not a straight; the straight
        // K-Q-J-T-9 only exists by mixing in the off-suit Qd and Jc. This
        // must score as a flush, not a straight flush.
        let mixed = parse("Ah Kh Th 9h 2h Qd Jc");
        let s = calc_hand_score(&mixed);
        assert_eq!(s.category, FLUSH);
    }

    #[test]
    fn four_of_a_kind_tiebreaker_uses_best_kicker() {
        let s = score("2c 2d 2h 2s 9h");
        assert_eq!(s.category, FOUR_OF_A_KIND);
        assert_eq!(s.tiebreakers, vec![0, 7]);
    }

    #[test]
    fn exact_ties_are_reported_as_equal() {
        let a = score("Ah Kd Qc 9s 7h");
        let b = score("Ad Ks Qh 9c 7s");
        assert_eq!(a, b);
    }

    #[test]
    fn one_pair_kicker_is_not_drawn_from_hole_cards_alone() {
        let ace_kicker = score("Ah 3d Kh Kd Th");
        let j_kicker = score("Jh 4d Kh Kd Ts");
        assert_eq!(ace_kicker.category, ONE_PAIR);
        assert!(ace_kicker > j_kicker);
    }

    #[test]
    fn two_pair_kicker_excludes_both_pairs() {
        let cards = parse("Ah Td 8c 8s Th 5s 5d");
        let s = calc_hand_score(&cards);
        assert_eq!(s.category, TWO_PAIR);
        // Pairs are tens and eights; kicker must be the ace, not a 5.
        assert_eq!(s.tiebreakers, vec![8, 6, 12]);
    }

    #[test]
    fn two_board_pairs_plus_a_hole_pair_make_quads() {
        // Holes 2c 2d, board 2h 2s 5c 7d 9h: four deuces, nine kicker.
        let s = score("2c 2d 2h 2s 5c 7d 9h");
        assert_eq!(s.category, FOUR_OF_A_KIND);
        assert_eq!(s.tiebreakers, vec![0, 7]);
    }

    #[test]
    fn pair_of_queens_beats_pair_of_twos_regardless_of_kickers() {
        // A shared four-club board (Tc Jc 2d 3s plus Qh) gives both hands a
        // pair rather than a flush: 2c Ac holds only a deuce pair, Kc Qc
        // pairs the board's queen. The pair rank alone decides it.
        let board = "Tc Jc Qh 2d 3s";
        let deuce_pair = score(&format!("2c Ac {}", board));
        let queen_pair = score(&format!("Kc Qc {}", board));
        assert_eq!(deuce_pair.category, ONE_PAIR);
        assert_eq!(queen_pair.category, ONE_PAIR);
        assert!(queen_pair > deuce_pair);
    }
}
