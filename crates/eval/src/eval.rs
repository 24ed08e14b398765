// Copyright (C) 2025 Vince Vasta
// SPDX-License-Identifier: Apache-2.0

//! Four cards hand evaluator.
//!
//! A hand is one hole card and the three table cards. The category checks are
//! applied in poker precedence order and the first match wins, aces are always
//! high and there are no wraparound straights.
//!
//! Two behaviors are kept for compatibility with existing tables:
//!
//! - a royal flush needs a ten and an ace inside a four cards straight, which
//!   cannot happen, so [HandCategory::RoyalFlush] is never returned;
//! - [HandCategory::TwoPair] is returned when exactly two cards are deuces,
//!   a hand with two pairs of other ranks is a [HandCategory::Pair].
use ahash::AHashMap;
use serde::{Deserialize, Serialize};
use std::fmt;

use fourflush_cards::{Card, Rank};

/// A hand category, higher is better.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum HandCategory {
    /// No other category.
    HighCard = 1,
    /// Two cards with the same rank.
    Pair,
    /// Two deuces.
    TwoPair,
    /// Three cards with the same rank.
    ThreeOfAKind,
    /// Four consecutive ranks.
    Straight,
    /// Four cards with the same suit.
    Flush,
    /// Three of a kind and a pair.
    FullHouse,
    /// Four cards with the same rank.
    FourOfAKind,
    /// A straight with the same suit.
    StraightFlush,
    /// A straight flush with a ten and an ace.
    RoyalFlush,
}

impl HandCategory {
    /// Evaluates a four cards hand.
    pub fn evaluate(hand: &[Card; 4]) -> Self {
        use HandCategory::*;

        let mut values = hand.map(|c| c.rank().value());
        values.sort_unstable();

        let is_flush = hand.iter().all(|c| c.suit() == hand[0].suit());
        let is_straight = values.windows(2).all(|w| w[1] == w[0] + 1);

        let mut value_count = AHashMap::<u8, u8>::with_capacity(hand.len());
        for v in values {
            *value_count.entry(v).or_default() += 1;
        }

        if is_flush && is_straight {
            let has_ten = values.contains(&Rank::Ten.value());
            let has_ace = values.contains(&Rank::Ace.value());
            return if has_ten && has_ace {
                RoyalFlush
            } else {
                StraightFlush
            };
        }

        if value_count.values().any(|&c| c == 4) {
            return FourOfAKind;
        }

        let three_of_a_kind = value_count.values().any(|&c| c == 3);
        let pair = value_count.values().any(|&c| c == 2);

        if three_of_a_kind && pair {
            FullHouse
        } else if is_flush {
            Flush
        } else if is_straight {
            Straight
        } else if three_of_a_kind {
            ThreeOfAKind
        } else if values.iter().filter(|&&v| v == Rank::Deuce.value()).count() == 2 {
            TwoPair
        } else if pair {
            Pair
        } else {
            HighCard
        }
    }

    /// The category numeric value from 1 to 10.
    pub fn value(&self) -> u8 {
        *self as u8
    }

    /// Returns all categories from the lowest.
    pub fn categories() -> impl DoubleEndedIterator<Item = HandCategory> {
        use HandCategory::*;
        [
            HighCard,
            Pair,
            TwoPair,
            ThreeOfAKind,
            Straight,
            Flush,
            FullHouse,
            FourOfAKind,
            StraightFlush,
            RoyalFlush,
        ]
        .into_iter()
    }

    /// The category label.
    pub fn label(&self) -> &'static str {
        match self {
            HandCategory::HighCard => "High Card",
            HandCategory::Pair => "Pair",
            HandCategory::TwoPair => "Two Pair",
            HandCategory::ThreeOfAKind => "Three of a Kind",
            HandCategory::Straight => "Straight",
            HandCategory::Flush => "Flush",
            HandCategory::FullHouse => "Full House",
            HandCategory::FourOfAKind => "Four of a Kind",
            HandCategory::StraightFlush => "Straight Flush",
            HandCategory::RoyalFlush => "Royal Flush",
        }
    }
}

impl fmt::Display for HandCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Evaluates a four cards hand, see [HandCategory::evaluate].
pub fn evaluate(hand: &[Card; 4]) -> HandCategory {
    HandCategory::evaluate(hand)
}

#[cfg(test)]
mod tests {
    use super::*;
    use fourflush_cards::{Deck, Suit};
    use rand::{SeedableRng, rngs::StdRng, seq::SliceRandom};

    fn hand(cards: [(Rank, Suit); 4]) -> [Card; 4] {
        cards.map(|(r, s)| Card::new(r, s))
    }

    #[test]
    fn two_deuces_is_two_pair() {
        let h = hand([
            (Rank::Deuce, Suit::Hearts),
            (Rank::Deuce, Suit::Diamonds),
            (Rank::Five, Suit::Clubs),
            (Rank::Nine, Suit::Spades),
        ]);
        assert_eq!(evaluate(&h), HandCategory::TwoPair);
        assert_eq!(evaluate(&h).value(), 3);
    }

    #[test]
    fn two_pairs_without_deuces_is_pair() {
        let h = hand([
            (Rank::Five, Suit::Hearts),
            (Rank::Five, Suit::Diamonds),
            (Rank::Nine, Suit::Clubs),
            (Rank::Nine, Suit::Spades),
        ]);
        assert_ne!(evaluate(&h), HandCategory::TwoPair);
        assert_eq!(evaluate(&h), HandCategory::Pair);

        // Two pairs with deuces matches on the deuces.
        let h = hand([
            (Rank::Deuce, Suit::Hearts),
            (Rank::Deuce, Suit::Diamonds),
            (Rank::Nine, Suit::Clubs),
            (Rank::Nine, Suit::Spades),
        ]);
        assert_eq!(evaluate(&h), HandCategory::TwoPair);
    }

    #[test]
    fn straights() {
        let h = hand([
            (Rank::Four, Suit::Clubs),
            (Rank::Five, Suit::Diamonds),
            (Rank::Six, Suit::Hearts),
            (Rank::Seven, Suit::Spades),
        ]);
        assert_eq!(evaluate(&h), HandCategory::Straight);
        assert_eq!(evaluate(&h).value(), 5);

        // No low ace.
        let h = hand([
            (Rank::Deuce, Suit::Clubs),
            (Rank::Trey, Suit::Diamonds),
            (Rank::Four, Suit::Hearts),
            (Rank::Ace, Suit::Spades),
        ]);
        assert_eq!(evaluate(&h), HandCategory::HighCard);

        let h = hand([
            (Rank::Jack, Suit::Clubs),
            (Rank::Queen, Suit::Diamonds),
            (Rank::King, Suit::Hearts),
            (Rank::Ace, Suit::Spades),
        ]);
        assert_eq!(evaluate(&h), HandCategory::Straight);
    }

    #[test]
    fn flushes() {
        let h = hand([
            (Rank::Ten, Suit::Hearts),
            (Rank::Jack, Suit::Hearts),
            (Rank::Queen, Suit::Hearts),
            (Rank::King, Suit::Hearts),
        ]);
        assert_eq!(evaluate(&h), HandCategory::StraightFlush);

        // The ace high straight flush has no ten so it is not royal.
        let h = hand([
            (Rank::Jack, Suit::Spades),
            (Rank::Queen, Suit::Spades),
            (Rank::King, Suit::Spades),
            (Rank::Ace, Suit::Spades),
        ]);
        assert_eq!(evaluate(&h), HandCategory::StraightFlush);

        let h = hand([
            (Rank::Ten, Suit::Clubs),
            (Rank::Deuce, Suit::Clubs),
            (Rank::Queen, Suit::Clubs),
            (Rank::Ace, Suit::Clubs),
        ]);
        assert_eq!(evaluate(&h), HandCategory::Flush);
    }

    #[test]
    fn sets() {
        let h = hand([
            (Rank::Eight, Suit::Clubs),
            (Rank::Eight, Suit::Diamonds),
            (Rank::Eight, Suit::Hearts),
            (Rank::Eight, Suit::Spades),
        ]);
        assert_eq!(evaluate(&h), HandCategory::FourOfAKind);

        let h = hand([
            (Rank::Deuce, Suit::Clubs),
            (Rank::Deuce, Suit::Diamonds),
            (Rank::Deuce, Suit::Hearts),
            (Rank::Ace, Suit::Spades),
        ]);
        assert_eq!(evaluate(&h), HandCategory::ThreeOfAKind);

        let h = hand([
            (Rank::King, Suit::Clubs),
            (Rank::Trey, Suit::Diamonds),
            (Rank::Nine, Suit::Hearts),
            (Rank::Ace, Suit::Spades),
        ]);
        assert_eq!(evaluate(&h), HandCategory::HighCard);
    }

    #[test]
    fn categories_order() {
        let values = HandCategory::categories()
            .map(|c| c.value())
            .collect::<Vec<_>>();
        assert_eq!(values, (1..=10).collect::<Vec<_>>());
        assert!(HandCategory::RoyalFlush > HandCategory::StraightFlush);
        assert!(HandCategory::Pair > HandCategory::HighCard);
        assert_eq!(HandCategory::ThreeOfAKind.to_string(), "Three of a Kind");
    }

    #[test]
    fn all_hands_distribution() {
        let mut counts = [0usize; 11];
        let mut rng = StdRng::seed_from_u64(101);

        Deck::default().for_each_hand(|cards| {
            let category = evaluate(cards);

            // The category doesn't depend on the cards order.
            let mut shuffled = *cards;
            shuffled.shuffle(&mut rng);
            assert_eq!(evaluate(&shuffled), category);

            let mut reversed = *cards;
            reversed.reverse();
            assert_eq!(evaluate(&reversed), category);

            counts[category.value() as usize] += 1;
        });

        assert_eq!(counts[0], 0);
        assert_eq!(counts[HandCategory::HighCard as usize], 177_660);
        assert_eq!(counts[HandCategory::Pair as usize], 78_408);
        assert_eq!(counts[HandCategory::TwoPair as usize], 6_768);
        assert_eq!(counts[HandCategory::ThreeOfAKind as usize], 2_496);
        assert_eq!(counts[HandCategory::Straight as usize], 2_520);
        assert_eq!(counts[HandCategory::Flush as usize], 2_820);
        assert_eq!(counts[HandCategory::FullHouse as usize], 0);
        assert_eq!(counts[HandCategory::FourOfAKind as usize], 13);
        assert_eq!(counts[HandCategory::StraightFlush as usize], 40);
        assert_eq!(counts[HandCategory::RoyalFlush as usize], 0);
        assert_eq!(counts.iter().sum::<usize>(), 270_725);
    }
}
