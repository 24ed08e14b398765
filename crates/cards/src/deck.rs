// Copyright (C) 2025 Vince Vasta
// SPDX-License-Identifier: Apache-2.0

//! Poker cards definitions.
use rand::prelude::*;
use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};
use thiserror::Error;

/// A Poker card.
///
/// A card is packed in a single byte with the following format:
///
/// ```text
///   +--------+
///   |xxssrrrr|
///   +--------+
///   r = rank value of card (deuce=2,trey=3,...,ace=14)
///   s = suit of card (hearts=0,diamonds=1,clubs=2,spades=3)
/// ```
#[derive(Clone, Copy, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub struct Card(u8);

/// A Poker card.
impl Card {
    /// Create a card given a suit and rank.
    pub fn new(rank: Rank, suit: Suit) -> Card {
        Self(((suit as u8) << 4) | rank as u8)
    }

    /// This card unique id.
    pub fn id(&self) -> u8 {
        self.0
    }

    /// Returns the card suit.
    pub fn suit(&self) -> Suit {
        match self.0 >> 4 {
            0 => Suit::Hearts,
            1 => Suit::Diamonds,
            2 => Suit::Clubs,
            3 => Suit::Spades,
            _ => panic!("Invalid suit value 0x{:x}", self.0),
        }
    }

    /// Returns the card rank.
    pub fn rank(&self) -> Rank {
        match self.0 & 0xf {
            2 => Rank::Deuce,
            3 => Rank::Trey,
            4 => Rank::Four,
            5 => Rank::Five,
            6 => Rank::Six,
            7 => Rank::Seven,
            8 => Rank::Eight,
            9 => Rank::Nine,
            10 => Rank::Ten,
            11 => Rank::Jack,
            12 => Rank::Queen,
            13 => Rank::King,
            14 => Rank::Ace,
            _ => panic!("Invalid rank 0x{:x}", self.0),
        }
    }
}

impl fmt::Display for Card {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} of {}", self.rank(), self.suit())
    }
}

impl fmt::Debug for Card {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Card({} of {})", self.rank(), self.suit())
    }
}

/// Error returned when parsing a card from text.
#[derive(Debug, Error, PartialEq, Eq)]
#[error("invalid card {0:?}")]
pub struct ParseCardError(String);

impl FromStr for Card {
    type Err = ParseCardError;

    /// Parses the `"<rank> of <suit>"` form, e.g. `"10 of Hearts"`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let err = || ParseCardError(s.to_string());
        let (rank, suit) = s.trim().split_once(" of ").ok_or_else(err)?;

        let rank = Rank::ranks()
            .find(|r| r.name() == rank)
            .ok_or_else(err)?;
        let suit = Suit::suits()
            .find(|st| st.name() == suit)
            .ok_or_else(err)?;

        Ok(Card::new(rank, suit))
    }
}

/// Card rank.
///
/// The discriminant is the rank value used by the hand evaluator, aces are
/// always high.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Rank {
    /// Deuce
    Deuce = 2,
    /// Trey
    Trey,
    /// Four
    Four,
    /// Five
    Five,
    /// Six
    Six,
    /// Seven
    Seven,
    /// Eight
    Eight,
    /// Nine
    Nine,
    /// Ten
    Ten,
    /// Jack
    Jack,
    /// Queen
    Queen,
    /// King
    King,
    /// Ace
    Ace,
}

impl Rank {
    /// Returns all ranks.
    pub fn ranks() -> impl DoubleEndedIterator<Item = Rank> {
        use Rank::*;
        [
            Deuce, Trey, Four, Five, Six, Seven, Eight, Nine, Ten, Jack, Queen, King, Ace,
        ]
        .into_iter()
    }

    /// The rank numeric value from 2 to 14.
    pub fn value(&self) -> u8 {
        *self as u8
    }

    /// The rank name used on the wire.
    pub fn name(&self) -> &'static str {
        match self {
            Rank::Deuce => "2",
            Rank::Trey => "3",
            Rank::Four => "4",
            Rank::Five => "5",
            Rank::Six => "6",
            Rank::Seven => "7",
            Rank::Eight => "8",
            Rank::Nine => "9",
            Rank::Ten => "10",
            Rank::Jack => "Jack",
            Rank::Queen => "Queen",
            Rank::King => "King",
            Rank::Ace => "Ace",
        }
    }
}

impl fmt::Display for Rank {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Card suit.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Suit {
    /// Hearts suit.
    Hearts = 0,
    /// Diamonds suit.
    Diamonds = 1,
    /// Clubs suit.
    Clubs = 2,
    /// Spades suit.
    Spades = 3,
}

impl Suit {
    /// Returns all suits in deck generation order.
    pub fn suits() -> impl DoubleEndedIterator<Item = Suit> {
        [Suit::Hearts, Suit::Diamonds, Suit::Clubs, Suit::Spades].into_iter()
    }

    /// The suit name used on the wire.
    pub fn name(&self) -> &'static str {
        match self {
            Suit::Hearts => "Hearts",
            Suit::Diamonds => "Diamonds",
            Suit::Clubs => "Clubs",
            Suit::Spades => "Spades",
        }
    }
}

impl fmt::Display for Suit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Error returned when drawing more cards than the deck holds.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
#[error("deck exhausted: {needed} cards needed, {remaining} remaining")]
pub struct DeckExhausted {
    /// Cards requested.
    pub needed: usize,
    /// Cards left in the deck.
    pub remaining: usize,
}

/// A cards Deck.
///
/// Cards are drawn from the end of the sequence, there is no replacement.
#[derive(Debug)]
pub struct Deck {
    cards: Vec<Card>,
}

impl Deck {
    /// The number of cards in the deck.
    pub const SIZE: usize = 52;

    /// Creates a new shuffled deck.
    pub fn new_and_shuffled<R: Rng>(rng: &mut R) -> Self {
        let mut deck = Self::default();
        deck.shuffle(rng);
        deck
    }

    /// Fills the deck with all cards in suit-major order.
    pub fn reset(&mut self) {
        self.cards.clear();
        self.cards.extend(
            Suit::suits().flat_map(|s| Rank::ranks().map(move |r| Card::new(r, s))),
        );
    }

    /// Shuffles the remaining cards.
    pub fn shuffle<R: Rng>(&mut self, rng: &mut R) {
        self.cards.shuffle(rng);
    }

    /// Draws a card from the top of the deck.
    pub fn draw(&mut self) -> Result<Card, DeckExhausted> {
        self.cards.pop().ok_or(DeckExhausted {
            needed: 1,
            remaining: 0,
        })
    }

    /// Checks there are at least `needed` cards left.
    pub fn ensure(&self, needed: usize) -> Result<(), DeckExhausted> {
        if self.cards.len() < needed {
            Err(DeckExhausted {
                needed,
                remaining: self.cards.len(),
            })
        } else {
            Ok(())
        }
    }

    /// Checks if the deck is empty.
    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    /// Number of cards in the deck.
    pub fn count(&self) -> usize {
        self.cards.len()
    }

    /// Removes a card from the deck.
    pub fn remove(&mut self, card: Card) {
        self.cards.retain(|c| c != &card);
    }

    /// Calls the `f` closure for each 4-cards hand in the deck.
    pub fn for_each_hand<F>(&self, mut f: F)
    where
        F: FnMut(&[Card; 4]),
    {
        let n = self.cards.len();
        let mut h = [Card::new(Rank::Ace, Suit::Hearts); 4];

        for c1 in 0..n {
            h[0] = self.cards[c1];

            for c2 in (c1 + 1)..n {
                h[1] = self.cards[c2];

                for c3 in (c2 + 1)..n {
                    h[2] = self.cards[c3];

                    for c4 in (c3 + 1)..n {
                        h[3] = self.cards[c4];
                        f(&h);
                    }
                }
            }
        }
    }
}

impl Default for Deck {
    fn default() -> Self {
        let mut deck = Self {
            cards: Vec::with_capacity(Self::SIZE),
        };
        deck.reset();
        deck
    }
}

impl From<Vec<Card>> for Deck {
    /// Creates a deck with the given cards, the last card is drawn first.
    fn from(cards: Vec<Card>) -> Self {
        Self { cards }
    }
}

impl IntoIterator for Deck {
    type Item = Card;
    type IntoIter = std::vec::IntoIter<Card>;

    fn into_iter(self) -> Self::IntoIter {
        self.cards.into_iter()
    }
}
