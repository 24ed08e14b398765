// Copyright (C) 2025 Vince Vasta
// SPDX-License-Identifier: Apache-2.0

//! Fourflush Poker cards types.
//!
//! This crate define types to create cards:
//!
//! ```
//! # use fourflush_cards::{Card, Rank, Suit};
//! let ah = Card::new(Rank::Ace, Suit::Hearts);
//! assert_eq!(ah.to_string(), "Ace of Hearts");
//! assert_eq!("Ace of Hearts".parse::<Card>(), Ok(ah));
//! ```
//!
//! and a [Deck] type for shuffling and drawing cards, a deck is never
//! replenished, drawing from an empty deck returns [DeckExhausted]:
//!
//! ```
//! # use fourflush_cards::Deck;
//! let mut deck = Deck::new_and_shuffled(&mut rand::rng());
//! for _ in 0..Deck::SIZE {
//!     deck.draw().unwrap();
//! }
//! assert!(deck.draw().is_err());
//! ```
//!
//! To iterate through all 4 cards hands:
//!
//! ```no_run
//! # use fourflush_cards::Deck;
//! let mut counter = 0;
//! Deck::default().for_each_hand(|hand| {
//!     counter += 1;
//! });
//! assert_eq!(counter, 270_725);
//! ```
#![warn(clippy::all, rust_2018_idioms, missing_docs)]
mod deck;
pub use deck::{Card, Deck, DeckExhausted, ParseCardError, Rank, Suit};
