// Copyright (C) 2025 Vince Vasta
// SPDX-License-Identifier: Apache-2.0

//! Fourflush Poker hand evaluator.
//!
//! Evaluates a four cards hand, one hole card and the three table cards, into
//! a [HandCategory]. Hands are compared by category only, two hands with the
//! same category are a tie:
//!
//! ```
//! # use fourflush_eval::*;
//! let straight = [
//!     Card::new(Rank::Four, Suit::Clubs),
//!     Card::new(Rank::Five, Suit::Diamonds),
//!     Card::new(Rank::Six, Suit::Hearts),
//!     Card::new(Rank::Seven, Suit::Spades),
//! ];
//! let pair = [
//!     Card::new(Rank::Four, Suit::Clubs),
//!     Card::new(Rank::Four, Suit::Diamonds),
//!     Card::new(Rank::Six, Suit::Hearts),
//!     Card::new(Rank::Seven, Suit::Spades),
//! ];
//! assert_eq!(HandCategory::evaluate(&straight), HandCategory::Straight);
//! assert!(HandCategory::evaluate(&straight) > HandCategory::evaluate(&pair));
//! ```
#![warn(clippy::all, rust_2018_idioms, missing_docs)]
pub mod eval;
pub use eval::{HandCategory, evaluate};

// Reexport cards types.
pub use fourflush_cards::{Card, Deck, DeckExhausted, Rank, Suit};
