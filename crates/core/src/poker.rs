// Copyright (C) 2025 Vince Vasta
// SPDX-License-Identifier: Apache-2.0

//! Types used in a Poker game.
use serde::{Deserialize, Serialize};
use std::{fmt, iter, ops, sync::atomic};

pub use fourflush_cards::{Card, Deck, DeckExhausted, ParseCardError, Rank, Suit};

#[cfg(feature = "eval")]
pub use fourflush_eval::{HandCategory, evaluate};

/// A unique player identifier, stable for the lifetime of a connection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct PlayerId(u32);

impl PlayerId {
    /// Create a new unique player id.
    pub fn new_id() -> PlayerId {
        static LAST_ID: atomic::AtomicU32 = atomic::AtomicU32::new(1);
        PlayerId(LAST_ID.fetch_add(1, atomic::Ordering::Relaxed))
    }
}

impl fmt::Display for PlayerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Chips amount.
///
/// Bets are 32 bits wide, sums of bets are kept in 64 bits so that a pot
/// never loses chips.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Chips(u64);

impl Chips {
    /// The zero chips.
    pub const ZERO: Chips = Chips(0);

    /// Creates chips with the given value.
    pub const fn new(value: u32) -> Self {
        Self(value as u64)
    }

    /// Creates chips from a pot sized amount.
    pub const fn from_amount(amount: u64) -> Self {
        Self(amount)
    }

    /// The integer amount.
    pub fn amount(&self) -> u64 {
        self.0
    }
}

impl From<Chips> for i64 {
    fn from(val: Chips) -> Self {
        i64::try_from(val.0).unwrap_or(i64::MAX)
    }
}

impl ops::Add for Chips {
    type Output = Self;

    fn add(self, rhs: Self) -> Self::Output {
        Chips(self.0 + rhs.0)
    }
}

impl ops::AddAssign for Chips {
    fn add_assign(&mut self, rhs: Self) {
        self.0 += rhs.0;
    }
}

impl ops::Div<u32> for Chips {
    type Output = Self;

    fn div(self, rhs: u32) -> Self::Output {
        Self(self.0 / u64::from(rhs))
    }
}

impl ops::Rem<u32> for Chips {
    type Output = Self;

    fn rem(self, rhs: u32) -> Self::Output {
        Self(self.0 % u64::from(rhs))
    }
}

impl iter::Sum for Chips {
    fn sum<I: Iterator<Item = Chips>>(iter: I) -> Self {
        iter.fold(Chips::ZERO, |acc, c| acc + c)
    }
}

impl fmt::Display for Chips {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
