// Copyright (C) 2025 Vince Vasta
// SPDX-License-Identifier: Apache-2.0

//! Table engine types.
//!
//! A [TableSession] owns the deck and the players roster and plays a [Round]
//! after another until all players leave or the deck runs out of cards. The
//! engine talks to players only through the [PlayerChannel] trait.
use thiserror::Error;

use fourflush_core::poker::DeckExhausted;

pub mod channel;
pub use channel::{ChannelError, PlayerChannel};
pub mod player;
pub use player::{Player, Seat};
pub mod remote;
pub use remote::RemotePlayer;
pub mod round;
pub use round::{Payout, Round, RoundPhase, RoundReport};
pub mod session;
pub use session::{SessionConfig, SessionSummary, TableSession};

#[cfg(test)]
mod testing;

/// Errors that end a table session.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum TableError {
    /// The deck cannot cover a full deal.
    #[error(transparent)]
    DeckExhausted(#[from] DeckExhausted),
}
