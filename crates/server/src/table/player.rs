// Copyright (C) 2025 Vince Vasta
// SPDX-License-Identifier: Apache-2.0

//! Table player types.
use fourflush_core::poker::{Card, Chips, HandCategory, PlayerId};

/// A seat in the session roster, it outlives rounds.
#[derive(Debug)]
pub struct Seat<C> {
    /// The player id.
    pub player_id: PlayerId,
    /// The channel to this player connection.
    pub channel: C,
    /// The player balance, it goes negative if the player bets more than it has.
    pub balance: i64,
}

impl<C> Seat<C> {
    /// Creates a new seat with a fresh player id.
    pub fn new(channel: C, balance: i64) -> Self {
        Self {
            player_id: PlayerId::new_id(),
            channel,
            balance,
        }
    }
}

/// A player state for a single round.
#[derive(Debug, Clone)]
pub struct Player {
    /// The player id.
    pub player_id: PlayerId,
    /// The player private card.
    pub hole_card: Card,
    /// The player bet for this round.
    pub bet: Chips,
    /// The player balance, updated with bets and payouts.
    pub balance: i64,
    /// The hand category once evaluated.
    pub category: Option<HandCategory>,
    /// The chips won in this round.
    pub payout: Chips,
}

impl Player {
    /// Creates a player who has been dealt a hole card.
    pub fn new(player_id: PlayerId, hole_card: Card, balance: i64) -> Self {
        Self {
            player_id,
            hole_card,
            bet: Chips::ZERO,
            balance,
            category: None,
            payout: Chips::ZERO,
        }
    }

    /// Places a bet, the balance is not checked.
    pub fn bet(&mut self, chips: Chips) {
        self.bet = chips;
        self.balance -= i64::from(chips);
    }

    /// Pays chips to this player.
    pub fn pay(&mut self, chips: Chips) {
        self.payout += chips;
        self.balance += i64::from(chips);
    }

    /// Evaluates this player hand with the table cards.
    pub fn evaluate(&mut self, table_cards: [Card; 3]) -> HandCategory {
        let [c1, c2, c3] = table_cards;
        let category = HandCategory::evaluate(&[self.hole_card, c1, c2, c3]);
        self.category = Some(category);
        category
    }

    /// The net result of this round for the player.
    pub fn net(&self) -> i64 {
        i64::from(self.payout) - i64::from(self.bet)
    }
}
