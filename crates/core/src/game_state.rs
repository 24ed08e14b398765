// Copyright (C) 2025 Vince Vasta
// SPDX-License-Identifier: Apache-2.0

//! Client game state types.
use crate::{
    message::ServerMessage,
    poker::{Card, Chips},
};

/// What the client has to send back after a server message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Reply {
    /// Acknowledge the message.
    Ack,
    /// Send a bet.
    Bet,
    /// Answer the continue prompt.
    Continue,
}

/// Where the next dealt card goes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Dealing {
    None,
    Table,
    Hole,
}

/// This client game state.
#[derive(Debug)]
pub struct GameState {
    balance: i64,
    rounds: u32,
    dealing: Dealing,
    table_cards: Vec<Card>,
    hole_card: Option<Card>,
    last_result: Option<ServerMessage>,
}

impl GameState {
    /// The balance a client starts with.
    pub const START_BALANCE: i64 = 1_000;

    /// Creates a new state with the given balance.
    pub fn new(balance: i64) -> Self {
        Self {
            balance,
            rounds: 0,
            dealing: Dealing::None,
            table_cards: Vec::with_capacity(3),
            hole_card: None,
            last_result: None,
        }
    }

    /// Handle an incoming server message, returns the reply the server expects.
    pub fn handle_message(&mut self, msg: &ServerMessage) -> Reply {
        match msg {
            ServerMessage::RoundStarting => {
                self.rounds += 1;
                self.dealing = Dealing::None;
                self.table_cards.clear();
                self.hole_card = None;
                self.last_result = None;
            }
            ServerMessage::TableCards => self.dealing = Dealing::Table,
            ServerMessage::YourCards => self.dealing = Dealing::Hole,
            ServerMessage::Card(card) => match self.dealing {
                Dealing::Table => self.table_cards.push(*card),
                Dealing::Hole => self.hole_card = Some(*card),
                Dealing::None => {}
            },
            ServerMessage::EnterBet => return Reply::Bet,
            ServerMessage::Continue => return Reply::Continue,
            ServerMessage::Won(_)
            | ServerMessage::Tie(_)
            | ServerMessage::Lost
            | ServerMessage::NoBets
            | ServerMessage::NoWinner => {
                self.balance += i64::from(msg.winnings());
                self.last_result = Some(*msg);
            }
        }

        Reply::Ack
    }

    /// Records a bet sent to the server.
    pub fn place_bet(&mut self, bet: Chips) {
        self.balance -= i64::from(bet);
    }

    /// The client balance.
    pub fn balance(&self) -> i64 {
        self.balance
    }

    /// Number of rounds started.
    pub fn rounds(&self) -> u32 {
        self.rounds
    }

    /// The table cards dealt so far.
    pub fn table_cards(&self) -> &[Card] {
        &self.table_cards
    }

    /// The hole card if it has been dealt.
    pub fn hole_card(&self) -> Option<Card> {
        self.hole_card
    }

    /// The result of the last round.
    pub fn last_result(&self) -> Option<ServerMessage> {
        self.last_result
    }

    /// The four cards hand once all cards have been dealt.
    pub fn hand(&self) -> Option<[Card; 4]> {
        match (self.hole_card, self.table_cards.as_slice()) {
            (Some(hole), &[c1, c2, c3]) => Some([hole, c1, c2, c3]),
            _ => None,
        }
    }
}

impl Default for GameState {
    fn default() -> Self {
        Self::new(Self::START_BALANCE)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::poker::{Rank, Suit};

    #[test]
    fn play_round() {
        let mut state = GameState::default();
        let c1 = Card::new(Rank::Deuce, Suit::Hearts);
        let c2 = Card::new(Rank::Five, Suit::Clubs);
        let c3 = Card::new(Rank::Nine, Suit::Spades);
        let hole = Card::new(Rank::Deuce, Suit::Diamonds);

        assert_eq!(state.handle_message(&ServerMessage::RoundStarting), Reply::Ack);
        assert_eq!(state.handle_message(&ServerMessage::TableCards), Reply::Ack);
        for card in [c1, c2, c3] {
            assert_eq!(state.handle_message(&ServerMessage::Card(card)), Reply::Ack);
        }
        assert!(state.hand().is_none());

        assert_eq!(state.handle_message(&ServerMessage::YourCards), Reply::Ack);
        state.handle_message(&ServerMessage::Card(hole));

        assert_eq!(state.table_cards(), &[c1, c2, c3]);
        assert_eq!(state.hole_card(), Some(hole));
        assert_eq!(state.hand(), Some([hole, c1, c2, c3]));

        assert_eq!(state.handle_message(&ServerMessage::EnterBet), Reply::Bet);
        state.place_bet(Chips::new(20));
        assert_eq!(state.balance(), 980);

        state.handle_message(&ServerMessage::Won(Chips::new(30)));
        assert_eq!(state.balance(), 1_010);
        assert_eq!(
            state.last_result(),
            Some(ServerMessage::Won(Chips::new(30)))
        );

        assert_eq!(
            state.handle_message(&ServerMessage::Continue),
            Reply::Continue
        );

        // A new round resets the cards.
        state.handle_message(&ServerMessage::RoundStarting);
        assert_eq!(state.rounds(), 2);
        assert!(state.table_cards().is_empty());
        assert!(state.hole_card().is_none());
        assert!(state.last_result().is_none());
    }

    #[test]
    fn balance_can_go_negative() {
        let mut state = GameState::new(10);
        state.handle_message(&ServerMessage::EnterBet);
        state.place_bet(Chips::new(25));
        state.handle_message(&ServerMessage::Lost);
        assert_eq!(state.balance(), -15);
    }
}
