// Copyright (C) 2025 Vince Vasta
// SPDX-License-Identifier: Apache-2.0

//! Type definitions for messages between the client and server.
//!
//! Messages travel as human readable text, most of them are newline terminated
//! lines, the two prompts that expect a player answer are not.
use anyhow::{Result, bail};
use thiserror::Error;

use crate::poker::{Card, Chips};

/// Message sent by the server to a player.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ServerMessage {
    /// A new round is starting.
    RoundStarting,
    /// The table cards follow.
    TableCards,
    /// The player cards follow.
    YourCards,
    /// A dealt card.
    Card(Card),
    /// Request a bet from the player.
    EnterBet,
    /// The player won the whole pot.
    Won(Chips),
    /// The player tied and receives a share of the pot.
    Tie(Chips),
    /// The player lost the hand.
    Lost,
    /// Nobody placed a bet.
    NoBets,
    /// There is no winner for this hand.
    NoWinner,
    /// Ask the player to play another round.
    Continue,
}

impl ServerMessage {
    const ROUND_STARTING: &'static str = "Round starting...\n";
    const TABLE_CARDS: &'static str = "Table cards: \n";
    const YOUR_CARDS: &'static str = "Your cards: \n";
    const ENTER_BET: &'static str = "Enter your bet: ";
    const WON: &'static str = "You won: ";
    const TIE: &'static str = "It's a tie! You receive: ";
    const LOST: &'static str = "You lost. Better luck next time!\n";
    const NO_BETS: &'static str = "No bets were placed, so no winnings to distribute.\n";
    const NO_WINNER: &'static str = "No winner determined.\n";
    const CONTINUE: &'static str = "Continue? (y/n): ";

    /// The prompts that are not newline terminated.
    pub const PROMPTS: [&'static str; 2] = [Self::ENTER_BET, Self::CONTINUE];

    /// Encodes this message to its wire text.
    pub fn to_wire(&self) -> String {
        match self {
            ServerMessage::RoundStarting => Self::ROUND_STARTING.to_string(),
            ServerMessage::TableCards => Self::TABLE_CARDS.to_string(),
            ServerMessage::YourCards => Self::YOUR_CARDS.to_string(),
            ServerMessage::Card(card) => format!("{card}\n"),
            ServerMessage::EnterBet => Self::ENTER_BET.to_string(),
            ServerMessage::Won(chips) => format!("{}{}\n", Self::WON, chips.amount()),
            ServerMessage::Tie(chips) => format!("{}{}\n", Self::TIE, chips.amount()),
            ServerMessage::Lost => Self::LOST.to_string(),
            ServerMessage::NoBets => Self::NO_BETS.to_string(),
            ServerMessage::NoWinner => Self::NO_WINNER.to_string(),
            ServerMessage::Continue => Self::CONTINUE.to_string(),
        }
    }

    /// Decodes a message from its wire text.
    pub fn parse(text: &str) -> Result<Self> {
        let msg = match text {
            Self::ROUND_STARTING => ServerMessage::RoundStarting,
            Self::TABLE_CARDS => ServerMessage::TableCards,
            Self::YOUR_CARDS => ServerMessage::YourCards,
            Self::ENTER_BET => ServerMessage::EnterBet,
            Self::LOST => ServerMessage::Lost,
            Self::NO_BETS => ServerMessage::NoBets,
            Self::NO_WINNER => ServerMessage::NoWinner,
            Self::CONTINUE => ServerMessage::Continue,
            _ => {
                if let Some(amount) = text.strip_prefix(Self::WON) {
                    ServerMessage::Won(parse_amount(amount)?)
                } else if let Some(amount) = text.strip_prefix(Self::TIE) {
                    ServerMessage::Tie(parse_amount(amount)?)
                } else if let Ok(card) = text.parse::<Card>() {
                    ServerMessage::Card(card)
                } else {
                    bail!("Unknown server message {text:?}");
                }
            }
        };

        Ok(msg)
    }

    /// Checks if this message expects an acknowledgment.
    pub fn needs_ack(&self) -> bool {
        !matches!(self, ServerMessage::EnterBet | ServerMessage::Continue)
    }

    /// The chips paid to the player by a result message.
    pub fn winnings(&self) -> Chips {
        match self {
            ServerMessage::Won(chips) | ServerMessage::Tie(chips) => *chips,
            _ => Chips::ZERO,
        }
    }
}

fn parse_amount(text: &str) -> Result<Chips> {
    match text.trim().parse::<u64>() {
        Ok(amount) => Ok(Chips::from_amount(amount)),
        Err(e) => bail!("Invalid amount {text:?}: {e}"),
    }
}

/// Message sent by a player to the server.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClientMessage {
    /// Acknowledge a server message.
    Ack,
    /// A bet for this hand.
    Bet(Chips),
    /// Answer to the continue prompt.
    Continue(bool),
}

impl ClientMessage {
    /// Encodes this message to its wire text.
    pub fn to_wire(&self) -> String {
        match self {
            ClientMessage::Ack => "OK\n".to_string(),
            ClientMessage::Bet(chips) => format!("{}\n", chips.amount()),
            ClientMessage::Continue(true) => "y".to_string(),
            ClientMessage::Continue(false) => "n".to_string(),
        }
    }
}

/// A bet that is not a non negative integer.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("malformed bet {0:?}")]
pub struct MalformedBet(pub String);

/// Parses a bet line sent by a player.
pub fn parse_bet(text: &str) -> Result<Chips, MalformedBet> {
    text.trim()
        .parse::<u32>()
        .map(Chips::new)
        .map_err(|_| MalformedBet(text.trim().to_string()))
}

/// Checks if a continue answer keeps the player at the table.
pub fn parse_continue(answer: char) -> bool {
    answer == 'y'
}
