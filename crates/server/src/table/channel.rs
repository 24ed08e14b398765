// Copyright (C) 2025 Vince Vasta
// SPDX-License-Identifier: Apache-2.0

//! The player channel used by the table engine.
use std::future::Future;
use thiserror::Error;

use fourflush_core::{
    message::{MalformedBet, ServerMessage},
    poker::{Card, Chips},
};

/// A player channel failure.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ChannelError {
    /// The player connection is gone.
    #[error("player disconnected")]
    Disconnected,
    /// The player sent a bet that is not a non negative integer.
    #[error(transparent)]
    MalformedBet(#[from] MalformedBet),
    /// A transport error.
    #[error("channel error: {0}")]
    Io(String),
}

/// A connection to a player.
///
/// The engine never retries a failed operation, a failure is logged and the
/// operation result counts as empty.
pub trait PlayerChannel: Send {
    /// Sends a text line as is.
    fn send_text(&mut self, text: &str) -> impl Future<Output = Result<(), ChannelError>> + Send;

    /// Waits for an acknowledgment of the last message.
    fn receive_ack(&mut self) -> impl Future<Output = Result<(), ChannelError>> + Send;

    /// Waits for an integer amount.
    fn receive_int(&mut self) -> impl Future<Output = Result<Chips, ChannelError>> + Send;

    /// Waits for a single character answer.
    fn receive_char(&mut self) -> impl Future<Output = Result<char, ChannelError>> + Send;

    /// Disconnects the player.
    fn close(&mut self) -> impl Future<Output = ()> + Send;

    /// Sends a message using its wire text.
    fn send_message(
        &mut self,
        msg: ServerMessage,
    ) -> impl Future<Output = Result<(), ChannelError>> + Send {
        async move {
            let text = msg.to_wire();
            self.send_text(&text).await
        }
    }

    /// Sends a card as a `"<rank> of <suit>"` line.
    fn send_card(&mut self, card: Card) -> impl Future<Output = Result<(), ChannelError>> + Send {
        self.send_message(ServerMessage::Card(card))
    }
}
