// Copyright (C) 2025 Vince Vasta
// SPDX-License-Identifier: Apache-2.0

//! In memory player channels for engine tests.
use std::collections::VecDeque;
use tokio::sync::mpsc;

use fourflush_core::{
    message::parse_bet,
    poker::{Card, Chips, Deck},
};

use super::{
    channel::{ChannelError, PlayerChannel},
    player::Seat,
};

/// What a scripted player observed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    /// The engine sent this text.
    Sent(String),
    /// The engine closed the channel.
    Closed,
}

/// A channel that replies with scripted bets and answers.
#[derive(Debug)]
pub struct ScriptedChannel {
    bets: VecDeque<String>,
    answers: VecDeque<char>,
    disconnected: bool,
    events_tx: mpsc::UnboundedSender<Event>,
}

impl ScriptedChannel {
    pub fn new(bets: &[&str], answers: &str) -> (Self, mpsc::UnboundedReceiver<Event>) {
        let (events_tx, events_rx) = mpsc::unbounded_channel();
        let channel = Self {
            bets: bets.iter().map(|s| s.to_string()).collect(),
            answers: answers.chars().collect(),
            disconnected: false,
            events_tx,
        };
        (channel, events_rx)
    }

    /// A channel that fails every operation.
    pub fn disconnected() -> (Self, mpsc::UnboundedReceiver<Event>) {
        let (mut channel, events_rx) = Self::new(&[], "");
        channel.disconnected = true;
        (channel, events_rx)
    }
}

impl PlayerChannel for ScriptedChannel {
    async fn send_text(&mut self, text: &str) -> Result<(), ChannelError> {
        if self.disconnected {
            return Err(ChannelError::Disconnected);
        }

        let _ = self.events_tx.send(Event::Sent(text.to_string()));
        Ok(())
    }

    async fn receive_ack(&mut self) -> Result<(), ChannelError> {
        if self.disconnected {
            Err(ChannelError::Disconnected)
        } else {
            Ok(())
        }
    }

    async fn receive_int(&mut self) -> Result<Chips, ChannelError> {
        match self.bets.pop_front() {
            Some(bet) if !self.disconnected => Ok(parse_bet(&bet)?),
            _ => Err(ChannelError::Disconnected),
        }
    }

    async fn receive_char(&mut self) -> Result<char, ChannelError> {
        match self.answers.pop_front() {
            Some(c) if !self.disconnected => Ok(c),
            _ => Err(ChannelError::Disconnected),
        }
    }

    async fn close(&mut self) {
        self.disconnected = true;
        let _ = self.events_tx.send(Event::Closed);
    }
}

/// Creates a seated player with scripted bets and continue answers.
pub fn new_player(
    bets: &[&str],
    answers: &str,
    balance: i64,
) -> (Seat<ScriptedChannel>, mpsc::UnboundedReceiver<Event>) {
    let (channel, events_rx) = ScriptedChannel::new(bets, answers);
    (Seat::new(channel, balance), events_rx)
}

/// Collects the events received so far.
pub fn events(rx: &mut mpsc::UnboundedReceiver<Event>) -> Vec<Event> {
    let mut events = Vec::new();
    while let Ok(event) = rx.try_recv() {
        events.push(event);
    }
    events
}

/// Collects the texts sent so far.
pub fn sent(rx: &mut mpsc::UnboundedReceiver<Event>) -> Vec<String> {
    events(rx)
        .into_iter()
        .filter_map(|e| match e {
            Event::Sent(text) => Some(text),
            Event::Closed => None,
        })
        .collect()
}

/// A deck that deals the given cards in order.
pub fn stacked_deck(draw_order: &[Card]) -> Deck {
    let mut cards = draw_order.to_vec();
    cards.reverse();
    Deck::from(cards)
}

/// Parses a card, panics on invalid text.
pub fn card(text: &str) -> Card {
    text.parse().unwrap()
}
