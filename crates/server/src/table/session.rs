// Copyright (C) 2025 Vince Vasta
// SPDX-License-Identifier: Apache-2.0

//! The table session that plays rounds until players leave.
use log::{error, info};
use rand::{SeedableRng, rngs::StdRng};
use std::time::Duration;
use tokio::{
    sync::mpsc::{self, error::TryRecvError},
    time,
};

use fourflush_core::poker::Deck;

use super::{
    TableError,
    channel::PlayerChannel,
    player::Seat,
    round::{Payout, Round, RoundReport},
};

/// The session configuration.
#[derive(Debug, Clone)]
pub struct SessionConfig {
    /// The number of players needed to start a round.
    pub min_players: usize,
    /// How long to wait for a player before logging and retrying.
    pub join_wait: Duration,
    /// The balance each player starts with.
    pub start_balance: i64,
    /// The deck shuffle seed, random if not set.
    pub seed: Option<u64>,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            min_players: 2,
            join_wait: Duration::from_secs(5),
            start_balance: 1_000,
            seed: None,
        }
    }
}

/// The session totals when it ends normally.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionSummary {
    /// The number of rounds played.
    pub rounds: u32,
    /// The cards left in the deck.
    pub remaining_cards: usize,
}

/// Owns the deck and the players roster across rounds.
#[derive(Debug)]
pub struct TableSession<C> {
    config: SessionConfig,
    deck: Deck,
    seats: Vec<Seat<C>>,
    join_rx: mpsc::Receiver<C>,
    join_closed: bool,
    rounds: u32,
}

impl<C: PlayerChannel> TableSession<C> {
    /// Creates a session with a shuffled deck, players arrive on `join_rx`.
    pub fn new(config: SessionConfig, join_rx: mpsc::Receiver<C>) -> Self {
        let mut rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };

        let deck = Deck::new_and_shuffled(&mut rng);
        Self::with_deck(config, deck, join_rx)
    }

    /// Creates a session that plays with the given deck.
    pub fn with_deck(config: SessionConfig, deck: Deck, join_rx: mpsc::Receiver<C>) -> Self {
        Self {
            config,
            deck,
            seats: Vec::default(),
            join_rx,
            join_closed: false,
            rounds: 0,
        }
    }

    /// Plays rounds until the join channel closes and too few players remain.
    ///
    /// The deck is never reshuffled, the session fails when it cannot deal a
    /// full round and all players are disconnected.
    pub async fn run(mut self) -> Result<SessionSummary, TableError> {
        info!("Table session started with {} cards", self.deck.count());

        loop {
            // New players only join at a round boundary.
            self.seat_arrivals();

            if self.seats.len() < self.config.min_players {
                if self.join_closed {
                    break;
                }

                self.wait_for_player().await;
                continue;
            }

            self.rounds += 1;
            let round = Round::new(self.rounds, &mut self.deck, &mut self.seats);
            match round.play().await {
                Ok(report) => self.round_ended(&report),
                Err(e) => {
                    error!("Round {} cannot be dealt: {e}", self.rounds);
                    self.close_all().await;
                    return Err(e.into());
                }
            }
        }

        self.close_all().await;

        info!(
            "Table session ended after {} rounds, {} cards left",
            self.rounds,
            self.deck.count()
        );

        Ok(SessionSummary {
            rounds: self.rounds,
            remaining_cards: self.deck.count(),
        })
    }

    fn seat(&mut self, channel: C) {
        let seat = Seat::new(channel, self.config.start_balance);
        info!(
            "Player {} joined with balance {}",
            seat.player_id, seat.balance
        );
        self.seats.push(seat);
    }

    fn seat_arrivals(&mut self) {
        loop {
            match self.join_rx.try_recv() {
                Ok(channel) => self.seat(channel),
                Err(TryRecvError::Empty) => break,
                Err(TryRecvError::Disconnected) => {
                    self.join_closed = true;
                    break;
                }
            }
        }
    }

    async fn wait_for_player(&mut self) {
        match time::timeout(self.config.join_wait, self.join_rx.recv()).await {
            Ok(Some(channel)) => self.seat(channel),
            Ok(None) => self.join_closed = true,
            Err(_) => info!(
                "No incoming connections after {} seconds. Continuing...",
                self.config.join_wait.as_secs_f32()
            ),
        }
    }

    fn round_ended(&self, report: &RoundReport) {
        if matches!(report.payout, Payout::Tie { .. }) {
            info!(
                "Round {} pot {} discarded {}",
                report.round_id,
                report.pot,
                report.payout.discarded()
            );
        }

        for player in &report.players {
            info!(
                "Player {} {} net {} balance {}",
                player.player_id,
                player.category.map(|c| c.label()).unwrap_or("-"),
                player.net(),
                player.balance
            );
        }

        info!(
            "Round {} ended, {} players continue, {} cards left",
            report.round_id,
            report.continuing.len(),
            self.deck.count()
        );
    }

    async fn close_all(&mut self) {
        for mut seat in self.seats.drain(..) {
            info!("Disconnecting player {}", seat.player_id);
            seat.channel.close().await;
        }
    }
}
