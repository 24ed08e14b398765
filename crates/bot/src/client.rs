// Copyright (C) 2025 Vince Vasta
// SPDX-License-Identifier: Apache-2.0

//! Automated poker client.
use anyhow::Result;
use log::info;
use rand::{Rng, SeedableRng, rngs::StdRng};
use tokio::{
    sync::{broadcast, mpsc},
    time::{self, Duration},
};

use fourflush_core::{
    connection::TextConnection,
    game_state::{GameState, Reply},
    message::{ClientMessage, ServerMessage},
    poker::Chips,
};

/// A Poker bot strategy.
pub trait Strategy: Send + 'static {
    /// The bet for this round, called once the hole card has been dealt.
    fn bet(&mut self, state: &GameState) -> Chips;

    /// Checks if the bot stays for another round.
    fn play_again(&mut self, state: &GameState) -> bool;
}

/// Bets a random amount and leaves after a number of rounds.
#[derive(Debug)]
pub struct RandomBets {
    max_bet: u32,
    rounds: u32,
    rng: StdRng,
}

impl RandomBets {
    /// Creates a strategy that bets up to `max_bet` for `rounds` rounds.
    pub fn new(max_bet: u32, rounds: u32) -> Self {
        Self::with_rng(max_bet, rounds, StdRng::from_os_rng())
    }

    /// Creates a strategy with user initialized randomness.
    pub fn with_rng(max_bet: u32, rounds: u32, rng: StdRng) -> Self {
        Self {
            max_bet,
            rounds,
            rng,
        }
    }
}

impl Strategy for RandomBets {
    fn bet(&mut self, _state: &GameState) -> Chips {
        if self.max_bet == 0 {
            Chips::ZERO
        } else {
            Chips::new(self.rng.random_range(1..=self.max_bet))
        }
    }

    fn play_again(&mut self, state: &GameState) -> bool {
        state.rounds() < self.rounds
    }
}

/// Poker client.
pub(crate) struct Client<S: Strategy> {
    strategy: S,
    nickname: String,
    conn: TextConnection,
    state: GameState,
    think_time: Duration,
    shutdown_broadcast_rx: broadcast::Receiver<()>,
    _shutdown_complete_tx: mpsc::Sender<()>,
}

impl<S: Strategy> Client<S> {
    /// Creates a new client connected to the dealer.
    pub(crate) async fn new(
        strategy: S,
        nickname: String,
        addr: &str,
        think_time: Duration,
        shutdown_broadcast_rx: broadcast::Receiver<()>,
        _shutdown_complete_tx: mpsc::Sender<()>,
    ) -> Result<Self> {
        let conn = TextConnection::connect(addr).await?;
        info!("{nickname} connected to {addr}");

        Ok(Self {
            strategy,
            nickname,
            conn,
            state: GameState::default(),
            think_time,
            shutdown_broadcast_rx,
            _shutdown_complete_tx,
        })
    }

    /// Runs the client message loop.
    pub(crate) async fn run(&mut self) -> Result<()> {
        loop {
            let msg = tokio::select! {
                res = self.conn.recv_message() => res?,
                _ = self.shutdown_broadcast_rx.recv() => {
                    self.conn.close().await;
                    return Ok(());
                }
            };

            if !self.handle_message(msg).await? {
                self.conn.close().await;
                return Ok(());
            }
        }
    }

    /// Replies to a server message, returns false when leaving the table.
    async fn handle_message(&mut self, msg: ServerMessage) -> Result<bool> {
        let reply = match self.state.handle_message(&msg) {
            Reply::Ack => {
                if let Some(result) = self.state.last_result().filter(|r| *r == msg) {
                    info!(
                        "{} {} balance {}",
                        self.nickname,
                        result.to_wire().trim_end(),
                        self.state.balance()
                    );
                }

                ClientMessage::Ack
            }
            Reply::Bet => {
                self.think().await;

                let bet = self.strategy.bet(&self.state);
                self.state.place_bet(bet);
                info!("{} bets {bet}", self.nickname);
                ClientMessage::Bet(bet)
            }
            Reply::Continue => ClientMessage::Continue(self.strategy.play_again(&self.state)),
        };

        self.conn.send_text(&reply.to_wire()).await?;

        if reply == ClientMessage::Continue(false) {
            info!(
                "{} leaves after {} rounds with balance {}",
                self.nickname,
                self.state.rounds(),
                self.state.balance()
            );
            return Ok(false);
        }

        Ok(true)
    }

    async fn think(&mut self) {
        let max = self.think_time.as_millis() as u64;
        if max > 0 {
            let delay = rand::rng().random_range(0..max);
            time::sleep(Duration::from_millis(delay)).await;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use fourflush_core::poker::{Card, Rank, Suit};
    use tokio::net::TcpListener;

    struct FixedBet(u32);

    impl Strategy for FixedBet {
        fn bet(&mut self, _state: &GameState) -> Chips {
            Chips::new(self.0)
        }

        fn play_again(&mut self, state: &GameState) -> bool {
            state.rounds() < 2
        }
    }

    #[test]
    fn random_bets() {
        let mut strategy = RandomBets::with_rng(50, 3, StdRng::seed_from_u64(1));
        let mut state = GameState::default();

        for _ in 0..100 {
            let bet = strategy.bet(&state);
            assert!(bet > Chips::ZERO && bet <= Chips::new(50));
        }

        for _ in 0..2 {
            state.handle_message(&ServerMessage::RoundStarting);
            assert!(strategy.play_again(&state));
        }

        state.handle_message(&ServerMessage::RoundStarting);
        assert!(!strategy.play_again(&state));

        let mut strategy = RandomBets::with_rng(0, 1, StdRng::seed_from_u64(1));
        assert_eq!(strategy.bet(&state), Chips::ZERO);
    }

    #[tokio::test]
    async fn client_plays_rounds() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap().to_string();

        let dealer = tokio::spawn(async move {
            let (stream, _) = listener.accept().await.unwrap();
            let mut conn = TextConnection::new(stream);
            let mut bets = Vec::new();

            for result in [ServerMessage::Tie(Chips::new(15)), ServerMessage::Lost] {
                let msgs = [
                    ServerMessage::RoundStarting,
                    ServerMessage::TableCards,
                    ServerMessage::Card(Card::new(Rank::Ace, Suit::Hearts)),
                    ServerMessage::Card(Card::new(Rank::King, Suit::Hearts)),
                    ServerMessage::Card(Card::new(Rank::Queen, Suit::Hearts)),
                    ServerMessage::YourCards,
                    ServerMessage::Card(Card::new(Rank::Jack, Suit::Hearts)),
                ];

                for msg in msgs {
                    conn.send_text(&msg.to_wire()).await.unwrap();
                    assert_eq!(conn.recv_line().await.unwrap(), "OK");
                }

                conn.send_text(&ServerMessage::EnterBet.to_wire())
                    .await
                    .unwrap();
                bets.push(conn.recv_line().await.unwrap());

                conn.send_text(&result.to_wire()).await.unwrap();
                assert_eq!(conn.recv_line().await.unwrap(), "OK");

                conn.send_text(&ServerMessage::Continue.to_wire())
                    .await
                    .unwrap();
                bets.push(conn.recv_char().await.unwrap().to_string());
            }

            bets
        });

        let (_shutdown_tx, shutdown_rx) = broadcast::channel(1);
        let (complete_tx, _complete_rx) = mpsc::channel(1);
        let mut client = Client::new(
            FixedBet(5),
            "Alice".to_string(),
            &addr,
            Duration::ZERO,
            shutdown_rx,
            complete_tx,
        )
        .await
        .unwrap();

        client.run().await.unwrap();
        assert_eq!(dealer.await.unwrap(), vec!["5", "y", "5", "n"]);

        assert_eq!(client.state.rounds(), 2);
        assert_eq!(client.state.balance(), 1_000 - 5 + 15 - 5);
        assert_eq!(client.state.last_result(), Some(ServerMessage::Lost));
    }
}
