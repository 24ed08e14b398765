// Copyright (C) 2025 Vince Vasta
// SPDX-License-Identifier: Apache-2.0

//! A single round of play.
use futures_util::future;
use log::{info, warn};
use std::fmt;

use fourflush_core::{
    message::{ServerMessage, parse_continue},
    poker::{Card, Chips, Deck, DeckExhausted, HandCategory, PlayerId},
};

use super::{
    channel::{ChannelError, PlayerChannel},
    player::{Player, Seat},
};

/// The round phases in play order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RoundPhase {
    /// Round created, nothing sent yet.
    Waiting,
    /// All players know a round is starting.
    Started,
    /// The 3 table cards have been dealt.
    DealtTable,
    /// Each player got a hole card.
    DealtHole,
    /// All bets have been collected.
    Betting,
    /// Hands have been evaluated.
    Showdown,
    /// The pot has been distributed.
    Payout,
    /// Players have answered the continue prompt.
    ContinuePoll,
}

impl fmt::Display for RoundPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            RoundPhase::Waiting => "waiting",
            RoundPhase::Started => "started",
            RoundPhase::DealtTable => "dealt table",
            RoundPhase::DealtHole => "dealt hole",
            RoundPhase::Betting => "betting",
            RoundPhase::Showdown => "showdown",
            RoundPhase::Payout => "payout",
            RoundPhase::ContinuePoll => "continue poll",
        };
        write!(f, "{s}")
    }
}

/// How the pot was distributed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Payout {
    /// The pot was empty.
    NoBets,
    /// No player could be ranked.
    NoWinner,
    /// A single winner took the pot.
    Winner {
        /// The chips paid to the winner.
        share: Chips,
    },
    /// The pot was split between winners.
    Tie {
        /// The chips paid to each winner.
        share: Chips,
        /// The split remainder nobody receives.
        discarded: Chips,
    },
}

impl Payout {
    /// The chips that have not been paid to anybody.
    pub fn discarded(&self) -> Chips {
        match self {
            Payout::Tie { discarded, .. } => *discarded,
            _ => Chips::ZERO,
        }
    }
}

/// The outcome of a round.
#[derive(Debug, Clone)]
pub struct RoundReport {
    /// The round number in the session.
    pub round_id: u32,
    /// The table cards in dealing order.
    pub table_cards: [Card; 3],
    /// The players in roster order.
    pub players: Vec<Player>,
    /// The sum of all bets.
    pub pot: Chips,
    /// The players with the best hand.
    pub winners: Vec<PlayerId>,
    /// How the pot was distributed.
    pub payout: Payout,
    /// The players who stay for the next round.
    pub continuing: Vec<PlayerId>,
    /// The phases the round went through.
    pub phases: Vec<RoundPhase>,
}

impl RoundReport {
    /// The chips paid to players.
    pub fn distributed(&self) -> Chips {
        self.players.iter().map(|p| p.payout).sum()
    }
}

/// Splits a pot between `winners`, returns the share and the remainder.
pub fn split_pot(pot: Chips, winners: usize) -> (Chips, Chips) {
    match u32::try_from(winners) {
        Ok(0) | Err(_) => (Chips::ZERO, pot),
        Ok(n) => (pot / n, pot % n),
    }
}

/// Returns the indices of all hands with the highest category.
pub fn determine_winners(categories: &[HandCategory]) -> Vec<usize> {
    let Some(best) = categories.iter().max() else {
        return Vec::new();
    };

    categories
        .iter()
        .enumerate()
        .filter(|(_, c)| *c == best)
        .map(|(idx, _)| idx)
        .collect()
}

/// Plays a round with all the seated players.
///
/// Every phase is issued to all players concurrently and ends when all of
/// them are done with it. Channel failures never abort the round, they count
/// as an empty reply.
#[derive(Debug)]
pub struct Round<'a, C> {
    round_id: u32,
    deck: &'a mut Deck,
    seats: &'a mut Vec<Seat<C>>,
    phase: RoundPhase,
    phases: Vec<RoundPhase>,
}

impl<'a, C: PlayerChannel> Round<'a, C> {
    /// Creates a new round.
    pub fn new(round_id: u32, deck: &'a mut Deck, seats: &'a mut Vec<Seat<C>>) -> Self {
        Self {
            round_id,
            deck,
            seats,
            phase: RoundPhase::Waiting,
            phases: Vec::with_capacity(7),
        }
    }

    /// Plays the round, players who leave are removed from the seats.
    ///
    /// Fails without sending anything if the deck cannot deal the round.
    pub async fn play(mut self) -> Result<RoundReport, DeckExhausted> {
        self.deck.ensure(3 + self.seats.len())?;

        self.broadcast(ServerMessage::RoundStarting).await;
        self.enter(RoundPhase::Started);

        let table_cards = self.deal_table().await?;
        self.enter(RoundPhase::DealtTable);

        let mut players = self.deal_hole().await?;
        self.enter(RoundPhase::DealtHole);

        let pot = self.collect_bets(&mut players).await;
        self.enter(RoundPhase::Betting);

        let categories = players
            .iter_mut()
            .map(|p| p.evaluate(table_cards))
            .collect::<Vec<_>>();
        let winners = determine_winners(&categories);
        self.enter(RoundPhase::Showdown);

        let payout = self.pay(&mut players, &winners, pot).await;
        self.enter(RoundPhase::Payout);

        let continuing = self.poll_continue().await;
        self.enter(RoundPhase::ContinuePoll);

        Ok(RoundReport {
            round_id: self.round_id,
            table_cards,
            winners: winners.iter().map(|&idx| players[idx].player_id).collect(),
            players,
            pot,
            payout,
            continuing,
            phases: self.phases,
        })
    }

    /// Sends a message to every player and waits for all the acks.
    async fn broadcast(&mut self, msg: ServerMessage) {
        future::join_all(self.seats.iter_mut().map(|seat| deliver(seat, msg))).await;
    }

    fn enter(&mut self, phase: RoundPhase) {
        info!("Round {} {} -> {}", self.round_id, self.phase, phase);
        self.phase = phase;
        self.phases.push(phase);
    }

    async fn deal_table(&mut self) -> Result<[Card; 3], DeckExhausted> {
        self.broadcast(ServerMessage::TableCards).await;

        let mut table_cards = Vec::with_capacity(3);
        for _ in 0..3 {
            let card = self.deck.draw()?;
            info!("Table card: {card}");

            // Each card is acknowledged by everybody before the next one.
            self.broadcast(ServerMessage::Card(card)).await;
            table_cards.push(card);
        }

        Ok([table_cards[0], table_cards[1], table_cards[2]])
    }

    async fn deal_hole(&mut self) -> Result<Vec<Player>, DeckExhausted> {
        self.broadcast(ServerMessage::YourCards).await;

        let mut players = Vec::with_capacity(self.seats.len());
        for seat in self.seats.iter() {
            let card = self.deck.draw()?;
            info!("Player {} card: {card}", seat.player_id);
            players.push(Player::new(seat.player_id, card, seat.balance));
        }

        future::join_all(
            self.seats
                .iter_mut()
                .zip(&players)
                .map(|(seat, player)| deliver(seat, ServerMessage::Card(player.hole_card))),
        )
        .await;

        Ok(players)
    }

    async fn collect_bets(&mut self, players: &mut [Player]) -> Chips {
        let bets = future::join_all(self.seats.iter_mut().map(request_bet)).await;

        // Bets are applied in roster order once every player has answered.
        let mut pot = Chips::ZERO;
        for (player, bet) in players.iter_mut().zip(bets) {
            player.bet(bet);
            pot += bet;
            info!(
                "Player {} bet {bet} balance {}",
                player.player_id, player.balance
            );
        }

        pot
    }

    async fn pay(&mut self, players: &mut [Player], winners: &[usize], pot: Chips) -> Payout {
        let payout = if pot == Chips::ZERO {
            Payout::NoBets
        } else if winners.is_empty() {
            Payout::NoWinner
        } else if winners.len() == 1 {
            Payout::Winner { share: pot }
        } else {
            let (share, discarded) = split_pot(pot, winners.len());
            Payout::Tie { share, discarded }
        };

        match payout {
            Payout::NoBets => info!("Round {} no bets", self.round_id),
            Payout::NoWinner => info!("Round {} no winner", self.round_id),
            Payout::Winner { share } => {
                let winner = &players[winners[0]];
                info!(
                    "Player {} wins {share} with {}",
                    winner.player_id,
                    category_label(winner)
                );
            }
            Payout::Tie { share, discarded } => {
                let ids = winners
                    .iter()
                    .map(|&idx| players[idx].player_id.to_string())
                    .collect::<Vec<_>>();
                info!(
                    "Draw between players {} with {}, each receives {share}, {discarded} discarded",
                    ids.join(", "),
                    category_label(&players[winners[0]])
                );
            }
        }

        let messages = players
            .iter_mut()
            .enumerate()
            .map(|(idx, player)| match payout {
                Payout::NoBets => ServerMessage::NoBets,
                Payout::NoWinner => ServerMessage::NoWinner,
                Payout::Winner { share } | Payout::Tie { share, .. }
                    if winners.contains(&idx) =>
                {
                    player.pay(share);
                    if matches!(payout, Payout::Winner { .. }) {
                        ServerMessage::Won(share)
                    } else {
                        ServerMessage::Tie(share)
                    }
                }
                _ => ServerMessage::Lost,
            })
            .collect::<Vec<_>>();

        future::join_all(
            self.seats
                .iter_mut()
                .zip(messages)
                .map(|(seat, msg)| deliver(seat, msg)),
        )
        .await;

        for (seat, player) in self.seats.iter_mut().zip(players.iter()) {
            seat.balance = player.balance;
        }

        payout
    }

    async fn poll_continue(&mut self) -> Vec<PlayerId> {
        let answers = future::join_all(self.seats.iter_mut().map(ask_continue)).await;

        future::join_all(
            self.seats
                .iter_mut()
                .zip(&answers)
                .filter(|(_, stays)| !**stays)
                .map(|(seat, _)| {
                    info!("Player {} leaves the table", seat.player_id);
                    seat.channel.close()
                }),
        )
        .await;

        let mut answers = answers.into_iter();
        self.seats.retain(|_| answers.next().unwrap_or(false));

        self.seats.iter().map(|s| s.player_id).collect()
    }
}

fn category_label(player: &Player) -> &'static str {
    player.category.map(|c| c.label()).unwrap_or("no hand")
}

/// Sends a message to a player and waits for the ack.
async fn deliver<C: PlayerChannel>(seat: &mut Seat<C>, msg: ServerMessage) {
    let res = match seat.channel.send_message(msg).await {
        Ok(()) => seat.channel.receive_ack().await,
        Err(e) => Err(e),
    };

    if let Err(e) = res {
        warn!("Player {} {msg:?} not delivered: {e}", seat.player_id);
    }
}

/// Asks a player for a bet, any failure is a zero bet.
async fn request_bet<C: PlayerChannel>(seat: &mut Seat<C>) -> Chips {
    let res = match seat.channel.send_message(ServerMessage::EnterBet).await {
        Ok(()) => seat.channel.receive_int().await,
        Err(e) => Err(e),
    };

    match res {
        Ok(bet) => bet,
        Err(ChannelError::MalformedBet(e)) => {
            warn!("Player {} {e}, counted as 0", seat.player_id);
            Chips::ZERO
        }
        Err(e) => {
            warn!("Player {} bet failed: {e}", seat.player_id);
            Chips::ZERO
        }
    }
}

/// Asks a player to continue, any failure is a fold.
async fn ask_continue<C: PlayerChannel>(seat: &mut Seat<C>) -> bool {
    let res = match seat.channel.send_message(ServerMessage::Continue).await {
        Ok(()) => seat.channel.receive_char().await,
        Err(e) => Err(e),
    };

    match res {
        Ok(answer) => parse_continue(answer),
        Err(e) => {
            warn!("Player {} continue failed: {e}", seat.player_id);
            false
        }
    }
}
