// Copyright (C) 2025 Vince Vasta
// SPDX-License-Identifier: Apache-2.0

//! A simple example bot strategy that bets on the hand strength.
#![warn(clippy::all, rust_2018_idioms, missing_docs)]
use anyhow::Result;
use clap::Parser;
use std::time::Duration;

use fourflush_bot::{
    Strategy,
    core::{
        game_state::GameState,
        poker::{Chips, HandCategory, evaluate},
    },
};

struct HandStrength {
    rounds: u32,
}

impl Strategy for HandStrength {
    fn bet(&mut self, state: &GameState) -> Chips {
        // Some randomness.
        let p = rand::random::<f64>();

        let Some(hand) = state.hand() else {
            return Chips::ZERO;
        };

        match evaluate(&hand) {
            HandCategory::HighCard if p < 0.5 => Chips::ZERO,
            HandCategory::HighCard => Chips::new(5),
            HandCategory::Pair | HandCategory::TwoPair => Chips::new(25),
            _ => Chips::new(100),
        }
    }

    fn play_again(&mut self, state: &GameState) -> bool {
        // Stop early when losing.
        state.rounds() < self.rounds && state.balance() > 500
    }
}

#[derive(Debug, Parser)]
#[command(disable_help_flag = true)]
struct Cli {
    /// Number of clients to run.
    #[clap(long, short, value_parser = clap::value_parser!(u8).range(1..=5))]
    clients: u8,
    /// The server address.
    #[clap(long, short, default_value = "127.0.0.1")]
    host: String,
    /// The server port.
    #[clap(long, short, default_value_t = 8080)]
    port: u16,
    /// Number of rounds each client plays.
    #[clap(long, short, default_value_t = 10)]
    rounds: u32,
    /// Help long flag.
    #[clap(long, action = clap::ArgAction::HelpLong)]
    help: Option<bool>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = fourflush_bot::Config {
        clients: cli.clients,
        host: cli.host,
        port: cli.port,
        think_time: Duration::from_millis(500),
    };

    fourflush_bot::run(config, || HandStrength { rounds: cli.rounds }).await
}
