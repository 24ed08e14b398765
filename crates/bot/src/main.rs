// Copyright (C) 2025 Vince Vasta
// SPDX-License-Identifier: Apache-2.0

//! Fourflush Bot.
#![warn(clippy::all, rust_2018_idioms, missing_docs)]
use anyhow::Result;
use clap::Parser;
use std::time::Duration;

use fourflush_bot::RandomBets;

#[derive(Debug, Parser)]
struct Cli {
    /// Number of clients to run.
    #[clap(long, short, default_value_t = 2, value_parser = clap::value_parser!(u8).range(1..=6))]
    clients: u8,
    /// The server address.
    #[clap(long, default_value = "127.0.0.1")]
    host: String,
    /// The server port.
    #[clap(long, short, default_value_t = 8080)]
    port: u16,
    /// Number of rounds each client plays.
    #[clap(long, short, default_value_t = 5)]
    rounds: u32,
    /// The maximum bet.
    #[clap(long, short, default_value_t = 100)]
    max_bet: u32,
    /// Maximum think time in milliseconds.
    #[clap(long, default_value_t = 1_000)]
    think_ms: u64,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = fourflush_bot::Config {
        clients: cli.clients,
        host: cli.host,
        port: cli.port,
        think_time: Duration::from_millis(cli.think_ms),
    };

    fourflush_bot::run(config, || RandomBets::new(cli.max_bet, cli.rounds)).await
}
