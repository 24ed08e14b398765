// Copyright (C) 2025 Vince Vasta
// SPDX-License-Identifier: Apache-2.0
use clap::Parser;
use fourflush_server::server;
use log::error;
use std::time::Duration;

#[derive(Debug, Parser)]
struct Cli {
    /// The server listening address.
    #[clap(long, short, default_value = "127.0.0.1")]
    address: String,
    /// The server listening port.
    #[clap(long, short, default_value_t = 8080)]
    port: u16,
    /// Number of players needed to start a round.
    #[clap(long, default_value_t = 2, value_parser = clap::value_parser!(u8).range(2..=10))]
    players: u8,
    /// Seconds to wait for players before retrying.
    #[clap(long, default_value_t = 5, value_parser = clap::value_parser!(u64).range(1..=60))]
    join_wait: u64,
    /// Each player starting balance.
    #[clap(long, short, default_value_t = 1_000)]
    balance: i64,
    /// Deck shuffle seed for reproducible games.
    #[clap(long)]
    seed: Option<u64>,
}

#[tokio::main]
async fn main() {
    env_logger::builder()
        .filter_level(log::LevelFilter::Info)
        .format_target(false)
        .format_timestamp_millis()
        .init();

    let cli = Cli::parse();
    let config = fourflush_server::Config {
        address: cli.address,
        port: cli.port,
        min_players: cli.players as usize,
        join_wait: Duration::from_secs(cli.join_wait),
        start_balance: cli.balance,
        seed: cli.seed,
    };

    if let Err(e) = server::run(config).await {
        error!("{e}");
    }
}
