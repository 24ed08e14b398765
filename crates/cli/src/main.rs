// Copyright (C) 2025 Vince Vasta
// SPDX-License-Identifier: Apache-2.0

//! Fourflush CLI client.
#![warn(clippy::all, rust_2018_idioms, missing_docs)]
use anyhow::Result;
use clap::Parser;

use fourflush_core::{connection::TextConnection, game_state::GameState};

pub mod terminal;

#[derive(Debug, Parser)]
struct Cli {
    /// The server listening address.
    #[clap(long, short, default_value = "127.0.0.1")]
    address: String,
    /// The server listening port.
    #[clap(long, short, default_value_t = 8080)]
    port: u16,
    /// The starting balance, it should match the server one.
    #[clap(long, short, default_value_t = GameState::START_BALANCE)]
    balance: i64,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let addr = format!("{}:{}", cli.address, cli.port);
    let conn = TextConnection::connect(&addr).await?;
    println!("Connected to the dealer at {addr}");

    terminal::run(conn, GameState::new(cli.balance)).await
}
