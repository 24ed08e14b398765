// Copyright (C) 2025 Vince Vasta
// SPDX-License-Identifier: Apache-2.0

//! Fourflush Bot.
//!
//! Runs automated players against a dealer server, each player uses a
//! [Strategy] to decide its bets and when to leave the table.
#![warn(clippy::all, rust_2018_idioms, missing_docs)]
use anyhow::Result;
use futures_util::future;
use log::{error, info};
use tokio::{
    signal,
    sync::{broadcast, mpsc},
    time::Duration,
};

mod client;
pub use client::{RandomBets, Strategy};

pub use fourflush_core as core;

/// Bot clients configuration.
#[derive(Debug)]
pub struct Config {
    /// Number of clients to run.
    pub clients: u8,
    /// The server listening address.
    pub host: String,
    /// The server listening port.
    pub port: u16,
    /// Maximum time a client waits before betting.
    pub think_time: Duration,
}

static NICKNAMES: &[&str] = &["Alice", "Bob", "Carol", "Dave", "Frank", "Mike"];

/// Runs clients given a config and a strategy factory called for each client.
///
/// Returns when all clients have left the table or on Ctrl-C.
pub async fn run<F, S>(config: Config, factory: F) -> Result<()>
where
    F: Fn() -> S,
    S: Strategy,
{
    env_logger::builder()
        .filter_level(log::LevelFilter::Info)
        .format_target(false)
        .format_timestamp_millis()
        .init();

    let (shutdown_broadcast_tx, _) = broadcast::channel(1);
    let (shutdown_complete_tx, mut shutdown_complete_rx) = mpsc::channel(1);

    let addr = format!("{}:{}", config.host, config.port);
    let mut handles = Vec::with_capacity(config.clients as usize);

    for idx in 0..config.clients {
        let mut client = client::Client::new(
            factory(),
            NICKNAMES[idx as usize % NICKNAMES.len()].to_string(),
            &addr,
            config.think_time,
            shutdown_broadcast_tx.subscribe(),
            shutdown_complete_tx.clone(),
        )
        .await?;

        handles.push(tokio::spawn(async move {
            if let Err(err) = client.run().await {
                error!("Client {idx} error: {err}");
            }

            info!("Client {idx} connection closed");
        }));
    }

    tokio::select! {
        _ = future::join_all(handles) => {
            info!("All clients left the table");
        }
        _ = signal::ctrl_c() => {
            info!("Received Ctrl-c signal");
        }
    }

    // Signal clients to shutdown and wait for tasks to complete.
    drop(shutdown_broadcast_tx);
    drop(shutdown_complete_tx);
    let _ = shutdown_complete_rx.recv().await;

    Ok(())
}
