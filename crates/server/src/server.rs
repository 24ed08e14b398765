// Copyright (C) 2025 Vince Vasta
// SPDX-License-Identifier: Apache-2.0

//! Fourflush Poker dealer server entry point.
use anyhow::{Result, anyhow, bail};
use log::{error, info};
use std::{future::Future, net::SocketAddr};
use tokio::{
    net::{TcpListener, TcpStream},
    signal,
    sync::{broadcast, mpsc},
    time::{self, Duration},
};

use fourflush_core::connection::TextConnection;

use crate::table::{RemotePlayer, SessionConfig, TableSession};

/// Server config.
#[derive(Debug)]
pub struct Config {
    /// The server listening address.
    pub address: String,
    /// The server listening port.
    pub port: u16,
    /// The number of players needed to start a round.
    pub min_players: usize,
    /// How long the table waits for players before logging and retrying.
    pub join_wait: Duration,
    /// The balance each player starts with.
    pub start_balance: i64,
    /// The deck shuffle seed.
    pub seed: Option<u64>,
}

impl Config {
    fn session_config(&self) -> SessionConfig {
        SessionConfig {
            min_players: self.min_players,
            join_wait: self.join_wait,
            start_balance: self.start_balance,
            seed: self.seed,
        }
    }
}

/// The server that accepts players and hands them to the table.
#[derive(Debug)]
struct Server {
    /// The server listener.
    listener: TcpListener,
    /// Channel for sending new players to the table session.
    join_tx: mpsc::Sender<RemotePlayer>,
    /// Shutdown notification channel.
    shutdown_broadcast_tx: broadcast::Sender<()>,
    /// Shutdown sender cloned by each connection.
    shutdown_complete_tx: mpsc::Sender<()>,
}

/// Server entry point.
pub async fn run(config: Config) -> Result<()> {
    let addr = format!("{}:{}", config.address, config.port);

    let listener = TcpListener::bind(&addr)
        .await
        .map_err(|e| anyhow!("Tcp listener bind error: {e}"))?;

    info!("Dealer server running on {addr}...");

    serve(listener, config.session_config(), signal::ctrl_c()).await
}

/// Runs the server and the table session until shutdown.
///
/// Returns an error if the session ended because the deck ran out of cards.
async fn serve<F>(listener: TcpListener, config: SessionConfig, shutdown_signal: F) -> Result<()>
where
    F: Future,
{
    let (shutdown_broadcast_tx, _) = broadcast::channel(1);
    let (shutdown_complete_tx, mut shutdown_complete_rx) = mpsc::channel(1);
    let (join_tx, join_rx) = mpsc::channel(64);

    let session = TableSession::new(config, join_rx);

    let mut server = Server {
        listener,
        join_tx,
        shutdown_broadcast_tx,
        shutdown_complete_tx,
    };

    let res = tokio::select! {
        res = server.run() => {
            res.map_err(|e| anyhow!("Tcp listener accept error: {e}"))
        }
        res = session.run() => match res {
            Ok(summary) => {
                info!("Table session ended after {} rounds", summary.rounds);
                Ok(())
            }
            Err(e) => Err(anyhow!("Table session error: {e}")),
        },
        _ = shutdown_signal => {
            info!("Received shutdown signal...");
            Ok(())
        }
    };

    // Wait for all connection to shutdown.
    let Server {
        join_tx,
        shutdown_broadcast_tx,
        shutdown_complete_tx,
        ..
    } = server;

    // Notify all connections to start shutdown then wait for all connections to
    // terminate and drop their shutdown channel.
    drop(join_tx);
    drop(shutdown_broadcast_tx);
    drop(shutdown_complete_tx);
    let _ = shutdown_complete_rx.recv().await;

    res
}

impl Server {
    /// Runs the server.
    async fn run(&mut self) -> Result<()> {
        loop {
            let (socket, addr) = self.accept_with_retry().await?;
            info!("New connection from {addr}");

            // Spawn a task that owns the connection.
            let player = RemotePlayer::spawn(
                TextConnection::new(socket),
                addr,
                self.shutdown_broadcast_tx.subscribe(),
                self.shutdown_complete_tx.clone(),
            );

            if self.join_tx.send(player).await.is_err() {
                error!("Table session is gone, dropping {addr}");
                bail!("Table session closed");
            }
        }
    }

    /// Accepts a connection with retries.
    async fn accept_with_retry(&self) -> Result<(TcpStream, SocketAddr)> {
        let mut retry = 0;
        loop {
            match self.listener.accept().await {
                Ok((socket, addr)) => {
                    return Ok((socket, addr));
                }
                Err(err) => {
                    if retry == 5 {
                        return Err(err.into());
                    }
                }
            }

            time::sleep(Duration::from_secs(1 << retry)).await;
            retry += 1;
        }
    }
}
