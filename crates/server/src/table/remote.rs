// Copyright (C) 2025 Vince Vasta
// SPDX-License-Identifier: Apache-2.0

//! A player connected over TCP.
use anyhow::{Result, anyhow};
use log::{error, info};
use std::net::SocketAddr;
use tokio::sync::{broadcast, mpsc, oneshot};

use fourflush_core::{connection::TextConnection, message::parse_bet, poker::Chips};

use super::channel::{ChannelError, PlayerChannel};

/// A remote player handle, the connection is owned by a player task.
#[derive(Debug)]
pub struct RemotePlayer {
    /// Channel for sending commands.
    commands_tx: mpsc::Sender<PlayerCommand>,
}

/// Command for the player task.
#[derive(Debug)]
enum PlayerCommand {
    /// Send text to the player.
    Send {
        text: String,
        resp_tx: oneshot::Sender<Result<()>>,
    },
    /// Read a line from the player.
    RecvLine {
        resp_tx: oneshot::Sender<Result<String>>,
    },
    /// Read a single character from the player.
    RecvChar {
        resp_tx: oneshot::Sender<Result<char>>,
    },
    /// Close the connection.
    Close,
}

impl RemotePlayer {
    /// Spawns a task that owns the player connection.
    pub fn spawn(
        conn: TextConnection,
        addr: SocketAddr,
        shutdown_broadcast_rx: broadcast::Receiver<()>,
        shutdown_complete_tx: mpsc::Sender<()>,
    ) -> Self {
        let (commands_tx, commands_rx) = mpsc::channel(8);

        let mut task = PlayerTask {
            addr,
            conn,
            commands_rx,
            shutdown_broadcast_rx,
            _shutdown_complete_tx: shutdown_complete_tx,
        };

        tokio::spawn(async move {
            task.run().await;
            task.conn.close().await;
            info!("Connection from {} closed", task.addr);
        });

        Self { commands_tx }
    }

    async fn request<T>(
        &self,
        make: impl FnOnce(oneshot::Sender<Result<T>>) -> PlayerCommand,
    ) -> Result<T, ChannelError> {
        let (resp_tx, resp_rx) = oneshot::channel();

        self.commands_tx
            .send(make(resp_tx))
            .await
            .map_err(|_| ChannelError::Disconnected)?;

        resp_rx
            .await
            .map_err(|_| ChannelError::Disconnected)?
            .map_err(|e| ChannelError::Io(e.to_string()))
    }
}

impl PlayerChannel for RemotePlayer {
    async fn send_text(&mut self, text: &str) -> Result<(), ChannelError> {
        let text = text.to_string();
        self.request(|resp_tx| PlayerCommand::Send { text, resp_tx })
            .await
    }

    async fn receive_ack(&mut self) -> Result<(), ChannelError> {
        // Any non empty line acknowledges.
        self.request(|resp_tx| PlayerCommand::RecvLine { resp_tx })
            .await
            .map(|_| ())
    }

    async fn receive_int(&mut self) -> Result<Chips, ChannelError> {
        let line = self
            .request(|resp_tx| PlayerCommand::RecvLine { resp_tx })
            .await?;
        Ok(parse_bet(&line)?)
    }

    async fn receive_char(&mut self) -> Result<char, ChannelError> {
        self.request(|resp_tx| PlayerCommand::RecvChar { resp_tx })
            .await
    }

    async fn close(&mut self) {
        let _ = self.commands_tx.send(PlayerCommand::Close).await;
    }
}

struct PlayerTask {
    /// The player address.
    addr: SocketAddr,
    /// The player connection.
    conn: TextConnection,
    /// Channel for receiving commands.
    commands_rx: mpsc::Receiver<PlayerCommand>,
    /// Channel for listening shutdown notification.
    shutdown_broadcast_rx: broadcast::Receiver<()>,
    /// Sender that drops when this connection is done.
    _shutdown_complete_tx: mpsc::Sender<()>,
}

impl PlayerTask {
    async fn run(&mut self) {
        loop {
            let cmd = tokio::select! {
                // Server is shutting down exit this handler.
                _ = self.shutdown_broadcast_rx.recv() => return,
                res = self.commands_rx.recv() => match res {
                    Some(PlayerCommand::Close) | None => return,
                    Some(cmd) => cmd,
                },
            };

            // A read may block on a silent player so it must also race shutdown.
            tokio::select! {
                _ = self.shutdown_broadcast_rx.recv() => return,
                res = execute(&mut self.conn, cmd) => {
                    if let Err(e) = res {
                        error!("Connection {} error {e}", self.addr);
                        return;
                    }
                }
            }
        }
    }
}

/// Executes a command, returns an error if the connection failed.
async fn execute(conn: &mut TextConnection, cmd: PlayerCommand) -> Result<()> {
    match cmd {
        PlayerCommand::Send { text, resp_tx } => {
            let res = conn.send_text(&text).await;
            forward(res, resp_tx)
        }
        PlayerCommand::RecvLine { resp_tx } => {
            let res = conn.recv_line().await;
            forward(res, resp_tx)
        }
        PlayerCommand::RecvChar { resp_tx } => {
            let res = conn.recv_char().await;
            forward(res, resp_tx)
        }
        PlayerCommand::Close => Ok(()),
    }
}

/// Replies to the requester and returns the connection error if any.
fn forward<T>(res: Result<T>, resp_tx: oneshot::Sender<Result<T>>) -> Result<()> {
    match res {
        Ok(v) => {
            let _ = resp_tx.send(Ok(v));
            Ok(())
        }
        Err(e) => {
            let msg = e.to_string();
            let _ = resp_tx.send(Err(e));
            Err(anyhow!(msg))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use fourflush_core::{
        message::{ClientMessage, ServerMessage},
        poker::{Card, Rank, Suit},
    };
    use tokio::net::{TcpListener, TcpStream};

    struct Conn {
        player: RemotePlayer,
        client: TextConnection,
        _shutdown_tx: broadcast::Sender<()>,
        complete_rx: mpsc::Receiver<()>,
    }

    async fn connect() -> Conn {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();

        let client = TcpStream::connect(addr).await.unwrap();
        let (stream, peer) = listener.accept().await.unwrap();

        let (shutdown_tx, shutdown_rx) = broadcast::channel(1);
        let (complete_tx, complete_rx) = mpsc::channel(1);

        let conn = TextConnection::new(stream);
        let player = RemotePlayer::spawn(conn, peer, shutdown_rx, complete_tx);

        Conn {
            player,
            client: TextConnection::new(client),
            _shutdown_tx: shutdown_tx,
            complete_rx,
        }
    }

    #[tokio::test]
    async fn remote_player_exchange() {
        let Conn {
            mut player,
            mut client,
            _shutdown_tx,
            ..
        } = connect().await;

        let card = Card::new(Rank::Ten, Suit::Spades);
        player.send_card(card).await.unwrap();
        assert_eq!(client.recv_message().await.unwrap(), ServerMessage::Card(card));
        client.send_text(&ClientMessage::Ack.to_wire()).await.unwrap();
        player.receive_ack().await.unwrap();

        player.send_message(ServerMessage::EnterBet).await.unwrap();
        assert_eq!(client.recv_message().await.unwrap(), ServerMessage::EnterBet);
        client.send_text("42\n").await.unwrap();
        assert_eq!(player.receive_int().await.unwrap(), Chips::new(42));

        player.send_message(ServerMessage::EnterBet).await.unwrap();
        client.recv_message().await.unwrap();
        client.send_text("-5\n").await.unwrap();
        assert!(matches!(
            player.receive_int().await,
            Err(ChannelError::MalformedBet(_))
        ));

        player.send_message(ServerMessage::Continue).await.unwrap();
        assert_eq!(client.recv_message().await.unwrap(), ServerMessage::Continue);
        client.send_text("y").await.unwrap();
        assert_eq!(player.receive_char().await.unwrap(), 'y');
    }

    #[tokio::test]
    async fn remote_player_disconnect() {
        let Conn {
            mut player,
            client,
            _shutdown_tx,
            mut complete_rx,
        } = connect().await;
        drop(client);

        // The read fails and the task exits.
        assert!(player.receive_ack().await.is_err());
        assert!(complete_rx.recv().await.is_none());

        assert_eq!(
            player.send_text("Round starting!\n").await,
            Err(ChannelError::Disconnected)
        );
    }

    #[tokio::test]
    async fn remote_player_close() {
        let Conn {
            mut player,
            mut client,
            _shutdown_tx,
            mut complete_rx,
        } = connect().await;

        player.close().await;
        assert!(complete_rx.recv().await.is_none());
        assert!(client.recv_line().await.is_err());
    }
}
