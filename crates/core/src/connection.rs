// Copyright (C) 2025 Vince Vasta
// SPDX-License-Identifier: Apache-2.0

//! Buffered TCP text connection types.
use anyhow::{Result, anyhow, bail};
use std::io;
use tokio::{
    io::{AsyncReadExt, AsyncWriteExt, BufStream},
    net::TcpStream,
};

use crate::message::ServerMessage;

/// Maximum message length.
const MAX_MSG_LEN: usize = 1024;

/// A text connection used by both the server and the clients.
#[derive(Debug)]
pub struct TextConnection {
    stream: BufStream<TcpStream>,
}

impl TextConnection {
    /// Creates a new connection from a connected stream.
    pub fn new(stream: TcpStream) -> Self {
        Self {
            stream: BufStream::new(stream),
        }
    }

    /// Connects to a server.
    pub async fn connect(addr: &str) -> Result<Self> {
        let stream = TcpStream::connect(addr)
            .await
            .map_err(|e| anyhow!("Connect to {addr} error: {e}"))?;
        Ok(Self::new(stream))
    }

    /// Sends text as is.
    pub async fn send_text(&mut self, text: &str) -> Result<()> {
        self.stream.write_all(text.as_bytes()).await?;
        self.stream.flush().await?;
        Ok(())
    }

    /// Waits for the next non empty line, without the line terminator.
    pub async fn recv_line(&mut self) -> Result<String> {
        loop {
            let mut buf = Vec::new();
            loop {
                match self.read_byte().await? {
                    b'\n' => break,
                    b => buf.push(b),
                }

                if buf.len() > MAX_MSG_LEN {
                    bail!("Line too long");
                }
            }

            let line = String::from_utf8_lossy(&buf);
            let line = line.trim_end_matches('\r');
            if !line.trim().is_empty() {
                return Ok(line.to_string());
            }
        }
    }

    /// Waits for a single character skipping any leading whitespace.
    pub async fn recv_char(&mut self) -> Result<char> {
        loop {
            let b = self.read_byte().await?;
            if !b.is_ascii_whitespace() {
                return Ok(b as char);
            }
        }
    }

    /// Waits for a message from the server.
    ///
    /// A message ends with a newline or when the text read so far is one of
    /// the server prompts.
    pub async fn recv_message(&mut self) -> Result<ServerMessage> {
        let mut buf = Vec::new();
        loop {
            let b = self.read_byte().await?;
            buf.push(b);

            let is_prompt = ServerMessage::PROMPTS
                .iter()
                .any(|p| p.as_bytes() == buf.as_slice());
            if b == b'\n' || is_prompt {
                let text = String::from_utf8_lossy(&buf);
                return ServerMessage::parse(&text);
            }

            if buf.len() > MAX_MSG_LEN {
                bail!("Message too long");
            }
        }
    }

    /// Closes this connection.
    pub async fn close(&mut self) {
        let _ = self.stream.flush().await;
        let _ = self.stream.get_mut().shutdown().await;
    }

    async fn read_byte(&mut self) -> Result<u8> {
        match self.stream.read_u8().await {
            Ok(b) => Ok(b),
            Err(e) if e.kind() == io::ErrorKind::UnexpectedEof => bail!("Connection closed"),
            Err(e) => Err(anyhow!("Connection error: {e}")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        message::ClientMessage,
        poker::{Card, Chips, Rank, Suit},
    };
    use tokio::net::TcpListener;

    #[tokio::test]
    async fn text_connection() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap().to_string();

        let (tx, rx) = tokio::sync::oneshot::channel();

        tokio::spawn(async move {
            let (stream, _) = listener.accept().await.unwrap();
            let mut conn = TextConnection::new(stream);

            let card = Card::new(Rank::Queen, Suit::Hearts);
            conn.send_text(&ServerMessage::Card(card).to_wire())
                .await
                .unwrap();
            assert_eq!(conn.recv_line().await.unwrap(), "OK");

            conn.send_text(&ServerMessage::EnterBet.to_wire())
                .await
                .unwrap();
            assert_eq!(conn.recv_line().await.unwrap(), "25");

            conn.send_text(&ServerMessage::Continue.to_wire())
                .await
                .unwrap();
            assert_eq!(conn.recv_char().await.unwrap(), 'y');

            // A newline after the answer is skipped by the next read.
            assert_eq!(conn.recv_line().await.unwrap(), "OK");
            tx.send(()).unwrap();
        });

        let mut conn = TextConnection::connect(&addr).await.unwrap();

        let msg = conn.recv_message().await.unwrap();
        assert_eq!(
            msg,
            ServerMessage::Card(Card::new(Rank::Queen, Suit::Hearts))
        );
        conn.send_text(&ClientMessage::Ack.to_wire()).await.unwrap();

        // Prompts are not newline terminated.
        let msg = conn.recv_message().await.unwrap();
        assert_eq!(msg, ServerMessage::EnterBet);
        conn.send_text(&ClientMessage::Bet(Chips::new(25)).to_wire())
            .await
            .unwrap();

        let msg = conn.recv_message().await.unwrap();
        assert_eq!(msg, ServerMessage::Continue);
        conn.send_text("y\n\nOK\n").await.unwrap();

        rx.await.unwrap();
    }

    #[tokio::test]
    async fn closed_connection() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap().to_string();

        tokio::spawn(async move {
            let (stream, _) = listener.accept().await.unwrap();
            let mut conn = TextConnection::new(stream);
            conn.send_text("partial").await.unwrap();
            conn.close().await;
        });

        let mut conn = TextConnection::connect(&addr).await.unwrap();
        assert!(conn.recv_message().await.is_err());
        assert!(conn.recv_line().await.is_err());
    }
}
