// Copyright (C) 2025 Vince Vasta
// SPDX-License-Identifier: Apache-2.0

//! Terminal I/O.
use anyhow::{Result, bail};
use std::io::{self, Write};
use tokio::io::{AsyncBufRead, AsyncBufReadExt, BufReader, Lines};

use fourflush_core::{
    connection::TextConnection,
    game_state::{GameState, Reply},
    message::{ClientMessage, ServerMessage, parse_bet, parse_continue},
    poker::{Chips, evaluate},
};

/// Runs the terminal loop reading the player input from stdin.
pub async fn run(conn: TextConnection, state: GameState) -> Result<()> {
    let input = BufReader::new(tokio::io::stdin()).lines();
    let mut terminal = Terminal {
        conn,
        state,
        input,
    };

    terminal.run().await
}

struct Terminal<R> {
    conn: TextConnection,
    state: GameState,
    input: Lines<R>,
}

impl<R: AsyncBufRead + Unpin> Terminal<R> {
    async fn run(&mut self) -> Result<()> {
        loop {
            let msg = match self.conn.recv_message().await {
                Ok(msg) => msg,
                Err(e) => {
                    println!("\nDisconnected from the dealer: {e}");
                    return Ok(());
                }
            };

            print!("{}", msg.to_wire());
            io::stdout().flush()?;

            let reply = match self.state.handle_message(&msg) {
                Reply::Ack => {
                    self.show(&msg);
                    ClientMessage::Ack
                }
                Reply::Bet => {
                    let bet = self.read_bet().await?;
                    self.state.place_bet(bet);
                    ClientMessage::Bet(bet)
                }
                Reply::Continue => ClientMessage::Continue(self.read_answer().await?),
            };

            self.conn.send_text(&reply.to_wire()).await?;

            if reply == ClientMessage::Continue(false) {
                println!("Thanks for playing, final balance: {}", self.state.balance());
                self.conn.close().await;
                return Ok(());
            }
        }
    }

    /// Prints what the player should know after a message.
    fn show(&self, msg: &ServerMessage) {
        match msg {
            ServerMessage::RoundStarting => {
                println!("Your balance is: {}", self.state.balance());
            }
            ServerMessage::Card(_) if self.state.hole_card().is_some() => {
                if let Some(hand) = self.state.hand() {
                    println!("You have: {}", evaluate(&hand));
                }
            }
            ServerMessage::Won(_)
            | ServerMessage::Tie(_)
            | ServerMessage::Lost
            | ServerMessage::NoBets
            | ServerMessage::NoWinner => {
                println!("Your balance is: {}", self.state.balance());
            }
            _ => {}
        }
    }

    async fn read_bet(&mut self) -> Result<Chips> {
        loop {
            let line = self.read_line().await?;
            match parse_bet(&line) {
                Ok(bet) => return Ok(bet),
                Err(_) => {
                    print!("Invalid bet, enter a non negative number: ");
                    io::stdout().flush()?;
                }
            }
        }
    }

    async fn read_answer(&mut self) -> Result<bool> {
        loop {
            let line = self.read_line().await?;
            if let Some(answer) = line.trim().chars().next() {
                return Ok(parse_continue(answer));
            }
        }
    }

    async fn read_line(&mut self) -> Result<String> {
        match self.input.next_line().await? {
            Some(line) => Ok(line),
            None => bail!("Input closed"),
        }
    }
}
