// Copyright (C) 2025 Vince Vasta
// SPDX-License-Identifier: Apache-2.0

//! Fourflush Poker core types shared by client and server.
#![warn(clippy::all, rust_2018_idioms, missing_docs)]

#[cfg(feature = "connection")]
pub mod connection;
pub mod game_state;
pub mod message;
pub mod poker;
