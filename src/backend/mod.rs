// Copyright (c) 2025 Ronan LE MEILLAT, SCTG Development
// This file is part of the nego-dashboard project and is licensed under the
// SCTG Development Non-Commercial License v1.0 (see LICENSE.md for details).

//! Client for the external backend owning balances, cards and battlepass data

pub mod client;
pub mod error;
pub mod models;

pub use client::BackendClient;
pub use error::BackendError;
pub use models::{Balance, BattlepassData, Card, ClaimAllResponse, ClaimRequest, Envelope, Season};
