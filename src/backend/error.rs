// Copyright (c) 2025 Ronan LE MEILLAT, SCTG Development
// This file is part of the nego-dashboard project and is licensed under the
// SCTG Development Non-Commercial License v1.0 (see LICENSE.md for details).

use crate::progression::TierTableError;

/// Failures talking to the external backend
#[derive(Debug, thiserror::Error)]
pub enum BackendError {
    /// Connection, timeout or body decoding failure
    #[error("backend request failed: {0}")]
    Transport(#[from] reqwest::Error),
    /// The backend answered with a non-success status
    #[error("backend returned status {status}: {message}")]
    Status { status: u16, message: String },
    /// A success envelope without its `data` member
    #[error("backend response for {0} carried no data")]
    MissingData(String),
    /// The tier table sent by the backend is unusable
    #[error("invalid rewards configuration: {0}")]
    Rewards(#[from] TierTableError),
}
