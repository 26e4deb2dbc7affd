// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Unified error types for Bonwerk.

use thiserror::Error;

use crate::types::MonitorStatus;

/// Top-level error type for all Bonwerk operations.
///
/// Every error surfaces to the caller as the resolution of the operation that
/// produced it — nothing is swallowed internally, and nothing retries
/// automatically. A discovery run that completes without a done-event is
/// *empty success*, not an error, so it has no variant here.
#[derive(Debug, Error)]
pub enum BonwerkError {
    // -- Discovery --
    /// Platform access permissions (Bluetooth/location) were not granted.
    #[error("discovery permissions not granted")]
    PermissionDenied,

    // -- Registry --
    #[error("unknown printer series: {0}")]
    UnknownSeries(String),

    // -- Correlated requests --
    /// The native trigger call itself failed (device unreachable, transport
    /// not available) before any terminal event could arrive.
    #[error("transport rejected the request: {0}")]
    TransportRejected(String),

    /// A failure event was delivered for the matching request. Carries the
    /// printer status reported alongside the failure.
    #[error("printer reported operation failure")]
    OperationFailed(MonitorStatus),

    /// No terminal event arrived within the caller-supplied window.
    #[error("timed out waiting for printer response")]
    Timeout,

    // -- Platform bridge --
    #[error("platform bridge error: {0}")]
    Bridge(String),

    #[error("feature not available on this platform")]
    PlatformUnavailable,

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Alias used throughout the codebase.
pub type Result<T> = std::result::Result<T, BonwerkError>;
