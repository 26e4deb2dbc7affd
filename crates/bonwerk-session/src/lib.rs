// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Bonwerk Session — the asynchronous protocol engine.
//
// Turns the stream of unordered events delivered by the native printer SDK
// into well-defined, cancellable request/response futures, and hosts the
// long-lived status monitor stream alongside them on the same channel.

pub mod channel;
pub mod correlate;
pub mod discovery;
pub mod monitor;
pub mod session;

#[cfg(test)]
pub(crate) mod mock;

pub use channel::{EventChannel, EventKind, PrinterEvent, Subscription};
pub use correlate::CorrelatedRequest;
pub use discovery::DiscoverySession;
pub use monitor::{MonitorSession, MONITOR_INTERVAL_FLOOR_SECS};
pub use session::PrinterSession;
