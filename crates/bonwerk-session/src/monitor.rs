// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Long-lived printer status monitoring.
//
// Distinct lifecycle from the one-shot correlated requests: the monitor
// stream fires unbounded repeats on its own event kind and coexists with any
// number of in-flight one-shot calls on the same channel.

use tracing::{debug, instrument};

use bonwerk_bridge::PrinterTransport;
use bonwerk_core::error::Result;
use bonwerk_core::types::MonitorStatus;

use crate::channel::{EventChannel, EventKind, PrinterEvent, Subscription};

/// Tightest polling interval the printer is ever asked for, in seconds.
pub const MONITOR_INTERVAL_FLOOR_SECS: u32 = 5;

/// Controls the status-poll loop and its standing listeners.
///
/// Starting the loop and registering listeners are independent: listeners may
/// attach before or after `start`, and the loop may run with none (updates
/// are simply undelivered).
pub struct MonitorSession<'a, T> {
    channel: &'a EventChannel,
    transport: &'a T,
}

impl<'a, T: PrinterTransport> MonitorSession<'a, T> {
    pub fn new(channel: &'a EventChannel, transport: &'a T) -> Self {
        Self { channel, transport }
    }

    /// Start periodic polling. The interval is floored at
    /// [`MONITOR_INTERVAL_FLOOR_SECS`] before the transport sees it.
    #[instrument(skip(self))]
    pub async fn start(&self, interval_secs: u32) -> Result<()> {
        let clamped = interval_secs.max(MONITOR_INTERVAL_FLOOR_SECS);
        if clamped != interval_secs {
            debug!(requested = interval_secs, clamped, "monitor interval floored");
        }
        self.transport.start_monitor(clamped).await
    }

    /// Stop periodic polling. Standing listeners stay registered and simply
    /// see no further updates.
    #[instrument(skip(self))]
    pub async fn stop(&self) -> Result<()> {
        self.transport.stop_monitor().await
    }

    /// Register a standing handler invoked on every status update.
    ///
    /// Detaching (via [`Subscription::unsubscribe`] or drop) is idempotent
    /// and removes only this handler; other listeners and the poll loop
    /// itself are untouched.
    pub fn add_status_listener(
        &self,
        listener: impl Fn(&MonitorStatus) + Send + Sync + 'static,
    ) -> Subscription {
        self.channel
            .subscribe(EventKind::MonitorStatusUpdate, move |event| {
                if let PrinterEvent::MonitorStatusUpdate(status) = event {
                    listener(status);
                }
            })
    }
}
