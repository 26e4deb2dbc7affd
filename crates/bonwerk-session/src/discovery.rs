// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// One discovery scan, start to finish.
//
// The native SDK accumulates results itself and fires a single done-event
// carrying the full list; some SDK builds instead resolve the trigger call
// without ever firing the event, which counts as an empty scan. Whichever
// way the scan ends, the done-listener must not stay registered.

use std::sync::{Arc, Mutex};
use std::time::Duration;

use tokio::sync::oneshot;
use tracing::{info, instrument, warn};

use bonwerk_bridge::{DiscoverParams, PermissionGate, PrinterTransport};
use bonwerk_core::error::{BonwerkError, Result};
use bonwerk_core::types::PrinterDescriptor;

use crate::channel::{EventChannel, EventKind, PrinterEvent};

/// Runs exactly one discovery scan to completion.
///
/// Usage invariant: one active session per process. The native SDK cannot
/// tell two concurrent scans apart, so a second `run` before the first
/// resolves would race it for the same done-event. Not enforced here.
pub struct DiscoverySession<'a, T, P> {
    channel: &'a EventChannel,
    transport: &'a T,
    permissions: &'a P,
}

impl<'a, T, P> DiscoverySession<'a, T, P>
where
    T: PrinterTransport,
    P: PermissionGate,
{
    pub fn new(channel: &'a EventChannel, transport: &'a T, permissions: &'a P) -> Self {
        Self {
            channel,
            transport,
            permissions,
        }
    }

    /// Scan for printers and resolve with everything found.
    ///
    /// Fails with `PermissionDenied` — without touching the transport — when
    /// the platform gate declines. A scan whose trigger call completes before
    /// any done-event resolves empty; a timeout resolves empty too (the
    /// printers found so far only travel on the done-event).
    #[instrument(skip_all)]
    pub async fn run(
        &self,
        params: &DiscoverParams,
        timeout: Option<Duration>,
    ) -> Result<Vec<PrinterDescriptor>> {
        if !self.permissions.request_discovery_permissions().await? {
            return Err(BonwerkError::PermissionDenied);
        }

        let (tx, mut rx) = oneshot::channel();
        let slot = Arc::new(Mutex::new(Some(tx)));

        let on_done = {
            let slot = Arc::clone(&slot);
            move |event: &PrinterEvent| {
                if let PrinterEvent::DiscoveryDone(printers) = event {
                    if let Some(tx) = slot.lock().expect("discovery slot lock poisoned").take() {
                        let _ = tx.send(printers.clone());
                    }
                }
            }
        };
        // RAII: dropped on every exit path below.
        let _done_sub = self.channel.subscribe(EventKind::DiscoveryDone, on_done);

        let scan = async {
            let trigger = self.transport.discover(params);
            tokio::pin!(trigger);
            tokio::select! {
                biased;
                done = &mut rx => Ok(done.unwrap_or_default()),
                triggered = &mut trigger => match triggered {
                    // Trigger settled first: done-event already in flight wins,
                    // otherwise the scan produced nothing.
                    Ok(()) => Ok(rx.try_recv().unwrap_or_default()),
                    Err(err) => match rx.try_recv() {
                        Ok(printers) => Ok(printers),
                        Err(_) => Err(err),
                    },
                }
            }
        };

        let printers = match timeout {
            Some(window) => match tokio::time::timeout(window, scan).await {
                Ok(outcome) => outcome?,
                Err(_) => {
                    warn!(?window, "discovery timed out before a done-event");
                    Vec::new()
                }
            },
            None => scan.await?,
        };

        info!(found = printers.len(), "discovery finished");
        Ok(printers)
    }
}
