// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// One-shot request/event correlation.
//
// The native SDK acknowledges a trigger call and reports the actual outcome
// later through an unsolicited event. `CorrelatedRequest` packages the whole
// exchange — subscribe, trigger, wait for the first terminal signal — into a
// single future with listener cleanup on every exit path.
//
// The native event stream carries no request identifier, so two in-flight
// requests of the same kind would race for the same events. Callers must
// serialize same-kind operations; requests of *different* kinds may overlap
// freely, as may the monitor stream.

use std::future::Future;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use tokio::sync::oneshot;
use tracing::{debug, warn};

use bonwerk_core::error::{BonwerkError, Result};

use crate::channel::{EventChannel, EventKind, PrinterEvent};

/// A settled terminal signal: the success event or the failure error.
type Settled = Result<PrinterEvent>;

/// Exactly-once completion slot shared by the two transient listeners.
/// Whoever takes the sender first wins; everyone after is a no-op.
type Slot = Arc<Mutex<Option<oneshot::Sender<Settled>>>>;

/// One correlated request: trigger an external operation, resolve on the
/// first matching success event, reject on the first matching failure event
/// or on trigger rejection.
pub struct CorrelatedRequest<'c> {
    channel: &'c EventChannel,
    success: EventKind,
    failure: EventKind,
}

impl<'c> CorrelatedRequest<'c> {
    pub fn new(channel: &'c EventChannel, success: EventKind, failure: EventKind) -> Self {
        Self {
            channel,
            success,
            failure,
        }
    }

    /// Run the exchange.
    ///
    /// Both listeners are registered *before* the trigger is polled, so an
    /// outcome that fires while the native call is still in flight cannot be
    /// missed. Exactly one of four things settles the result:
    ///
    /// - the success event → `Ok` with its payload;
    /// - the failure event → `Err(OperationFailed)` with its status;
    /// - the trigger itself rejecting → that error (unless a terminal event
    ///   already landed, in which case the event won);
    /// - `timeout` elapsing → `Err(Timeout)`.
    ///
    /// Listeners are dropped (hence unsubscribed) on every path; a terminal
    /// event arriving after settlement has no observable effect.
    pub async fn run<Fut>(self, trigger: Fut, timeout: Option<Duration>) -> Settled
    where
        Fut: Future<Output = Result<()>>,
    {
        let (tx, rx) = oneshot::channel();
        let slot: Slot = Arc::new(Mutex::new(Some(tx)));

        let on_success = {
            let slot = Arc::clone(&slot);
            move |event: &PrinterEvent| {
                if let Some(tx) = take_slot(&slot) {
                    let _ = tx.send(Ok(event.clone()));
                }
            }
        };
        let on_failure = {
            let slot = Arc::clone(&slot);
            move |event: &PrinterEvent| {
                let status = match event {
                    PrinterEvent::PrintFailure(s) | PrinterEvent::PaperWidthFailure(s) => s.clone(),
                    // A non-failure payload on the failure kind cannot settle
                    // the request; leave the slot for a real terminal signal.
                    other => {
                        warn!(kind = ?other.kind(), "ignoring malformed failure event");
                        return;
                    }
                };
                if let Some(tx) = take_slot(&slot) {
                    let _ = tx.send(Err(BonwerkError::OperationFailed(status)));
                }
            }
        };

        // Subscriptions are plain RAII guards: leaving this function by any
        // path drops them, which unsubscribes.
        let _success_sub = self.channel.subscribe(self.success, on_success);
        let _failure_sub = self.channel.subscribe(self.failure, on_failure);

        let exchange = Self::exchange(trigger, rx);
        match timeout {
            Some(window) => match tokio::time::timeout(window, exchange).await {
                Ok(settled) => settled,
                Err(_) => {
                    debug!(success = ?self.success, ?window, "correlated request timed out");
                    Err(BonwerkError::Timeout)
                }
            },
            None => exchange.await,
        }
    }

    /// Race the trigger against the settlement slot.
    async fn exchange<Fut>(trigger: Fut, mut rx: oneshot::Receiver<Settled>) -> Settled
    where
        Fut: Future<Output = Result<()>>,
    {
        tokio::pin!(trigger);
        tokio::select! {
            // Poll the slot first so an event that fired during the trigger
            // call wins over the trigger's own resolution.
            biased;
            settled = &mut rx => resolve(settled),
            triggered = &mut trigger => match triggered {
                // Trigger accepted; the outcome is whatever event lands next.
                Ok(()) => resolve(rx.await),
                Err(trigger_err) => {
                    // First-wins: a terminal event may have settled the slot
                    // in the instant the trigger was failing.
                    match rx.try_recv() {
                        Ok(settled) => settled,
                        Err(_) => {
                            debug!(error = %trigger_err, "trigger rejected before any terminal event");
                            Err(trigger_err)
                        }
                    }
                }
            }
        }
    }
}

fn take_slot(slot: &Slot) -> Option<oneshot::Sender<Settled>> {
    slot.lock().expect("completion slot lock poisoned").take()
}

/// Map a closed slot (both listeners gone without settling) onto `Timeout`.
/// In practice the receiver only errors if the request future is dropped
/// mid-flight, so this branch is unreachable from `run`'s own await.
fn resolve(settled: std::result::Result<Settled, oneshot::error::RecvError>) -> Settled {
    match settled {
        Ok(outcome) => outcome,
        Err(_) => Err(BonwerkError::Timeout),
    }
}
