// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Typed publish/subscribe multiplexer over the native event stream.
//
// One `EventChannel` carries every event the platform side delivers for one
// printer session: one-shot request outcomes and the repeating monitor
// stream share it. Components register transient or standing listeners here
// instead of touching ambient emitter singletons.

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, Weak};

use tracing::trace;
use uuid::Uuid;

use bonwerk_core::types::{MonitorStatus, PrinterDescriptor};

/// An event delivered by the native printer SDK, with its validated payload.
#[derive(Debug, Clone, PartialEq)]
pub enum PrinterEvent {
    /// A discovery scan finished; carries everything it found.
    DiscoveryDone(Vec<PrinterDescriptor>),
    PrintSuccess(MonitorStatus),
    PrintFailure(MonitorStatus),
    /// Physical paper width reading in millimetres.
    PaperWidthSuccess(u32),
    PaperWidthFailure(MonitorStatus),
    /// Repeating status snapshot from the monitor loop.
    MonitorStatusUpdate(MonitorStatus),
}

impl PrinterEvent {
    pub fn kind(&self) -> EventKind {
        match self {
            Self::DiscoveryDone(_) => EventKind::DiscoveryDone,
            Self::PrintSuccess(_) => EventKind::PrintSuccess,
            Self::PrintFailure(_) => EventKind::PrintFailure,
            Self::PaperWidthSuccess(_) => EventKind::PaperWidthSuccess,
            Self::PaperWidthFailure(_) => EventKind::PaperWidthFailure,
            Self::MonitorStatusUpdate(_) => EventKind::MonitorStatusUpdate,
        }
    }
}

/// Discriminant used as the subscription key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventKind {
    DiscoveryDone,
    PrintSuccess,
    PrintFailure,
    PaperWidthSuccess,
    PaperWidthFailure,
    MonitorStatusUpdate,
}

type Handler = Arc<dyn Fn(&PrinterEvent) + Send + Sync>;

struct Entry {
    id: Uuid,
    active: Arc<AtomicBool>,
    handler: Handler,
}

#[derive(Default)]
struct Inner {
    listeners: Mutex<HashMap<EventKind, Vec<Entry>>>,
}

/// Clonable handle to one shared listener table.
///
/// Listener add/remove interleaves arbitrarily with dispatch, including a
/// handler removing itself (or any other subscription) during its own
/// invocation: dispatch snapshots the entry list and releases the table lock
/// before running handlers, and each entry's active flag is checked right
/// before delivery.
#[derive(Clone, Default)]
pub struct EventChannel {
    inner: Arc<Inner>,
}

impl EventChannel {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a handler for one event kind. Never fails.
    ///
    /// The returned subscription detaches on [`Subscription::unsubscribe`]
    /// or on drop, whichever comes first.
    pub fn subscribe(
        &self,
        kind: EventKind,
        handler: impl Fn(&PrinterEvent) + Send + Sync + 'static,
    ) -> Subscription {
        let id = Uuid::new_v4();
        let active = Arc::new(AtomicBool::new(true));

        let mut listeners = self
            .inner
            .listeners
            .lock()
            .expect("listener table lock poisoned");
        listeners.entry(kind).or_default().push(Entry {
            id,
            active: Arc::clone(&active),
            handler: Arc::new(handler),
        });
        trace!(?kind, %id, "listener subscribed");

        Subscription {
            id,
            kind,
            active,
            channel: Arc::downgrade(&self.inner),
        }
    }

    /// Deliver an event to every active listener of its kind, in
    /// subscription order.
    ///
    /// Called by platform transports (and tests) when the native side fires.
    pub fn emit(&self, event: PrinterEvent) {
        let snapshot: Vec<(Arc<AtomicBool>, Handler)> = {
            let listeners = self
                .inner
                .listeners
                .lock()
                .expect("listener table lock poisoned");
            listeners
                .get(&event.kind())
                .map(|entries| {
                    entries
                        .iter()
                        .map(|e| (Arc::clone(&e.active), Arc::clone(&e.handler)))
                        .collect()
                })
                .unwrap_or_default()
        };

        trace!(kind = ?event.kind(), listeners = snapshot.len(), "dispatching event");
        for (active, handler) in snapshot {
            // A listener unsubscribed mid-dispatch must not fire.
            if active.load(Ordering::SeqCst) {
                handler(&event);
            }
        }
    }

    /// Number of live subscriptions for a kind. Used by lifecycle tests to
    /// prove no listener leaks.
    pub fn subscriber_count(&self, kind: EventKind) -> usize {
        self.inner
            .listeners
            .lock()
            .expect("listener table lock poisoned")
            .get(&kind)
            .map(|entries| {
                entries
                    .iter()
                    .filter(|e| e.active.load(Ordering::SeqCst))
                    .count()
            })
            .unwrap_or(0)
    }
}

/// Handle owning one listener registration.
///
/// `unsubscribe` is idempotent and safe to call from within the handler
/// itself. Dropping the handle unsubscribes too, so transient listeners
/// cannot leak on any exit path.
pub struct Subscription {
    id: Uuid,
    kind: EventKind,
    active: Arc<AtomicBool>,
    channel: Weak<Inner>,
}

impl Subscription {
    /// Remove this listener. Safe to call any number of times.
    pub fn unsubscribe(&self) {
        // First caller flips the flag; everyone else is a no-op.
        if !self.active.swap(false, Ordering::SeqCst) {
            return;
        }
        if let Some(inner) = self.channel.upgrade() {
            let mut listeners = inner
                .listeners
                .lock()
                .expect("listener table lock poisoned");
            if let Some(entries) = listeners.get_mut(&self.kind) {
                entries.retain(|e| e.id != self.id);
            }
            trace!(kind = ?self.kind, id = %self.id, "listener unsubscribed");
        }
    }

    /// Whether this subscription is still registered.
    pub fn is_active(&self) -> bool {
        self.active.load(Ordering::SeqCst)
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        self.unsubscribe();
    }
}
