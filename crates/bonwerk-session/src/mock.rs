// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Scripted transport double for session tests.
//
// Each trigger follows a per-operation script: accept silently, emit an
// event into the channel before accepting, hang, or reject. Calls are
// recorded so tests can assert what reached the native boundary.

use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Mutex;

use bonwerk_bridge::{DiscoverParams, PermissionGate, PrinterTransport, PAIRING_NOOP_MARKER};
use bonwerk_core::error::{BonwerkError, Result};
use bonwerk_core::types::SeriesCode;

use crate::channel::{EventChannel, PrinterEvent};

/// What a scripted trigger does when invoked.
#[derive(Clone)]
pub enum TriggerScript {
    /// Resolve the trigger; no event follows.
    Accept,
    /// Resolve the trigger after emitting the event (models an outcome that
    /// lands while the native call is still on the wire).
    EmitThenAccept(PrinterEvent),
    /// Never resolve; the outcome arrives purely by event (or not at all).
    AcceptAndHang,
    /// Fail the trigger call itself.
    Reject(String),
}

pub struct MockTransport {
    channel: EventChannel,
    init: TriggerScript,
    discover: TriggerScript,
    print: TriggerScript,
    paper_width: TriggerScript,
    init_calls: Mutex<Vec<(String, SeriesCode)>>,
    discover_count: AtomicUsize,
    printed_payloads: Mutex<Vec<String>>,
    monitor_intervals: Mutex<Vec<u32>>,
    monitor_stopped: AtomicBool,
    disconnected: AtomicBool,
}

impl MockTransport {
    pub fn new(channel: EventChannel) -> Self {
        Self {
            channel,
            init: TriggerScript::Accept,
            discover: TriggerScript::Accept,
            print: TriggerScript::Accept,
            paper_width: TriggerScript::Accept,
            init_calls: Mutex::new(Vec::new()),
            discover_count: AtomicUsize::new(0),
            printed_payloads: Mutex::new(Vec::new()),
            monitor_intervals: Mutex::new(Vec::new()),
            monitor_stopped: AtomicBool::new(false),
            disconnected: AtomicBool::new(false),
        }
    }

    pub fn init_script(mut self, script: TriggerScript) -> Self {
        self.init = script;
        self
    }

    pub fn discover_script(mut self, script: TriggerScript) -> Self {
        self.discover = script;
        self
    }

    pub fn print_script(mut self, script: TriggerScript) -> Self {
        self.print = script;
        self
    }

    pub fn paper_width_script(mut self, script: TriggerScript) -> Self {
        self.paper_width = script;
        self
    }

    pub fn init_calls(&self) -> Vec<(String, SeriesCode)> {
        self.init_calls.lock().unwrap().clone()
    }

    pub fn discover_calls(&self) -> usize {
        self.discover_count.load(Ordering::SeqCst)
    }

    pub fn printed_payloads(&self) -> Vec<String> {
        self.printed_payloads.lock().unwrap().clone()
    }

    pub fn monitor_intervals(&self) -> Vec<u32> {
        self.monitor_intervals.lock().unwrap().clone()
    }

    pub fn monitor_stopped(&self) -> bool {
        self.monitor_stopped.load(Ordering::SeqCst)
    }

    pub fn disconnected(&self) -> bool {
        self.disconnected.load(Ordering::SeqCst)
    }

    async fn play(&self, script: &TriggerScript) -> Result<()> {
        match script {
            TriggerScript::Accept => Ok(()),
            TriggerScript::EmitThenAccept(event) => {
                self.channel.emit(event.clone());
                Ok(())
            }
            TriggerScript::AcceptAndHang => std::future::pending().await,
            TriggerScript::Reject(reason) => Err(BonwerkError::TransportRejected(reason.clone())),
        }
    }
}

impl PrinterTransport for MockTransport {
    async fn init(&self, target: &str, series: SeriesCode) -> Result<()> {
        self.init_calls
            .lock()
            .unwrap()
            .push((target.to_string(), series));
        self.play(&self.init).await
    }

    async fn discover(&self, _params: &DiscoverParams) -> Result<()> {
        self.discover_count.fetch_add(1, Ordering::SeqCst);
        self.play(&self.discover).await
    }

    async fn print_base64(&self, payload: &str) -> Result<()> {
        self.printed_payloads.lock().unwrap().push(payload.to_string());
        self.play(&self.print).await
    }

    async fn get_paper_width(&self) -> Result<()> {
        self.play(&self.paper_width).await
    }

    async fn start_monitor(&self, interval_secs: u32) -> Result<()> {
        self.monitor_intervals.lock().unwrap().push(interval_secs);
        Ok(())
    }

    async fn stop_monitor(&self) -> Result<()> {
        self.monitor_stopped.store(true, Ordering::SeqCst);
        Ok(())
    }

    async fn pairing_bluetooth_printer(&self) -> Result<String> {
        Ok(PAIRING_NOOP_MARKER.to_string())
    }

    fn disconnect(&self) {
        self.disconnected.store(true, Ordering::SeqCst);
    }
}

/// Permission gate that always grants.
pub struct GrantingPermissions;

impl PermissionGate for GrantingPermissions {
    async fn request_discovery_permissions(&self) -> Result<bool> {
        Ok(true)
    }
}

/// Permission gate that always declines.
pub struct DenyingPermissions;

impl PermissionGate for DenyingPermissions {
    async fn request_discovery_permissions(&self) -> Result<bool> {
        Ok(false)
    }
}
