// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Platform-agnostic trait definitions for the native printer SDK.
//
// Trigger methods resolve when the native call has been *accepted*; the
// operation's actual outcome arrives later as an event on the session's
// event channel (delivered by the platform implementation's event pump).
// A trigger returning `Err` therefore means the transport itself rejected
// the call — no terminal event will follow for it.

use bonwerk_core::error::Result;
use bonwerk_core::types::{SeriesCode, TransportKind};

/// Optional filters for a discovery scan.
#[derive(Debug, Clone, Default)]
pub struct DiscoverParams {
    /// Restrict the scan to a single transport; `None` scans all of them.
    pub transport: Option<TransportKind>,
    /// Restrict the scan to devices advertising this model string.
    pub device_model: Option<String>,
}

/// Boundary with the vendor printer SDK.
///
/// One instance represents one native printer module. Implementations that
/// lack a capability on the current platform return
/// `BonwerkError::PlatformUnavailable`.
#[allow(async_fn_in_trait)]
pub trait PrinterTransport {
    /// Establish a session with a specific device and printer series.
    async fn init(&self, target: &str, series: SeriesCode) -> Result<()>;

    /// Start a discovery scan. The accumulated results arrive later as a
    /// `DiscoveryDone` event; some SDK builds instead complete this call
    /// without ever firing the event, which callers treat as an empty scan.
    async fn discover(&self, params: &DiscoverParams) -> Result<()>;

    /// Submit a print job as base64-encoded ESC/POS bytes. The outcome
    /// arrives as a `PrintSuccess` or `PrintFailure` event.
    async fn print_base64(&self, payload: &str) -> Result<()>;

    /// Ask the device for its physical paper width. The outcome arrives as a
    /// `PaperWidthSuccess` or `PaperWidthFailure` event.
    async fn get_paper_width(&self) -> Result<()>;

    /// Begin periodic status polling; updates arrive as repeating
    /// `MonitorStatusUpdate` events until `stop_monitor`.
    async fn start_monitor(&self, interval_secs: u32) -> Result<()>;

    /// Stop periodic status polling.
    async fn stop_monitor(&self) -> Result<()>;

    /// Run the platform's Bluetooth pairing flow. Platforms without one
    /// resolve [`crate::PAIRING_NOOP_MARKER`] immediately.
    async fn pairing_bluetooth_printer(&self) -> Result<String>;

    /// Tear down the device session. Fire-and-forget: no awaited result,
    /// never fails.
    fn disconnect(&self);
}

/// Collaborator that checks (and where possible requests) the platform
/// permissions discovery depends on — Bluetooth scanning, location access.
#[allow(async_fn_in_trait)]
pub trait PermissionGate {
    /// Returns `Ok(true)` when scanning may proceed. `Ok(false)` means the
    /// user declined; the transport must not be touched in that case.
    async fn request_discovery_permissions(&self) -> Result<bool>;
}
