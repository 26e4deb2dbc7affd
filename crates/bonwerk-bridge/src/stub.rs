// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Stub bridge for desktop/CI builds where the vendor printer SDK is absent.
//
// Every trigger returns `PlatformUnavailable` — real implementations wrap the
// platform SDK and pump its callbacks into the session's event channel.

use bonwerk_core::error::{BonwerkError, Result};
use bonwerk_core::types::SeriesCode;

use crate::traits::{DiscoverParams, PermissionGate, PrinterTransport};
use crate::PAIRING_NOOP_MARKER;

/// No-op transport returned on platforms without a native printer module.
pub struct StubTransport;

impl PrinterTransport for StubTransport {
    async fn init(&self, target: &str, series: SeriesCode) -> Result<()> {
        tracing::warn!(device = target, %series, "PrinterTransport::init called on stub bridge");
        Err(BonwerkError::PlatformUnavailable)
    }

    async fn discover(&self, _params: &DiscoverParams) -> Result<()> {
        tracing::warn!("PrinterTransport::discover called on stub bridge");
        Err(BonwerkError::PlatformUnavailable)
    }

    async fn print_base64(&self, _payload: &str) -> Result<()> {
        tracing::warn!("PrinterTransport::print_base64 called on stub bridge");
        Err(BonwerkError::PlatformUnavailable)
    }

    async fn get_paper_width(&self) -> Result<()> {
        tracing::warn!("PrinterTransport::get_paper_width called on stub bridge");
        Err(BonwerkError::PlatformUnavailable)
    }

    async fn start_monitor(&self, _interval_secs: u32) -> Result<()> {
        tracing::warn!("PrinterTransport::start_monitor called on stub bridge");
        Err(BonwerkError::PlatformUnavailable)
    }

    async fn stop_monitor(&self) -> Result<()> {
        Err(BonwerkError::PlatformUnavailable)
    }

    async fn pairing_bluetooth_printer(&self) -> Result<String> {
        // No native pairing flow here — resolve the fixed marker.
        Ok(PAIRING_NOOP_MARKER.to_string())
    }

    fn disconnect(&self) {}
}

/// Permission gate that always grants — desktop builds have no runtime
/// permission prompts.
pub struct StubPermissions;

impl PermissionGate for StubPermissions {
    async fn request_discovery_permissions(&self) -> Result<bool> {
        Ok(true)
    }
}
