// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// High-level printer session facade.
//
// Owns the event channel, the platform transport, and the permission gate —
// nothing here relies on ambient singletons, so tests (and multi-printer
// hosts) build as many independent sessions as they need.

use std::time::Duration;

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use tracing::{info, instrument};

use bonwerk_bridge::{DiscoverParams, PermissionGate, PrinterTransport};
use bonwerk_core::capability;
use bonwerk_core::config::SessionConfig;
use bonwerk_core::error::{BonwerkError, Result};
use bonwerk_core::registry::PrinterRegistry;
use bonwerk_core::types::{CharsPerLine, MonitorStatus, PaperWidth, PrinterDescriptor};

use crate::channel::{EventChannel, EventKind, PrinterEvent, Subscription};
use crate::correlate::CorrelatedRequest;
use crate::discovery::DiscoverySession;
use crate::monitor::MonitorSession;

/// One logical session with one printer.
///
/// One-shot operations of distinct kinds and the monitor stream may overlap;
/// two concurrent calls of the *same* kind race for the same events and must
/// be serialized by the caller (see `correlate`).
pub struct PrinterSession<T, P> {
    channel: EventChannel,
    transport: T,
    permissions: P,
    config: SessionConfig,
}

impl<T, P> PrinterSession<T, P>
where
    T: PrinterTransport,
    P: PermissionGate,
{
    /// Build a session over an existing channel. The platform transport
    /// pumps native events into the same channel instance.
    pub fn new(channel: EventChannel, transport: T, permissions: P, config: SessionConfig) -> Self {
        Self {
            channel,
            transport,
            permissions,
            config,
        }
    }

    /// The session's event channel (for platform event pumps and tests).
    pub fn channel(&self) -> &EventChannel {
        &self.channel
    }

    /// Establish the device session: resolve the series name through the
    /// registry, then hand target and series code to the native SDK.
    #[instrument(skip(self))]
    pub async fn connect(&self, target: &str, series_name: &str) -> Result<()> {
        let series = PrinterRegistry::lookup(series_name)?;
        self.transport.init(target, series.code).await?;
        info!(device = target, series = series.name, "printer session established");
        Ok(())
    }

    /// Run one discovery scan and return every printer found.
    pub async fn discover(&self, params: &DiscoverParams) -> Result<Vec<PrinterDescriptor>> {
        let timeout = Duration::from_secs(self.config.discovery_timeout_secs);
        DiscoverySession::new(&self.channel, &self.transport, &self.permissions)
            .run(params, Some(timeout))
            .await
    }

    /// Submit raw ESC/POS bytes as a print job and wait for the printer's
    /// verdict. The payload crosses the bridge base64-encoded.
    #[instrument(skip_all, fields(len = data.len()))]
    pub async fn print_raw_data(&self, data: &[u8]) -> Result<MonitorStatus> {
        let payload = BASE64.encode(data);
        let outcome = CorrelatedRequest::new(
            &self.channel,
            EventKind::PrintSuccess,
            EventKind::PrintFailure,
        )
        .run(self.transport.print_base64(&payload), self.request_timeout())
        .await?;

        match outcome {
            PrinterEvent::PrintSuccess(status) => Ok(status),
            other => Err(BonwerkError::Bridge(format!(
                "unexpected payload for print outcome: {:?}",
                other.kind()
            ))),
        }
    }

    /// Ask the device for its paper width, falling back to the configured
    /// default when the reading is absent or out of range.
    #[instrument(skip(self))]
    pub async fn get_paper_width(&self) -> Result<PaperWidth> {
        let outcome = CorrelatedRequest::new(
            &self.channel,
            EventKind::PaperWidthSuccess,
            EventKind::PaperWidthFailure,
        )
        .run(self.transport.get_paper_width(), self.request_timeout())
        .await?;

        let raw = match outcome {
            PrinterEvent::PaperWidthSuccess(raw) => Some(raw),
            _ => None,
        };
        Ok(capability::resolve_paper_width(
            raw,
            self.config.default_paper_width,
        ))
    }

    /// Fetch the paper width and resolve Font A columns for a series.
    pub async fn chars_per_line(&self, series_name: &str) -> Result<CharsPerLine> {
        let width = self.get_paper_width().await?;
        Ok(capability::chars_per_line(series_name, width))
    }

    /// Run the platform pairing flow (fixed success marker where there is
    /// no native flow).
    pub async fn pairing_bluetooth_printer(&self) -> Result<String> {
        self.transport.pairing_bluetooth_printer().await
    }

    /// Tear down the device session. Fire-and-forget.
    pub fn disconnect(&self) {
        self.transport.disconnect();
    }

    /// Start the status monitor with the configured interval.
    pub async fn start_monitor(&self) -> Result<()> {
        MonitorSession::new(&self.channel, &self.transport)
            .start(self.config.monitor_interval_secs)
            .await
    }

    /// Start the status monitor with an explicit interval (floored at the
    /// monitor's minimum).
    pub async fn start_monitor_with_interval(&self, interval_secs: u32) -> Result<()> {
        MonitorSession::new(&self.channel, &self.transport)
            .start(interval_secs)
            .await
    }

    /// Stop the status monitor.
    pub async fn stop_monitor(&self) -> Result<()> {
        MonitorSession::new(&self.channel, &self.transport)
            .stop()
            .await
    }

    /// Attach a standing status listener; detach via the returned handle.
    pub fn add_status_listener(
        &self,
        listener: impl Fn(&MonitorStatus) + Send + Sync + 'static,
    ) -> Subscription {
        MonitorSession::new(&self.channel, &self.transport).add_status_listener(listener)
    }

    fn request_timeout(&self) -> Option<Duration> {
        self.config.request_timeout_secs.map(Duration::from_secs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mock::{GrantingPermissions, MockTransport, TriggerScript};
    use bonwerk_core::types::{PaperStatus, SeriesCode};

    fn session_with(
        transport: MockTransport,
        channel: EventChannel,
    ) -> PrinterSession<MockTransport, GrantingPermissions> {
        PrinterSession::new(
            channel,
            transport,
            GrantingPermissions,
            SessionConfig::default(),
        )
    }

    fn failing_status() -> MonitorStatus {
        MonitorStatus {
            connection: true,
            online: false,
            cover_open: false,
            paper: PaperStatus::Empty,
            drawer_open: false,
            battery_level: None,
            observed_at: chrono::Utc::now(),
        }
    }

    #[tokio::test]
    async fn connect_resolves_series_through_registry() {
        let channel = EventChannel::new();
        let transport = MockTransport::new(channel.clone());
        let session = session_with(transport, channel);

        session.connect("BT:00:11:22", "TM_T88").await.unwrap();
        assert_eq!(
            session.transport.init_calls(),
            vec![("BT:00:11:22".to_string(), SeriesCode(12))]
        );
    }

    #[tokio::test]
    async fn connect_with_unknown_series_never_touches_transport() {
        let channel = EventChannel::new();
        let transport = MockTransport::new(channel.clone());
        let session = session_with(transport, channel);

        let err = session.connect("BT:00:11:22", "TM_T9000").await.unwrap_err();
        assert!(matches!(err, BonwerkError::UnknownSeries(_)));
        assert!(session.transport.init_calls().is_empty());
    }

    #[tokio::test]
    async fn print_raw_data_resolves_with_reported_status() {
        let channel = EventChannel::new();
        let transport = MockTransport::new(channel.clone()).print_script(
            TriggerScript::EmitThenAccept(PrinterEvent::PrintSuccess(MonitorStatus::healthy())),
        );
        let session = session_with(transport, channel);

        let status = session.print_raw_data(&[0x1B, 0x40]).await.unwrap();
        assert!(status.online);

        // ESC @ crosses the bridge as base64.
        assert_eq!(session.transport.printed_payloads(), vec!["G0A=".to_string()]);
        assert_eq!(session.channel.subscriber_count(EventKind::PrintSuccess), 0);
        assert_eq!(session.channel.subscriber_count(EventKind::PrintFailure), 0);
    }

    #[tokio::test]
    async fn print_raw_data_rejects_on_failure_event() {
        let channel = EventChannel::new();
        let transport = MockTransport::new(channel.clone()).print_script(
            TriggerScript::EmitThenAccept(PrinterEvent::PrintFailure(failing_status())),
        );
        let session = session_with(transport, channel);

        let err = session.print_raw_data(&[0x1B, 0x40]).await.unwrap_err();
        match err {
            BonwerkError::OperationFailed(status) => assert_eq!(status.paper, PaperStatus::Empty),
            other => panic!("expected OperationFailed, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn print_raw_data_rejects_when_trigger_rejects() {
        let channel = EventChannel::new();
        let transport = MockTransport::new(channel.clone())
            .print_script(TriggerScript::Reject("not connected".into()));
        let session = session_with(transport, channel);

        let err = session.print_raw_data(&[0x0A]).await.unwrap_err();
        assert!(matches!(err, BonwerkError::TransportRejected(msg) if msg == "not connected"));
        assert_eq!(session.channel.subscriber_count(EventKind::PrintSuccess), 0);
        assert_eq!(session.channel.subscriber_count(EventKind::PrintFailure), 0);
    }

    #[tokio::test]
    async fn chars_per_line_uses_explicit_series_entry() {
        let channel = EventChannel::new();
        let transport = MockTransport::new(channel.clone()).paper_width_script(
            TriggerScript::EmitThenAccept(PrinterEvent::PaperWidthSuccess(60)),
        );
        let session = session_with(transport, channel);

        let cpl = session.chars_per_line("TM_T88").await.unwrap();
        assert_eq!(cpl.font_a, 32);
    }

    #[tokio::test]
    async fn chars_per_line_falls_back_for_untabulated_series() {
        let channel = EventChannel::new();
        let transport = MockTransport::new(channel.clone()).paper_width_script(
            TriggerScript::EmitThenAccept(PrinterEvent::PaperWidthSuccess(60)),
        );
        let session = session_with(transport, channel);

        let cpl = session.chars_per_line("TM_T20").await.unwrap();
        assert_eq!(cpl.font_a, 42);
    }

    #[tokio::test]
    async fn invalid_width_reading_resolves_to_default() {
        let channel = EventChannel::new();
        let transport = MockTransport::new(channel.clone()).paper_width_script(
            TriggerScript::EmitThenAccept(PrinterEvent::PaperWidthSuccess(0)),
        );
        let session = session_with(transport, channel);

        let width = session.get_paper_width().await.unwrap();
        assert_eq!(width, PaperWidth::Mm80);
    }

    #[tokio::test]
    async fn pairing_resolves_fixed_marker_on_stub_platforms() {
        let channel = EventChannel::new();
        let transport = MockTransport::new(channel.clone());
        let session = session_with(transport, channel);

        let marker = session.pairing_bluetooth_printer().await.unwrap();
        assert_eq!(marker, "Success");
    }

    #[tokio::test]
    async fn disconnect_is_fire_and_forget() {
        let channel = EventChannel::new();
        let transport = MockTransport::new(channel.clone());
        let session = session_with(transport, channel);

        session.disconnect();
        assert!(session.transport.disconnected());
    }
}
