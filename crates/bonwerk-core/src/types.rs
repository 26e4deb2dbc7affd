// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Core domain types for the Bonwerk printer control layer.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Native SDK constant identifying a printer series.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SeriesCode(pub i32);

impl std::fmt::Display for SeriesCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Broad family a printer series belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SeriesFamily {
    /// Battery-powered mobile printers (TM-P series).
    Mobile,
    /// Counter-top receipt printers (TM-T series).
    Receipt,
    /// Label-capable printers (TM-L series).
    Label,
    /// Multifunction / hybrid units (TM-H, TM-U series).
    Hybrid,
}

/// A printer model family with known command-set and layout characteristics.
///
/// Instances live in the static registry built at process start; they are
/// never created at runtime and never mutated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PrinterSeries {
    /// Registry name, e.g. `"TM_T88"`.
    pub name: &'static str,
    /// Native SDK series constant passed to `init`.
    pub code: SeriesCode,
    pub family: SeriesFamily,
}

/// How a discovered printer is reachable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TransportKind {
    Bluetooth,
    Usb,
    Lan,
    Serial,
}

/// A printer found by a discovery scan.
///
/// Immutable; owned by the caller once returned. The `target` string is what
/// the native SDK expects back in `init` (e.g. `"BT:00:11:22:33:44:55"` or
/// `"TCP:192.168.1.50"`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PrinterDescriptor {
    pub target: String,
    pub name: String,
    pub transport: TransportKind,
}

/// Physical paper roll width classes supported by ESC/POS receipt printers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PaperWidth {
    Mm58,
    Mm60,
    Mm80,
}

impl PaperWidth {
    /// Parse a raw millimeter reading from the printer. Readings outside the
    /// three known classes are treated as absent.
    pub fn from_reading(raw: u32) -> Option<Self> {
        match raw {
            58 => Some(Self::Mm58),
            60 => Some(Self::Mm60),
            80 => Some(Self::Mm80),
            _ => None,
        }
    }

    /// Width in millimetres.
    pub fn millimeters(self) -> u32 {
        match self {
            Self::Mm58 => 58,
            Self::Mm60 => 60,
            Self::Mm80 => 80,
        }
    }
}

impl std::fmt::Display for PaperWidth {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}mm", self.millimeters())
    }
}

/// Paper state reported by the printer's roll sensor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PaperStatus {
    Ok,
    NearEnd,
    Empty,
}

/// Printer status as delivered by the monitor stream and by print/width
/// failure events.
///
/// Explicit tagged record — the loosely shaped native status object is
/// validated into this at the bridge boundary.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonitorStatus {
    /// Whether the session to the device is up.
    pub connection: bool,
    /// Whether the printer itself reports online.
    pub online: bool,
    pub cover_open: bool,
    pub paper: PaperStatus,
    pub drawer_open: bool,
    /// Battery level 0–100 for mobile printers; `None` on mains-powered units.
    pub battery_level: Option<u8>,
    pub observed_at: DateTime<Utc>,
}

impl MonitorStatus {
    /// A healthy, connected status snapshot taken now.
    pub fn healthy() -> Self {
        Self {
            connection: true,
            online: true,
            cover_open: false,
            paper: PaperStatus::Ok,
            drawer_open: false,
            battery_level: None,
            observed_at: Utc::now(),
        }
    }
}

/// Characters-per-line layout parameters for a given paper width.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CharsPerLine {
    /// Column count for the fixed-width Font A.
    pub font_a: u32,
}
