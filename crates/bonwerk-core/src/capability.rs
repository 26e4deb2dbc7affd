// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Pure capability resolution: paper width and characters-per-line.
//
// No I/O here. The paper-width reading itself comes from the device (via a
// correlated request in bonwerk-session); this module only turns readings and
// table lookups into validated layout parameters.

use tracing::debug;

use crate::types::{CharsPerLine, PaperWidth};

/// Per-series Font A column counts, by paper width.
///
/// Only series whose column counts deviate from the generic width defaults
/// are tabulated; everything else falls through to `fallback_chars_per_line`.
/// `None` means the series has no entry for that width.
struct SeriesColumns {
    name: &'static str,
    mm58: Option<u32>,
    mm60: Option<u32>,
    mm80: Option<u32>,
}

const SERIES_FONT_A: &[SeriesColumns] = &[
    SeriesColumns {
        name: "TM_M10",
        mm58: Some(32),
        mm60: None,
        mm80: None,
    },
    SeriesColumns {
        name: "TM_P20",
        mm58: Some(32),
        mm60: Some(36),
        mm80: None,
    },
    SeriesColumns {
        name: "TM_P60",
        mm58: Some(35),
        mm60: Some(36),
        mm80: None,
    },
    SeriesColumns {
        name: "TM_P80",
        mm58: None,
        mm60: None,
        mm80: Some(48),
    },
    SeriesColumns {
        name: "TM_T88",
        mm58: Some(30),
        mm60: Some(32),
        mm80: Some(42),
    },
    SeriesColumns {
        name: "TM_U220",
        mm58: Some(24),
        mm60: Some(27),
        mm80: Some(33),
    },
    SeriesColumns {
        name: "TM_L90",
        mm58: Some(30),
        mm60: Some(32),
        mm80: Some(42),
    },
];

/// Resolve a raw paper-width reading against the configured default.
///
/// Readings in {80, 60, 58} map to themselves; an absent or out-of-range
/// reading yields the default. Total — never fails.
pub fn resolve_paper_width(raw: Option<u32>, default: PaperWidth) -> PaperWidth {
    match raw.and_then(PaperWidth::from_reading) {
        Some(width) => width,
        None => {
            debug!(?raw, %default, "no valid paper-width reading, using default");
            default
        }
    }
}

/// Font A columns for a series at a given paper width.
///
/// Falls back to the generic width table when the series is not tabulated or
/// has no entry for that width. Total over every `PaperWidth` value and every
/// series name, registered or not.
pub fn chars_per_line(series_name: &str, width: PaperWidth) -> CharsPerLine {
    let tabulated = SERIES_FONT_A
        .iter()
        .find(|s| s.name == series_name)
        .and_then(|s| match width {
            PaperWidth::Mm58 => s.mm58,
            PaperWidth::Mm60 => s.mm60,
            PaperWidth::Mm80 => s.mm80,
        });

    let font_a = tabulated.unwrap_or_else(|| fallback_chars_per_line(width));
    CharsPerLine { font_a }
}

/// Generic Font A columns by paper width alone.
///
/// Matches on the enum, so there is an entry for every possible width.
fn fallback_chars_per_line(width: PaperWidth) -> u32 {
    match width {
        PaperWidth::Mm58 => 32,
        PaperWidth::Mm60 => 42,
        PaperWidth::Mm80 => 48,
    }
}
