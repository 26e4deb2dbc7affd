// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Static registry mapping series names to native SDK codes.
//
// Lookup is checked against this table only, never against the physical
// device — connecting to a TM-T88 while claiming TM_T20 is the caller's
// problem, but an unregistered name fails up front with `UnknownSeries`.

use tracing::debug;

use crate::error::{BonwerkError, Result};
use crate::types::{PrinterSeries, SeriesCode, SeriesFamily};

/// All printer series known to the native SDK, in code order.
const SERIES: &[PrinterSeries] = &[
    series("TM_M10", 0, SeriesFamily::Mobile),
    series("TM_M30", 1, SeriesFamily::Receipt),
    series("TM_P20", 2, SeriesFamily::Mobile),
    series("TM_P60", 3, SeriesFamily::Mobile),
    series("TM_P60II", 4, SeriesFamily::Mobile),
    series("TM_P80", 5, SeriesFamily::Mobile),
    series("TM_T20", 6, SeriesFamily::Receipt),
    series("TM_T60", 7, SeriesFamily::Receipt),
    series("TM_T70", 8, SeriesFamily::Receipt),
    series("TM_T81", 9, SeriesFamily::Receipt),
    series("TM_T82", 10, SeriesFamily::Receipt),
    series("TM_T83", 11, SeriesFamily::Receipt),
    series("TM_T88", 12, SeriesFamily::Receipt),
    series("TM_T90", 13, SeriesFamily::Receipt),
    series("TM_T90KP", 14, SeriesFamily::Receipt),
    series("TM_U220", 15, SeriesFamily::Hybrid),
    series("TM_U330", 16, SeriesFamily::Hybrid),
    series("TM_L90", 17, SeriesFamily::Label),
    series("TM_H6000", 18, SeriesFamily::Hybrid),
    series("TM_T100", 19, SeriesFamily::Receipt),
    series("TM_M30II", 20, SeriesFamily::Receipt),
];

const fn series(name: &'static str, code: i32, family: SeriesFamily) -> PrinterSeries {
    PrinterSeries {
        name,
        code: SeriesCode(code),
        family,
    }
}

/// Name → series lookup over the fixed table above.
pub struct PrinterRegistry;

impl PrinterRegistry {
    /// Resolve a series by its registry name (e.g. `"TM_T88"`).
    pub fn lookup(name: &str) -> Result<&'static PrinterSeries> {
        let found = SERIES.iter().find(|s| s.name == name);
        match found {
            Some(series) => {
                debug!(name, code = %series.code, "resolved printer series");
                Ok(series)
            }
            None => Err(BonwerkError::UnknownSeries(name.to_string())),
        }
    }

    /// All registered series, in native code order.
    pub fn all() -> &'static [PrinterSeries] {
        SERIES
    }
}
