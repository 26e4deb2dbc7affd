// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Session configuration.

use serde::{Deserialize, Serialize};

use crate::types::PaperWidth;

/// Settings for a printer session.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionConfig {
    /// Paper width assumed when the device cannot report one.
    pub default_paper_width: PaperWidth,
    /// How long a discovery scan may run before resolving with what it has.
    pub discovery_timeout_secs: u64,
    /// Requested status-monitor polling interval (floored at 5s downstream).
    pub monitor_interval_secs: u32,
    /// Optional timeout applied to one-shot correlated requests.
    /// `None` waits indefinitely for a terminal event.
    pub request_timeout_secs: Option<u64>,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            default_paper_width: PaperWidth::Mm80,
            discovery_timeout_secs: 10,
            monitor_interval_secs: 5,
            request_timeout_secs: None,
        }
    }
}
