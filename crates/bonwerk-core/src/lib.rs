// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Bonwerk — Core types, errors, and capability tables shared across all crates.

pub mod capability;
pub mod config;
pub mod error;
pub mod registry;
pub mod types;

pub use config::SessionConfig;
pub use error::BonwerkError;
pub use registry::PrinterRegistry;
pub use types::*;
