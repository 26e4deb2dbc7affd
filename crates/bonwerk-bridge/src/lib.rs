// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Bonwerk — Native printer SDK bridge abstractions.
//
// The trait definitions here are the boundary with the vendor printer SDK
// (ESC/POS byte encoding, Bluetooth/LAN/USB transport, OS permission prompts
// all live on the far side of it). Platform-specific implementations are
// selected at startup through this module rather than scattered conditionals
// at call sites.

pub mod stub;
pub mod traits;

pub use stub::{StubPermissions, StubTransport};
pub use traits::{DiscoverParams, PermissionGate, PrinterTransport};

/// Fixed marker resolved by `pairing_bluetooth_printer` on platforms that
/// have no native pairing flow.
pub const PAIRING_NOOP_MARKER: &str = "Success";

/// Select the printer transport for the target operating system.
///
/// SDK-backed iOS/Android modules plug in here behind `cfg(target_os)`
/// gates; until one is linked in, every platform routes to the stub.
pub fn platform_transport() -> StubTransport {
    StubTransport
}

/// Select the permission gate for the target operating system.
pub fn platform_permissions() -> StubPermissions {
    StubPermissions
}
