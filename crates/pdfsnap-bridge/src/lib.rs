// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>

//! PdfSnap: platform capability bridges.
//!
//! Defines the traits the app uses to reach the camera/gallery picker,
//! platform storage, the share sheet, and a native document viewer, plus the
//! inbound channel through which other apps share images into this one.
//! The desktop implementation backs all of it with the local filesystem and a
//! native file dialog.

use std::path::PathBuf;
use std::sync::Arc;

pub mod desktop;
pub mod intent;
pub mod traits;

pub use intent::{ShareIntentReceiver, ShareIntentSender, share_intent_channel};
pub use traits::PlatformBridge;

/// Build the bridge for the running platform.
///
/// `documents_root` is where `Directory::Documents` lives on platforms that
/// don't manage one themselves.
pub fn platform_bridge(documents_root: PathBuf) -> Arc<dyn PlatformBridge> {
    Arc::new(desktop::DesktopBridge::new(documents_root))
}
