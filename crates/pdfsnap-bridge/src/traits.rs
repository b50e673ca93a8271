// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Platform-agnostic trait definitions for native capabilities.

use pdfsnap_core::error::Result;
use pdfsnap_core::types::{
    CaptureOutcome, CaptureRequest, Directory, FileInfo, LocationHandle, ShareRequest,
};

/// Unified bridge that groups all native capabilities.
pub trait PlatformBridge:
    NativeCamera + NativeStorage + NativeShare + NativeDocumentOpener + Send + Sync
{
    /// Human-readable platform name (e.g. "Android 14", "Desktop").
    fn platform_name(&self) -> &str;

    /// True on a phone or tablet build, where a native viewer bridge may exist.
    fn is_native_mobile(&self) -> bool {
        false
    }
}

/// Capture a photo from the camera or choose one from the gallery.
pub trait NativeCamera {
    /// Returns `CaptureOutcome::Cancelled` when the user backs out; errors are
    /// reserved for real failures (permissions, hardware, unreadable file).
    fn get_photo(&self, request: &CaptureRequest) -> Result<CaptureOutcome>;
}

/// Platform file storage.
pub trait NativeStorage {
    /// Write base64-encoded `data` to `path` inside `directory`, replacing any
    /// existing file. The platform decodes the text back to binary.
    fn write_file(&self, path: &str, data: &str, directory: Directory) -> Result<LocationHandle>;

    /// Metadata of an existing file. `SnapError::NotFound` if it is missing.
    fn stat(&self, path: &str, directory: Directory) -> Result<FileInfo>;

    /// Openable URI for `path` inside `directory`.
    fn get_uri(&self, path: &str, directory: Directory) -> Result<LocationHandle>;
}

/// Share content via the OS share sheet.
pub trait NativeShare {
    fn can_share(&self) -> bool;

    fn share(&self, request: &ShareRequest) -> Result<()>;
}

/// Hand a stored document straight to the system's PDF viewer.
pub trait NativeDocumentOpener {
    /// Whether a native opener has been registered by the host shell.
    fn has_document_opener(&self) -> bool;

    fn open_document(&self, location: &LocationHandle) -> Result<()>;
}
