// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Core domain types for PdfSnap.

use std::time::{Duration, Instant};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Identifier of an image record: its generation time in Unix milliseconds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct RecordId(pub i64);

impl RecordId {
    pub fn from_time(at: DateTime<Utc>) -> Self {
        Self(at.timestamp_millis())
    }
}

impl std::fmt::Display for RecordId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Encoded format of a captured photo, as tagged by the platform.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum PhotoFormat {
    #[default]
    Jpeg,
    Png,
    Gif,
    Webp,
    Bmp,
    Tiff,
}

impl PhotoFormat {
    /// Parse a platform format tag. Unknown tags fall back to JPEG, which is
    /// what the capture plugins emit when they omit the tag.
    pub fn from_tag(tag: &str) -> Self {
        match tag.trim().to_ascii_lowercase().as_str() {
            "png" => Self::Png,
            "gif" => Self::Gif,
            "webp" => Self::Webp,
            "bmp" => Self::Bmp,
            "tif" | "tiff" => Self::Tiff,
            _ => Self::Jpeg,
        }
    }

    pub fn tag(&self) -> &'static str {
        match self {
            Self::Jpeg => "jpeg",
            Self::Png => "png",
            Self::Gif => "gif",
            Self::Webp => "webp",
            Self::Bmp => "bmp",
            Self::Tiff => "tiff",
        }
    }

    /// Infer the format from a file extension (desktop picker, CLI paths).
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext.to_ascii_lowercase().as_str() {
            "jpg" | "jpeg" => Some(Self::Jpeg),
            "png" => Some(Self::Png),
            "gif" => Some(Self::Gif),
            "webp" => Some(Self::Webp),
            "bmp" => Some(Self::Bmp),
            "tif" | "tiff" => Some(Self::Tiff),
            _ => None,
        }
    }
}

/// Page orientation of a generated document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Orientation {
    Portrait,
    Landscape,
}

/// Opaque platform reference to a stored file (a `file://` or `content://` URI).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LocationHandle(pub String);

impl LocationHandle {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Whether the handle is a URI a native viewer intent can consume directly.
    pub fn is_openable_uri(&self) -> bool {
        self.0.starts_with("content://") || self.0.starts_with("file://")
    }
}

impl std::fmt::Display for LocationHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Platform-managed storage directories.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Directory {
    /// The application's documents directory.
    Documents,
}

/// Metadata returned by a storage `stat`.
#[derive(Debug, Clone)]
pub struct FileInfo {
    pub uri: LocationHandle,
    pub size: u64,
}

/// One captured photo held in memory for the running session.
#[derive(Debug, Clone, PartialEq)]
pub struct ImageRecord {
    pub id: RecordId,
    /// Base64 payload exactly as delivered by the camera or share intent.
    pub base64: String,
    pub format: PhotoFormat,
    pub captured_at: DateTime<Utc>,
    /// Set once the generated PDF has been written.
    pub pdf_filename: Option<String>,
    pub location: Option<LocationHandle>,
}

impl ImageRecord {
    pub fn new(id: RecordId, base64: String, format: PhotoFormat, captured_at: DateTime<Utc>) -> Self {
        Self {
            id,
            base64,
            format,
            captured_at,
            pdf_filename: None,
            location: None,
        }
    }

    /// A record stays "processing" until its document has been saved.
    pub fn is_processing(&self) -> bool {
        self.pdf_filename.is_none()
    }
}

// ---------------------------------------------------------------------------
// Capture contract
// ---------------------------------------------------------------------------

/// Where the photo comes from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CaptureSource {
    Camera,
    Gallery,
}

/// How the picker should return the image.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResultType {
    Base64,
}

/// Request passed to the camera / gallery picker.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CaptureRequest {
    pub quality: u8,
    pub allow_editing: bool,
    pub result_type: ResultType,
    pub source: CaptureSource,
}

impl CaptureRequest {
    pub fn new(source: CaptureSource, quality: u8) -> Self {
        Self {
            quality: quality.min(100),
            allow_editing: false,
            result_type: ResultType::Base64,
            source,
        }
    }
}

/// Photo returned by a successful capture.
#[derive(Debug, Clone, PartialEq)]
pub struct CapturedPhoto {
    pub base64: String,
    pub format: PhotoFormat,
}

/// Result of asking the user for a photo.
#[derive(Debug, Clone, PartialEq)]
pub enum CaptureOutcome {
    Captured(CapturedPhoto),
    /// The user dismissed the camera or picker.
    Cancelled,
}

/// Image shared into the app by another application.
#[derive(Debug, Clone, PartialEq)]
pub struct SharedImage {
    pub base64: String,
    /// Format tag as sent by the sharing app, if any.
    pub format: Option<String>,
}

/// Arguments for the OS share sheet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShareRequest {
    pub title: String,
    pub text: String,
    pub url: String,
    pub dialog_title: String,
}

// ---------------------------------------------------------------------------
// User feedback
// ---------------------------------------------------------------------------

/// Severity of a transient notice.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Success,
    Info,
    Error,
}

/// A short-lived message shown to the user.
#[derive(Debug, Clone, PartialEq)]
pub struct Notification {
    pub message: String,
    pub severity: Severity,
    pub shown_at: Instant,
}

impl Notification {
    pub fn new(message: impl Into<String>, severity: Severity, shown_at: Instant) -> Self {
        Self {
            message: message.into(),
            severity,
            shown_at,
        }
    }

    pub fn is_expired(&self, now: Instant, ttl: Duration) -> bool {
        now.saturating_duration_since(self.shown_at) >= ttl
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn format_tag_parsing() {
        assert_eq!(PhotoFormat::from_tag("JPG"), PhotoFormat::Jpeg);
        assert_eq!(PhotoFormat::from_tag("png"), PhotoFormat::Png);
        assert_eq!(PhotoFormat::from_tag(""), PhotoFormat::Jpeg);
        assert_eq!(PhotoFormat::from_tag("heic"), PhotoFormat::Jpeg);
    }

    #[test]
    fn openable_uri_schemes() {
        assert!(LocationHandle("file:///docs/a.pdf".into()).is_openable_uri());
        assert!(LocationHandle("content://media/1".into()).is_openable_uri());
        assert!(!LocationHandle("/docs/a.pdf".into()).is_openable_uri());
    }

    #[test]
    fn capture_request_never_allows_editing() {
        let req = CaptureRequest::new(CaptureSource::Gallery, 250);
        assert!(!req.allow_editing);
        assert_eq!(req.quality, 100);
        assert_eq!(req.result_type, ResultType::Base64);
    }

    #[test]
    fn notification_expiry() {
        let t0 = Instant::now();
        let n = Notification::new("saved", Severity::Success, t0);
        assert!(!n.is_expired(t0, Duration::from_secs(5)));
        assert!(n.is_expired(t0 + Duration::from_secs(5), Duration::from_secs(5)));
    }
}
