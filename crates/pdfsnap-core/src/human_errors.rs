// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// User-facing wording for pipeline failures.
//
// Every failure surfaces as a transient notice. Where the detail helps the
// user (conversion and save), it is appended; elsewhere a fixed sentence
// with a suggestion is enough.

use crate::error::{ErrorClass, SnapError};
use crate::types::Severity;

/// The pipeline step a failure happened in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PipelineStage {
    Camera,
    Gallery,
    SharedImage,
    Convert,
    Save,
    Open,
}

/// A notice ready to be shown.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HumanError {
    pub message: String,
    pub severity: Severity,
}

/// Map a failure at `stage` to the notice the user sees.
pub fn failure_notice(stage: PipelineStage, err: &SnapError) -> HumanError {
    let message = match stage {
        PipelineStage::Camera => match err {
            SnapError::PlatformUnavailable => {
                "This device has no camera available. Try choosing a photo instead.".to_string()
            }
            _ => "Failed to capture photo. Please check camera permissions and try again."
                .to_string(),
        },
        PipelineStage::Gallery => "Failed to pick photo. Please try again.".to_string(),
        PipelineStage::SharedImage => {
            "Failed to process shared image. Please try again.".to_string()
        }
        PipelineStage::Convert => format!("Failed to convert to PDF: {}", detail(err)),
        PipelineStage::Save => format!("Failed to save PDF: {}", detail(err)),
        PipelineStage::Open => match err.class() {
            ErrorClass::NotFound => "PDF file not found. It may have been deleted.".to_string(),
            _ => "Failed to open PDF. Please try again.".to_string(),
        },
    };

    HumanError {
        message,
        severity: Severity::Error,
    }
}

/// Innermost description of an error, without our own variant prefix.
fn detail(err: &SnapError) -> String {
    match err {
        SnapError::InvalidInput(d)
        | SnapError::ImageDecode(d)
        | SnapError::PdfError(d)
        | SnapError::Encoding(d)
        | SnapError::Capture(d)
        | SnapError::Storage(d)
        | SnapError::NotFound(d)
        | SnapError::Share(d)
        | SnapError::Bridge(d)
        | SnapError::Task(d) => d.clone(),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn save_failure_carries_detail() {
        let notice = failure_notice(
            PipelineStage::Save,
            &SnapError::Storage("disk full".into()),
        );
        assert_eq!(notice.message, "Failed to save PDF: disk full");
        assert_eq!(notice.severity, Severity::Error);
    }

    #[test]
    fn open_not_found_wording() {
        let notice = failure_notice(PipelineStage::Open, &SnapError::NotFound("a.pdf".into()));
        assert_eq!(notice.message, "PDF file not found. It may have been deleted.");
    }

    #[test]
    fn convert_decode_failure_has_detail() {
        let notice = failure_notice(
            PipelineStage::Convert,
            &SnapError::ImageDecode("unexpected EOF".into()),
        );
        assert_eq!(notice.message, "Failed to convert to PDF: unexpected EOF");
    }

    #[test]
    fn convert_invalid_input_keeps_detail() {
        let notice = failure_notice(
            PipelineStage::Convert,
            &SnapError::InvalidInput("image has zero area (0x10)".into()),
        );
        assert_eq!(notice.message, "Failed to convert to PDF: image has zero area (0x10)");
    }

    #[test]
    fn camera_failure_mentions_permissions() {
        let notice = failure_notice(PipelineStage::Camera, &SnapError::Capture("denied".into()));
        assert!(notice.message.contains("camera permissions"));
    }
}
