// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Desktop bridge: filesystem storage and a native file dialog standing in
// for the gallery. There is no camera and no share sheet on desktop.

use std::io::Write;
use std::path::{Component, Path, PathBuf};

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use pdfsnap_core::error::{Result, SnapError};
use pdfsnap_core::types::{
    CaptureOutcome, CaptureRequest, CaptureSource, CapturedPhoto, Directory, FileInfo,
    LocationHandle, PhotoFormat, ShareRequest, SharedImage,
};
use tracing::{debug, info, warn};

use crate::traits::*;

const IMAGE_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png", "gif", "webp", "bmp", "tif", "tiff"];

/// Bridge for desktop builds, rooted at a documents directory.
pub struct DesktopBridge {
    documents_root: PathBuf,
}

impl DesktopBridge {
    pub fn new(documents_root: impl Into<PathBuf>) -> Self {
        Self {
            documents_root: documents_root.into(),
        }
    }

    pub fn documents_root(&self) -> &Path {
        &self.documents_root
    }

    fn resolve(&self, path: &str, directory: Directory) -> Result<PathBuf> {
        let Directory::Documents = directory;

        // Only bare file names: nothing may escape the documents directory.
        let mut components = Path::new(path).components();
        match (components.next(), components.next()) {
            (Some(Component::Normal(name)), None) => Ok(self.documents_root.join(name)),
            _ => Err(SnapError::Storage(format!("refusing path outside documents: {path:?}"))),
        }
    }
}

impl PlatformBridge for DesktopBridge {
    fn platform_name(&self) -> &str {
        "Desktop"
    }
}

impl NativeCamera for DesktopBridge {
    fn get_photo(&self, request: &CaptureRequest) -> Result<CaptureOutcome> {
        match request.source {
            CaptureSource::Camera => {
                warn!("NativeCamera::get_photo(Camera) called on desktop bridge");
                Err(SnapError::PlatformUnavailable)
            }
            CaptureSource::Gallery => {
                let Some(path) = rfd::FileDialog::new()
                    .add_filter("Images", IMAGE_EXTENSIONS)
                    .pick_file()
                else {
                    debug!("image picker dismissed");
                    return Ok(CaptureOutcome::Cancelled);
                };
                let shared = shared_image_from_path(&path)?;
                let format = PhotoFormat::from_tag(shared.format.as_deref().unwrap_or_default());
                Ok(CaptureOutcome::Captured(CapturedPhoto {
                    base64: shared.base64,
                    format,
                }))
            }
        }
    }
}

impl NativeStorage for DesktopBridge {
    fn write_file(&self, path: &str, data: &str, directory: Directory) -> Result<LocationHandle> {
        let target = self.resolve(path, directory)?;
        let bytes = STANDARD
            .decode(data)
            .map_err(|err| SnapError::Storage(format!("data is not valid base64: {err}")))?;

        std::fs::create_dir_all(&self.documents_root)?;
        // Stage next to the target and rename, so an existing PDF is only
        // ever replaced by a complete one.
        let mut staged = tempfile::NamedTempFile::new_in(&self.documents_root)?;
        staged.write_all(&bytes)?;
        staged.as_file().sync_all()?;
        staged.persist(&target).map_err(|err| SnapError::Io(err.error))?;
        info!(path = %target.display(), bytes = bytes.len(), "file written");
        Ok(file_uri(&target))
    }

    fn stat(&self, path: &str, directory: Directory) -> Result<FileInfo> {
        let target = self.resolve(path, directory)?;
        let meta = std::fs::metadata(&target).map_err(|err| not_found_or_io(err, path))?;
        Ok(FileInfo {
            uri: file_uri(&target),
            size: meta.len(),
        })
    }

    fn get_uri(&self, path: &str, directory: Directory) -> Result<LocationHandle> {
        let target = self.resolve(path, directory)?;
        // Only hand out URIs for files that are actually there.
        if !target.is_file() {
            return Err(SnapError::NotFound(path.to_string()));
        }
        Ok(file_uri(&target))
    }
}

impl NativeShare for DesktopBridge {
    fn can_share(&self) -> bool {
        false
    }

    fn share(&self, _request: &ShareRequest) -> Result<()> {
        warn!("NativeShare::share called on desktop bridge");
        Err(SnapError::PlatformUnavailable)
    }
}

impl NativeDocumentOpener for DesktopBridge {
    fn has_document_opener(&self) -> bool {
        false
    }

    fn open_document(&self, _location: &LocationHandle) -> Result<()> {
        Err(SnapError::PlatformUnavailable)
    }
}

/// Read an image file into the shape a share intent delivers.
pub fn shared_image_from_path(path: &Path) -> Result<SharedImage> {
    let bytes = std::fs::read(path)
        .map_err(|err| SnapError::Capture(format!("cannot read {}: {err}", path.display())))?;
    let format = path
        .extension()
        .and_then(|ext| ext.to_str())
        .and_then(PhotoFormat::from_extension)
        .unwrap_or_default();
    Ok(SharedImage {
        base64: STANDARD.encode(bytes),
        format: Some(format.tag().to_string()),
    })
}

fn file_uri(path: &Path) -> LocationHandle {
    let absolute = std::path::absolute(path).unwrap_or_else(|_| path.to_path_buf());
    LocationHandle(format!("file://{}", absolute.display()))
}

fn not_found_or_io(err: std::io::Error, path: &str) -> SnapError {
    if err.kind() == std::io::ErrorKind::NotFound {
        SnapError::NotFound(path.to_string())
    } else {
        SnapError::Io(err)
    }
}
