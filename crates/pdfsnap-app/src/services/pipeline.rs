// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Photo pipeline: capture, convert, rename, save, open.
//
// Each entry point runs its steps in order on the caller's context, pushing
// decode and encode work onto the blocking pool. Failures end as a notice in
// the state; nothing propagates to the UI. Entry points that set the busy
// flag clear it on every exit path.

use std::sync::Arc;
use std::time::Instant;

use chrono::Utc;
use pdfsnap_bridge::PlatformBridge;
use pdfsnap_core::AppConfig;
use pdfsnap_core::config::CollisionPolicy;
use pdfsnap_core::error::SnapError;
use pdfsnap_core::human_errors::{PipelineStage, failure_notice};
use pdfsnap_core::types::{
    CaptureOutcome, CaptureRequest, CaptureSource, CapturedPhoto, Directory, LocationHandle,
    PhotoFormat, RecordId, Severity, ShareRequest, SharedImage,
};
use pdfsnap_document::{
    PhotoDocument, PhotoPdfWriter, decode_photo, default_document_name, encode_transport,
    resolve_filename, unique_filename,
};
use tracing::{debug, error, info, warn};

use crate::state::{PendingRename, StateStore, TapAction};

/// Suffixes tried before giving up under `CollisionPolicy::KeepBoth`.
const MAX_NAME_PROBES: u32 = 99;

/// Which path an open request took.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OpenOutcome {
    /// Handed to the platform's PDF viewer.
    NativeViewer,
    /// Offered through the share sheet.
    ShareSheet,
    /// Only a notice naming the file was shown.
    Announced,
    /// The record has no document yet.
    NotReady,
    Failed,
}

/// Runs pipeline steps against a platform bridge.
#[derive(Clone)]
pub struct Pipeline {
    bridge: Arc<dyn PlatformBridge>,
    config: AppConfig,
}

impl Pipeline {
    pub fn new(bridge: Arc<dyn PlatformBridge>, config: AppConfig) -> Self {
        Self { bridge, config }
    }

    // -- Intake --------------------------------------------------------------

    /// Take a photo or pick one from the gallery, then convert it.
    pub async fn capture<S: StateStore>(&self, store: &mut S, source: CaptureSource) {
        if !store.update(|s| s.begin_intake()) {
            debug!(?source, "capture ignored, pipeline busy");
            return;
        }

        let stage = match source {
            CaptureSource::Camera => PipelineStage::Camera,
            CaptureSource::Gallery => PipelineStage::Gallery,
        };
        let request = CaptureRequest::new(source, self.config.capture_quality);

        match self.bridge.get_photo(&request) {
            Ok(CaptureOutcome::Captured(photo)) => {
                info!(?source, format = photo.format.tag(), "photo captured");
                self.process_photo(store, photo, stage).await;
            }
            Ok(CaptureOutcome::Cancelled) => info!(?source, "capture cancelled by user"),
            Err(err) => {
                error!(?source, error = %err, "capture failed");
                report(store, stage, &err);
            }
        }

        store.update(|s| s.finish_busy());
    }

    /// Feed an image shared by another app through the same path as a
    /// capture. Hands the image back if the pipeline is busy.
    pub async fn receive_shared<S: StateStore>(
        &self,
        store: &mut S,
        shared: SharedImage,
    ) -> Result<(), SharedImage> {
        if !store.update(|s| s.begin_intake()) {
            return Err(shared);
        }

        let format = PhotoFormat::from_tag(shared.format.as_deref().unwrap_or_default());
        info!(format = format.tag(), payload_len = shared.base64.len(), "shared image received");
        let photo = CapturedPhoto {
            base64: shared.base64,
            format,
        };
        self.process_photo(store, photo, PipelineStage::SharedImage).await;

        store.update(|s| s.finish_busy());
        Ok(())
    }

    async fn process_photo<S: StateStore>(
        &self,
        store: &mut S,
        photo: CapturedPhoto,
        stage: PipelineStage,
    ) {
        if photo.base64.trim().is_empty() {
            warn!(?stage, "photo payload is empty");
            report(store, stage, &SnapError::InvalidInput("invalid photo data".into()));
            return;
        }

        let id = store.update(|s| {
            let id = s.add_record(photo, Utc::now());
            s.notify("Photo added successfully!", Severity::Success, Instant::now());
            id
        });
        self.convert(store, id).await;
    }

    // -- Conversion ----------------------------------------------------------

    /// Build the PDF for record `id` and open the rename prompt for it.
    pub async fn convert<S: StateStore>(&self, store: &mut S, id: RecordId) {
        let Some((payload, format)) =
            store.update(|s| s.record(id).map(|r| (r.base64.clone(), r.format)))
        else {
            warn!(%id, "convert requested for unknown record");
            return;
        };

        let default_name = default_document_name(Utc::now());
        match self.build_document(payload, format, &default_name).await {
            Ok(document) => {
                let geometry = document.geometry();
                info!(
                    %id,
                    width_mm = geometry.width_mm,
                    height_mm = geometry.height_mm,
                    orientation = ?geometry.orientation,
                    "document ready for naming"
                );
                store.update(|s| s.open_rename(id, document, default_name));
            }
            Err(err) => {
                error!(%id, error = %err, "conversion failed");
                report(store, PipelineStage::Convert, &err);
            }
        }
    }

    async fn build_document(
        &self,
        payload: String,
        format: PhotoFormat,
        title: &str,
    ) -> Result<PhotoDocument, SnapError> {
        let image = tokio::task::spawn_blocking(move || decode_photo(&payload, format))
            .await
            .map_err(|e| SnapError::Task(format!("decode task failed: {e}")))??;

        let mut writer = PhotoPdfWriter::new(self.config.assumed_dpi);
        writer.set_title(title);
        writer.create_from_image(&image)
    }

    // -- Rename and save -----------------------------------------------------

    /// Save the pending document under the name in the rename prompt.
    pub async fn confirm_rename<S: StateStore>(&self, store: &mut S) {
        let Some(pending) = store.update(|s| s.begin_save()) else {
            debug!("save ignored, nothing pending or pipeline busy");
            return;
        };

        let id = pending.record_id;
        let filename = resolve_filename(pending.proposed_name(), &pending.default_name);

        let saved = self.save(&pending, filename).await;
        match saved {
            Ok((filename, location)) => {
                info!(%id, %filename, %location, "PDF saved");
                store.update(|s| {
                    s.attach_document(id, filename.clone(), location.clone());
                    s.notify(format!("PDF saved as: {filename}"), Severity::Success, Instant::now());
                    s.finish_busy();
                });
                if self.config.open_after_save {
                    self.dispatch_open(store, &filename, location);
                }
            }
            Err(err) => {
                error!(%id, error = %err, "save failed");
                report(store, PipelineStage::Save, &err);
                store.update(|s| {
                    s.restore_pending_rename(pending);
                    s.finish_busy();
                });
            }
        }
    }

    async fn save(
        &self,
        pending: &PendingRename,
        filename: String,
    ) -> Result<(String, LocationHandle), SnapError> {
        let filename = match self.config.collision_policy {
            CollisionPolicy::Overwrite => filename,
            CollisionPolicy::KeepBoth => unique_filename(&filename, MAX_NAME_PROBES, |name| {
                self.bridge.stat(name, Directory::Documents).is_ok()
            })
            .ok_or_else(|| SnapError::Storage(format!("no free name left for {filename}")))?,
        };

        let bytes = pending.document.to_bytes()?;
        let chunk_size = self.config.transport_chunk_size;
        let encoded = tokio::task::spawn_blocking(move || encode_transport(&bytes, chunk_size))
            .await
            .map_err(|e| SnapError::Task(format!("encode task failed: {e}")))?;

        let location = self
            .bridge
            .write_file(&filename, &encoded, Directory::Documents)?;
        Ok((filename, location))
    }

    /// Dismiss the rename prompt. Anything already written stays on disk.
    pub fn cancel_rename<S: StateStore>(&self, store: &mut S) {
        store.update(|s| s.cancel_rename());
    }

    // -- Open ----------------------------------------------------------------

    /// Tap on a record: toggles selection, or opens the record's PDF.
    pub fn tap_record<S: StateStore>(&self, store: &mut S, id: RecordId) -> Option<OpenOutcome> {
        match store.update(|s| s.tap(id)) {
            TapAction::Open(id) => Some(self.open_record(store, id)),
            TapAction::Toggled | TapAction::Ignored => None,
        }
    }

    /// Show the saved PDF of record `id` in whatever way the platform allows.
    pub fn open_record<S: StateStore>(&self, store: &mut S, id: RecordId) -> OpenOutcome {
        let Some((filename, cached)) =
            store.update(|s| s.record(id).map(|r| (r.pdf_filename.clone(), r.location.clone())))
        else {
            warn!(%id, "open requested for unknown record");
            return OpenOutcome::Failed;
        };

        let Some(filename) = filename else {
            store.update(|s| {
                s.notify("PDF is still being processed. Please wait...", Severity::Info, Instant::now())
            });
            return OpenOutcome::NotReady;
        };

        let location = match cached {
            Some(location) => location,
            None => match self.locate(&filename) {
                Ok(location) => {
                    store.update(|s| s.cache_location(id, location.clone()));
                    location
                }
                Err(err) => {
                    report(store, PipelineStage::Open, &err);
                    return OpenOutcome::Failed;
                }
            },
        };

        self.dispatch_open(store, &filename, location)
    }

    /// Look a saved file up by name: metadata first, then a bare URI query.
    fn locate(&self, filename: &str) -> Result<LocationHandle, SnapError> {
        match self.bridge.stat(filename, Directory::Documents) {
            Ok(info) => Ok(info.uri),
            Err(stat_err) => {
                debug!(%filename, error = %stat_err, "stat failed, asking for a uri");
                self.bridge
                    .get_uri(filename, Directory::Documents)
                    .map_err(|uri_err| {
                        warn!(%filename, stat_error = %stat_err, uri_error = %uri_err, "document not found");
                        SnapError::NotFound(filename.to_string())
                    })
            }
        }
    }

    fn dispatch_open<S: StateStore>(
        &self,
        store: &mut S,
        filename: &str,
        location: LocationHandle,
    ) -> OpenOutcome {
        if self.bridge.is_native_mobile() && self.bridge.has_document_opener() {
            let location = if location.is_openable_uri() {
                location
            } else {
                self.bridge
                    .get_uri(filename, Directory::Documents)
                    .unwrap_or(location)
            };
            return match self.bridge.open_document(&location) {
                Ok(()) => {
                    info!(%filename, %location, "opened in native viewer");
                    OpenOutcome::NativeViewer
                }
                Err(err) => {
                    error!(%filename, error = %err, "native open failed");
                    report(store, PipelineStage::Open, &SnapError::Bridge(err.to_string()));
                    OpenOutcome::Failed
                }
            };
        }

        if self.bridge.can_share() {
            let request = ShareRequest {
                title: "Open PDF".into(),
                text: filename.to_string(),
                url: location.as_str().to_string(),
                dialog_title: "Open PDF with...".into(),
            };
            return match self.bridge.share(&request) {
                Ok(()) => {
                    info!(%filename, "share sheet shown");
                    OpenOutcome::ShareSheet
                }
                Err(err) => {
                    warn!(%filename, error = %err, "share failed");
                    store.update(|s| {
                        s.notify(
                            format!("PDF saved to Documents/{filename}"),
                            Severity::Info,
                            Instant::now(),
                        )
                    });
                    OpenOutcome::Announced
                }
            };
        }

        store.update(|s| s.notify(format!("PDF: {filename}"), Severity::Info, Instant::now()));
        OpenOutcome::Announced
    }
}

fn report<S: StateStore>(store: &mut S, stage: PipelineStage, err: &SnapError) {
    let notice = failure_notice(stage, err);
    store.update(|s| s.notify_human(notice, Instant::now()));
}
