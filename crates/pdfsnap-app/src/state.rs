// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Application state: the record list, busy flag, selection set, rename
// checkpoint, and current notice. Fields are private; every change goes
// through one of the transition methods below.

use std::collections::BTreeSet;
use std::time::{Duration, Instant};

use chrono::{DateTime, Utc};
use dioxus::prelude::*;
use pdfsnap_core::AppConfig;
use pdfsnap_core::human_errors::HumanError;
use pdfsnap_core::types::{
    CapturedPhoto, ImageRecord, LocationHandle, Notification, RecordId, Severity,
};
use pdfsnap_document::PhotoDocument;
use tracing::{debug, warn};

/// What the interface is doing, derived from the state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UiMode {
    Idle,
    /// A capture, conversion, or save is in flight.
    Loading,
    /// The rename prompt is waiting for the user.
    Renaming,
    /// One or more records are marked for deletion.
    Selecting,
}

/// Result of tapping a record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TapAction {
    /// Selection mode was active; membership was toggled.
    Toggled,
    /// Not selecting; the record's document should be opened.
    Open(RecordId),
    /// No such record.
    Ignored,
}

/// A generated document waiting for the user to confirm its filename.
#[derive(Debug)]
pub struct PendingRename {
    pub record_id: RecordId,
    pub document: PhotoDocument,
    pub default_name: String,
    /// The editable text in the prompt, initially the default name.
    pub filename_text: String,
}

impl PendingRename {
    /// The name to resolve: the user's text, or the default if left blank.
    pub fn proposed_name(&self) -> &str {
        if self.filename_text.trim().is_empty() {
            &self.default_name
        } else {
            &self.filename_text
        }
    }
}

/// Shared state accessible to all pages via `use_context`.
#[derive(Debug)]
pub struct AppState {
    /// Newest first.
    records: Vec<ImageRecord>,
    busy: bool,
    selection: BTreeSet<RecordId>,
    pending_rename: Option<PendingRename>,
    notification: Option<Notification>,
    notification_ttl: Duration,
    last_id: Option<RecordId>,
}

impl AppState {
    pub fn new(config: &AppConfig) -> Self {
        Self {
            records: Vec::new(),
            busy: false,
            selection: BTreeSet::new(),
            pending_rename: None,
            notification: None,
            notification_ttl: config.notification_duration(),
            last_id: None,
        }
    }

    // -- Queries -------------------------------------------------------------

    pub fn records(&self) -> &[ImageRecord] {
        &self.records
    }

    pub fn record(&self, id: RecordId) -> Option<&ImageRecord> {
        self.records.iter().find(|r| r.id == id)
    }

    pub fn is_busy(&self) -> bool {
        self.busy
    }

    pub fn selection(&self) -> &BTreeSet<RecordId> {
        &self.selection
    }

    pub fn is_selected(&self, id: RecordId) -> bool {
        self.selection.contains(&id)
    }

    pub fn in_selection_mode(&self) -> bool {
        !self.selection.is_empty()
    }

    pub fn pending_rename(&self) -> Option<&PendingRename> {
        self.pending_rename.as_ref()
    }

    pub fn notification(&self) -> Option<&Notification> {
        self.notification.as_ref()
    }

    pub fn mode(&self) -> UiMode {
        if self.busy {
            UiMode::Loading
        } else if self.pending_rename.is_some() {
            UiMode::Renaming
        } else if self.in_selection_mode() {
            UiMode::Selecting
        } else {
            UiMode::Idle
        }
    }

    /// Capture and choose are only offered when nothing else is in flight.
    pub fn can_start_intake(&self) -> bool {
        !self.busy && self.pending_rename.is_none()
    }

    // -- Busy flag -----------------------------------------------------------

    /// Claim the single pipeline slot for a new photo. False if taken.
    pub fn begin_intake(&mut self) -> bool {
        if !self.can_start_intake() {
            return false;
        }
        self.busy = true;
        true
    }

    pub fn finish_busy(&mut self) {
        self.busy = false;
    }

    // -- Records -------------------------------------------------------------

    /// Store a captured photo as the newest record and return its id.
    pub fn add_record(&mut self, photo: CapturedPhoto, now: DateTime<Utc>) -> RecordId {
        let id = match self.last_id {
            Some(last) if RecordId::from_time(now) <= last => RecordId(last.0 + 1),
            _ => RecordId::from_time(now),
        };
        self.last_id = Some(id);

        self.records
            .insert(0, ImageRecord::new(id, photo.base64, photo.format, now));
        debug!(%id, total = self.records.len(), "record added");
        id
    }

    /// Attach the saved document to its record. False if the record is gone.
    pub fn attach_document(
        &mut self,
        id: RecordId,
        filename: String,
        location: LocationHandle,
    ) -> bool {
        match self.records.iter_mut().find(|r| r.id == id) {
            Some(record) => {
                record.pdf_filename = Some(filename);
                record.location = Some(location);
                true
            }
            None => {
                warn!(%id, "saved document for a record that was deleted");
                false
            }
        }
    }

    /// Remember a location resolved lazily on open.
    pub fn cache_location(&mut self, id: RecordId, location: LocationHandle) {
        if let Some(record) = self.records.iter_mut().find(|r| r.id == id) {
            record.location = Some(location);
        }
    }

    pub fn delete_record(&mut self, id: RecordId, now: Instant) -> bool {
        let before = self.records.len();
        self.records.retain(|r| r.id != id);
        self.selection.remove(&id);
        let removed = self.records.len() != before;
        if removed {
            self.notify("Image removed", Severity::Success, now);
        }
        removed
    }

    // -- Rename checkpoint ---------------------------------------------------

    pub fn open_rename(&mut self, record_id: RecordId, document: PhotoDocument, default_name: String) {
        self.pending_rename = Some(PendingRename {
            record_id,
            document,
            filename_text: default_name.clone(),
            default_name,
        });
    }

    pub fn set_rename_text(&mut self, text: String) {
        if let Some(pending) = self.pending_rename.as_mut() {
            pending.filename_text = text;
        }
    }

    /// Take the pending document for saving and mark the pipeline busy.
    pub fn begin_save(&mut self) -> Option<PendingRename> {
        if self.busy {
            return None;
        }
        let pending = self.pending_rename.take()?;
        self.busy = true;
        Some(pending)
    }

    /// Put a document back after a failed save so the user can retry or cancel.
    pub fn restore_pending_rename(&mut self, pending: PendingRename) {
        self.pending_rename = Some(pending);
    }

    /// Abandon the in-memory document. Files already written stay on disk.
    pub fn cancel_rename(&mut self) {
        if let Some(pending) = self.pending_rename.take() {
            debug!(id = %pending.record_id, "rename cancelled");
        }
    }

    // -- Selection -----------------------------------------------------------

    /// Enter selection mode with `id`. Ignored while already selecting.
    pub fn long_press(&mut self, id: RecordId) -> bool {
        if self.in_selection_mode() || self.record(id).is_none() {
            return false;
        }
        self.selection.insert(id);
        true
    }

    /// Toggle membership in selection mode, otherwise ask for an open.
    pub fn tap(&mut self, id: RecordId) -> TapAction {
        if self.record(id).is_none() {
            return TapAction::Ignored;
        }
        if !self.in_selection_mode() {
            return TapAction::Open(id);
        }
        if !self.selection.remove(&id) {
            self.selection.insert(id);
        }
        TapAction::Toggled
    }

    pub fn clear_selection(&mut self) {
        self.selection.clear();
    }

    /// Remove every selected record. Returns how many were removed.
    pub fn delete_selected(&mut self, now: Instant) -> usize {
        if self.selection.is_empty() {
            return 0;
        }
        let before = self.records.len();
        let selection = std::mem::take(&mut self.selection);
        self.records.retain(|r| !selection.contains(&r.id));
        let removed = before - self.records.len();
        self.notify(format!("{} item(s) deleted", selection.len()), Severity::Success, now);
        removed
    }

    // -- Notifications -------------------------------------------------------

    pub fn notify(&mut self, message: impl Into<String>, severity: Severity, now: Instant) {
        self.notification = Some(Notification::new(message, severity, now));
    }

    pub fn notify_human(&mut self, notice: HumanError, now: Instant) {
        self.notify(notice.message, notice.severity, now);
    }

    pub fn notification_expired(&self, now: Instant) -> bool {
        self.notification
            .as_ref()
            .is_some_and(|n| n.is_expired(now, self.notification_ttl))
    }

    pub fn expire_notification(&mut self, now: Instant) {
        if self.notification_expired(now) {
            self.notification = None;
        }
    }

    pub fn dismiss_notification(&mut self) {
        self.notification = None;
    }

    pub fn set_notification_ttl(&mut self, ttl: Duration) {
        self.notification_ttl = ttl;
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new(&AppConfig::default())
    }
}

/// Somewhere `AppState` lives. Pipeline steps apply transitions through this
/// so no borrow of the state is held across an `.await`.
pub trait StateStore {
    fn update<R>(&mut self, f: impl FnOnce(&mut AppState) -> R) -> R;
}

impl StateStore for AppState {
    fn update<R>(&mut self, f: impl FnOnce(&mut AppState) -> R) -> R {
        f(self)
    }
}

impl StateStore for Signal<AppState> {
    fn update<R>(&mut self, f: impl FnOnce(&mut AppState) -> R) -> R {
        let mut guard = self.write();
        f(&mut *guard)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pdfsnap_core::PhotoFormat;

    fn photo() -> CapturedPhoto {
        CapturedPhoto {
            base64: "AAAA".into(),
            format: PhotoFormat::Jpeg,
        }
    }

    fn state_with(n: usize) -> (AppState, Vec<RecordId>) {
        let mut state = AppState::default();
        let now = Utc::now();
        let ids = (0..n).map(|_| state.add_record(photo(), now)).collect();
        (state, ids)
    }

    #[test]
    fn records_get_unique_ids_newest_first() {
        let (state, ids) = state_with(3);
        assert_eq!(ids[1].0, ids[0].0 + 1);
        assert_eq!(ids[2].0, ids[1].0 + 1);
        assert_eq!(state.records()[0].id, ids[2]);
        assert!(state.records().iter().all(ImageRecord::is_processing));
    }

    #[test]
    fn intake_is_single_flight() {
        let mut state = AppState::default();
        assert!(state.begin_intake());
        assert_eq!(state.mode(), UiMode::Loading);
        assert!(!state.begin_intake());
        state.finish_busy();
        assert!(state.begin_intake());
    }

    #[test]
    fn selection_mode_iff_non_empty_after_any_toggles() {
        let (mut state, ids) = state_with(4);
        // A fixed pseudo-random walk over long presses, taps, and clears.
        let mut seed = 0x2545_f491u32;
        for _ in 0..500 {
            seed ^= seed << 13;
            seed ^= seed >> 17;
            seed ^= seed << 5;
            let id = ids[(seed % 4) as usize];
            match (seed >> 8) % 10 {
                0 => state.clear_selection(),
                1..=3 => {
                    state.long_press(id);
                }
                _ => {
                    state.tap(id);
                }
            }
            assert_eq!(state.in_selection_mode(), !state.selection().is_empty());
            assert_eq!(
                state.mode() == UiMode::Selecting,
                !state.selection().is_empty()
            );
        }
    }

    #[test]
    fn tap_toggles_only_in_selection_mode() {
        let (mut state, ids) = state_with(2);
        assert_eq!(state.tap(ids[0]), TapAction::Open(ids[0]));

        assert!(state.long_press(ids[0]));
        assert_eq!(state.tap(ids[1]), TapAction::Toggled);
        assert!(state.is_selected(ids[1]));

        assert_eq!(state.tap(ids[0]), TapAction::Toggled);
        assert_eq!(state.tap(ids[1]), TapAction::Toggled);
        assert_eq!(state.mode(), UiMode::Idle);
        assert_eq!(state.tap(ids[0]), TapAction::Open(ids[0]));
    }

    #[test]
    fn long_press_ignored_while_selecting() {
        let (mut state, ids) = state_with(2);
        assert!(state.long_press(ids[0]));
        assert!(!state.long_press(ids[1]));
        assert_eq!(state.selection().len(), 1);
    }

    #[test]
    fn delete_selected_removes_and_exits_selection() {
        let (mut state, ids) = state_with(3);
        state.long_press(ids[0]);
        state.tap(ids[2]);

        assert_eq!(state.delete_selected(Instant::now()), 2);
        assert_eq!(state.records().len(), 1);
        assert_eq!(state.records()[0].id, ids[1]);
        assert!(!state.in_selection_mode());
        assert_eq!(state.notification().unwrap().message, "2 item(s) deleted");

        assert_eq!(state.delete_selected(Instant::now()), 0);
    }

    #[test]
    fn delete_record_drops_it_from_selection() {
        let (mut state, ids) = state_with(2);
        state.long_press(ids[0]);
        assert!(state.delete_record(ids[0], Instant::now()));
        assert!(!state.in_selection_mode());
        assert!(!state.delete_record(ids[0], Instant::now()));
    }

    #[test]
    fn attach_document_marks_record_saved() {
        let (mut state, ids) = state_with(1);
        let loc = LocationHandle("file:///docs/a.pdf".into());
        assert!(state.attach_document(ids[0], "a.pdf".into(), loc.clone()));
        let record = state.record(ids[0]).unwrap();
        assert!(!record.is_processing());
        assert_eq!(record.location.as_ref(), Some(&loc));

        assert!(!state.attach_document(RecordId(1), "b.pdf".into(), loc));
    }

    #[test]
    fn notification_expires_after_ttl() {
        let mut state = AppState::default();
        let t0 = Instant::now();
        state.notify("hello", Severity::Info, t0);

        state.expire_notification(t0 + Duration::from_secs(1));
        assert!(state.notification().is_some());

        state.expire_notification(t0 + Duration::from_secs(5));
        assert!(state.notification().is_none());
    }
}
