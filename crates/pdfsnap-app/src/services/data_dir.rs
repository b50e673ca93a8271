// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Platform-aware data directory resolution.

use std::path::{Path, PathBuf};

/// Directory under the data dir that backs `Directory::Documents`.
pub const DOCUMENTS_SUBDIR: &str = "Documents";

/// Return the application data directory, creating it if needed.
///
/// On desktop this uses a conventional location. On mobile the platform
/// bridge owns the documents directory instead.
pub fn data_dir() -> PathBuf {
    let dir = dirs_fallback().join("pdfsnap");
    std::fs::create_dir_all(&dir).ok();
    dir
}

/// Where saved PDFs go for a given data dir.
pub fn documents_dir(data_dir: &Path) -> PathBuf {
    data_dir.join(DOCUMENTS_SUBDIR)
}

fn dirs_fallback() -> PathBuf {
    // Try XDG data dir, then fallback to home
    if let Ok(xdg) = std::env::var("XDG_DATA_HOME") {
        return PathBuf::from(xdg);
    }
    if let Ok(home) = std::env::var("HOME") {
        return PathBuf::from(home).join(".local").join("share");
    }
    std::env::temp_dir()
}
