// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Application configuration.

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// What to do when the resolved filename already exists in the documents directory.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum CollisionPolicy {
    /// Let the storage write replace the existing file.
    #[default]
    Overwrite,
    /// Keep the old file and save as `name (1).pdf`, `name (2).pdf`, ...
    KeepBoth,
}

/// Persistent application settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// JPEG quality requested from the camera plugin (0-100).
    pub capture_quality: u8,
    /// Resolution assumed when converting pixels to millimetres.
    pub assumed_dpi: f32,
    /// Bytes handed to the base64 encoder per step when preparing a save.
    pub transport_chunk_size: usize,
    /// How long a notice stays on screen.
    pub notification_duration_secs: u64,
    /// Open the share sheet as soon as a PDF has been saved.
    pub open_after_save: bool,
    pub collision_policy: CollisionPolicy,
}

impl AppConfig {
    pub fn notification_duration(&self) -> Duration {
        Duration::from_secs(self.notification_duration_secs)
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            capture_quality: 90,
            assumed_dpi: 96.0,
            transport_chunk_size: 8192,
            notification_duration_secs: 5,
            open_after_save: true,
            collision_policy: CollisionPolicy::Overwrite,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_json_fills_defaults() {
        let cfg: AppConfig =
            serde_json::from_str(r#"{ "collision_policy": "KeepBoth" }"#).unwrap();
        assert_eq!(cfg.collision_policy, CollisionPolicy::KeepBoth);
        assert_eq!(cfg.transport_chunk_size, 8192);
        assert_eq!(cfg.notification_duration(), Duration::from_secs(5));
    }
}
