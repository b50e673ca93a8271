// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Central service layer: initialises the platform bridge, loads settings,
// and hands out pipelines to the Dioxus UI.

use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use pdfsnap_bridge::{PlatformBridge, ShareIntentReceiver, ShareIntentSender};
use pdfsnap_core::AppConfig;
use pdfsnap_core::error::Result;
use tracing::{info, warn};

use super::data_dir;
use super::pipeline::Pipeline;

const CONFIG_FILE: &str = "config.json";
const SHARE_INTENT_CAPACITY: usize = 16;

/// Shared application services accessible from all Dioxus components via
/// `use_context::<AppServices>()`.
///
/// All fields are cheaply cloneable (Arc-wrapped) so that the struct can be
/// passed into closures and async blocks without lifetime issues.
#[derive(Clone)]
pub struct AppServices {
    bridge: Arc<dyn PlatformBridge>,
    data_dir: PathBuf,
    config: Arc<Mutex<AppConfig>>,
    share_tx: ShareIntentSender,
    share_rx: Arc<Mutex<Option<ShareIntentReceiver>>>,
}

impl AppServices {
    /// Initialise all services. Call once at app startup.
    pub fn init() -> Result<Self> {
        let dir = data_dir::data_dir();
        std::fs::create_dir_all(data_dir::documents_dir(&dir))?;
        Ok(Self::with_data_dir(dir))
    }

    /// Build services rooted at `dir` without touching the filesystem.
    pub fn with_data_dir(dir: PathBuf) -> Self {
        info!(path = %dir.display(), "initialising app services");

        let config = load_config(&dir).unwrap_or_default();
        let bridge = pdfsnap_bridge::platform_bridge(data_dir::documents_dir(&dir));
        let (share_tx, share_rx) = pdfsnap_bridge::share_intent_channel(SHARE_INTENT_CAPACITY);

        info!(platform = bridge.platform_name(), "app services initialised");

        Self {
            bridge,
            data_dir: dir,
            config: Arc::new(Mutex::new(config)),
            share_tx,
            share_rx: Arc::new(Mutex::new(Some(share_rx))),
        }
    }

    // -- Pipeline ------------------------------------------------------------

    /// A pipeline bound to the bridge and a snapshot of the current config.
    pub fn pipeline(&self) -> Pipeline {
        Pipeline::new(Arc::clone(&self.bridge), self.config())
    }

    // -- Share intents -------------------------------------------------------

    /// Handle for platform callbacks that push shared images in.
    pub fn share_intent_sender(&self) -> ShareIntentSender {
        self.share_tx.clone()
    }

    /// The receiving end, handed out once to the intake loop.
    pub fn take_share_intents(&self) -> Option<ShareIntentReceiver> {
        match self.share_rx.lock() {
            Ok(mut guard) => guard.take(),
            Err(_) => {
                warn!("share intent lock poisoned");
                None
            }
        }
    }

    // -- Config --------------------------------------------------------------

    pub fn config(&self) -> AppConfig {
        match self.config.lock() {
            Ok(guard) => guard.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }

    /// Update and persist the config.
    pub fn save_config(&self, config: &AppConfig) -> Result<()> {
        match self.config.lock() {
            Ok(mut guard) => *guard = config.clone(),
            Err(poisoned) => *poisoned.into_inner() = config.clone(),
        }
        persist_config(&self.data_dir, config)
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }
}

// ---------------------------------------------------------------------------
// Config persistence
// ---------------------------------------------------------------------------

fn load_config(data_dir: &Path) -> Option<AppConfig> {
    let path = data_dir.join(CONFIG_FILE);
    let data = std::fs::read_to_string(&path).ok()?;
    match serde_json::from_str(&data) {
        Ok(config) => Some(config),
        Err(e) => {
            warn!(path = %path.display(), error = %e, "ignoring unreadable config");
            None
        }
    }
}

fn persist_config(data_dir: &Path, config: &AppConfig) -> Result<()> {
    let path = data_dir.join(CONFIG_FILE);
    let json = serde_json::to_string_pretty(config)?;
    std::fs::create_dir_all(data_dir)?;
    std::fs::write(&path, json)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pdfsnap_core::config::CollisionPolicy;

    #[test]
    fn config_round_trips_through_data_dir() {
        let dir = tempfile::tempdir().unwrap();
        let svc = AppServices::with_data_dir(dir.path().to_path_buf());
        assert_eq!(svc.config(), AppConfig::default());

        let config = AppConfig {
            collision_policy: CollisionPolicy::KeepBoth,
            open_after_save: false,
            ..AppConfig::default()
        };
        svc.save_config(&config).unwrap();

        let reloaded = AppServices::with_data_dir(dir.path().to_path_buf());
        assert_eq!(reloaded.config(), config);
    }

    #[test]
    fn corrupt_config_falls_back_to_defaults() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join(CONFIG_FILE), "{ not json").unwrap();
        let svc = AppServices::with_data_dir(dir.path().to_path_buf());
        assert_eq!(svc.config(), AppConfig::default());
    }

    #[test]
    fn share_intents_are_handed_out_once() {
        let dir = tempfile::tempdir().unwrap();
        let svc = AppServices::with_data_dir(dir.path().to_path_buf());
        assert!(svc.take_share_intents().is_some());
        assert!(svc.clone().take_share_intents().is_none());
    }
}
