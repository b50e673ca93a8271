// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Inbound share intents: images other apps send to PdfSnap.
//
// The host shell (Android intent filter, iOS share extension, desktop command
// line) pushes payloads into the sender; the app drains the receiver through
// the same intake path as a camera capture.

use pdfsnap_core::error::{Result, SnapError};
use pdfsnap_core::types::SharedImage;
use tokio::sync::mpsc;
use tracing::{debug, warn};

/// Create a bounded share-intent channel.
pub fn share_intent_channel(capacity: usize) -> (ShareIntentSender, ShareIntentReceiver) {
    let (tx, rx) = mpsc::channel(capacity.max(1));
    (ShareIntentSender { tx }, ShareIntentReceiver { rx })
}

/// Producer side, cheap to clone into platform callbacks.
#[derive(Debug, Clone)]
pub struct ShareIntentSender {
    tx: mpsc::Sender<SharedImage>,
}

impl ShareIntentSender {
    /// Deliver from a synchronous platform callback. Fails rather than
    /// blocking when the app is not keeping up or has shut down.
    pub fn deliver(&self, image: SharedImage) -> Result<()> {
        debug!(payload_len = image.base64.len(), "share intent received");
        self.tx.try_send(image).map_err(|err| {
            warn!(error = %err, "share intent dropped");
            SnapError::Bridge(format!("share intent dropped: {err}"))
        })
    }

    /// Deliver from async code, waiting for queue space.
    pub async fn send(&self, image: SharedImage) -> Result<()> {
        self.tx
            .send(image)
            .await
            .map_err(|_| SnapError::Bridge("share intent receiver closed".into()))
    }
}

/// Consumer side, owned by the app's intake loop.
#[derive(Debug)]
pub struct ShareIntentReceiver {
    rx: mpsc::Receiver<SharedImage>,
}

impl ShareIntentReceiver {
    /// Next shared image, or `None` once every sender is gone.
    pub async fn recv(&mut self) -> Option<SharedImage> {
        self.rx.recv().await
    }
}
