// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Service layer: bridges the Dioxus UI to the pdfsnap backend crates.
//
// `AppServices` owns the long-lived pieces (config, bridge, share-intent
// channel); `Pipeline` runs the capture → convert → save → open steps
// against whatever holds the `AppState`.

pub mod app_services;
pub mod data_dir;
pub mod pipeline;
