// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Home page: capture buttons, the photo list, selection bar, and the
// rename prompt.

use std::time::{Duration, Instant};

use dioxus::prelude::*;

use pdfsnap_core::types::{CaptureSource, Severity};

use crate::services::app_services::AppServices;
use crate::state::{AppState, UiMode};

const NOTICE_TICK: Duration = Duration::from_millis(500);

#[component]
pub fn Home() -> Element {
    let mut state = use_context::<Signal<AppState>>();
    let svc = use_context::<AppServices>();

    // Clear the current notice once it has been up long enough. `peek` keeps
    // the loop from subscribing to the state and restarting on every change.
    let _ticker = use_resource(move || async move {
        loop {
            tokio::time::sleep(NOTICE_TICK).await;
            let now = Instant::now();
            let expired = state.peek().notification_expired(now);
            if expired {
                state.write().expire_notification(now);
            }
        }
    });

    let mode = state.read().mode();
    let can_intake = state.read().can_start_intake();
    let selected_count = state.read().selection().len();

    rsx! {
        div {
            h1 { "PdfSnap" }
            p { style: "color: #666;", "Turn a photo into a PDF the size of the picture" }

            // Intake
            div { style: "display: grid; grid-template-columns: 1fr 1fr; gap: 12px; margin: 24px 0;",
                CaptureButton { source: CaptureSource::Camera, label: "Take Photo", icon: "\u{1F4F7}", enabled: can_intake }
                CaptureButton { source: CaptureSource::Gallery, label: "Choose Photo", icon: "\u{1F5BC}", enabled: can_intake }
            }

            if mode == UiMode::Loading {
                p { style: "color: #007aff; font-size: 14px;", "Working..." }
            }

            if let Some(notice) = state.read().notification() {
                {
                    let color = match notice.severity {
                        Severity::Success => "#34c759",
                        Severity::Info => "#007aff",
                        Severity::Error => "#ff3b30",
                    };
                    let message = notice.message.clone();
                    rsx! {
                        div {
                            style: "padding: 12px; margin: 8px 0; border-left: 4px solid {color}; background: #f7f7f7; border-radius: 4px; font-size: 14px; cursor: pointer;",
                            onclick: move |_| state.write().dismiss_notification(),
                            "{message}"
                        }
                    }
                }
            }

            // Selection bar
            if selected_count > 0 {
                div { style: "display: flex; justify-content: space-between; align-items: center; padding: 8px 12px; margin: 8px 0; background: #eef5ff; border-radius: 8px;",
                    span { "{selected_count} selected" }
                    div { style: "display: flex; gap: 8px;",
                        button {
                            style: "padding: 6px 12px; border-radius: 6px; border: 1px solid #ccc; background: white;",
                            onclick: move |_| state.write().clear_selection(),
                            "Cancel"
                        }
                        button {
                            style: "padding: 6px 12px; border-radius: 6px; border: none; background: #ff3b30; color: white;",
                            onclick: move |_| {
                                let removed = state.write().delete_selected(Instant::now());
                                tracing::info!(removed, "selected photos deleted");
                            },
                            "Delete"
                        }
                    }
                }
            }

            // Photo list
            h2 { "Photos" }
            if state.read().records().is_empty() {
                p { style: "color: #888;", "No photos yet. Take one or choose one from your gallery." }
            } else {
                p { style: "color: #888; font-size: 12px;", "Tap to open. Right-click or long-press to select." }
            }
            for record in state.read().records().iter() {
                {
                    let id = record.id;
                    let selected = state.read().is_selected(id);
                    let border = if selected { "2px solid #007aff" } else { "1px solid #e0e0e0" };
                    let title = record
                        .pdf_filename
                        .clone()
                        .unwrap_or_else(|| "Processing...".to_string());
                    let captured = record.captured_at.format("%Y-%m-%d %H:%M:%S").to_string();
                    let format = record.format.tag();
                    let svc = svc.clone();
                    rsx! {
                        div {
                            key: "{id}",
                            style: "padding: 12px; margin: 8px 0; border: {border}; border-radius: 8px; cursor: pointer;",
                            onclick: move |_| {
                                if let Some(outcome) = svc.pipeline().tap_record(&mut state, id) {
                                    tracing::debug!(%id, ?outcome, "open dispatched");
                                }
                            },
                            oncontextmenu: move |evt| {
                                evt.prevent_default();
                                state.write().long_press(id);
                            },
                            div { style: "display: flex; justify-content: space-between; align-items: center;",
                                div {
                                    strong { "{title}" }
                                    p { style: "color: #666; font-size: 12px; margin: 4px 0;", "{captured} ({format})" }
                                }
                                button {
                                    style: "padding: 4px 10px; border-radius: 6px; border: 1px solid #ccc; background: white; font-size: 12px;",
                                    onclick: move |evt| {
                                        evt.stop_propagation();
                                        state.write().delete_record(id, Instant::now());
                                    },
                                    "Remove"
                                }
                            }
                        }
                    }
                }
            }

            if let Some(pending) = state.read().pending_rename() {
                RenamePrompt {
                    text: pending.filename_text.clone(),
                    busy: state.read().is_busy(),
                }
            }
        }
    }
}

#[component]
fn CaptureButton(source: CaptureSource, label: &'static str, icon: &'static str, enabled: bool) -> Element {
    let state = use_context::<Signal<AppState>>();
    let svc = use_context::<AppServices>();
    let opacity = if enabled { "1" } else { "0.5" };

    rsx! {
        button {
            style: "display: flex; flex-direction: column; align-items: center; justify-content: center; padding: 24px 16px; border: 1px solid #e0e0e0; border-radius: 12px; color: #333; background: white; opacity: {opacity};",
            disabled: !enabled,
            onclick: move |_| {
                let pipeline = svc.pipeline();
                spawn(async move {
                    let mut store = state;
                    pipeline.capture(&mut store, source).await;
                });
            },
            span { style: "font-size: 32px; margin-bottom: 8px;", "{icon}" }
            span { style: "font-size: 14px;", "{label}" }
        }
    }
}

/// Modal asking for the PDF's filename before it is saved.
#[component]
fn RenamePrompt(text: String, busy: bool) -> Element {
    let mut state = use_context::<Signal<AppState>>();
    let svc = use_context::<AppServices>();

    rsx! {
        div { style: "position: fixed; inset: 0; background: rgba(0, 0, 0, 0.4); display: flex; align-items: center; justify-content: center;",
            div { style: "background: white; border-radius: 12px; padding: 20px; width: 90%; max-width: 360px;",
                h3 { style: "margin-top: 0;", "Name your PDF" }
                input {
                    style: "width: 100%; padding: 8px; border: 1px solid #ccc; border-radius: 6px; box-sizing: border-box;",
                    value: "{text}",
                    oninput: move |evt| state.write().set_rename_text(evt.value()),
                }
                div { style: "display: flex; justify-content: flex-end; gap: 8px; margin-top: 16px;",
                    button {
                        style: "padding: 8px 16px; border-radius: 8px; border: 1px solid #ccc; background: white;",
                        disabled: busy,
                        onclick: {
                            let svc = svc.clone();
                            move |_| svc.pipeline().cancel_rename(&mut state)
                        },
                        "Cancel"
                    }
                    button {
                        style: "padding: 8px 16px; border-radius: 8px; border: none; background: #007aff; color: white;",
                        disabled: busy,
                        onclick: {
                            let svc = svc.clone();
                            move |_| {
                                let pipeline = svc.pipeline();
                                spawn(async move {
                                    let mut store = state;
                                    pipeline.confirm_rename(&mut store).await;
                                });
                            }
                        },
                        "Save"
                    }
                }
            }
        }
    }
}
