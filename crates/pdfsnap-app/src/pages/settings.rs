// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Settings page: persistent app configuration.

use dioxus::prelude::*;

use pdfsnap_core::config::CollisionPolicy;

use crate::services::app_services::AppServices;
use crate::services::data_dir;
use crate::state::AppState;

const VERSION: &str = env!("CARGO_PKG_VERSION");

#[component]
pub fn Settings() -> Element {
    let mut state = use_context::<Signal<AppState>>();
    let svc = use_context::<AppServices>();
    let mut draft = use_signal(|| svc.config());
    let mut save_msg = use_signal(|| Option::<String>::None);
    let documents = data_dir::documents_dir(svc.data_dir()).display().to_string();

    rsx! {
        div {
            h1 { "Settings" }

            section { style: "margin: 16px 0;",
                h3 { "Capture" }
                div { style: "display: flex; justify-content: space-between; align-items: center; padding: 12px 0; border-bottom: 1px solid #f0f0f0;",
                    span { "Photo quality (0-100)" }
                    input {
                        r#type: "number",
                        style: "width: 80px; padding: 4px 8px; border: 1px solid #ccc; border-radius: 4px; text-align: right;",
                        value: "{draft.read().capture_quality}",
                        onchange: move |evt| {
                            if let Ok(quality) = evt.value().parse::<u8>() {
                                draft.write().capture_quality = quality.min(100);
                            }
                        },
                    }
                }
            }

            section { style: "margin: 16px 0;",
                h3 { "Saving" }
                SettingRow {
                    label: "Open PDF after saving",
                    checked: draft.read().open_after_save,
                    on_toggle: move |v: bool| { draft.write().open_after_save = v; },
                }
                SettingRow {
                    label: "Keep both files when a name is taken",
                    checked: draft.read().collision_policy == CollisionPolicy::KeepBoth,
                    on_toggle: move |v: bool| {
                        draft.write().collision_policy = if v {
                            CollisionPolicy::KeepBoth
                        } else {
                            CollisionPolicy::Overwrite
                        };
                    },
                }
                p { style: "color: #888; font-size: 12px;", "PDFs are saved to {documents}" }
            }

            section { style: "margin: 16px 0;",
                h3 { "Notices" }
                div { style: "display: flex; justify-content: space-between; align-items: center; padding: 12px 0; border-bottom: 1px solid #f0f0f0;",
                    span { "Seconds on screen" }
                    input {
                        r#type: "number",
                        style: "width: 80px; padding: 4px 8px; border: 1px solid #ccc; border-radius: 4px; text-align: right;",
                        value: "{draft.read().notification_duration_secs}",
                        onchange: move |evt| {
                            if let Ok(secs) = evt.value().parse::<u64>() {
                                draft.write().notification_duration_secs = secs.max(1);
                            }
                        },
                    }
                }
            }

            button {
                style: "width: 100%; padding: 12px; border-radius: 8px; border: none; background: #007aff; color: white; font-size: 16px; margin-top: 8px;",
                onclick: {
                    let svc = svc.clone();
                    move |_| {
                        let config = draft.read().clone();
                        match svc.save_config(&config) {
                            Ok(()) => {
                                tracing::info!("settings saved");
                                state.write().set_notification_ttl(config.notification_duration());
                                save_msg.set(Some("Settings saved.".into()));
                            }
                            Err(e) => {
                                tracing::error!(error = %e, "failed to save settings");
                                save_msg.set(Some(format!("Save failed: {e}")));
                            }
                        }
                    }
                },
                "Save Settings"
            }
            if let Some(ref msg) = *save_msg.read() {
                p { style: "color: #34c759; font-size: 14px; text-align: center; margin-top: 8px;",
                    "{msg}"
                }
            }

            section { style: "margin: 24px 0;",
                h3 { "About" }
                p { style: "color: #666; font-size: 14px;",
                    "PdfSnap v{VERSION}"
                    br {}
                    "Photo to single-page PDF"
                    br {}
                    "PMPL-1.0-or-later"
                }
            }
        }
    }
}

#[component]
fn SettingRow(label: &'static str, checked: bool, on_toggle: EventHandler<bool>) -> Element {
    rsx! {
        div { style: "display: flex; justify-content: space-between; align-items: center; padding: 12px 0; border-bottom: 1px solid #f0f0f0;",
            span { "{label}" }
            input {
                r#type: "checkbox",
                checked: checked,
                onchange: move |evt| {
                    on_toggle.call(evt.checked());
                },
            }
        }
    }
}
