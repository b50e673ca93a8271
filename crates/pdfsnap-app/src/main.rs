// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// PdfSnap: photo to PDF, saved and shared
//
// Entry point. Initialises logging, backend services, app state, and launches
// the Dioxus UI.

mod pages;
mod services;
mod state;

use std::path::Path;
use std::time::Duration;

use dioxus::prelude::*;

use pages::home::Home;
use pages::settings::Settings;

use services::app_services::AppServices;

/// How often a shared image that arrived mid-pipeline is offered again.
const SHARE_RETRY_INTERVAL: Duration = Duration::from_millis(250);

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    tracing::info!("PdfSnap starting");

    dioxus::launch(app);
}

/// Top-level route enum.
#[derive(Debug, Clone, Routable, PartialEq)]
enum Route {
    #[layout(TabLayout)]
    #[route("/")]
    Home {},
    #[route("/settings")]
    Settings {},
}

/// Root component.
fn app() -> Element {
    let svc = use_hook(|| match AppServices::init() {
        Ok(s) => {
            tracing::info!("backend services initialised");
            s
        }
        Err(e) => {
            tracing::error!(error = %e, "data directory unavailable, using temp dir");
            AppServices::with_data_dir(std::env::temp_dir().join("pdfsnap"))
        }
    });

    // Provide services and state as context for all pages
    use_context_provider(|| svc.clone());
    let config = svc.config();
    let state = use_context_provider(|| Signal::new(state::AppState::new(&config)));

    // Drain images shared in by other apps through the normal intake path
    let svc_intents = svc.clone();
    use_hook(move || {
        let Some(mut inbox) = svc_intents.take_share_intents() else {
            return;
        };
        spawn(async move {
            let mut store = state;
            while let Some(mut shared) = inbox.recv().await {
                loop {
                    let pipeline = svc_intents.pipeline();
                    match pipeline.receive_shared(&mut store, shared).await {
                        Ok(()) => break,
                        Err(returned) => {
                            shared = returned;
                            tokio::time::sleep(SHARE_RETRY_INTERVAL).await;
                        }
                    }
                }
            }
        });
    });

    // Image paths on the command line arrive as share intents
    let sender = svc.share_intent_sender();
    use_hook(move || {
        spawn(async move {
            for arg in std::env::args().skip(1) {
                match pdfsnap_bridge::desktop::shared_image_from_path(Path::new(&arg)) {
                    Ok(image) => {
                        if let Err(e) = sender.send(image).await {
                            tracing::warn!(path = %arg, error = %e, "could not queue image");
                        }
                    }
                    Err(e) => tracing::warn!(path = %arg, error = %e, "skipping argument"),
                }
            }
        });
    });

    rsx! {
        Router::<Route> {}
    }
}

/// Persistent bottom tab layout wrapping all pages.
#[component]
fn TabLayout() -> Element {
    rsx! {
        div { class: "app-container",
            style: "display: flex; flex-direction: column; height: 100vh; font-family: system-ui, -apple-system, sans-serif;",

            div { class: "page-content",
                style: "flex: 1; overflow-y: auto; padding: 16px;",
                Outlet::<Route> {}
            }

            nav { class: "tab-bar",
                style: "display: flex; justify-content: space-around; padding: 8px 0; border-top: 1px solid #e0e0e0; background: #fafafa;",
                TabButton { to: Route::Home {}, label: "Photos", icon: "\u{1F4F7}" }
                TabButton { to: Route::Settings {}, label: "Settings", icon: "\u{2699}" }
            }
        }
    }
}

#[component]
fn TabButton(to: Route, label: &'static str, icon: &'static str) -> Element {
    rsx! {
        Link { to: to,
            style: "display: flex; flex-direction: column; align-items: center; text-decoration: none; color: #333; font-size: 12px;",
            span { style: "font-size: 20px;", "{icon}" }
            span { "{label}" }
        }
    }
}
