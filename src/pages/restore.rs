use leptos::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::spawn_local;

use crate::commands::{self, CredentialStatus};
use crate::components::api_key_form::ApiKeyForm;
use crate::components::image_comparison::ImageComparison;
use crate::components::image_uploader::ImageUploader;
use crate::components::restoration_controls::RestorationControls;
use crate::lifecycle::{Phase, RestorationSession};
use crate::options::{RestorationOption, RestorationOptions, OPTIONS_PREFERENCE_KEY};
use crate::upload::{release_preview, SourceImage};

/// Which screen is shown. Coarser than `Phase` so the editor is not rebuilt
/// when a request starts or fails.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Stage {
    Upload,
    Edit,
    Result,
}

impl From<Phase> for Stage {
    fn from(phase: Phase) -> Self {
        match phase {
            Phase::Idle => Stage::Upload,
            Phase::Ready | Phase::InFlight => Stage::Edit,
            Phase::Completed => Stage::Result,
        }
    }
}

#[component]
pub fn RestorePage() -> impl IntoView {
    let session = RwSignal::new(RestorationSession::default());
    let (credential, set_credential) = signal::<Option<CredentialStatus>>(None);

    let stage = Memo::new(move |_| Stage::from(session.with(|s| s.phase())));
    let busy = Signal::derive(move || session.with(|s| s.is_in_flight()));
    let options = Signal::derive(move || session.with(|s| s.options()));
    let error = Memo::new(move |_| session.with(|s| s.error().map(str::to_string)));

    // Restore the last used options
    Effect::new(move |_| {
        spawn_local(async move {
            match commands::get_preference(OPTIONS_PREFERENCE_KEY).await {
                Ok(stored) => {
                    let opts = RestorationOptions::from_preference(stored.as_deref());
                    let _ = session.try_update(|s| {
                        let _ = s.set_options(opts);
                    });
                }
                Err(e) => {
                    web_sys::console::warn_1(
                        &format!("Failed to load restoration options: {}", e).into(),
                    );
                }
            }
        });
    });

    let refresh_credential = Callback::new(move |_: ()| {
        spawn_local(async move {
            match commands::credential_status().await {
                Ok(status) => {
                    let _ = set_credential.try_set(Some(status));
                }
                Err(e) => {
                    web_sys::console::error_1(
                        &format!("Failed to check credentials: {}", e).into(),
                    );
                }
            }
        });
    });

    Effect::new(move |_| refresh_credential.run(()));

    let on_select = Callback::new(move |source: SourceImage| {
        let incoming_url = source.preview_url.clone();
        session.update(|s| match s.select_image(source) {
            Ok(Some(previous)) => release_preview(&previous.preview_url),
            Ok(None) => {}
            Err(_) => release_preview(&incoming_url),
        });
    });

    let on_reject = Callback::new(move |message: String| {
        session.update(|s| s.reject_selection(message));
    });

    let on_toggle = Callback::new(move |option: RestorationOption| {
        let mut toggled = false;
        session.update(|s| toggled = s.toggle(option).is_ok());
        if !toggled {
            return;
        }
        let value = session.with_untracked(|s| s.options().to_preference());
        spawn_local(async move {
            if let Err(e) = commands::set_preference(OPTIONS_PREFERENCE_KEY, &value).await {
                web_sys::console::warn_1(
                    &format!("Failed to save restoration options: {}", e).into(),
                );
            }
        });
    });

    let on_restore = move |_| {
        let mut ticket = None;
        session.update(|s| ticket = s.start().ok());
        let Some(ticket) = ticket else {
            return;
        };
        spawn_local(async move {
            let outcome = commands::restore_photo(&ticket).await;
            let _ = session.try_update(|s| {
                let _ = s.finish(outcome);
            });
        });
    };

    let on_adjust = move |_| {
        session.update(|s| {
            let _ = s.adjust_settings();
        });
    };

    let on_reset = move |_| {
        session.update(|s| {
            if let Ok(Some(previous)) = s.reset() {
                release_preview(&previous.preview_url);
            }
        });
    };

    let on_download = move |_| {
        let Some(image) = session.with_untracked(|s| s.result().cloned()) else {
            return;
        };
        if let Err(e) = download_data_url(&image.data_url(), &image.file_name) {
            web_sys::console::error_1(&format!("Download failed: {}", e).into());
        }
    };

    view! {
        <div class="page restore-page">
            <style>{include_str!("restore.css")}</style>

            <Show when=move || credential.with(|c| matches!(c, Some(c) if !c.configured))>
                <div class="credential-notice">
                    <p>
                        "No Gemini API key found. Set GEMINI_API_KEY or store a key below."
                    </p>
                    <ApiKeyForm on_change=refresh_credential />
                </div>
            </Show>

            {move || {
                credential.get().filter(|c| c.configured).map(|c| {
                    let label = match c.source.as_deref() {
                        Some("environment") => "API key loaded from environment",
                        _ => "API key loaded from keychain",
                    };
                    view! { <p class="credential-source">{label}</p> }
                })
            }}

            {move || {
                error.get().map(|message| view! {
                    <div class="restore-error" role="alert">{message}</div>
                })
            }}

            {move || match stage.get() {
                Stage::Upload => view! {
                    <ImageUploader on_select=on_select on_reject=on_reject disabled=busy />
                }.into_any(),

                Stage::Edit => {
                    let preview = move || {
                        session.with(|s| s.source().map(|src| src.preview_url.clone()))
                    };
                    let file_name = move || {
                        session.with(|s| s.source().map(|src| src.file_name.clone()))
                    };
                    view! {
                        <div class="restore-editor">
                            <div class="restore-preview">
                                <img src=preview alt="Selected photo" />
                                <Show when=move || busy.get()>
                                    <div class="restore-overlay">
                                        <div class="spinner"></div>
                                        <p>"Restoring photo..."</p>
                                    </div>
                                </Show>
                                <p class="restore-file-name">{file_name}</p>
                            </div>
                            <div class="restore-sidebar">
                                <h2>"Restoration Options"</h2>
                                <RestorationControls
                                    options=options
                                    disabled=busy
                                    on_toggle=on_toggle
                                />
                                <div class="restore-actions">
                                    <button
                                        class="btn btn-primary"
                                        on:click=on_restore
                                        disabled=move || busy.get()
                                    >
                                        {move || if busy.get() { "Restoring..." } else { "Restore Photo" }}
                                    </button>
                                    <button
                                        class="btn btn-secondary"
                                        on:click=on_reset
                                        disabled=move || busy.get()
                                    >
                                        "Choose Another Photo"
                                    </button>
                                </div>
                            </div>
                        </div>
                    }.into_any()
                }

                Stage::Result => {
                    let (before, after) = session.with_untracked(|s| {
                        (
                            s.source().map(|src| src.preview_url.clone()).unwrap_or_default(),
                            s.result().map(|r| r.data_url()).unwrap_or_default(),
                        )
                    });
                    view! {
                        <div class="restore-result">
                            <ImageComparison before_src=before after_src=after />
                            <div class="restore-actions">
                                <button class="btn btn-primary" on:click=on_download>
                                    "Download"
                                </button>
                                <button class="btn btn-secondary" on:click=on_adjust>
                                    "Adjust Settings"
                                </button>
                                <button class="btn btn-secondary" on:click=on_reset>
                                    "Start Over"
                                </button>
                            </div>
                        </div>
                    }.into_any()
                }
            }}
        </div>
    }
}

/// Save a data URL through a temporary anchor element.
fn download_data_url(href: &str, file_name: &str) -> Result<(), String> {
    let document = web_sys::window()
        .and_then(|w| w.document())
        .ok_or("No document available")?;
    let body = document.body().ok_or("No document body")?;

    let anchor: web_sys::HtmlAnchorElement = document
        .create_element("a")
        .map_err(|e| format!("{:?}", e))?
        .dyn_into()
        .map_err(|_| "Failed to create download link".to_string())?;
    anchor.set_href(href);
    anchor.set_download(file_name);
    anchor.set_attribute("style", "display: none").map_err(|e| format!("{:?}", e))?;

    body.append_child(&anchor).map_err(|e| format!("{:?}", e))?;
    anchor.click();
    anchor.remove();
    Ok(())
}
