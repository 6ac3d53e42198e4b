use leptos::html::Div;
use leptos::prelude::*;
use wasm_bindgen_futures::spawn_local;

use crate::upload::{read_source_image, SourceImage, ALLOWED_FILE_TYPES, MAX_FILE_SIZE_MB};

/// Drop zone and file picker for the photo to restore.
#[component]
pub fn ImageUploader(
    /// Called with a validated, fully read image
    on_select: Callback<SourceImage>,
    /// Called with a user-facing message when the file is refused
    on_reject: Callback<String>,
    #[prop(into)] disabled: Signal<bool>,
) -> impl IntoView {
    let drop_zone_el = NodeRef::<Div>::new();
    let (is_over, set_is_over) = signal(false);
    let (is_loading, set_is_loading) = signal(false);
    let file_input_id = "restore-file-input";

    let load_file = move |file: web_sys::File| {
        set_is_loading.set(true);
        spawn_local(async move {
            match read_source_image(file).await {
                Ok(source) => on_select.run(source),
                Err(e) => on_reject.run(e),
            }
            let _ = set_is_loading.try_set(false);
        });
    };

    let on_drop = move |ev: web_sys::DragEvent| {
        ev.prevent_default();
        set_is_over.set(false);
        if disabled.get_untracked() {
            return;
        }

        if let Some(dt) = ev.data_transfer() {
            if let Some(files) = dt.files() {
                if let Some(file) = files.get(0) {
                    load_file(file);
                }
            }
        }
    };

    let on_input_change = move |ev: web_sys::Event| {
        let input: web_sys::HtmlInputElement = event_target(&ev);
        if let Some(files) = input.files() {
            if let Some(file) = files.get(0) {
                load_file(file);
            }
        }
        // Allow picking the same file again after a rejection
        input.set_value("");
    };

    view! {
        <div
            node_ref=drop_zone_el
            class="drop-zone"
            class:drop-zone-active=move || is_over.get()
            class:drop-zone-loading=move || is_loading.get()
            on:dragover=move |ev: web_sys::DragEvent| {
                ev.prevent_default();
                if !disabled.get_untracked() {
                    set_is_over.set(true);
                }
            }
            on:dragleave=move |_| set_is_over.set(false)
            on:drop=on_drop
        >
            <Show
                when=move || is_loading.get()
                fallback=move || view! {
                    <div class="drop-zone-content">
                        <p class="drop-main">"Drop an old photo here"</p>
                        <p class="drop-hint">"or"</p>
                        <label for=file_input_id class="btn btn-secondary">
                            "Browse Files"
                        </label>
                        <input
                            type="file"
                            id=file_input_id
                            accept=ALLOWED_FILE_TYPES.join(",")
                            style="display: none"
                            disabled=move || disabled.get()
                            on:change=on_input_change
                        />
                        <p class="drop-formats">
                            {format!("JPG, PNG or WEBP, up to {}MB", MAX_FILE_SIZE_MB)}
                        </p>
                    </div>
                }
            >
                <div class="drop-zone-loading-content">
                    <div class="spinner"></div>
                    <p>"Loading image..."</p>
                </div>
            </Show>
        </div>
    }
}
