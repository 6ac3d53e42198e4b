use leptos::prelude::*;

use crate::options::{RestorationOption, RestorationOptions};

/// One toggle card per restoration option, in canonical order.
#[component]
pub fn RestorationControls(
    #[prop(into)] options: Signal<RestorationOptions>,
    #[prop(into)] disabled: Signal<bool>,
    on_toggle: Callback<RestorationOption>,
) -> impl IntoView {
    view! {
        <div class="restoration-controls">
            {RestorationOption::ALL
                .into_iter()
                .map(|option| {
                    let enabled = move || options.with(|o| o.is_enabled(option));
                    view! {
                        <button
                            type="button"
                            class="option-card"
                            class:option-card-on=enabled
                            aria-pressed=move || enabled().to_string()
                            disabled=move || disabled.get()
                            on:click=move |_| on_toggle.run(option)
                        >
                            <span class="option-check">
                                {move || if enabled() { "[x]" } else { "[ ]" }}
                            </span>
                            <span class="option-text">
                                <span class="option-title">{option.title()}</span>
                                <span class="option-description">{option.description()}</span>
                            </span>
                        </button>
                    }
                })
                .collect_view()}
        </div>
    }
}
