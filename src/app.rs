use leptos::prelude::*;

use crate::pages::restore::RestorePage;

#[component]
pub fn App() -> impl IntoView {
    view! {
        <div class="app-layout">
            <style>{include_str!("app.css")}</style>
            <header class="app-header">
                <h1>"Photo Restorer"</h1>
                <p class="app-tagline">"Repair, colorize and sharpen old photos with Gemini"</p>
            </header>
            <main class="content">
                <RestorePage />
            </main>
            <footer class="app-footer">
                "Photos are sent to the Gemini API only when you press Restore."
            </footer>
        </div>
    }
}
