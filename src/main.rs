mod app;
mod commands;
mod components;
mod lifecycle;
mod options;
mod pages;
mod slider;
mod upload;

use app::App;

fn main() {
    leptos::mount::mount_to_body(App);
}
