mod catalog;
mod config;
mod hooks;
mod modal;
mod page;
mod panel;
mod particles;
mod reveal;
mod storage;
mod theme;
mod visitors;
mod widgets;

fn main() {
    // Set the persisted theme before the first frame renders.
    theme::apply_theme(theme::load_theme(&storage::BrowserStore));
    dioxus::launch(page::App);
}
