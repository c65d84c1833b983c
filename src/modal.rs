use dioxus::prelude::*;
#[cfg(target_arch = "wasm32")]
use dioxus::web::WebEventExt;
#[cfg(target_arch = "wasm32")]
use wasm_bindgen::JsCast;

use crate::catalog::Catalog;
use crate::page::navigate_to;

pub const MODAL_ID: &str = "ctfModal";

pub fn is_backdrop_target(target_id: Option<&str>) -> bool {
    target_id == Some(MODAL_ID)
}

#[cfg(target_arch = "wasm32")]
fn click_target_id(event: &MouseEvent) -> Option<String> {
    let web_event = event.data.as_ref().as_web_event();
    web_event
        .target()
        .and_then(|target| target.dyn_into::<web_sys::Element>().ok())
        .map(|element| element.id())
}

#[cfg(not(target_arch = "wasm32"))]
fn click_target_id(_event: &MouseEvent) -> Option<String> {
    None
}

#[component]
pub fn CtfModal(catalog: Catalog, open: Signal<bool>) -> Element {
    let mut open = open;
    let class = if open() { "modal open" } else { "modal" };

    rsx! {
        div {
            id: MODAL_ID,
            class: "{class}",
            role: "dialog",
            aria_modal: "true",
            aria_hidden: if open() { "false" } else { "true" },
            onclick: move |event: MouseEvent| {
                if is_backdrop_target(click_target_id(&event).as_deref()) {
                    open.set(false);
                }
            },
            div { class: "modal-content",
                button {
                    r#type: "button",
                    class: "close-modal",
                    aria_label: "Close",
                    onclick: move |_| open.set(false),
                    "×"
                }
                h2 { class: "modal-title", "My CTFs" }
                div { id: "ctfGrid", class: "ctf-grid",
                    for event in catalog.participations().iter() {
                        div {
                            key: "{event.link}",
                            class: "ctf-card",
                            onclick: move |_| navigate_to(event.link),
                            h3 { "{event.name}" }
                            p { "{event.solve_summary}" }
                            p { class: "status", "{event.status}" }
                        }
                    }
                }
            }
        }
    }
}
