use dioxus::prelude::*;

const PROMPT_USER: &str = "syndro@ctf";

#[component]
pub fn Panel(title: String, command: Option<String>, class: Option<String>, children: Element) -> Element {
    let class = match class {
        Some(extra) => format!("panel {extra}"),
        None => "panel".to_string(),
    };
    rsx! {
        section { class: "{class}", aria_label: "{title}",
            PanelHeader { title: title.clone() }
            if let Some(command) = command {
                Prompt { command }
            }
            {children}
        }
    }
}

#[component]
pub fn PanelHeader(title: String) -> Element {
    rsx! {
        div { class: "panel-header",
            span { class: "dot dot-red", "●" }
            span { class: "dot dot-yellow", "●" }
            span { class: "dot dot-green", "●" }
            h2 { class: "panel-title", "{title}" }
        }
    }
}

#[component]
pub fn Prompt(command: String, path: Option<String>) -> Element {
    let path = path.unwrap_or_else(|| "~".to_string());
    rsx! {
        p { class: "prompt",
            span { class: "prompt-user", "{PROMPT_USER}" }
            span { class: "prompt-sep", ":" }
            span { class: "prompt-path", "{path}" }
            span { class: "prompt-sep", "$ " }
            span { class: "prompt-command", "{command}" }
            span { class: "prompt-cursor", "█" }
        }
    }
}
