use dioxus::prelude::*;

use crate::hooks::{use_interval, use_window_listener};

pub fn scroll_progress(scroll_top: f64, scroll_height: f64, client_height: f64) -> f64 {
    let scrollable = scroll_height - client_height;
    if scrollable <= 0.0 {
        return 0.0;
    }
    (scroll_top * 100.0 / scrollable).clamp(0.0, 100.0)
}

#[cfg(target_arch = "wasm32")]
fn read_scroll_progress() -> f64 {
    let Some(document) = web_sys::window().and_then(|window| window.document()) else {
        return 0.0;
    };
    let Some(root) = document.document_element() else {
        return 0.0;
    };
    let body_top = document
        .body()
        .map(|body| body.scroll_top())
        .unwrap_or(0);
    let scroll_top = if body_top > 0 {
        body_top
    } else {
        root.scroll_top()
    };
    scroll_progress(
        scroll_top as f64,
        root.scroll_height() as f64,
        root.client_height() as f64,
    )
}

#[cfg(not(target_arch = "wasm32"))]
fn read_scroll_progress() -> f64 {
    0.0
}

#[component]
pub fn ScrollProgress() -> Element {
    let mut progress = use_signal(|| 0.0f64);
    use_window_listener("scroll", move || progress.set(read_scroll_progress()));

    rsx! {
        div { class: "scroll-progress", style: "width: {progress}%" }
    }
}

pub fn format_clock(hours: u32, minutes: u32, seconds: u32) -> String {
    format!("{:02}:{:02}:{:02}", hours % 24, minutes, seconds)
}

#[cfg(target_arch = "wasm32")]
pub fn clock_now() -> String {
    let date = js_sys::Date::new_0();
    format_clock(date.get_hours(), date.get_minutes(), date.get_seconds())
}

#[cfg(not(target_arch = "wasm32"))]
pub fn clock_now() -> String {
    format_clock(0, 0, 0)
}

#[component]
pub fn LiveClock() -> Element {
    let mut time = use_signal(clock_now);
    use_interval(1000, move || time.set(clock_now()));

    rsx! {
        span { id: "liveClock", class: "live-clock", "{time}" }
    }
}

pub fn matches_query(text: &str, query: &str) -> bool {
    let query = query.to_lowercase();
    query.is_empty() || text.to_lowercase().contains(&query)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn scroll_progress_is_percentage_of_overflow() {
        assert_eq!(scroll_progress(50.0, 1050.0, 550.0), 10.0);
        assert_eq!(scroll_progress(500.0, 1050.0, 550.0), 100.0);
        assert_eq!(scroll_progress(0.0, 1050.0, 550.0), 0.0);
    }

    #[test]
    fn scroll_progress_without_overflow_is_zero() {
        assert_eq!(scroll_progress(0.0, 800.0, 800.0), 0.0);
        assert_eq!(scroll_progress(30.0, 600.0, 800.0), 0.0);
    }

    #[test]
    fn scroll_progress_clamps_overscroll() {
        assert_eq!(scroll_progress(700.0, 1050.0, 550.0), 100.0);
        assert_eq!(scroll_progress(-20.0, 1050.0, 550.0), 0.0);
    }

    #[test]
    fn clock_is_zero_padded_24_hour() {
        assert_eq!(format_clock(7, 5, 9), "07:05:09");
        assert_eq!(format_clock(23, 59, 59), "23:59:59");
        assert_eq!(format_clock(24, 0, 0), "00:00:00");
    }

    #[test]
    fn query_matches_case_insensitively() {
        let text = "WEB Trust Fall Flag: PCTF{auth_****} Click for writeup";
        assert!(matches_query(text, "auth"));
        assert!(matches_query(text, "AUTH"));
        assert!(matches_query(text, "trust fall"));
        assert!(!matches_query(text, "metadata"));
    }

    #[test]
    fn empty_query_matches_everything() {
        assert!(matches_query("anything", ""));
    }

    #[test]
    fn query_whitespace_is_literal() {
        assert!(!matches_query("Secure Auth", " auth "));
        assert!(matches_query("Secure Auth", "e a"));
    }
}
