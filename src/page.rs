use dioxus::prelude::*;
use dioxus_router::{Link, Routable, Router};
#[cfg(target_arch = "wasm32")]
use gloo_timers::future::TimeoutFuture;

use crate::catalog::{Catalog, CategoryCount, ChallengeFilter, ChallengeRecord};
use crate::config::{use_runtime_config, RuntimeConfig};
use crate::modal::CtfModal;
use crate::panel::{Panel, Prompt};
use crate::particles::ParticleBackground;
use crate::reveal::{use_reveal, use_reveal_provider, use_reveal_release};
use crate::storage::BrowserStore;
use crate::theme::{apply_theme, load_theme, toggle_theme};
use crate::visitors::{fetch_remote_count, format_count, resolve_visit_count};
use crate::widgets::{matches_query, LiveClock, ScrollProgress};

const MAIN_CSS: Asset = asset!("/assets/main.css");
const BADGE_STAGGER_MS: u32 = 150;
const EMPTY_CATEGORY_MESSAGE: &str = "No challenges in this category yet.";

#[component]
pub fn App() -> Element {
    let config = use_runtime_config();
    use_context_provider(|| config);

    rsx! {
        document::Title { "syndro // CTF write-ups" }
        document::Meta { name: "description", content: "Capture-the-flag challenge write-ups." }
        document::Link { rel: "stylesheet", href: MAIN_CSS }
        Router::<Route> {}
    }
}

#[derive(Clone, PartialEq, Routable)]
pub enum Route {
    #[route("/")]
    Home {},
    #[route("/:..route")]
    NotFound { route: Vec<String> },
}

pub fn navigate_to(path: &str) {
    tracing::debug!("navigate: {path}");
    #[cfg(target_arch = "wasm32")]
    {
        if let Some(window) = web_sys::window() {
            if window.location().set_href(path).is_err() {
                tracing::warn!("navigate: failed to open {path}");
            }
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct CardView {
    pub record: &'static ChallengeRecord,
    pub visible: bool,
}

#[derive(Clone, Debug, PartialEq)]
pub enum ChallengeView {
    Empty(&'static str),
    Cards(Vec<CardView>),
}

pub fn render_challenges(catalog: &Catalog, filter: ChallengeFilter, query: &str) -> ChallengeView {
    let rendered = catalog.filtered(filter);
    if rendered.is_empty() {
        return ChallengeView::Empty(EMPTY_CATEGORY_MESSAGE);
    }
    ChallengeView::Cards(apply_search(&rendered, query))
}

/// Active tab plus the query applied to the cards it rendered.
#[derive(Clone, Debug, PartialEq)]
pub struct ChallengeListState {
    pub filter: ChallengeFilter,
    pub query: String,
}

impl Default for ChallengeListState {
    fn default() -> Self {
        Self {
            filter: ChallengeFilter::All,
            query: String::new(),
        }
    }
}

impl ChallengeListState {
    // A fresh render shows every card even while the search box has text.
    pub fn select_tab(&mut self, tab: ChallengeFilter) {
        self.filter = tab;
        self.query.clear();
    }

    pub fn search(&mut self, query: &str) {
        self.query = query.to_string();
    }

    pub fn view(&self, catalog: &Catalog) -> ChallengeView {
        render_challenges(catalog, self.filter, &self.query)
    }
}

pub fn apply_search(cards: &[&'static ChallengeRecord], query: &str) -> Vec<CardView> {
    cards
        .iter()
        .map(|&record| CardView {
            record,
            visible: matches_query(&record.card_text(), query),
        })
        .collect()
}

pub fn badge_delays(badges: &[CategoryCount]) -> Vec<u32> {
    (0..badges.len() as u32)
        .map(|index| index * BADGE_STAGGER_MS)
        .collect()
}

#[component]
fn Home() -> Element {
    let catalog = use_hook(Catalog::default);
    use_reveal_provider();
    let mut modal_open = use_signal(|| false);
    let mut list = use_signal(ChallengeListState::default);
    let mut search = use_signal(String::new);

    rsx! {
        ParticleBackground {}
        ScrollProgress {}
        header { class: "topbar",
            div { class: "brand",
                span { class: "brand-name", "syndro" }
                span { class: "brand-tagline", "// ctf write-ups" }
            }
            div { class: "topbar-widgets",
                LiveClock {}
                VisitorCounter {}
                button {
                    id: "ctfToggle",
                    r#type: "button",
                    class: "topbar-button",
                    onclick: move |_| modal_open.set(true),
                    "My CTFs"
                }
                ThemeToggle {}
            }
        }
        main { class: "content",
            Panel {
                title: "Solved by category".to_string(),
                command: Some("grep -c category writeups/*".to_string()),
                CategoryBadges { catalog }
            }
            Panel {
                title: "Write-ups".to_string(),
                command: Some("ls writeups/".to_string()),
                class: Some("writeups".to_string()),
                input {
                    id: "searchBar",
                    class: "search-bar",
                    r#type: "search",
                    placeholder: "Search challenges...",
                    value: "{search}",
                    oninput: move |event| {
                        let value = event.value();
                        list.write().search(&value);
                        search.set(value);
                    },
                }
                div { id: "challengeTabs", class: "tabs",
                    for tab in ChallengeFilter::TABS {
                        button {
                            key: "{tab.slug()}",
                            r#type: "button",
                            class: if list.read().filter == tab { "tab active" } else { "tab" },
                            "data-cat": tab.slug(),
                            onclick: move |_| list.write().select_tab(tab),
                            "{tab.label()}"
                        }
                    }
                }
                ChallengeCards { view: list.read().view(&catalog) }
            }
            Panel {
                title: "Recent solves".to_string(),
                command: Some("tail -n 4 solves.log".to_string()),
                RecentSolves { catalog }
            }
        }
        CtfModal { catalog, open: modal_open }
    }
}

#[component]
fn ChallengeCards(view: ChallengeView) -> Element {
    rsx! {
        div { id: "challengeCards", class: "card-grid",
            {match view {
                ChallengeView::Empty(message) => rsx! {
                    p { class: "empty-state", "{message}" }
                },
                ChallengeView::Cards(cards) => rsx! {
                    for CardView { record, visible } in cards {
                        ChallengeCard { key: "{record.file}", record, visible }
                    }
                },
            }}
        }
    }
}

#[component]
fn ChallengeCard(record: &'static ChallengeRecord, visible: bool) -> Element {
    let reveal = use_reveal();
    use_reveal_release(record.file);

    rsx! {
        div {
            class: reveal.class("card", record.file),
            display: if visible { "block" } else { "none" },
            onmounted: move |event| reveal.track(record.file, event),
            onclick: move |_| navigate_to(record.file),
            div { class: "category-tag tag-{record.category.slug()}", "{record.category.label()}" }
            h3 { "{record.title}" }
            p { class: "flag",
                "Flag: "
                code { "{record.flag}" }
            }
            span { class: "card-cta", "Click for writeup" }
        }
    }
}

#[cfg(target_arch = "wasm32")]
async fn wait_ms(ms: u32) {
    if ms > 0 {
        TimeoutFuture::new(ms).await;
    }
}

#[cfg(not(target_arch = "wasm32"))]
async fn wait_ms(_ms: u32) {}

#[component]
fn CategoryBadges(catalog: Catalog) -> Element {
    let badges = use_hook(|| catalog.category_stats());
    let mut shown = use_signal(|| 0usize);

    let schedule = badges.clone();
    use_future(move || {
        let delays = badge_delays(&schedule);
        async move {
            let mut previous = 0;
            for (index, delay) in delays.into_iter().enumerate() {
                wait_ms(delay - previous).await;
                previous = delay;
                shown.set(index + 1);
            }
        }
    });

    rsx! {
        div { id: "category-badges", class: "category-badges",
            for badge in badges.iter().take(shown()) {
                div {
                    key: "{badge.category.slug()}",
                    class: "category-badge {badge.category.slug()} visible",
                    "{badge.badge_text()}"
                }
            }
        }
    }
}

#[component]
fn RecentSolves(catalog: Catalog) -> Element {
    let reveal = use_reveal();
    let recent = catalog.recent_solves();

    rsx! {
        ul {
            id: "recentSolvesList",
            class: reveal.class("recent-solves", "recent-solves"),
            onmounted: move |event| reveal.track("recent-solves", event),
            for record in recent {
                li {
                    key: "{record.file}",
                    onclick: move |_| navigate_to(record.file),
                    "{record.title}"
                }
            }
        }
    }
}

#[component]
fn VisitorCounter() -> Element {
    let config = use_context::<Resource<RuntimeConfig>>();
    let count = use_resource(move || async move {
        let config = config()?;
        let remote = fetch_remote_count(&config.counter_api_url).await;
        Some(resolve_visit_count(remote, &BrowserStore))
    });
    let label = match count().flatten() {
        Some(value) => format_count(value),
        None => "…".to_string(),
    };

    rsx! {
        span { class: "visitor-count",
            "visitors: "
            span { id: "visitorCount", "{label}" }
        }
    }
}

#[component]
fn ThemeToggle() -> Element {
    let mut theme = use_signal(|| load_theme(&BrowserStore));

    rsx! {
        button {
            id: "themeToggle",
            r#type: "button",
            class: "topbar-button",
            aria_label: "Toggle theme",
            onclick: move |_| {
                let next = toggle_theme(&BrowserStore, theme());
                apply_theme(next);
                theme.set(next);
            },
            "{theme().toggle_label()}"
        }
    }
}

#[component]
fn NotFound(route: Vec<String>) -> Element {
    let path = route.join("/");
    rsx! {
        document::Title { "Not Found | syndro" }
        main { class: "content",
            Panel {
                title: "404".to_string(),
                Prompt { command: format!("cat /{path}"), path: None }
                p { class: "empty-state", "Missing: /{path}" }
                Link { to: Route::Home {}, class: "back-link", "cd ~" }
            }
        }
    }
}
