use crate::storage::KeyValueStore;

const THEME_STORAGE_KEY: &str = "theme";
const LIGHT_CLASS: &str = "light";

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Theme {
    Light,
    #[default]
    Dark,
}

impl Theme {
    pub fn as_str(&self) -> &'static str {
        match self {
            Theme::Light => "light",
            Theme::Dark => "dark",
        }
    }

    fn parse(value: &str) -> Self {
        match value {
            "light" => Theme::Light,
            _ => Theme::Dark,
        }
    }

    pub fn toggled(self) -> Self {
        match self {
            Theme::Light => Theme::Dark,
            Theme::Dark => Theme::Light,
        }
    }

    pub fn toggle_label(&self) -> &'static str {
        match self {
            Theme::Light => "☾",
            Theme::Dark => "☀",
        }
    }
}

pub fn load_theme(store: &impl KeyValueStore) -> Theme {
    store
        .get(THEME_STORAGE_KEY)
        .map(|value| Theme::parse(&value))
        .unwrap_or_default()
}

pub fn save_theme(store: &impl KeyValueStore, theme: Theme) {
    if let Err(err) = store.set(THEME_STORAGE_KEY, theme.as_str()) {
        tracing::warn!("theme: {err}");
    }
}

pub fn toggle_theme(store: &impl KeyValueStore, current: Theme) -> Theme {
    let next = current.toggled();
    save_theme(store, next);
    next
}

pub fn apply_theme(theme: Theme) {
    #[cfg(target_arch = "wasm32")]
    {
        let Some(root) = web_sys::window()
            .and_then(|window| window.document())
            .and_then(|document| document.document_element())
        else {
            return;
        };
        let classes = root.class_list();
        let result = match theme {
            Theme::Light => classes.add_1(LIGHT_CLASS),
            Theme::Dark => classes.remove_1(LIGHT_CLASS),
        };
        if result.is_err() {
            tracing::warn!("theme: failed to update root class");
        }
    }
    #[cfg(not(target_arch = "wasm32"))]
    {
        let _ = (theme, LIGHT_CLASS);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStore;
    use pretty_assertions::assert_eq;

    #[test]
    fn missing_or_unknown_value_is_dark() {
        assert_eq!(load_theme(&MemoryStore::default()), Theme::Dark);
        assert_eq!(
            load_theme(&MemoryStore::with(&[("theme", "solarized")])),
            Theme::Dark
        );
        assert_eq!(
            load_theme(&MemoryStore::with(&[("theme", "light")])),
            Theme::Light
        );
    }

    #[test]
    fn toggle_persists_new_mode() {
        let store = MemoryStore::default();
        let next = toggle_theme(&store, Theme::Dark);
        assert_eq!(next, Theme::Light);
        assert_eq!(store.get("theme").as_deref(), Some("light"));
    }

    #[test]
    fn toggling_twice_restores_persisted_mode() {
        let store = MemoryStore::with(&[("theme", "light")]);
        let original = load_theme(&store);
        let once = toggle_theme(&store, original);
        let twice = toggle_theme(&store, once);
        assert_eq!(twice, original);
        assert_eq!(load_theme(&store), original);
    }
}
