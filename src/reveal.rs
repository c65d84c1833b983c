use std::collections::HashSet;

use dioxus::prelude::*;
#[cfg(target_arch = "wasm32")]
use dioxus::web::WebEventExt;
#[cfg(target_arch = "wasm32")]
use std::cell::RefCell;
#[cfg(target_arch = "wasm32")]
use std::collections::HashMap;
#[cfg(target_arch = "wasm32")]
use std::rc::Rc;
#[cfg(target_arch = "wasm32")]
use wasm_bindgen::{closure::Closure, JsCast, JsValue};

#[cfg(target_arch = "wasm32")]
const REVEAL_THRESHOLD: f64 = 0.1;
#[cfg(target_arch = "wasm32")]
const REVEAL_KEY_ATTRIBUTE: &str = "data-reveal";

/// Reveal is one-way: a key that has revealed stays revealed and is never
/// handed to the observer again.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct RevealRegistry {
    observed: HashSet<String>,
    revealed: HashSet<String>,
}

impl RevealRegistry {
    pub fn register(&mut self, key: &str) -> bool {
        if self.revealed.contains(key) {
            return false;
        }
        self.observed.insert(key.to_string())
    }

    pub fn release(&mut self, key: &str) -> bool {
        self.observed.remove(key)
    }

    pub fn reveal(&mut self, key: &str) -> bool {
        self.observed.remove(key);
        self.revealed.insert(key.to_string())
    }

    #[cfg(test)]
    pub fn is_observed(&self, key: &str) -> bool {
        self.observed.contains(key)
    }

    pub fn is_revealed(&self, key: &str) -> bool {
        self.revealed.contains(key)
    }
}

#[cfg(target_arch = "wasm32")]
struct RevealObserver {
    observer: web_sys::IntersectionObserver,
    targets: Rc<RefCell<HashMap<String, web_sys::Element>>>,
    _closure: Closure<dyn FnMut(js_sys::Array, web_sys::IntersectionObserver)>,
}

#[cfg(target_arch = "wasm32")]
impl RevealObserver {
    fn new(mut registry: Signal<RevealRegistry>) -> Result<Self, String> {
        let targets: Rc<RefCell<HashMap<String, web_sys::Element>>> = Rc::default();
        let seen = targets.clone();
        let closure = Closure::wrap(Box::new(
            move |entries: js_sys::Array, observer: web_sys::IntersectionObserver| {
                for entry in entries.iter() {
                    let entry: web_sys::IntersectionObserverEntry = entry.unchecked_into();
                    if !entry.is_intersecting() {
                        continue;
                    }
                    let target = entry.target();
                    observer.unobserve(&target);
                    if let Some(key) = target.get_attribute(REVEAL_KEY_ATTRIBUTE) {
                        seen.borrow_mut().remove(&key);
                        registry.write().reveal(&key);
                    }
                }
            },
        )
            as Box<dyn FnMut(js_sys::Array, web_sys::IntersectionObserver)>);
        let options = web_sys::IntersectionObserverInit::new();
        options.set_threshold(&JsValue::from_f64(REVEAL_THRESHOLD));
        let observer = web_sys::IntersectionObserver::new_with_options(
            closure.as_ref().unchecked_ref(),
            &options,
        )
        .map_err(|_| "IntersectionObserver unavailable".to_string())?;
        Ok(Self {
            observer,
            targets,
            _closure: closure,
        })
    }

    fn observe(&self, key: &str, element: web_sys::Element) {
        self.observer.observe(&element);
        self.targets.borrow_mut().insert(key.to_string(), element);
    }

    fn unobserve(&self, key: &str) {
        if let Some(element) = self.targets.borrow_mut().remove(key) {
            self.observer.unobserve(&element);
        }
    }
}

#[derive(Clone, Copy)]
pub struct Reveal {
    registry: Signal<RevealRegistry>,
    #[cfg(target_arch = "wasm32")]
    observer: Signal<Option<Rc<RevealObserver>>>,
}

impl Reveal {
    pub fn class(&self, base: &str, key: &str) -> String {
        if self.registry.read().is_revealed(key) {
            format!("{base} reveal active")
        } else {
            format!("{base} reveal")
        }
    }

    pub fn release(&self, key: &str) {
        let mut registry = self.registry;
        let Ok(mut registry) = registry.try_write() else {
            return;
        };
        if !registry.release(key) {
            return;
        }
        #[cfg(target_arch = "wasm32")]
        if let Ok(observer) = self.observer.try_read() {
            if let Some(observer) = observer.as_ref() {
                observer.unobserve(key);
            }
        }
    }

    pub fn track(&self, key: &str, event: MountedEvent) {
        #[cfg(target_arch = "wasm32")]
        {
            let mut registry = self.registry;
            if !registry.write().register(key) {
                return;
            }
            let element = event.data.as_ref().as_web_event();
            let Ok(element) = element.dyn_into::<web_sys::Element>() else {
                return;
            };
            if element.set_attribute(REVEAL_KEY_ATTRIBUTE, key).is_err() {
                return;
            }
            if let Some(observer) = self.observer.read().as_ref() {
                observer.observe(key, element);
            }
        }
        #[cfg(not(target_arch = "wasm32"))]
        {
            let _ = event;
            let mut registry = self.registry;
            if registry.write().register(key) {
                registry.write().reveal(key);
            }
        }
    }
}

pub fn use_reveal_provider() -> Reveal {
    let registry = use_signal(RevealRegistry::default);
    #[cfg(target_arch = "wasm32")]
    let observer = use_signal(|| {
        RevealObserver::new(registry)
            .map_err(|err| tracing::warn!("reveal: {err}"))
            .ok()
            .map(Rc::new)
    });
    #[cfg(target_arch = "wasm32")]
    use_drop(move || {
        if let Some(observer) = observer.read().as_ref() {
            tracing::debug!("reveal: disconnect");
            observer.observer.disconnect();
        }
    });

    use_context_provider(|| Reveal {
        registry,
        #[cfg(target_arch = "wasm32")]
        observer,
    })
}

pub fn use_reveal() -> Reveal {
    use_context::<Reveal>()
}

pub fn use_reveal_release(key: &'static str) {
    let reveal = use_reveal();
    use_drop(move || reveal.release(key));
}
