#[cfg(target_arch = "wasm32")]
use dioxus::prelude::*;
#[cfg(target_arch = "wasm32")]
use std::cell::{Cell, RefCell};
#[cfg(target_arch = "wasm32")]
use std::rc::Rc;
#[cfg(target_arch = "wasm32")]
use wasm_bindgen::{closure::Closure, JsCast};

#[cfg(target_arch = "wasm32")]
struct IntervalHandle {
    id: i32,
    _closure: Closure<dyn FnMut()>,
}

#[cfg(target_arch = "wasm32")]
impl IntervalHandle {
    fn start(period_ms: i32, callback: impl FnMut() + 'static) -> Result<Self, String> {
        let window = web_sys::window().ok_or("window missing")?;
        let closure = Closure::wrap(Box::new(callback) as Box<dyn FnMut()>);
        let id = window
            .set_interval_with_callback_and_timeout_and_arguments_0(
                closure.as_ref().unchecked_ref(),
                period_ms,
            )
            .map_err(|_| "setInterval failed".to_string())?;
        Ok(Self {
            id,
            _closure: closure,
        })
    }

    fn clear(&self) {
        if let Some(window) = web_sys::window() {
            window.clear_interval_with_handle(self.id);
        }
    }
}

pub fn use_interval(period_ms: i32, callback: impl FnMut() + 'static) {
    #[cfg(target_arch = "wasm32")]
    {
        let handle = use_hook(move || {
            IntervalHandle::start(period_ms, callback)
                .map_err(|err| tracing::warn!("interval: {err}"))
                .ok()
                .map(Rc::new)
        });
        use_drop(move || {
            if let Some(handle) = handle.as_ref() {
                handle.clear();
            }
        });
    }
    #[cfg(not(target_arch = "wasm32"))]
    {
        let _ = (period_ms, callback);
    }
}

#[cfg(target_arch = "wasm32")]
pub struct WindowListener {
    event: &'static str,
    closure: Closure<dyn FnMut(web_sys::Event)>,
}

#[cfg(target_arch = "wasm32")]
impl WindowListener {
    pub fn attach(
        event: &'static str,
        callback: impl FnMut(web_sys::Event) + 'static,
    ) -> Result<Self, String> {
        let window = web_sys::window().ok_or("window missing")?;
        let closure = Closure::wrap(Box::new(callback) as Box<dyn FnMut(web_sys::Event)>);
        window
            .add_event_listener_with_callback(event, closure.as_ref().unchecked_ref())
            .map_err(|_| format!("{event} listener failed"))?;
        Ok(Self { event, closure })
    }

    pub fn detach(&self) {
        if let Some(window) = web_sys::window() {
            let _ = window.remove_event_listener_with_callback(
                self.event,
                self.closure.as_ref().unchecked_ref(),
            );
        }
    }
}

pub fn use_window_listener(event: &'static str, callback: impl FnMut() + 'static) {
    #[cfg(target_arch = "wasm32")]
    {
        let listener = use_hook(move || {
            let mut callback = callback;
            WindowListener::attach(event, move |_event: web_sys::Event| callback())
                .map_err(|err| tracing::warn!("listener: {err}"))
                .ok()
                .map(Rc::new)
        });
        use_drop(move || {
            if let Some(listener) = listener.as_ref() {
                listener.detach();
            }
        });
    }
    #[cfg(not(target_arch = "wasm32"))]
    {
        let _ = (event, callback);
    }
}

/// The frame closure holds a reference to itself; `stop` breaks that cycle.
#[cfg(target_arch = "wasm32")]
pub struct AnimationLoop {
    frame: Rc<RefCell<Option<Closure<dyn FnMut()>>>>,
    pending: Rc<Cell<Option<i32>>>,
    stopped: Rc<Cell<bool>>,
}

#[cfg(target_arch = "wasm32")]
impl AnimationLoop {
    pub fn start(mut tick: impl FnMut() + 'static) -> Result<Self, String> {
        let window = web_sys::window().ok_or("window missing")?;
        let frame: Rc<RefCell<Option<Closure<dyn FnMut()>>>> = Rc::new(RefCell::new(None));
        let pending = Rc::new(Cell::new(None));
        let stopped = Rc::new(Cell::new(false));

        let next_frame = frame.clone();
        let next_pending = pending.clone();
        let next_stopped = stopped.clone();
        *frame.borrow_mut() = Some(Closure::wrap(Box::new(move || {
            next_pending.set(None);
            if next_stopped.get() {
                return;
            }
            tick();
            let Some(window) = web_sys::window() else {
                return;
            };
            if let Some(callback) = next_frame.borrow().as_ref() {
                next_pending.set(
                    window
                        .request_animation_frame(callback.as_ref().unchecked_ref())
                        .ok(),
                );
            }
        }) as Box<dyn FnMut()>));

        let first = frame
            .borrow()
            .as_ref()
            .map(|callback| window.request_animation_frame(callback.as_ref().unchecked_ref()))
            .transpose()
            .map_err(|_| "requestAnimationFrame failed".to_string())?;
        pending.set(first);

        Ok(Self {
            frame,
            pending,
            stopped,
        })
    }

    pub fn stop(&self) {
        self.stopped.set(true);
        if let Some(id) = self.pending.take() {
            if let Some(window) = web_sys::window() {
                let _ = window.cancel_animation_frame(id);
            }
        }
        self.frame.borrow_mut().take();
    }
}
