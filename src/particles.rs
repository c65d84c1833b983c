use dioxus::prelude::*;
#[cfg(all(test, not(target_arch = "wasm32")))]
use std::cell::Cell;
#[cfg(target_arch = "wasm32")]
use std::cell::RefCell;
#[cfg(target_arch = "wasm32")]
use std::rc::Rc;
#[cfg(target_arch = "wasm32")]
use wasm_bindgen::JsCast;

#[cfg(target_arch = "wasm32")]
use crate::hooks::{AnimationLoop, WindowListener};

#[cfg(any(target_arch = "wasm32", test))]
pub const PARTICLE_COUNT: usize = 70;
pub const CANVAS_ID: &str = "particles";

#[cfg(any(target_arch = "wasm32", test))]
#[derive(Clone, Debug, PartialEq)]
pub struct Particle {
    pub x: f64,
    pub y: f64,
    pub size: f64,
    pub vertical_speed: f64,
    pub hue: f64,
}

#[cfg(any(target_arch = "wasm32", test))]
impl Particle {
    fn spawn(width: f64, height: f64, random: &mut impl FnMut() -> f64) -> Self {
        Self {
            x: random() * width,
            y: random() * height,
            size: random() * 2.0 + 0.5,
            vertical_speed: random() * 0.6 + 0.2,
            hue: 180.0 + random() * 30.0,
        }
    }

    fn advance(&mut self, height: f64) {
        self.y += self.vertical_speed;
        if self.y > height {
            self.y = 0.0;
        }
    }

    pub fn fill_style(&self) -> String {
        format!("hsla({}, 100%, 70%, 0.6)", self.hue)
    }
}

#[cfg(any(target_arch = "wasm32", test))]
#[derive(Clone, Debug, PartialEq)]
pub struct ParticleField {
    particles: Vec<Particle>,
    width: f64,
    height: f64,
}

#[cfg(any(target_arch = "wasm32", test))]
impl ParticleField {
    pub fn new(count: usize, width: f64, height: f64, mut random: impl FnMut() -> f64) -> Self {
        let particles = (0..count)
            .map(|_| Particle::spawn(width, height, &mut random))
            .collect();
        Self {
            particles,
            width,
            height,
        }
    }

    #[cfg(test)]
    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    pub fn step(&mut self) {
        let height = self.height;
        for particle in &mut self.particles {
            particle.advance(height);
        }
    }

    pub fn resize(&mut self, width: f64, height: f64) {
        self.width = width;
        self.height = height;
    }

    #[cfg(target_arch = "wasm32")]
    fn draw(&self, context: &web_sys::CanvasRenderingContext2d) {
        context.clear_rect(0.0, 0.0, self.width, self.height);
        for particle in &self.particles {
            context.set_fill_style_str(&particle.fill_style());
            context.begin_path();
            let _ = context.arc(
                particle.x,
                particle.y,
                particle.size,
                0.0,
                std::f64::consts::PI * 2.0,
            );
            context.fill();
        }
    }
}

#[cfg(target_arch = "wasm32")]
pub fn random_unit() -> f64 {
    js_sys::Math::random()
}

#[cfg(all(test, not(target_arch = "wasm32")))]
pub fn random_unit() -> f64 {
    thread_local! {
        static SEED: Cell<u64> = const { Cell::new(0x9e37_79b9_7f4a_7c15) };
    }
    SEED.with(|seed| {
        let mut value = seed.get();
        value ^= value << 13;
        value ^= value >> 7;
        value ^= value << 17;
        seed.set(value);
        (value >> 11) as f64 / (1u64 << 53) as f64
    })
}

#[cfg(target_arch = "wasm32")]
struct ParticleRuntime {
    animation: AnimationLoop,
    resize: WindowListener,
}

#[cfg(target_arch = "wasm32")]
fn viewport_size(window: &web_sys::Window) -> (f64, f64) {
    let width = window
        .inner_width()
        .ok()
        .and_then(|value| value.as_f64())
        .unwrap_or(0.0);
    let height = window
        .inner_height()
        .ok()
        .and_then(|value| value.as_f64())
        .unwrap_or(0.0);
    (width, height)
}

#[cfg(target_arch = "wasm32")]
fn find_canvas() -> Result<web_sys::HtmlCanvasElement, String> {
    web_sys::window()
        .and_then(|window| window.document())
        .ok_or("Document unavailable")?
        .get_element_by_id(CANVAS_ID)
        .ok_or("Canvas missing")?
        .dyn_into::<web_sys::HtmlCanvasElement>()
        .map_err(|_| "Canvas cast failed".to_string())
}

#[cfg(target_arch = "wasm32")]
fn canvas_context(
    canvas: &web_sys::HtmlCanvasElement,
) -> Result<web_sys::CanvasRenderingContext2d, String> {
    canvas
        .get_context("2d")
        .map_err(|_| "Canvas context error")?
        .ok_or("Canvas context unavailable")?
        .dyn_into::<web_sys::CanvasRenderingContext2d>()
        .map_err(|_| "Canvas context cast failed".to_string())
}

#[cfg(target_arch = "wasm32")]
fn start_particles() -> Result<ParticleRuntime, String> {
    let window = web_sys::window().ok_or("window missing")?;
    let canvas = find_canvas()?;
    let context = canvas_context(&canvas)?;
    let (width, height) = viewport_size(&window);
    canvas.set_width(width as u32);
    canvas.set_height(height as u32);

    let field = Rc::new(RefCell::new(ParticleField::new(
        PARTICLE_COUNT,
        width,
        height,
        random_unit,
    )));

    let frame_field = field.clone();
    let animation = AnimationLoop::start(move || {
        let mut field = frame_field.borrow_mut();
        field.step();
        field.draw(&context);
    })?;

    let resize_field = field;
    let resize = WindowListener::attach("resize", move |_event| {
        let Some(window) = web_sys::window() else {
            return;
        };
        let (width, height) = viewport_size(&window);
        canvas.set_width(width as u32);
        canvas.set_height(height as u32);
        resize_field.borrow_mut().resize(width, height);
    });
    let resize = match resize {
        Ok(resize) => resize,
        Err(err) => {
            animation.stop();
            return Err(err);
        }
    };

    Ok(ParticleRuntime { animation, resize })
}

#[component]
pub fn ParticleBackground() -> Element {
    #[cfg(target_arch = "wasm32")]
    let mut runtime = use_signal(|| None::<ParticleRuntime>);
    #[cfg(target_arch = "wasm32")]
    let mut started = use_signal(|| false);

    #[cfg(target_arch = "wasm32")]
    {
        use_effect(move || {
            if started() {
                return;
            }
            started.set(true);
            tracing::debug!("particles: start");
            match start_particles() {
                Ok(handle) => runtime.set(Some(handle)),
                Err(err) => tracing::warn!("particles: {err}"),
            }
        });

        use_drop(move || {
            if let Some(handle) = runtime.read().as_ref() {
                tracing::debug!("particles: stop");
                handle.animation.stop();
                handle.resize.detach();
            }
        });
    }

    rsx! {
        canvas { id: CANVAS_ID, aria_hidden: "true" }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn sequence(values: &'static [f64]) -> impl FnMut() -> f64 {
        let mut index = 0;
        move || {
            let value = values[index % values.len()];
            index += 1;
            value
        }
    }

    #[test]
    fn spawn_maps_unit_samples_into_ranges() {
        let field = ParticleField::new(1, 800.0, 600.0, sequence(&[0.5, 0.25, 1.0, 0.0, 0.5]));
        assert_eq!(
            field.particles()[0],
            Particle {
                x: 400.0,
                y: 150.0,
                size: 2.5,
                vertical_speed: 0.2,
                hue: 195.0,
            }
        );
    }

    #[test]
    fn pool_has_fixed_size_within_bounds() {
        let field = ParticleField::new(PARTICLE_COUNT, 1280.0, 720.0, random_unit);
        assert_eq!(field.particles().len(), PARTICLE_COUNT);
        for particle in field.particles() {
            assert!((0.0..1280.0).contains(&particle.x));
            assert!((0.0..720.0).contains(&particle.y));
            assert!((0.5..2.5).contains(&particle.size));
            assert!((0.2..0.8).contains(&particle.vertical_speed));
            assert!((180.0..210.0).contains(&particle.hue));
        }
    }

    fn assert_close(actual: f64, expected: f64) {
        assert!(
            (actual - expected).abs() < 1e-9,
            "expected {expected}, got {actual}"
        );
    }

    #[test]
    fn step_moves_down_and_wraps_past_bottom() {
        let mut field = ParticleField::new(1, 100.0, 10.0, sequence(&[0.0, 0.9, 0.0, 1.0, 0.0]));
        field.step();
        assert_close(field.particles()[0].y, 9.8);
        field.step();
        assert_eq!(field.particles()[0].y, 0.0);
        field.step();
        assert_close(field.particles()[0].y, 0.8);
    }

    #[test]
    fn resize_keeps_positions_and_wraps_against_new_height() {
        let mut field = ParticleField::new(1, 100.0, 100.0, sequence(&[0.0, 0.5, 0.0, 0.0, 0.0]));
        field.resize(100.0, 20.0);
        assert_eq!(field.particles()[0].y, 50.0);
        field.step();
        assert_eq!(field.particles()[0].y, 0.0);
    }

    #[test]
    fn fill_style_uses_hue() {
        let field = ParticleField::new(1, 10.0, 10.0, sequence(&[0.0, 0.0, 0.0, 0.0, 0.5]));
        assert_eq!(field.particles()[0].fill_style(), "hsla(195, 100%, 70%, 0.6)");
    }
}
