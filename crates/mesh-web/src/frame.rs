use instant::Instant;
use mesh_core::Mesh;
use std::cell::{Cell, RefCell};
use std::rc::Rc;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

use crate::render;

/// Monotonic millisecond timeline shared by the input handlers and the frame
/// loop. The core only ever sees these timestamps.
pub struct Clock {
    epoch: Instant,
}

impl Clock {
    pub fn new() -> Self {
        Self {
            epoch: Instant::now(),
        }
    }

    pub fn now_ms(&self) -> f64 {
        self.epoch.elapsed().as_secs_f64() * 1000.0
    }
}

pub struct FrameContext {
    pub mesh: Rc<RefCell<Mesh>>,
    pub ctx: web::CanvasRenderingContext2d,
    pub clock: Rc<Clock>,
}

impl FrameContext {
    fn frame(&mut self) {
        let now = self.clock.now_ms();
        let mut mesh = self.mesh.borrow_mut();
        mesh.tick(now);
        render::draw(&self.ctx, &mesh);
    }
}

/// Self-rescheduling requestAnimationFrame loop. The `alive` flag is checked
/// before doing frame work and again before rescheduling, so clearing it
/// guarantees no further ticks run.
pub fn start_loop(frame_ctx: Rc<RefCell<FrameContext>>, alive: Rc<Cell<bool>>) {
    let tick: Rc<RefCell<Option<Closure<dyn FnMut()>>>> = Rc::new(RefCell::new(None));
    let tick_clone = tick.clone();
    *tick.borrow_mut() = Some(Closure::wrap(Box::new(move || {
        if !alive.get() {
            return;
        }
        frame_ctx.borrow_mut().frame();
        if !alive.get() {
            return;
        }
        if let Some(w) = web::window() {
            _ = w.request_animation_frame(
                tick_clone
                    .borrow()
                    .as_ref()
                    .unwrap()
                    .as_ref()
                    .unchecked_ref(),
            );
        }
    }) as Box<dyn FnMut()>));
    if let Some(w) = web::window() {
        _ = w.request_animation_frame(tick.borrow().as_ref().unwrap().as_ref().unchecked_ref());
    }
}
