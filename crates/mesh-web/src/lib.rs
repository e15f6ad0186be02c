#![cfg(target_arch = "wasm32")]
//! Web front-end for the particle-mesh background: canvas plumbing, DOM
//! event wiring, and the requestAnimationFrame loop around `mesh-core`.

mod dom;
mod events;
mod frame;
mod render;

use mesh_core::{Mesh, MeshOptions, SubscriptionId, Viewport};
use std::cell::{Cell, RefCell};
use std::rc::Rc;
use wasm_bindgen::prelude::*;

use frame::Clock;

#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    console_error_panic_hook::set_once();
    console_log::init_with_level(log::Level::Info).ok();
    log::info!("mesh-web starting");
    Ok(())
}

struct Parts {
    mesh: Rc<RefCell<Mesh>>,
    viewport: Rc<RefCell<Viewport>>,
    bindings: events::InputBindings,
    resize_subscription: SubscriptionId,
    ctx: web_sys::CanvasRenderingContext2d,
    clock: Rc<Clock>,
    alive: Rc<Cell<bool>>,
    loop_running: Cell<bool>,
}

/// Handle exposed to the embedding page.
///
/// Construction is fail-soft: a missing canvas or 2D context logs an error
/// and yields an inert handle whose `start`/`destroy` do nothing, so the
/// effect can never take down the hosting page.
#[wasm_bindgen]
pub struct MeshBackground {
    parts: RefCell<Option<Parts>>,
}

#[wasm_bindgen]
impl MeshBackground {
    #[wasm_bindgen(constructor)]
    pub fn new(
        canvas_id: &str,
        x_spacing: Option<f64>,
        y_spacing: Option<f64>,
        duration: Option<f64>,
    ) -> MeshBackground {
        let mut options = MeshOptions::default();
        if let Some(v) = x_spacing {
            options.x_spacing = v as f32;
        }
        if let Some(v) = y_spacing {
            options.y_spacing = v as f32;
        }
        if let Some(v) = duration {
            options.duration = v as f32;
        }
        match build(canvas_id, options) {
            Ok(parts) => MeshBackground {
                parts: RefCell::new(Some(parts)),
            },
            Err(e) => {
                log::error!("mesh init failed: {e:#}");
                MeshBackground {
                    parts: RefCell::new(None),
                }
            }
        }
    }

    /// Begin the animation loop. Repeated calls are no-ops.
    pub fn start(&self) {
        let borrow = self.parts.borrow();
        let Some(parts) = borrow.as_ref() else {
            return;
        };
        parts.mesh.borrow_mut().start(parts.clock.now_ms());
        if !parts.loop_running.replace(true) {
            let frame_ctx = Rc::new(RefCell::new(frame::FrameContext {
                mesh: parts.mesh.clone(),
                ctx: parts.ctx.clone(),
                clock: parts.clock.clone(),
            }));
            frame::start_loop(frame_ctx, parts.alive.clone());
        }
    }

    /// Fully detach: stop the loop, remove all input listeners, cancel
    /// pending work. Idempotent.
    pub fn destroy(&self) {
        let Some(mut parts) = self.parts.borrow_mut().take() else {
            return;
        };
        parts.alive.set(false);
        parts.bindings.detach();
        parts
            .viewport
            .borrow_mut()
            .unsubscribe(parts.resize_subscription);
        parts.mesh.borrow_mut().destroy();
        log::info!("mesh destroyed");
    }
}

fn build(canvas_id: &str, options: MeshOptions) -> anyhow::Result<Parts> {
    let (canvas, ctx) = dom::canvas_context(canvas_id)?;
    dom::sync_canvas_backing_size(&canvas);

    let clock = Rc::new(Clock::new());
    let dims = dom::body_dimensions();
    let viewport = Rc::new(RefCell::new(Viewport::new(dims)));
    let mesh = Rc::new(RefCell::new(Mesh::new(options, dims)?));

    // The field follows viewport growth; the regeneration debounce lives in
    // the core.
    let resize_subscription = {
        let mesh = mesh.clone();
        let clock = clock.clone();
        viewport.borrow_mut().subscribe_resize(move |dims| {
            mesh.borrow_mut().handle_resize(dims, clock.now_ms());
        })
    };

    let wiring = events::InputWiring {
        mesh: mesh.clone(),
        viewport: viewport.clone(),
        canvas,
        clock: clock.clone(),
    };
    let bindings = events::wire_input_handlers(&wiring);

    Ok(Parts {
        mesh,
        viewport,
        bindings,
        resize_subscription,
        ctx,
        clock,
        alive: Rc::new(Cell::new(true)),
        loop_running: Cell::new(false),
    })
}
