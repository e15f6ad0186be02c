use mesh_core::{Mesh, Viewport};
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

use crate::dom;
use crate::frame::Clock;

/// Shared handles the input listeners close over.
#[derive(Clone)]
pub struct InputWiring {
    pub mesh: Rc<RefCell<Mesh>>,
    pub viewport: Rc<RefCell<Viewport>>,
    pub canvas: web::HtmlCanvasElement,
    pub clock: Rc<Clock>,
}

/// Attached listeners. Closures are stored rather than leaked so
/// [`InputBindings::detach`] can remove them again.
pub struct InputBindings {
    mousemove: Option<Closure<dyn FnMut(web::MouseEvent)>>,
    mousedown: Option<Closure<dyn FnMut(web::MouseEvent)>>,
    orientation: Option<Closure<dyn FnMut(web::DeviceOrientationEvent)>>,
    resize: Option<Closure<dyn FnMut()>>,
}

pub fn wire_input_handlers(w: &InputWiring) -> InputBindings {
    InputBindings {
        mousemove: wire_mousemove(w),
        mousedown: wire_mousedown(w),
        orientation: wire_orientation(w),
        resize: wire_resize(w),
    }
}

fn wire_mousemove(w: &InputWiring) -> Option<Closure<dyn FnMut(web::MouseEvent)>> {
    let mesh = w.mesh.clone();
    let clock = w.clock.clone();
    let closure = Closure::wrap(Box::new(move |ev: web::MouseEvent| {
        let now = clock.now_ms();
        mesh.borrow_mut()
            .pointer_mut()
            .handle_move(ev.page_x() as f32, ev.page_y() as f32, now);
    }) as Box<dyn FnMut(_)>);
    attach(web::window()?, "mousemove", closure)
}

fn wire_mousedown(w: &InputWiring) -> Option<Closure<dyn FnMut(web::MouseEvent)>> {
    let mesh = w.mesh.clone();
    let clock = w.clock.clone();
    let closure = Closure::wrap(Box::new(move |ev: web::MouseEvent| {
        let now = clock.now_ms();
        mesh.borrow_mut()
            .pointer_mut()
            .handle_click(ev.page_x() as f32, ev.page_y() as f32, now);
    }) as Box<dyn FnMut(_)>);
    attach(web::window()?, "mousedown", closure)
}

fn wire_orientation(w: &InputWiring) -> Option<Closure<dyn FnMut(web::DeviceOrientationEvent)>> {
    let mesh = w.mesh.clone();
    let viewport = w.viewport.clone();
    let clock = w.clock.clone();
    let closure = Closure::wrap(Box::new(move |ev: web::DeviceOrientationEvent| {
        // Browsers without orientation sensors report null angles.
        let (Some(beta), Some(gamma)) = (ev.beta(), ev.gamma()) else {
            return;
        };
        let now = clock.now_ms();
        let dims = viewport.borrow().dimensions();
        mesh.borrow_mut()
            .pointer_mut()
            .handle_orientation(beta as f32, gamma as f32, &dims, now);
    }) as Box<dyn FnMut(_)>);
    attach(web::window()?, "deviceorientation", closure)
}

fn wire_resize(w: &InputWiring) -> Option<Closure<dyn FnMut()>> {
    let viewport = w.viewport.clone();
    let clock = w.clock.clone();
    let canvas = w.canvas.clone();
    let closure = Closure::wrap(Box::new(move || {
        dom::sync_canvas_backing_size(&canvas);
        let dims = dom::body_dimensions();
        viewport.borrow_mut().handle_resize(dims, clock.now_ms());
    }) as Box<dyn FnMut()>);
    attach(web::window()?, "resize", closure)
}

fn attach<T: ?Sized>(
    window: web::Window,
    event: &str,
    closure: Closure<T>,
) -> Option<Closure<T>> {
    window
        .add_event_listener_with_callback(event, closure.as_ref().unchecked_ref())
        .map_err(|e| log::error!("failed to attach {event} listener: {e:?}"))
        .ok()?;
    Some(closure)
}

impl InputBindings {
    /// Remove all listeners. Idempotent.
    pub fn detach(&mut self) {
        let Some(window) = web::window() else {
            return;
        };
        remove(&window, "mousemove", self.mousemove.take());
        remove(&window, "mousedown", self.mousedown.take());
        remove(&window, "deviceorientation", self.orientation.take());
        remove(&window, "resize", self.resize.take());
    }
}

fn remove<T: ?Sized>(window: &web::Window, event: &str, closure: Option<Closure<T>>) {
    if let Some(c) = closure {
        _ = window.remove_event_listener_with_callback(event, c.as_ref().unchecked_ref());
    }
}
