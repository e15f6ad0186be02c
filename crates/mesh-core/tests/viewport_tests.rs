// Host-side tests for the viewport service: cached dimensions, the typed
// subscription registry, and notification throttling.

use mesh_core::{Viewport, ViewportDimensions};
use std::cell::RefCell;
use std::rc::Rc;

fn dims(width: f32, height: f32) -> ViewportDimensions {
    ViewportDimensions::new(width, height, height)
}

fn recording_viewport() -> (Viewport, Rc<RefCell<Vec<ViewportDimensions>>>) {
    let mut viewport = Viewport::new(dims(600.0, 600.0));
    let seen = Rc::new(RefCell::new(Vec::new()));
    let sink = seen.clone();
    viewport.subscribe_resize(move |d| sink.borrow_mut().push(d));
    (viewport, seen)
}

#[test]
fn subscribers_receive_the_fresh_snapshot() {
    let (mut viewport, seen) = recording_viewport();
    viewport.handle_resize(dims(800.0, 600.0), 0.0);

    assert_eq!(seen.borrow().len(), 1);
    assert_eq!(seen.borrow()[0], dims(800.0, 600.0));
    assert_eq!(viewport.dimensions(), dims(800.0, 600.0));
}

#[test]
fn notifications_are_throttled_but_the_cache_is_not() {
    let (mut viewport, seen) = recording_viewport();
    viewport.handle_resize(dims(700.0, 600.0), 0.0);
    // Within the throttle window: cache refreshed, no fan-out.
    viewport.handle_resize(dims(800.0, 600.0), 10.0);
    assert_eq!(seen.borrow().len(), 1);
    assert_eq!(viewport.dimensions(), dims(800.0, 600.0));

    viewport.handle_resize(dims(900.0, 600.0), 40.0);
    assert_eq!(seen.borrow().len(), 2);
    assert_eq!(seen.borrow()[1], dims(900.0, 600.0));
}

#[test]
fn unsubscribed_callbacks_stop_firing() {
    let mut viewport = Viewport::new(dims(600.0, 600.0));
    let seen = Rc::new(RefCell::new(Vec::new()));
    let sink = seen.clone();
    let id = viewport.subscribe_resize(move |d: ViewportDimensions| sink.borrow_mut().push(d));

    viewport.unsubscribe(id);
    viewport.handle_resize(dims(800.0, 600.0), 0.0);
    assert!(seen.borrow().is_empty());

    // Unknown / already-removed tokens are a tolerated no-op.
    viewport.unsubscribe(id);
}

#[test]
fn multiple_subscribers_all_fire() {
    let mut viewport = Viewport::new(dims(600.0, 600.0));
    let count = Rc::new(RefCell::new(0));
    for _ in 0..3 {
        let count = count.clone();
        viewport.subscribe_resize(move |_| *count.borrow_mut() += 1);
    }
    viewport.handle_resize(dims(800.0, 600.0), 0.0);
    assert_eq!(*count.borrow(), 3);
}

#[test]
fn unsubscribe_only_removes_its_own_token() {
    let mut viewport = Viewport::new(dims(600.0, 600.0));
    let count = Rc::new(RefCell::new(0));
    let a = {
        let count = count.clone();
        viewport.subscribe_resize(move |_| *count.borrow_mut() += 1)
    };
    {
        let count = count.clone();
        viewport.subscribe_resize(move |_| *count.borrow_mut() += 10);
    }
    viewport.unsubscribe(a);
    viewport.handle_resize(dims(800.0, 600.0), 0.0);
    assert_eq!(*count.borrow(), 10);
}

#[test]
fn aspect_ratio_is_height_over_width() {
    assert_eq!(dims(600.0, 300.0).aspect_ratio(), 0.5);
    assert_eq!(dims(0.0, 300.0).aspect_ratio(), 0.0);

    let viewport = Viewport::new(dims(400.0, 800.0));
    assert_eq!(viewport.aspect_ratio(), 2.0);
}
