// Host-side tests for the pointer tracker: eased interpolation, arrival
// freeze, click pulse, input sampling, and derived state.

use glam::Vec2;
use mesh_core::pointer::{
    ease_out_cubic, orientation_target, PointerTracker, ARRIVAL_EPSILON, EASE_DURATION_MS,
    PULSE_AMPLITUDE, PULSE_DURATION_MS,
};
use mesh_core::{PointerOptions, ViewportDimensions};

fn dims(width: f32, height: f32) -> ViewportDimensions {
    ViewportDimensions::new(width, height, height)
}

fn tracker() -> PointerTracker {
    PointerTracker::new(dims(600.0, 600.0), PointerOptions::default())
}

#[test]
fn easing_is_monotonic_and_completes_within_duration() {
    let mut t = tracker();
    t.set_position(Vec2::new(500.0, 300.0), 0.0);

    let mut last_x = t.position().x;
    let mut sample = 0.0;
    while sample <= EASE_DURATION_MS {
        t.step(sample);
        let x = t.position().x;
        assert!(
            x >= last_x,
            "x regressed from {last_x} to {x} at t={sample}"
        );
        last_x = x;
        sample += 50.0;
    }

    // Eased progress reaches 1.0 at the duration boundary. When stepped
    // finely the axis freezes once within the arrival epsilon, so the final
    // position lands within epsilon of the target, not on it.
    assert!((t.position().x - 500.0).abs() < ARRIVAL_EPSILON);
    assert_eq!(t.position().y, 300.0);
}

#[test]
fn ease_out_cubic_shape() {
    assert_eq!(ease_out_cubic(0.0), 0.0);
    assert_eq!(ease_out_cubic(1.0), 1.0);
    // Ease-out: front-loaded progress.
    assert!(ease_out_cubic(0.5) > 0.5);
}

#[test]
fn axis_within_epsilon_is_frozen() {
    let mut t = tracker();
    // Target closer than the epsilon on both axes: no motion at all.
    t.set_position(Vec2::new(300.0 + ARRIVAL_EPSILON * 0.75, 300.0), 0.0);
    t.step(400.0);
    t.step(EASE_DURATION_MS + 100.0);
    assert_eq!(t.position(), Vec2::new(300.0, 300.0));
}

#[test]
fn arrived_axis_stays_put_on_further_ticks() {
    let mut t = tracker();
    t.set_position(Vec2::new(500.0, 300.0), 0.0);
    t.step(EASE_DURATION_MS);
    let settled = t.position();
    assert!((settled.x - 500.0).abs() < ARRIVAL_EPSILON);

    t.step(EASE_DURATION_MS + 16.0);
    t.step(EASE_DURATION_MS + 32.0);
    assert_eq!(t.position(), settled);
}

#[test]
fn pulse_boundary_values_are_exact() {
    let mut t = tracker();
    t.handle_click(100.0, 100.0, 1000.0);

    let at_click = t.velocity_scalar(1000.0);
    let expected = 1.0 + PULSE_AMPLITUDE * 1.0_f64.sin();
    assert!((at_click - expected).abs() < 1e-12);
    // Dips well below normal tracking speed.
    assert!(at_click < 0.35);

    // Mid-pulse: recovering but not yet restored.
    let mid = t.velocity_scalar(1000.0 + PULSE_DURATION_MS / 2.0);
    assert!(mid > at_click && mid < 1.0);

    // At and beyond the pulse duration the scalar is exactly restored.
    assert_eq!(t.velocity_scalar(1000.0 + PULSE_DURATION_MS), 1.0);
    assert_eq!(t.velocity_scalar(5000.0), 1.0);
}

#[test]
fn moves_are_sampled_at_most_every_interval() {
    let mut t = tracker();
    t.handle_move(400.0, 300.0, 0.0);
    // Within the 100ms window: dropped.
    t.handle_move(460.0, 300.0, 50.0);
    t.step(EASE_DURATION_MS);
    assert!((t.position().x - 400.0).abs() < 1e-3);

    // Past the window: accepted.
    t.handle_move(460.0, 300.0, 900.0);
    t.step(900.0 + EASE_DURATION_MS);
    assert!((t.position().x - 460.0).abs() < 1e-3);
}

#[test]
fn moves_are_ignored_while_pulse_is_settling() {
    let mut t = tracker();
    t.handle_click(100.0, 100.0, 0.0);
    t.handle_move(550.0, 550.0, 500.0);
    t.step(PULSE_DURATION_MS + EASE_DURATION_MS);
    // Still tracking the click point, not the discarded move.
    assert!((t.position().x - 100.0).abs() < ARRIVAL_EPSILON);
    assert!((t.position().y - 100.0).abs() < ARRIVAL_EPSILON);

    // After the pulse has settled, moves are honoured again.
    t.handle_move(550.0, 550.0, 2000.0);
    t.step(2000.0 + EASE_DURATION_MS);
    assert!((t.position().x - 550.0).abs() < ARRIVAL_EPSILON);
}

#[test]
fn click_is_never_rate_limited() {
    let mut t = tracker();
    t.handle_click(100.0, 100.0, 0.0);
    t.handle_click(500.0, 500.0, 10.0);
    // Step far enough that both the easing window and the second click's
    // pulse have fully elapsed.
    t.step(10.0 + PULSE_DURATION_MS + EASE_DURATION_MS);
    assert!((t.position().x - 500.0).abs() < ARRIVAL_EPSILON);
}

#[test]
fn angle_from_centre_covers_all_quadrants() {
    let d = dims(600.0, 600.0);
    let cases: &[(f32, f32, f32)] = &[
        // (x, y, expected angle)
        (450.0, 300.0, 0.0),
        (450.0, 450.0, std::f32::consts::FRAC_PI_4),
        (150.0, 300.0, std::f32::consts::PI),
        (300.0, 150.0, 3.0 * std::f32::consts::FRAC_PI_2),
    ];
    for &(x, y, expected) in cases {
        let mut t = tracker();
        t.handle_click(x, y, 0.0);
        t.step(10_000.0);
        let state = t.state(&d);
        assert!(
            (state.angle - expected).abs() < 1e-4,
            "pointer at ({x}, {y}): angle {} != {expected}",
            state.angle
        );
        assert!(state.angle >= 0.0 && state.angle < std::f32::consts::TAU);
    }
}

#[test]
fn state_normalizes_against_viewport() {
    let d = dims(600.0, 600.0);
    let mut t = tracker();
    t.handle_click(450.0, 150.0, 0.0);
    t.step(10_000.0);
    let state = t.state(&d);
    assert!((state.percent_x - 0.75).abs() < 0.01);
    assert!((state.percent_y - 0.25).abs() < 0.01);

    // Degenerate viewport: percents collapse to zero rather than dividing
    // by zero.
    let zero = t.state(&dims(0.0, 0.0));
    assert_eq!(zero.percent_x, 0.0);
    assert_eq!(zero.percent_y, 0.0);
}

#[test]
fn orientation_maps_tilt_to_viewport_coordinates() {
    let d = dims(600.0, 600.0);
    let opts = PointerOptions::default();

    // Holding the device at the neutral angle centres x at zero.
    let neutral = orientation_target(0.0, -opts.holding_angle, &d, &opts);
    assert!((neutral.x - 0.0).abs() < 1e-4);
    assert!((neutral.y - 0.0).abs() < 1e-4);

    let tilted = orientation_target(45.0, 5.0, &d, &opts);
    assert!((tilted.x - 300.0).abs() < 1e-3); // (5 + 40) / 90 * 600
    assert!((tilted.y - 300.0).abs() < 1e-3); // 45 / 90 * 600
}

#[test]
fn orientation_input_is_sampled() {
    let d = dims(600.0, 600.0);
    let mut t = tracker();
    t.handle_orientation(45.0, 5.0, &d, 0.0);
    t.handle_orientation(90.0, 50.0, &d, 50.0); // dropped
    t.step(EASE_DURATION_MS);
    assert!((t.position().x - 300.0).abs() < ARRIVAL_EPSILON);
    assert!((t.position().y - 300.0).abs() < ARRIVAL_EPSILON);
}

#[test]
fn detach_halts_motion_and_is_idempotent() {
    let mut t = tracker();
    t.set_position(Vec2::new(500.0, 500.0), 0.0);
    t.detach();
    t.detach();
    assert!(!t.is_attached());

    t.step(EASE_DURATION_MS);
    assert_eq!(t.position(), Vec2::new(300.0, 300.0));

    // Input is ignored after detach as well.
    t.handle_move(550.0, 550.0, 2000.0);
    t.handle_click(550.0, 550.0, 2000.0);
    t.step(5000.0);
    assert_eq!(t.position(), Vec2::new(300.0, 300.0));
}
