use glam::Vec2;
use std::f32::consts::TAU;

use crate::config::PointerOptions;
use crate::viewport::ViewportDimensions;

/// Relative mass of the pointer in the node pull model.
pub const POINTER_MASS: f32 = 50.0;

/// Window over which the live position eases toward a new target.
pub const EASE_DURATION_MS: f64 = 800.0;
/// An axis closer than this to its target stops updating until a new target
/// arrives, so settled positions don't jitter at sub-pixel scale.
pub const ARRIVAL_EPSILON: f32 = 2.0;
/// Length of the click pulse on the velocity scalar.
pub const PULSE_DURATION_MS: f64 = 1000.0;
/// Scalar at click time is `1 + PULSE_AMPLITUDE * sin(1)` ≈ 0.3, recovering
/// to 1.0 as the pulse elapses.
pub const PULSE_AMPLITUDE: f64 = -0.832;
/// Move and orientation input are sampled at most once per this interval.
pub const INPUT_SAMPLE_INTERVAL_MS: f64 = 100.0;

/// Cubic ease-out over linear progress in [0, 1].
pub fn ease_out_cubic(progress: f64) -> f64 {
    1.0 - (1.0 - progress).powi(3)
}

/// Per-frame snapshot of the tracked pointer, read by every node.
#[derive(Clone, Copy, Debug, Default)]
pub struct PointerState {
    pub x: f32,
    pub y: f32,
    /// Position normalized against the viewport, in [0, 1] on-screen.
    pub percent_x: f32,
    pub percent_y: f32,
    /// Polar angle relative to the viewport centre, in [0, 2π).
    pub angle: f32,
}

impl PointerState {
    pub fn position(&self) -> Vec2 {
        Vec2::new(self.x, self.y)
    }
}

#[derive(Clone, Copy, Debug)]
struct Interpolation {
    start: Vec2,
    target: Vec2,
    t0: f64,
}

/// Converts raw pointer / orientation / click input into a smoothly animated
/// 2D target. All operations take the current time in milliseconds; the
/// tracker never reads a clock of its own.
pub struct PointerTracker {
    pos: Vec2,
    interp: Interpolation,
    options: PointerOptions,
    pulse_started_at: Option<f64>,
    last_move_at: Option<f64>,
    last_orientation_at: Option<f64>,
    active: bool,
}

impl PointerTracker {
    /// Starts centred in the viewport.
    pub fn new(dims: ViewportDimensions, options: PointerOptions) -> Self {
        let centre = Vec2::new(dims.width / 2.0, dims.height / 2.0);
        Self {
            pos: centre,
            interp: Interpolation {
                start: centre,
                target: centre,
                t0: 0.0,
            },
            options,
            pulse_started_at: None,
            last_move_at: None,
            last_orientation_at: None,
            active: true,
        }
    }

    pub fn position(&self) -> Vec2 {
        self.pos
    }

    /// Record a new interpolation target. The live position is not moved;
    /// [`PointerTracker::step`] eases toward the target over subsequent
    /// frames.
    pub fn set_position(&mut self, target: Vec2, now_ms: f64) {
        self.interp = Interpolation {
            start: self.pos,
            target,
            t0: now_ms,
        };
    }

    /// Per-frame motion step. Axes already within [`ARRIVAL_EPSILON`] of the
    /// target are frozen until a new target arrives.
    pub fn step(&mut self, now_ms: f64) {
        if !self.active {
            return;
        }
        let progress = ((now_ms - self.interp.t0) / EASE_DURATION_MS).clamp(0.0, 1.0);
        let eased = ease_out_cubic(progress);
        let scalar = (eased * self.velocity_scalar(now_ms)) as f32;
        let Interpolation { start, target, .. } = self.interp;
        if (target.x - self.pos.x).abs() >= ARRIVAL_EPSILON {
            self.pos.x = start.x + (target.x - start.x) * scalar;
        }
        if (target.y - self.pos.y).abs() >= ARRIVAL_EPSILON {
            self.pos.y = start.y + (target.y - start.y) * scalar;
        }
    }

    pub fn state(&self, dims: &ViewportDimensions) -> PointerState {
        let percent_x = if dims.width > 0.0 {
            self.pos.x / dims.width
        } else {
            0.0
        };
        let percent_y = if dims.height > 0.0 {
            self.pos.y / dims.height
        } else {
            0.0
        };
        PointerState {
            x: self.pos.x,
            y: self.pos.y,
            percent_x,
            percent_y,
            angle: self.angle_from_centre(dims),
        }
    }

    /// Polar angle of the pointer relative to the viewport centre, folded
    /// into [0, 2π).
    fn angle_from_centre(&self, dims: &ViewportDimensions) -> f32 {
        let dx = self.pos.x - dims.width / 2.0;
        let dy = self.pos.y - dims.height / 2.0;
        let theta = dy.atan2(dx);
        if theta >= 0.0 {
            theta
        } else {
            theta + TAU
        }
    }

    /// Current velocity scalar. Expired pulses restore the scalar to exactly
    /// 1.0 and clear the pulse state.
    pub fn velocity_scalar(&mut self, now_ms: f64) -> f64 {
        let Some(t0) = self.pulse_started_at else {
            return 1.0;
        };
        let elapsed = now_ms - t0;
        if elapsed >= PULSE_DURATION_MS {
            self.pulse_started_at = None;
            return 1.0;
        }
        1.0 + PULSE_AMPLITUDE * (1.0 - elapsed / PULSE_DURATION_MS).sin()
    }

    fn pulse_active(&self, now_ms: f64) -> bool {
        self.pulse_started_at
            .is_some_and(|t0| now_ms - t0 < PULSE_DURATION_MS)
    }

    /// Pointer-move input, sampled at most once per
    /// [`INPUT_SAMPLE_INTERVAL_MS`]. Ignored outright while a click pulse is
    /// settling.
    pub fn handle_move(&mut self, x: f32, y: f32, now_ms: f64) {
        if !self.active || self.pulse_active(now_ms) {
            return;
        }
        if let Some(last) = self.last_move_at {
            if now_ms - last < INPUT_SAMPLE_INTERVAL_MS {
                return;
            }
        }
        self.last_move_at = Some(now_ms);
        self.set_position(Vec2::new(x, y), now_ms);
    }

    /// Click/tap input: snap the target to the click point and start the
    /// settle pulse. Never rate-limited.
    pub fn handle_click(&mut self, x: f32, y: f32, now_ms: f64) {
        if !self.active {
            return;
        }
        self.set_position(Vec2::new(x, y), now_ms);
        self.pulse_started_at = Some(now_ms);
    }

    /// Device-orientation input: beta tilts front/back (drives y), gamma
    /// left/right (drives x). Sampled like pointer moves.
    pub fn handle_orientation(
        &mut self,
        beta: f32,
        gamma: f32,
        dims: &ViewportDimensions,
        now_ms: f64,
    ) {
        if !self.active {
            return;
        }
        if let Some(last) = self.last_orientation_at {
            if now_ms - last < INPUT_SAMPLE_INTERVAL_MS {
                return;
            }
        }
        self.last_orientation_at = Some(now_ms);
        let target = orientation_target(beta, gamma, dims, &self.options);
        self.set_position(target, now_ms);
    }

    /// Halt the motion step. Idempotent; the host layer removes the actual
    /// input listeners.
    pub fn detach(&mut self) {
        self.active = false;
    }

    pub fn is_attached(&self) -> bool {
        self.active
    }
}

/// Map device tilt angles (degrees) to viewport coordinates.
pub fn orientation_target(
    beta: f32,
    gamma: f32,
    dims: &ViewportDimensions,
    options: &PointerOptions,
) -> Vec2 {
    let x = gamma + options.holding_angle;
    Vec2::new(
        dims.width * (x / options.x_limit),
        dims.height * (beta / options.y_limit),
    )
}
