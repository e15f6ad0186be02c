use glam::Vec2;
use rand::Rng;
use std::f32::consts::TAU;

use crate::color::Rgba;
use crate::config::NodeOptions;
use crate::pointer::{PointerState, POINTER_MASS};

/// Distance at which pointer influence on opacity falls to zero.
pub const POINTER_FALLOFF_DISTANCE: f32 = 300.0;
/// Freshly created nodes receive an extra opacity bonus for this long.
pub const FADE_IN_DURATION_MS: f64 = 1000.0;
pub const FADE_IN_START_OPACITY: f32 = 0.8;
/// Time base of the relaxation step toward the pull target.
const RELAXATION_DURATION_MS: f32 = 1000.0;

/// One grid-anchored particle. The origin is fixed at construction; the live
/// position relaxes toward a pointer-weighted pull target every frame.
#[derive(Clone, Debug)]
pub struct Node {
    pub pos: Vec2,
    origin: Vec2,
    pub diameter: f32,
    pub damping: f32,
    pub spring: f32,
    pub mass: f32,
    pub size: f32,
    pub color: Rgba,
    pub angle_offset: f32,
    pub index: usize,
}

impl Node {
    pub fn new(x: f32, y: f32, index: usize, options: &NodeOptions, rng: &mut impl Rng) -> Self {
        let pos = Vec2::new(x + options.dx.sample(rng), y + options.dy.sample(rng));
        Self {
            pos,
            origin: pos,
            diameter: options.diameter.sample(rng),
            damping: options.damping.sample(rng),
            spring: options.spring.sample(rng),
            mass: options.mass,
            size: options.size,
            color: options.color,
            angle_offset: rng.gen::<f32>() * TAU,
            index,
        }
    }

    pub fn origin(&self) -> Vec2 {
        self.origin
    }

    /// Advance one frame: relax toward the pull target and recompute opacity
    /// from pointer distance, with a fade-in bonus while the node is young.
    pub fn update(&mut self, t_ms: f64, pointer: &PointerState) {
        let target = pull_target(pointer.position(), POINTER_MASS, self.origin, self.mass);
        self.move_toward(target);

        let distance = self.pos.distance(pointer.position());
        let mut opacity = (1.0 - distance / POINTER_FALLOFF_DISTANCE).max(0.0);
        if t_ms < FADE_IN_DURATION_MS {
            opacity += FADE_IN_START_OPACITY - (t_ms / FADE_IN_DURATION_MS) as f32;
        }
        self.color.a = opacity;
    }

    /// Relaxation step: close `spring * distance / (1000 * damping)` of the
    /// remaining gap. Approaches the target asymptotically, never reaching
    /// it.
    fn move_toward(&mut self, target: Vec2) {
        let delta = target - self.pos;
        let fraction = self.spring * delta.length() / (RELAXATION_DURATION_MS * self.damping);
        self.pos += delta * fraction;
    }

    /// Extension hook, not called by the default update path: circular
    /// motion around the origin, angular speed proportional to damping.
    pub fn orbit(&mut self, t_ms: f64) {
        let theta = (self.damping * (t_ms / 1000.0) as f32 * TAU + self.angle_offset) % TAU;
        self.pos = self.origin + Vec2::new(theta.cos(), theta.sin()) * (self.diameter / 2.0);
    }

    /// Extension hook, not called by the default update path: time-driven
    /// transition from the default color toward `target`. Inert once `t_ms`
    /// passes `duration_ms`.
    pub fn change_color(&mut self, t_ms: f64, target: Rgba, duration_ms: f64, start_time_ms: f64) {
        if t_ms > duration_ms {
            return;
        }
        let progress = ((t_ms - start_time_ms) / duration_ms) as f32;
        self.color = Rgba::lerp(NodeOptions::default().color, target, progress);
    }
}

/// Point a node's origin is pulled toward, weighted by relative mass. The
/// `max` in the denominator caps the pull factor at `1 / node_mass`, so a
/// pointer closing to zero distance never diverges.
pub fn pull_target(pointer: Vec2, pointer_mass: f32, origin: Vec2, node_mass: f32) -> Vec2 {
    let delta = origin - pointer;
    let distance = delta.length();
    let pull = pointer_mass / (distance.max(pointer_mass) * node_mass);
    origin - delta * pull
}
