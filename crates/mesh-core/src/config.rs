use rand::Rng;
use thiserror::Error;

use crate::color::Rgba;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid range for {field}: min {min} > max {max}")]
    InvalidRange {
        field: &'static str,
        min: f32,
        max: f32,
    },
    #[error("{field} must be positive (got {value})")]
    NonPositive { field: &'static str, value: f32 },
    #[error("{field} must be non-zero")]
    ZeroLimit { field: &'static str },
}

/// Inclusive range a randomized node parameter is drawn from.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RandomRange {
    pub min: f32,
    pub max: f32,
}

impl RandomRange {
    pub const fn new(min: f32, max: f32) -> Self {
        Self { min, max }
    }

    /// A degenerate range that always yields `value`.
    pub const fn fixed(value: f32) -> Self {
        Self {
            min: value,
            max: value,
        }
    }

    pub fn sample(&self, rng: &mut impl Rng) -> f32 {
        rng.gen_range(self.min..=self.max)
    }

    fn validate(&self, field: &'static str) -> Result<(), ConfigError> {
        if self.min > self.max {
            return Err(ConfigError::InvalidRange {
                field,
                min: self.min,
                max: self.max,
            });
        }
        Ok(())
    }
}

/// Per-node construction parameters. Ranges are sampled once per node.
#[derive(Clone, Debug)]
pub struct NodeOptions {
    pub color: Rgba,
    /// Jitter from the grid origin, per axis.
    pub dx: RandomRange,
    pub dy: RandomRange,
    /// Orbit circle diameter.
    pub diameter: RandomRange,
    pub damping: RandomRange,
    pub spring: RandomRange,
    /// Render radius.
    pub size: f32,
    pub mass: f32,
}

impl Default for NodeOptions {
    fn default() -> Self {
        Self {
            color: Rgba::BLACK,
            dx: RandomRange::fixed(0.0),
            dy: RandomRange::fixed(0.0),
            diameter: RandomRange::new(1.0, 2.0),
            damping: RandomRange::fixed(2.0),
            spring: RandomRange::fixed(1.0),
            size: 1.0,
            mass: 1.0,
        }
    }
}

impl NodeOptions {
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.dx.validate("node.dx")?;
        self.dy.validate("node.dy")?;
        self.diameter.validate("node.diameter")?;
        self.damping.validate("node.damping")?;
        self.spring.validate("node.spring")?;
        if self.mass <= 0.0 {
            return Err(ConfigError::NonPositive {
                field: "node.mass",
                value: self.mass,
            });
        }
        Ok(())
    }
}

/// Device-orientation mapping parameters.
#[derive(Clone, Copy, Debug)]
pub struct PointerOptions {
    /// Offset added to the left/right tilt so a comfortable holding angle
    /// reads as centred.
    pub holding_angle: f32,
    /// Tilt (degrees) that maps to the full viewport width.
    pub x_limit: f32,
    /// Tilt (degrees) that maps to the full viewport height.
    pub y_limit: f32,
}

impl Default for PointerOptions {
    fn default() -> Self {
        Self {
            holding_angle: 40.0,
            x_limit: 90.0,
            y_limit: 90.0,
        }
    }
}

impl PointerOptions {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.x_limit == 0.0 {
            return Err(ConfigError::ZeroLimit {
                field: "pointer.x_limit",
            });
        }
        if self.y_limit == 0.0 {
            return Err(ConfigError::ZeroLimit {
                field: "pointer.y_limit",
            });
        }
        Ok(())
    }
}

/// Field construction options. Defaults are applied by `Default` and the
/// whole struct is validated once, at mesh construction.
#[derive(Clone, Debug)]
pub struct MeshOptions {
    pub x_spacing: f32,
    pub y_spacing: f32,
    /// Reserved; not consumed by the motion model.
    pub duration: f32,
    pub node: NodeOptions,
    pub pointer: PointerOptions,
    /// Fixed seed for deterministic grids; entropy-seeded when `None`.
    pub seed: Option<u64>,
}

impl Default for MeshOptions {
    fn default() -> Self {
        Self {
            x_spacing: 60.0,
            y_spacing: 60.0,
            duration: 60.0,
            node: NodeOptions::default(),
            pointer: PointerOptions::default(),
            seed: None,
        }
    }
}

impl MeshOptions {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.x_spacing <= 0.0 {
            return Err(ConfigError::NonPositive {
                field: "x_spacing",
                value: self.x_spacing,
            });
        }
        if self.y_spacing <= 0.0 {
            return Err(ConfigError::NonPositive {
                field: "y_spacing",
                value: self.y_spacing,
            });
        }
        self.node.validate()?;
        self.pointer.validate()?;
        Ok(())
    }
}
