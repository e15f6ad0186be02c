//! Motion core for the particle-mesh background effect.
//!
//! Everything here is host-testable: no DOM, no wasm bindings, and no clock
//! reads. The embedding layer feeds in input events, viewport snapshots, and
//! millisecond timestamps; the core answers with node positions and colors
//! for the renderer to draw.

pub mod color;
pub mod config;
pub mod mesh;
pub mod node;
pub mod pointer;
pub mod viewport;

pub use color::Rgba;
pub use config::{ConfigError, MeshOptions, NodeOptions, PointerOptions, RandomRange};
pub use mesh::Mesh;
pub use node::Node;
pub use pointer::{PointerState, PointerTracker};
pub use viewport::{SubscriptionId, Viewport, ViewportDimensions};
