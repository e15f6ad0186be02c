use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::config::{ConfigError, MeshOptions};
use crate::node::Node;
use crate::pointer::PointerTracker;
use crate::viewport::ViewportDimensions;

/// Grow-resizes landing within this window collapse into a single
/// regeneration, scheduled from the latest event.
pub const REGENERATE_DEBOUNCE_MS: f64 = 1000.0;

/// The particle field: owns the node grid and the pointer tracker, advances
/// both once per frame. Rendering is the host layer's job; it reads
/// [`Mesh::nodes`] after each tick.
pub struct Mesh {
    options: MeshOptions,
    dims: ViewportDimensions,
    nodes: Vec<Node>,
    pointer: PointerTracker,
    rng: StdRng,
    started_at: Option<f64>,
    grid_created_at: Option<f64>,
    regenerate_at: Option<f64>,
}

impl Mesh {
    pub fn new(options: MeshOptions, dims: ViewportDimensions) -> Result<Self, ConfigError> {
        options.validate()?;
        let rng = match options.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        let pointer = PointerTracker::new(dims, options.pointer);
        let mut mesh = Self {
            options,
            dims,
            nodes: Vec::new(),
            pointer,
            rng,
            started_at: None,
            grid_created_at: None,
            regenerate_at: None,
        };
        mesh.generate_nodes();
        Ok(mesh)
    }

    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    pub fn dimensions(&self) -> ViewportDimensions {
        self.dims
    }

    pub fn pointer(&self) -> &PointerTracker {
        &self.pointer
    }

    pub fn pointer_mut(&mut self) -> &mut PointerTracker {
        &mut self.pointer
    }

    /// Record the field epoch. Repeated calls within one timeline are no-ops.
    pub fn start(&mut self, now_ms: f64) {
        if self.started_at.is_none() {
            self.started_at = Some(now_ms);
            self.grid_created_at = Some(now_ms);
            log::info!("mesh started: {} nodes", self.nodes.len());
        }
    }

    pub fn is_started(&self) -> bool {
        self.started_at.is_some()
    }

    /// Advance one frame: run any due regeneration, step the tracker, update
    /// every node. No-op until [`Mesh::start`] has been called.
    pub fn tick(&mut self, now_ms: f64) {
        let Some(started_at) = self.started_at else {
            return;
        };
        if self.regenerate_at.is_some_and(|at| now_ms >= at) {
            self.regenerate_at = None;
            self.reset(now_ms);
        }
        self.pointer.step(now_ms);
        let state = self.pointer.state(&self.dims);
        let t = now_ms - self.grid_created_at.unwrap_or(started_at);
        for node in &mut self.nodes {
            node.update(t, &state);
        }
    }

    /// Discard all nodes and regenerate from scratch at the current
    /// dimensions. The grid epoch restarts so the new grid fades in.
    pub fn reset(&mut self, now_ms: f64) {
        self.generate_nodes();
        if self.started_at.is_some() {
            self.grid_created_at = Some(now_ms);
        }
        log::info!("mesh regenerated: {} nodes", self.nodes.len());
    }

    /// Adopt a fresh viewport snapshot. Growing in either axis schedules a
    /// debounced full regeneration; each further resize restarts the window.
    /// Shrinking alone never regenerates.
    pub fn handle_resize(&mut self, dims: ViewportDimensions, now_ms: f64) {
        let old = self.dims;
        self.dims = dims;
        if dims.width > old.width || dims.height > old.height {
            self.regenerate_at = Some(now_ms + REGENERATE_DEBOUNCE_MS);
        }
    }

    /// Cancel pending work and halt the tracker. Safe to call at any point,
    /// any number of times.
    pub fn destroy(&mut self) {
        self.regenerate_at = None;
        self.pointer.detach();
    }

    /// Tile the viewport at the configured spacing: `size/spacing + 1`
    /// columns and rows, iterated inclusive of the boundary row/column.
    fn generate_nodes(&mut self) {
        let columns = (self.dims.width / self.options.x_spacing) as usize + 1;
        let rows = (self.dims.height / self.options.y_spacing) as usize + 1;

        self.nodes.clear();
        self.nodes.reserve((columns + 1) * (rows + 1));
        let mut index = 0;
        for row in 0..=rows {
            for col in 0..=columns {
                index += 1;
                let x = col as f32 * self.options.x_spacing;
                let y = row as f32 * self.options.y_spacing;
                self.nodes
                    .push(Node::new(x, y, index, &self.options.node, &mut self.rng));
            }
        }
    }
}
