use fnv::FnvHashMap;
use smallvec::SmallVec;

/// Resize notifications are delivered at most once per this window;
/// intermediate events refresh the cache but are not fanned out.
const RESIZE_NOTIFY_INTERVAL_MS: f64 = 20.0;

/// Read-only snapshot of the embedding viewport.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct ViewportDimensions {
    pub width: f32,
    pub height: f32,
    pub scroll_height: f32,
}

impl ViewportDimensions {
    pub const fn new(width: f32, height: f32, scroll_height: f32) -> Self {
        Self {
            width,
            height,
            scroll_height,
        }
    }

    pub fn aspect_ratio(&self) -> f32 {
        if self.width == 0.0 {
            0.0
        } else {
            self.height / self.width
        }
    }
}

/// Opaque handle returned by [`Viewport::subscribe_resize`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
enum EventKind {
    Resize,
}

type ResizeCallback = Box<dyn FnMut(ViewportDimensions)>;

/// Explicitly constructed viewport service: caches the latest dimensions and
/// fans resize notifications out to a typed subscriber registry.
///
/// The host layer owns the actual DOM queries and feeds fresh snapshots in
/// through [`Viewport::handle_resize`].
pub struct Viewport {
    dims: ViewportDimensions,
    next_id: u64,
    // Token -> event kind, so unsubscribe can route without the caller
    // naming the event.
    kinds: FnvHashMap<u64, EventKind>,
    resize: SmallVec<[(u64, ResizeCallback); 2]>,
    last_notified_at: Option<f64>,
}

impl Viewport {
    pub fn new(dims: ViewportDimensions) -> Self {
        Self {
            dims,
            next_id: 0,
            kinds: FnvHashMap::default(),
            resize: SmallVec::new(),
            last_notified_at: None,
        }
    }

    /// Pure read of the cached snapshot.
    pub fn dimensions(&self) -> ViewportDimensions {
        self.dims
    }

    pub fn aspect_ratio(&self) -> f32 {
        self.dims.aspect_ratio()
    }

    pub fn subscribe_resize(
        &mut self,
        callback: impl FnMut(ViewportDimensions) + 'static,
    ) -> SubscriptionId {
        let id = self.next_id;
        self.next_id += 1;
        self.kinds.insert(id, EventKind::Resize);
        self.resize.push((id, Box::new(callback)));
        SubscriptionId(id)
    }

    /// Unknown tokens are tolerated: warn and carry on.
    pub fn unsubscribe(&mut self, id: SubscriptionId) {
        match self.kinds.remove(&id.0) {
            Some(EventKind::Resize) => self.resize.retain(|(sid, _)| *sid != id.0),
            None => log::warn!("unsubscribe: unknown subscription {:?}", id),
        }
    }

    /// Adopt a fresh snapshot and notify resize subscribers (throttled).
    pub fn handle_resize(&mut self, dims: ViewportDimensions, now_ms: f64) {
        self.dims = dims;
        if let Some(last) = self.last_notified_at {
            if now_ms - last < RESIZE_NOTIFY_INTERVAL_MS {
                return;
            }
        }
        self.last_notified_at = Some(now_ms);
        for (_, callback) in self.resize.iter_mut() {
            callback(dims);
        }
    }
}
