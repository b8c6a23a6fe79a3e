use slotmap::SlotMap;

use crate::foundation::core::{Rgba8, ViewportSize};
use crate::foundation::error::{PitchError, PitchResult};
use crate::render::backend::{Polyline, PolylineBackend};

slotmap::new_key_type! {
    /// Handle of a drawable polyline inside a [`Scene`].
    pub struct DrawableId;
}

/// Stacking layer. Reference lines are always drawn behind editable lines.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Layer {
    Reference,
    Editable,
}

/// Lifetime counters of a [`Scene`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SceneStats {
    pub created: u64,
    pub destroyed: u64,
    pub presented_frames: u64,
}

/// Retained set of drawables plus their stacking order.
///
/// A drawable exists in the arena from `create` to `destroy`; it is drawn only while attached
/// to a layer.
pub struct Scene<B: PolylineBackend> {
    backend: B,
    lines: SlotMap<DrawableId, B::Line>,
    reference_order: Vec<DrawableId>,
    editable_order: Vec<DrawableId>,
    stats: SceneStats,
}

impl<B: PolylineBackend> Scene<B> {
    pub fn new(backend: B) -> Self {
        Self {
            backend,
            lines: SlotMap::with_key(),
            reference_order: Vec::new(),
            editable_order: Vec::new(),
            stats: SceneStats::default(),
        }
    }

    /// Create a detached drawable.
    pub fn create(&mut self, capacity: usize, color: Rgba8, width: f32) -> DrawableId {
        let line = self.backend.create_line(capacity, color, width);
        self.stats.created += 1;
        self.lines.insert(line)
    }

    /// Attach `id` to `layer`.
    ///
    /// Reference drawables go to the bottom of their layer; editable drawables go on top.
    /// Re-attaching moves the drawable.
    pub fn attach(&mut self, id: DrawableId, layer: Layer) -> PitchResult<()> {
        if !self.lines.contains_key(id) {
            return Err(PitchError::invariant(format!(
                "attach of unknown drawable {id:?}"
            )));
        }
        self.detach(id);
        match layer {
            Layer::Reference => self.reference_order.insert(0, id),
            Layer::Editable => self.editable_order.push(id),
        }
        Ok(())
    }

    /// Remove `id` from its layer, if attached. Returns `true` if it was attached.
    pub fn detach(&mut self, id: DrawableId) -> bool {
        for order in [&mut self.reference_order, &mut self.editable_order] {
            if let Some(pos) = order.iter().position(|&d| d == id) {
                order.remove(pos);
                return true;
            }
        }
        false
    }

    /// Detach and release `id`.
    pub fn destroy(&mut self, id: DrawableId) -> PitchResult<()> {
        self.detach(id);
        let line = self
            .lines
            .remove(id)
            .ok_or_else(|| PitchError::invariant(format!("destroy of unknown drawable {id:?}")))?;
        self.backend.destroy_line(line);
        self.stats.destroyed += 1;
        Ok(())
    }

    /// Release every drawable.
    pub fn destroy_all(&mut self) {
        self.reference_order.clear();
        self.editable_order.clear();
        let ids: Vec<DrawableId> = self.lines.keys().collect();
        for id in ids {
            if let Some(line) = self.lines.remove(id) {
                self.backend.destroy_line(line);
                self.stats.destroyed += 1;
            }
        }
    }

    pub fn get(&self, id: DrawableId) -> Option<&B::Line> {
        self.lines.get(id)
    }

    pub fn get_mut(&mut self, id: DrawableId) -> Option<&mut B::Line> {
        self.lines.get_mut(id)
    }

    /// Number of live drawables, attached or not.
    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    pub fn contains(&self, id: DrawableId) -> bool {
        self.lines.contains_key(id)
    }

    /// Attached drawables, back to front.
    pub fn draw_order(&self) -> impl Iterator<Item = DrawableId> + '_ {
        self.reference_order
            .iter()
            .chain(self.editable_order.iter())
            .copied()
    }

    pub fn layer_of(&self, id: DrawableId) -> Option<Layer> {
        if self.reference_order.contains(&id) {
            Some(Layer::Reference)
        } else if self.editable_order.contains(&id) {
            Some(Layer::Editable)
        } else {
            None
        }
    }

    /// Hand every attached, visible drawable to the backend. Returns how many were drawn.
    pub fn present(&mut self, size: ViewportSize) -> PitchResult<usize> {
        let lines: Vec<&B::Line> = self
            .reference_order
            .iter()
            .chain(self.editable_order.iter())
            .filter_map(|&id| self.lines.get(id))
            .filter(|line| line.is_visible())
            .collect();
        let drawn = lines.len();
        self.backend.present(size, &lines)?;
        self.stats.presented_frames += 1;
        Ok(drawn)
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    pub fn backend_mut(&mut self) -> &mut B {
        &mut self.backend
    }

    pub fn stats(&self) -> SceneStats {
        self.stats
    }

    /// Release every drawable and return the backend.
    pub fn into_backend(mut self) -> B {
        self.destroy_all();
        self.backend
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/scene.rs"]
mod tests;
