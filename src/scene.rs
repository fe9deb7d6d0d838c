//! The scene: an ordered shape list plus the in-progress preview slot.
//!
//! Insertion order is draw order is paint order — index 0 is the oldest
//! surviving shape and later shapes draw on top. At most one transient
//! preview shape (the one the user is still drawing) sits outside the
//! committed list; it renders last every frame and is never persisted.

#[cfg(test)]
#[path = "scene_test.rs"]
mod scene_test;

use crate::geometry::{Shape, ShapeId};
use crate::matrix::Mat3;
use crate::render::{Renderer, draw_shape};

/// Ordered, mutable collection of committed shapes plus the preview slot.
#[derive(Debug, Default)]
pub struct Scene {
    shapes: Vec<Shape>,
    drawn: Option<Shape>,
}

impl Scene {
    /// An empty scene.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// A scene holding an already-committed shape list, in order.
    #[must_use]
    pub fn from_shapes(shapes: Vec<Shape>) -> Self {
        Self { shapes, drawn: None }
    }

    // --- Committed list ---

    /// Append a shape; it becomes the topmost. Returns its id.
    pub fn add(&mut self, shape: Shape) -> ShapeId {
        let id = shape.id();
        self.shapes.push(shape);
        id
    }

    /// Remove and return the newest committed shape. `None` (not an error)
    /// when the scene is empty.
    pub fn remove_newest(&mut self) -> Option<Shape> {
        self.shapes.pop()
    }

    /// Drop the newest `n` committed shapes, clamped to the current length —
    /// asking for more than exists empties the scene without error.
    pub fn undo_last(&mut self, n: usize) {
        let keep = self.shapes.len().saturating_sub(n);
        self.shapes.truncate(keep);
    }

    /// Swap in `shape` at the slot currently held by `id`, keeping the draw
    /// order. Returns `false` when `id` is not present.
    pub fn replace(&mut self, id: ShapeId, shape: Shape) -> bool {
        match self.shapes.iter_mut().find(|s| s.id() == id) {
            Some(slot) => {
                *slot = shape;
                true
            }
            None => false,
        }
    }

    /// The committed shape with `id`.
    #[must_use]
    pub fn shape(&self, id: ShapeId) -> Option<&Shape> {
        self.shapes.iter().find(|s| s.id() == id)
    }

    /// Mutable access to the committed shape with `id`.
    pub fn shape_mut(&mut self, id: ShapeId) -> Option<&mut Shape> {
        self.shapes.iter_mut().find(|s| s.id() == id)
    }

    /// Recolor the committed shape with `id`, any variant. Returns `false`
    /// when `id` is not present.
    pub fn set_color(&mut self, id: ShapeId, color: &str) -> bool {
        match self.shape_mut(id) {
            Some(shape) => {
                shape.set_color(color);
                true
            }
            None => false,
        }
    }

    /// Accumulate `m` onto the transform of the committed shape with `id`.
    /// Returns `false` when `id` is not present.
    pub fn concat_transform(&mut self, id: ShapeId, m: Mat3) -> bool {
        match self.shape_mut(id) {
            Some(shape) => {
                shape.concat_transform(m);
                true
            }
            None => false,
        }
    }

    /// All committed shapes, oldest first.
    #[must_use]
    pub fn shapes(&self) -> &[Shape] {
        &self.shapes
    }

    /// Number of committed shapes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.shapes.len()
    }

    /// Whether the committed list is empty (the preview does not count).
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.shapes.is_empty()
    }

    // --- Preview slot ---

    /// Set the transient preview shape, replacing any previous one.
    pub fn set_drawn(&mut self, shape: Shape) {
        self.drawn = Some(shape);
    }

    /// Take the preview shape out of its slot, if present.
    pub fn clear_drawn(&mut self) -> Option<Shape> {
        self.drawn.take()
    }

    /// The preview shape, if one is being drawn.
    #[must_use]
    pub fn drawn(&self) -> Option<&Shape> {
        self.drawn.as_ref()
    }

    /// Mutable access to the preview shape.
    pub fn drawn_mut(&mut self) -> Option<&mut Shape> {
        self.drawn.as_mut()
    }

    // --- Rendering ---

    /// Draw the whole scene: viewport and clear once, then every committed
    /// shape in order, then the preview on top.
    pub fn render<R: Renderer + ?Sized>(&self, renderer: &mut R, viewport_w: u32, viewport_h: u32) {
        renderer.set_viewport(viewport_w, viewport_h);
        renderer.clear();

        for shape in &self.shapes {
            draw_shape(renderer, shape);
        }

        if let Some(shape) = &self.drawn {
            draw_shape(renderer, shape);
        }
    }
}
