//! Editor surface: the entry points the UI layer drives.
//!
//! [`Editor`] is the pure, testable core — it owns the [`Scene`] and turns
//! discrete editing events (begin shape, stage point, commit point, finish,
//! recolor, transform, undo) into scene mutations. [`CanvasEngine`] is the
//! thin browser-bound wrapper that pairs an `Editor` with the WebGL backend
//! and the canvas element it draws into.
//!
//! The *when* of these events — pointer handling, button wiring — belongs to
//! the host; this module only defines *what* each event does to the scene.

#[cfg(test)]
#[path = "engine_test.rs"]
mod engine_test;

use wasm_bindgen::JsValue;
use web_sys::HtmlCanvasElement;

use crate::codec::{self, CodecError, Import, SkippedRecord};
use crate::geometry::{Point, Shape, ShapeId, ShapeKind};
use crate::gl::GlRenderer;
use crate::matrix::Mat3;
use crate::scene::Scene;

/// Which shape the user is about to draw.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToolKind {
    Line,
    Square,
    Polygon,
}

/// Parameters of an interactive transform edit, combined as rotate, then
/// scale, then translate.
#[derive(Debug, Clone, Copy)]
pub struct TransformParams {
    pub tx: f64,
    pub ty: f64,
    pub rotate_deg: f64,
    pub scale_x: f64,
    pub scale_y: f64,
}

impl TransformParams {
    /// The combined matrix: `rotation · scale · translation` in the crate's
    /// row-vector convention, so a point is rotated, then scaled, then
    /// translated.
    #[must_use]
    pub fn matrix(&self) -> Mat3 {
        Mat3::rotation_deg(self.rotate_deg)
            .multiply(Mat3::scaling(self.scale_x, self.scale_y))
            .multiply(Mat3::translation(self.tx, self.ty))
    }
}

impl Default for TransformParams {
    fn default() -> Self {
        Self { tx: 0.0, ty: 0.0, rotate_deg: 0.0, scale_x: 1.0, scale_y: 1.0 }
    }
}

/// The editing core. All state lives in the owned [`Scene`]; no browser
/// dependencies, so the full editing surface is testable natively.
#[derive(Debug, Default)]
pub struct Editor {
    scene: Scene,
}

impl Editor {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    pub fn scene_mut(&mut self) -> &mut Scene {
        &mut self.scene
    }

    // --- Drawing lifecycle ---

    /// Start drawing: the preview slot gets a fresh shape anchored at `at`.
    /// A line starts with both endpoints at `at`, a square with size 0, a
    /// polygon with its single starting vertex.
    pub fn begin_shape(&mut self, tool: ToolKind, at: Point, color: &str) {
        let shape = match tool {
            ToolKind::Line => Shape::line(at, at, color),
            ToolKind::Square => Shape::square(at, 0.0, color),
            ToolKind::Polygon => Shape::polygon(at, color),
        };
        self.scene.set_drawn(shape);
    }

    /// Track the pointer while drawing: a line moves its free endpoint, a
    /// square grows so `p` lies on its boundary, a polygon stages `p` as the
    /// candidate next vertex. No-op when nothing is being drawn.
    pub fn stage_point(&mut self, p: Point) {
        let Some(shape) = self.scene.drawn_mut() else {
            return;
        };
        match shape.kind_mut() {
            ShapeKind::Line(line) => line.p2 = p,
            ShapeKind::Square(square) => {
                let dx = (p.x - square.center.x).abs();
                let dy = (p.y - square.center.y).abs();
                square.size = 2.0 * dx.max(dy);
            }
            ShapeKind::Polygon(polygon) => polygon.stage_point(p),
        }
    }

    /// Confirm the staged polygon vertex. No-op for other kinds, when
    /// nothing is staged, or when nothing is being drawn.
    pub fn commit_point(&mut self) {
        let Some(shape) = self.scene.drawn_mut() else {
            return;
        };
        if let ShapeKind::Polygon(polygon) = shape.kind_mut() {
            polygon.commit_point();
        }
    }

    /// Move the preview into the committed list, returning its id. `None`
    /// when nothing is being drawn.
    pub fn finish_shape(&mut self) -> Option<ShapeId> {
        let shape = self.scene.clear_drawn()?;
        Some(self.scene.add(shape))
    }

    /// Discard the preview without committing it.
    pub fn cancel_shape(&mut self) {
        self.scene.clear_drawn();
    }

    // --- Edits on committed shapes ---

    /// Recolor a committed shape. Returns `false` when `id` is not present.
    pub fn set_color(&mut self, id: ShapeId, color: &str) -> bool {
        self.scene.set_color(id, color)
    }

    /// Accumulate a transform edit onto a committed shape. Returns `false`
    /// when `id` is not present.
    pub fn apply_transform(&mut self, id: ShapeId, params: &TransformParams) -> bool {
        self.scene.concat_transform(id, params.matrix())
    }

    /// Drop the newest `n` committed shapes (clamped to the current count).
    pub fn undo_last(&mut self, n: usize) {
        self.scene.undo_last(n);
    }

    /// Remove and return the newest committed shape, if any.
    pub fn remove_newest(&mut self) -> Option<Shape> {
        self.scene.remove_newest()
    }

    // --- Persistence ---

    /// Serialize the committed scene.
    ///
    /// # Errors
    ///
    /// Propagates [`CodecError`] from the codec.
    pub fn export_scene(&self) -> Result<String, CodecError> {
        codec::export(&self.scene)
    }

    /// Replace the committed scene with the one in `text`, discarding any
    /// preview. Returns the records that had to be skipped.
    ///
    /// # Errors
    ///
    /// Propagates [`CodecError`] for a document that cannot be parsed at all;
    /// the current scene is left untouched in that case.
    pub fn import_scene(&mut self, text: &str) -> Result<Vec<SkippedRecord>, CodecError> {
        let Import { scene, skipped } = codec::import(text)?;
        self.scene = scene;
        Ok(skipped)
    }
}

/// The full canvas engine: an [`Editor`] bound to a browser canvas and the
/// WebGL backend that rasterizes into it.
pub struct CanvasEngine {
    canvas: HtmlCanvasElement,
    renderer: GlRenderer,
    pub editor: Editor,
}

impl CanvasEngine {
    /// Bind to `canvas`, acquiring a WebGL context and compiling the shader
    /// program.
    ///
    /// # Errors
    ///
    /// Returns the backend's `JsValue` error when WebGL is unavailable or the
    /// shaders fail to compile or link.
    pub fn new(canvas: HtmlCanvasElement) -> Result<Self, JsValue> {
        let renderer = GlRenderer::new(&canvas)?;
        Ok(Self { canvas, renderer, editor: Editor::new() })
    }

    /// Draw the current scene at the canvas's pixel dimensions.
    pub fn render(&mut self) {
        let width = self.canvas.width();
        let height = self.canvas.height();
        self.editor.scene().render(&mut self.renderer, width, height);
    }
}
