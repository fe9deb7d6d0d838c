//! Shape model: the geometry variants a scene can hold.
//!
//! A [`Shape`] pairs a geometry variant ([`ShapeKind`]) with the state every
//! variant carries: a runtime id, an affine transform (identity by default),
//! and a color. The variant discriminant is fixed at construction; transform
//! and color stay mutable for interactive editing.
//!
//! Polygons grow through a two-phase stage/commit protocol so the UI can show
//! a live preview edge before a vertex is confirmed: [`Polygon::stage_point`]
//! proposes a candidate and [`Polygon::commit_point`] moves it into the
//! committed sequence.

#[cfg(test)]
#[path = "geometry_test.rs"]
mod geometry_test;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::color::{Color, Rgba};
use crate::matrix::Mat3;

/// Unique runtime identifier for a shape. Not persisted by the codec.
pub type ShapeId = Uuid;

/// A point in world coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    #[must_use]
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// A straight segment between two endpoints, each independently replaceable.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Line {
    pub p1: Point,
    pub p2: Point,
}

/// An axis-aligned square described by its center and edge length.
///
/// `size` 0 is legal: a degenerate point square that rasterizes to a
/// zero-area quad.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Square {
    pub center: Point,
    pub size: f64,
}

/// A freehand polygon: at least one committed vertex plus an optional staged
/// candidate awaiting confirmation.
#[derive(Debug, Clone, PartialEq)]
pub struct Polygon {
    points: Vec<Point>,
    pending: Option<Point>,
}

impl Polygon {
    /// A polygon with a single committed starting vertex.
    #[must_use]
    pub fn new(start: Point) -> Self {
        Self { points: vec![start], pending: None }
    }

    /// Rebuild a polygon from an already-committed vertex sequence.
    /// Returns `None` for an empty sequence — a polygon always has at least
    /// one committed vertex.
    #[must_use]
    pub fn from_points(points: Vec<Point>) -> Option<Self> {
        if points.is_empty() {
            return None;
        }
        Some(Self { points, pending: None })
    }

    /// Number of committed vertices.
    #[must_use]
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Always `false`: a polygon carries at least its starting vertex.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// The committed vertex at `i`.
    ///
    /// # Panics
    ///
    /// Panics when `i` is outside `[0, len)`; indices are a caller contract.
    #[must_use]
    pub fn point(&self, i: usize) -> Point {
        self.points[i]
    }

    /// All committed vertices in order.
    #[must_use]
    pub fn points(&self) -> &[Point] {
        &self.points
    }

    /// The staged candidate vertex, if any.
    #[must_use]
    pub fn pending(&self) -> Option<Point> {
        self.pending
    }

    /// Stage `p` as the candidate next vertex, replacing any prior candidate.
    pub fn stage_point(&mut self, p: Point) {
        self.pending = Some(p);
    }

    /// Append the staged candidate to the committed sequence and clear it.
    /// No-op when nothing is staged.
    pub fn commit_point(&mut self) {
        if let Some(p) = self.pending.take() {
            self.points.push(p);
        }
    }

    /// Translate the committed vertex at `i` by `(dx, dy)`, bypassing the
    /// shape transform.
    ///
    /// # Panics
    ///
    /// Panics when `i` is outside `[0, len)`.
    pub fn move_point(&mut self, i: usize, dx: f64, dy: f64) {
        let p = &mut self.points[i];
        p.x += dx;
        p.y += dy;
    }

    /// Replace the committed vertex at `i`.
    ///
    /// # Panics
    ///
    /// Panics when `i` is outside `[0, len)`.
    pub fn set_point(&mut self, i: usize, p: Point) {
        self.points[i] = p;
    }
}

/// The geometry variant of a shape.
#[derive(Debug, Clone, PartialEq)]
pub enum ShapeKind {
    Line(Line),
    Square(Square),
    Polygon(Polygon),
}

/// A shape on the sketch surface: one geometry variant plus the transform and
/// color every variant carries.
#[derive(Debug, Clone, PartialEq)]
pub struct Shape {
    id: ShapeId,
    kind: ShapeKind,
    transform: Mat3,
    color: Color,
}

impl Shape {
    /// A shape around an existing geometry variant, with identity transform
    /// and a fresh id.
    #[must_use]
    pub fn new(kind: ShapeKind, color: &str) -> Self {
        Self {
            id: Uuid::new_v4(),
            kind,
            transform: Mat3::IDENTITY,
            color: Color::new(color),
        }
    }

    /// A line between `p1` and `p2`.
    #[must_use]
    pub fn line(p1: Point, p2: Point, color: &str) -> Self {
        Self::new(ShapeKind::Line(Line { p1, p2 }), color)
    }

    /// A square centered at `center` with edge length `size`.
    #[must_use]
    pub fn square(center: Point, size: f64, color: &str) -> Self {
        Self::new(ShapeKind::Square(Square { center, size }), color)
    }

    /// A polygon with a single committed starting vertex.
    #[must_use]
    pub fn polygon(start: Point, color: &str) -> Self {
        Self::new(ShapeKind::Polygon(Polygon::new(start)), color)
    }

    #[must_use]
    pub fn id(&self) -> ShapeId {
        self.id
    }

    #[must_use]
    pub fn kind(&self) -> &ShapeKind {
        &self.kind
    }

    /// Mutable access to the geometry variant. The discriminant itself never
    /// changes after construction; callers edit fields within the variant.
    pub fn kind_mut(&mut self) -> &mut ShapeKind {
        &mut self.kind
    }

    #[must_use]
    pub fn transform(&self) -> Mat3 {
        self.transform
    }

    /// Replace the transform outright.
    pub fn set_transform(&mut self, m: Mat3) {
        self.transform = m;
    }

    /// Accumulate `m` onto the current transform: the stored transform
    /// becomes `current · m`, so repeated edits compose instead of replacing
    /// each other.
    pub fn concat_transform(&mut self, m: Mat3) {
        self.transform = self.transform.multiply(m);
    }

    /// The raw color string, exactly as set.
    #[must_use]
    pub fn color(&self) -> &str {
        self.color.as_str()
    }

    pub fn set_color(&mut self, color: &str) {
        self.color = Color::new(color);
    }

    /// The decoded color (opaque white when the string is not valid hex).
    #[must_use]
    pub fn rgba(&self) -> Rgba {
        self.color.rgba()
    }
}
