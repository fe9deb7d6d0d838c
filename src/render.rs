//! Render dispatch: turning shapes into primitive draw operations.
//!
//! This module defines the [`Renderer`] capability the scene draws through
//! and the dispatch from each geometry variant to primitive calls. It never
//! owns or mutates scene state — it receives read-only shapes and a mutable
//! renderer handle.
//!
//! The backend is assumed to carry ambient bound-buffer/bound-program state,
//! and draws for different shapes interleave within one frame, so every shape
//! re-uploads its vertices, transform, and color immediately before its draw
//! call rather than relying on residual bindings.

#[cfg(test)]
#[path = "render_test.rs"]
mod render_test;

use crate::color::Rgba;
use crate::consts::FAN_MIN_POINTS;
use crate::geometry::{Point, Polygon, Shape, ShapeKind, Square};
use crate::matrix::Mat3;

/// Primitive topology for vertex upload and draw calls.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Primitive {
    /// Independent segments: every 2 vertices form one line.
    Lines,
    /// Independent triangles: every 3 vertices form one triangle.
    Triangles,
}

/// The rasterization capability the dispatcher draws through.
///
/// Implementations hold whatever backend state they need (GL program, buffer
/// bindings); callers may not assume any state survives between calls.
pub trait Renderer {
    /// Frame-level: set the output viewport. Called once per scene render.
    fn set_viewport(&mut self, width: u32, height: u32);

    /// Frame-level: clear the output. Called once per scene render.
    fn clear(&mut self);

    /// Upload flat `[x0, y0, x1, y1, ...]` vertex coordinates for the next
    /// draw, rebinding whatever backend state the upload depends on.
    fn upload_vertices(&mut self, primitive: Primitive, coords: &[f64]);

    /// Upload the active shape transform.
    fn set_transform(&mut self, transform: &Mat3);

    /// Upload the active draw color.
    fn set_color(&mut self, color: Rgba);

    /// Draw `vertex_count` vertices from the last upload.
    fn draw(&mut self, primitive: Primitive, vertex_count: usize);
}

/// Emit the primitive operations that rasterize `shape`.
pub fn draw_shape<R: Renderer + ?Sized>(renderer: &mut R, shape: &Shape) {
    match shape.kind() {
        ShapeKind::Line(line) => draw_segment(renderer, shape, line.p1, line.p2),
        ShapeKind::Square(square) => draw_square(renderer, shape, square),
        ShapeKind::Polygon(polygon) => draw_polygon(renderer, shape, polygon),
    }
}

/// One segment: 2 vertices, upload order is vertices, transform, color, draw.
fn draw_segment<R: Renderer + ?Sized>(renderer: &mut R, shape: &Shape, a: Point, b: Point) {
    let coords = [a.x, a.y, b.x, b.y];
    renderer.upload_vertices(Primitive::Lines, &coords);
    renderer.set_transform(&shape.transform());
    renderer.set_color(shape.rgba());
    renderer.draw(Primitive::Lines, 2);
}

/// Two triangles covering the square, 6 vertices with the 2 shared corners
/// duplicated: `(x1,y1) (x2,y1) (x1,y2) (x1,y2) (x2,y1) (x2,y2)`.
fn draw_square<R: Renderer + ?Sized>(renderer: &mut R, shape: &Shape, square: &Square) {
    let half = square.size / 2.0;
    let (x1, y1) = (square.center.x - half, square.center.y - half);
    let (x2, y2) = (square.center.x + half, square.center.y + half);
    let coords = [x1, y1, x2, y1, x1, y2, x1, y2, x2, y1, x2, y2];
    renderer.upload_vertices(Primitive::Triangles, &coords);
    renderer.set_transform(&shape.transform());
    renderer.set_color(shape.rgba());
    renderer.draw(Primitive::Triangles, 6);
}

/// Fan triangulation anchored at vertex 0, one draw call per triangle, plus
/// the working-edge overlay.
///
/// The fan fills correctly only for convex (or suitably star-shaped) polygons
/// anchored at vertex 0; a non-convex polygon whose anchor falls outside the
/// kernel mis-triangulates. That is a documented property of the fill, not a
/// condition this code detects.
fn draw_polygon<R: Renderer + ?Sized>(renderer: &mut R, shape: &Shape, polygon: &Polygon) {
    let len = polygon.len();

    // A lone starting vertex has nothing visible yet.
    if len < 2 {
        return;
    }

    // Two committed vertices degrade to a segment between them.
    if len < FAN_MIN_POINTS {
        draw_segment(renderer, shape, polygon.point(0), polygon.point(1));
        return;
    }

    let anchor = polygon.point(0);
    for t in 0..len - 2 {
        let b = polygon.point(t + 1);
        let c = polygon.point(t + 2);
        let coords = [anchor.x, anchor.y, b.x, b.y, c.x, c.y];
        renderer.upload_vertices(Primitive::Triangles, &coords);
        renderer.set_transform(&shape.transform());
        renderer.set_color(shape.rgba());
        renderer.draw(Primitive::Triangles, 3);
    }

    // Working edge from the newest committed vertex to the staged candidate,
    // drawn over the fill so the boundary under construction stays visible.
    // Degenerate (zero length) when nothing is staged.
    let newest = polygon.point(len - 1);
    let edge_end = polygon.pending().unwrap_or(newest);
    draw_segment(renderer, shape, newest, edge_end);
}
