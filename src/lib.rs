//! Scene/geometry core and render dispatch for a 2D vector-sketching surface.
//!
//! This crate owns what is on the sketch surface and how it turns into draw
//! calls: the shape model (lines, squares, freehand polygons, each with an
//! affine transform and a color), the ordered scene those shapes live in, the
//! dispatch from each shape to primitive operations against a pluggable
//! [`render::Renderer`] backend, and the JSON persistence format. It is
//! compiled to WebAssembly for the browser frontend and natively for the test
//! suite; only [`gl`] and the canvas-bound wrapper in [`engine`] touch
//! browser APIs.
//!
//! ## Module layout
//!
//! | Module | Role |
//! |--------|------|
//! | [`engine`] | Editor entry points ([`engine::Editor`]) and the canvas-bound [`engine::CanvasEngine`] |
//! | [`scene`] | Ordered shape list plus the in-progress preview slot |
//! | [`geometry`] | Shape model: line, square, polygon and the stage/commit protocol |
//! | [`render`] | [`render::Renderer`] capability and per-shape draw dispatch |
//! | [`codec`] | Versioned JSON export/import of the committed scene |
//! | [`matrix`] | 3×3 affine transforms |
//! | [`color`] | Hex color strings and normalized RGBA decoding |
//! | [`gl`] | WebGL implementation of the renderer capability |
//! | [`consts`] | Shared policy constants |

pub mod codec;
pub mod color;
pub mod consts;
pub mod engine;
pub mod geometry;
pub mod gl;
pub mod matrix;
pub mod render;
pub mod scene;
