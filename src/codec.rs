//! Scene persistence: versioned JSON export/import of the committed list.
//!
//! The document is `{ "version": 1, "shapes": [record, ...] }`. Each record
//! is tagged with its variant (`"kind"`) and carries the transform (9
//! numbers), the raw color string, and the variant's own fields. The preview
//! shape and runtime ids are intentionally not persisted.
//!
//! Import is tolerant per record: a document that is not JSON (or has no
//! `shapes` array) is a hard error, but an unknown tag or malformed record is
//! skipped and reported in [`Import::skipped`] while the well-formed
//! remainder still loads.

#[cfg(test)]
#[path = "codec_test.rs"]
mod codec_test;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::warn;

use crate::color::Color;
use crate::geometry::{Line, Point, Polygon, Shape, ShapeKind, Square};
use crate::matrix::Mat3;
use crate::scene::Scene;

/// Version written into every exported document.
pub const FORMAT_VERSION: u32 = 1;

/// Document-level codec failure. Per-record problems never surface here —
/// they are reported through [`Import::skipped`].
#[derive(Debug, Error)]
pub enum CodecError {
    #[error("scene document is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("scene document has no `shapes` array")]
    MissingShapes,
}

/// A record the importer could not reconstruct, with its array index and the
/// reason it was dropped.
#[derive(Debug, Clone)]
pub struct SkippedRecord {
    pub index: usize,
    pub reason: String,
}

/// Result of a tolerant import: the reconstructed scene plus every record
/// that had to be dropped.
#[derive(Debug)]
pub struct Import {
    pub scene: Scene,
    pub skipped: Vec<SkippedRecord>,
}

#[derive(Serialize)]
struct Document {
    version: u32,
    shapes: Vec<Record>,
}

/// One shape on disk. The serde tag is the variant discriminant; everything
/// else mirrors the shape's fields.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
enum Record {
    Line {
        point1: Point,
        point2: Point,
        transform: Mat3,
        color: Color,
    },
    Square {
        center: Point,
        size: f64,
        transform: Mat3,
        color: Color,
    },
    Polygon {
        points: Vec<Point>,
        transform: Mat3,
        color: Color,
    },
}

impl Record {
    fn from_shape(shape: &Shape) -> Self {
        let transform = shape.transform();
        let color = Color::new(shape.color());
        match shape.kind() {
            ShapeKind::Line(line) => Record::Line {
                point1: line.p1,
                point2: line.p2,
                transform,
                color,
            },
            ShapeKind::Square(square) => Record::Square {
                center: square.center,
                size: square.size,
                transform,
                color,
            },
            ShapeKind::Polygon(polygon) => Record::Polygon {
                points: polygon.points().to_vec(),
                transform,
                color,
            },
        }
    }

    /// Reconstruct the shape: build the variant first (identity transform),
    /// then restore the persisted transform. `None` when the record holds no
    /// usable geometry (a polygon with no points).
    fn into_shape(self) -> Option<Shape> {
        let (kind, transform, color) = match self {
            Record::Line { point1, point2, transform, color } => {
                (ShapeKind::Line(Line { p1: point1, p2: point2 }), transform, color)
            }
            Record::Square { center, size, transform, color } => {
                (ShapeKind::Square(Square { center, size }), transform, color)
            }
            Record::Polygon { points, transform, color } => {
                (ShapeKind::Polygon(Polygon::from_points(points)?), transform, color)
            }
        };
        let mut shape = Shape::new(kind, color.as_str());
        shape.set_transform(transform);
        Some(shape)
    }
}

/// Serialize the committed list (never the preview) to the JSON document.
///
/// # Errors
///
/// Returns [`CodecError::Json`] if serialization fails.
pub fn export(scene: &Scene) -> Result<String, CodecError> {
    let document = Document {
        version: FORMAT_VERSION,
        shapes: scene.shapes().iter().map(Record::from_shape).collect(),
    };
    Ok(serde_json::to_string_pretty(&document)?)
}

/// Parse a scene document, reconstructing records in order. Records that
/// cannot be reconstructed are skipped and reported, not fatal.
///
/// # Errors
///
/// Returns [`CodecError::Json`] for a document that is not JSON and
/// [`CodecError::MissingShapes`] for one without a `shapes` array.
pub fn import(text: &str) -> Result<Import, CodecError> {
    let document: serde_json::Value = serde_json::from_str(text)?;
    let Some(records) = document.get("shapes").and_then(serde_json::Value::as_array) else {
        return Err(CodecError::MissingShapes);
    };

    let mut shapes = Vec::new();
    let mut skipped = Vec::new();
    for (index, raw) in records.iter().enumerate() {
        match serde_json::from_value::<Record>(raw.clone()) {
            Ok(record) => match record.into_shape() {
                Some(shape) => shapes.push(shape),
                None => {
                    warn!(index, "skipping polygon record with no points");
                    skipped.push(SkippedRecord {
                        index,
                        reason: "polygon record has no points".to_owned(),
                    });
                }
            },
            Err(err) => {
                warn!(index, error = %err, "skipping unreadable scene record");
                skipped.push(SkippedRecord { index, reason: err.to_string() });
            }
        }
    }

    Ok(Import { scene: Scene::from_shapes(shapes), skipped })
}
