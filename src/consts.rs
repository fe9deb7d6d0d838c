//! Shared policy constants for the sketch crate.

/// Default stroke color for newly created shapes.
pub const DEFAULT_COLOR: &str = "#000000";

/// Fewest committed vertices for which a polygon renders as a filled fan.
/// Below this, two points degrade to a line and one point draws nothing.
pub const FAN_MIN_POINTS: usize = 3;
