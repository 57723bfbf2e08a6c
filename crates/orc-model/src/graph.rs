//! Size limits for rendered statistics graphs.
//!
//! Requested dimensions come from query strings and per-instance settings,
//! so they are clamped here before any rendering math sees them.

/// Default rendered graph width in pixels.
pub const DEFAULT_GRAPH_WIDTH: u32 = 250;

/// Default rendered graph height in pixels.
pub const DEFAULT_GRAPH_HEIGHT: u32 = 100;

/// Upper bound for a requested graph width.
pub const MAX_GRAPH_WIDTH: u32 = 2048;

/// Upper bound for a requested graph height.
pub const MAX_GRAPH_HEIGHT: u32 = 1024;

/// Per-instance property key overriding the default graph width.
pub const PROP_GRAPH_WIDTH: &str = "console.graph.width";

/// Per-instance property key overriding the default graph height.
pub const PROP_GRAPH_HEIGHT: &str = "console.graph.height";

/// Clamp a requested width into the renderable range.
pub fn clamp_width(requested: Option<i64>) -> u32 {
    clamp_dimension(requested, DEFAULT_GRAPH_WIDTH, MAX_GRAPH_WIDTH)
}

/// Clamp a requested height into the renderable range.
pub fn clamp_height(requested: Option<i64>) -> u32 {
    clamp_dimension(requested, DEFAULT_GRAPH_HEIGHT, MAX_GRAPH_HEIGHT)
}

/// Shared clamping rule for both axes.
///
/// Above the maximum clamps to the maximum; zero, negative or absent falls
/// back to the default; anything in range passes through unchanged.
fn clamp_dimension(requested: Option<i64>, default: u32, max: u32) -> u32 {
    match requested {
        None => default,
        Some(v) if v <= 0 => default,
        Some(v) if v > i64::from(max) => max,
        Some(v) => v as u32,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn absent_dimension_falls_back_to_default() {
        assert_eq!(clamp_width(None), DEFAULT_GRAPH_WIDTH);
        assert_eq!(clamp_height(None), DEFAULT_GRAPH_HEIGHT);
    }

    #[test]
    fn zero_and_negative_fall_back_to_default() {
        assert_eq!(clamp_width(Some(0)), DEFAULT_GRAPH_WIDTH);
        assert_eq!(clamp_width(Some(-5)), DEFAULT_GRAPH_WIDTH);
        assert_eq!(clamp_height(Some(i64::MIN)), DEFAULT_GRAPH_HEIGHT);
    }

    #[test]
    fn oversized_dimension_clamps_to_max() {
        assert_eq!(clamp_width(Some(5000)), MAX_GRAPH_WIDTH);
        assert_eq!(clamp_height(Some(i64::MAX)), MAX_GRAPH_HEIGHT);
    }

    #[test]
    fn in_range_dimension_passes_through() {
        assert_eq!(clamp_width(Some(640)), 640);
        assert_eq!(clamp_height(Some(480)), 480);
        assert_eq!(clamp_width(Some(i64::from(MAX_GRAPH_WIDTH))), MAX_GRAPH_WIDTH);
        assert_eq!(clamp_height(Some(1)), 1);
    }
}
