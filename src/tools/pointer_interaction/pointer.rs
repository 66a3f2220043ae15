use bevy::prelude::*;

/// A cursor position in normalized device coordinates, recomputed from the
/// current viewport size on every event. `(-1, -1)` is the bottom-left of
/// the viewport, `(1, 1)` the top-right.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointerSample {
    pub ndc: Vec2,
}

impl PointerSample {
    /// Window cursor coordinates have their origin at the top-left, so the
    /// Y axis flips.
    pub fn from_cursor(cursor: Vec2, viewport: Vec2) -> Self {
        Self {
            ndc: Vec2::new(
                (cursor.x / viewport.x) * 2.0 - 1.0,
                1.0 - (cursor.y / viewport.y) * 2.0,
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn viewport_corners_map_to_ndc_corners() {
        let viewport = Vec2::new(1280.0, 720.0);

        let bottom_left = PointerSample::from_cursor(Vec2::new(0.0, 720.0), viewport);
        assert_eq!(bottom_left.ndc, Vec2::new(-1.0, -1.0));

        let top_right = PointerSample::from_cursor(Vec2::new(1280.0, 0.0), viewport);
        assert_eq!(top_right.ndc, Vec2::new(1.0, 1.0));
    }

    #[test]
    fn viewport_center_maps_to_origin() {
        let sample = PointerSample::from_cursor(Vec2::new(640.0, 360.0), Vec2::new(1280.0, 720.0));
        assert_eq!(sample.ndc, Vec2::ZERO);
    }
}
