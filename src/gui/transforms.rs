//! Transforms between coordinate systems (world units <=> screen pixels).

use eframe::egui::Pos2;

/// A uniform scale plus translation mapping a world rect onto a screen
/// rect, letterboxed so the world keeps its aspect ratio.
pub struct Transform {
    scale: f32,
    offset_x: f32,
    offset_y: f32,
}

impl Transform {
    /// Creates a `Transform` that fits the rect `(src_min, src_max)` inside
    /// `(dst_min, dst_max)`, centered, preserving the source aspect ratio.
    pub fn new_letterboxed(src_min: Pos2, src_max: Pos2, dst_min: Pos2, dst_max: Pos2) -> Self {
        let src_width = src_max.x - src_min.x;
        let src_height = src_max.y - src_min.y;
        let dst_width = dst_max.x - dst_min.x;
        let dst_height = dst_max.y - dst_min.y;

        let scale = (dst_width / src_width).min(dst_height / src_height);
        let offset_x = dst_min.x + (dst_width - src_width * scale) / 2.0 - src_min.x * scale;
        let offset_y = dst_min.y + (dst_height - src_height * scale) / 2.0 - src_min.y * scale;

        Self {
            scale,
            offset_x,
            offset_y,
        }
    }

    /// Applies the transformation to a point.
    pub fn map_point(&self, p: Pos2) -> Pos2 {
        Pos2::new(
            p.x * self.scale + self.offset_x,
            p.y * self.scale + self.offset_y,
        )
    }

    /// Applies the scale to a distance.
    pub fn map_dist(&self, d: f32) -> f32 {
        d * self.scale
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wide_destination_letterboxes_horizontally() {
        let t = Transform::new_letterboxed(
            Pos2::new(0.0, 0.0),
            Pos2::new(10.0, 10.0),
            Pos2::new(0.0, 0.0),
            Pos2::new(200.0, 100.0),
        );
        assert_eq!(t.map_point(Pos2::new(0.0, 0.0)), Pos2::new(50.0, 0.0));
        assert_eq!(t.map_point(Pos2::new(10.0, 10.0)), Pos2::new(150.0, 100.0));
        assert_eq!(t.map_dist(2.0), 20.0);
    }

    #[test]
    fn offset_source_rect_is_centered() {
        let t = Transform::new_letterboxed(
            Pos2::new(-1.0, -1.0),
            Pos2::new(1.0, 1.0),
            Pos2::new(100.0, 100.0),
            Pos2::new(200.0, 300.0),
        );
        assert_eq!(t.map_point(Pos2::new(0.0, 0.0)), Pos2::new(150.0, 200.0));
        assert_eq!(t.map_point(Pos2::new(-1.0, -1.0)), Pos2::new(100.0, 150.0));
    }
}
