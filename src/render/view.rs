use crate::core::math::Vec2;

/// Maps world units to canvas pixels: origin at the canvas centre,
/// `view_height` world units across the canvas height.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ViewTransform {
    width: f32,
    height: f32,
    view_height: f32,
}

impl ViewTransform {
    pub fn new(width: u32, height: u32, view_height: f32) -> Self {
        Self {
            width: width as f32,
            height: height.max(1) as f32,
            view_height,
        }
    }

    pub fn resize(&mut self, width: u32, height: u32) {
        self.width = width as f32;
        self.height = height.max(1) as f32;
    }

    pub fn width(&self) -> f32 {
        self.width
    }

    pub fn height(&self) -> f32 {
        self.height
    }

    pub fn aspect_ratio(&self) -> f32 {
        self.width / self.height
    }

    /// Pixels per world unit
    pub fn scale(&self) -> f32 {
        self.height / self.view_height
    }

    pub fn origin(&self) -> Vec2 {
        Vec2::new(self.width * 0.5, self.height * 0.5)
    }

    pub fn world_to_screen(&self, p: Vec2) -> Vec2 {
        self.origin() + p * self.scale()
    }

    pub fn screen_to_world(&self, s: Vec2) -> Vec2 {
        (s - self.origin()) * (1.0 / self.scale())
    }

    /// Half-size of the visible world rectangle
    pub fn visible_half_extent(&self) -> Vec2 {
        Vec2::new(self.aspect_ratio() * self.view_height * 0.5, self.view_height * 0.5)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn world_origin_maps_to_canvas_centre() {
        let view = ViewTransform::new(800, 400, 20.0);
        assert_eq!(view.world_to_screen(Vec2::ZERO), Vec2::new(400.0, 200.0));
        assert_eq!(view.scale(), 20.0);
        assert_eq!(view.world_to_screen(Vec2::new(10.0, 10.0)), Vec2::new(600.0, 400.0));
    }

    #[test]
    fn screen_to_world_inverts_world_to_screen() {
        let view = ViewTransform::new(1280, 720, 20.0);
        let p = Vec2::new(-3.25, 7.5);
        let back = view.screen_to_world(view.world_to_screen(p));
        assert!((back.x - p.x).abs() < 1e-4 && (back.y - p.y).abs() < 1e-4);
    }

    #[test]
    fn visible_extent_follows_aspect_ratio() {
        let view = ViewTransform::new(800, 400, 20.0);
        assert_eq!(view.visible_half_extent(), Vec2::new(20.0, 10.0));
    }
}
