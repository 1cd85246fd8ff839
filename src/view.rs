use macroquad::camera::{Camera, Camera2D};
use macroquad::math::{vec2, Mat4, Rect, Vec2};

/// Orthographic camera described by its center, viewport size and zoom.
///
/// A zoom above 1 shows more of the world.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OrthoCamera {
    /// World position of the view center.
    pub position: Vec2,
    /// Visible world width at zoom 1.
    pub viewport_width: f32,
    /// Visible world height at zoom 1.
    pub viewport_height: f32,
    /// Multiplies the viewport size.
    pub zoom: f32,
}

impl OrthoCamera {
    /// Camera whose view starts at the world origin.
    pub fn new(viewport_width: f32, viewport_height: f32) -> Self {
        OrthoCamera {
            position: vec2(viewport_width / 2.0, viewport_height / 2.0),
            viewport_width,
            viewport_height,
            zoom: 1.0,
        }
    }

    /// World rectangle seen through the camera.
    pub fn view_bounds(&self) -> Rect {
        let width = self.viewport_width * self.zoom;
        let height = self.viewport_height * self.zoom;
        Rect::new(
            self.position.x - width / 2.0,
            self.position.y - height / 2.0,
            width,
            height,
        )
    }

    /// Projection matrix with y pointing up.
    pub fn combined(&self) -> Mat4 {
        let b = self.view_bounds();
        Mat4::orthographic_rh_gl(b.x, b.x + b.w, b.y, b.y + b.h, -1.0, 1.0)
    }

    /// Moves the view center by `delta` world units.
    pub fn translate(&mut self, delta: Vec2) {
        self.position += delta;
    }
}

/// Projection and world rectangle of a macroquad camera.
///
/// Offset and rotation are ignored; the rectangle is the unrotated extent
/// around `target`.
pub fn camera2d_view(cam: &Camera2D) -> (Mat4, Rect) {
    let half_w = 1.0 / cam.zoom.x.abs();
    let half_h = 1.0 / cam.zoom.y.abs();
    let min = cam.target - vec2(half_w, half_h);
    (cam.matrix(), Rect::new(min.x, min.y, half_w * 2.0, half_h * 2.0))
}
