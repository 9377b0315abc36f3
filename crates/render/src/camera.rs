use aimview_common::{Rect, ScreenPoint};
use aimview_world::CameraTransform;
use glam::{Mat4, Vec2, Vec3};

/// Perspective look-at camera with its own viewport.
///
/// Stands in for the game's camera manager wherever a real one is not
/// available. Angles are radians; yaw 0 looks down +X, yaw 90 degrees down +Z.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PerspectiveCamera {
    pub position: Vec3,
    pub yaw: f32,
    pub pitch: f32,
    /// Vertical field of view.
    pub fov: f32,
    pub near: f32,
    pub far: f32,
    pub viewport: Rect,
    /// Extra NDC margin accepted when a caller asks for tolerance.
    pub tolerance: f32,
}

impl Default for PerspectiveCamera {
    fn default() -> Self {
        Self {
            position: Vec3::ZERO,
            yaw: 90.0_f32.to_radians(),
            pitch: 0.0,
            fov: 75.0_f32.to_radians(),
            near: 0.05,
            far: 1000.0,
            viewport: Rect::new(0.0, 0.0, 1920.0, 1080.0),
            tolerance: 0.1,
        }
    }
}

impl PerspectiveCamera {
    /// Unit view direction. Inverse of [`look_at`](Self::look_at).
    pub fn forward(&self) -> Vec3 {
        let (sy, cy) = self.yaw.sin_cos();
        let (sp, cp) = self.pitch.sin_cos();
        Vec3::new(cy * cp, sp, sy * cp)
    }

    /// Point the camera at `target`, keeping its position.
    pub fn look_at(&mut self, target: Vec3) {
        let dir = (target - self.position).normalize_or_zero();
        if dir == Vec3::ZERO {
            return;
        }
        self.pitch = dir.y.clamp(-1.0, 1.0).asin();
        self.yaw = dir.z.atan2(dir.x);
    }

    pub fn aspect(&self) -> f32 {
        if self.viewport.has_area() {
            self.viewport.width / self.viewport.height
        } else {
            1.0
        }
    }

    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at_rh(self.position, self.position + self.forward(), Vec3::Y)
    }

    pub fn projection_matrix(&self) -> Mat4 {
        Mat4::perspective_rh(self.fov, self.aspect(), self.near, self.far)
    }

    pub fn view_projection(&self) -> Mat4 {
        self.projection_matrix() * self.view_matrix()
    }
}

impl CameraTransform for PerspectiveCamera {
    fn world_to_screen(
        &self,
        point: Vec3,
        on_screen_check: bool,
        use_tolerance: bool,
    ) -> Option<ScreenPoint> {
        let clip = self.view_projection() * point.extend(1.0);
        if clip.w <= f32::EPSILON || !clip.is_finite() {
            return None;
        }
        let ndc = clip.truncate() / clip.w;

        if on_screen_check {
            let limit = if use_tolerance {
                1.0 + self.tolerance
            } else {
                1.0
            };
            if ndc.x.abs() > limit || ndc.y.abs() > limit {
                return None;
            }
        }

        let rel = Vec2::new((ndc.x + 1.0) * 0.5, (1.0 - ndc.y) * 0.5);
        Some(self.viewport.origin() + rel * self.viewport.extent())
    }

    fn viewport(&self) -> Rect {
        self.viewport
    }
}
