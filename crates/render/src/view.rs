//! View basis construction and the two world-to-screen strategies.

use aimview_common::{ScreenPoint, SurfaceSize, is_unset};
use aimview_world::{CameraTransform, Observer, Orientation};
use glam::{Vec2, Vec3};

/// Default pseudo field-of-view divisor for the self-derived strategy.
pub const DEFAULT_FOV_DIVISOR: f32 = 1.0;

/// Camera-relative orthonormal frame: `forward`, `right`, `up` plus the eye.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViewBasis {
    pub eye: Vec3,
    pub forward: Vec3,
    pub right: Vec3,
    pub up: Vec3,
}

impl ViewBasis {
    /// Build from yaw/pitch in degrees.
    ///
    /// `up` is `-(right x forward)` so that +Y on screen stays up once it is
    /// mapped into Y-down pixels.
    pub fn from_angles(eye: Vec3, yaw_degrees: f32, pitch_degrees: f32) -> Self {
        let (sy, cy) = yaw_degrees.to_radians().sin_cos();
        let (sp, cp) = pitch_degrees.to_radians().sin_cos();

        let forward = Vec3::new(sy * cp, -sp, cy * cp).normalize();
        let right = Vec3::new(cy, 0.0, -sy).normalize();
        let up = -right.cross(forward).normalize();

        Self {
            eye,
            forward,
            right,
            up,
        }
    }

    /// Take an externally supplied basis as-is, only normalizing it.
    pub fn from_axes(eye: Vec3, forward: Vec3, right: Vec3, up: Vec3) -> Self {
        Self {
            eye,
            forward: forward.normalize_or_zero(),
            right: right.normalize_or_zero(),
            up: up.normalize_or_zero(),
        }
    }

    pub fn from_observer(observer: &Observer) -> Self {
        match observer.orientation {
            Orientation::Angles { yaw, pitch } => Self::from_angles(observer.position, yaw, pitch),
            Orientation::Basis { forward, right, up } => {
                Self::from_axes(observer.position, forward, right, up)
            }
        }
    }

    /// Offset of `world` from the eye expressed as (right, up, forward) components.
    pub fn to_view_space(&self, world: Vec3) -> Vec3 {
        let d = world - self.eye;
        Vec3::new(d.dot(self.right), d.dot(self.up), d.dot(self.forward))
    }
}

/// Maps a world position to a point on the widget surface.
///
/// `None` means "do not draw". Implementations never panic and never report
/// errors; a point that cannot be placed is simply rejected.
pub trait Projector {
    fn project(&self, world: Vec3) -> Option<ScreenPoint>;
}

/// Self-derived strategy: perspective divide against a local [`ViewBasis`].
#[derive(Debug, Clone, Copy)]
pub struct BasisProjector {
    basis: ViewBasis,
    surface: SurfaceSize,
    fov_divisor: f32,
}

impl BasisProjector {
    pub fn new(basis: ViewBasis, surface: SurfaceSize, fov_divisor: f32) -> Self {
        Self {
            basis,
            surface,
            fov_divisor,
        }
    }
}

impl Projector for BasisProjector {
    fn project(&self, world: Vec3) -> Option<ScreenPoint> {
        if is_unset(world) {
            return None;
        }

        let v = self.basis.to_view_space(world);
        // Behind or exactly on the eye plane; NaN depth rejects too.
        if v.z <= 0.0 || v.z.is_nan() {
            return None;
        }

        let nx = v.x / v.z / self.fov_divisor;
        let ny = v.y / v.z / self.fov_divisor;

        let half_w = self.surface.width_f32() * 0.5;
        let half_h = self.surface.height_f32() * 0.5;
        let screen = Vec2::new(half_w + nx * half_w, half_h - ny * half_h);

        self.surface.contains(screen).then_some(screen)
    }
}

/// External-camera strategy: delegate to the game camera and rescale its
/// viewport into the widget.
pub struct CameraProjector<'a> {
    camera: &'a dyn CameraTransform,
    surface: SurfaceSize,
}

impl<'a> CameraProjector<'a> {
    pub fn new(camera: &'a dyn CameraTransform, surface: SurfaceSize) -> Self {
        Self { camera, surface }
    }
}

impl Projector for CameraProjector<'_> {
    fn project(&self, world: Vec3) -> Option<ScreenPoint> {
        if is_unset(world) {
            return None;
        }

        let screen = self.camera.world_to_screen(world, false, false)?;

        let viewport = self.camera.viewport();
        if !viewport.has_area() {
            return None;
        }

        // Proportional to the viewport's dimensions; its origin is not subtracted.
        let rel = screen / viewport.extent();
        let local = rel * Vec2::new(self.surface.width_f32(), self.surface.height_f32());

        self.surface.contains(local).then_some(local)
    }
}

/// Which projection strategy a renderer uses. Fixed at construction.
pub enum ViewSource {
    /// Build a [`ViewBasis`] from the observer every frame.
    SelfDerived { fov_divisor: f32 },
    /// Use the game's camera manager.
    ExternalCamera(Box<dyn CameraTransform>),
}

impl ViewSource {
    pub fn self_derived() -> Self {
        Self::SelfDerived {
            fov_divisor: DEFAULT_FOV_DIVISOR,
        }
    }

    pub fn external(camera: impl CameraTransform + 'static) -> Self {
        Self::ExternalCamera(Box::new(camera))
    }

    /// Short name for logs.
    pub fn label(&self) -> &'static str {
        match self {
            Self::SelfDerived { .. } => "self-derived",
            Self::ExternalCamera(_) => "external-camera",
        }
    }

    /// The projector for one frame.
    pub fn projector<'a>(
        &'a self,
        observer: &Observer,
        surface: SurfaceSize,
    ) -> Box<dyn Projector + 'a> {
        match self {
            Self::SelfDerived { fov_divisor } => Box::new(BasisProjector::new(
                ViewBasis::from_observer(observer),
                surface,
                *fov_divisor,
            )),
            Self::ExternalCamera(camera) => {
                Box::new(CameraProjector::new(camera.as_ref(), surface))
            }
        }
    }
}

impl std::fmt::Debug for ViewSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::SelfDerived { fov_divisor } => f
                .debug_struct("SelfDerived")
                .field("fov_divisor", fov_divisor)
                .finish(),
            Self::ExternalCamera(_) => f.write_str("ExternalCamera(..)"),
        }
    }
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    fn arb_point() -> impl Strategy<Value = Vec3> {
        (-1.0e4f32..1.0e4, -1.0e4f32..1.0e4, -1.0e4f32..1.0e4)
            .prop_map(|(x, y, z)| Vec3::new(x, y, z))
    }

    proptest! {
        #[test]
        fn projection_is_inside_surface_or_absent(
            world in arb_point(),
            eye in arb_point(),
            yaw in -360.0f32..360.0,
            pitch in -89.0f32..89.0,
            fov_divisor in 0.1f32..10.0,
            width in 1u32..4096,
            height in 1u32..4096,
        ) {
            let size = SurfaceSize::new(width, height);
            let projector =
                BasisProjector::new(ViewBasis::from_angles(eye, yaw, pitch), size, fov_divisor);
            if let Some(screen) = projector.project(world) {
                prop_assert!(size.contains(screen), "{world} -> {screen} outside {size:?}");
            }
        }
    }
}
