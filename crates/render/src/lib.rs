//! Aimview frame pipeline: view basis, projection, level of detail,
//! entity filtering and an offscreen draw surface composited onto a host.
//!
//! # Invariants
//! - Rendering never mutates world data; every frame reads the source fresh.
//! - Draw order is fixed: exits, hazards, skeletons, loot, crosshair.
//! - A projected point is either inside the surface bounds or absent.
//! - One malformed entity never stops the rest of the frame.
//! - The surface is reallocated only when the widget size changes.

pub mod camera;
pub mod canvas;
pub mod config;
pub mod filter;
pub mod frame;
pub mod lod;
pub mod style;
pub mod surface;
pub mod view;

pub use camera::PerspectiveCamera;
pub use canvas::{Canvas, DrawCmd, DrawList, HostCanvas};
pub use config::{AimviewConfig, ConfigError};
pub use filter::{EntityFilters, Rejection};
pub use frame::{AimviewRenderer, DrawError, FrameOutcome, FrameStats, VisualParams};
pub use lod::{LodCurve, MarkerLod, MarkerSize};
pub use style::{Paint, PaintStyle, Palette};
pub use surface::{Surface, SurfaceSlot};
pub use view::{BasisProjector, CameraProjector, Projector, ViewBasis, ViewSource};

pub fn crate_info() -> &'static str {
    "aimview-render v0.1.0"
}
