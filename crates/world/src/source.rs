//! Read-only views the overlay pulls its per-frame inputs from.

use aimview_common::{Rect, ScreenPoint};
use glam::Vec3;

use crate::entity::{ExitPoint, Hazard, LootItem, Observer, Player};

/// Whether a raid/session is running at all.
pub trait SessionState {
    fn in_session(&self) -> bool;
}

/// The local observer, or `None` while outside a session or not yet resolved.
pub trait ObserverProvider {
    fn observer(&self) -> Option<Observer>;
}

/// Entity collections for the current frame. Empty slices mean "nothing known".
pub trait EntityProvider {
    fn players(&self) -> &[Player];
    fn loot(&self) -> &[LootItem];
    fn hazards(&self) -> &[Hazard];
    fn exits(&self) -> &[ExitPoint];
}

/// Everything one frame needs from the game reader.
pub trait FrameSource: SessionState + ObserverProvider + EntityProvider {}

impl<T: SessionState + ObserverProvider + EntityProvider + ?Sized> FrameSource for T {}

/// World-to-screen transform owned by the game's camera manager.
///
/// Coordinates are in the camera's own viewport; callers rescale them.
pub trait CameraTransform {
    /// `None` when the point is behind the camera, or off screen when
    /// `on_screen_check` is set (widened by a margin when `use_tolerance` is set).
    fn world_to_screen(
        &self,
        point: Vec3,
        on_screen_check: bool,
        use_tolerance: bool,
    ) -> Option<ScreenPoint>;

    /// Current viewport of the camera in its own pixel space.
    fn viewport(&self) -> Rect;
}
