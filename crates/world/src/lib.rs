//! World snapshot: the read-only entity data one overlay frame is drawn from.
//!
//! # Invariants
//! - The overlay never mutates anything reachable from these types.
//! - No entity identity is kept across frames; every frame reads a fresh snapshot.
//! - An all-zero position means "not resolved yet", never the world origin.

pub mod entity;
pub mod skeleton;
pub mod snapshot;
pub mod source;

pub use entity::{
    ExitPoint, ExitStatus, Hazard, HazardKind, LootItem, Observer, Orientation, Player,
    PlayerKind,
};
pub use skeleton::{BONE_CONNECTIONS, Bone, Skeleton};
pub use snapshot::{WorldError, WorldSnapshot};
pub use source::{CameraTransform, EntityProvider, FrameSource, ObserverProvider, SessionState};

pub fn crate_info() -> &'static str {
    "aimview-world v0.1.0"
}
