use glam::Vec3;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Named humanoid joints the game reader resolves per player.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Bone {
    HumanHead,
    HumanNeck,
    HumanSpine3,
    HumanSpine2,
    HumanSpine1,
    HumanPelvis,
    HumanLUpperarm,
    HumanLForearm1,
    HumanLForearm2,
    HumanLPalm,
    HumanRUpperarm,
    HumanRForearm1,
    HumanRForearm2,
    HumanRPalm,
    HumanLThigh1,
    HumanLThigh2,
    HumanLCalf,
    HumanLFoot,
    HumanRThigh1,
    HumanRThigh2,
    HumanRCalf,
    HumanRFoot,
}

/// Line segments that make up a drawn skeleton, in draw order.
pub static BONE_CONNECTIONS: [(Bone, Bone); 21] = [
    (Bone::HumanHead, Bone::HumanNeck),
    (Bone::HumanNeck, Bone::HumanSpine3),
    (Bone::HumanSpine3, Bone::HumanSpine2),
    (Bone::HumanSpine2, Bone::HumanSpine1),
    (Bone::HumanSpine1, Bone::HumanPelvis),
    // left arm
    (Bone::HumanNeck, Bone::HumanLUpperarm),
    (Bone::HumanLUpperarm, Bone::HumanLForearm1),
    (Bone::HumanLForearm1, Bone::HumanLForearm2),
    (Bone::HumanLForearm2, Bone::HumanLPalm),
    // right arm
    (Bone::HumanNeck, Bone::HumanRUpperarm),
    (Bone::HumanRUpperarm, Bone::HumanRForearm1),
    (Bone::HumanRForearm1, Bone::HumanRForearm2),
    (Bone::HumanRForearm2, Bone::HumanRPalm),
    // left leg
    (Bone::HumanPelvis, Bone::HumanLThigh1),
    (Bone::HumanLThigh1, Bone::HumanLThigh2),
    (Bone::HumanLThigh2, Bone::HumanLCalf),
    (Bone::HumanLCalf, Bone::HumanLFoot),
    // right leg
    (Bone::HumanPelvis, Bone::HumanRThigh1),
    (Bone::HumanRThigh1, Bone::HumanRThigh2),
    (Bone::HumanRThigh2, Bone::HumanRCalf),
    (Bone::HumanRCalf, Bone::HumanRFoot),
];

/// World positions of a player's joints.
///
/// Missing joints read as `Vec3::ZERO`, the same placeholder the reader uses
/// for joints it failed to resolve.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Skeleton {
    bones: BTreeMap<Bone, Vec3>,
}

impl Skeleton {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(&mut self, bone: Bone, position: Vec3) {
        self.bones.insert(bone, position);
    }

    pub fn with(mut self, bone: Bone, position: Vec3) -> Self {
        self.set(bone, position);
        self
    }

    pub fn bone(&self, bone: Bone) -> Vec3 {
        self.bones.get(&bone).copied().unwrap_or(Vec3::ZERO)
    }

    pub fn len(&self) -> usize {
        self.bones.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bones.is_empty()
    }

    /// First joint whose position has a NaN or infinite component.
    pub fn first_non_finite(&self) -> Option<Bone> {
        self.bones
            .iter()
            .find(|(_, p)| !p.is_finite())
            .map(|(bone, _)| *bone)
    }

    /// Standing T-pose about `root` (feet position), 1.8m tall, facing +Z.
    /// Handy for fixtures and demo scenes.
    pub fn standing(root: Vec3) -> Self {
        let at = |x: f32, y: f32| root + Vec3::new(x, y, 0.0);
        Self::new()
            .with(Bone::HumanHead, at(0.0, 1.75))
            .with(Bone::HumanNeck, at(0.0, 1.55))
            .with(Bone::HumanSpine3, at(0.0, 1.40))
            .with(Bone::HumanSpine2, at(0.0, 1.25))
            .with(Bone::HumanSpine1, at(0.0, 1.10))
            .with(Bone::HumanPelvis, at(0.0, 0.95))
            .with(Bone::HumanLUpperarm, at(-0.20, 1.50))
            .with(Bone::HumanLForearm1, at(-0.45, 1.50))
            .with(Bone::HumanLForearm2, at(-0.60, 1.50))
            .with(Bone::HumanLPalm, at(-0.75, 1.50))
            .with(Bone::HumanRUpperarm, at(0.20, 1.50))
            .with(Bone::HumanRForearm1, at(0.45, 1.50))
            .with(Bone::HumanRForearm2, at(0.60, 1.50))
            .with(Bone::HumanRPalm, at(0.75, 1.50))
            .with(Bone::HumanLThigh1, at(-0.12, 0.90))
            .with(Bone::HumanLThigh2, at(-0.12, 0.70))
            .with(Bone::HumanLCalf, at(-0.12, 0.45))
            .with(Bone::HumanLFoot, at(-0.12, 0.05))
            .with(Bone::HumanRThigh1, at(0.12, 0.90))
            .with(Bone::HumanRThigh2, at(0.12, 0.70))
            .with(Bone::HumanRCalf, at(0.12, 0.45))
            .with(Bone::HumanRFoot, at(0.12, 0.05))
    }
}
