use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::skeleton::Skeleton;

/// How the local observer is looking.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Orientation {
    /// Euler angles in degrees. Yaw turns about +Y, positive pitch looks down.
    Angles { yaw: f32, pitch: f32 },
    /// A basis handed over by the game camera. Need not be normalized.
    Basis { forward: Vec3, right: Vec3, up: Vec3 },
}

impl Default for Orientation {
    fn default() -> Self {
        Self::Angles {
            yaw: 0.0,
            pitch: 0.0,
        }
    }
}

/// The local player the overlay is drawn for. Exactly one per frame.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Observer {
    pub position: Vec3,
    #[serde(default)]
    pub orientation: Orientation,
}

impl Observer {
    pub fn new(position: Vec3, yaw: f32, pitch: f32) -> Self {
        Self {
            position,
            orientation: Orientation::Angles { yaw, pitch },
        }
    }

    /// Straight-line distance in meters.
    pub fn distance_to(&self, point: Vec3) -> f32 {
        self.position.distance(point)
    }
}

/// Player classification as reported by the game reader.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PlayerKind {
    Teammate,
    AiScav,
    AiRaider,
    AiBoss,
    PScav,
    /// On the user's watchlist.
    SpecialPlayer,
    Streamer,
    /// Also what unrecognized kinds read as.
    #[default]
    #[serde(other)]
    Pmc,
}

impl PlayerKind {
    pub fn is_ai(self) -> bool {
        matches!(self, Self::AiScav | Self::AiRaider | Self::AiBoss)
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Player {
    pub name: String,
    pub kind: PlayerKind,
    pub position: Vec3,
    pub is_active: bool,
    pub is_alive: bool,
    /// The observer's own player record.
    pub is_local: bool,
    /// Highlighted by the user.
    pub is_focused: bool,
    pub skeleton: Skeleton,
}

impl Player {
    /// An active, alive, non-local player at `position` with an empty skeleton.
    pub fn new(name: impl Into<String>, kind: PlayerKind, position: Vec3) -> Self {
        Self {
            name: name.into(),
            kind,
            position,
            is_active: true,
            is_alive: true,
            ..Self::default()
        }
    }

    pub fn is_ai(&self) -> bool {
        self.kind.is_ai()
    }

    pub fn is_hostile(&self) -> bool {
        !self.is_local && self.kind != PlayerKind::Teammate
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct LootItem {
    pub name: String,
    pub short_name: String,
    pub position: Vec3,
    pub is_quest_item: bool,
    /// Hex color from the user's loot filter, if the item matched one.
    pub custom_color: Option<String>,
}

impl LootItem {
    pub fn new(name: impl Into<String>, position: Vec3) -> Self {
        Self {
            name: name.into(),
            position,
            ..Self::default()
        }
    }

    /// Short name when present, falling back to the full name.
    pub fn display_name(&self) -> &str {
        if self.short_name.trim().is_empty() {
            &self.name
        } else {
            &self.short_name
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HazardKind {
    Grenade,
    Tripwire,
    #[default]
    #[serde(other)]
    Unknown,
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Hazard {
    pub kind: HazardKind,
    pub position: Vec3,
    /// Only meaningful for tripwires.
    pub armed: bool,
}

impl Hazard {
    pub fn grenade(position: Vec3) -> Self {
        Self {
            kind: HazardKind::Grenade,
            position,
            armed: true,
        }
    }

    pub fn tripwire(position: Vec3, armed: bool) -> Self {
        Self {
            kind: HazardKind::Tripwire,
            position,
            armed,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExitStatus {
    Open,
    Pending,
    #[default]
    Closed,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ExitPoint {
    pub name: String,
    pub position: Vec3,
    pub status: ExitStatus,
}

impl ExitPoint {
    pub fn new(name: impl Into<String>, position: Vec3, status: ExitStatus) -> Self {
        Self {
            name: name.into(),
            position,
            status,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ai_kinds() {
        assert!(PlayerKind::AiScav.is_ai());
        assert!(PlayerKind::AiBoss.is_ai());
        assert!(!PlayerKind::PScav.is_ai());
        assert!(!PlayerKind::Pmc.is_ai());
    }

    #[test]
    fn teammates_and_local_are_not_hostile() {
        let mate = Player::new("mate", PlayerKind::Teammate, Vec3::X);
        assert!(!mate.is_hostile());

        let mut me = Player::new("me", PlayerKind::Pmc, Vec3::X);
        me.is_local = true;
        assert!(!me.is_hostile());

        assert!(Player::new("pmc", PlayerKind::Pmc, Vec3::X).is_hostile());
    }

    #[test]
    fn loot_display_name_falls_back() {
        let mut item = LootItem::new("Graphics card", Vec3::ONE);
        assert_eq!(item.display_name(), "Graphics card");
        item.short_name = "GPU".into();
        assert_eq!(item.display_name(), "GPU");
        item.short_name = "   ".into();
        assert_eq!(item.display_name(), "Graphics card");
    }

    #[test]
    fn unknown_hazard_kind_deserializes() {
        let h: Hazard = serde_json::from_str(r#"{"kind":"claymore","position":[1,2,3]}"#).unwrap();
        assert_eq!(h.kind, HazardKind::Unknown);
        assert_eq!(h.position, Vec3::new(1.0, 2.0, 3.0));
    }

    #[test]
    fn unknown_player_kind_reads_as_pmc() {
        let k: PlayerKind = serde_json::from_str(r#""cultist""#).unwrap();
        assert_eq!(k, PlayerKind::Pmc);
        let k: PlayerKind = serde_json::from_str(r#""ai_boss""#).unwrap();
        assert_eq!(k, PlayerKind::AiBoss);
    }

    #[test]
    fn observer_distance() {
        let o = Observer::new(Vec3::ZERO, 0.0, 0.0);
        assert_eq!(o.distance_to(Vec3::new(3.0, 4.0, 0.0)), 5.0);
    }
}
