use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::entity::{ExitPoint, Hazard, LootItem, Observer, Player};
use crate::source::{EntityProvider, ObserverProvider, SessionState};

/// Errors from loading a snapshot.
#[derive(Debug, thiserror::Error)]
pub enum WorldError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// An in-memory copy of everything the game reader knows for one frame.
///
/// Implements every provider trait, so hosts without a live reader (the CLI,
/// tests, recorded sessions) can drive the renderer from a plain value.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct WorldSnapshot {
    pub in_session: bool,
    pub observer: Option<Observer>,
    pub players: Vec<Player>,
    pub loot: Vec<LootItem>,
    pub hazards: Vec<Hazard>,
    pub exits: Vec<ExitPoint>,
}

impl WorldSnapshot {
    /// Empty snapshot outside any session.
    pub fn new() -> Self {
        Self::default()
    }

    /// Empty snapshot of a running session seen from `observer`.
    pub fn in_session(observer: Observer) -> Self {
        Self {
            in_session: true,
            observer: Some(observer),
            ..Self::default()
        }
    }

    pub fn with_player(mut self, player: Player) -> Self {
        self.players.push(player);
        self
    }

    pub fn with_loot(mut self, item: LootItem) -> Self {
        self.loot.push(item);
        self
    }

    pub fn with_hazard(mut self, hazard: Hazard) -> Self {
        self.hazards.push(hazard);
        self
    }

    pub fn with_exit(mut self, exit: ExitPoint) -> Self {
        self.exits.push(exit);
        self
    }

    /// Total entities across all categories.
    pub fn entity_count(&self) -> usize {
        self.players.len() + self.loot.len() + self.hazards.len() + self.exits.len()
    }

    pub fn from_json(json: &str) -> Result<Self, WorldError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Read a snapshot previously written with [`WorldSnapshot::save`].
    pub fn load(path: impl AsRef<Path>) -> Result<Self, WorldError> {
        let path = path.as_ref();
        let snapshot: Self = serde_json::from_reader(std::fs::File::open(path)?)?;
        tracing::debug!(
            path = %path.display(),
            entities = snapshot.entity_count(),
            "loaded world snapshot"
        );
        Ok(snapshot)
    }

    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), WorldError> {
        serde_json::to_writer_pretty(std::fs::File::create(path)?, self)?;
        Ok(())
    }
}

impl SessionState for WorldSnapshot {
    fn in_session(&self) -> bool {
        self.in_session
    }
}

impl ObserverProvider for WorldSnapshot {
    fn observer(&self) -> Option<Observer> {
        self.observer
    }
}

impl EntityProvider for WorldSnapshot {
    fn players(&self) -> &[Player] {
        &self.players
    }

    fn loot(&self) -> &[LootItem] {
        &self.loot
    }

    fn hazards(&self) -> &[Hazard] {
        &self.hazards
    }

    fn exits(&self) -> &[ExitPoint] {
        &self.exits
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entity::{ExitStatus, PlayerKind};
    use crate::skeleton::Skeleton;
    use glam::Vec3;

    #[test]
    fn snapshot_starts_out_of_session() {
        let s = WorldSnapshot::new();
        assert!(!s.in_session());
        assert!(s.observer().is_none());
        assert_eq!(s.entity_count(), 0);
    }

    #[test]
    fn builder_fills_every_collection() {
        let s = WorldSnapshot::in_session(Observer::new(Vec3::ZERO, 0.0, 0.0))
            .with_player(Player::new("a", PlayerKind::AiScav, Vec3::Z))
            .with_loot(LootItem::new("b", Vec3::Z))
            .with_hazard(Hazard::grenade(Vec3::Z))
            .with_exit(ExitPoint::new("c", Vec3::Z, ExitStatus::Open));

        assert!(s.in_session());
        assert_eq!(s.players().len(), 1);
        assert_eq!(s.loot().len(), 1);
        assert_eq!(s.hazards().len(), 1);
        assert_eq!(s.exits().len(), 1);
        assert_eq!(s.entity_count(), 4);
    }

    #[test]
    fn partial_json_uses_defaults() {
        let s = WorldSnapshot::from_json(
            r#"{
                "in_session": true,
                "observer": { "position": [1, 2, 3] },
                "exits": [{ "name": "Gate", "position": [0, 0, 10], "status": "pending" }]
            }"#,
        )
        .unwrap();

        assert!(s.in_session);
        assert_eq!(s.observer.unwrap().position, Vec3::new(1.0, 2.0, 3.0));
        assert_eq!(s.exits[0].status, ExitStatus::Pending);
        assert!(s.players.is_empty());
    }

    #[test]
    fn malformed_json_is_an_error() {
        assert!(matches!(
            WorldSnapshot::from_json("{ not json"),
            Err(WorldError::Json(_))
        ));
    }

    #[test]
    fn save_then_load_keeps_skeletons() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("frame.json");

        let mut player = Player::new("p", PlayerKind::Pmc, Vec3::new(0.0, 0.0, 8.0));
        player.skeleton = Skeleton::standing(player.position);
        let original =
            WorldSnapshot::in_session(Observer::new(Vec3::ZERO, 15.0, -5.0)).with_player(player);
        original.save(&path).unwrap();

        let loaded = WorldSnapshot::load(&path).unwrap();
        assert_eq!(loaded.players, original.players);
        assert_eq!(loaded.observer, original.observer);
    }

    #[test]
    fn missing_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        assert!(matches!(
            WorldSnapshot::load(dir.path().join("nope.json")),
            Err(WorldError::Io(_))
        ));
    }
}
