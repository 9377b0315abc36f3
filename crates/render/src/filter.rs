//! Per-category inclusion rules, applied before anything is projected.

use aimview_common::is_unset;
use aimview_world::{ExitPoint, ExitStatus, Hazard, HazardKind, LootItem, Observer, Player};
use glam::Vec3;

use crate::config::AimviewConfig;

/// Why an entity was left out of the frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rejection {
    Inactive,
    Dead,
    LocalPlayer,
    AiHidden,
    EnemyHidden,
    QuestItemHidden,
    UnsetPosition,
    Disarmed,
    UnsupportedKind,
    Closed,
    TooFar,
}

/// Filters bound to one frame's observer and configuration.
#[derive(Debug, Clone, Copy)]
pub struct EntityFilters<'a> {
    config: &'a AimviewConfig,
    origin: Vec3,
}

impl<'a> EntityFilters<'a> {
    pub fn new(config: &'a AimviewConfig, observer: &Observer) -> Self {
        Self {
            config,
            origin: observer.position,
        }
    }

    /// False when both the AI and the enemy-player toggles are off.
    pub fn players_enabled(&self) -> bool {
        self.config.widget.show_ai || self.config.widget.show_enemy_players
    }

    pub fn loot_enabled(&self) -> bool {
        self.config.widget.show_loot && self.config.loot.enabled
    }

    /// Distance to a kept player.
    pub fn player(&self, player: &Player) -> Result<f32, Rejection> {
        if !player.is_active {
            return Err(Rejection::Inactive);
        }
        if !player.is_alive {
            return Err(Rejection::Dead);
        }
        if player.is_local {
            return Err(Rejection::LocalPlayer);
        }
        if player.is_ai() && !self.config.widget.show_ai {
            return Err(Rejection::AiHidden);
        }
        if !player.is_ai() && player.is_hostile() && !self.config.widget.show_enemy_players {
            return Err(Rejection::EnemyHidden);
        }
        self.within(player.position, self.config.ui.max_distance)
    }

    pub fn loot(&self, item: &LootItem) -> Result<f32, Rejection> {
        if item.is_quest_item && !self.config.widget.show_quest_items {
            return Err(Rejection::QuestItemHidden);
        }
        self.within(item.position, self.config.widget.loot_max_distance)
    }

    pub fn hazard(&self, hazard: &Hazard) -> Result<f32, Rejection> {
        if is_unset(hazard.position) {
            return Err(Rejection::UnsetPosition);
        }
        match hazard.kind {
            HazardKind::Tripwire if !hazard.armed => return Err(Rejection::Disarmed),
            HazardKind::Tripwire | HazardKind::Grenade => {}
            HazardKind::Unknown => return Err(Rejection::UnsupportedKind),
        }
        self.within(hazard.position, self.config.widget.hazard_max_distance)
    }

    pub fn exit(&self, exit: &ExitPoint) -> Result<f32, Rejection> {
        if !matches!(exit.status, ExitStatus::Open | ExitStatus::Pending) {
            return Err(Rejection::Closed);
        }
        self.within(exit.position, self.config.widget.exit_max_distance)
    }

    /// Distance cutoff; zero or negative means unlimited.
    fn within(&self, position: Vec3, max_distance: f32) -> Result<f32, Rejection> {
        let distance = self.origin.distance(position);
        if max_distance > 0.0 && distance > max_distance {
            Err(Rejection::TooFar)
        } else {
            Ok(distance)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use aimview_world::PlayerKind;

    fn observer() -> Observer {
        Observer::new(Vec3::ZERO, 0.0, 0.0)
    }

    fn at(z: f32) -> Vec3 {
        Vec3::new(0.0, 0.0, z)
    }

    #[test]
    fn player_liveness_and_local() {
        let config = AimviewConfig::default();
        let f = EntityFilters::new(&config, &observer());

        let mut p = Player::new("p", PlayerKind::Pmc, at(10.0));
        assert_eq!(f.player(&p), Ok(10.0));

        p.is_alive = false;
        assert_eq!(f.player(&p), Err(Rejection::Dead));

        p.is_alive = true;
        p.is_active = false;
        assert_eq!(f.player(&p), Err(Rejection::Inactive));

        p.is_active = true;
        p.is_local = true;
        assert_eq!(f.player(&p), Err(Rejection::LocalPlayer));
    }

    #[test]
    fn player_category_toggles() {
        let mut config = AimviewConfig::default();
        config.widget.show_ai = false;
        let f = EntityFilters::new(&config, &observer());

        let scav = Player::new("s", PlayerKind::AiScav, at(5.0));
        let pmc = Player::new("p", PlayerKind::Pmc, at(5.0));
        let mate = Player::new("m", PlayerKind::Teammate, at(5.0));
        assert_eq!(f.player(&scav), Err(Rejection::AiHidden));
        assert!(f.player(&pmc).is_ok());

        config.widget.show_ai = true;
        config.widget.show_enemy_players = false;
        let f = EntityFilters::new(&config, &observer());
        assert!(f.player(&scav).is_ok());
        assert_eq!(f.player(&pmc), Err(Rejection::EnemyHidden));
        // Teammates are not enemies.
        assert!(f.player(&mate).is_ok());
    }

    #[test]
    fn players_disabled_when_both_toggles_off() {
        let mut config = AimviewConfig::default();
        config.widget.show_ai = false;
        config.widget.show_enemy_players = false;
        assert!(!EntityFilters::new(&config, &observer()).players_enabled());
    }

    #[test]
    fn player_max_distance_zero_is_unlimited() {
        let mut config = AimviewConfig::default();
        let far = Player::new("p", PlayerKind::Pmc, at(5000.0));
        assert!(EntityFilters::new(&config, &observer()).player(&far).is_ok());

        config.ui.max_distance = -1.0;
        assert!(EntityFilters::new(&config, &observer()).player(&far).is_ok());

        config.ui.max_distance = 300.0;
        assert_eq!(
            EntityFilters::new(&config, &observer()).player(&far),
            Err(Rejection::TooFar)
        );
    }

    #[test]
    fn loot_gates_and_cutoff() {
        let mut config = AimviewConfig::default();
        let f = EntityFilters::new(&config, &observer());
        assert!(f.loot_enabled());
        assert_eq!(f.loot(&LootItem::new("near", at(20.0))), Ok(20.0));
        assert_eq!(f.loot(&LootItem::new("far", at(100.0))), Err(Rejection::TooFar));

        let mut quest = LootItem::new("q", at(5.0));
        quest.is_quest_item = true;
        assert!(f.loot(&quest).is_ok());

        config.widget.show_quest_items = false;
        let f = EntityFilters::new(&config, &observer());
        assert_eq!(f.loot(&quest), Err(Rejection::QuestItemHidden));

        config.loot.enabled = false;
        assert!(!EntityFilters::new(&config, &observer()).loot_enabled());
        config.loot.enabled = true;
        config.widget.show_loot = false;
        assert!(!EntityFilters::new(&config, &observer()).loot_enabled());
    }

    #[test]
    fn hazard_rules() {
        let config = AimviewConfig::default();
        let f = EntityFilters::new(&config, &observer());

        assert!(f.hazard(&Hazard::grenade(at(3.0))).is_ok());
        assert!(f.hazard(&Hazard::tripwire(at(3.0), true)).is_ok());
        assert_eq!(f.hazard(&Hazard::tripwire(at(3.0), false)), Err(Rejection::Disarmed));
        assert_eq!(f.hazard(&Hazard::grenade(Vec3::ZERO)), Err(Rejection::UnsetPosition));
        assert_eq!(f.hazard(&Hazard::grenade(at(26.0))), Err(Rejection::TooFar));

        let unknown = Hazard {
            kind: HazardKind::Unknown,
            position: at(3.0),
            armed: true,
        };
        assert_eq!(f.hazard(&unknown), Err(Rejection::UnsupportedKind));
    }

    #[test]
    fn exit_status_and_cutoff() {
        let config = AimviewConfig::default();
        let f = EntityFilters::new(&config, &observer());

        assert!(f.exit(&ExitPoint::new("o", at(10.0), ExitStatus::Open)).is_ok());
        assert!(f.exit(&ExitPoint::new("p", at(10.0), ExitStatus::Pending)).is_ok());
        assert_eq!(
            f.exit(&ExitPoint::new("c", at(10.0), ExitStatus::Closed)),
            Err(Rejection::Closed)
        );
        assert_eq!(
            f.exit(&ExitPoint::new("o", at(25.5), ExitStatus::Open)),
            Err(Rejection::TooFar)
        );
        // Cutoff is inclusive.
        assert!(f.exit(&ExitPoint::new("o", at(25.0), ExitStatus::Open)).is_ok());
    }

    #[test]
    fn non_finite_positions_do_not_panic() {
        let config = AimviewConfig::default();
        let f = EntityFilters::new(&config, &observer());
        let item = LootItem::new("nan", Vec3::new(f32::NAN, 0.0, 0.0));
        // NaN distance never compares greater than the cutoff.
        assert!(f.loot(&item).unwrap().is_nan());
    }
}
