//! Explicit paint records for every overlay element.
//!
//! Paints are plain values handed to draw calls. A scale-factor change goes
//! through [`Palette::rescale`]; nothing else mutates them.

use aimview_common::Color;
use aimview_world::{Player, PlayerKind};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PaintStyle {
    #[default]
    Fill,
    Stroke,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Paint {
    pub color: Color,
    pub stroke_width: f32,
    pub style: PaintStyle,
}

impl Paint {
    pub const fn fill(color: Color) -> Self {
        Self {
            color,
            stroke_width: 1.0,
            style: PaintStyle::Fill,
        }
    }

    pub const fn stroke(color: Color, stroke_width: f32) -> Self {
        Self {
            color,
            stroke_width,
            style: PaintStyle::Stroke,
        }
    }

    pub const fn with_color(self, color: Color) -> Self {
        Self { color, ..self }
    }

    pub const fn with_stroke_width(self, stroke_width: f32) -> Self {
        Self {
            stroke_width,
            ..self
        }
    }
}

/// Stroke width of every line style at scale factor 1.
const STANDARD_STROKE: f32 = 1.0;

/// Paints for one aimview widget.
#[derive(Debug, Clone, PartialEq)]
pub struct Palette {
    pub crosshair: Paint,
    pub local_player: Paint,
    pub focused: Paint,
    pub teammate: Paint,
    pub pmc: Paint,
    pub scav: Paint,
    pub raider: Paint,
    pub boss: Paint,
    pub pscav: Paint,
    pub watchlist: Paint,
    pub streamer: Paint,
    pub loot: Paint,
    pub loot_text: Color,
    pub exit_open: Paint,
    pub exit_pending: Paint,
    pub exit_text: Color,
    pub explosives: Paint,
    scale: f32,
}

impl Default for Palette {
    fn default() -> Self {
        let line = |c: Color| Paint::stroke(c, STANDARD_STROKE);
        Self {
            crosshair: line(Color::rgba(255, 255, 255, 160)),
            local_player: line(Color::rgb(0, 255, 0)),
            focused: line(Color::rgb(255, 127, 80)),
            teammate: line(Color::rgb(50, 205, 50)),
            pmc: line(Color::rgb(255, 0, 0)),
            scav: line(Color::rgb(255, 255, 0)),
            raider: line(Color::rgb(255, 140, 0)),
            boss: line(Color::rgb(255, 0, 255)),
            pscav: line(Color::rgb(255, 255, 255)),
            watchlist: line(Color::rgb(255, 20, 147)),
            streamer: line(Color::rgb(160, 32, 240)),
            loot: Paint::fill(Color::rgb(245, 245, 245)),
            loot_text: Color::rgb(245, 245, 245),
            exit_open: Paint::fill(Color::rgb(50, 205, 50)),
            exit_pending: Paint::fill(Color::rgb(255, 255, 0)),
            exit_text: Color::rgb(50, 205, 50),
            explosives: Paint::fill(Color::rgb(255, 69, 0)),
            scale: 1.0,
        }
    }
}

impl Palette {
    pub fn with_scale(scale: f32) -> Self {
        let mut palette = Self::default();
        palette.rescale(scale);
        palette
    }

    pub fn scale(&self) -> f32 {
        self.scale
    }

    /// Apply a new UI scale factor to every line style.
    pub fn rescale(&mut self, scale: f32) {
        self.scale = scale;
        let width = STANDARD_STROKE * scale;
        for paint in self.line_paints_mut() {
            paint.stroke_width = width;
        }
    }

    fn line_paints_mut(&mut self) -> [&mut Paint; 11] {
        [
            &mut self.crosshair,
            &mut self.local_player,
            &mut self.focused,
            &mut self.teammate,
            &mut self.pmc,
            &mut self.scav,
            &mut self.raider,
            &mut self.boss,
            &mut self.pscav,
            &mut self.watchlist,
            &mut self.streamer,
        ]
    }

    /// Skeleton paint for a player: focus wins, then the local player, then kind.
    pub fn player(&self, player: &Player) -> Paint {
        if player.is_focused {
            return self.focused;
        }
        if player.is_local {
            return self.local_player;
        }
        match player.kind {
            PlayerKind::Teammate => self.teammate,
            PlayerKind::Pmc => self.pmc,
            PlayerKind::AiScav => self.scav,
            PlayerKind::AiRaider => self.raider,
            PlayerKind::AiBoss => self.boss,
            PlayerKind::PScav => self.pscav,
            PlayerKind::SpecialPlayer => self.watchlist,
            PlayerKind::Streamer => self.streamer,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec3;

    #[test]
    fn rescale_touches_only_line_styles() {
        let mut palette = Palette::default();
        palette.rescale(2.0);
        assert_eq!(palette.scale(), 2.0);
        assert_eq!(palette.crosshair.stroke_width, 2.0);
        assert_eq!(palette.streamer.stroke_width, 2.0);
        assert_eq!(palette.loot.stroke_width, 1.0);
        assert_eq!(palette.loot.style, PaintStyle::Fill);
    }

    #[test]
    fn with_scale_matches_rescale() {
        let mut a = Palette::default();
        a.rescale(1.5);
        assert_eq!(a, Palette::with_scale(1.5));
    }

    #[test]
    fn player_paint_priority() {
        let palette = Palette::default();
        let mut p = Player::new("x", PlayerKind::AiScav, Vec3::ONE);
        assert_eq!(palette.player(&p), palette.scav);

        p.is_local = true;
        assert_eq!(palette.player(&p), palette.local_player);

        p.is_focused = true;
        assert_eq!(palette.player(&p), palette.focused);
    }

    #[test]
    fn every_kind_has_a_paint() {
        let palette = Palette::default();
        let kinds = [
            (PlayerKind::Teammate, palette.teammate),
            (PlayerKind::Pmc, palette.pmc),
            (PlayerKind::AiRaider, palette.raider),
            (PlayerKind::AiBoss, palette.boss),
            (PlayerKind::PScav, palette.pscav),
            (PlayerKind::SpecialPlayer, palette.watchlist),
            (PlayerKind::Streamer, palette.streamer),
        ];
        for (kind, paint) in kinds {
            assert_eq!(palette.player(&Player::new("x", kind, Vec3::ONE)), paint);
        }
    }
}
