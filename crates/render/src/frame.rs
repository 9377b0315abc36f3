//! One overlay frame: clear, gate, draw every category in order, composite.

use std::any::Any;
use std::fmt;
use std::panic::{self, AssertUnwindSafe};
use std::time::{Duration, Instant};

use aimview_common::{Color, Rect, ScreenPoint, SurfaceSize, is_unset};
use aimview_world::{
    BONE_CONNECTIONS, Bone, ExitPoint, ExitStatus, FrameSource, Hazard, HazardKind, LootItem,
    Player,
};
use glam::{Vec2, Vec3};

use crate::canvas::{Canvas, DrawList, HostCanvas};
use crate::config::AimviewConfig;
use crate::filter::EntityFilters;
use crate::lod::{self, EXIT_LOD, HAZARD_LOD, LOOT_LOD, MarkerLod};
use crate::style::{Paint, Palette};
use crate::surface::{Surface, SurfaceSlot};
use crate::view::{Projector, ViewSource};

/// A single entity that could not be drawn. The rest of the frame goes on.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum DrawError {
    #[error("non-finite position {0}")]
    NonFinitePosition(Vec3),
    #[error("player `{player}` has a non-finite {bone:?} position")]
    NonFiniteBone { player: String, bone: Bone },
}

/// How the last frame ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FrameOutcome {
    /// No frame rendered yet.
    #[default]
    Idle,
    /// Widget has no drawable area.
    NoSurface,
    NotInSession,
    NoObserver,
    Composited,
}

/// Counters for the last frame.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FrameStats {
    pub outcome: FrameOutcome,
    pub exits_drawn: usize,
    pub hazards_drawn: usize,
    pub skeletons_drawn: usize,
    pub loot_drawn: usize,
    /// Entities dropped because their data was malformed.
    pub faults: usize,
    /// A collaborator panicked and the pass stopped early.
    pub aborted: bool,
    pub frame_time: Duration,
}

impl FrameStats {
    pub fn total_drawn(&self) -> usize {
        self.exits_drawn + self.hazards_drawn + self.skeletons_drawn + self.loot_drawn
    }
}

impl fmt::Display for FrameStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Frame: outcome={:?} exits={} hazards={} skeletons={} loot={} faults={} aborted={} time={:?}",
            self.outcome,
            self.exits_drawn,
            self.hazards_drawn,
            self.skeletons_drawn,
            self.loot_drawn,
            self.faults,
            self.aborted,
            self.frame_time
        )
    }
}

/// Derived look of one marker draw.
#[derive(Debug, Clone, PartialEq)]
pub struct VisualParams {
    pub radius: f32,
    pub stroke_width: f32,
    pub font_size: f32,
    pub color: Color,
    pub label: String,
}

/// The aimview widget's renderer.
///
/// Owns the offscreen surface and the style palette; everything else is
/// re-derived from the frame source on every call to [`render`](Self::render).
#[derive(Debug)]
pub struct AimviewRenderer {
    view: ViewSource,
    palette: Palette,
    surface: SurfaceSlot,
    widget_size: SurfaceSize,
    stats: FrameStats,
}

impl AimviewRenderer {
    pub fn new(view: ViewSource, widget_size: SurfaceSize, scale_factor: f32) -> Self {
        let mut surface = SurfaceSlot::new();
        surface.ensure(widget_size);
        Self {
            view,
            palette: Palette::with_scale(scale_factor),
            surface,
            widget_size,
            stats: FrameStats::default(),
        }
    }

    /// Widget resized. The surface follows on the next frame.
    pub fn resize(&mut self, size: SurfaceSize) {
        self.widget_size = size;
    }

    /// UI scale factor changed; rescales every line style.
    pub fn set_scale_factor(&mut self, scale: f32) {
        self.palette.rescale(scale);
    }

    pub fn widget_size(&self) -> SurfaceSize {
        self.widget_size
    }

    pub fn view(&self) -> &ViewSource {
        &self.view
    }

    pub fn palette(&self) -> &Palette {
        &self.palette
    }

    pub fn last_frame(&self) -> &FrameStats {
        &self.stats
    }

    pub fn surface(&self) -> Option<&Surface> {
        self.surface.get()
    }

    pub fn surface_allocations(&self) -> u64 {
        self.surface.allocations()
    }

    /// Release the offscreen surface. The next frame allocates a new one.
    pub fn dispose(&mut self) {
        self.surface.dispose();
    }

    /// Draw one frame and composite it onto `target` at `dest`.
    ///
    /// Never fails and never panics on bad input: skipped preconditions and
    /// dropped entities only show up in [`last_frame`](Self::last_frame).
    pub fn render<S, T>(&mut self, source: &S, config: &AimviewConfig, target: &mut T, dest: Rect)
    where
        S: FrameSource + ?Sized,
        T: HostCanvas + ?Sized,
    {
        let _span = tracing::trace_span!("aimview_frame", view = self.view.label()).entered();
        let start = Instant::now();

        let mut stats = self.draw_frame(source, config, target, dest);
        stats.frame_time = start.elapsed();

        tracing::trace!(
            outcome = ?stats.outcome,
            drawn = stats.total_drawn(),
            faults = stats.faults,
            "aimview frame complete"
        );
        self.stats = stats;
    }

    fn draw_frame<S, T>(
        &mut self,
        source: &S,
        config: &AimviewConfig,
        target: &mut T,
        dest: Rect,
    ) -> FrameStats
    where
        S: FrameSource + ?Sized,
        T: HostCanvas + ?Sized,
    {
        let mut stats = FrameStats::default();

        let Some(surface) = self.surface.ensure(self.widget_size) else {
            stats.outcome = FrameOutcome::NoSurface;
            return stats;
        };
        surface.canvas().clear(Color::TRANSPARENT);

        if !source.in_session() {
            stats.outcome = FrameOutcome::NotInSession;
            return stats;
        }
        let Some(observer) = source.observer() else {
            stats.outcome = FrameOutcome::NoObserver;
            return stats;
        };

        let size = surface.size();
        let projector = self.view.projector(&observer, size);
        let mut pass = FramePass {
            canvas: surface.canvas(),
            projector: projector.as_ref(),
            palette: &self.palette,
            filters: EntityFilters::new(config, &observer),
            config,
            size,
            stats: &mut stats,
        };

        let result = panic::catch_unwind(AssertUnwindSafe(|| pass.run(source)));
        if let Err(payload) = result {
            stats.aborted = true;
            tracing::warn!(
                reason = panic_message(payload.as_ref()),
                "aimview frame aborted, compositing partial frame"
            );
        }

        target.blit(surface, dest);
        stats.outcome = FrameOutcome::Composited;
        stats
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> &str {
    if let Some(s) = payload.downcast_ref::<&str>() {
        s
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.as_str()
    } else {
        "unknown panic"
    }
}

#[derive(Debug, Clone, Copy)]
enum Category {
    Exit,
    Hazard,
    Skeleton,
    Loot,
}

/// Per-frame drawing state. Lives for exactly one `render` call.
struct FramePass<'a> {
    canvas: &'a mut DrawList,
    projector: &'a dyn Projector,
    palette: &'a Palette,
    filters: EntityFilters<'a>,
    config: &'a AimviewConfig,
    size: SurfaceSize,
    stats: &'a mut FrameStats,
}

impl FramePass<'_> {
    /// Later categories are drawn over earlier ones.
    fn run<S: FrameSource + ?Sized>(&mut self, source: &S) {
        self.draw_exits(source.exits());
        self.draw_hazards(source.hazards());
        if self.filters.players_enabled() {
            self.draw_skeletons(source.players());
        }
        if self.filters.loot_enabled() {
            self.draw_loot(source.loot());
        }
        self.draw_crosshair();
    }

    fn tally(&mut self, category: Category, outcome: Result<bool, DrawError>) {
        match outcome {
            Ok(true) => {
                let counter = match category {
                    Category::Exit => &mut self.stats.exits_drawn,
                    Category::Hazard => &mut self.stats.hazards_drawn,
                    Category::Skeleton => &mut self.stats.skeletons_drawn,
                    Category::Loot => &mut self.stats.loot_drawn,
                };
                *counter += 1;
            }
            Ok(false) => {}
            Err(err) => {
                self.stats.faults += 1;
                tracing::debug!(?category, %err, "skipped malformed entity");
            }
        }
    }

    fn draw_exits(&mut self, exits: &[ExitPoint]) {
        for exit in exits {
            match self.filters.exit(exit) {
                Ok(distance) => {
                    let outcome = self.draw_exit(exit, distance);
                    self.tally(Category::Exit, outcome);
                }
                Err(reason) => tracing::trace!(name = %exit.name, ?reason, "exit filtered"),
            }
        }
    }

    fn draw_exit(&mut self, exit: &ExitPoint, distance: f32) -> Result<bool, DrawError> {
        ensure_finite(exit.position)?;
        let Some(screen) = self.projector.project(exit.position) else {
            return Ok(false);
        };

        let paint = if exit.status == ExitStatus::Pending {
            self.palette.exit_pending
        } else {
            self.palette.exit_open
        };
        let params = self.visuals(&EXIT_LOD, distance, paint, exit.name.clone());
        self.marker(screen, &params, paint, self.palette.exit_text);
        Ok(true)
    }

    fn draw_hazards(&mut self, hazards: &[Hazard]) {
        for hazard in hazards {
            match self.filters.hazard(hazard) {
                Ok(distance) => {
                    let outcome = self.draw_hazard(hazard, distance);
                    self.tally(Category::Hazard, outcome);
                }
                Err(reason) => tracing::trace!(kind = ?hazard.kind, ?reason, "hazard filtered"),
            }
        }
    }

    fn draw_hazard(&mut self, hazard: &Hazard, distance: f32) -> Result<bool, DrawError> {
        ensure_finite(hazard.position)?;
        let Some(screen) = self.projector.project(hazard.position) else {
            return Ok(false);
        };

        let label = match hazard.kind {
            HazardKind::Tripwire => "Tripwire",
            HazardKind::Grenade => "Grenade",
            HazardKind::Unknown => return Ok(false),
        };
        let paint = self.palette.explosives;
        let params = self.visuals(&HAZARD_LOD, distance, paint, label.to_string());
        self.marker(screen, &params, paint, paint.color);
        Ok(true)
    }

    fn draw_skeletons(&mut self, players: &[Player]) {
        for player in players {
            match self.filters.player(player) {
                Ok(distance) => {
                    let outcome = self.draw_skeleton(player, distance);
                    self.tally(Category::Skeleton, outcome);
                }
                Err(reason) => tracing::trace!(name = %player.name, ?reason, "player filtered"),
            }
        }
    }

    /// `Ok(true)` when at least one bone segment made it on screen.
    fn draw_skeleton(&mut self, player: &Player, distance: f32) -> Result<bool, DrawError> {
        ensure_finite(player.position)?;
        if let Some(bone) = player.skeleton.first_non_finite() {
            return Err(DrawError::NonFiniteBone {
                player: player.name.clone(),
                bone,
            });
        }

        let paint = self
            .palette
            .player(player)
            .with_stroke_width(lod::skeleton_stroke(distance));

        let mut segments = 0;
        for &(from, to) in BONE_CONNECTIONS.iter() {
            let a = player.skeleton.bone(from);
            let b = player.skeleton.bone(to);
            if is_unset(a) || is_unset(b) {
                continue;
            }
            if let (Some(sa), Some(sb)) = (self.projector.project(a), self.projector.project(b)) {
                self.canvas.draw_line(sa, sb, paint);
                segments += 1;
            }
        }
        Ok(segments > 0)
    }

    fn draw_loot(&mut self, items: &[LootItem]) {
        for item in items {
            match self.filters.loot(item) {
                Ok(distance) => {
                    let outcome = self.draw_loot_item(item, distance);
                    self.tally(Category::Loot, outcome);
                }
                Err(reason) => tracing::trace!(name = %item.name, ?reason, "loot filtered"),
            }
        }
    }

    fn draw_loot_item(&mut self, item: &LootItem, distance: f32) -> Result<bool, DrawError> {
        ensure_finite(item.position)?;
        let Some(screen) = self.projector.project(item.position) else {
            return Ok(false);
        };

        let (paint, text_color) = match self.custom_loot_color(item) {
            Some(color) => (self.palette.loot.with_color(color), color),
            None => (self.palette.loot, self.palette.loot_text),
        };
        let label = format!("{} D:{:.0}m", item.display_name(), distance);
        let params = self.visuals(&LOOT_LOD, distance, paint, label);
        self.marker(screen, &params, paint, text_color);
        Ok(true)
    }

    /// The item's filter color, or `None` to fall back to the default style.
    fn custom_loot_color(&self, item: &LootItem) -> Option<Color> {
        let raw = item.custom_color.as_deref().filter(|s| !s.trim().is_empty())?;
        match Color::from_hex(raw) {
            Ok(color) => Some(color),
            Err(err) => {
                tracing::trace!(name = %item.name, %err, "ignoring loot filter color");
                None
            }
        }
    }

    fn draw_crosshair(&mut self) {
        let center = self.size.center();
        let (w, h) = (self.size.width_f32(), self.size.height_f32());
        let paint = self.palette.crosshair;
        self.canvas.draw_line(Vec2::new(0.0, center.y), Vec2::new(w, center.y), paint);
        self.canvas.draw_line(Vec2::new(center.x, 0.0), Vec2::new(center.x, h), paint);
    }

    fn visuals(&self, lod: &MarkerLod, distance: f32, paint: Paint, label: String) -> VisualParams {
        let size = lod.size(distance, self.config.ui.ui_scale, self.config.ui.font_size);
        VisualParams {
            radius: size.radius,
            stroke_width: paint.stroke_width,
            font_size: size.font_size,
            color: paint.color,
            label,
        }
    }

    /// Filled dot with its label offset down-right of the dot.
    fn marker(&mut self, at: ScreenPoint, params: &VisualParams, paint: Paint, text_color: Color) {
        let r = params.radius;
        self.canvas.draw_circle(at, r, paint);
        self.canvas.draw_text(
            &params.label,
            at + Vec2::new(r + 3.0, r + 1.0),
            params.font_size,
            text_color,
        );
    }
}

fn ensure_finite(position: Vec3) -> Result<(), DrawError> {
    if position.is_finite() {
        Ok(())
    } else {
        Err(DrawError::NonFinitePosition(position))
    }
}
