//! Immediate-mode drawing interface and the recorded draw list that backs
//! the offscreen surface.

use aimview_common::{Color, Rect, ScreenPoint};
use glam::Vec2;
use std::fmt;

use crate::style::Paint;
use crate::surface::Surface;

/// The 2D primitives the overlay needs. Hosts implement this on top of their
/// own painter.
pub trait Canvas {
    fn clear(&mut self, color: Color);
    fn draw_circle(&mut self, center: ScreenPoint, radius: f32, paint: Paint);
    fn draw_line(&mut self, from: ScreenPoint, to: ScreenPoint, paint: Paint);
    /// `origin` is the left end of the text baseline.
    fn draw_text(&mut self, text: &str, origin: ScreenPoint, font_size: f32, color: Color);
}

/// Final composition target: takes a finished surface and a destination rect.
pub trait HostCanvas {
    fn blit(&mut self, surface: &Surface, dest: Rect);
}

/// Any canvas can host the overlay by replaying the surface into `dest`.
impl<C: Canvas + ?Sized> HostCanvas for C {
    fn blit(&mut self, surface: &Surface, dest: Rect) {
        surface.commands().replay_into(self, surface.rect(), dest);
    }
}

/// One recorded primitive.
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCmd {
    Clear(Color),
    Circle {
        center: ScreenPoint,
        radius: f32,
        paint: Paint,
    },
    Line {
        from: ScreenPoint,
        to: ScreenPoint,
        paint: Paint,
    },
    Text {
        text: String,
        origin: ScreenPoint,
        font_size: f32,
        color: Color,
    },
}

impl fmt::Display for DrawCmd {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Clear(color) => write!(f, "clear {color}"),
            Self::Circle {
                center,
                radius,
                paint,
            } => write!(
                f,
                "circle ({:.1}, {:.1}) r={:.2} {}",
                center.x, center.y, radius, paint.color
            ),
            Self::Line { from, to, paint } => write!(
                f,
                "line ({:.1}, {:.1}) -> ({:.1}, {:.1}) w={:.2} {}",
                from.x, from.y, to.x, to.y, paint.stroke_width, paint.color
            ),
            Self::Text {
                text,
                origin,
                font_size,
                color,
            } => write!(
                f,
                "text ({:.1}, {:.1}) size={:.1} {} {:?}",
                origin.x, origin.y, font_size, color, text
            ),
        }
    }
}

/// Recording canvas. Serves as the offscreen surface's pixel store and as a
/// host in tests and the CLI.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DrawList {
    commands: Vec<DrawCmd>,
}

impl DrawList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            commands: Vec::with_capacity(capacity),
        }
    }

    pub fn commands(&self) -> &[DrawCmd] {
        &self.commands
    }

    pub fn len(&self) -> usize {
        self.commands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    pub fn circles(&self) -> impl Iterator<Item = &DrawCmd> {
        self.commands
            .iter()
            .filter(|c| matches!(c, DrawCmd::Circle { .. }))
    }

    pub fn lines(&self) -> impl Iterator<Item = &DrawCmd> {
        self.commands
            .iter()
            .filter(|c| matches!(c, DrawCmd::Line { .. }))
    }

    pub fn texts(&self) -> impl Iterator<Item = &str> {
        self.commands.iter().filter_map(|c| match c {
            DrawCmd::Text { text, .. } => Some(text.as_str()),
            _ => None,
        })
    }

    /// Replay into `target`, mapping `src` onto `dest`.
    ///
    /// Lengths (radii, stroke widths, font sizes) scale by the smaller axis
    /// factor. Transparent clears are dropped: compositing a cleared surface
    /// leaves the host untouched.
    pub fn replay_into<C: Canvas + ?Sized>(&self, target: &mut C, src: Rect, dest: Rect) {
        if !src.has_area() {
            return;
        }
        let factor = dest.extent() / src.extent();
        let length = factor.x.min(factor.y);
        let map = |p: Vec2| dest.origin() + (p - src.origin()) * factor;

        for cmd in &self.commands {
            match cmd {
                DrawCmd::Clear(color) => {
                    if !color.is_transparent() {
                        target.clear(*color);
                    }
                }
                DrawCmd::Circle {
                    center,
                    radius,
                    paint,
                } => target.draw_circle(
                    map(*center),
                    radius * length,
                    paint.with_stroke_width(paint.stroke_width * length),
                ),
                DrawCmd::Line { from, to, paint } => target.draw_line(
                    map(*from),
                    map(*to),
                    paint.with_stroke_width(paint.stroke_width * length),
                ),
                DrawCmd::Text {
                    text,
                    origin,
                    font_size,
                    color,
                } => target.draw_text(text, map(*origin), font_size * length, *color),
            }
        }
    }
}

impl Canvas for DrawList {
    /// Clearing discards everything recorded so far.
    fn clear(&mut self, color: Color) {
        self.commands.clear();
        self.commands.push(DrawCmd::Clear(color));
    }

    fn draw_circle(&mut self, center: ScreenPoint, radius: f32, paint: Paint) {
        self.commands.push(DrawCmd::Circle {
            center,
            radius,
            paint,
        });
    }

    fn draw_line(&mut self, from: ScreenPoint, to: ScreenPoint, paint: Paint) {
        self.commands.push(DrawCmd::Line { from, to, paint });
    }

    fn draw_text(&mut self, text: &str, origin: ScreenPoint, font_size: f32, color: Color) {
        self.commands.push(DrawCmd::Text {
            text: text.to_string(),
            origin,
            font_size,
            color,
        });
    }
}

impl fmt::Display for DrawList {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for cmd in &self.commands {
            writeln!(f, "{cmd}")?;
        }
        Ok(())
    }
}
