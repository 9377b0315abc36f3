//! Painter-backed canvas. Overlay commands are replayed straight onto an
//! `egui::Painter`, so the surface composites with whatever is under it.

use aimview_common::{Color, Rect, ScreenPoint};
use aimview_render::{Canvas, Paint, PaintStyle};
use egui::{Align2, Color32, FontId, Painter, Pos2, Stroke};

pub fn to_color32(color: Color) -> Color32 {
    Color32::from_rgba_unmultiplied(color.r, color.g, color.b, color.a)
}

pub fn to_pos2(point: ScreenPoint) -> Pos2 {
    Pos2::new(point.x, point.y)
}

pub fn to_egui_rect(rect: Rect) -> egui::Rect {
    egui::Rect::from_min_size(
        Pos2::new(rect.x, rect.y),
        egui::vec2(rect.width, rect.height),
    )
}

/// Wraps a painter for the duration of one composite.
pub struct EguiCanvas<'p> {
    painter: &'p Painter,
}

impl<'p> EguiCanvas<'p> {
    pub fn new(painter: &'p Painter) -> Self {
        Self { painter }
    }

    pub fn painter(&self) -> &Painter {
        self.painter
    }
}

impl Canvas for EguiCanvas<'_> {
    fn clear(&mut self, color: Color) {
        if color.is_transparent() {
            return;
        }
        self.painter
            .rect_filled(self.painter.clip_rect(), 0.0, to_color32(color));
    }

    fn draw_circle(&mut self, center: ScreenPoint, radius: f32, paint: Paint) {
        let color = to_color32(paint.color);
        match paint.style {
            PaintStyle::Fill => {
                self.painter.circle_filled(to_pos2(center), radius, color);
            }
            PaintStyle::Stroke => {
                let stroke = Stroke::new(paint.stroke_width, color);
                self.painter.circle_stroke(to_pos2(center), radius, stroke);
            }
        }
    }

    fn draw_line(&mut self, from: ScreenPoint, to: ScreenPoint, paint: Paint) {
        self.painter.line_segment(
            [to_pos2(from), to_pos2(to)],
            Stroke::new(paint.stroke_width, to_color32(paint.color)),
        );
    }

    fn draw_text(&mut self, text: &str, origin: ScreenPoint, font_size: f32, color: Color) {
        self.painter.text(
            to_pos2(origin),
            Align2::LEFT_BOTTOM,
            text,
            FontId::proportional(font_size),
            to_color32(color),
        );
    }
}
