//! The aimview panel as an egui widget.

use aimview_common::{Rect, SurfaceSize};
use aimview_render::{AimviewConfig, AimviewRenderer, FrameStats, ViewSource};
use aimview_world::FrameSource;
use egui::{Response, Sense, Ui, Vec2};

use crate::canvas::EguiCanvas;

const MIN_SIZE: Vec2 = Vec2::new(200.0, 200.0);

/// Keeps the renderer alive across egui frames and feeds it the widget rect.
#[derive(Debug)]
pub struct AimviewWidget {
    renderer: AimviewRenderer,
}

impl AimviewWidget {
    pub fn new(view: ViewSource) -> Self {
        Self {
            renderer: AimviewRenderer::new(view, SurfaceSize::default(), 1.0),
        }
    }

    pub fn renderer(&self) -> &AimviewRenderer {
        &self.renderer
    }

    pub fn last_frame(&self) -> &FrameStats {
        self.renderer.last_frame()
    }

    /// Allocate the rest of the available space and draw one overlay frame into it.
    ///
    /// Line widths follow the context's pixels-per-point.
    pub fn show<S>(&mut self, ui: &mut Ui, source: &S, config: &AimviewConfig) -> Response
    where
        S: FrameSource + ?Sized,
    {
        let scale_factor = ui.ctx().pixels_per_point();
        self.show_scaled(ui, source, config, scale_factor)
    }

    /// Like [`show`](Self::show), with the host's UI scale factor given explicitly.
    pub fn show_scaled<S>(
        &mut self,
        ui: &mut Ui,
        source: &S,
        config: &AimviewConfig,
        scale_factor: f32,
    ) -> Response
    where
        S: FrameSource + ?Sized,
    {
        let desired = ui.available_size().max(MIN_SIZE);
        let (rect, response) = ui.allocate_exact_size(desired, Sense::hover());

        let size = SurfaceSize::from_extent(rect.width(), rect.height());
        if size != self.renderer.widget_size() {
            tracing::debug!(width = size.width, height = size.height, "aimview widget resized");
            self.renderer.resize(size);
        }
        if self.renderer.palette().scale() != scale_factor {
            tracing::debug!(scale_factor, "aimview scale factor changed");
            self.renderer.set_scale_factor(scale_factor);
        }

        let painter = ui.painter_at(rect);
        let mut canvas = EguiCanvas::new(&painter);
        let dest = Rect::new(rect.min.x, rect.min.y, rect.width(), rect.height());
        self.renderer.render(source, config, &mut canvas, dest);
        response
    }
}
