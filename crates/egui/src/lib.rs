//! egui host for the aimview overlay.
//!
//! # Invariants
//! - The widget owns its renderer; the host only lends a `Ui` per frame.
//! - Overlay primitives are clipped to the widget rect.

mod canvas;
mod widget;

pub use canvas::{EguiCanvas, to_color32, to_egui_rect, to_pos2};
pub use widget::AimviewWidget;

pub fn crate_info() -> &'static str {
    "aimview-egui v0.1.0"
}
