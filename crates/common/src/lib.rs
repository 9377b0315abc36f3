//! Shared value types for the aimview overlay.
//!
//! # Invariants
//! - Everything here is plain data: `Copy` where possible, no interior state.
//! - Screen space is Y-down pixels with the origin at the top-left corner.

mod color;
mod types;

pub use color::{Color, ColorParseError};
pub use types::{Rect, ScreenPoint, SurfaceSize, is_unset};

pub fn crate_info() -> &'static str {
    "aimview-common v0.1.0"
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn crate_loads() {
        assert!(crate_info().contains("common"));
    }
}
