//! Offscreen surface ownership: allocate on size change, dispose on demand.

use aimview_common::{Rect, SurfaceSize};

use crate::canvas::DrawList;

/// Initial command capacity of a freshly allocated surface.
const INITIAL_COMMANDS: usize = 256;

/// Backing store the frame is drawn into before composition.
#[derive(Debug)]
pub struct Surface {
    size: SurfaceSize,
    commands: DrawList,
}

impl Surface {
    /// `None` when either dimension is zero.
    pub fn allocate(size: SurfaceSize) -> Option<Self> {
        if size.is_empty() {
            return None;
        }
        Some(Self {
            size,
            commands: DrawList::with_capacity(INITIAL_COMMANDS),
        })
    }

    pub fn size(&self) -> SurfaceSize {
        self.size
    }

    pub fn rect(&self) -> Rect {
        Rect::from_size(self.size)
    }

    pub fn commands(&self) -> &DrawList {
        &self.commands
    }

    /// Drawing context for this surface.
    pub fn canvas(&mut self) -> &mut DrawList {
        &mut self.commands
    }
}

/// Owns at most one [`Surface`] sized to the widget.
#[derive(Debug, Default)]
pub struct SurfaceSlot {
    surface: Option<Surface>,
    allocations: u64,
}

impl SurfaceSlot {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make sure the surface matches `size`, reallocating on mismatch.
    ///
    /// A mismatched surface is dropped before the new one is created, never
    /// resized in place. Returns `None` for an empty size.
    pub fn ensure(&mut self, size: SurfaceSize) -> Option<&mut Surface> {
        let matches = self.surface.as_ref().is_some_and(|s| s.size == size);
        if !matches {
            self.dispose();
            if let Some(surface) = Surface::allocate(size) {
                self.allocations += 1;
                tracing::debug!(
                    width = size.width,
                    height = size.height,
                    allocations = self.allocations,
                    "allocated aimview surface"
                );
                self.surface = Some(surface);
            }
        }
        self.surface.as_mut()
    }

    /// Release the surface. Safe to call repeatedly.
    pub fn dispose(&mut self) {
        if self.surface.take().is_some() {
            tracing::trace!("disposed aimview surface");
        }
    }

    pub fn get(&self) -> Option<&Surface> {
        self.surface.as_ref()
    }

    /// Number of allocations performed over the slot's lifetime.
    pub fn allocations(&self) -> u64 {
        self.allocations
    }
}
