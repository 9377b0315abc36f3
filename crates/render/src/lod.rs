//! Distance-driven level of detail for marker radius, stroke width and font size.

/// `weight(d) = clamp(k / max(d, floor), lo, hi)`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LodCurve {
    pub k: f32,
    pub floor: f32,
    pub lo: f32,
    pub hi: f32,
}

impl LodCurve {
    pub const fn new(k: f32, floor: f32, lo: f32, hi: f32) -> Self {
        Self { k, floor, lo, hi }
    }

    pub fn weight(&self, distance: f32) -> f32 {
        // f32::max ignores a NaN operand, so NaN distances read as `floor`.
        (self.k / distance.max(self.floor)).clamp(self.lo, self.hi)
    }
}

/// Loot and hazards: 1.0 at 25m, steep falloff.
pub const LOOT_CURVE: LodCurve = LodCurve::new(25.0, 3.0, 0.2, 2.5);
pub const HAZARD_CURVE: LodCurve = LOOT_CURVE;
pub const EXIT_CURVE: LodCurve = LodCurve::new(50.0, 5.0, 0.3, 2.5);
pub const SKELETON_CURVE: LodCurve = LodCurve::new(50.0, 5.0, 0.5, 2.5);

/// Ratio between a marker's LOD weight and its label's.
const FONT_WEIGHT_FACTOR: f32 = 0.8;

/// Radius and label size limits for one marker category.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MarkerScale {
    pub base_radius: f32,
    pub radius_lo: f32,
    pub radius_hi: f32,
    pub font_lo: f32,
    pub font_hi: f32,
}

impl MarkerScale {
    pub fn radius(&self, ui_scale: f32, weight: f32) -> f32 {
        (self.base_radius * ui_scale * weight).clamp(self.radius_lo, self.radius_hi)
    }

    pub fn font_size(&self, base_font_size: f32, weight: f32) -> f32 {
        (base_font_size * weight * FONT_WEIGHT_FACTOR).clamp(self.font_lo, self.font_hi)
    }
}

pub const LOOT_MARKER: MarkerScale = MarkerScale {
    base_radius: 2.5,
    radius_lo: 1.5,
    radius_hi: 8.0,
    font_lo: 7.0,
    font_hi: 20.0,
};

pub const HAZARD_MARKER: MarkerScale = LOOT_MARKER;

pub const EXIT_MARKER: MarkerScale = MarkerScale {
    base_radius: 3.0,
    radius_lo: 2.0,
    radius_hi: 10.0,
    font_lo: 7.0,
    font_hi: 18.0,
};

/// Skeleton line width: `max(min_width, base_width * weight)`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StrokeScale {
    pub base_width: f32,
    pub min_width: f32,
}

impl StrokeScale {
    pub fn width(&self, weight: f32) -> f32 {
        (self.base_width * weight).max(self.min_width)
    }
}

pub const SKELETON_STROKE: StrokeScale = StrokeScale {
    base_width: 1.5,
    min_width: 0.5,
};

/// Curve plus limits: everything needed to size one marker category.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MarkerLod {
    pub curve: LodCurve,
    pub scale: MarkerScale,
}

/// Size of one marker at a given distance.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MarkerSize {
    pub radius: f32,
    pub font_size: f32,
}

impl MarkerLod {
    pub fn size(&self, distance: f32, ui_scale: f32, base_font_size: f32) -> MarkerSize {
        let w = self.curve.weight(distance);
        MarkerSize {
            radius: self.scale.radius(ui_scale, w),
            font_size: self.scale.font_size(base_font_size, w),
        }
    }
}

pub const LOOT_LOD: MarkerLod = MarkerLod {
    curve: LOOT_CURVE,
    scale: LOOT_MARKER,
};

pub const HAZARD_LOD: MarkerLod = MarkerLod {
    curve: HAZARD_CURVE,
    scale: HAZARD_MARKER,
};

pub const EXIT_LOD: MarkerLod = MarkerLod {
    curve: EXIT_CURVE,
    scale: EXIT_MARKER,
};

/// Stroke width for a skeleton seen at `distance`.
pub fn skeleton_stroke(distance: f32) -> f32 {
    SKELETON_STROKE.width(SKELETON_CURVE.weight(distance))
}
