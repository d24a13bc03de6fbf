//! Unit types: Mm and screen density conversions

const MM_PER_INCH: f32 = 25.4;

/// Baseline dots-per-inch used when the platform reports nothing better.
pub const DEFAULT_DPI: f32 = 96.0;

/// Physical millimetres on the screen surface.
#[derive(Clone, Copy, Debug, PartialEq, PartialOrd)]
pub struct Mm(pub f32);

impl Mm {
    pub fn to_px(&self, density: ScreenDensity) -> f32 {
        self.0 * density.pixels_per_mm()
    }
}

/// Physical pixel density of the screen a window lives on.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ScreenDensity {
    pixels_per_mm: f32,
}

impl ScreenDensity {
    pub fn from_dpi(dots_per_inch: f32) -> Self {
        Self::from_pixels_per_mm(dots_per_inch / MM_PER_INCH)
    }

    /// Non-positive or non-finite densities fall back to the baseline.
    pub fn from_pixels_per_mm(pixels_per_mm: f32) -> Self {
        if pixels_per_mm.is_finite() && pixels_per_mm > 0.0 {
            Self { pixels_per_mm }
        } else {
            Self::default()
        }
    }

    pub fn pixels_per_mm(&self) -> f32 {
        self.pixels_per_mm
    }

    pub fn dpi(&self) -> f32 {
        self.pixels_per_mm * MM_PER_INCH
    }
}

impl Default for ScreenDensity {
    fn default() -> Self {
        Self {
            pixels_per_mm: DEFAULT_DPI / MM_PER_INCH,
        }
    }
}
