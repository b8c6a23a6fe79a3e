use crate::foundation::error::{PitchError, PitchResult};

pub use kurbo::{BezPath, Point};

/// Reserved per-frame value meaning "no pitch data at this frame".
pub const NO_PITCH: f64 = -1.0;

/// Return `true` when `v` carries a displayable frequency.
///
/// [`NO_PITCH`], non-positive and non-finite values all mean "no data".
pub fn has_pitch(v: f64) -> bool {
    v.is_finite() && v > 0.0
}

/// Frames-per-second represented as a rational `num/den`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct FrameRate {
    /// Numerator (frames).
    pub num: u32,
    /// Denominator (seconds), must be non-zero.
    pub den: u32,
}

impl FrameRate {
    /// Create a validated frame rate.
    pub fn new(num: u32, den: u32) -> PitchResult<Self> {
        if den == 0 {
            return Err(PitchError::validation("FrameRate den must be > 0"));
        }
        if num == 0 {
            return Err(PitchError::validation("FrameRate num must be > 0"));
        }
        Ok(Self { num, den })
    }

    /// Validate a deserialized value.
    pub fn validate(self) -> PitchResult<()> {
        Self::new(self.num, self.den).map(|_| ())
    }

    /// Convert to floating-point frames per second.
    pub fn as_f64(self) -> f64 {
        f64::from(self.num) / f64::from(self.den)
    }

    /// Compare rates by value, so `200/2` matches `100/1`.
    pub fn same_rate(self, other: FrameRate) -> bool {
        u64::from(self.num) * u64::from(other.den) == u64::from(other.num) * u64::from(self.den)
    }

    /// Seconds at which frame `frame` starts.
    pub fn frames_to_secs(self, frame: usize) -> f64 {
        (frame as f64) * f64::from(self.den) / f64::from(self.num)
    }

    /// Nearest frame index for `secs`. May be negative.
    pub fn secs_to_frame_round(self, secs: f64) -> i64 {
        (secs * self.as_f64()).round() as i64
    }

    /// Number of whole frames needed to cover `secs`.
    pub fn frames_covering(self, secs: f64) -> usize {
        (secs * self.as_f64()).ceil().max(0.0) as usize
    }
}

/// Straight-alpha RGBA8 stroke color.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub struct Rgba8 {
    /// Red channel.
    pub r: u8,
    /// Green channel.
    pub g: u8,
    /// Blue channel.
    pub b: u8,
    /// Alpha channel.
    pub a: u8,
}

impl Rgba8 {
    /// Opaque color.
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    /// Color with explicit alpha.
    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// `#rrggbb` form, alpha dropped.
    pub fn to_css_hex(self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }

    /// Alpha in `[0, 1]`.
    pub fn alpha_f32(self) -> f32 {
        f32::from(self.a) / 255.0
    }
}

/// Pixel size of the drawing region.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct ViewportSize {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
}

impl ViewportSize {
    /// `true` when either dimension is zero.
    pub fn is_empty(self) -> bool {
        self.width == 0 || self.height == 0
    }
}

/// Host UI theme. Only affects curve colors.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    /// Dark background.
    #[default]
    Dark,
    /// Light background.
    Light,
}

impl Theme {
    /// The other theme.
    pub fn toggled(self) -> Self {
        match self {
            Theme::Dark => Theme::Light,
            Theme::Light => Theme::Dark,
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/core.rs"]
mod tests;
