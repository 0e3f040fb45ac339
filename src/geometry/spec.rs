//! Circle Parameters Module
//! Validated input parameters for one computation (center, radius, count, color).

use std::fmt;
use thiserror::Error;

/// Smallest radius the parameter inputs accept.
pub const MIN_RADIUS: f64 = 0.01;
/// Allowed range for the number of points.
pub const MIN_POINTS: usize = 1;
pub const MAX_POINTS: usize = 100;
/// Largest |center| / radius ratio; beyond it the circle collapses in `f64`.
pub const MAX_CENTER_TO_RADIUS: f64 = 1e12;

pub const DEFAULT_RADIUS: f64 = 1.0;
pub const DEFAULT_POINTS: usize = 8;
pub const DEFAULT_COLOR_HEX: &str = "#FF0000";

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ParameterError {
    #[error("Center coordinates must be finite, got [{0}, {1}]")]
    NonFiniteCenter(f64, f64),
    #[error("Radius must be a finite value >= {min}, got {0}", min = MIN_RADIUS)]
    InvalidRadius(f64),
    #[error("Number of points must be between {min} and {max}, got {0}", min = MIN_POINTS, max = MAX_POINTS)]
    InvalidPointCount(usize),
    #[error(
        "Center [{0}, {1}] is too far from the origin for radius {2} (max ratio {max:e})",
        max = MAX_CENTER_TO_RADIUS
    )]
    CenterTooFar(f64, f64, f64),
    #[error("Invalid color '{0}', expected #RRGGBB")]
    InvalidColor(String),
}

/// RGB color of the generated points.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PointColor {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl PointColor {
    pub const fn from_rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Parse `#RRGGBB` (leading `#` optional, any case).
    pub fn from_hex(text: &str) -> Result<Self, ParameterError> {
        let invalid = || ParameterError::InvalidColor(text.to_string());

        let hex = text.trim();
        let hex = hex.strip_prefix('#').unwrap_or(hex);
        if hex.len() != 6 || !hex.is_ascii() {
            return Err(invalid());
        }

        let channel = |range: std::ops::Range<usize>| {
            u8::from_str_radix(&hex[range], 16).map_err(|_| invalid())
        };

        Ok(Self {
            r: channel(0..2)?,
            g: channel(2..4)?,
            b: channel(4..6)?,
        })
    }

    /// Upper-case `#RRGGBB`, the form the color picker reports.
    pub fn to_hex(&self) -> String {
        format!("#{:02X}{:02X}{:02X}", self.r, self.g, self.b)
    }

    /// Channels scaled to 0.0..=1.0.
    pub fn to_unit_rgb(&self) -> (f32, f32, f32) {
        (
            self.r as f32 / 255.0,
            self.g as f32 / 255.0,
            self.b as f32 / 255.0,
        )
    }
}

impl Default for PointColor {
    fn default() -> Self {
        Self::from_rgb(0xFF, 0x00, 0x00)
    }
}

impl fmt::Display for PointColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

/// Parameters for one computation. Recreated from the inputs on every interaction.
#[derive(Debug, Clone, PartialEq)]
pub struct CircleSpec {
    pub center: (f64, f64),
    pub radius: f64,
    pub point_count: usize,
    pub point_color: PointColor,
}

impl Default for CircleSpec {
    fn default() -> Self {
        Self {
            center: (0.0, 0.0),
            radius: DEFAULT_RADIUS,
            point_count: DEFAULT_POINTS,
            point_color: PointColor::default(),
        }
    }
}

impl CircleSpec {
    pub fn new(
        center: (f64, f64),
        radius: f64,
        point_count: usize,
        point_color: PointColor,
    ) -> Result<Self, ParameterError> {
        let spec = Self {
            center,
            radius,
            point_count,
            point_color,
        };
        spec.validate()?;
        Ok(spec)
    }

    /// Check the invariants the input widgets are expected to enforce.
    pub fn validate(&self) -> Result<(), ParameterError> {
        validate_geometry(self.center, self.radius, self.point_count)
    }
}

pub(crate) fn validate_geometry(
    center: (f64, f64),
    radius: f64,
    point_count: usize,
) -> Result<(), ParameterError> {
    if !center.0.is_finite() || !center.1.is_finite() {
        return Err(ParameterError::NonFiniteCenter(center.0, center.1));
    }
    // Written so that NaN fails too.
    if !(radius.is_finite() && radius >= MIN_RADIUS) {
        return Err(ParameterError::InvalidRadius(radius));
    }
    if !(MIN_POINTS..=MAX_POINTS).contains(&point_count) {
        return Err(ParameterError::InvalidPointCount(point_count));
    }
    if center.0.abs().max(center.1.abs()) > radius * MAX_CENTER_TO_RADIUS {
        return Err(ParameterError::CenterTooFar(center.0, center.1, radius));
    }
    Ok(())
}
