use std::f64::consts::TAU;

use serde::{Deserialize, Serialize};

/// A position in a 2D plane: screen coordinates for touches, unit-sphere
/// projection for tilt readings.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point2D {
    pub x: f64,
    pub y: f64,
}

impl Point2D {
    pub const ORIGIN: Point2D = Point2D { x: 0.0, y: 0.0 };

    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Desired travel direction and intensity.
///
/// `angle` is radians in `[0, 2π)` and `magnitude` is in `[0, 1]`; both are
/// enforced on construction, including when deserializing.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(from = "RawDirectionVector")]
pub struct DirectionVector {
    angle: f64,
    magnitude: f64,
}

#[derive(Deserialize)]
struct RawDirectionVector {
    angle: f64,
    magnitude: f64,
}

impl From<RawDirectionVector> for DirectionVector {
    fn from(value: RawDirectionVector) -> Self {
        Self::new(value.angle, value.magnitude)
    }
}

impl DirectionVector {
    pub const STOP: DirectionVector = DirectionVector {
        angle: 0.0,
        magnitude: 0.0,
    };

    pub fn new(angle: f64, magnitude: f64) -> Self {
        Self {
            angle: normalize_angle(angle),
            magnitude: clamp_magnitude(magnitude),
        }
    }

    pub fn angle(&self) -> f64 {
        self.angle
    }

    pub fn magnitude(&self) -> f64 {
        self.magnitude
    }
}

fn normalize_angle(angle: f64) -> f64 {
    if !angle.is_finite() {
        return 0.0;
    }
    // rem_euclid can round up to TAU for tiny negative inputs
    let wrapped = angle.rem_euclid(TAU);
    if wrapped >= TAU {
        0.0
    } else {
        wrapped
    }
}

fn clamp_magnitude(magnitude: f64) -> f64 {
    if magnitude.is_nan() {
        return 0.0;
    }
    magnitude.clamp(0.0, 1.0)
}

/// Device attitude as a row-major 3x3 rotation matrix.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RotationMatrix(pub [[f64; 3]; 3]);

impl RotationMatrix {
    /// Tilt of the device face as `(m13, -m23)`, each in `[-1, 1]`.
    pub fn tilt(&self) -> Point2D {
        let m = &self.0;
        Point2D::new(m[0][2], -m[1][2])
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Color {
    pub red: f32,
    pub green: f32,
    pub blue: f32,
    pub alpha: f32,
}

impl Color {
    pub const fn rgb(red: f32, green: f32, blue: f32) -> Self {
        Self {
            red,
            green,
            blue,
            alpha: 1.0,
        }
    }

    pub fn to_rgb8(&self) -> [u8; 3] {
        [
            channel_to_u8(self.red),
            channel_to_u8(self.green),
            channel_to_u8(self.blue),
        ]
    }
}

fn channel_to_u8(channel: f32) -> u8 {
    (channel.clamp(0.0, 1.0) * 255.0).round() as u8
}

/// Color wells offered by the control surface, left to right.
pub const COLOR_WELLS: [Color; 6] = [
    Color::rgb(0.281_834_4, 0.569_302_44, 0.128_182_43),
    Color::rgb(0.934_615_97, 0.628_480_4, 0.107_728_44),
    Color::rgb(0.894_950_75, 0.143_843_64, 0.084_801_26),
    Color::rgb(0.754_000_4, 0.0, 0.264_999_8),
    Color::rgb(0.285_691, 0.0, 0.958_919_94),
    Color::rgb(0.199_128_42, 0.602_844_95, 0.959_223_3),
];

pub fn color_well(index: usize) -> Option<Color> {
    COLOR_WELLS.get(index).copied()
}

#[cfg(test)]
#[path = "tests/domain_tests.rs"]
mod tests;
