//! Interpolated property values

use glam::Vec3;
use serde::{Deserialize, Serialize};

/// A value that can be written to a named property on a scene target.
///
/// Vectors cover both positions and colors; colors interpolate channel-wise
/// in the same linear space as every other value, with no gamma handling.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum PropertyValue {
    /// Single scalar (roughness, clearcoat, tiling, ...)
    Scalar(f32),
    /// Three-component vector (camera position, base color, ...)
    Vec3(Vec3),
}

impl PropertyValue {
    /// Interpolate from `self` toward `end` by eased fraction `f`.
    ///
    /// At `f >= 1.0` the end value is returned verbatim so finished
    /// transitions land exactly on their submitted targets instead of a
    /// float-rounded neighbor. Value kinds are checked at submit time; a
    /// mismatched pair falls through to the end value.
    pub fn lerp(self, end: PropertyValue, f: f32) -> PropertyValue {
        if f >= 1.0 {
            return end;
        }
        match (self, end) {
            (PropertyValue::Scalar(a), PropertyValue::Scalar(b)) => {
                PropertyValue::Scalar(a + (b - a) * f)
            }
            (PropertyValue::Vec3(a), PropertyValue::Vec3(b)) => {
                PropertyValue::Vec3(a + (b - a) * f)
            }
            (_, other) => other,
        }
    }

    /// Whether two values are the same kind (scalar/scalar or vec3/vec3).
    pub fn same_kind(self, other: PropertyValue) -> bool {
        matches!(
            (self, other),
            (PropertyValue::Scalar(_), PropertyValue::Scalar(_))
                | (PropertyValue::Vec3(_), PropertyValue::Vec3(_))
        )
    }

    /// Extract the scalar payload, if this is a scalar.
    pub fn as_scalar(self) -> Option<f32> {
        match self {
            PropertyValue::Scalar(v) => Some(v),
            PropertyValue::Vec3(_) => None,
        }
    }

    /// Extract the vector payload, if this is a vector.
    pub fn as_vec3(self) -> Option<Vec3> {
        match self {
            PropertyValue::Vec3(v) => Some(v),
            PropertyValue::Scalar(_) => None,
        }
    }
}

impl From<f32> for PropertyValue {
    fn from(value: f32) -> Self {
        PropertyValue::Scalar(value)
    }
}

impl From<Vec3> for PropertyValue {
    fn from(value: Vec3) -> Self {
        PropertyValue::Vec3(value)
    }
}
