//! Three-component vectors in A-Frame attribute syntax (`"1 1 1"`).

#[cfg(test)]
#[path = "vec3_test.rs"]
mod vec3_test;

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ParseVec3Error {
    #[error("expected 3 components, got {0}")]
    Arity(usize),
    #[error("invalid component '{0}'")]
    Component(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Vec3 {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Vec3 {
    pub const ZERO: Self = Self::splat(0.0);
    pub const ONE: Self = Self::splat(1.0);

    #[must_use]
    pub const fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    #[must_use]
    pub const fn splat(v: f64) -> Self {
        Self { x: v, y: v, z: v }
    }
}

impl Default for Vec3 {
    fn default() -> Self {
        Self::ZERO
    }
}

impl FromStr for Vec3 {
    type Err = ParseVec3Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let parts: Vec<&str> = s.split_whitespace().collect();
        let &[x, y, z] = parts.as_slice() else {
            return Err(ParseVec3Error::Arity(parts.len()));
        };
        let parse = |raw: &str| match raw.parse::<f64>() {
            Ok(v) if v.is_finite() => Ok(v),
            _ => Err(ParseVec3Error::Component(raw.to_string())),
        };
        Ok(Self::new(parse(x)?, parse(y)?, parse(z)?))
    }
}

impl fmt::Display for Vec3 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} {}", self.x, self.y, self.z)
    }
}

impl TryFrom<String> for Vec3 {
    type Error = ParseVec3Error;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Vec3> for String {
    fn from(value: Vec3) -> Self {
        value.to_string()
    }
}
