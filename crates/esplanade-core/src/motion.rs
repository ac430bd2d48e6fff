//! Bounded-oscillation motion state
//!
//! The per-tick step is a pure function here so the oscillator can be
//! tested without a runtime; the scheduler in `esplanade-motion` owns one
//! [`MotionState`] per moving prop and drives it on a fixed cadence.

use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum MotionError {
    #[error("invalid axis bounds: min {min} is not below max {max}")]
    InvalidBounds { min: f32, max: f32 },
}

/// Travel direction along the motion axis
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Positive,
    Negative,
}

impl Direction {
    /// Initial direction by naming convention: entities named with "left"
    /// or "Left" travel negative, everything else positive
    pub fn for_entity(name: &str) -> Self {
        if name.contains("left") || name.contains("Left") {
            Self::Negative
        } else {
            Self::Positive
        }
    }

    /// Signed unit step factor, always +1 or -1
    pub fn signum(self) -> f32 {
        match self {
            Self::Positive => 1.0,
            Self::Negative => -1.0,
        }
    }

    /// The opposite direction
    pub fn flipped(self) -> Self {
        match self {
            Self::Positive => Self::Negative,
            Self::Negative => Self::Positive,
        }
    }
}

/// Inclusive axis bounds shared by all moving props
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AxisBounds {
    pub min: f32,
    pub max: f32,
}

impl AxisBounds {
    pub fn new(min: f32, max: f32) -> Result<Self, MotionError> {
        if min >= max {
            return Err(MotionError::InvalidBounds { min, max });
        }
        Ok(Self { min, max })
    }
}

impl Default for AxisBounds {
    fn default() -> Self {
        Self {
            min: -35.0,
            max: 35.0,
        }
    }
}

/// Per-prop oscillator state: the current direction plus the bounds that
/// reverse it
#[derive(Debug, Clone, Copy)]
pub struct MotionState {
    direction: Direction,
    bounds: AxisBounds,
}

impl MotionState {
    pub fn new(direction: Direction, bounds: AxisBounds) -> Self {
        Self { direction, bounds }
    }

    /// State for a named entity, with the direction the naming convention
    /// assigns it
    pub fn for_entity(name: &str, bounds: AxisBounds) -> Self {
        Self::new(Direction::for_entity(name), bounds)
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    pub fn bounds(&self) -> AxisBounds {
        self.bounds
    }

    /// Advance one tick and return the new axis position
    ///
    /// The boundary check runs after the increment and only flips the
    /// direction used by the next tick, so the returned position may
    /// overshoot a bound by up to one step.
    pub fn advance(&mut self, position: f32, speed: f32) -> f32 {
        let next = position + speed * self.direction.signum();
        if next >= self.bounds.max || next <= self.bounds.min {
            self.direction = self.direction.flipped();
        }
        next
    }
}
