//! Touch-to-digit classification for the circular dial.
//!
//! The dial is split into ten 36° pie slices numbered clockwise from twelve
//! o'clock. A circular dead zone around the center keeps touches near the
//! entry display from registering as digits.

use core::fmt;

#[cfg(test)]
mod tests;

// Slope boundaries between neighbouring sectors, checked in this order with a
// strict `>` so a tie falls through to the next sector down the chain.
const SLOPE_TAN_72: f32 = 3.077_683_5;
const SLOPE_TAN_36: f32 = 0.726_542_5;
const SLOPE_TAN_0: f32 = 0.0;
const SLOPE_TAN_144: f32 = -0.726_542_5;
const SLOPE_TAN_108: f32 = -3.077_683_5;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct TouchPoint {
    pub x: i32,
    pub y: i32,
}

impl TouchPoint {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

/// One of the ten digit slices of the dial.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct DialSector(u8);

impl DialSector {
    pub const COUNT: u8 = 10;

    pub const fn new(digit: u8) -> Option<Self> {
        if digit < Self::COUNT {
            Some(Self(digit))
        } else {
            None
        }
    }

    pub const fn digit(self) -> u8 {
        self.0
    }

    /// Symbol reachable by holding this sector, if any.
    pub const fn special_key(self) -> Option<SpecialKey> {
        match self.0 {
            3 => Some(SpecialKey::Hash),
            5 => Some(SpecialKey::Plus),
            7 => Some(SpecialKey::Star),
            _ => None,
        }
    }

    pub fn all() -> impl Iterator<Item = Self> {
        (0..Self::COUNT).map(Self)
    }
}

impl fmt::Display for DialSector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SpecialKey {
    Hash,
    Plus,
    Star,
}

impl SpecialKey {
    pub const fn symbol(self) -> char {
        match self {
            Self::Hash => '#',
            Self::Plus => '+',
            Self::Star => '*',
        }
    }
}

/// Fixed dial placement on the canvas.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DialGeometry {
    pub center: TouchPoint,
    pub min_radius: f32,
}

impl DialGeometry {
    pub const fn new(center: TouchPoint, min_radius: f32) -> Self {
        Self { center, min_radius }
    }

    pub fn classify(&self, point: TouchPoint) -> Option<DialSector> {
        classify(point, self.center, self.min_radius)
    }
}

/// Maps a touch to the dial sector under it, or `None` inside the dead zone.
pub fn classify(point: TouchPoint, center: TouchPoint, min_radius: f32) -> Option<DialSector> {
    let dx = i64::from(point.x) - i64::from(center.x);
    let dy = i64::from(center.y) - i64::from(point.y);

    let radius = radius_of(dx, dy);
    if radius <= min_radius {
        log::debug!(
            "dial: ignore touch under min radius x={} y={} r={:.1}",
            point.x,
            point.y,
            radius
        );
        return None;
    }

    let digit = if dx == 0 {
        if dy >= 0 {
            0
        } else {
            5
        }
    } else if dy == 0 {
        if dx >= 0 {
            2
        } else {
            8
        }
    } else {
        sector_for_slope(dy as f32 / dx as f32, dy > 0)
    };

    Some(DialSector(digit))
}

fn radius_of(dx: i64, dy: i64) -> f32 {
    let (dx, dy) = (dx as f64, dy as f64);
    (dx * dx + dy * dy).sqrt() as f32
}

fn sector_for_slope(slope: f32, upper: bool) -> u8 {
    let (up, down) = if slope > SLOPE_TAN_72 {
        (0, 5)
    } else if slope > SLOPE_TAN_36 {
        (1, 6)
    } else if slope > SLOPE_TAN_0 {
        (2, 7)
    } else if slope > SLOPE_TAN_144 {
        (8, 3)
    } else if slope > SLOPE_TAN_108 {
        (9, 4)
    } else {
        (0, 5)
    };
    if upper {
        up
    } else {
        down
    }
}
