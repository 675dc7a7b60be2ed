use std::time::Duration;

use crate::engine::cell::{Card, Idx};
use crate::error::{Error, Result};

pub(crate) const DEFAULT_SIZE: usize = 4;
pub(crate) const DEFAULT_TARGET: Card = 2048;
pub(crate) const DEFAULT_ANIMATION_TICKS: u32 = 12;
pub(crate) const DEFAULT_TICK_RATE: u32 = 60;

const DEFAULT_TILE_SIZE: u32 = 120;
const DEFAULT_GAP: u32 = 10;

/// Rect is a logical rectangle: origin and side length of a square.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub(crate) struct Rect {
    pub(crate) x: u32,
    pub(crate) y: u32,
    pub(crate) size: u32,
}

/// Geometry lays tiles out in logical units, independent of what draws them.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) struct Geometry {
    pub(crate) tile_size: u32,
    pub(crate) gap: u32,
}

impl Default for Geometry {
    fn default() -> Self {
        Self {
            tile_size: DEFAULT_TILE_SIZE,
            gap: DEFAULT_GAP,
        }
    }
}

impl Geometry {
    pub(crate) fn tile_rect(&self, idx: &Idx) -> Rect {
        let pitch = self.tile_size + self.gap;
        Rect {
            x: self.gap + idx.col() as u32 * pitch,
            y: self.gap + idx.row() as u32 * pitch,
            size: self.tile_size,
        }
    }

    /// A square of side `size` centred on the tile at `idx`.
    pub(crate) fn centered_rect(&self, idx: &Idx, size: u32) -> Rect {
        let full = self.tile_rect(idx);
        let size = size.min(full.size);
        let offset = (full.size - size) / 2;
        Rect {
            x: full.x + offset,
            y: full.y + offset,
            size,
        }
    }

    /// Side length of the whole board including the outer gaps.
    pub(crate) fn extent(&self, cells: usize) -> u32 {
        cells as u32 * self.tile_size + (cells as u32 + 1) * self.gap
    }
}

/// Config holds everything fixed for the lifetime of a session.
#[derive(Clone, Debug, PartialEq)]
pub(crate) struct Config {
    size: usize,
    target: Card,
    animation_ticks: u32,
    tick_rate: u32,
    geometry: Geometry,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            size: DEFAULT_SIZE,
            target: DEFAULT_TARGET,
            animation_ticks: DEFAULT_ANIMATION_TICKS,
            tick_rate: DEFAULT_TICK_RATE,
            geometry: Geometry::default(),
        }
    }
}

impl Config {
    pub(crate) fn new(
        size: usize,
        target: Card,
        animation_ticks: u32,
        tick_rate: u32,
    ) -> Result<Self> {
        if size < 2 {
            return Err(Error::InvalidConfig(format!(
                "board size must be at least 2, got {}",
                size
            )));
        }
        if target < 4 || !target.is_power_of_two() {
            return Err(Error::InvalidConfig(format!(
                "target must be a power of two of at least 4, got {}",
                target
            )));
        }
        if animation_ticks == 0 {
            return Err(Error::InvalidConfig(String::from(
                "animation must last at least one tick",
            )));
        }
        if tick_rate == 0 {
            return Err(Error::InvalidConfig(String::from(
                "tick rate must be at least one tick per second",
            )));
        }
        Ok(Self {
            size,
            target,
            animation_ticks,
            tick_rate,
            geometry: Geometry::default(),
        })
    }

    pub(crate) fn size(&self) -> usize {
        self.size
    }

    pub(crate) fn target(&self) -> Card {
        self.target
    }

    pub(crate) fn animation_ticks(&self) -> u32 {
        self.animation_ticks
    }

    pub(crate) fn tick(&self) -> Duration {
        Duration::from_secs(1) / self.tick_rate
    }

    pub(crate) fn geometry(&self) -> &Geometry {
        &self.geometry
    }
}
