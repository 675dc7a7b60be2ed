use std::collections::HashMap;
use std::sync::OnceLock;

use palette::{FromColor, Lch, Srgb};

use crate::engine::cell::Card;

/// Number of distinct tile hues; values past 2^TILE_HUES reuse the last one.
const TILE_HUES: u32 = 11;

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub(crate) struct Rgb {
    color: Srgb<u8>,
}

impl Rgb {
    pub(crate) fn new(r: u8, g: u8, b: u8) -> Self {
        Self {
            color: Srgb::new(r, g, b),
        }
    }

    #[inline(always)]
    pub(crate) fn r(&self) -> u8 {
        self.color.red
    }

    #[inline(always)]
    pub(crate) fn g(&self) -> u8 {
        self.color.green
    }

    #[inline(always)]
    pub(crate) fn b(&self) -> u8 {
        self.color.blue
    }
}

impl From<Lch> for Rgb {
    fn from(lch: Lch) -> Rgb {
        let rgb = Srgb::from_color(lch).into_format::<u8>();
        Rgb::new(rgb.red, rgb.green, rgb.blue)
    }
}

impl From<Rgb> for crossterm::style::Color {
    fn from(f: Rgb) -> crossterm::style::Color {
        crossterm::style::Color::Rgb {
            r: f.r(),
            g: f.g(),
            b: f.b(),
        }
    }
}

/// Background and foreground of a tile.
#[derive(Clone, Copy, Debug)]
struct TileColors {
    background: Lch,
    foreground: Lch,
}

static TILE_COLORS: OnceLock<HashMap<Card, TileColors>> = OnceLock::new();

fn tile_palette() -> &'static HashMap<Card, TileColors> {
    TILE_COLORS.get_or_init(|| {
        let bg_hue = 28.0;
        let fg_hue = bg_hue + 180.0;
        HashMap::from_iter((1..=TILE_HUES).map(|i| {
            (
                2u32.pow(i),
                TileColors {
                    background: Lch::new(80.0, 90.0, bg_hue + i as f32 * 360.0 / TILE_HUES as f32),
                    foreground: Lch::new(20.0, 50.0, fg_hue),
                },
            )
        }))
    })
}

/// Colors used to draw a tile holding `value`. Dimmed colors are used behind the end-of-game
/// message.
pub(crate) fn tile_colors(value: Card, dimmed: bool) -> (Rgb, Rgb) {
    let colors = tile_palette()
        .get(&value)
        .copied()
        .unwrap_or(TileColors {
            background: Lch::new(30.0, 10.0, 60.0),
            foreground: Lch::new(95.0, 5.0, 60.0),
        });
    let dim = |c: Lch| {
        if dimmed {
            Lch::new(c.l * 0.5, c.chroma * 0.5, c.hue)
        } else {
            c
        }
    };
    (
        Rgb::from(dim(colors.background)),
        Rgb::from(dim(colors.foreground)),
    )
}

/// Colors of the board frame and empty slots.
pub(crate) fn board_colors(dimmed: bool) -> (Rgb, Rgb) {
    let lightness = if dimmed { 15.0 } else { 35.0 };
    (
        Rgb::from(Lch::new(lightness, 8.0, 60.0)),
        Rgb::from(Lch::new(lightness + 30.0, 8.0, 60.0)),
    )
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn every_power_of_two_up_to_2048_has_its_own_color() {
        let backgrounds: Vec<Rgb> = (1..=11).map(|i| tile_colors(2u32.pow(i), false).0).collect();
        for (i, a) in backgrounds.iter().enumerate() {
            for b in backgrounds.iter().skip(i + 1) {
                assert_ne!(a, b);
            }
        }
    }

    #[test]
    fn dimmed_colors_are_darker() {
        let (bright, _) = tile_colors(8, false);
        let (dim, _) = tile_colors(8, true);
        let sum = |c: Rgb| c.r() as u32 + c.g() as u32 + c.b() as u32;
        assert!(sum(dim) < sum(bright));
    }

    #[test]
    fn unknown_values_fall_back() {
        assert_eq!(tile_colors(1 << 20, false), tile_colors(1 << 21, false));
    }
}
